//! Flyweight: car models shared across many registrations.
//!
//! The factory keys each flyweight by its full `SharedState` and hands out
//! the same `Rc` for every request with matching shared fields. The
//! `brand_model_color` string is only used for listings.

use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use serde::Deserialize;

/// Intrinsic state: identical for every car of a given model and colour.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct SharedState {
    pub brand: String,
    pub model: String,
    pub color: String,
}

impl SharedState {
    pub fn new(
        brand: impl Into<String>,
        model: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            brand: brand.into(),
            model: model.into(),
            color: color.into(),
        }
    }

    /// Display key; not unique when a field itself contains `_`.
    pub fn key(&self) -> String {
        format!("{}_{}_{}", self.brand, self.model, self.color)
    }
}

impl fmt::Display for SharedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ {} , {} , {} ]", self.brand, self.model, self.color)
    }
}

/// Extrinsic state: supplied by the caller on every use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniqueState {
    pub owner: String,
    pub plates: String,
}

impl UniqueState {
    pub fn new(owner: impl Into<String>, plates: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            plates: plates.into(),
        }
    }
}

impl fmt::Display for UniqueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ {} , {} ]", self.owner, self.plates)
    }
}

#[derive(Debug)]
pub struct Flyweight {
    shared: SharedState,
}

impl Flyweight {
    pub fn shared(&self) -> &SharedState {
        &self.shared
    }

    pub fn operation(&self, unique: &UniqueState) -> String {
        format!(
            "Flyweight: Displaying shared ({}) and unique ({}) state.",
            self.shared, unique
        )
    }
}

#[derive(Debug, Default)]
pub struct FlyweightFactory {
    flyweights: FxHashMap<SharedState, Rc<Flyweight>>,
}

impl FlyweightFactory {
    pub fn new(seed: impl IntoIterator<Item = SharedState>) -> Self {
        let mut factory = Self::default();
        for shared in seed {
            factory.insert(shared);
        }
        factory
    }

    fn insert(&mut self, shared: SharedState) -> Rc<Flyweight> {
        let flyweight = Rc::new(Flyweight {
            shared: shared.clone(),
        });
        self.flyweights.insert(shared, Rc::clone(&flyweight));
        flyweight
    }

    /// Reuses the flyweight for `shared` when one exists, otherwise creates
    /// and caches it.
    pub fn get_flyweight(&mut self, shared: &SharedState) -> Rc<Flyweight> {
        if let Some(existing) = self.flyweights.get(shared) {
            tracing::info!(key = %shared.key(), "reusing existing flyweight");
            return Rc::clone(existing);
        }
        tracing::info!(key = %shared.key(), "can't find a flyweight, creating a new one");
        self.insert(shared.clone())
    }

    pub fn count(&self) -> usize {
        self.flyweights.len()
    }

    /// Sorted, so listings are stable.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.flyweights.keys().map(SharedState::key).collect();
        keys.sort();
        keys
    }
}

/// Registers one car, sharing its model data through the factory.
pub fn add_car_to_police_database(
    factory: &mut FlyweightFactory,
    plates: &str,
    owner: &str,
    shared: SharedState,
) -> String {
    let flyweight = factory.get_flyweight(&shared);
    flyweight.operation(&UniqueState::new(owner, plates))
}

/// The five models a police database starts with.
pub fn default_seed() -> Vec<SharedState> {
    vec![
        SharedState::new("Chevrolet", "Camaro2018", "pink"),
        SharedState::new("Mercedes Benz", "C300", "black"),
        SharedState::new("Mercedes Benz", "C500", "red"),
        SharedState::new("BMW", "M5", "red"),
        SharedState::new("BMW", "X6", "white"),
    ]
}
