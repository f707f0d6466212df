//! Singleton: one shared instance, built by whichever caller gets there first.
//!
//! Initialisation race policy: the first caller to take the slot's lock
//! constructs the instance with *its* value; every later caller, concurrent
//! or not, receives that same instance and its value argument is ignored.
//! The instance is immutable once published, so reads need no further
//! locking.

use std::sync::{Arc, Mutex, PoisonError};

use lazy_static::lazy_static;

/// Not `Clone` or `Copy`, and only ever handed out behind an `Arc`, so the
/// instance cannot be duplicated or moved out of its slot.
#[derive(Debug)]
pub struct Singleton {
    value: String,
}

impl Singleton {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn some_business_logic(&self) -> String {
        format!("Singleton({}) is doing its job", self.value)
    }
}

/// A construct-once slot that can be owned and passed around explicitly.
#[derive(Debug, Default)]
pub struct InstanceSlot {
    instance: Mutex<Option<Arc<Singleton>>>,
}

impl InstanceSlot {
    pub fn new() -> Self {
        Self {
            instance: Mutex::new(None),
        }
    }

    /// Returns the instance, constructing it from `value` on first use.
    pub fn get_or_init(&self, value: &str) -> Arc<Singleton> {
        // The guarded value is a single Option assignment and cannot be
        // observed half-written, so a poisoned lock is still usable.
        let mut slot = self.instance.lock().unwrap_or_else(PoisonError::into_inner);
        match slot.as_ref() {
            Some(instance) => Arc::clone(instance),
            None => {
                tracing::info!(value, "constructing singleton");
                let instance = Arc::new(Singleton {
                    value: value.to_string(),
                });
                *slot = Some(Arc::clone(&instance));
                instance
            }
        }
    }

    pub fn get(&self) -> Option<Arc<Singleton>> {
        self.instance
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

lazy_static! {
    static ref GLOBAL: InstanceSlot = InstanceSlot::new();
}

/// The process-wide instance.
pub fn get_instance(value: &str) -> Arc<Singleton> {
    GLOBAL.get_or_init(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_first_value_wins() {
        let slot = InstanceSlot::new();
        let first = slot.get_or_init("FOO");
        let second = slot.get_or_init("BAR");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.value(), "FOO");
    }

    #[test]
    fn test_empty_slot() {
        let slot = InstanceSlot::default();
        assert!(slot.get().is_none());
        slot.get_or_init("x");
        assert_eq!(slot.get().unwrap().value(), "x");
    }

    #[test]
    fn test_concurrent_first_callers_share_instance() {
        let slot = Arc::new(InstanceSlot::new());
        let handles: Vec<_> = ["FOO", "BAR", "BAZ", "QUX"]
            .into_iter()
            .map(|value| {
                let slot = Arc::clone(&slot);
                thread::spawn(move || slot.get_or_init(value))
            })
            .collect();
        let instances: Vec<Arc<Singleton>> =
            handles.into_iter().map(|h| h.join().unwrap()).collect();

        let winner = &instances[0];
        assert!(["FOO", "BAR", "BAZ", "QUX"].contains(&winner.value()));
        for instance in &instances {
            assert!(Arc::ptr_eq(winner, instance));
        }
    }

    #[test]
    fn test_poisoned_slot_still_serves() {
        let slot = Arc::new(InstanceSlot::new());
        slot.get_or_init("kept");
        let poisoner = Arc::clone(&slot);
        let _ = thread::spawn(move || {
            let _guard = poisoner.instance.lock().unwrap();
            panic!("poison the lock");
        })
        .join();

        assert_eq!(slot.get_or_init("other").value(), "kept");
    }
}
