//! Mediator: components report events to a shared mediator, which alone
//! knows how they interact.
//!
//! Components own their mediator; the mediator only observes the components,
//! so dropping the components frees the whole graph.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::error::{PatternError, Result};

pub trait Colleague {
    fn name(&self) -> &'static str;
}

pub trait Mediator {
    /// Unrecognised events are ignored.
    fn notify(&self, sender: &dyn Colleague, event: &str) -> Result<()>;
}

/// Mediator slot and operation journal shared by both components.
#[derive(Default)]
pub struct BaseComponent {
    mediator: RefCell<Option<Rc<dyn Mediator>>>,
    journal: RefCell<Vec<&'static str>>,
}

impl BaseComponent {
    pub fn set_mediator(&self, mediator: Rc<dyn Mediator>) {
        *self.mediator.borrow_mut() = Some(mediator);
    }

    /// Operations performed so far, in order.
    pub fn journal(&self) -> Vec<&'static str> {
        self.journal.borrow().clone()
    }

    fn perform(&self, sender: &dyn Colleague, operation: &'static str, event: &str) -> Result<()> {
        tracing::debug!(component = sender.name(), operation, "component operation");
        self.journal.borrow_mut().push(operation);
        let mediator = self.mediator.borrow().clone();
        match mediator {
            Some(mediator) => mediator.notify(sender, event),
            None => Ok(()),
        }
    }
}

#[derive(Default)]
pub struct Component1 {
    base: BaseComponent,
}

impl Component1 {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn base(&self) -> &BaseComponent {
        &self.base
    }

    pub fn do_a(&self) -> Result<()> {
        self.base.perform(self, "A", "A")
    }

    pub fn do_b(&self) -> Result<()> {
        self.base.perform(self, "B", "B")
    }
}

impl Colleague for Component1 {
    fn name(&self) -> &'static str {
        "Component 1"
    }
}

#[derive(Default)]
pub struct Component2 {
    base: BaseComponent,
}

impl Component2 {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn base(&self) -> &BaseComponent {
        &self.base
    }

    pub fn do_c(&self) -> Result<()> {
        self.base.perform(self, "C", "C")
    }

    pub fn do_d(&self) -> Result<()> {
        self.base.perform(self, "D", "D")
    }
}

impl Colleague for Component2 {
    fn name(&self) -> &'static str {
        "Component 2"
    }
}

// =============================================================================
// Concrete mediator
// =============================================================================

#[derive(Default)]
pub struct ConcreteMediator {
    component1: RefCell<Weak<Component1>>,
    component2: RefCell<Weak<Component2>>,
}

impl ConcreteMediator {
    /// Builds the mediator and registers it with both components.
    pub fn wire(component1: &Rc<Component1>, component2: &Rc<Component2>) -> Rc<Self> {
        let mediator = Rc::new(Self::default());
        mediator.set_components(component1, component2);
        component1.base().set_mediator(mediator.clone());
        component2.base().set_mediator(mediator.clone());
        mediator
    }

    pub fn set_components(&self, component1: &Rc<Component1>, component2: &Rc<Component2>) {
        *self.component1.borrow_mut() = Rc::downgrade(component1);
        *self.component2.borrow_mut() = Rc::downgrade(component2);
    }

    fn component1(&self) -> Result<Rc<Component1>> {
        self.component1
            .borrow()
            .upgrade()
            .ok_or_else(|| PatternError::dangling("mediator", "component 1"))
    }

    fn component2(&self) -> Result<Rc<Component2>> {
        self.component2
            .borrow()
            .upgrade()
            .ok_or_else(|| PatternError::dangling("mediator", "component 2"))
    }
}

impl Mediator for ConcreteMediator {
    fn notify(&self, sender: &dyn Colleague, event: &str) -> Result<()> {
        match event {
            "A" => {
                tracing::debug!(sender = sender.name(), "mediator reacts on A");
                self.component2()?.do_c()
            }
            "D" => {
                tracing::debug!(sender = sender.name(), "mediator reacts on D");
                self.component1()?.do_b()?;
                self.component2()?.do_c()
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_a_triggers_c() {
        let c1 = Component1::new();
        let c2 = Component2::new();
        let _mediator = ConcreteMediator::wire(&c1, &c2);

        c1.do_a().unwrap();
        assert_eq!(c1.base().journal(), vec!["A"]);
        assert_eq!(c2.base().journal(), vec!["C"]);
    }

    #[test]
    fn test_event_d_triggers_b_then_c() {
        let c1 = Component1::new();
        let c2 = Component2::new();
        ConcreteMediator::wire(&c1, &c2);

        c2.do_d().unwrap();
        assert_eq!(c1.base().journal(), vec!["B"]);
        assert_eq!(c2.base().journal(), vec!["D", "C"]);
    }

    #[test]
    fn test_unmatched_events_are_ignored() {
        let c1 = Component1::new();
        let c2 = Component2::new();
        ConcreteMediator::wire(&c1, &c2);

        c1.do_b().unwrap();
        c2.do_c().unwrap();
        assert_eq!(c1.base().journal(), vec!["B"]);
        assert_eq!(c2.base().journal(), vec!["C"]);
    }

    #[test]
    fn test_component_without_mediator() {
        let c1 = Component1::new();
        c1.do_a().unwrap();
        assert_eq!(c1.base().journal(), vec!["A"]);
    }

    #[test]
    fn test_dropped_component_is_reported() {
        let c1 = Component1::new();
        let c2 = Component2::new();
        ConcreteMediator::wire(&c1, &c2);
        drop(c2);

        assert!(matches!(
            c1.do_a(),
            Err(PatternError::DanglingReference { .. })
        ));
    }
}
