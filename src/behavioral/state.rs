//! State: a context delegates requests to the state object it owns. States
//! reach back into the context through a weak reference to trigger
//! transitions.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::error::{PatternError, Result};

pub trait State {
    fn name(&self) -> &'static str;

    fn set_context(&mut self, context: Weak<Context>);

    fn handle1(&self) -> Result<()>;

    fn handle2(&self) -> Result<()>;
}

pub struct Context {
    state: RefCell<Option<Box<dyn State>>>,
    transitions: RefCell<Vec<&'static str>>,
    me: Weak<Context>,
}

impl Context {
    /// Starts without a state; call [`Context::transition_to`] before any
    /// request.
    pub fn new() -> Rc<Self> {
        Rc::new_cyclic(|me| Self {
            state: RefCell::new(None),
            transitions: RefCell::new(Vec::new()),
            me: me.clone(),
        })
    }

    /// Replaces the owned state and points its back-reference at `self`.
    pub fn transition_to(&self, mut state: Box<dyn State>) {
        tracing::debug!(to = state.name(), "context transition");
        state.set_context(self.me.clone());
        self.transitions.borrow_mut().push(state.name());
        *self.state.borrow_mut() = Some(state);
    }

    pub fn request1(&self) -> Result<()> {
        self.dispatch(|state| state.handle1())
    }

    pub fn request2(&self) -> Result<()> {
        self.dispatch(|state| state.handle2())
    }

    /// The state is taken out of its slot while it runs so that it can
    /// install a successor. If it did not, it goes back in.
    fn dispatch(&self, request: impl FnOnce(&dyn State) -> Result<()>) -> Result<()> {
        let current = self.state.borrow_mut().take().ok_or(PatternError::NoState)?;
        let outcome = request(&*current);
        let mut slot = self.state.borrow_mut();
        if slot.is_none() {
            *slot = Some(current);
        }
        outcome
    }

    pub fn current_state(&self) -> Option<&'static str> {
        self.state.borrow().as_ref().map(|state| state.name())
    }

    /// Names of every state entered, oldest first.
    pub fn transitions(&self) -> Vec<&'static str> {
        self.transitions.borrow().clone()
    }
}

fn context_of(context: &Weak<Context>) -> Result<Rc<Context>> {
    context
        .upgrade()
        .ok_or_else(|| PatternError::dangling("state", "context"))
}

// =============================================================================
// Concrete states: A.handle1 -> B, B.handle2 -> A
// =============================================================================

#[derive(Default)]
pub struct ConcreteStateA {
    context: Weak<Context>,
}

impl State for ConcreteStateA {
    fn name(&self) -> &'static str {
        "ConcreteStateA"
    }

    fn set_context(&mut self, context: Weak<Context>) {
        self.context = context;
    }

    fn handle1(&self) -> Result<()> {
        tracing::info!("ConcreteStateA handles request1 and wants to change the state");
        context_of(&self.context)?.transition_to(Box::new(ConcreteStateB::default()));
        Ok(())
    }

    fn handle2(&self) -> Result<()> {
        tracing::info!("ConcreteStateA handles request2");
        Ok(())
    }
}

#[derive(Default)]
pub struct ConcreteStateB {
    context: Weak<Context>,
}

impl State for ConcreteStateB {
    fn name(&self) -> &'static str {
        "ConcreteStateB"
    }

    fn set_context(&mut self, context: Weak<Context>) {
        self.context = context;
    }

    fn handle1(&self) -> Result<()> {
        tracing::info!("ConcreteStateB handles request1");
        Ok(())
    }

    fn handle2(&self) -> Result<()> {
        tracing::info!("ConcreteStateB handles request2 and wants to change the state");
        context_of(&self.context)?.transition_to(Box::new(ConcreteStateA::default()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_returns_to_initial_state() {
        let context = Context::new();
        context.transition_to(Box::new(ConcreteStateA::default()));

        context.request1().unwrap();
        assert_eq!(context.current_state(), Some("ConcreteStateB"));
        context.request2().unwrap();
        assert_eq!(context.current_state(), Some("ConcreteStateA"));
        assert_eq!(
            context.transitions(),
            vec!["ConcreteStateA", "ConcreteStateB", "ConcreteStateA"]
        );
    }

    #[test]
    fn test_non_transitioning_requests_keep_state() {
        let context = Context::new();
        context.transition_to(Box::new(ConcreteStateA::default()));
        context.request2().unwrap();
        assert_eq!(context.current_state(), Some("ConcreteStateA"));

        context.transition_to(Box::new(ConcreteStateB::default()));
        context.request1().unwrap();
        assert_eq!(context.current_state(), Some("ConcreteStateB"));
    }

    #[test]
    fn test_request_without_state() {
        let context = Context::new();
        assert!(matches!(context.request1(), Err(PatternError::NoState)));
        assert_eq!(context.current_state(), None);
    }

    #[test]
    fn test_state_reports_dropped_context() {
        let context = Context::new();
        let mut state = ConcreteStateA::default();
        state.set_context(context.me.clone());
        drop(context);

        assert!(matches!(
            state.handle1(),
            Err(PatternError::DanglingReference { .. })
        ));
    }

    #[test]
    fn test_state_does_not_keep_context_alive() {
        let context = Context::new();
        context.transition_to(Box::new(ConcreteStateB::default()));
        let weak = Rc::downgrade(&context);
        drop(context);
        assert!(weak.upgrade().is_none());
    }
}
