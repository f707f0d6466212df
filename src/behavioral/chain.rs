//! Chain of Responsibility.
//!
//! Each handler either consumes a request or forwards it unchanged to the
//! next link. A request that falls off the end of the chain yields `None`,
//! which is distinct from a handler producing an empty string.

use std::cell::RefCell;
use std::rc::Rc;

// =============================================================================
// Link storage shared by every handler
// =============================================================================

/// The forward edge of a chain. Owning: the head keeps the whole chain alive.
#[derive(Default)]
pub struct Link {
    next: RefCell<Option<Rc<dyn Handler>>>,
}

impl Link {
    pub fn new() -> Self {
        Self::default()
    }

    fn forward(&self, request: &str) -> Option<String> {
        // Clone the Rc so the borrow is released before recursing.
        let next = self.next.borrow().clone();
        next.and_then(|handler| handler.handle(request))
    }
}

pub trait Handler {
    fn link(&self) -> &Link;

    fn name(&self) -> &'static str;

    /// Returns `Some` when this handler consumes the request.
    fn accept(&self, request: &str) -> Option<String>;

    /// Wires `next` after this handler and hands it back for fluent chaining.
    ///
    /// The chain must stay acyclic; linking a handler back to one of its
    /// predecessors makes `handle` recurse forever on unhandled requests.
    fn set_next(&self, next: Rc<dyn Handler>) -> Rc<dyn Handler> {
        tracing::debug!(from = self.name(), to = next.name(), "chain linked");
        *self.link().next.borrow_mut() = Some(Rc::clone(&next));
        next
    }

    fn handle(&self, request: &str) -> Option<String> {
        self.accept(request).or_else(|| self.link().forward(request))
    }
}

// =============================================================================
// Concrete handlers
// =============================================================================

fn eat(animal: &str, food: &str) -> String {
    format!("{animal}: I'll eat the {food}.\n")
}

#[derive(Default)]
pub struct MonkeyHandler {
    link: Link,
}

impl MonkeyHandler {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }
}

impl Handler for MonkeyHandler {
    fn link(&self) -> &Link {
        &self.link
    }

    fn name(&self) -> &'static str {
        "Monkey"
    }

    fn accept(&self, request: &str) -> Option<String> {
        (request == "Banana").then(|| eat(self.name(), request))
    }
}

#[derive(Default)]
pub struct SquirrelHandler {
    link: Link,
}

impl SquirrelHandler {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }
}

impl Handler for SquirrelHandler {
    fn link(&self) -> &Link {
        &self.link
    }

    fn name(&self) -> &'static str {
        "Squirrel"
    }

    fn accept(&self, request: &str) -> Option<String> {
        (request == "Nut").then(|| eat(self.name(), request))
    }
}

#[derive(Default)]
pub struct DogHandler {
    link: Link,
}

impl DogHandler {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }
}

impl Handler for DogHandler {
    fn link(&self) -> &Link {
        &self.link
    }

    fn name(&self) -> &'static str {
        "Dog"
    }

    fn accept(&self, request: &str) -> Option<String> {
        (request == "MeatBall").then(|| eat(self.name(), request))
    }
}

/// Offers every request to `handler` and pairs it with the outcome.
pub fn offer_all<'a>(
    handler: &dyn Handler,
    requests: &[&'a str],
) -> Vec<(&'a str, Option<String>)> {
    requests
        .iter()
        .map(|request| (*request, handler.handle(request)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    struct Chain {
        monkey: Rc<MonkeyHandler>,
        squirrel: Rc<SquirrelHandler>,
    }

    fn build_chain() -> Chain {
        let monkey = MonkeyHandler::new();
        let squirrel = SquirrelHandler::new();
        let dog = DogHandler::new();
        monkey.set_next(squirrel.clone()).set_next(dog);
        Chain { monkey, squirrel }
    }

    /// Consumes every request with an empty answer.
    #[derive(Default)]
    struct SilentHandler {
        link: Link,
    }

    impl Handler for SilentHandler {
        fn link(&self) -> &Link {
            &self.link
        }

        fn name(&self) -> &'static str {
            "Silent"
        }

        fn accept(&self, _request: &str) -> Option<String> {
            Some(String::new())
        }
    }

    #[test]
    fn test_last_handler_answers_from_head() {
        let chain = build_chain();
        assert_eq!(
            chain.monkey.handle("MeatBall").as_deref(),
            Some("Dog: I'll eat the MeatBall.\n")
        );
    }

    #[test]
    fn test_first_matching_handler_wins() {
        let chain = build_chain();
        assert_eq!(
            chain.monkey.handle("Nut").as_deref(),
            Some("Squirrel: I'll eat the Nut.\n")
        );
        assert_eq!(
            chain.monkey.handle("Banana").as_deref(),
            Some("Monkey: I'll eat the Banana.\n")
        );
    }

    #[test]
    fn test_unhandled_request_is_none_from_any_entry_point() {
        let chain = build_chain();
        assert_eq!(chain.monkey.handle("Cup of coffee"), None);
        assert_eq!(chain.squirrel.handle("Cup of coffee"), None);
    }

    #[test]
    fn test_subchain_skips_earlier_handlers() {
        let chain = build_chain();
        assert_eq!(chain.squirrel.handle("Banana"), None);
        assert!(chain.squirrel.handle("MeatBall").is_some());
    }

    #[test]
    fn test_empty_answer_is_not_unhandled() {
        let silent: Rc<dyn Handler> = Rc::new(SilentHandler::default());
        assert_eq!(silent.handle("anything"), Some(String::new()));
    }

    #[test]
    fn test_set_next_returns_argument() {
        let monkey = MonkeyHandler::new();
        let dog = DogHandler::new();
        let returned = monkey.set_next(dog.clone());
        assert_eq!(returned.name(), "Dog");
    }

    #[test]
    fn test_offer_all_keeps_request_order() {
        let chain = build_chain();
        let outcome = offer_all(&*chain.monkey, &["Nut", "Banana", "Cup of coffee"]);
        let handled: Vec<bool> = outcome.iter().map(|(_, r)| r.is_some()).collect();
        assert_eq!(handled, vec![true, true, false]);
        assert_eq!(outcome[2].0, "Cup of coffee");
    }

    proptest! {
        #[test]
        fn test_unknown_food_is_never_eaten(food in "[a-z ]{0,12}") {
            let chain = build_chain();
            prop_assert_eq!(chain.monkey.handle(&food), None);
        }
    }
}
