//! Patterns about how objects hand work to each other.

pub mod chain;
pub mod iterator;
pub mod mediator;
pub mod memento;
pub mod observer;
pub mod state;
pub mod visitor;
