//! Patterns about how objects come into existence.

pub mod abstract_factory;
pub mod factory_method;
pub mod singleton;
