//! Patterns about how objects are wrapped and composed.

pub mod adapter;
pub mod bridge;
pub mod composite;
pub mod flyweight;
pub mod proxy;
