//! # Design patterns in Rust
//!
//! Classic object-oriented patterns expressed with Rust ownership:
//!
//! ## Behavioral
//! - Chain of Responsibility: owning forward links, `Option` for "unhandled"
//! - Iterator: a cursor holding a `Weak` reference to its container
//! - Mediator: components own the mediator, the mediator observes them
//! - Memento: tagged snapshots, a caretaker that skips foreign ones
//! - Observer: attach/detach by identity, notification in attachment order
//! - State: a context owning its state, states reaching back through `Weak`
//! - Visitor: double dispatch through `accept`
//!
//! ## Creational
//! - Abstract Factory, Factory Method
//! - Singleton: construct-once slot, explicit or process-wide
//!
//! ## Structural
//! - Adapter, Bridge, Proxy
//! - Composite: owning children, `Weak` parent links, cycle checks
//! - Flyweight: a keyed pool of shared model data
//!
//! Run the walk-throughs with: `cargo run --bin patterns [PATTERN...]`

pub mod behavioral;
pub mod config;
pub mod creational;
pub mod demo;
pub mod error;
pub mod logging;
pub mod structural;

pub use config::{DemoConfig, PatternKind};
pub use error::{PatternError, Result};
