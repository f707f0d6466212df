//! Bridge: abstractions delegate to whichever implementation they were
//! built with, so either side can vary independently.

use std::rc::Rc;

pub trait Implementation {
    fn operation_implementation(&self) -> String;
}

pub struct ConcreteImplementationA;
pub struct ConcreteImplementationB;

impl Implementation for ConcreteImplementationA {
    fn operation_implementation(&self) -> String {
        "ConcreteImplementationA: Here's the result on the platform A.\n".to_string()
    }
}

impl Implementation for ConcreteImplementationB {
    fn operation_implementation(&self) -> String {
        "ConcreteImplementationB: Here's the result on the platform B.\n".to_string()
    }
}

pub trait Abstraction {
    fn operation(&self) -> String;
}

pub struct BasicAbstraction {
    implementation: Rc<dyn Implementation>,
}

impl BasicAbstraction {
    pub fn new(implementation: Rc<dyn Implementation>) -> Self {
        Self { implementation }
    }
}

impl Abstraction for BasicAbstraction {
    fn operation(&self) -> String {
        format!(
            "Abstraction: Base operation with:\n{}",
            self.implementation.operation_implementation()
        )
    }
}

pub struct ExtendedAbstraction {
    implementation: Rc<dyn Implementation>,
}

impl ExtendedAbstraction {
    pub fn new(implementation: Rc<dyn Implementation>) -> Self {
        Self { implementation }
    }
}

impl Abstraction for ExtendedAbstraction {
    fn operation(&self) -> String {
        format!(
            "ExtendedAbstraction: Extended operation with:\n{}",
            self.implementation.operation_implementation()
        )
    }
}
