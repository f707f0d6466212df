//! Adapter: makes the adaptee's backwards output usable through `Target`.

use std::rc::Rc;

pub trait Target {
    fn request(&self) -> String {
        "Target: The default target's behavior.".to_string()
    }
}

pub struct DefaultTarget;

impl Target for DefaultTarget {}

pub struct Adaptee;

impl Adaptee {
    pub fn specific_request(&self) -> String {
        ".eetpadA eht fo roivaheb laicepS".to_string()
    }
}

pub struct Adapter {
    adaptee: Rc<Adaptee>,
}

impl Adapter {
    pub fn new(adaptee: Rc<Adaptee>) -> Self {
        Self { adaptee }
    }
}

impl Target for Adapter {
    fn request(&self) -> String {
        let translated: String = self.adaptee.specific_request().chars().rev().collect();
        format!("Adapter: (TRANSLATED) {translated}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_target() {
        assert_eq!(DefaultTarget.request(), "Target: The default target's behavior.");
    }

    #[test]
    fn test_adapter_translates() {
        let target: Box<dyn Target> = Box::new(Adapter::new(Rc::new(Adaptee)));
        assert_eq!(
            target.request(),
            "Adapter: (TRANSLATED) Special behavior of the Adaptee."
        );
    }
}
