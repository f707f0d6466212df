//! Visitor: `accept` resolves the component's identity once and calls the
//! matching visitor method, so callers never branch on concrete types.

pub trait Visitor {
    fn visit_component_a(&mut self, element: &ConcreteComponentA);
    fn visit_component_b(&mut self, element: &ConcreteComponentB);
}

pub trait Component {
    fn accept(&self, visitor: &mut dyn Visitor);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ConcreteComponentA;

impl ConcreteComponentA {
    pub fn exclusive_method_of_concrete_component_a(&self) -> &'static str {
        "A"
    }
}

impl Component for ConcreteComponentA {
    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_component_a(self);
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ConcreteComponentB;

impl ConcreteComponentB {
    pub fn special_method_of_concrete_component_b(&self) -> &'static str {
        "B"
    }
}

impl Component for ConcreteComponentB {
    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_component_b(self);
    }
}

// =============================================================================
// Concrete visitors
// =============================================================================

/// Records one line per visited component.
#[derive(Debug, Default)]
pub struct ConcreteVisitor1 {
    pub lines: Vec<String>,
}

impl Visitor for ConcreteVisitor1 {
    fn visit_component_a(&mut self, element: &ConcreteComponentA) {
        self.lines.push(format!(
            "{} + ConcreteVisitor1",
            element.exclusive_method_of_concrete_component_a()
        ));
    }

    fn visit_component_b(&mut self, element: &ConcreteComponentB) {
        self.lines.push(format!(
            "{} + ConcreteVisitor1",
            element.special_method_of_concrete_component_b()
        ));
    }
}

#[derive(Debug, Default)]
pub struct ConcreteVisitor2 {
    pub lines: Vec<String>,
}

impl Visitor for ConcreteVisitor2 {
    fn visit_component_a(&mut self, element: &ConcreteComponentA) {
        self.lines.push(format!(
            "{} + ConcreteVisitor2",
            element.exclusive_method_of_concrete_component_a()
        ));
    }

    fn visit_component_b(&mut self, element: &ConcreteComponentB) {
        self.lines.push(format!(
            "{} + ConcreteVisitor2",
            element.special_method_of_concrete_component_b()
        ));
    }
}

pub fn visit_all(components: &[Box<dyn Component>], visitor: &mut dyn Visitor) {
    for component in components {
        component.accept(visitor);
    }
}
