//! Composite: leaves and branches behind one `Component` interface.
//!
//! Children are owned by their parent (`Rc`); the parent link is a `Weak`
//! back-reference, so a tree is freed as soon as its root is dropped.
//!
//! Policy for misuse:
//! - `add`/`remove` on a leaf are silent no-ops, so callers can treat every
//!   component the same way.
//! - `add` refuses a child that is already attached elsewhere, and a child
//!   that is the composite itself or one of its ancestors.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use itertools::Itertools;

use crate::error::{PatternError, Result};

/// Non-owning link from a component to the composite that holds it.
#[derive(Default)]
pub struct ParentRef {
    parent: RefCell<Option<Weak<dyn Component>>>,
}

pub trait Component {
    fn parent_ref(&self) -> &ParentRef;

    fn operation(&self) -> String;

    fn is_composite(&self) -> bool {
        false
    }

    fn add(&self, _child: Rc<dyn Component>) -> Result<()> {
        Ok(())
    }

    /// Returns whether `child` was one of this component's children.
    fn remove(&self, _child: &Rc<dyn Component>) -> bool {
        false
    }

    fn set_parent(&self, parent: Option<Weak<dyn Component>>) {
        *self.parent_ref().parent.borrow_mut() = parent;
    }

    /// `None` for a root, or when the parent has already been dropped.
    fn parent(&self) -> Option<Rc<dyn Component>> {
        self.parent_ref()
            .parent
            .borrow()
            .as_ref()
            .and_then(Weak::upgrade)
    }

    /// A link to a dropped parent does not count.
    fn has_parent(&self) -> bool {
        self.parent().is_some()
    }
}

fn address(component: &dyn Component) -> *const () {
    component as *const _ as *const ()
}

// =============================================================================
// Leaf
// =============================================================================

#[derive(Default)]
pub struct Leaf {
    parent: ParentRef,
}

impl Leaf {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }
}

impl Component for Leaf {
    fn parent_ref(&self) -> &ParentRef {
        &self.parent
    }

    fn operation(&self) -> String {
        "Leaf".to_string()
    }
}

// =============================================================================
// Composite
// =============================================================================

pub struct Composite {
    parent: ParentRef,
    children: RefCell<Vec<Rc<dyn Component>>>,
    me: Weak<Composite>,
}

impl Composite {
    pub fn new() -> Rc<Self> {
        Rc::new_cyclic(|me| Self {
            parent: ParentRef::default(),
            children: RefCell::new(Vec::new()),
            me: me.clone(),
        })
    }

    pub fn children(&self) -> Vec<Rc<dyn Component>> {
        self.children.borrow().clone()
    }

    /// True when `candidate` is this composite or sits above it.
    fn is_self_or_ancestor(&self, candidate: &dyn Component) -> bool {
        let target = address(candidate);
        if address(self) == target {
            return true;
        }
        let mut current = self.parent();
        while let Some(node) = current {
            if address(node.as_ref()) == target {
                return true;
            }
            current = node.parent();
        }
        false
    }
}

impl Component for Composite {
    fn parent_ref(&self) -> &ParentRef {
        &self.parent
    }

    fn is_composite(&self) -> bool {
        true
    }

    fn add(&self, child: Rc<dyn Component>) -> Result<()> {
        if self.is_self_or_ancestor(child.as_ref()) {
            return Err(PatternError::CycleDetected);
        }
        if child.has_parent() {
            return Err(PatternError::AlreadyAttached);
        }
        let me: Weak<dyn Component> = self.me.clone();
        child.set_parent(Some(me));
        self.children.borrow_mut().push(child);
        tracing::debug!(children = self.children.borrow().len(), "component added");
        Ok(())
    }

    fn remove(&self, child: &Rc<dyn Component>) -> bool {
        let mut children = self.children.borrow_mut();
        let target = address(child.as_ref());
        match children.iter().position(|c| address(c.as_ref()) == target) {
            Some(index) => {
                children.remove(index).set_parent(None);
                true
            }
            None => false,
        }
    }

    /// Children in insertion order, joined with `+`, wrapped in `Branch(...)`.
    fn operation(&self) -> String {
        let joined = self
            .children
            .borrow()
            .iter()
            .map(|child| child.operation())
            .join("+");
        format!("Branch({joined})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn leaf() -> Rc<dyn Component> {
        Leaf::new()
    }

    fn composite() -> Rc<dyn Component> {
        Composite::new()
    }

    #[test]
    fn test_two_leaf_branch() {
        let root = composite();
        root.add(leaf()).unwrap();
        root.add(leaf()).unwrap();
        assert_eq!(root.operation(), "Branch(Leaf+Leaf)");
    }

    #[test]
    fn test_nested_tree() {
        let tree = composite();
        let branch1 = composite();
        let branch2 = composite();
        branch1.add(leaf()).unwrap();
        branch1.add(leaf()).unwrap();
        branch2.add(leaf()).unwrap();
        tree.add(branch1).unwrap();
        tree.add(branch2).unwrap();
        assert_eq!(tree.operation(), "Branch(Branch(Leaf+Leaf)+Branch(Leaf))");

        tree.add(leaf()).unwrap();
        assert_eq!(
            tree.operation(),
            "Branch(Branch(Leaf+Leaf)+Branch(Leaf)+Leaf)"
        );
    }

    #[test]
    fn test_is_composite() {
        assert!(composite().is_composite());
        assert!(!leaf().is_composite());
        assert_eq!(composite().operation(), "Branch()");
    }

    #[test]
    fn test_add_sets_parent_and_remove_clears_it() {
        let root = composite();
        let child = leaf();
        root.add(child.clone()).unwrap();
        let parent = child.parent().unwrap();
        assert_eq!(address(parent.as_ref()), address(root.as_ref()));

        assert!(root.remove(&child));
        assert!(child.parent().is_none());
        assert_eq!(root.operation(), "Branch()");
        assert!(!root.remove(&child));
    }

    #[test]
    fn test_leaf_child_management_is_noop() {
        let simple = leaf();
        let other = leaf();
        simple.add(other.clone()).unwrap();
        assert!(!simple.remove(&other));
        assert!(other.parent().is_none());
        assert_eq!(simple.operation(), "Leaf");
    }

    #[test]
    fn test_cycles_are_rejected() {
        let root = composite();
        let middle = composite();
        root.add(middle.clone()).unwrap();

        assert!(matches!(root.add(root.clone()), Err(PatternError::CycleDetected)));
        assert!(matches!(middle.add(root.clone()), Err(PatternError::CycleDetected)));
    }

    #[test]
    fn test_second_parent_is_rejected() {
        let first = composite();
        let second = composite();
        let child = leaf();
        first.add(child.clone()).unwrap();
        assert!(matches!(second.add(child.clone()), Err(PatternError::AlreadyAttached)));

        first.remove(&child);
        second.add(child).unwrap();
        assert_eq!(first.operation(), "Branch()");
        assert_eq!(second.operation(), "Branch(Leaf)");
    }

    #[test]
    fn test_parent_back_reference_does_not_own() {
        let root = composite();
        let child = leaf();
        root.add(child.clone()).unwrap();
        drop(root);
        assert!(child.parent().is_none());
    }

    #[test]
    fn test_orphan_can_be_adopted() {
        let child = leaf();
        {
            let old = composite();
            old.add(child.clone()).unwrap();
        }
        assert!(!child.has_parent());

        let adopter = composite();
        adopter.add(child.clone()).unwrap();
        let parent = child.parent().unwrap();
        assert_eq!(address(parent.as_ref()), address(adopter.as_ref()));
        assert_eq!(adopter.operation(), "Branch(Leaf)");
    }

    proptest! {
        #[test]
        fn test_flat_branch_renders_every_leaf(count in 0usize..20) {
            let root = composite();
            for _ in 0..count {
                root.add(leaf()).unwrap();
            }
            let expected = format!("Branch({})", vec!["Leaf"; count].join("+"));
            prop_assert_eq!(root.operation(), expected);
        }
    }
}
