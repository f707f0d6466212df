//! Iterator: sequential, restartable traversal over a container the cursor
//! does not own.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::error::{PatternError, Result};

pub struct Container<T> {
    items: RefCell<Vec<T>>,
}

impl<T> Container<T> {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            items: RefCell::new(Vec::new()),
        })
    }

    pub fn add(&self, item: T) {
        self.items.borrow_mut().push(item);
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    /// The cursor only observes the container; it does not keep it alive.
    pub fn create_iterator(self: &Rc<Self>) -> Cursor<T> {
        Cursor {
            container: Rc::downgrade(self),
            position: 0,
        }
    }
}

pub struct Cursor<T> {
    container: Weak<Container<T>>,
    position: usize,
}

impl<T> Cursor<T> {
    pub fn first(&mut self) {
        self.position = 0;
    }

    pub fn next_item(&mut self) {
        self.position += 1;
    }

    /// A cursor whose container has been dropped is always done.
    pub fn is_done(&self) -> bool {
        match self.container.upgrade() {
            Some(container) => self.position >= container.len(),
            None => true,
        }
    }

    /// Index of the item `current` would return.
    pub fn index(&self) -> usize {
        self.position
    }
}

impl<T: Clone> Cursor<T> {
    /// `Ok(None)` past the end; an error once the container is gone.
    pub fn current(&self) -> Result<Option<T>> {
        let container = self
            .container
            .upgrade()
            .ok_or_else(|| PatternError::dangling("iterator", "container"))?;
        let items = container.items.borrow();
        Ok(items.get(self.position).cloned())
    }
}

impl<T: Clone> Iterator for Cursor<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let item = self.current().ok().flatten()?;
        self.position += 1;
        Some(item)
    }
}
