//! Observer: a subject broadcasts its message to attached observers in
//! attachment order.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::error::{PatternError, Result};

pub trait Observer {
    fn update(&self, message: &str);
}

pub struct Subject {
    observers: RefCell<Vec<Rc<dyn Observer>>>,
    message: RefCell<String>,
    issued_numbers: Cell<usize>,
}

impl Subject {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            observers: RefCell::new(Vec::new()),
            message: RefCell::new(String::new()),
            issued_numbers: Cell::new(0),
        })
    }

    pub fn attach(&self, observer: Rc<dyn Observer>) {
        self.observers.borrow_mut().push(observer);
        tracing::debug!(count = self.observer_count(), "observer attached");
    }

    /// Removes `observer` by identity. Returns whether it was attached.
    pub fn detach(&self, observer: &Rc<dyn Observer>) -> bool {
        let mut observers = self.observers.borrow_mut();
        let before = observers.len();
        observers.retain(|o| !same_observer(o, observer));
        before != observers.len()
    }

    /// Calls `update` on every observer attached when the pass starts.
    /// Detaching from inside `update` takes effect on the next pass.
    pub fn notify(&self) {
        let observers = self.observers.borrow().clone();
        let message = self.message.borrow().clone();
        tracing::debug!(count = observers.len(), "notifying observers");
        for observer in observers {
            observer.update(&message);
        }
    }

    pub fn create_message(&self, message: impl Into<String>) {
        *self.message.borrow_mut() = message.into();
        self.notify();
    }

    pub fn some_business_logic(&self) {
        self.create_message("change message message");
    }

    pub fn observer_count(&self) -> usize {
        self.observers.borrow().len()
    }

    pub fn message(&self) -> String {
        self.message.borrow().clone()
    }

    fn issue_number(&self) -> usize {
        let next = self.issued_numbers.get() + 1;
        self.issued_numbers.set(next);
        next
    }
}

fn same_observer(a: &Rc<dyn Observer>, b: &Rc<dyn Observer>) -> bool {
    std::ptr::eq(
        Rc::as_ptr(a) as *const (),
        Rc::as_ptr(b) as *const (),
    )
}

// =============================================================================
// Concrete observer with a back-reference to its subject
// =============================================================================

pub struct MessageObserver {
    number: usize,
    subject: Weak<Subject>,
    last_message: RefCell<Option<String>>,
}

impl MessageObserver {
    pub fn new(subject: &Rc<Subject>) -> Rc<Self> {
        Rc::new(Self {
            number: subject.issue_number(),
            subject: Rc::downgrade(subject),
            last_message: RefCell::new(None),
        })
    }

    pub fn number(&self) -> usize {
        self.number
    }

    pub fn last_message(&self) -> Option<String> {
        self.last_message.borrow().clone()
    }

    fn subject(&self) -> Result<Rc<Subject>> {
        self.subject
            .upgrade()
            .ok_or_else(|| PatternError::dangling("observer", "subject"))
    }

    pub fn attach_to_subject(self: &Rc<Self>) -> Result<()> {
        self.subject()?.attach(self.clone());
        Ok(())
    }

    pub fn remove_me_from_the_list(self: &Rc<Self>) -> Result<bool> {
        let me: Rc<dyn Observer> = self.clone();
        let removed = self.subject()?.detach(&me);
        tracing::debug!(number = self.number, removed, "observer left the list");
        Ok(removed)
    }
}

impl Observer for MessageObserver {
    fn update(&self, message: &str) {
        *self.last_message.borrow_mut() = Some(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Appends its label to a shared journal on every update.
    struct Recorder {
        label: &'static str,
        journal: Rc<RefCell<Vec<String>>>,
    }

    impl Observer for Recorder {
        fn update(&self, message: &str) {
            self.journal
                .borrow_mut()
                .push(format!("{}:{}", self.label, message));
        }
    }

    fn recorder(label: &'static str, journal: &Rc<RefCell<Vec<String>>>) -> Rc<dyn Observer> {
        Rc::new(Recorder {
            label,
            journal: journal.clone(),
        })
    }

    #[test]
    fn test_notify_in_attachment_order() {
        let subject = Subject::new();
        let journal = Rc::new(RefCell::new(Vec::new()));
        let a = recorder("a", &journal);
        let b = recorder("b", &journal);
        let c = recorder("c", &journal);
        subject.attach(a.clone());
        subject.attach(b.clone());
        subject.attach(c.clone());

        subject.create_message("hi");
        assert_eq!(*journal.borrow(), vec!["a:hi", "b:hi", "c:hi"]);

        journal.borrow_mut().clear();
        assert!(subject.detach(&b));
        subject.create_message("again");
        assert_eq!(*journal.borrow(), vec!["a:again", "c:again"]);
    }

    #[test]
    fn test_detach_unknown_observer() {
        let subject = Subject::new();
        let journal = Rc::new(RefCell::new(Vec::new()));
        let stranger = recorder("x", &journal);
        assert!(!subject.detach(&stranger));
    }

    #[test]
    fn test_message_observers_self_detach() {
        let subject = Subject::new();
        let first = MessageObserver::new(&subject);
        let second = MessageObserver::new(&subject);
        let third = MessageObserver::new(&subject);
        for observer in [&first, &second, &third] {
            observer.attach_to_subject().unwrap();
        }
        assert_eq!(
            (first.number(), second.number(), third.number()),
            (1, 2, 3)
        );

        assert!(first.remove_me_from_the_list().unwrap());
        subject.create_message("Hello there!");
        assert_eq!(first.last_message(), None);
        assert_eq!(second.last_message().as_deref(), Some("Hello there!"));

        second.remove_me_from_the_list().unwrap();
        subject.some_business_logic();
        assert_eq!(subject.observer_count(), 1);
        assert_eq!(second.last_message().as_deref(), Some("Hello there!"));
        assert_eq!(third.last_message().as_deref(), Some("change message message"));
    }

    #[test]
    fn test_observer_reports_dropped_subject() {
        let subject = Subject::new();
        let observer = MessageObserver::new(&subject);
        drop(subject);
        assert!(matches!(
            observer.attach_to_subject(),
            Err(PatternError::DanglingReference { .. })
        ));
    }

    /// Detaches itself while being notified.
    struct OneShot {
        subject: Weak<Subject>,
        me: RefCell<Weak<OneShot>>,
        hits: Cell<usize>,
    }

    impl Observer for OneShot {
        fn update(&self, _message: &str) {
            self.hits.set(self.hits.get() + 1);
            let me = self.me.borrow().upgrade();
            if let (Some(subject), Some(me)) = (self.subject.upgrade(), me) {
                let me: Rc<dyn Observer> = me;
                subject.detach(&me);
            }
        }
    }

    #[test]
    fn test_detach_during_notify_applies_next_pass() {
        let subject = Subject::new();
        let journal = Rc::new(RefCell::new(Vec::new()));
        let one_shot = Rc::new(OneShot {
            subject: Rc::downgrade(&subject),
            me: RefCell::new(Weak::new()),
            hits: Cell::new(0),
        });
        *one_shot.me.borrow_mut() = Rc::downgrade(&one_shot);
        subject.attach(one_shot.clone());
        subject.attach(recorder("tail", &journal));

        subject.create_message("one");
        subject.create_message("two");

        assert_eq!(one_shot.hits.get(), 1);
        assert_eq!(*journal.borrow(), vec!["tail:one", "tail:two"]);
    }
}
