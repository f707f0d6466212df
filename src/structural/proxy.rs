//! Proxy: same interface as the real subject, with an access check before
//! forwarding and an access log after.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, Utc};

pub trait Subject {
    fn request(&self) -> String;
}

pub struct RealSubject;

impl Subject for RealSubject {
    fn request(&self) -> String {
        "RealSubject: Handling request.".to_string()
    }
}

pub struct Proxy {
    real_subject: Rc<RealSubject>,
    access_log: RefCell<Vec<DateTime<Utc>>>,
}

impl Proxy {
    pub fn new(real_subject: Rc<RealSubject>) -> Self {
        Self {
            real_subject,
            access_log: RefCell::new(Vec::new()),
        }
    }

    fn check_access(&self) -> bool {
        tracing::info!("proxy: checking access prior to firing a real request");
        true
    }

    fn log_access(&self) {
        let now = Utc::now();
        tracing::info!(at = %now, "proxy: logging the time of request");
        self.access_log.borrow_mut().push(now);
    }

    /// Times of every forwarded request, oldest first.
    pub fn access_log(&self) -> Vec<DateTime<Utc>> {
        self.access_log.borrow().clone()
    }
}

impl Subject for Proxy {
    /// Forwards when access is granted; a refusal yields an empty answer.
    fn request(&self) -> String {
        if !self.check_access() {
            return String::new();
        }
        let response = self.real_subject.request();
        self.log_access();
        response
    }
}
