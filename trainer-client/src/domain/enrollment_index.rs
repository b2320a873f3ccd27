//! Customer enrollment lookup.
//!
//! Two sources feed the index: the customer list that comes with the trainer
//! schedule, and an optional richer enrollment-detail list. Lookups prefer the
//! detail entry. A customer found in neither source has no window, and their
//! slots are treated as always eligible.

use crate::domain::models::{Enrollment, EnrollmentWindow};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct EnrollmentIndex {
    details: HashMap<String, Enrollment>,
    basic: HashMap<String, Enrollment>,
}

impl EnrollmentIndex {
    pub fn new(basic: Vec<Enrollment>, details: Option<Vec<Enrollment>>) -> Self {
        Self {
            details: by_customer(details.unwrap_or_default()),
            basic: by_customer(basic),
        }
    }

    /// Find the enrollment for a customer, preferring the detail source
    pub fn lookup(&self, customer_id: &str) -> Option<&Enrollment> {
        self.details
            .get(customer_id)
            .or_else(|| self.basic.get(customer_id))
    }

    /// Validity window for a customer; unbounded when the customer is unknown
    pub fn window_for(&self, customer_id: &str) -> EnrollmentWindow {
        self.lookup(customer_id)
            .map(|enrollment| enrollment.window)
            .unwrap_or_else(EnrollmentWindow::unbounded)
    }

    pub fn has_details(&self) -> bool {
        !self.details.is_empty()
    }

    pub fn len(&self) -> usize {
        self.basic
            .keys()
            .chain(self.details.keys().filter(|id| !self.basic.contains_key(*id)))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.basic.is_empty() && self.details.is_empty()
    }
}

// Later entries win, matching how a refreshed list replaces an older one.
fn by_customer(enrollments: Vec<Enrollment>) -> HashMap<String, Enrollment> {
    enrollments
        .into_iter()
        .map(|enrollment| (enrollment.customer_id.clone(), enrollment))
        .collect()
}
