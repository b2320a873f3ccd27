//! Domain model for a customer's PT enrollment.
use chrono::NaiveDate;

/// Inclusive range of calendar days an enrollment covers.
///
/// A missing bound leaves that side open. Dates carry no time component, so
/// containment is exact at day granularity: both the first and the last day
/// are inside the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EnrollmentWindow {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl EnrollmentWindow {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// A window with no bounds admits every day
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        let after_start = self.start.map_or(true, |start| date >= start);
        let before_end = self.end.map_or(true, |end| date <= end);
        after_start && before_end
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrollment {
    pub customer_id: String,
    pub customer_name: String,
    pub service_name: Option<String>,
    pub window: EnrollmentWindow,
    pub payment_status: Option<String>,
}
