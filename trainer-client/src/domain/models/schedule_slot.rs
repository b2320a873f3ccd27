//! Domain model for a recurring PT schedule slot.
use crate::domain::weekday::{WeekdayCode, WeekdaySet};

/// Lifecycle of a slot. `Cancelled` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotStatus {
    Active,
    Cancelled,
}

/// A weekly-recurring training slot for one customer.
///
/// The slot carries no validity window of its own; occurrences are bounded by
/// the customer's enrollment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleSlot {
    pub id: String,
    pub customer_id: String,
    pub trainer_id: Option<String>,
    pub weekdays: WeekdaySet,
    pub session_slot_id: String,
    pub zone_id: String,
    pub status: SlotStatus,
}

impl ScheduleSlot {
    pub fn is_active(&self) -> bool {
        self.status == SlotStatus::Active
    }

    pub fn occurs_on(&self, weekday: WeekdayCode) -> bool {
        self.weekdays.contains(weekday)
    }
}
