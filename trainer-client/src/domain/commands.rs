//! Domain-level command types for schedule mutations.
//!
//! The create form fills a [`CreateScheduleInput`] field by field; only a
//! validated [`CreateScheduleCommand`] is ever sent. Cancelling requires a
//! [`ConfirmedCancel`], which can only be obtained by confirming the
//! irrevocable-action prompt.

use crate::domain::conflict::ConflictCandidate;
use crate::domain::error::ValidationError;
use crate::domain::occurrence::OccurrenceLabel;
use crate::domain::weekday::WeekdaySet;
use chrono::NaiveDate;

/// Create-form state as the trainer fills it in
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateScheduleInput {
    pub customer_id: Option<String>,
    pub date: Option<NaiveDate>,
    pub weekdays: WeekdaySet,
    pub session_slot_id: Option<String>,
    pub zone_id: Option<String>,
}

impl CreateScheduleInput {
    /// Check required fields in form order, reporting the first one missing
    pub fn validate(&self) -> Result<CreateScheduleCommand, ValidationError> {
        let customer_id = required(&self.customer_id, ValidationError::MissingCustomer)?;
        let date = self.date.ok_or(ValidationError::MissingDate)?;
        if self.weekdays.is_empty() {
            return Err(ValidationError::MissingWeekday);
        }
        let session_slot_id = required(&self.session_slot_id, ValidationError::MissingSessionSlot)?;
        let zone_id = required(&self.zone_id, ValidationError::MissingZone)?;

        Ok(CreateScheduleCommand {
            customer_id,
            date,
            weekdays: self.weekdays,
            session_slot_id,
            zone_id,
        })
    }
}

fn required(value: &Option<String>, missing: ValidationError) -> Result<String, ValidationError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or(missing)
}

/// A create request with every required field present
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateScheduleCommand {
    pub customer_id: String,
    /// Day the recurring schedule starts from
    pub date: NaiveDate,
    pub weekdays: WeekdaySet,
    pub session_slot_id: String,
    pub zone_id: String,
}

impl CreateScheduleCommand {
    pub fn conflict_candidate(&self) -> ConflictCandidate<'_> {
        ConflictCandidate {
            customer_id: &self.customer_id,
            session_slot_id: &self.session_slot_id,
            weekdays: self.weekdays,
        }
    }
}

/// Warning shown before a slot is cancelled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelPrompt {
    pub label: OccurrenceLabel,
    pub warning: String,
}

impl CancelPrompt {
    pub fn new(label: OccurrenceLabel) -> Self {
        let warning = format!(
            "Hủy lịch tập của {} ({}, {})? Thao tác này không thể hoàn tác.",
            label.customer_name,
            label.weekdays.labels(),
            label.session_slot_name
        );
        Self { label, warning }
    }

    pub fn slot_id(&self) -> &str {
        &self.label.slot_id
    }

    /// The trainer accepted the warning
    pub fn confirm(self) -> ConfirmedCancel {
        ConfirmedCancel {
            slot_id: self.label.slot_id,
        }
    }
}

/// Proof that the trainer confirmed cancelling a slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmedCancel {
    slot_id: String,
}

impl ConfirmedCancel {
    pub fn slot_id(&self) -> &str {
        &self.slot_id
    }
}

/// Successful mutation, for the view to display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationOutcome {
    pub slot_id: Option<String>,
    pub success_message: String,
}
