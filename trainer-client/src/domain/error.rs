//! Error taxonomy for schedule mutations.
//!
//! Every error is caught at the mutation boundary and handed back to the
//! caller as a value; none of them stop the grid from rendering.

use crate::io::TransportError;

/// Marker put in front of conflict messages before they reach the trainer.
/// Must stay in sync with the `Conflict` display format below.
pub const CONFLICT_MARKER: &str = "⚠️";

/// A required create-form field is missing. Never reaches the network.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Vui lòng chọn khách hàng")]
    MissingCustomer,
    #[error("Vui lòng chọn ngày bắt đầu")]
    MissingDate,
    #[error("Vui lòng chọn ít nhất một ngày trong tuần")]
    MissingWeekday,
    #[error("Vui lòng chọn ca tập")]
    MissingSessionSlot,
    #[error("Vui lòng chọn khu vực tập")]
    MissingZone,
}

#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Overlapping slot, found locally or reported by the server
    #[error("⚠️ {0}")]
    Conflict(String),

    /// The server refused the operation for a reason other than a conflict
    #[error("{0}")]
    Rejected(String),

    #[error("Không thể kết nối máy chủ lịch tập: {0}")]
    Transport(#[from] TransportError),

    /// A mutation from this coordinator is still waiting for the server
    #[error("Thao tác trước đang được xử lý, vui lòng đợi")]
    Busy,
}

impl ScheduleError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, ScheduleError::Conflict(_))
    }

    /// True when the service rejected our credentials; the surrounding shell
    /// decides what a dead session means
    pub fn is_session_expired(&self) -> bool {
        matches!(self, ScheduleError::Transport(TransportError::Unauthorized))
    }
}
