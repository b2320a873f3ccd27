//! # Scheduling Service Gateway
//!
//! The trait the domain layer talks to instead of a concrete transport, so
//! the schedule engine works the same against the REST service and against
//! in-memory fakes in tests.

use async_trait::async_trait;
use shared::{
    CancelScheduleResponse, ConflictCheckResponse, CreateScheduleRequest, CreateScheduleResponse,
    CustomerEnrollment, TrainerScheduleResponse,
};

use super::TransportError;

/// Remote operations of the external scheduling service.
///
/// A refused create or cancel comes back as `Ok` with `success: false`;
/// `Err` is reserved for failures to get an answer at all.
#[async_trait]
pub trait ScheduleGateway: Send + Sync {
    /// Slots of the signed-in trainer plus the reference lists they point at
    async fn fetch_trainer_schedule(&self) -> Result<TrainerScheduleResponse, TransportError>;

    /// Richer per-customer enrollment data
    async fn fetch_enrollment_details(&self) -> Result<Vec<CustomerEnrollment>, TransportError>;

    /// Authoritative conflict query for a weekday token and session slot
    async fn check_conflict(
        &self,
        weekdays: &str,
        session_slot_id: &str,
    ) -> Result<ConflictCheckResponse, TransportError>;

    async fn create_schedule(
        &self,
        request: &CreateScheduleRequest,
    ) -> Result<CreateScheduleResponse, TransportError>;

    async fn cancel_schedule(&self, slot_id: &str) -> Result<CancelScheduleResponse, TransportError>;
}
