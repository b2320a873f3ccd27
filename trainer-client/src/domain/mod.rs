//! # Domain Module
//!
//! Business logic for the trainer's recurring PT schedule.
//!
//! This module decides which slots appear on which calendar days, when a new
//! slot would collide with an existing one, and how create and cancel are
//! coordinated with the scheduling service. It depends on the service only
//! through [`crate::io::ScheduleGateway`].
//!
//! ## Module Organization
//!
//! - **weekday**: Weekday codes and the compact weekday-set token ("246", "2CN")
//! - **calendar**: The 42-cell Monday-first month grid and month navigation
//! - **enrollment_index**: Per-customer enrollment windows from two sources
//! - **occurrence**: Which active slots fall on each grid day
//! - **conflict**: Local precheck and server conflict classification
//! - **commands**: Create-form input, cancel confirmation, mutation results
//! - **schedule_service**: Owns the schedule snapshot and runs create/cancel
//!
//! ## Core Concepts
//!
//! - **Schedule Slot**: A recurring booking of one customer into one session
//!   slot on a set of weekdays
//! - **Occurrence**: A slot landing on a concrete date, which requires the
//!   weekday to match and the date to be inside the customer's enrollment
//! - **Snapshot**: Slots, reference lists and enrollments as last loaded;
//!   replaced as a whole, never edited in place
//!
//! ## Business Rules
//!
//! - Cancelled slots never produce occurrences and never conflict
//! - Enrollment windows are inclusive on both ends; a missing bound is open
//! - A customer without any enrollment record is always eligible
//! - Conflict is same customer, same session slot, overlapping weekdays

pub mod calendar;
pub mod commands;
pub mod conflict;
pub mod enrollment_index;
pub mod error;
pub mod models;
pub mod occurrence;
pub mod schedule_service;
pub mod weekday;

pub use calendar::{CalendarDay, CalendarGrid, CalendarService};
pub use commands::{CancelPrompt, ConfirmedCancel, CreateScheduleInput, MutationOutcome};
pub use conflict::ConflictDetector;
pub use enrollment_index::EnrollmentIndex;
pub use error::{ScheduleError, ValidationError};
pub use occurrence::{MonthSchedule, OccurrenceLabel, OccurrenceResolver, ScheduleSnapshot};
pub use schedule_service::ScheduleService;
pub use weekday::{WeekdayCode, WeekdaySet};
