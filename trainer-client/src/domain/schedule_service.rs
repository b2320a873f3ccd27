//! Schedule service: the trainer's PT schedule and its mutations.
//!
//! This service owns the view session's [`ScheduleSnapshot`] and is the only
//! place the slot list changes. It coordinates create and cancel against the
//! scheduling service and reconciles local state afterwards.
//!
//! ## Business Rules
//!
//! - Create is validated locally and prechecked for conflicts before any
//!   request is sent; a locally provable conflict never reaches the server
//! - A successful create triggers a full refetch; nothing is inserted
//!   optimistically because the server computes fields the client cannot
//! - A cancel needs a confirmed prompt, and the slot leaves local state only
//!   after the server confirms
//! - A failed mutation leaves local state unchanged; nothing is retried
//! - One mutation at a time per service; a second submit while one is in
//!   flight is refused with [`ScheduleError::Busy`]
//! - A refetch never installs data older than what is already shown, and
//!   never brings back a slot cancelled after the refetch started

use log::{debug, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::calendar::CalendarGrid;
use crate::domain::commands::{CancelPrompt, ConfirmedCancel, CreateScheduleInput, MutationOutcome};
use crate::domain::conflict::ConflictDetector;
use crate::domain::enrollment_index::EnrollmentIndex;
use crate::domain::error::ScheduleError;
use crate::domain::occurrence::{MonthSchedule, ScheduleSnapshot};
use crate::domain::weekday::WeekdaySet;
use crate::io::mappers::{EnrollmentMapper, ScheduleMapper};
use crate::io::ScheduleGateway;

const CREATED_MESSAGE: &str = "Tạo lịch tập thành công";
const CREATE_FAILED_MESSAGE: &str = "Không thể tạo lịch tập";
const CANCELLED_MESSAGE: &str = "Đã hủy lịch tập";
const CANCEL_FAILED_MESSAGE: &str = "Không thể hủy lịch tập";

/// The installed snapshot plus the bookkeeping that orders refetches
/// against cancellations.
///
/// `epoch` advances when a refetch starts and when a cancel is confirmed.
#[derive(Default)]
struct SnapshotState {
    snapshot: Arc<ScheduleSnapshot>,
    epoch: u64,
    /// Epoch at which the installed data started fetching
    fetched_at: u64,
    /// Confirmed cancels that a refetch started earlier may not reflect yet
    recent_cancels: Vec<(u64, String)>,
}

impl SnapshotState {
    fn begin_fetch(&mut self) -> u64 {
        self.epoch += 1;
        self.epoch
    }

    /// Install a snapshot whose fetch started at `started`
    fn install(&mut self, started: u64, mut snapshot: ScheduleSnapshot) -> Arc<ScheduleSnapshot> {
        if started < self.fetched_at {
            debug!("Discarding refetch from epoch {}, newer data already shown", started);
            return Arc::clone(&self.snapshot);
        }

        let cancelled_since: Vec<&str> = self
            .recent_cancels
            .iter()
            .filter(|(at, _)| *at > started)
            .map(|(_, id)| id.as_str())
            .collect();
        snapshot.slots.retain(|slot| !cancelled_since.contains(&slot.id.as_str()));

        self.recent_cancels.retain(|(at, _)| *at > started);
        self.fetched_at = started;
        self.snapshot = Arc::new(snapshot);
        Arc::clone(&self.snapshot)
    }

    fn remove_cancelled(&mut self, slot_id: &str) {
        self.epoch += 1;
        self.recent_cancels.push((self.epoch, slot_id.to_string()));
        self.snapshot = Arc::new(self.snapshot.without_slot(slot_id));
    }
}

/// Service for viewing and changing the trainer's recurring PT schedule
pub struct ScheduleService<G: ScheduleGateway> {
    gateway: Arc<G>,
    /// Replaced wholesale on every change, never patched in place
    state: Arc<Mutex<SnapshotState>>,
    submitting: Arc<AtomicBool>,
    conflict_detector: ConflictDetector,
}

impl<G: ScheduleGateway> Clone for ScheduleService<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            state: Arc::clone(&self.state),
            submitting: Arc::clone(&self.submitting),
            conflict_detector: self.conflict_detector,
        }
    }
}

/// Clears the in-flight flag when the mutation finishes, however it ends
struct SubmitGuard {
    submitting: Arc<AtomicBool>,
}

impl Drop for SubmitGuard {
    fn drop(&mut self) {
        self.submitting.store(false, Ordering::SeqCst);
    }
}

impl<G: ScheduleGateway> ScheduleService<G> {
    /// Create a service with an empty snapshot; call [`Self::refresh`] to load
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            state: Arc::new(Mutex::new(SnapshotState::default())),
            submitting: Arc::new(AtomicBool::new(false)),
            conflict_detector: ConflictDetector::new(),
        }
    }

    /// The current snapshot; stays valid even if the service moves on
    pub fn snapshot(&self) -> Arc<ScheduleSnapshot> {
        Arc::clone(&self.lock_state().snapshot)
    }

    fn lock_state(&self) -> MutexGuard<'_, SnapshotState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Whether a create or cancel is waiting for the server; the view
    /// disables its submit controls while this is true
    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::SeqCst)
    }

    fn begin_submit(&self) -> Result<SubmitGuard, ScheduleError> {
        if self.submitting.swap(true, Ordering::SeqCst) {
            warn!("Rejecting schedule mutation while another is in flight");
            return Err(ScheduleError::Busy);
        }
        Ok(SubmitGuard {
            submitting: Arc::clone(&self.submitting),
        })
    }

    /// Fetch slots, reference lists and enrollments and swap in a new snapshot.
    ///
    /// The enrollment-detail source is optional: if it fails the basic
    /// customer list is used on its own.
    pub async fn refresh(&self) -> Result<Arc<ScheduleSnapshot>, ScheduleError> {
        let started = self.lock_state().begin_fetch();
        info!("Refreshing trainer schedule");
        let schedule = self.gateway.fetch_trainer_schedule().await?;

        let details = match self.gateway.fetch_enrollment_details().await {
            Ok(details) => Some(EnrollmentMapper::to_domain_list(details)),
            Err(e) => {
                warn!("Enrollment details unavailable, using basic customer list: {}", e);
                None
            }
        };

        let snapshot = ScheduleSnapshot {
            slots: schedule
                .slots
                .into_iter()
                .map(ScheduleMapper::to_domain)
                .collect(),
            session_slots: schedule.session_slots,
            zones: schedule.zones,
            enrollments: EnrollmentIndex::new(
                EnrollmentMapper::to_domain_list(schedule.customers),
                details,
            ),
        };

        info!(
            "Loaded {} slots ({} active) for {} customers",
            snapshot.slots.len(),
            snapshot.active_slots().count(),
            snapshot.enrollments.len()
        );

        Ok(self.lock_state().install(started, snapshot))
    }

    /// The month grid with each cell's occurrences, from the current snapshot
    pub fn month_schedule(&self, grid: &CalendarGrid) -> MonthSchedule {
        self.snapshot().month_schedule(grid)
    }

    /// Advisory conflict warning for the create form
    pub async fn conflict_warning(&self, weekdays: WeekdaySet, session_slot_id: Option<&str>) -> bool {
        self.conflict_detector
            .remote_check(self.gateway.as_ref(), weekdays, session_slot_id)
            .await
    }

    /// Create a recurring slot
    pub async fn create_schedule(&self, input: CreateScheduleInput) -> Result<MutationOutcome, ScheduleError> {
        let command = input.validate()?;

        let snapshot = self.snapshot();
        let candidate = command.conflict_candidate();
        if let Some(existing) = self.conflict_detector.find_conflict(&snapshot.slots, &candidate) {
            let message = self.conflict_detector.local_conflict_message(existing, &candidate);
            warn!(
                "Create blocked locally: customer {} already has {} on {}",
                command.customer_id, command.session_slot_id, existing.weekdays
            );
            return Err(ScheduleError::Conflict(message));
        }

        let _guard = self.begin_submit()?;
        let request = ScheduleMapper::to_create_request(&command);
        info!("Creating schedule: {:?}", request);

        let response = self.gateway.create_schedule(&request).await.map_err(|e| {
            warn!("Create request failed: {}", e);
            ScheduleError::from(e)
        })?;

        if !response.success {
            let message = response
                .message
                .unwrap_or_else(|| CREATE_FAILED_MESSAGE.to_string());
            warn!("Server refused schedule creation: {}", message);
            return Err(self.conflict_detector.classify_failure(&message));
        }

        info!("Schedule created: {:?}", response.id);

        // The slot exists on the server now; a failed refetch only leaves the
        // grid stale until the next refresh.
        if let Err(e) = self.refresh().await {
            warn!("Schedule created but refresh failed: {}", e);
        }

        Ok(MutationOutcome {
            slot_id: response.id,
            success_message: response
                .message
                .unwrap_or_else(|| CREATED_MESSAGE.to_string()),
        })
    }

    /// Prompt for cancelling an active slot, or `None` if there is no such slot
    pub fn cancel_prompt(&self, slot_id: &str) -> Option<CancelPrompt> {
        let snapshot = self.snapshot();
        let slot = snapshot.slot(slot_id).filter(|slot| slot.is_active())?;
        Some(CancelPrompt::new(snapshot.label(slot)))
    }

    /// Cancel a slot the trainer confirmed
    pub async fn cancel_schedule(&self, confirmed: ConfirmedCancel) -> Result<MutationOutcome, ScheduleError> {
        let _guard = self.begin_submit()?;
        let slot_id = confirmed.slot_id();
        info!("Cancelling schedule: {}", slot_id);

        let response = self.gateway.cancel_schedule(slot_id).await.map_err(|e| {
            warn!("Cancel request failed for {}: {}", slot_id, e);
            ScheduleError::from(e)
        })?;

        if !response.success {
            let message = response
                .message
                .unwrap_or_else(|| CANCEL_FAILED_MESSAGE.to_string());
            warn!("Server refused cancelling {}: {}", slot_id, message);
            return Err(ScheduleError::Rejected(message));
        }

        self.lock_state().remove_cancelled(slot_id);
        info!("Schedule {} cancelled", slot_id);

        Ok(MutationOutcome {
            slot_id: Some(slot_id.to_string()),
            success_message: response
                .message
                .unwrap_or_else(|| CANCELLED_MESSAGE.to_string()),
        })
    }
}
