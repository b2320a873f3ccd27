//! Test utilities shared by the domain tests
//!
//! `FakeGateway` stands in for the scheduling service: every response is
//! scripted up front and every call is counted, so tests can assert both on
//! results and on which requests were (or were not) sent.

use async_trait::async_trait;
use shared::{
    CancelScheduleResponse, ConflictCheckResponse, CreateScheduleRequest, CreateScheduleResponse,
    CustomerEnrollment, ScheduleSlot, SessionSlot, TrainerScheduleResponse, Zone,
};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use crate::io::{ScheduleGateway, TransportError};

/// How many times each gateway operation was called
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GatewayCalls {
    pub schedule_fetches: usize,
    pub detail_fetches: usize,
    pub conflict_checks: usize,
    pub creates: usize,
    pub cancels: usize,
}

struct FakeState {
    schedule: Result<TrainerScheduleResponse, TransportError>,
    details: Result<Vec<CustomerEnrollment>, TransportError>,
    conflict: Result<bool, TransportError>,
    create: Result<CreateScheduleResponse, TransportError>,
    cancel: Result<CancelScheduleResponse, TransportError>,
    calls: GatewayCalls,
    last_conflict_query: Option<(String, String)>,
    created_requests: Vec<CreateScheduleRequest>,
    cancelled_ids: Vec<String>,
    create_gate: Option<Arc<Notify>>,
    schedule_gate: Option<Arc<Notify>>,
}

/// In-memory [`ScheduleGateway`] with scripted responses
pub struct FakeGateway {
    state: Mutex<FakeState>,
}

impl FakeGateway {
    /// Empty schedule, no details, no conflicts, and mutations that succeed
    pub fn new() -> Self {
        Self {
            state: Mutex::new(FakeState {
                schedule: Ok(TrainerScheduleResponse::default()),
                details: Ok(Vec::new()),
                conflict: Ok(false),
                create: Ok(CreateScheduleResponse {
                    success: true,
                    message: None,
                    id: None,
                }),
                cancel: Ok(CancelScheduleResponse {
                    success: true,
                    message: None,
                }),
                calls: GatewayCalls::default(),
                last_conflict_query: None,
                created_requests: Vec::new(),
                cancelled_ids: Vec::new(),
                create_gate: None,
                schedule_gate: None,
            }),
        }
    }

    pub fn set_schedule(&self, response: TrainerScheduleResponse) {
        self.state.lock().unwrap().schedule = Ok(response);
    }

    pub fn fail_schedule(&self, error: TransportError) {
        self.state.lock().unwrap().schedule = Err(error);
    }

    pub fn set_details(&self, details: Result<Vec<CustomerEnrollment>, TransportError>) {
        self.state.lock().unwrap().details = details;
    }

    pub fn set_conflict(&self, conflict: Result<bool, TransportError>) {
        self.state.lock().unwrap().conflict = conflict;
    }

    pub fn set_create(&self, response: Result<CreateScheduleResponse, TransportError>) {
        self.state.lock().unwrap().create = response;
    }

    pub fn set_cancel(&self, response: Result<CancelScheduleResponse, TransportError>) {
        self.state.lock().unwrap().cancel = response;
    }

    /// Make creates wait until the returned gate is notified
    pub fn hold_creates(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.state.lock().unwrap().create_gate = Some(Arc::clone(&gate));
        gate
    }

    /// Make schedule fetches wait until the returned gate is notified; the
    /// response is read after the wait
    pub fn hold_schedule_fetches(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.state.lock().unwrap().schedule_gate = Some(Arc::clone(&gate));
        gate
    }

    pub fn calls(&self) -> GatewayCalls {
        self.state.lock().unwrap().calls.clone()
    }

    /// `(weekdays, session_slot_id)` of the most recent conflict query
    pub fn last_conflict_query(&self) -> Option<(String, String)> {
        self.state.lock().unwrap().last_conflict_query.clone()
    }

    pub fn created_requests(&self) -> Vec<CreateScheduleRequest> {
        self.state.lock().unwrap().created_requests.clone()
    }

    pub fn cancelled_ids(&self) -> Vec<String> {
        self.state.lock().unwrap().cancelled_ids.clone()
    }
}

#[async_trait]
impl ScheduleGateway for FakeGateway {
    async fn fetch_trainer_schedule(&self) -> Result<TrainerScheduleResponse, TransportError> {
        let gate = {
            let mut state = self.state.lock().unwrap();
            state.calls.schedule_fetches += 1;
            state.schedule_gate.clone()
        };
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.state.lock().unwrap().schedule.clone()
    }

    async fn fetch_enrollment_details(&self) -> Result<Vec<CustomerEnrollment>, TransportError> {
        let mut state = self.state.lock().unwrap();
        state.calls.detail_fetches += 1;
        state.details.clone()
    }

    async fn check_conflict(
        &self,
        weekdays: &str,
        session_slot_id: &str,
    ) -> Result<ConflictCheckResponse, TransportError> {
        let mut state = self.state.lock().unwrap();
        state.calls.conflict_checks += 1;
        state.last_conflict_query = Some((weekdays.to_string(), session_slot_id.to_string()));
        state
            .conflict
            .clone()
            .map(|has_conflict| ConflictCheckResponse { has_conflict })
    }

    async fn create_schedule(
        &self,
        request: &CreateScheduleRequest,
    ) -> Result<CreateScheduleResponse, TransportError> {
        let gate = {
            let mut state = self.state.lock().unwrap();
            state.calls.creates += 1;
            state.created_requests.push(request.clone());
            state.create_gate.clone()
        };
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.state.lock().unwrap().create.clone()
    }

    async fn cancel_schedule(&self, slot_id: &str) -> Result<CancelScheduleResponse, TransportError> {
        let mut state = self.state.lock().unwrap();
        state.calls.cancels += 1;
        state.cancelled_ids.push(slot_id.to_string());
        state.cancel.clone()
    }
}

pub fn slot_dto(id: &str, customer_id: &str, weekdays: &str, session_slot_id: &str, status: &str) -> ScheduleSlot {
    ScheduleSlot {
        id: id.to_string(),
        customer_id: customer_id.to_string(),
        trainer_id: Some("t1".to_string()),
        weekdays: weekdays.to_string(),
        session_slot_id: session_slot_id.to_string(),
        zone_id: "z1".to_string(),
        status: status.to_string(),
    }
}

pub fn enrollment_dto(customer_id: &str, name: &str, start: &str, end: &str) -> CustomerEnrollment {
    CustomerEnrollment {
        customer_id: customer_id.to_string(),
        name: name.to_string(),
        service_name: Some("PT 1 kèm 1".to_string()),
        start_date: Some(start.to_string()),
        end_date: Some(end.to_string()),
        payment_status: Some("Đã thanh toán".to_string()),
    }
}

/// Trainer schedule with two customers (no enrollment dates), two session
/// slots and one zone around the given slots
pub fn trainer_schedule(slots: Vec<ScheduleSlot>) -> TrainerScheduleResponse {
    let customer = |id: &str, name: &str| CustomerEnrollment {
        customer_id: id.to_string(),
        name: name.to_string(),
        service_name: None,
        start_date: None,
        end_date: None,
        payment_status: None,
    };

    TrainerScheduleResponse {
        slots,
        session_slots: vec![
            SessionSlot {
                id: "ca1".to_string(),
                name: "Ca sáng".to_string(),
                description: Some("06:00 - 07:30".to_string()),
            },
            SessionSlot {
                id: "ca2".to_string(),
                name: "Ca chiều".to_string(),
                description: None,
            },
        ],
        zones: vec![Zone {
            id: "z1".to_string(),
            name: "Khu tạ".to_string(),
        }],
        customers: vec![customer("c1", "Nguyễn Lan"), customer("c2", "Phạm Huy")],
    }
}
