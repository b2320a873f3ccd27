use serde::{Deserialize, Serialize};

/// A recurring PT schedule slot as returned by the scheduling service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSlot {
    pub id: String,
    /// ID of the customer this slot trains
    pub customer_id: String,
    /// Trainer owning the slot; the signed-in trainer when omitted
    #[serde(default)]
    pub trainer_id: Option<String>,
    /// Weekday token, e.g. "246" or "2CN" (2..7 = Monday..Saturday, CN = Sunday)
    #[serde(default)]
    pub weekdays: String,
    pub session_slot_id: String,
    #[serde(default)]
    pub zone_id: String,
    /// Lifecycle status as free text; any cancelled spelling marks the slot inactive
    #[serde(default)]
    pub status: String,
}

/// A bookable training session slot (reference data)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSlot {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// A training zone inside the gym (reference data)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    pub id: String,
    pub name: String,
}

/// A customer's PT enrollment, including its validity window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerEnrollment {
    pub customer_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub service_name: Option<String>,
    /// First valid day, "YYYY-MM-DD" or an RFC 3339 timestamp
    #[serde(default)]
    pub start_date: Option<String>,
    /// Last valid day (inclusive), same formats as `start_date`
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub payment_status: Option<String>,
}

/// Everything the trainer home view needs in one fetch
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainerScheduleResponse {
    #[serde(default)]
    pub slots: Vec<ScheduleSlot>,
    #[serde(default)]
    pub session_slots: Vec<SessionSlot>,
    #[serde(default)]
    pub zones: Vec<Zone>,
    #[serde(default)]
    pub customers: Vec<CustomerEnrollment>,
}

/// Response from the authoritative conflict query
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictCheckResponse {
    #[serde(default)]
    pub has_conflict: bool,
}

/// Request to create a recurring schedule slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateScheduleRequest {
    pub customer_id: String,
    /// Day the schedule starts from (YYYY-MM-DD)
    pub date: String,
    /// Canonical weekday token
    pub weekdays: String,
    pub session_slot_id: String,
    pub zone_id: String,
}

/// Response after creating a schedule slot
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateScheduleResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
}

/// Response after cancelling a schedule slot
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelScheduleResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}
