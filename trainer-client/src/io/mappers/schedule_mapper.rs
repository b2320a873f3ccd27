//! Mappers for converting between schedule slot domain models and shared DTOs.

use crate::domain::commands::CreateScheduleCommand;
use crate::domain::models::{ScheduleSlot as DomainScheduleSlot, SlotStatus};
use crate::domain::weekday::WeekdaySet;
use shared::{CreateScheduleRequest, ScheduleSlot as SharedScheduleSlot};

/// Status spellings the service uses for a cancelled slot
const CANCELLED_STATUSES: [&str; 7] = [
    "cancelled",
    "canceled",
    "inactive",
    "đã hủy",
    "đã huỷ",
    "hủy",
    "huỷ",
];

pub struct ScheduleMapper;

impl ScheduleMapper {
    pub fn to_domain(dto: SharedScheduleSlot) -> DomainScheduleSlot {
        DomainScheduleSlot {
            status: Self::status_from_wire(&dto.status),
            weekdays: WeekdaySet::decode(&dto.weekdays),
            id: dto.id,
            customer_id: dto.customer_id,
            trainer_id: dto.trainer_id,
            session_slot_id: dto.session_slot_id,
            zone_id: dto.zone_id,
        }
    }

    pub fn to_create_request(command: &CreateScheduleCommand) -> CreateScheduleRequest {
        CreateScheduleRequest {
            customer_id: command.customer_id.clone(),
            date: command.date.format("%Y-%m-%d").to_string(),
            weekdays: command.weekdays.encode(),
            session_slot_id: command.session_slot_id.clone(),
            zone_id: command.zone_id.clone(),
        }
    }

    /// Any cancelled spelling maps to `Cancelled`; everything else is live
    pub fn status_from_wire(status: &str) -> SlotStatus {
        let normalized = status.trim().to_lowercase();
        if CANCELLED_STATUSES.contains(&normalized.as_str()) {
            SlotStatus::Cancelled
        } else {
            SlotStatus::Active
        }
    }
}
