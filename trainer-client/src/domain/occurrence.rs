//! Expansion of recurring slots into calendar occurrences.
//!
//! Nothing is materialized: for each grid cell the resolver filters the full
//! slot list again. Every call reads only the immutable [`ScheduleSnapshot`]
//! it was built from, so cells can be resolved in any order, or in parallel,
//! with identical results.

use crate::domain::calendar::{CalendarDay, CalendarGrid};
use crate::domain::enrollment_index::EnrollmentIndex;
use crate::domain::models::{ScheduleSlot, SessionSlot, Zone};
use crate::domain::weekday::WeekdaySet;
use chrono::NaiveDate;

/// Everything fetched for one trainer home view, frozen for rendering.
///
/// A refetch builds a new snapshot and replaces the old one wholesale.
#[derive(Debug, Clone, Default)]
pub struct ScheduleSnapshot {
    pub slots: Vec<ScheduleSlot>,
    pub session_slots: Vec<SessionSlot>,
    pub zones: Vec<Zone>,
    pub enrollments: EnrollmentIndex,
}

/// A concrete (day, slot) pairing, computed on demand and never stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurrence<'a> {
    pub date: NaiveDate,
    pub slot: &'a ScheduleSlot,
}

/// Display fields for one occurrence, with ids standing in for missing references
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccurrenceLabel {
    pub slot_id: String,
    pub customer_id: String,
    pub customer_name: String,
    pub service_name: Option<String>,
    pub session_slot_name: String,
    pub zone_name: String,
    pub weekdays: WeekdaySet,
}

/// One grid cell and the sessions that fall on it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleCell {
    pub day: CalendarDay,
    pub entries: Vec<OccurrenceLabel>,
}

/// The month grid with per-cell occurrence lists, ready for a view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthSchedule {
    pub year: i32,
    pub month: u32,
    pub cells: Vec<ScheduleCell>,
}

impl MonthSchedule {
    pub fn weeks(&self) -> impl Iterator<Item = &[ScheduleCell]> {
        self.cells.chunks(7)
    }

    pub fn total_occurrences(&self) -> usize {
        self.cells.iter().map(|cell| cell.entries.len()).sum()
    }
}

/// Decides which slots occur on a given calendar day
#[derive(Debug, Clone, Copy)]
pub struct OccurrenceResolver<'a> {
    slots: &'a [ScheduleSlot],
    enrollments: &'a EnrollmentIndex,
}

impl<'a> OccurrenceResolver<'a> {
    pub fn new(slots: &'a [ScheduleSlot], enrollments: &'a EnrollmentIndex) -> Self {
        Self { slots, enrollments }
    }

    /// Active slots that recur on `day`.
    ///
    /// A slot qualifies when it is active, its weekday set contains the day's
    /// weekday, and the day lies inside the customer's enrollment window. A
    /// customer without enrollment data does not exclude the slot.
    pub fn for_day(&self, day: &CalendarDay) -> Vec<&'a ScheduleSlot> {
        self.slots
            .iter()
            .filter(|slot| slot.is_active())
            .filter(|slot| slot.occurs_on(day.weekday))
            .filter(|slot| self.enrollments.window_for(&slot.customer_id).contains(day.date))
            .collect()
    }

    pub fn occurrences(&self, day: &CalendarDay) -> Vec<Occurrence<'a>> {
        self.for_day(day)
            .into_iter()
            .map(|slot| Occurrence {
                date: day.date,
                slot,
            })
            .collect()
    }
}

impl ScheduleSnapshot {
    pub fn resolver(&self) -> OccurrenceResolver<'_> {
        OccurrenceResolver::new(&self.slots, &self.enrollments)
    }

    pub fn slot(&self, slot_id: &str) -> Option<&ScheduleSlot> {
        self.slots.iter().find(|slot| slot.id == slot_id)
    }

    pub fn active_slots(&self) -> impl Iterator<Item = &ScheduleSlot> {
        self.slots.iter().filter(|slot| slot.is_active())
    }

    pub fn session_slot(&self, id: &str) -> Option<&SessionSlot> {
        self.session_slots.iter().find(|session| session.id == id)
    }

    pub fn zone(&self, id: &str) -> Option<&Zone> {
        self.zones.iter().find(|zone| zone.id == id)
    }

    /// A copy of this snapshot without the given slot; other slots are untouched
    pub fn without_slot(&self, slot_id: &str) -> ScheduleSnapshot {
        ScheduleSnapshot {
            slots: self
                .slots
                .iter()
                .filter(|slot| slot.id != slot_id)
                .cloned()
                .collect(),
            ..self.clone()
        }
    }

    pub fn label(&self, slot: &ScheduleSlot) -> OccurrenceLabel {
        let enrollment = self.enrollments.lookup(&slot.customer_id);

        OccurrenceLabel {
            slot_id: slot.id.clone(),
            customer_id: slot.customer_id.clone(),
            customer_name: enrollment
                .map(|e| e.customer_name.clone())
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| slot.customer_id.clone()),
            service_name: enrollment.and_then(|e| e.service_name.clone()),
            session_slot_name: self
                .session_slot(&slot.session_slot_id)
                .map(|session| session.name.clone())
                .unwrap_or_else(|| slot.session_slot_id.clone()),
            zone_name: self
                .zone(&slot.zone_id)
                .map(|zone| zone.name.clone())
                .unwrap_or_else(|| slot.zone_id.clone()),
            weekdays: slot.weekdays,
        }
    }

    /// Resolve every cell of `grid` against this snapshot
    pub fn month_schedule(&self, grid: &CalendarGrid) -> MonthSchedule {
        let resolver = self.resolver();
        let cells = grid
            .days
            .iter()
            .map(|day| ScheduleCell {
                day: day.clone(),
                entries: resolver
                    .for_day(day)
                    .into_iter()
                    .map(|slot| self.label(slot))
                    .collect(),
            })
            .collect();

        MonthSchedule {
            year: grid.year,
            month: grid.month,
            cells,
        }
    }
}
