//! Conflict detection for recurring schedule slots.
//!
//! Two active slots conflict when they share the customer, the session slot
//! and at least one weekday. The local precheck only sees the already-fetched
//! slot list; the server stays authoritative, both through the advisory
//! conflict query and through its own check when a slot is created.

use crate::domain::error::ScheduleError;
use crate::domain::models::ScheduleSlot;
use crate::domain::weekday::WeekdaySet;
use crate::io::ScheduleGateway;
use log::{debug, warn};

/// Substrings (lower case) that mark a server message as a scheduling conflict
pub const CONFLICT_KEYWORDS: [&str; 4] = ["trùng", "xung đột", "conflict", "đã có"];

/// The slot a trainer is about to create, reduced to its conflict key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConflictCandidate<'a> {
    pub customer_id: &'a str,
    pub session_slot_id: &'a str,
    pub weekdays: WeekdaySet,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ConflictDetector;

impl ConflictDetector {
    pub fn new() -> Self {
        Self
    }

    /// First active slot sharing the candidate's conflict key, if any
    pub fn find_conflict<'s>(
        &self,
        slots: &'s [ScheduleSlot],
        candidate: &ConflictCandidate<'_>,
    ) -> Option<&'s ScheduleSlot> {
        slots.iter().find(|slot| {
            slot.is_active()
                && slot.customer_id == candidate.customer_id
                && slot.session_slot_id == candidate.session_slot_id
                && slot.weekdays.intersects(candidate.weekdays)
        })
    }

    /// True when the local slot list already proves a conflict
    pub fn precheck(&self, slots: &[ScheduleSlot], candidate: &ConflictCandidate<'_>) -> bool {
        self.find_conflict(slots, candidate).is_some()
    }

    /// Message shown when the precheck blocks a create
    pub fn local_conflict_message(&self, existing: &ScheduleSlot, candidate: &ConflictCandidate<'_>) -> String {
        let overlap = existing.weekdays.intersection(candidate.weekdays);
        format!(
            "Lịch bị trùng: khách hàng đã có ca tập này vào {} (lịch {})",
            overlap.labels(),
            existing.id
        )
    }

    /// Ask the service whether the selection conflicts.
    ///
    /// Only asks once both a weekday and a session slot are chosen. A failed
    /// query counts as "no conflict reported": the warning is advisory and
    /// the server checks again on create.
    pub async fn remote_check<G>(
        &self,
        gateway: &G,
        weekdays: WeekdaySet,
        session_slot_id: Option<&str>,
    ) -> bool
    where
        G: ScheduleGateway + ?Sized,
    {
        let session_slot_id = match session_slot_id.map(str::trim) {
            Some(id) if !id.is_empty() && !weekdays.is_empty() => id,
            _ => return false,
        };

        match gateway.check_conflict(&weekdays.encode(), session_slot_id).await {
            Ok(response) => {
                debug!(
                    "Conflict query for {} / {}: {}",
                    weekdays, session_slot_id, response.has_conflict
                );
                response.has_conflict
            }
            Err(e) => {
                warn!("Conflict query failed, assuming no conflict: {}", e);
                false
            }
        }
    }

    /// Case-insensitive match against [`CONFLICT_KEYWORDS`]
    pub fn is_conflict_message(&self, message: &str) -> bool {
        let lowered = message.to_lowercase();
        CONFLICT_KEYWORDS.iter().any(|keyword| lowered.contains(keyword))
    }

    /// Turn a server refusal into a conflict or a verbatim rejection
    pub fn classify_failure(&self, message: &str) -> ScheduleError {
        if self.is_conflict_message(message) {
            ScheduleError::Conflict(message.to_string())
        } else {
            ScheduleError::Rejected(message.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::SlotStatus;
    use crate::io::TransportError;
    use crate::test_utils::FakeGateway;

    fn slot(id: &str, customer_id: &str, session_slot_id: &str, weekdays: &str) -> ScheduleSlot {
        ScheduleSlot {
            id: id.to_string(),
            customer_id: customer_id.to_string(),
            trainer_id: None,
            weekdays: WeekdaySet::decode(weekdays),
            session_slot_id: session_slot_id.to_string(),
            zone_id: "z1".to_string(),
            status: SlotStatus::Active,
        }
    }

    fn candidate<'a>(customer_id: &'a str, session_slot_id: &'a str, weekdays: &str) -> ConflictCandidate<'a> {
        ConflictCandidate {
            customer_id,
            session_slot_id,
            weekdays: WeekdaySet::decode(weekdays),
        }
    }

    #[test]
    fn test_precheck_blocks_on_full_key_match() {
        let detector = ConflictDetector::new();
        let slots = vec![slot("s1", "c1", "ca1", "246")];

        assert!(detector.precheck(&slots, &candidate("c1", "ca1", "4")));
        assert!(detector.precheck(&slots, &candidate("c1", "ca1", "35CN6")));
        assert_eq!(detector.find_conflict(&slots, &candidate("c1", "ca1", "6")).unwrap().id, "s1");
    }

    #[test]
    fn test_precheck_passes_when_any_key_part_differs() {
        let detector = ConflictDetector::new();
        let slots = vec![slot("s1", "c1", "ca1", "246")];

        assert!(!detector.precheck(&slots, &candidate("c1", "ca2", "4")));
        assert!(!detector.precheck(&slots, &candidate("c2", "ca1", "4")));
        assert!(!detector.precheck(&slots, &candidate("c1", "ca1", "357CN")));
    }

    #[test]
    fn test_precheck_ignores_cancelled_slots() {
        let detector = ConflictDetector::new();
        let mut cancelled = slot("s1", "c1", "ca1", "246");
        cancelled.status = SlotStatus::Cancelled;

        assert!(!detector.precheck(&[cancelled], &candidate("c1", "ca1", "2")));
    }

    #[test]
    fn test_local_conflict_message_is_classified_as_conflict() {
        let detector = ConflictDetector::new();
        let existing = slot("s1", "c1", "ca1", "246");
        let message = detector.local_conflict_message(&existing, &candidate("c1", "ca1", "4CN"));

        assert!(message.contains("Thứ 4"));
        assert!(!message.contains("Chủ nhật"));
        assert!(detector.is_conflict_message(&message));
    }

    #[test]
    fn test_classify_failure() {
        let detector = ConflictDetector::new();

        for message in [
            "Lịch tập bị TRÙNG với lịch hiện có",
            "Xung đột lịch tập",
            "Schedule CONFLICT detected",
            "Khách hàng đã có lịch vào ca này",
        ] {
            let error = detector.classify_failure(message);
            assert!(error.is_conflict(), "{}", message);
            assert_eq!(error.to_string(), format!("⚠️ {}", message));
        }

        let error = detector.classify_failure("Gói tập đã hết hạn");
        assert!(!error.is_conflict());
        assert_eq!(error.to_string(), "Gói tập đã hết hạn");
    }

    #[tokio::test]
    async fn test_remote_check_requires_both_inputs() {
        let detector = ConflictDetector::new();
        let gateway = FakeGateway::new();
        gateway.set_conflict(Ok(true));

        assert!(!detector.remote_check(&gateway, WeekdaySet::empty(), Some("ca1")).await);
        assert!(!detector.remote_check(&gateway, WeekdaySet::decode("2"), None).await);
        assert!(!detector.remote_check(&gateway, WeekdaySet::decode("2"), Some("  ")).await);
        assert_eq!(gateway.calls().conflict_checks, 0);

        assert!(detector.remote_check(&gateway, WeekdaySet::decode("42"), Some("ca1")).await);
        assert_eq!(gateway.calls().conflict_checks, 1);
        assert_eq!(gateway.last_conflict_query(), Some(("24".to_string(), "ca1".to_string())));
    }

    #[tokio::test]
    async fn test_remote_check_fails_open() {
        let detector = ConflictDetector::new();
        let gateway = FakeGateway::new();
        gateway.set_conflict(Err(TransportError::Network("connection reset".to_string())));

        assert!(!detector.remote_check(&gateway, WeekdaySet::decode("2"), Some("ca1")).await);
        assert_eq!(gateway.calls().conflict_checks, 1);
    }
}
