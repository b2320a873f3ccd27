//! Mappers for converting customer enrollment DTOs into domain models.

use crate::domain::models::{Enrollment, EnrollmentWindow};
use chrono::NaiveDate;
use log::warn;
use shared::CustomerEnrollment;

pub struct EnrollmentMapper;

impl EnrollmentMapper {
    pub fn to_domain(dto: CustomerEnrollment) -> Enrollment {
        let start = Self::parse_bound(&dto.customer_id, dto.start_date.as_deref());
        let end = Self::parse_bound(&dto.customer_id, dto.end_date.as_deref());

        Enrollment {
            customer_id: dto.customer_id,
            customer_name: dto.name,
            service_name: dto.service_name,
            window: EnrollmentWindow::new(start, end),
            payment_status: dto.payment_status,
        }
    }

    pub fn to_domain_list(dtos: Vec<CustomerEnrollment>) -> Vec<Enrollment> {
        dtos.into_iter().map(Self::to_domain).collect()
    }

    /// Parse a window bound; blank or unreadable values leave the side open
    fn parse_bound(customer_id: &str, value: Option<&str>) -> Option<NaiveDate> {
        let value = value.map(str::trim).filter(|v| !v.is_empty())?;
        let parsed = parse_wire_date(value);
        if parsed.is_none() {
            warn!("Ignoring unreadable enrollment date {:?} for customer {}", value, customer_id);
        }
        parsed
    }
}

/// Parse a calendar date sent by the service.
///
/// Accepts `YYYY-MM-DD`, timestamps whose date part is `YYYY-MM-DD`
/// (`2024-01-10T08:30:00+07:00`, `2024-01-10 08:30:00`) and `DD/MM/YYYY`.
/// Any time of day is dropped, so the whole calendar day counts.
pub fn parse_wire_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    let date_part = value
        .split(|c: char| c == 'T' || c == ' ')
        .next()
        .unwrap_or(value);

    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(date_part, "%d/%m/%Y"))
        .ok()
}
