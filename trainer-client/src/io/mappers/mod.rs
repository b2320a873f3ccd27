pub mod enrollment_mapper;
pub mod schedule_mapper;

pub use enrollment_mapper::{parse_wire_date, EnrollmentMapper};
pub use schedule_mapper::ScheduleMapper;
