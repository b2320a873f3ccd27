pub mod enrollment;
pub mod schedule_slot;

pub use enrollment::{Enrollment, EnrollmentWindow};
pub use schedule_slot::{ScheduleSlot, SlotStatus};

// Session slots and zones are immutable reference data; the wire shape is the model.
pub use shared::{SessionSlot, Zone};
