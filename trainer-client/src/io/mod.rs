//! # IO Layer
//!
//! Everything that crosses the boundary to the external scheduling service:
//!
//! - **gateway**: the async trait the domain layer depends on
//! - **rest**: the HTTP/JSON implementation of that trait
//! - **mappers**: conversion between `shared` wire DTOs and domain models
//!
//! This layer holds no business rules. Payload shapes are dictated by the
//! service; the mappers are where loosely-typed wire data (weekday tokens,
//! free-text statuses, mixed date formats) becomes strongly typed.

pub mod error;
pub mod gateway;
pub mod mappers;
pub mod rest;

pub use error::TransportError;
pub use gateway::ScheduleGateway;
pub use rest::RestScheduleGateway;
