//! Recurring personal-training schedule engine for the gym trainer home view.
//!
//! - [`domain`]: calendar grid, occurrence resolution, conflicts, mutations
//! - [`io`]: the scheduling-service gateway and its REST implementation
//! - [`config`]: connection settings

pub mod config;
pub mod domain;
pub mod io;

#[cfg(test)]
mod test_utils;
