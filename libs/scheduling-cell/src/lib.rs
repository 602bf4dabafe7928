//! Appointment slot validation and queue/ETA projection.
//!
//! Everything in this crate is pure computation: no I/O, no logging, no
//! shared mutable state. Callers fetch availability and booking counts
//! from the data store themselves and persist whatever they get back.

pub mod error;
pub mod models;
pub mod services;

pub use error::SchedulingError;
pub use models::*;
pub use services::scheduler::SlotScheduler;
