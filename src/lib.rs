//! Weekly class slot assignment for program course catalogs.

pub mod config;
pub mod data;
pub mod demand;
pub mod error;
pub mod server;
pub mod slots;
pub mod solver;
pub mod summary;

pub use data::*;
pub use demand::required_sections;
pub use error::{Result, ScheduleError};
pub use slots::build_slot_catalog;
pub use solver::{Allocation, SchedulerState, assign_schedule, solve, solve_all_programs};
pub use summary::summarize;
