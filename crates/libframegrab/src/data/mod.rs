//! Module for all data types and path conventions

pub mod layout;
pub mod run_mode;
pub mod sample_rate;
