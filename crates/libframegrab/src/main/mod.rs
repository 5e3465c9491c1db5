//! Module for the main functionality, the pipeline and its steps

pub mod acquire;
pub mod pipeline;
pub mod sample;
