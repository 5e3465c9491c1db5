//! Module for all traits used as seams between the library and its callers

pub mod pipeline_options;
pub mod pipeline_steps;
