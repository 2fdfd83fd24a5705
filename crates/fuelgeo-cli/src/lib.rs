//! CLI library components for the geocoding evaluation pipeline.

pub mod logging;
