//! beat-planner core
//!
//! Schedules recurring outlet visits into a four-week cycle and sequences
//! each day's visits into a tour.

pub mod traits;
pub mod model;
pub mod error;
pub mod config;
pub mod scheduler;
pub mod sequencer;
pub mod assembler;
pub mod pipeline;
pub mod io;
pub mod osrm;
pub mod haversine;
pub mod polyline;
