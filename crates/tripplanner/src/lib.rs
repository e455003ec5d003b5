//! `tripplanner` - A trip planner built on a generic card-collection store
//!
//! This library provides the planner state machine: trip details and budget,
//! repeatable flight, hotel and booking cards persisted to a local key-value
//! store, a derived overview dashboard, a generated itinerary and a packing
//! checklist.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod checklist;
pub mod cli;
pub mod collection;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod fields;
pub mod itinerary;
pub mod logging;
pub mod planner;
pub mod registry;
pub mod storage;
pub mod trip;
pub mod view;

pub use collection::{Card, CardCollection, CardId};
pub use config::Config;
pub use dashboard::DashboardSummary;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use planner::TripPlanner;
pub use registry::{CardKind, CardSpec};
pub use storage::{KeyValueStore, LocalStore, MemoryStore, SqliteStore, StoreStats};
pub use trip::{TripDetail, TripField};
pub use view::{Section, Surface, TextPage};
