//! Core of the coffee roast simulator
//!
//! Pure, synchronous building blocks shared by the HTTP server and the
//! WebAssembly front end:
//! - Roast profile generation from bean/roast parameters
//! - An append-only event timeline on a monotonic session clock
//! - The roast session state machine
//! - Statistics derived from the live trace and the timeline

pub mod clock;
pub mod error;
pub mod generator;
pub mod models;
pub mod recommendations;
pub mod session;
pub mod statistics;
pub mod timeline;
pub mod validation;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{RoastError, RoastResult};
pub use generator::{generate, generate_from_labels, SAMPLE_INTERVAL_MINUTES};
pub use models::*;
pub use recommendations::{recommendations_for, RoastTips};
pub use session::RoastSession;
pub use statistics::{CrackTiming, RoastStatistics};
pub use timeline::EventTimeline;
