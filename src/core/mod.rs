//! Business logic: derived views, input validation, and the tracker controller.
//! Storage and terminal I/O stay outside this module; the controller only sees
//! them through [`crate::storage::StateStore`] and [`clock::Clock`].

pub mod clock;
pub mod errors;
pub mod ids;
pub mod input;
pub mod tracker;
pub mod view_model;

pub use clock::{Clock, FixedClock, SystemClock};
pub use errors::{Result, TrackerError};
pub use ids::IdGenerator;
pub use input::{parse_amount, InputError};
pub use tracker::{ApplyOutcome, Tracker};
pub use view_model::{apply_transaction, compute_progress, milestone_status, Dashboard};
