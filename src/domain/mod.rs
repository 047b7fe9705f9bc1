//! Domain models for the tracker: the persisted state record, the transactions
//! it accumulates, and the milestone thresholds it is measured against.
//! No I/O lives here.

pub mod milestone;
pub mod state;
pub mod transaction;

pub use milestone::*;
pub use state::*;
pub use transaction::*;
