pub mod harness;
pub mod reports;
pub mod seeds;
pub mod tester;

pub use harness::{BookingHarness, BookingRun, TesterAssets};
pub use seeds::resolve_seeds;
pub use tester::*;
