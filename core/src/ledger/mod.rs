pub mod palette;
pub mod sightings;

pub use palette::{RandomColors, SequenceColors};
pub use sightings::{LedgerState, PeriodCounts, PlantSummary, SightingLedger};
