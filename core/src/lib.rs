//! Sighting ledger and flowering-curve chart for plant observations.
//!
//! Sightings are recorded per plant and per quincena, aggregated into
//! per-period counts and drawn as a two-series scatter chart that can be
//! exported as a raster image.

pub mod calendar;
pub mod chart;
pub mod ledger;
pub mod prelude;
pub mod telemetry;

pub use chart::{ChartRenderer, RenderConfig, RenderedChart};
pub use ledger::SightingLedger;
pub use prelude::{Color, ColorSource, FloraError, FloraResult, Half, Period};
