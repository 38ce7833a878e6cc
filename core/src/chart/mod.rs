pub mod render;
pub mod series;

pub use render::{ChartRenderer, ChartState, Figure, RenderConfig, RenderedChart};
pub use series::{build_series, PlottedPoint, SeriesClass};
