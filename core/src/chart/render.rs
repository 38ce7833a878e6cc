use crate::calendar::month_abbreviation;
use crate::chart::series::{build_series, PlottedPoint, SeriesClass};
use crate::ledger::PeriodCounts;
use crate::prelude::{FloraError, FloraResult, MONTHS};
use crate::telemetry::log::LogManager;
use image::{ColorType, ImageFormat};
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const MARKER_SIZE: i32 = 6;

/// Figure layout shared by every render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "Generador de curva floral".into(),
            x_desc: "Meses".into(),
            y_desc: "Cantidad de Plantas".into(),
        }
    }
}

/// Raw RGB pixels of a drawn chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Figure {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartState {
    Rendered,
    Exported,
}

/// A drawn chart together with the points it shows.
#[derive(Debug, Clone)]
pub struct RenderedChart {
    points: Vec<PlottedPoint>,
    figure: Figure,
    state: ChartState,
    last_export: Option<PathBuf>,
}

impl RenderedChart {
    pub fn points(&self) -> &[PlottedPoint] {
        &self.points
    }

    pub fn figure(&self) -> &Figure {
        &self.figure
    }

    pub fn state(&self) -> ChartState {
        self.state
    }

    pub fn last_export(&self) -> Option<&Path> {
        self.last_export.as_deref()
    }

    /// Writes the figure to `path`, overwriting any existing file.
    ///
    /// The format follows the extension; a bare path is written as PNG.
    pub fn export<P: AsRef<Path>>(&mut self, path: P) -> FloraResult<()> {
        let path = path.as_ref();
        let format = match path.extension() {
            None => ImageFormat::Png,
            Some(_) => ImageFormat::from_path(path).map_err(|err| {
                FloraError::Io(format!("unsupported image path {}: {}", path.display(), err))
            })?,
        };

        image::save_buffer_with_format(
            path,
            &self.figure.pixels,
            self.figure.width,
            self.figure.height,
            ColorType::Rgb8,
            format,
        )
        .map_err(|err| FloraError::Io(format!("writing {}: {}", path.display(), err)))?;

        self.state = ChartState::Exported;
        self.last_export = Some(path.to_path_buf());
        Ok(())
    }
}

impl<E> From<DrawingAreaErrorKind<E>> for FloraError
where
    E: std::error::Error + Send + Sync,
{
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        FloraError::Internal(format!("drawing chart: {}", err))
    }
}

/// Draws the two-series scatter chart of sightings per quincena.
pub struct ChartRenderer {
    config: RenderConfig,
    logger: LogManager,
}

impl ChartRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            config,
            logger: LogManager::new(),
        }
    }

    pub fn render(&self, counts: &PeriodCounts) -> FloraResult<RenderedChart> {
        let (width, height) = (self.config.width, self.config.height);
        if width == 0 || height == 0 {
            return Err(FloraError::Validation(format!(
                "figure size {}x{} must be positive",
                width, height
            )));
        }

        let points = build_series(counts);
        let mut pixels = vec![255u8; width as usize * height as usize * 3];
        self.draw(&points, counts.max(), &mut pixels)?;

        self.logger.record(&format!(
            "rendered chart with {} point(s) at {}x{}",
            points.len(),
            width,
            height
        ));

        Ok(RenderedChart {
            points,
            figure: Figure {
                width,
                height,
                pixels,
            },
            state: ChartState::Rendered,
            last_export: None,
        })
    }

    fn draw(&self, points: &[PlottedPoint], max_count: u32, pixels: &mut [u8]) -> FloraResult<()> {
        let root =
            BitMapBackend::with_buffer(pixels, (self.config.width, self.config.height))
                .into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&self.config.title, ("sans-serif", 28))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d(
                (0u32..MONTHS as u32).into_segmented(),
                0u32..max_count.saturating_add(1),
            )?;

        chart
            .configure_mesh()
            .x_desc(self.config.x_desc.as_str())
            .y_desc(self.config.y_desc.as_str())
            .x_labels(MONTHS)
            .x_label_formatter(&|value: &SegmentValue<u32>| match value {
                SegmentValue::CenterOf(month) | SegmentValue::Exact(month) => {
                    month_abbreviation(*month as usize).to_string()
                }
                SegmentValue::Last => String::new(),
            })
            .draw()?;

        let mut has_legend = false;
        for class in [SeriesClass::FirstHalf, SeriesClass::SecondHalf] {
            let (r, g, b) = class.color().rgb();
            let color = RGBColor(r, g, b);
            let members: Vec<&PlottedPoint> =
                points.iter().filter(|point| point.class == class).collect();
            let legend = members.iter().find_map(|point| point.legend);
            has_legend |= legend.is_some();

            match class {
                SeriesClass::FirstHalf => {
                    let annotation = chart.draw_series(members.iter().map(|point| {
                        Circle::new(
                            (SegmentValue::CenterOf(point.month as u32), point.count),
                            MARKER_SIZE,
                            color.filled(),
                        )
                    }))?;
                    if let Some(label) = legend {
                        annotation
                            .label(label)
                            .legend(move |(x, y)| Circle::new((x, y), MARKER_SIZE, color.filled()));
                    }
                }
                SeriesClass::SecondHalf => {
                    let annotation = chart.draw_series(members.iter().map(|point| {
                        Cross::new(
                            (SegmentValue::CenterOf(point.month as u32), point.count),
                            MARKER_SIZE,
                            color.stroke_width(2),
                        )
                    }))?;
                    if let Some(label) = legend {
                        annotation.label(label).legend(move |(x, y)| {
                            Cross::new((x, y), MARKER_SIZE, color.stroke_width(2))
                        });
                    }
                }
            }
        }

        if has_legend {
            chart
                .configure_series_labels()
                .background_style(&WHITE.mix(0.8))
                .border_style(&BLACK)
                .position(SeriesLabelPosition::UpperRight)
                .draw()?;
        }

        root.present()?;
        Ok(())
    }
}

impl Default for ChartRenderer {
    fn default() -> Self {
        Self::new(RenderConfig::default())
    }
}
