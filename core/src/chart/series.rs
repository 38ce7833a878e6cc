use crate::calendar::month_abbreviation;
use crate::ledger::PeriodCounts;
use crate::prelude::{Color, Half, Period, MONTHS};
use serde::Serialize;

/// The two fixed chart series, one per quincena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SeriesClass {
    FirstHalf,
    SecondHalf,
}

impl SeriesClass {
    pub fn of(half: Half) -> Self {
        match half {
            Half::First => SeriesClass::FirstHalf,
            Half::Second => SeriesClass::SecondHalf,
        }
    }

    pub fn legend_label(self) -> &'static str {
        match self {
            SeriesClass::FirstHalf => "1ra Quincena",
            SeriesClass::SecondHalf => "2da Quincena",
        }
    }

    pub fn color(self) -> Color {
        match self {
            SeriesClass::FirstHalf => Color::from_rgb(0, 0, 255),
            SeriesClass::SecondHalf => Color::from_rgb(255, 0, 0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlottedPoint {
    pub month: usize,
    pub label: &'static str,
    pub count: u32,
    pub class: SeriesClass,
    /// Set on the first point of each series only.
    pub legend: Option<&'static str>,
}

/// Turns per-period counts into scatter points in calendar order, skipping empty periods.
pub fn build_series(counts: &PeriodCounts) -> Vec<PlottedPoint> {
    let mut points = Vec::new();
    let mut labelled = [false; 2];

    for month in 0..MONTHS {
        for half in Half::ALL {
            let count = match Period::new(month, half) {
                Ok(period) => counts.get(period),
                Err(_) => continue,
            };
            if count == 0 {
                continue;
            }

            let class = SeriesClass::of(half);
            let legend = if labelled[half.index()] {
                None
            } else {
                labelled[half.index()] = true;
                Some(class.legend_label())
            };

            points.push(PlottedPoint {
                month,
                label: month_abbreviation(month),
                count,
                class,
                legend,
            });
        }
    }

    points
}
