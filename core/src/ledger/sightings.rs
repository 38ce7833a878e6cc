use crate::calendar::month_name;
use crate::ledger::palette::RandomColors;
use crate::prelude::{Color, ColorSource, FloraError, FloraResult, Period, PERIODS};
use crate::telemetry::log::LogManager;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// Number of accepted submissions that marked each of the 24 periods.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PeriodCounts {
    counts: [u32; PERIODS],
}

impl PeriodCounts {
    pub fn get(&self, period: Period) -> u32 {
        self.counts[period.index()]
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&count| count as u64).sum()
    }

    pub fn max(&self) -> u32 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Periods in calendar order with their counts, zeros included.
    pub fn iter(&self) -> impl Iterator<Item = (Period, u32)> + '_ {
        Period::all().map(move |period| (period, self.get(period)))
    }

    fn increment(&mut self, period: Period) {
        self.counts[period.index()] = self.counts[period.index()].saturating_add(1);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlantRecord {
    name: String,
    color: Color,
    months: BTreeSet<usize>,
}

/// Snapshot of everything the ledger knows; plants are kept in first-sighting order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LedgerState {
    plants: Vec<PlantRecord>,
    counts: PeriodCounts,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl LedgerState {
    pub fn to_json(&self) -> FloraResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|err| FloraError::Internal(format!("serializing ledger: {}", err)))
    }

    fn record(&self, name: &str) -> Option<&PlantRecord> {
        self.index.get(name).map(|&slot| &self.plants[slot])
    }
}

/// One line of the "plants observed" list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlantSummary {
    pub name: String,
    pub color: Color,
    pub months: Vec<usize>,
}

impl fmt::Display for PlantSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let months = self
            .months
            .iter()
            .map(|&month| month_name(month))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{} (Meses: {})", self.name, months)
    }
}

impl From<&PlantRecord> for PlantSummary {
    fn from(record: &PlantRecord) -> Self {
        Self {
            name: record.name.clone(),
            color: record.color,
            months: record.months.iter().copied().collect(),
        }
    }
}

/// In-memory aggregate of every sighting recorded by the current process.
///
/// Two views are maintained independently: the months each plant was seen in
/// (deduplicated per month) for the summary list, and raw per-period counts
/// for the chart.
pub struct SightingLedger<C: ColorSource = RandomColors> {
    state: LedgerState,
    palette: C,
    logger: LogManager,
}

impl SightingLedger<RandomColors> {
    pub fn new() -> Self {
        Self::with_palette(RandomColors::new())
    }
}

impl Default for SightingLedger<RandomColors> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ColorSource> SightingLedger<C> {
    pub fn with_palette(palette: C) -> Self {
        Self {
            state: LedgerState::default(),
            palette,
            logger: LogManager::new(),
        }
    }

    /// Records one submission and returns the updated summary list.
    ///
    /// The name is trimmed and must not be empty; nothing is mutated when it is.
    pub fn record_sighting<I>(
        &mut self,
        plant_name: &str,
        periods: I,
    ) -> FloraResult<Vec<PlantSummary>>
    where
        I: IntoIterator<Item = Period>,
    {
        let name = plant_name.trim();
        if name.is_empty() {
            self.logger.warn("rejected sighting without plant name");
            return Err(FloraError::Validation("plant name required".into()));
        }
        let periods: BTreeSet<Period> = periods.into_iter().collect();

        let slot = match self.state.index.get(name).copied() {
            Some(slot) => slot,
            None => {
                let color = self.palette.next_color();
                self.state.plants.push(PlantRecord {
                    name: name.to_string(),
                    color,
                    months: BTreeSet::new(),
                });
                let slot = self.state.plants.len() - 1;
                self.state.index.insert(name.to_string(), slot);
                self.logger
                    .record(&format!("new plant {} assigned color {}", name, color));
                slot
            }
        };

        for period in &periods {
            self.state.counts.increment(*period);
            self.state.plants[slot].months.insert(period.month());
        }

        self.logger.record(&format!(
            "recorded sighting of {} in {} period(s)",
            name,
            periods.len()
        ));
        Ok(self.summaries())
    }

    pub fn summaries(&self) -> Vec<PlantSummary> {
        self.state.plants.iter().map(PlantSummary::from).collect()
    }

    pub fn counts(&self) -> &PeriodCounts {
        &self.state.counts
    }

    pub fn color_of(&self, plant_name: &str) -> Option<Color> {
        self.state.record(plant_name).map(|record| record.color)
    }

    pub fn months_seen_by(&self, plant_name: &str) -> Option<&BTreeSet<usize>> {
        self.state.record(plant_name).map(|record| &record.months)
    }

    pub fn plant_count(&self) -> usize {
        self.state.plants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.plants.is_empty()
    }

    pub fn state(&self) -> &LedgerState {
        &self.state
    }
}
