use crate::workflow::config::ChartConfig;
use floracore::calendar::parse_periods;
use floracore::chart::{ChartRenderer, RenderedChart};
use floracore::ledger::{PeriodCounts, PlantSummary, RandomColors, SightingLedger};
use floracore::prelude::{ColorSource, FloraError, FloraResult, Period};
use floracore::telemetry::SubmissionMetrics;
use log::{info, warn};
use std::path::{Path, PathBuf};

/// Application controller: owns the ledger, the renderer and the last drawn chart.
pub struct Session<C: ColorSource = RandomColors> {
    ledger: SightingLedger<C>,
    renderer: ChartRenderer,
    chart: Option<(PeriodCounts, RenderedChart)>,
    metrics: SubmissionMetrics,
    default_output: PathBuf,
}

impl<C: ColorSource> Session<C> {
    pub fn with_palette(config: &ChartConfig, palette: C) -> Self {
        Self {
            ledger: SightingLedger::with_palette(palette),
            renderer: ChartRenderer::new(config.to_render_config()),
            chart: None,
            metrics: SubmissionMetrics::new(),
            default_output: config.output.clone(),
        }
    }

    pub fn submit(&mut self, plant: &str, periods: Vec<Period>) -> FloraResult<Vec<PlantSummary>> {
        match self.ledger.record_sighting(plant, periods) {
            Ok(summaries) => {
                self.metrics.record_accepted();
                Ok(summaries)
            }
            Err(err) => {
                self.reject(&err);
                Err(err)
            }
        }
    }

    /// Parses period tokens such as `ene1, mar-2` and submits them; a bad token counts as a rejection.
    pub fn submit_tokens(&mut self, plant: &str, tokens: &str) -> FloraResult<Vec<PlantSummary>> {
        match parse_periods(tokens) {
            Ok(periods) => self.submit(plant, periods),
            Err(err) => {
                self.reject(&err);
                Err(err)
            }
        }
    }

    /// Counts a submission that never reached the ledger.
    pub fn reject(&self, err: &FloraError) {
        self.metrics.record_rejected();
        warn!("submission rejected: {}", err);
    }

    /// Draws the chart, reusing the previous figure while the counts are unchanged.
    pub fn render(&mut self) -> FloraResult<&mut RenderedChart> {
        let current = self.ledger.counts();
        let entry = match self.chart.take() {
            Some((drawn_from, chart)) if &drawn_from == current => (drawn_from, chart),
            _ => (current.clone(), self.renderer.render(current)?),
        };
        let (_, chart) = self.chart.insert(entry);
        Ok(chart)
    }

    /// Renders if needed and writes the figure to `path`, or to the configured output.
    pub fn export(&mut self, path: Option<&Path>) -> FloraResult<PathBuf> {
        let target = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.default_output.clone());
        self.render()?.export(&target)?;
        self.metrics.record_export();
        info!("chart exported to {}", target.display());
        Ok(target)
    }

    pub fn summaries(&self) -> Vec<PlantSummary> {
        self.ledger.summaries()
    }

    pub fn ledger(&self) -> &SightingLedger<C> {
        &self.ledger
    }

    pub fn metrics(&self) -> &SubmissionMetrics {
        &self.metrics
    }

    pub fn default_output(&self) -> &Path {
        &self.default_output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use floracore::chart::ChartState;
    use floracore::ledger::SequenceColors;
    use floracore::prelude::Half;
    use tempfile::tempdir;

    fn session(output: PathBuf) -> Session<SequenceColors> {
        let config = ChartConfig {
            width: 200,
            height: 150,
            output,
            ..Default::default()
        };
        Session::with_palette(&config, SequenceColors::new(Vec::new()))
    }

    #[test]
    fn submissions_update_metrics() {
        let mut session = session(PathBuf::from("unused.png"));
        session
            .submit("Rosa", vec![Period::new(0, Half::First).unwrap()])
            .unwrap();
        assert!(matches!(
            session.submit("", Vec::new()),
            Err(FloraError::Validation(_))
        ));

        let snapshot = session.metrics().snapshot();
        assert_eq!(snapshot.accepted, 1);
        assert_eq!(snapshot.rejected, 1);
        assert_eq!(session.summaries().len(), 1);
    }

    #[test]
    fn malformed_tokens_count_as_rejected() {
        let mut session = session(PathBuf::from("unused.png"));
        assert!(matches!(
            session.submit_tokens("Rosa", "ene3"),
            Err(FloraError::Validation(_))
        ));
        session.submit_tokens("Rosa", "ene1, feb-2").unwrap();

        let snapshot = session.metrics().snapshot();
        assert_eq!(snapshot.accepted, 1);
        assert_eq!(snapshot.rejected, 1);
        assert_eq!(session.ledger().counts().total(), 2);
    }

    #[test]
    fn render_is_reused_until_counts_change() {
        let mut session = session(PathBuf::from("unused.png"));
        session
            .submit("Rosa", vec![Period::new(2, Half::Second).unwrap()])
            .unwrap();
        assert_eq!(session.render().unwrap().points().len(), 1);

        session
            .submit("Rosa", vec![Period::new(3, Half::First).unwrap()])
            .unwrap();
        assert_eq!(session.render().unwrap().points().len(), 2);
    }

    #[test]
    fn export_defaults_to_configured_output() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("curva.png");
        let mut session = session(output.clone());
        session
            .submit("Rosa", vec![Period::new(0, Half::First).unwrap()])
            .unwrap();

        let written = session.export(None).unwrap();
        assert_eq!(written, output);
        assert!(output.exists());
        assert_eq!(session.render().unwrap().state(), ChartState::Exported);
        assert_eq!(session.metrics().snapshot().exports, 1);
    }

    #[test]
    fn failed_export_is_reported_and_session_stays_usable() {
        let dir = tempdir().unwrap();
        let mut session = session(dir.path().join("missing").join("curva.png"));
        assert!(matches!(session.export(None), Err(FloraError::Io(_))));

        session.submit("Lirio", Vec::new()).unwrap();
        let retry = dir.path().join("curva.png");
        session.export(Some(retry.as_path())).unwrap();
        assert!(retry.exists());
    }
}
