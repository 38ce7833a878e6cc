use crate::workflow::session::Session;
use floracore::calendar::parse_periods;
use floracore::ledger::PlantSummary;
use floracore::prelude::{ColorSource, FloraResult, Period};
use std::collections::BTreeSet;

/// Pending input: a plant name and the quincenas ticked so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SightingForm {
    plant_name: String,
    selected: BTreeSet<Period>,
}

impl SightingForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_plant_name(&mut self, name: &str) {
        self.plant_name = name.to_string();
    }

    pub fn plant_name(&self) -> &str {
        &self.plant_name
    }

    /// Ticks the period, or unticks it when already selected.
    pub fn toggle(&mut self, period: Period) {
        if !self.selected.remove(&period) {
            self.selected.insert(period);
        }
    }

    pub fn select(&mut self, period: Period) {
        self.selected.insert(period);
    }

    pub fn selected(&self) -> &BTreeSet<Period> {
        &self.selected
    }

    /// Fills the form from `plant = ene1, feb2` style input, replacing any ticked periods.
    pub fn fill(&mut self, line: &str) -> FloraResult<()> {
        let (name, tokens) = match line.split_once('=') {
            Some((name, tokens)) => (name, tokens),
            None => (line, ""),
        };
        let periods = parse_periods(tokens)?;
        self.set_plant_name(name);
        self.selected.clear();
        for period in periods {
            self.select(period);
        }
        Ok(())
    }

    /// Sends the form to the session; it is cleared only when the sighting was accepted.
    pub fn submit<C: ColorSource>(
        &mut self,
        session: &mut Session<C>,
    ) -> FloraResult<Vec<PlantSummary>> {
        let periods: Vec<Period> = self.selected.iter().copied().collect();
        let summaries = session.submit(&self.plant_name, periods)?;
        self.plant_name.clear();
        self.selected.clear();
        Ok(summaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::config::ChartConfig;
    use floracore::ledger::SequenceColors;
    use floracore::prelude::{FloraError, Half};

    fn session() -> Session<SequenceColors> {
        Session::with_palette(&ChartConfig::default(), SequenceColors::new(Vec::new()))
    }

    #[test]
    fn successful_submit_clears_selection() {
        let mut session = session();
        let mut form = SightingForm::new();
        form.fill("Rosa = ene1, ene2").unwrap();
        assert_eq!(form.selected().len(), 2);

        let summaries = form.submit(&mut session).unwrap();
        assert_eq!(summaries[0].to_string(), "Rosa (Meses: Enero)");
        assert!(form.selected().is_empty());
        assert!(form.plant_name().is_empty());
    }

    #[test]
    fn rejected_submit_keeps_selection() {
        let mut session = session();
        let mut form = SightingForm::new();
        form.fill(" = mar1").unwrap();

        let result = form.submit(&mut session);
        assert!(matches!(result, Err(FloraError::Validation(_))));
        assert_eq!(form.selected().len(), 1);
        assert!(session.summaries().is_empty());
    }

    #[test]
    fn toggle_unticks_selected_period() {
        let mut form = SightingForm::new();
        let period = Period::new(4, Half::Second).unwrap();
        form.toggle(period);
        form.toggle(period);
        assert!(form.selected().is_empty());
    }

    #[test]
    fn fill_rejects_bad_tokens_without_touching_form() {
        let mut form = SightingForm::new();
        assert!(form.fill("Rosa = ene5").is_err());
        assert!(form.plant_name().is_empty());
        assert!(form.selected().is_empty());
    }

    #[test]
    fn fill_replaces_earlier_selection() {
        let mut form = SightingForm::new();
        form.toggle(Period::new(1, Half::First).unwrap());
        form.fill("Rosa = ene1").unwrap();
        let selected: Vec<Period> = form.selected().iter().copied().collect();
        assert_eq!(selected, vec![Period::new(0, Half::First).unwrap()]);
    }

    #[test]
    fn fill_without_periods_sets_name_only() {
        let mut form = SightingForm::new();
        form.fill("Lirio").unwrap();
        assert_eq!(form.plant_name(), "Lirio");
        assert!(form.selected().is_empty());
    }
}
