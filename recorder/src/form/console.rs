use crate::form::sighting_form::SightingForm;
use crate::workflow::session::Session;
use floracore::calendar::{parse_periods, period_token};
use floracore::ledger::PlantSummary;
use floracore::prelude::ColorSource;
use std::io::{BufRead, Write};
use std::path::Path;

const HELP: &str = "\
Commands:
  <plant> = <periods>   record a sighting, e.g. `Rosa = ene1, ene2, mar-2`
  plant <name>          set the plant name on the form
  mark <periods>        tick/untick quincenas on the form
  submit                record the form as a sighting
  status                show the form contents
  list                  show observed plants
  chart                 show the plotted points
  export [path]         save the chart image
  help | quit";

/// Whether `keyword` starts a command rather than naming a plant in a `<plant> = <periods>` line.
fn is_command(keyword: &str, rest: &str) -> bool {
    match keyword {
        "" | "plant" | "mark" | "export" => !rest.starts_with('='),
        "help" | "quit" | "exit" | "submit" | "status" | "list" | "chart" => rest.is_empty(),
        _ => false,
    }
}

enum Flow {
    Continue,
    Quit,
}

/// Line-oriented front end standing in for the sighting window.
pub struct Console<R, W> {
    input: R,
    output: W,
    tint: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, tint: bool) -> Self {
        Self {
            input,
            output,
            tint,
        }
    }

    pub fn run<C: ColorSource>(
        &mut self,
        session: &mut Session<C>,
        form: &mut SightingForm,
    ) -> anyhow::Result<()> {
        self.publish_status(HELP)?;
        let mut line = String::new();
        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }
            if let Flow::Quit = self.handle(line.trim(), session, form)? {
                break;
            }
        }
        Ok(())
    }

    /// Writes the summary list, tinting each plant with its color.
    pub fn publish(&mut self, summaries: &[PlantSummary]) -> std::io::Result<()> {
        if summaries.is_empty() {
            return self.publish_status("No plants recorded yet.");
        }
        for summary in summaries {
            if self.tint {
                let (r, g, b) = summary.color.rgb();
                writeln!(self.output, "\x1b[38;2;{};{};{}m{}\x1b[0m", r, g, b, summary)?;
            } else {
                writeln!(self.output, "{} [{}]", summary, summary.color)?;
            }
        }
        Ok(())
    }

    pub fn publish_status(&mut self, message: &str) -> std::io::Result<()> {
        writeln!(self.output, "{}", message)
    }

    fn handle<C: ColorSource>(
        &mut self,
        line: &str,
        session: &mut Session<C>,
        form: &mut SightingForm,
    ) -> anyhow::Result<Flow> {
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        let keyword = command.to_lowercase();
        if !is_command(&keyword, rest) && line.contains('=') {
            match form.fill(line) {
                Ok(()) => self.submit(session, form)?,
                Err(err) => {
                    session.reject(&err);
                    self.publish_status(&format!("Error: {}", err))?
                }
            }
            return Ok(Flow::Continue);
        }

        match keyword.as_str() {
            "" => {}
            "help" => self.publish_status(HELP)?,
            "quit" | "exit" => return Ok(Flow::Quit),
            "plant" => form.set_plant_name(rest),
            "mark" => match parse_periods(rest) {
                Ok(periods) => {
                    for period in periods {
                        form.toggle(period);
                    }
                }
                Err(err) => self.publish_status(&format!("Error: {}", err))?,
            },
            "submit" => self.submit(session, form)?,
            "status" => {
                let ticked = form
                    .selected()
                    .iter()
                    .map(|period| period_token(*period))
                    .collect::<Vec<_>>()
                    .join(", ");
                self.publish_status(&format!(
                    "Plant: {:?} | Quincenas: [{}]",
                    form.plant_name(),
                    ticked
                ))?;
            }
            "list" => self.publish(&session.summaries())?,
            "chart" => match session.render() {
                Ok(chart) => {
                    let lines: Vec<String> = chart
                        .points()
                        .iter()
                        .map(|point| {
                            format!(
                                "{} {}: {}",
                                point.label,
                                point.class.legend_label(),
                                point.count
                            )
                        })
                        .collect();
                    if lines.is_empty() {
                        self.publish_status("Chart is empty.")?;
                    }
                    for line in lines {
                        self.publish_status(&line)?;
                    }
                }
                Err(err) => self.publish_status(&format!("Error: {}", err))?,
            },
            "export" => {
                let target = if rest.is_empty() {
                    None
                } else {
                    Some(Path::new(rest))
                };
                match session.export(target) {
                    Ok(path) => {
                        self.publish_status(&format!("Chart saved to {}", path.display()))?
                    }
                    Err(err) => self.publish_status(&format!("Error: {}", err))?,
                }
            }
            other => self.publish_status(&format!("Unknown command {:?}; try `help`.", other))?,
        }
        Ok(Flow::Continue)
    }

    fn submit<C: ColorSource>(
        &mut self,
        session: &mut Session<C>,
        form: &mut SightingForm,
    ) -> std::io::Result<()> {
        let plant = form.plant_name().trim().to_string();
        match form.submit(session) {
            Ok(summaries) => {
                self.publish_status(&format!("Sighting of {} recorded.", plant))?;
                self.publish(&summaries)
            }
            Err(err) => self.publish_status(&format!("Error: {}", err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::config::ChartConfig;
    use floracore::ledger::SequenceColors;
    use floracore::prelude::{Color, Half, Period};
    use std::io::Cursor;
    use tempfile::tempdir;

    fn run_script(script: &str, config: &ChartConfig) -> (String, Session<SequenceColors>) {
        let mut session = Session::with_palette(
            config,
            SequenceColors::new(vec![Color::from_rgb(1, 2, 3)]),
        );
        let mut form = SightingForm::new();
        let mut output = Vec::new();
        Console::new(Cursor::new(script.to_string()), &mut output, false)
            .run(&mut session, &mut form)
            .unwrap();
        (String::from_utf8(output).unwrap(), session)
    }

    #[test]
    fn records_inline_sightings_and_lists_them() {
        let (output, session) =
            run_script("Rosa = ene1, ene2\nlist\nquit\n", &ChartConfig::default());

        assert!(output.contains("Sighting of Rosa recorded."));
        assert!(output.contains("Rosa (Meses: Enero) [#010203]"));
        let counts = session.ledger().counts();
        assert_eq!(counts.get(Period::new(0, Half::First).unwrap()), 1);
        assert_eq!(counts.get(Period::new(0, Half::Second).unwrap()), 1);
    }

    #[test]
    fn staged_form_supports_toggling() {
        let (output, session) = run_script(
            "plant Lirio\nmark feb1 feb2\nmark feb2\nstatus\nsubmit\n",
            &ChartConfig::default(),
        );

        assert!(output.contains("Plant: \"Lirio\" | Quincenas: [feb1]"));
        assert!(output.contains("Lirio (Meses: Febrero)"));
        assert_eq!(session.ledger().counts().total(), 1);
    }

    #[test]
    fn errors_are_reported_and_loop_continues() {
        let (output, session) = run_script(
            " = ene1\nfrobnicate\nRosa = xyz1\nClavel = dic2\n",
            &ChartConfig::default(),
        );

        assert!(output.contains("Error: validation failed: plant name required"));
        assert!(output.contains("Unknown command \"frobnicate\""));
        assert!(output.contains("Error: validation failed: unknown month"));
        assert_eq!(session.summaries().len(), 1);
        assert_eq!(session.metrics().snapshot().rejected, 2);
    }

    #[test]
    fn inline_sighting_replaces_staged_marks() {
        let (output, session) = run_script("mark feb1\nRosa = ene1\n", &ChartConfig::default());

        assert!(output.contains("Rosa (Meses: Enero) [#010203]"));
        assert!(!output.contains("Febrero"));
        let counts = session.ledger().counts();
        assert_eq!(counts.get(Period::new(1, Half::First).unwrap()), 0);
        assert_eq!(counts.get(Period::new(0, Half::First).unwrap()), 1);
    }

    #[test]
    fn export_path_may_contain_equals_sign() {
        let dir = tempdir().unwrap();
        let config = ChartConfig {
            width: 200,
            height: 150,
            ..Default::default()
        };
        let target = dir.path().join("a=b.png");
        let script = format!("Rosa = jun2\nexport {}\n", target.display());
        let (output, session) = run_script(&script, &config);

        assert!(target.exists());
        assert!(output.contains("Chart saved to"));
        assert!(!output.contains("Error:"));
        assert_eq!(session.summaries().len(), 1);
        assert_eq!(session.metrics().snapshot().exports, 1);
    }

    #[test]
    fn plant_named_like_a_command_is_still_a_sighting() {
        let (output, session) = run_script("List = mar1\n", &ChartConfig::default());

        assert!(output.contains("Sighting of List recorded."));
        assert_eq!(session.ledger().counts().get(Period::new(2, Half::First).unwrap()), 1);
    }

    #[test]
    fn chart_and_export_commands() {
        let dir = tempdir().unwrap();
        let config = ChartConfig {
            width: 200,
            height: 150,
            output: dir.path().join("curva.png"),
            ..Default::default()
        };
        let (output, _) = run_script("chart\nRosa = jun2\nchart\nexport\n", &config);

        assert!(output.contains("Chart is empty."));
        assert!(output.contains("Jun 2da Quincena: 1"));
        assert!(output.contains("Chart saved to"));
        assert!(dir.path().join("curva.png").exists());
    }
}
