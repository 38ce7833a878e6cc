use anyhow::Context;
use clap::Parser;
use floracore::ledger::{PlantSummary, RandomColors};
use floracore::prelude::FloraResult;
use form::console::Console;
use form::sighting_form::SightingForm;
use generator::demo::demo_sightings;
use log::{info, warn};
use std::fs;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use workflow::config::ChartConfig;
use workflow::script::SessionScript;
use workflow::session::Session;

mod form;
mod generator;
mod workflow;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Records plant sightings per quincena and exports the flowering curve"
)]
struct Args {
    /// Load chart settings from YAML
    #[arg(long)]
    config: Option<PathBuf>,
    /// Replay sightings from a YAML session file
    #[arg(long)]
    session: Option<PathBuf>,
    /// Inline sighting such as "Rosa=ene1,ene2" (repeatable)
    #[arg(long = "sighting", value_name = "PLANT=PERIODS")]
    sightings: Vec<String>,
    /// Record this many pseudo-random demo sightings
    #[arg(long)]
    demo: Option<usize>,
    /// Seed for demo data and plant colors
    #[arg(long)]
    seed: Option<u64>,
    /// Open the line-based sighting form on stdin
    #[arg(long, default_value_t = false)]
    interactive: bool,
    #[arg(long)]
    output: Option<PathBuf>,
    #[arg(long)]
    width: Option<u32>,
    #[arg(long)]
    height: Option<u32>,
    #[arg(long)]
    title: Option<String>,
    /// Write the ledger snapshot as JSON
    #[arg(long)]
    summary_json: Option<PathBuf>,
    /// Skip rendering and exporting the chart
    #[arg(long, default_value_t = false)]
    no_chart: bool,
}

/// Rejected batch entries are reported and skipped.
fn report_skipped(result: FloraResult<Vec<PlantSummary>>, origin: &str) {
    if let Err(err) = result {
        warn!("skipping {}: {}", origin, err);
        eprintln!("Skipping {}: {}", origin, err);
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let chart_config = if let Some(path) = &args.config {
        ChartConfig::load(path)?
    } else {
        ChartConfig::default()
    }
    .apply_overrides(args.width, args.height, args.title.clone(), args.output.clone());

    let palette = match args.seed {
        Some(seed) => RandomColors::seeded(seed),
        None => RandomColors::new(),
    };
    let mut session = Session::with_palette(&chart_config, palette);

    if let Some(path) = &args.session {
        let script = SessionScript::load(path)?;
        info!("replaying {} sighting(s) from {}", script.sightings.len(), path.display());
        for (position, entry) in script.sightings.iter().enumerate() {
            let origin = format!("{} entry {}", path.display(), position + 1);
            report_skipped(
                session.submit_tokens(&entry.plant, &entry.periods.join(",")),
                &origin,
            );
        }
    }

    for raw in &args.sightings {
        let (plant, tokens) = raw.split_once('=').unwrap_or((raw.as_str(), ""));
        report_skipped(
            session.submit_tokens(plant, tokens),
            &format!("--sighting {:?}", raw),
        );
    }

    if let Some(count) = args.demo {
        for sighting in demo_sightings(count, args.seed.unwrap_or(0)) {
            report_skipped(session.submit(&sighting.plant, sighting.periods), "demo sighting");
        }
    }

    let tint = io::stdout().is_terminal();
    let mut console = Console::new(io::stdin().lock(), io::stdout(), tint);
    let mut form = SightingForm::new();
    if args.interactive {
        console.run(&mut session, &mut form)?;
    }

    console.publish(&session.summaries())?;

    if let Some(path) = &args.summary_json {
        let json = session.ledger().state().to_json()?;
        fs::write(path, json)
            .with_context(|| format!("writing ledger summary {}", path.display()))?;
    }

    if !args.no_chart {
        if session.ledger().is_empty() {
            warn!("no sightings recorded; the chart only shows its axes");
        }
        let written = session
            .export(None)
            .with_context(|| format!("exporting chart to {}", session.default_output().display()))?;
        console.publish_status(&format!("Chart saved to {}", written.display()))?;
    }

    let metrics = session.metrics().snapshot();
    console.publish_status(&format!(
        "Sightings accepted {}, rejected {}, charts exported {}",
        metrics.accepted, metrics.rejected, metrics.exports
    ))?;

    Ok(())
}
