//! Statistics command handlers.

use tabled::Tabled;

use gatehouse_api::{DoorStatistics, StatsEntry};
use gatehouse_core::DoorController;

use crate::cli::{GlobalOpts, StatsArgs, StatsCommand};
use crate::error::CliError;
use crate::output;

pub async fn handle(
    controller: &DoorController,
    args: StatsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        StatsCommand::Show => show(controller, global).await,
        StatsCommand::Reset { yes } => reset(controller, global, yes).await,
    }
}

#[derive(Tabled)]
struct StatsRow {
    #[tabled(rename = "Movement")]
    movement: &'static str,
    #[tabled(rename = "Min (s)")]
    min: f64,
    #[tabled(rename = "Max (s)")]
    max: f64,
    #[tabled(rename = "Avg (s)")]
    avg: f64,
}

impl StatsRow {
    fn new(movement: &'static str, entry: &StatsEntry) -> Self {
        Self {
            movement,
            min: entry.min,
            max: entry.max,
            avg: entry.avg,
        }
    }
}

async fn show(controller: &DoorController, global: &GlobalOpts) -> Result<(), CliError> {
    let stats = controller.statistics().await?;

    let rendered = output::render_single(
        &global.output,
        &stats,
        render_stats_table,
        |s| format!("{} {} {}", s.opening.avg, s.closing.avg, since_line(s)),
    )?;
    output::print_output(&rendered, global.quiet);
    Ok(())
}

fn render_stats_table(stats: &DoorStatistics) -> String {
    let rows = vec![
        StatsRow::new("opening", &stats.opening),
        StatsRow::new("closing", &stats.closing),
    ];
    let table = tabled::Table::new(rows)
        .with(tabled::settings::Style::rounded())
        .to_string();

    match stats.since {
        Some(since) => format!("{table}\nrecorded since {since}"),
        None => table,
    }
}

fn since_line(stats: &DoorStatistics) -> String {
    match stats.since {
        Some(t) => t.to_rfc3339(),
        None => String::new(),
    }
}

async fn reset(
    controller: &DoorController,
    global: &GlobalOpts,
    yes: bool,
) -> Result<(), CliError> {
    if !yes {
        return Err(CliError::ConfirmationRequired {
            action: "stats reset".into(),
        });
    }

    controller.reset_statistics().await?;
    output::print_output("statistics deleted", global.quiet);
    Ok(())
}
