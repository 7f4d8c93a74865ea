//! Operation log command handler.

use tabled::Tabled;

use gatehouse_api::LogEntry;
use gatehouse_core::DoorController;

use crate::cli::{GlobalOpts, LogsArgs};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct LogRow {
    #[tabled(rename = "Time")]
    timestamp: String,
    #[tabled(rename = "Action")]
    action: String,
}

fn to_row(entry: &LogEntry) -> LogRow {
    LogRow {
        timestamp: entry.timestamp.clone(),
        action: entry.action.clone(),
    }
}

pub async fn handle(
    controller: &DoorController,
    args: LogsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let logs = controller
        .logs(Some(args.page_size), Some(args.start_index))
        .await?;

    if logs.entries.is_empty() {
        output::print_output("no log entries", global.quiet);
        return Ok(());
    }

    let rendered = output::render_list(
        &global.output,
        &logs.entries,
        to_row,
        |e| format!("{} {}", e.timestamp, e.action),
    )?;
    output::print_output(&rendered, global.quiet);
    Ok(())
}
