//! Command dispatch: bridges CLI args -> controller operations -> output.

pub mod config_cmd;
pub mod door;
pub mod logs;
pub mod stats;

use gatehouse_core::DoorController;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a controller-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    controller: &DoorController,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Status => door::status(controller, global).await,
        Command::Open => door::open(controller, global).await,
        Command::Close => door::close(controller, global).await,
        Command::Operate => door::operate(controller, global).await,
        Command::Watch(_) => door::watch(controller, global).await,
        Command::Stats(args) => stats::handle(controller, args, global).await,
        Command::Logs(args) => logs::handle(controller, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
