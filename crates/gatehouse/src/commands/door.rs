//! Door state and trigger command handlers.

use gatehouse_api::DoorAction;
use gatehouse_core::{DoorController, StatePoller};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

/// `gatehouse status` -- one state fetch, rendered.
pub async fn status(controller: &DoorController, global: &GlobalOpts) -> Result<(), CliError> {
    let state = controller.state().await?;
    let color = output::should_color(&global.color);

    let rendered = output::render_single(
        &global.output,
        &state,
        |s| format!("door is {}", output::colorize_state(&s.state, color)),
        |s| s.state.clone(),
    )?;
    output::print_output(&rendered, global.quiet);
    Ok(())
}

/// `gatehouse open`
pub async fn open(controller: &DoorController, global: &GlobalOpts) -> Result<(), CliError> {
    let action = controller.open().await?;
    print_action(&action, "open", global)
}

/// `gatehouse close`
pub async fn close(controller: &DoorController, global: &GlobalOpts) -> Result<(), CliError> {
    let action = controller.close().await?;
    print_action(&action, "close", global)
}

/// `gatehouse operate` -- toggle; the controller decides the direction.
pub async fn operate(controller: &DoorController, global: &GlobalOpts) -> Result<(), CliError> {
    controller.operate().await?;
    output::print_output("operate command accepted", global.quiet);
    Ok(())
}

fn print_action(action: &DoorAction, verb: &str, global: &GlobalOpts) -> Result<(), CliError> {
    let rendered = output::render_single(
        &global.output,
        action,
        |a| match a.action.as_deref() {
            Some(started) => started.to_string(),
            None => format!("{verb} command accepted"),
        },
        |a| a.action.clone().unwrap_or_default(),
    )?;
    output::print_output(&rendered, global.quiet);
    Ok(())
}

/// `gatehouse watch` -- start the poller and stream settled state
/// changes until Ctrl-C.
pub async fn watch(controller: &DoorController, global: &GlobalOpts) -> Result<(), CliError> {
    let color = output::should_color(&global.color);
    let mut rx = controller.subscribe_state();
    let poller = StatePoller::new(controller.clone());

    poller.start().await;
    if !global.quiet {
        eprintln!("watching door state (Ctrl-C to stop)");
    }

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = rx.borrow_and_update().clone();
                if let Some(state) = state {
                    let line = format!(
                        "{}  {}",
                        chrono::Local::now().format("%H:%M:%S"),
                        output::colorize_state(&state.state, color),
                    );
                    output::print_output(&line, global.quiet);
                }
            }
        }
    }

    poller.stop().await;
    Ok(())
}
