//! Configuration command handlers. These never touch the controller.

use gatehouse_config::{config_path, load_config, save_config};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::active_profile_name;
use crate::error::CliError;
use crate::output;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => show(global),
        ConfigCommand::Path => {
            output::print_output(&config_path().display().to_string(), global.quiet);
            Ok(())
        }
        ConfigCommand::Profiles => profiles(global),
        ConfigCommand::Use { name } => use_profile(&name, global),
    }
}

fn show(global: &GlobalOpts) -> Result<(), CliError> {
    let mut cfg = load_config()?;

    // Never echo stored secrets.
    for profile in cfg.profiles.values_mut() {
        if profile.token.is_some() {
            profile.token = Some("<redacted>".into());
        }
    }

    let toml_str = toml::to_string_pretty(&cfg).map_err(gatehouse_config::ConfigError::from)?;
    output::print_output(&toml_str, global.quiet);
    Ok(())
}

fn profiles(global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = load_config()?;
    let active = active_profile_name(global, &cfg);

    let mut names: Vec<&String> = cfg.profiles.keys().collect();
    names.sort();

    let lines: Vec<String> = names
        .into_iter()
        .map(|name| {
            if *name == active {
                format!("* {name}")
            } else {
                format!("  {name}")
            }
        })
        .collect();

    if lines.is_empty() {
        output::print_output("no profiles configured", global.quiet);
    } else {
        output::print_output(&lines.join("\n"), global.quiet);
    }
    Ok(())
}

fn use_profile(name: &str, global: &GlobalOpts) -> Result<(), CliError> {
    let mut cfg = load_config()?;

    if !cfg.profiles.contains_key(name) {
        return Err(CliError::ProfileNotFound { name: name.into() });
    }

    cfg.default_profile = Some(name.into());
    save_config(&cfg)?;
    output::print_output(&format!("default profile set to '{name}'"), global.quiet);
    Ok(())
}
