//! CLI-side configuration resolution.
//!
//! `gatehouse-config` owns the TOML schema and the token chain; this
//! module layers CLI flag precedence (flag > env > profile) on top and
//! hands core a fully-built `ControllerConfig`.

use std::time::Duration;

use secrecy::SecretString;

use gatehouse_config::{Config, Profile, load_config_or_default, profile_to_controller_config};
use gatehouse_core::{AuthCredentials, ControllerConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Build a `ControllerConfig` from the config file, the active profile,
/// and CLI flag overrides.
pub fn build_controller_config(global: &GlobalOpts) -> Result<ControllerConfig, CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    let mut config = match cfg.profiles.get(&profile_name) {
        Some(profile) => resolve_profile(profile, &profile_name, &cfg)?,
        // An explicitly requested profile must exist; the implicit
        // default may fall back to flags alone.
        None if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound { name: profile_name });
        }
        None => config_from_flags(global)?,
    };

    apply_flag_overrides(&mut config, global)?;
    Ok(config)
}

fn resolve_profile(
    profile: &Profile,
    profile_name: &str,
    cfg: &Config,
) -> Result<ControllerConfig, CliError> {
    Ok(profile_to_controller_config(
        profile,
        profile_name,
        &cfg.defaults,
    )?)
}

/// No profile found: the controller URL must come from --controller or
/// the environment.
fn config_from_flags(global: &GlobalOpts) -> Result<ControllerConfig, CliError> {
    let url_str = global
        .controller
        .as_deref()
        .ok_or_else(|| CliError::NoConfig {
            path: gatehouse_config::config_path().display().to_string(),
        })?;

    let url: url::Url = url_str.parse().map_err(|_| CliError::Validation {
        field: "controller".into(),
        reason: format!("invalid URL: {url_str}"),
    })?;

    Ok(ControllerConfig {
        url,
        ..ControllerConfig::default()
    })
}

/// CLI flags always win over the profile.
fn apply_flag_overrides(
    config: &mut ControllerConfig,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if let Some(ref url_str) = global.controller {
        config.url = url_str.parse().map_err(|_| CliError::Validation {
            field: "controller".into(),
            reason: format!("invalid URL: {url_str}"),
        })?;
    }

    if let Some(ref token) = global.token {
        config.auth = AuthCredentials::Token(SecretString::from(token.clone()));
    }

    if global.insecure {
        config.tls = TlsVerification::DangerAcceptInvalid;
    }

    config.timeout = Duration::from_secs(global.timeout);
    Ok(())
}
