//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use gatehouse_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not reach the door controller")]
    #[diagnostic(
        code(gatehouse::connection_failed),
        help(
            "Check that the controller is running and accessible.\n\
             Try: gatehouse status --insecure"
        )
    )]
    ConnectionFailed {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Request timed out")]
    #[diagnostic(
        code(gatehouse::timeout),
        help("Increase timeout with --timeout or check controller responsiveness.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────

    #[error("The controller rejected the access token (HTTP {status})")]
    #[diagnostic(
        code(gatehouse::auth_failed),
        help(
            "Verify the token for the active profile.\n\
             Set GATEHOUSE_TOKEN or configure token_env in your profile."
        )
    )]
    AuthFailed { status: u16 },

    #[error("No access token configured for profile '{profile}'")]
    #[diagnostic(
        code(gatehouse::no_token),
        help(
            "Set the environment variable named by the profile's token_env,\n\
             or pass --token / GATEHOUSE_TOKEN."
        )
    )]
    NoToken { profile: String },

    // ── Capabilities ─────────────────────────────────────────────────

    #[error("The controller does not advertise a '{rel}' capability")]
    #[diagnostic(
        code(gatehouse::missing_capability),
        help(
            "The entrypoint carried no '{rel}' link relation.\n\
             The controller may be an older firmware or a different product."
        )
    )]
    MissingCapability { rel: String },

    // ── Remote ───────────────────────────────────────────────────────

    #[error("Controller error (HTTP {status}): {message}")]
    #[diagnostic(code(gatehouse::remote_error))]
    Remote { status: u16, message: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(gatehouse::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(gatehouse::profile_not_found),
        help("List profiles with: gatehouse config profiles")
    )]
    ProfileNotFound { name: String },

    #[error("No controller configured")]
    #[diagnostic(
        code(gatehouse::no_config),
        help(
            "Pass --controller <URL>, set GATEHOUSE_CONTROLLER, or create a profile.\n\
             Config file expected at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(gatehouse::config))]
    Config(#[from] gatehouse_config::ConfigError),

    // ── Interactive ──────────────────────────────────────────────────

    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(code(gatehouse::confirmation_required), help("Use --yes (-y) to confirm."))]
    ConfirmationRequired { action: String },

    // ── Internal ─────────────────────────────────────────────────────

    #[error("Internal error: {0}")]
    #[diagnostic(code(gatehouse::internal))]
    Internal(String),

    // ── IO / Serialization ───────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Serialization failed: {0}")]
    #[diagnostic(code(gatehouse::json))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::NoToken { .. } => exit_code::AUTH,
            Self::MissingCapability { .. } | Self::ProfileNotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::ConfirmationRequired { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::MissingLink { rel } => CliError::MissingCapability { rel },

            CoreError::Transport(api_err) => {
                if api_err.is_timeout() {
                    CliError::Timeout
                } else {
                    CliError::ConnectionFailed {
                        source: Box::new(api_err),
                    }
                }
            }

            CoreError::Remote { status, message } => {
                if status == 401 || status == 403 {
                    CliError::AuthFailed { status }
                } else {
                    CliError::Remote { status, message }
                }
            }

            CoreError::InvalidState(message) => CliError::Internal(message.into()),

            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },
        }
    }
}
