// ── Runtime connection configuration ──
//
// These types describe *how* to reach a door controller. They carry
// credential data and connection tuning, but never touch disk. The CLI
// constructs a `ControllerConfig` and hands it in.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

/// Default delay between poll cycles, measured from the end of the
/// previous cycle.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// How to authenticate with a controller.
///
/// The token is supplied externally (minting it from a shared secret is
/// out of scope for this layer).
#[derive(Debug, Clone)]
pub enum AuthCredentials {
    /// Bearer token sent on every request.
    Token(SecretString),
    /// No authentication (open controllers on trusted networks).
    Anonymous,
}

/// TLS verification strategy.
#[derive(Debug, Clone, Default)]
pub enum TlsVerification {
    /// System CA store (strict).
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (self-signed certs). Default for local controllers.
    #[default]
    DangerAcceptInvalid,
}

/// Configuration for connecting to a single door controller.
///
/// Built by the CLI, passed to `DoorController` -- core never reads
/// config files. On a host or credential change, build a fresh config
/// and call [`DoorController::clear_cache`](crate::DoorController::clear_cache)
/// before issuing further operations.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Controller root URL (e.g., `http://doors.local:8080`).
    pub url: Url,
    /// Authentication credentials.
    pub auth: AuthCredentials,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Request timeout.
    pub timeout: Duration,
    /// Delay between state poll cycles.
    pub poll_interval: Duration,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            url: "http://192.168.1.1:8080"
                .parse()
                .expect("default controller URL is valid"),
            auth: AuthCredentials::Anonymous,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}
