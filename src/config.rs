//! Gateway configuration loaded from environment variables.
//!
//! All settings come from environment variables. The binary loads a
//! `.env` file with `dotenvy` once, before tracing starts. Contract ids
//! are parsed as [`Address`]es at load time so a typo fails the boot
//! rather than the first request.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, bail};

use crate::domain::{Address, ONE_VARA};
use crate::service::SettlingDelays;
use crate::service::launch_service::{DEFAULT_REGISTERED_TOKEN, LaunchOptions};

const EMBEDDED_FACTORY_IDL: &str = include_str!("../idl/factory.idl");
const EMBEDDED_POOL_FACTORY_IDL: &str = include_str!("../idl/pool_factory.idl");

/// API-key settings for the HTTP surface.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct AuthConfig {
    /// Whether requests to protected routes must carry the key.
    pub enabled: bool,
    /// Expected value of the `api-key` header.
    pub api_key: Option<String>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("enabled", &self.enabled)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Top-level gateway configuration.
///
/// Loaded once at startup via [`GatewayConfig::from_env`].
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:3000`).
    pub listen_addr: SocketAddr,
    /// Ledger node endpoint, reported by the health check.
    pub network: String,
    /// Endpoint of the JSON-RPC signing bridge.
    pub ledger_rpc_url: String,
    /// Program factory contract.
    pub factory_contract_id: Address,
    /// Pool factory contract.
    pub pool_factory_contract_id: Address,
    /// Interface description of the program factory.
    pub factory_idl: Arc<str>,
    /// Interface description of the pool factory.
    pub pool_factory_idl: Arc<str>,
    /// Keyring account the bridge signs with.
    pub wallet_name: String,
    /// API-key settings.
    pub auth: AuthConfig,
    /// Call value, settling delays and default quote token.
    pub launch: LaunchOptions,
    /// Timeout of a single bridge request, including finalization waits.
    pub rpc_timeout: Duration,
    /// Timeout of a whole HTTP request.
    pub request_timeout: Duration,
    /// CORS origins; empty means permissive.
    pub allowed_origins: Vec<String>,
}

impl GatewayConfig {
    /// Loads configuration from the process environment.
    ///
    /// Does not read `.env`; the caller loads it first.
    ///
    /// # Errors
    ///
    /// See [`GatewayConfig::from_lookup`].
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing, a value does not
    /// parse, an IDL file cannot be read, or auth is enabled without an
    /// `API_KEY`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .with_context(|| format!("missing required environment variable {key}"))
        };

        let mut listen_addr: SocketAddr =
            parse_or(&lookup, "LISTEN_ADDR", SocketAddr::from(([0, 0, 0, 0], 3000)))?;
        if let Some(port) = parse_opt::<u16>(&lookup, "PORT")? {
            listen_addr.set_port(port);
        }

        let factory_contract_id = required("FACTORY_CONTRACT_ID")?
            .parse::<Address>()
            .context("FACTORY_CONTRACT_ID is not a valid address")?;
        let pool_factory_contract_id = required("POOL_FACTORY_CONTRACT_ID")?
            .parse::<Address>()
            .context("POOL_FACTORY_CONTRACT_ID is not a valid address")?;

        let auth = AuthConfig {
            enabled: parse_bool(&lookup, "AUTH_ENABLED", false)?,
            api_key: lookup("API_KEY").filter(|k| !k.is_empty()),
        };
        if auth.enabled && auth.api_key.is_none() {
            bail!("AUTH_ENABLED is set but API_KEY is missing");
        }

        let launch = LaunchOptions {
            call_value: parse_or(&lookup, "CALL_VALUE", ONE_VARA)?,
            delays: SettlingDelays {
                post_mint: Duration::from_millis(parse_or(&lookup, "POST_MINT_SETTLE_MS", 2_000)?),
                post_pool: Duration::from_millis(parse_or(&lookup, "POST_POOL_SETTLE_MS", 3_000)?),
            },
            default_registered_token: parse_or(
                &lookup,
                "DEFAULT_REGISTERED_TOKEN",
                DEFAULT_REGISTERED_TOKEN,
            )?,
        };

        let allowed_origins = lookup("ALLOWED_ORIGINS")
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            listen_addr,
            network: required("VARA_NETWORK")?,
            ledger_rpc_url: required("LEDGER_RPC_URL")?,
            factory_contract_id,
            pool_factory_contract_id,
            factory_idl: load_idl(&lookup, "FACTORY_IDL_PATH", EMBEDDED_FACTORY_IDL)?,
            pool_factory_idl: load_idl(&lookup, "POOL_FACTORY_IDL_PATH", EMBEDDED_POOL_FACTORY_IDL)?,
            wallet_name: required("WALLET_NAME")?,
            auth,
            launch,
            rpc_timeout: Duration::from_secs(parse_or(&lookup, "RPC_TIMEOUT_SECS", 60)?),
            request_timeout: Duration::from_secs(parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 180)?),
            allowed_origins,
        })
    }
}

/// Parses `key` as `T` if it is set.
fn parse_opt<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> anyhow::Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .map(|v| {
            v.trim()
                .parse()
                .map_err(|e| anyhow::anyhow!("invalid value for {key}: {e}"))
        })
        .transpose()
}

/// Parses `key` as `T`, returning `default` when it is not set.
fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    Ok(parse_opt(lookup, key)?.unwrap_or(default))
}

/// Parses a boolean. Accepts `true`/`1`/`false`/`0`, case-insensitive.
fn parse_bool(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: bool,
) -> anyhow::Result<bool> {
    match lookup(key).map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        None | Some("") => Ok(default),
        Some("true" | "1") => Ok(true),
        Some("false" | "0") => Ok(false),
        Some(other) => bail!("invalid value for {key}: {other}"),
    }
}

fn load_idl(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    embedded: &str,
) -> anyhow::Result<Arc<str>> {
    match lookup(key).filter(|p| !p.is_empty()) {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("reading {key} from {path}"))?;
            Ok(Arc::from(text))
        }
        None => Ok(Arc::from(embedded)),
    }
}
