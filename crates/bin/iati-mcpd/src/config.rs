use clap::{Parser, builder::BoolishValueParser};
use iati_core::upstream::{DEFAULT_BASE_URL, DEV_SUBSCRIPTION_KEY, UpstreamConfig};
use iati_mcp::server::{DEFAULT_MCP_HTTP_ADDR, McpHttpServerConfig};
use std::error::Error;
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

const DEFAULT_SSE_KEEP_ALIVE_SECS: u64 = 15;
const DEFAULT_SSE_RETRY_SECS: u64 = 3;
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Parser, Debug)]
#[command(name = "iati-mcpd", version, about = "IATI datastore MCP daemon.")]
struct CliArgs {
    #[arg(long, env = "IATI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    #[arg(long, env = "IATI_API_BASE_URL", default_value = DEFAULT_BASE_URL)]
    api_base_url: String,

    #[arg(
        long = "stdio",
        env = "IATI_ENABLE_STDIO",
        default_value_t = false,
        value_parser = BoolishValueParser::new()
    )]
    enable_stdio: bool,

    #[arg(
        long,
        env = "IATI_MCP_SERVE",
        default_value_t = true,
        value_parser = BoolishValueParser::new()
    )]
    mcp_serve: bool,

    #[arg(long, env = "IATI_MCP_HTTP_ADDR", default_value = DEFAULT_MCP_HTTP_ADDR)]
    mcp_http_addr: SocketAddr,

    #[arg(
        long,
        env = "IATI_MCP_STATEFUL",
        default_value_t = true,
        value_parser = BoolishValueParser::new()
    )]
    stateful: bool,

    #[arg(
        long,
        env = "IATI_SSE_KEEP_ALIVE_SECS",
        default_value_t = DEFAULT_SSE_KEEP_ALIVE_SECS
    )]
    sse_keep_alive_secs: u64,

    #[arg(
        long,
        env = "IATI_SSE_RETRY_SECS",
        default_value_t = DEFAULT_SSE_RETRY_SECS
    )]
    sse_retry_secs: u64,

    #[arg(long, env = "IATI_LOG", default_value = DEFAULT_LOG_FILTER)]
    log: String,
}

/// Which MCP transports the daemon serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    Stdio,
    Http,
    Both,
}

/// Runtime configuration loaded from CLI arguments and environment variables.
#[derive(Debug, Clone)]
pub struct IatiConfig {
    pub upstream: UpstreamConfig,
    pub transport: Transport,
    pub http: McpHttpServerConfig,
    pub log_filter: String,
}

#[derive(Debug)]
pub enum ConfigError {
    NoTransport,
    InvalidSetting { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoTransport => write!(
                f,
                "no transport enabled: set IATI_ENABLE_STDIO or IATI_MCP_SERVE"
            ),
            Self::InvalidSetting { name, value } => {
                write!(f, "invalid {name} value: {value}")
            }
        }
    }
}

impl Error for ConfigError {}

impl IatiConfig {
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::try_from(args)
    }
}

impl TryFrom<CliArgs> for IatiConfig {
    type Error = ConfigError;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let api_key = args
            .api_key
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEV_SUBSCRIPTION_KEY.to_string());

        let base_url = args.api_base_url.trim().to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidSetting {
                name: "IATI_API_BASE_URL",
                value: args.api_base_url,
            });
        }

        let transport = match (args.enable_stdio, args.mcp_serve) {
            (true, true) => Transport::Both,
            (true, false) => Transport::Stdio,
            (false, true) => Transport::Http,
            (false, false) => return Err(ConfigError::NoTransport),
        };

        let http = McpHttpServerConfig::new(args.mcp_http_addr)
            .with_stateful_mode(args.stateful)
            .with_sse_keep_alive(optional_secs(args.sse_keep_alive_secs))
            .with_sse_retry(optional_secs(args.sse_retry_secs));

        Ok(Self {
            upstream: UpstreamConfig::new(base_url, api_key),
            transport,
            http,
            log_filter: args.log,
        })
    }
}

/// Zero disables the interval.
const fn optional_secs(secs: u64) -> Option<Duration> {
    if secs == 0 {
        None
    } else {
        Some(Duration::from_secs(secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> CliArgs {
        CliArgs {
            api_key: None,
            api_base_url: DEFAULT_BASE_URL.to_string(),
            enable_stdio: false,
            mcp_serve: true,
            mcp_http_addr: DEFAULT_MCP_HTTP_ADDR.parse().expect("valid MCP addr"),
            stateful: true,
            sse_keep_alive_secs: DEFAULT_SSE_KEEP_ALIVE_SECS,
            sse_retry_secs: DEFAULT_SSE_RETRY_SECS,
            log: DEFAULT_LOG_FILTER.to_string(),
        }
    }

    #[test]
    fn missing_api_key_falls_back_to_dev_key() {
        let config = IatiConfig::try_from(base_args()).expect("config should parse");

        assert!(config.upstream.uses_dev_key());
        assert_eq!(config.upstream.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.transport, Transport::Http);
    }

    #[test]
    fn blank_api_key_is_treated_as_missing() {
        let mut args = base_args();
        args.api_key = Some("   ".to_string());

        let config = IatiConfig::try_from(args).expect("config should parse");

        assert_eq!(config.upstream.api_key, DEV_SUBSCRIPTION_KEY);
    }

    #[test]
    fn configured_api_key_is_used() {
        let mut args = base_args();
        args.api_key = Some("secret".to_string());

        let config = IatiConfig::try_from(args).expect("config should parse");

        assert_eq!(config.upstream.api_key, "secret");
        assert!(!format!("{:?}", config.upstream).contains("secret"));
    }

    #[test]
    fn disabling_every_transport_is_an_error() {
        let mut args = base_args();
        args.mcp_serve = false;

        assert!(matches!(
            IatiConfig::try_from(args),
            Err(ConfigError::NoTransport)
        ));
    }

    #[test]
    fn stdio_and_http_can_run_together() {
        let mut args = base_args();
        args.enable_stdio = true;

        let config = IatiConfig::try_from(args).expect("config should parse");

        assert_eq!(config.transport, Transport::Both);
    }

    #[test]
    fn zero_keep_alive_disables_sse_pings() {
        let mut args = base_args();
        args.sse_keep_alive_secs = 0;

        let config = IatiConfig::try_from(args).expect("config should parse");

        assert!(config.http.sse_keep_alive.is_none());
        assert_eq!(config.http.sse_retry, Some(Duration::from_secs(3)));
    }

    #[test]
    fn sse_retry_interval_is_configurable() {
        let mut args = base_args();
        args.sse_retry_secs = 10;
        let config = IatiConfig::try_from(args).expect("config should parse");
        assert_eq!(config.http.sse_retry, Some(Duration::from_secs(10)));

        let mut args = base_args();
        args.sse_retry_secs = 0;
        let config = IatiConfig::try_from(args).expect("config should parse");
        assert!(config.http.sse_retry.is_none());
    }

    #[test]
    fn non_http_base_url_is_rejected() {
        let mut args = base_args();
        args.api_base_url = "ftp://example.org".to_string();

        assert!(matches!(
            IatiConfig::try_from(args),
            Err(ConfigError::InvalidSetting { name: "IATI_API_BASE_URL", .. })
        ));
    }
}
