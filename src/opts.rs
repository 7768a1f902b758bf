//! CLI options.

use clap::{Args, Parser, ValueEnum};
use poem::web::cookie::CookieKey;

use crate::prelude::*;

pub mod parsers;

#[derive(Parser)]
#[command(author, version, about)]
pub struct Opts {
    #[command(flatten)]
    pub logging: LoggingOpts,

    #[command(flatten)]
    pub web: WebOpts,
}

/// Sentry and log output.
#[derive(Args)]
pub struct LoggingOpts {
    /// Sentry DSN
    #[arg(short, long, env = "LINREG_SENTRY_DSN")]
    pub sentry_dsn: Option<String>,

    /// Performance monitoring sample rate for Sentry
    #[arg(
        long,
        default_value = "0",
        env = "LINREG_TRACES_SAMPLE_RATE",
        value_parser = parsers::sample_rate,
    )]
    pub traces_sample_rate: f32,

    /// Console log filter, in the `tracing-subscriber` directive syntax
    #[arg(long, default_value = "linreg=info,poem=info", env = "LINREG_LOG")]
    pub log: String,

    /// Filter of the spans and events forwarded to Sentry
    #[arg(long, default_value = "linreg=trace", env = "LINREG_SENTRY_LOG")]
    pub sentry_log: String,
}

/// Runs the web application.
#[derive(Args)]
pub struct WebOpts {
    /// Web application bind host
    #[arg(long, default_value = "::", env = "LINREG_HOST")]
    pub host: String,

    /// Web application bind port
    #[arg(short, long, default_value = "5000", env = "LINREG_PORT")]
    pub port: u16,

    /// Per-caller state storage
    #[arg(long, value_enum, default_value = "memory", env = "LINREG_STORE")]
    pub store: Store,

    /// Redis URI, used with `--store redis`
    #[arg(long, default_value = "redis://127.0.0.1/0", env = "LINREG_REDIS_URI")]
    pub redis_uri: String,

    /// Redis connection pool size
    #[arg(
        long,
        default_value = "2",
        env = "LINREG_REDIS_POOL_SIZE",
        value_parser = parsers::non_zero_usize,
    )]
    pub redis_pool_size: usize,

    /// Hex-encoded 64-byte key to encrypt the cookies with, random if not set
    #[arg(long, env = "LINREG_COOKIE_KEY", value_parser = parsers::cookie_key, hide_env_values = true)]
    pub cookie_key: Option<CookieKey>,

    /// Idle session lifetime
    #[arg(
        long,
        default_value = "1d",
        env = "LINREG_SESSION_TTL",
        value_parser = humantime::parse_duration,
    )]
    pub session_ttl: StdDuration,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Store {
    /// In-process map, lost on restart
    Memory,

    /// Private cookies on the client side
    Cookie,

    /// Shared Redis instance
    Redis,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_ok() {
        Opts::command().debug_assert();
    }

    #[test]
    fn defaults_ok() -> Result {
        let opts = Opts::try_parse_from(["linreg"])?;
        assert_eq!(opts.web.port, 5000);
        assert_eq!(opts.web.store, Store::Memory);
        assert_eq!(opts.web.session_ttl, StdDuration::from_secs(86400));
        assert!(opts.web.cookie_key.is_none());
        assert_eq!(opts.logging.log, "linreg=info,poem=info");
        assert!(opts.logging.sentry_dsn.is_none());
        Ok(())
    }

    #[test]
    fn logging_ok() -> Result {
        let opts = Opts::try_parse_from([
            "linreg",
            "--log",
            "linreg=debug",
            "--traces-sample-rate",
            "0.5",
        ])?;
        assert_eq!(opts.logging.log, "linreg=debug");
        assert_eq!(opts.logging.sentry_log, "linreg=trace");
        assert_eq!(opts.logging.traces_sample_rate, 0.5);
        Ok(())
    }

    #[test]
    fn store_ok() -> Result {
        let opts = Opts::try_parse_from(["linreg", "--store", "cookie", "--session-ttl", "30m"])?;
        assert_eq!(opts.web.store, Store::Cookie);
        assert_eq!(opts.web.session_ttl, StdDuration::from_secs(1800));
        Ok(())
    }

    #[test]
    fn invalid_pool_size_fails() {
        assert!(Opts::try_parse_from(["linreg", "--redis-pool-size", "0"]).is_err());
    }
}
