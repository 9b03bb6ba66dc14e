//! `guise` CLI - generate browser header profiles and send requests with them

mod cmd;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use guise::config::HeaderDefaults;
use guise::{BrowserRestriction, ClientOptions, Config, GenerationOptions, OsTarget};

#[derive(Parser)]
#[command(name = "guise")]
#[command(about = "Browser-shaped HTTP headers and a scanning-friendly HTTP client")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Config file (default: ~/.config/guise/config.toml, or $GUISE_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print generated header profiles
    Headers {
        #[command(flatten)]
        headers: HeaderArgs,

        /// Target URL; its host becomes the Host header
        #[arg(short, long)]
        url: Option<String>,

        /// Number of profiles to generate
        #[arg(short = 'n', long, default_value = "1")]
        count: usize,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// GET a URL with a generated profile
    Fetch {
        /// URL to fetch
        url: String,

        #[command(flatten)]
        headers: HeaderArgs,

        /// Maximum connections per host
        #[arg(long)]
        connections: Option<usize>,

        /// Proxy URL (http, https or socks5)
        #[arg(short, long)]
        proxy: Option<String>,

        /// Request timeout in milliseconds
        #[arg(short, long)]
        timeout: Option<u64>,

        /// Follow redirects instead of returning them
        #[arg(long)]
        follow_redirects: bool,

        /// Verify TLS certificates
        #[arg(long)]
        verify_tls: bool,

        /// Show response headers
        #[arg(short = 'H', long)]
        show_headers: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

/// Flags shared by every command that generates headers.
#[derive(Args, Debug, Default)]
struct HeaderArgs {
    /// Operating system to imitate: windows, macos, linux or random
    #[arg(long)]
    os: Option<String>,

    /// Only imitate Chrome (wins over --firefox-only)
    #[arg(long)]
    chrome_only: bool,

    /// Only imitate Firefox
    #[arg(long)]
    firefox_only: bool,

    /// Custom headers as space-delimited name=value pairs
    #[arg(short = 'c', long)]
    custom_headers: Option<String>,

    /// Header names to suppress, space-delimited
    #[arg(short = 's', long)]
    suppress: Option<String>,
}

impl HeaderArgs {
    /// Merge with config defaults. Flags win; CLI overrides are declared first
    /// so they take precedence over config overrides of the same name.
    fn to_options(&self, defaults: &HeaderDefaults) -> GenerationOptions {
        let os = self
            .os
            .as_deref()
            .map_or(defaults.os, OsTarget::parse_lenient);
        let browser = if self.chrome_only || self.firefox_only {
            BrowserRestriction::from_flags(self.chrome_only, self.firefox_only)
        } else {
            defaults.browser
        };

        GenerationOptions::default()
            .with_os(os)
            .with_browser(browser)
            .with_custom_headers(self.custom_headers.as_deref().unwrap_or_default())
            .with_custom_headers(&defaults.custom_headers)
            .with_suppressed_headers(self.suppress.as_deref().unwrap_or_default())
            .with_suppressed_headers(&defaults.suppress_headers)
    }
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    /// `Name: value` lines
    #[default]
    Text,
    /// JSON object per profile
    Json,
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::load_from(&path),
        None => Config::load(),
    };
    config.context("failed to load configuration")
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config)?;

    match cli.command {
        Commands::Headers {
            headers,
            url,
            count,
            seed,
            format,
        } => {
            let mut options = headers.to_options(&config.headers);
            if let Some(url) = url {
                options = options.with_target_url(url);
            }
            cmd::cmd_headers(&options, count, seed, format)?;
        }
        Commands::Fetch {
            url,
            headers,
            connections,
            proxy,
            timeout,
            follow_redirects,
            verify_tls,
            show_headers,
            format,
        } => {
            let transport = transport_options(
                config.client,
                connections,
                proxy.as_deref(),
                timeout,
                follow_redirects,
                verify_tls,
            );
            let generation = headers.to_options(&config.headers);
            cmd::cmd_fetch(&url, &transport, generation, show_headers, format).await?;
        }
    }

    Ok(())
}

fn transport_options(
    base: ClientOptions,
    connections: Option<usize>,
    proxy: Option<&str>,
    timeout: Option<u64>,
    follow_redirects: bool,
    verify_tls: bool,
) -> ClientOptions {
    let mut options = base;
    if let Some(n) = connections {
        options = options.with_connections(n);
    }
    if let Some(p) = proxy {
        options = options.with_proxy(p);
    }
    if let Some(ms) = timeout {
        options = options.with_timeout_ms(ms);
    }
    if follow_redirects {
        options = options.with_allow_redirects(true);
    }
    if verify_tls {
        options = options.with_verify_tls(true);
    }
    options
}
