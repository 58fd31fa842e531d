use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use crate::config_file::ConfigFile;
use crate::http_client::HttpClientConfig;
use crate::proxy_service::proxy_config::ProxyConfig;
use crate::proxy_service::GEMINI_API_BASE;

#[derive(Parser, Debug)]
#[command(name = "gemini_proxy", version, about = "Forwarding proxy for the Gemini API")]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
  #[command(subcommand)]
  pub command: Option<Command>,

  #[command(flatten)]
  pub serve: ServeArgs,
}

#[derive(Subcommand, Debug)]
pub enum Command {
  /// Run the proxy (default).
  Serve(ServeArgs),
  /// Probe a running proxy with real Gemini calls.
  Check(CheckArgs),
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct ServeArgs {
  #[arg(long, env = "HTTP_BIND", default_value = "0.0.0.0")]
  pub bind: String,

  #[arg(long, env = "HTTP_PORT", default_value_t = 8787)]
  pub port: u16,

  #[arg(long, env = "HTTP_WORKER_COUNT", default_value_t = 4)]
  pub workers: usize,

  /// YAML file with upstream and outbound proxy settings.
  #[arg(long, env = "PROXY_CONF_LOCATION")]
  pub config: Option<PathBuf>,

  /// Fallback key used when a request carries none.
  #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
  pub api_key: Option<String>,

  #[arg(long, env = "GEMINI_API_BASE")]
  pub upstream_url: Option<String>,

  /// Total timeout for one upstream call, in seconds.
  #[arg(long, env = "UPSTREAM_TIMEOUT_SECS")]
  pub upstream_timeout: Option<u64>,

  #[arg(long, env = "HTTP_PROXY_URL")]
  pub proxy_url: Option<String>,

  #[arg(long, env = "HTTP_PROXY_USER")]
  pub proxy_user: Option<String>,

  #[arg(long, env = "HTTP_PROXY_PASS", hide_env_values = true)]
  pub proxy_pass: Option<String>,
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct CheckArgs {
  #[arg(long, env = "PROXY_URL", default_value = "http://localhost:8787")]
  pub proxy_url: String,

  #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
  pub api_key: String,

  #[arg(long, default_value = "gemini-flash-latest")]
  pub model: String,
}

impl ServeArgs {
  pub fn into_configs(self, file: ConfigFile) -> (ProxyConfig, HttpClientConfig) {
    let upstream_url = self
      .upstream_url
      .or(file.upstream_url)
      .unwrap_or_else(|| GEMINI_API_BASE.to_string());
    let api_key = self.api_key.or(file.api_key);

    let proxy_config = ProxyConfig::new(&upstream_url, api_key.as_deref());
    let client_config = HttpClientConfig {
      http_proxy: self.proxy_url.or(file.http_proxy),
      user: self.proxy_user.or(file.http_proxy_user),
      pass: self.proxy_pass.or(file.http_proxy_pass),
      timeout: self
        .upstream_timeout
        .or(file.upstream_timeout_secs)
        .map(Duration::from_secs),
    };

    (proxy_config, client_config)
  }
}
