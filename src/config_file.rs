use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::ErrorKind;

/// Optional YAML settings. Command line flags and environment variables take precedence.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
  pub upstream_url: Option<String>,
  pub api_key: Option<String>,
  pub upstream_timeout_secs: Option<u64>,
  pub http_proxy: Option<String>,
  pub http_proxy_user: Option<String>,
  pub http_proxy_pass: Option<String>,
}

impl ConfigFile {
  pub fn load_from_file(file: &File) -> Result<ConfigFile, std::io::Error> {
    let config: ConfigFile =
      serde_yaml::from_reader(file).map_err(|err| std::io::Error::new(ErrorKind::InvalidData, err))?;

    Ok(config)
  }
}
