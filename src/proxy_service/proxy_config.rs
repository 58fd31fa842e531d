use crate::proxy_service::GEMINI_API_BASE;

/// Per-process forwarding settings, shared read-only by every service instance.
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyConfig {
  pub upstream_url: Box<str>,
  pub api_key: Option<Box<str>>,
}

impl Default for ProxyConfig {
  fn default() -> Self {
    Self {
      upstream_url: Box::from(GEMINI_API_BASE),
      api_key: None,
    }
  }
}

impl ProxyConfig {
  pub fn new(upstream_url: &str, api_key: Option<&str>) -> Self {
    Self {
      upstream_url: Box::from(upstream_url),
      api_key: api_key.filter(|key| !key.is_empty()).map(Box::from),
    }
  }
}
