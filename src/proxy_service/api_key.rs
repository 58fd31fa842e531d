use actix_web::HttpRequest;
use url::form_urlencoded;

use crate::proxy_service::proxy_config::ProxyConfig;
use crate::proxy_service::{API_KEY_HEADER, API_KEY_QUERY_PARAM};

type KeySource = fn(&HttpRequest, &ProxyConfig) -> Option<String>;

/// Lookup order: request header, then query parameter, then the configured fallback.
const KEY_SOURCES: [KeySource; 3] = [from_header, from_query, from_config];

pub fn resolve_api_key(request: &HttpRequest, config: &ProxyConfig) -> Option<String> {
  KEY_SOURCES
    .iter()
    .find_map(|source| source(request, config))
}

// Any present header value counts. Bytes that are not UTF-8 are read as Latin-1.
fn from_header(request: &HttpRequest, _: &ProxyConfig) -> Option<String> {
  let value = request.headers().get(API_KEY_HEADER)?.as_bytes();

  if value.is_empty() {
    return None;
  }

  match std::str::from_utf8(value) {
    Ok(text) => Some(String::from(text)),
    Err(_) => Some(value.iter().map(|&byte| char::from(byte)).collect()),
  }
}

// Only the first `key` parameter counts, an empty one falls through.
fn from_query(request: &HttpRequest, _: &ProxyConfig) -> Option<String> {
  form_urlencoded::parse(request.query_string().as_bytes())
    .find(|(name, _)| name == API_KEY_QUERY_PARAM)
    .map(|(_, value)| value.into_owned())
    .filter(|value| !value.is_empty())
}

fn from_config(_: &HttpRequest, config: &ProxyConfig) -> Option<String> {
  config.api_key.as_deref().map(String::from)
}
