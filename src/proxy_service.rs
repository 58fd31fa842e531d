pub mod api_key;
pub mod headers;
pub mod proxy_config;
pub mod proxy_error;
pub mod proxy_factory;
pub mod proxy_route_service;
pub mod responses;
pub mod target_url;

pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";

pub const API_KEY_HEADER: &str = "x-goog-api-key";
pub const API_KEY_QUERY_PARAM: &str = "key";

/// Inbound headers copied to the upstream request. Everything else is dropped.
pub const ALLOWED_FORWARD_HEADERS: [&str; 2] = ["content-type", "x-goog-api-version"];

pub const HTTP_METHODS_WITHOUT_BODY: [&str; 2] = ["GET", "HEAD"];

#[inline]
pub fn requires_body(method: &str) -> bool {
  !HTTP_METHODS_WITHOUT_BODY.contains(&method)
}
