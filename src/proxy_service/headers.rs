use actix_web::http::header::HeaderMap as InboundHeaders;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, InvalidHeaderValue};

use crate::proxy_service::{ALLOWED_FORWARD_HEADERS, API_KEY_HEADER};

pub fn prepare_headers(source: &InboundHeaders, api_key: &str) -> Result<HeaderMap, InvalidHeaderValue> {
  let mut header_map = HeaderMap::new();

  for name in ALLOWED_FORWARD_HEADERS {
    let value = source
      .get(name)
      .filter(|value| !value.is_empty())
      .and_then(|value| HeaderValue::from_bytes(value.as_bytes()).ok());

    if let Some(value) = value {
      header_map.insert(HeaderName::from_static(name), value);
    }
  }

  header_map.insert(HeaderName::from_static(API_KEY_HEADER), HeaderValue::from_str(api_key)?);

  Ok(header_map)
}
