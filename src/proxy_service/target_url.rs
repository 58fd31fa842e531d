use url::{form_urlencoded, ParseError, Url};

use crate::proxy_service::API_KEY_QUERY_PARAM;

/// Joins the upstream base with the inbound path and query.
///
/// Query parameters are kept as they arrived, except every `key` parameter which is dropped
/// and replaced by a single `key=<api_key>` at the end.
pub fn build_target_url(
  upstream_base: &str,
  path: &str,
  query: &str,
  api_key: &str,
) -> Result<Url, ParseError> {
  let mut url = Url::parse(&format!("{}{}", upstream_base.trim_end_matches('/'), path))?;

  let retained = query
    .split('&')
    .filter(|segment| !segment.is_empty() && !is_key_param(segment))
    .collect::<Vec<&str>>()
    .join("&");

  url.set_query((!retained.is_empty()).then_some(retained.as_str()));
  url.query_pairs_mut().append_pair(API_KEY_QUERY_PARAM, api_key);

  Ok(url)
}

#[inline]
fn is_key_param(segment: &str) -> bool {
  form_urlencoded::parse(segment.as_bytes())
    .next()
    .is_some_and(|(name, _)| name == API_KEY_QUERY_PARAM)
}
