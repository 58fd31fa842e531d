use std::error::Error as StdError;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use reqwest::header::InvalidHeaderValue;
use thiserror::Error;

use crate::proxy_service::responses::{json_response, ErrorResponse};

#[derive(Debug, Error)]
pub enum ProxyError {
  #[error(
    "API key is required. Provide it via X-Goog-Api-Key header, ?key= query parameter, \
     or set GEMINI_API_KEY environment variable"
  )]
  MissingApiKey,
  #[error("{}", describe(.0))]
  Upstream(reqwest::Error),
  #[error("invalid upstream url: {0}")]
  InvalidTargetUrl(#[from] url::ParseError),
  #[error("API key is not a valid header value: {0}")]
  InvalidApiKey(#[from] InvalidHeaderValue),
  #[error("unable to read request body: {0}")]
  Payload(String),
}

// The target URL carries the API key, keep it out of messages and logs.
impl From<reqwest::Error> for ProxyError {
  fn from(err: reqwest::Error) -> Self {
    ProxyError::Upstream(err.without_url())
  }
}

fn describe(err: &reqwest::Error) -> String {
  let mut description = err.to_string();
  let mut source = err.source();

  while let Some(cause) = source {
    description.push_str(": ");
    description.push_str(&cause.to_string());
    source = cause.source();
  }

  description
}

impl ResponseError for ProxyError {
  fn status_code(&self) -> StatusCode {
    match self {
      ProxyError::MissingApiKey => StatusCode::BAD_REQUEST,
      _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let body = match self {
      ProxyError::MissingApiKey => ErrorResponse {
        error: self.to_string(),
        message: None,
      },
      _ => ErrorResponse {
        error: String::from("Proxy error"),
        message: Some(self.to_string()),
      },
    };

    json_response(self.status_code(), &body)
  }
}

#[cfg(test)]
mod tests {
  use actix_web::body::to_bytes;

  use super::*;

  #[actix_web::test]
  async fn missing_key_is_a_client_error() {
    let response = ProxyError::MissingApiKey.error_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.headers().get("access-control-allow-origin").unwrap(), "*");

    let body = to_bytes(response.into_body()).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let error = json["error"].as_str().unwrap();
    assert!(error.contains("X-Goog-Api-Key"));
    assert!(error.contains("?key="));
    assert!(error.contains("GEMINI_API_KEY"));
    assert!(json.get("message").is_none());
  }

  #[actix_web::test]
  async fn other_failures_are_proxy_errors() {
    let err: ProxyError = url::Url::parse("nowhere").unwrap_err().into();
    let response = err.error_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = to_bytes(response.into_body()).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"], "Proxy error");
    assert!(json["message"].as_str().unwrap().starts_with("invalid upstream url"));
  }
}
