use actix_web::http::header::{ContentType, HeaderValue, CONTENT_TYPE};
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, HttpResponseBuilder};
use bytes::Bytes;
use serde::Serialize;

pub const CORS_HEADERS: [(&str, &str); 4] = [
  ("access-control-allow-origin", "*"),
  ("access-control-allow-methods", "GET, POST, PUT, DELETE, OPTIONS"),
  ("access-control-allow-headers", "Content-Type, Authorization, X-Goog-Api-Key"),
  ("access-control-max-age", "86400"),
];

#[derive(Serialize, PartialEq, Debug)]
pub struct ErrorResponse {
  pub error: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub message: Option<String>,
}

#[derive(Serialize, PartialEq, Debug)]
pub struct RootResponse {
  pub message: &'static str,
  pub usage: &'static str,
  pub example: String,
}

fn with_cors(status: StatusCode) -> HttpResponseBuilder {
  let mut builder = HttpResponse::build(status);

  for header in CORS_HEADERS {
    builder.insert_header(header);
  }

  builder
}

pub fn preflight_response() -> HttpResponse {
  with_cors(StatusCode::NO_CONTENT).finish()
}

pub fn json_response<T: Serialize>(status: StatusCode, data: &T) -> HttpResponse {
  with_cors(status)
    .insert_header(ContentType::json())
    .json(data)
}

pub fn root_response(origin: &str) -> HttpResponse {
  let data = RootResponse {
    message: "Gemini API Proxy",
    usage: "Use paths like /v1/models or /v1beta/models/gemini-flash-latest:generateContent",
    example: format!("{origin}/v1/models?key=YOUR_API_KEY"),
  };

  json_response(StatusCode::OK, &data)
}

/// Rewraps an upstream reply. Only status, body and content type survive.
pub fn proxy_response(status: StatusCode, content_type: Option<HeaderValue>, body: Bytes) -> HttpResponse {
  let mut builder = with_cors(status);

  match content_type.filter(|value| !value.is_empty()) {
    Some(value) => builder.insert_header((CONTENT_TYPE, value)),
    None => builder.insert_header(ContentType::json()),
  };

  builder.body(body)
}

#[cfg(test)]
mod tests {
  use actix_web::body::to_bytes;

  use super::*;

  fn assert_cors(response: &HttpResponse) {
    for (name, value) in CORS_HEADERS {
      assert_eq!(response.headers().get(name).unwrap(), value, "{name}");
    }
  }

  #[actix_web::test]
  async fn preflight_has_no_body() {
    let response = preflight_response();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_cors(&response);
    assert!(to_bytes(response.into_body()).await.unwrap().is_empty());
  }

  #[actix_web::test]
  async fn root_payload_points_at_origin() {
    let response = root_response("https://proxy.example");

    assert_eq!(response.status(), StatusCode::OK);
    assert_cors(&response);

    let body = to_bytes(response.into_body()).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["message"], "Gemini API Proxy");
    assert_eq!(json["example"], "https://proxy.example/v1/models?key=YOUR_API_KEY");
    assert!(json["usage"].as_str().unwrap().contains("/v1/models"));
  }

  #[test]
  fn error_body_omits_missing_message() {
    let body = ErrorResponse { error: "nope".into(), message: None };
    assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"error":"nope"}"#);
  }

  #[actix_web::test]
  async fn proxied_content_type_is_kept() {
    let response = proxy_response(
      StatusCode::NOT_FOUND,
      Some(HeaderValue::from_static("text/plain")),
      Bytes::from_static(b"missing"),
    );

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.headers().get(CONTENT_TYPE).unwrap(), "text/plain");
    assert_cors(&response);
    assert_eq!(to_bytes(response.into_body()).await.unwrap(), Bytes::from_static(b"missing"));
  }

  #[test]
  fn proxied_content_type_defaults_to_json() {
    let absent = proxy_response(StatusCode::OK, None, Bytes::new());
    let empty = proxy_response(StatusCode::OK, Some(HeaderValue::from_static("")), Bytes::new());

    assert_eq!(absent.headers().get(CONTENT_TYPE).unwrap(), "application/json");
    assert_eq!(empty.headers().get(CONTENT_TYPE).unwrap(), "application/json");
  }
}
