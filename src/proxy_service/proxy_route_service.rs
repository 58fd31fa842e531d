use std::sync::Arc;

use actix_web::dev::{self, Payload, Service, ServiceRequest, ServiceResponse};
use actix_web::http::Method;
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use bytes::{Bytes, BytesMut};
use futures_core::future::LocalBoxFuture;
use futures_util::StreamExt;
use log::{debug, error};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;

use crate::proxy_service::api_key::resolve_api_key;
use crate::proxy_service::headers::prepare_headers;
use crate::proxy_service::proxy_config::ProxyConfig;
use crate::proxy_service::proxy_error::ProxyError;
use crate::proxy_service::requires_body;
use crate::proxy_service::responses::{preflight_response, proxy_response, root_response};
use crate::proxy_service::target_url::build_target_url;

pub struct ProxyRouteService {
  pub(super) config: Arc<ProxyConfig>,
  pub(super) http_client: Client,
}

impl Service<ServiceRequest> for ProxyRouteService {
  type Response = ServiceResponse;
  type Error = actix_web::Error;
  type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

  dev::always_ready!();

  fn call(&self, req: ServiceRequest) -> Self::Future {
    let (http_request, payload) = req.into_parts();
    let config = self.config.clone();
    let http_client = self.http_client.clone();

    Box::pin(async move {
      let response = ProxyRouteService::exec(&config, &http_client, &http_request, payload)
        .await
        .unwrap_or_else(|err| {
          match &err {
            ProxyError::MissingApiKey => debug!("Rejected {} {}: no API key", http_request.method(), http_request.path()),
            _ => error!("Proxy error: {}", err),
          }
          err.error_response()
        });

      Ok(ServiceResponse::new(http_request, response))
    })
  }
}

impl ProxyRouteService {
  async fn exec(
    config: &ProxyConfig,
    http_client: &Client,
    http: &HttpRequest,
    payload: Payload,
  ) -> Result<HttpResponse, ProxyError> {
    if http.method() == Method::OPTIONS {
      return Ok(preflight_response());
    }

    if http.path() == "/" {
      let origin = {
        let info = http.connection_info();
        format!("{}://{}", info.scheme(), info.host())
      };
      return Ok(root_response(&origin));
    }

    let api_key = resolve_api_key(http, config).ok_or(ProxyError::MissingApiKey)?;
    let target_url = build_target_url(&config.upstream_url, http.path(), http.query_string(), &api_key)?;
    let headers = prepare_headers(http.headers(), &api_key)?;

    debug!("Forwarding {} {}", http.method(), http.path());

    let mut builder = http_client
      .request(http.method().clone(), target_url)
      .headers(headers);

    if requires_body(http.method().as_str()) {
      builder = builder.body(ProxyRouteService::read_payload(payload).await?);
    }

    let upstream = builder.send().await?;
    let status = upstream.status();
    let content_type = upstream.headers().get(CONTENT_TYPE).cloned();
    let body = upstream.bytes().await?;

    debug!("Upstream answered {} for {}", status, http.path());

    Ok(proxy_response(status, content_type, body))
  }

  async fn read_payload(mut payload: Payload) -> Result<Bytes, ProxyError> {
    let mut body_buffer = BytesMut::new();

    while let Some(chunk) = payload.next().await {
      let bytes = chunk.map_err(|err| ProxyError::Payload(err.to_string()))?;
      body_buffer.extend_from_slice(&bytes);
    }

    Ok(body_buffer.freeze())
  }
}
