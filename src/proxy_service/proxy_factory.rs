use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use futures_util::future::{ok, Ready};
use reqwest::Client;

use crate::proxy_service::proxy_config::ProxyConfig;
use crate::proxy_service::proxy_route_service::ProxyRouteService;

/// Hands every worker a forwarder that shares one connection pool and one config.
pub struct ProxyRouteServiceFactory {
  config: Arc<ProxyConfig>,
  http_client: Client,
}

impl ServiceFactory<ServiceRequest> for ProxyRouteServiceFactory {
  type Response = ServiceResponse;
  type Error = actix_web::Error;
  type Config = ();
  type Service = ProxyRouteService;
  type InitError = ();
  type Future = Ready<Result<Self::Service, Self::InitError>>;

  fn new_service(&self, _: Self::Config) -> Self::Future {
    ok(ProxyRouteService {
      config: Arc::clone(&self.config),
      http_client: self.http_client.clone(),
    })
  }
}

impl ProxyRouteServiceFactory {
  pub fn create(http_client: Client, config: Arc<ProxyConfig>) -> Self {
    Self { config, http_client }
  }
}
