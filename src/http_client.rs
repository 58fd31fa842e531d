use std::time::Duration;

use reqwest::redirect::Policy;
use reqwest::Client;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct HttpClientConfig {
  pub http_proxy: Option<String>,
  pub user: Option<String>,
  pub pass: Option<String>,
  pub timeout: Option<Duration>,
}

impl HttpClientConfig {
  pub fn to_client(self) -> Result<Client, reqwest::Error> {
    let HttpClientConfig {
      http_proxy,
      user,
      pass,
      timeout,
    } = self;
    let mut client_builder = reqwest::ClientBuilder::new();

    if let Some(proxy_url) = http_proxy {
      let mut proxy = reqwest::Proxy::all(proxy_url)?;

      if let (Some(user_name), Some(password)) = (user, pass) {
        proxy = proxy.basic_auth(&user_name, &password);
      }

      client_builder = client_builder.proxy(proxy);
    }

    if let Some(timeout) = timeout {
      client_builder = client_builder.timeout(timeout);
    }

    let client = client_builder.redirect(Policy::limited(5)).build()?;

    Ok(client)
  }
}
