use log::debug;
use reqwest::{Client, Method};
use serde_json::{json, Value};

use crate::cli::CheckArgs;
use crate::proxy_service::API_KEY_HEADER;

enum KeyPlacement {
  Query,
  Header,
  None,
}

struct Probe {
  name: &'static str,
  method: Method,
  path: String,
  key: KeyPlacement,
  body: Option<Value>,
}

#[derive(Debug, PartialEq)]
pub struct ProbeResult {
  pub name: &'static str,
  pub status: Option<u16>,
  pub error: Option<String>,
}

impl ProbeResult {
  pub fn passed(&self) -> bool {
    self.error.is_none()
  }
}

fn prompt(text: &str) -> Value {
  json!({ "contents": [{ "parts": [{ "text": text }] }] })
}

fn probes(model: &str) -> Vec<Probe> {
  let generate = format!("/v1beta/models/{model}:generateContent");

  vec![
    Probe {
      name: "List Models (query parameter)",
      method: Method::GET,
      path: "/v1/models".into(),
      key: KeyPlacement::Query,
      body: None,
    },
    Probe {
      name: "List Models (header)",
      method: Method::GET,
      path: "/v1/models".into(),
      key: KeyPlacement::Header,
      body: None,
    },
    Probe {
      name: "Get Model Info",
      method: Method::GET,
      path: format!("/v1beta/models/{model}"),
      key: KeyPlacement::Query,
      body: None,
    },
    Probe {
      name: "Generate Content",
      method: Method::POST,
      path: generate.clone(),
      key: KeyPlacement::Query,
      body: Some(prompt("Hello! Please respond with a short greeting.")),
    },
    Probe {
      name: "Generate Content (header API key)",
      method: Method::POST,
      path: generate,
      key: KeyPlacement::Header,
      body: Some(prompt("What is 2+2? Answer in one word.")),
    },
    Probe {
      name: "Root Endpoint",
      method: Method::GET,
      path: "/".into(),
      key: KeyPlacement::None,
      body: None,
    },
    Probe {
      name: "CORS Preflight",
      method: Method::OPTIONS,
      path: "/v1/models".into(),
      key: KeyPlacement::None,
      body: None,
    },
  ]
}

async fn run_probe(client: &Client, proxy_url: &str, api_key: &str, probe: Probe) -> ProbeResult {
  let url = format!("{}{}", proxy_url.trim_end_matches('/'), probe.path);
  debug!("Probing {} {}", probe.method, probe.path);

  let mut builder = client.request(probe.method, url);
  builder = match probe.key {
    KeyPlacement::Query => builder.query(&[("key", api_key)]),
    KeyPlacement::Header => builder.header(API_KEY_HEADER, api_key),
    KeyPlacement::None => builder,
  };
  if let Some(body) = probe.body {
    builder = builder.json(&body);
  }

  match builder.send().await {
    Ok(response) if response.status().is_success() => ProbeResult {
      name: probe.name,
      status: Some(response.status().as_u16()),
      error: None,
    },
    Ok(response) => {
      let status = response.status().as_u16();
      let body = response.text().await.unwrap_or_default();
      ProbeResult {
        name: probe.name,
        status: Some(status),
        error: Some(if body.is_empty() { format!("HTTP {status}") } else { body }),
      }
    }
    Err(err) => ProbeResult {
      name: probe.name,
      status: None,
      error: Some(err.without_url().to_string()),
    },
  }
}

pub async fn run(client: &Client, args: &CheckArgs) -> Vec<ProbeResult> {
  let mut results = Vec::new();

  for probe in probes(&args.model) {
    results.push(run_probe(client, &args.proxy_url, &args.api_key, probe).await);
  }

  results
}

pub fn print_summary(args: &CheckArgs, results: &[ProbeResult]) {
  let masked: String = args.api_key.chars().take(10).collect();
  println!("Proxy URL: {}", args.proxy_url);
  println!("API Key: {masked}...");
  println!("{}", "=".repeat(60));

  for result in results {
    let mark = if result.passed() { "PASS" } else { "FAIL" };
    let status = result.status.map(|code| format!(" ({code})")).unwrap_or_default();
    println!("{mark} {}{status}", result.name);

    if let Some(error) = &result.error {
      let excerpt: String = error.chars().take(100).collect();
      println!("     {excerpt}");
    }
  }

  let passed = results.iter().filter(|result| result.passed()).count();
  println!("{}", "=".repeat(60));
  println!("Total: {} | Passed: {} | Failed: {}", results.len(), passed, results.len() - passed);
}
