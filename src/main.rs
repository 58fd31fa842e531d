mod cli;
mod config_file;
mod http_client;
mod proxy_service;
mod smoke_check;
mod std_logger;

use std::env;
use std::fs::File;
use std::io::{Error, ErrorKind, Result};
use std::sync::Arc;

use actix_web::{App, HttpServer};
use clap::Parser;
use log::info;

use cli::{CheckArgs, Cli, Command, ServeArgs};
use config_file::ConfigFile;
use http_client::HttpClientConfig;
use proxy_service::proxy_factory::ProxyRouteServiceFactory;

#[actix_web::main]
async fn main() -> Result<()> {
    let level = std_logger::parse_level(env::var("LOG_LEVEL").ok().as_deref());
    std_logger::init(level)?;

    let cli = Cli::parse();

    match cli.command {
        Some(Command::Check(args)) => check(args).await,
        Some(Command::Serve(args)) => serve(args).await,
        None => serve(cli.serve).await,
    }
}

async fn serve(args: ServeArgs) -> Result<()> {
    let config_file = match &args.config {
        Some(path) => ConfigFile::load_from_file(&File::open(path)?)?,
        None => ConfigFile::default(),
    };

    let (bind, port, workers) = (args.bind.clone(), args.port, args.workers);
    let (proxy_config, client_config) = args.into_configs(config_file);

    info!("Forwarding to '{}'.", proxy_config.upstream_url);
    info!("Fallback API key configured: {}.", proxy_config.api_key.is_some());
    if let Some(proxy_url) = &client_config.http_proxy {
        info!("Outbound requests go through '{}'.", proxy_url);
    }

    let http_client = client_config
        .to_client()
        .map_err(|err| Error::new(ErrorKind::Other, err))?;
    let proxy_config = Arc::new(proxy_config);

    info!("Listening on {}:{} with {} workers.", bind, port, workers);

    HttpServer::new(move || {
        App::new().default_service(ProxyRouteServiceFactory::create(
            http_client.clone(),
            proxy_config.clone(),
        ))
    })
    .workers(workers)
    .bind((bind, port))?
    .run()
    .await
}

async fn check(args: CheckArgs) -> Result<()> {
    let http_client = HttpClientConfig::default()
        .to_client()
        .map_err(|err| Error::new(ErrorKind::Other, err))?;

    let results = smoke_check::run(&http_client, &args).await;
    smoke_check::print_summary(&args, &results);

    let failed = results.iter().filter(|result| !result.passed()).count();
    if failed > 0 {
        return Err(Error::new(ErrorKind::Other, format!("{failed} smoke checks failed")));
    }

    Ok(())
}
