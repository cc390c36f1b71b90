//! ContextGrid
//!
//! Personal project tracker: a REST API with a server-rendered web UI,
//! and a CLI that talks to the API.

use anyhow::Result;
use clap::Parser;
use contextgrid::cli::{Cli, Command};
use contextgrid::client::ApiClient;
use contextgrid::config::Config;
use contextgrid::{cli, server};
use std::fs::OpenOptions;
use std::path::Path;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let args = Cli::parse();

    // Initialize logging based on --log option
    let level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    match args.log.as_str() {
        "0" | "off" => {
            // No logging
        }
        "1" | "stdout" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stdout)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        "2" | "stderr" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        filename => {
            // Log to file (append mode)
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(filename)?;
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(file)
                .with_ansi(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }

    let mut config = Config::load(args.config.as_deref().map(Path::new))?;
    if let Some(ref api_url) = args.api_url {
        config.client.api_url = api_url.clone();
    }

    match args.command {
        Command::Serve(serve_args) => {
            if let Some(ref db_path) = serve_args.database {
                config.server.db_path = db_path.into();
            }
            if let Some(port) = serve_args.port {
                config.server.port = port;
            }
            if let Some(ref host) = serve_args.host {
                config.server.host = host.clone();
            }
            server::run(&config).await
        }
        command => {
            let client = ApiClient::new(&config.client.api_url);
            dispatch(&client, command).await
        }
    }
}

async fn dispatch(client: &ApiClient, command: Command) -> Result<()> {
    match command {
        Command::Serve(_) => unreachable!("handled in run"),
        Command::Add(args) => cli::projects::add(client, args).await,
        Command::List(args) => cli::projects::list(client, args).await,
        Command::Show { id } => cli::projects::show(client, id).await,
        Command::Update(args) => cli::projects::update(client, args).await,
        Command::Delete { id } => cli::projects::delete(client, id).await,
        Command::Touch { id } => cli::projects::touch(client, id).await,
        Command::Search { query } => cli::projects::search(client, &query).await,
        Command::Roadmap(args) => cli::projects::roadmap(client, args).await,
        Command::Note { command } => cli::notes::run(client, command).await,
        Command::Tag { command } => cli::tags::run(client, command).await,
        Command::Rel { command } => cli::rels::run(client, command).await,
        Command::Link { command } => cli::links::run(client, command).await,
        Command::Template { command } => cli::templates::run(client, command).await,
        Command::Stats => cli::stats::stats(client).await,
        Command::Heatmap { weeks } => cli::stats::heatmap(client, weeks).await,
    }
}
