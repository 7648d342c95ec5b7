//! CLI entrypoint for medassist
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use medassist_application::{
    AnalyzeDocumentUseCase, LookupRecommendationsUseCase, RunDiagnosisUseCase,
    SessionEventLogger, SessionStore,
};
use medassist_domain::DiagnosisEngine;
use medassist_infrastructure::{
    ConfigLoader, FileConfig, InMemorySessionStore, JsonlSessionLogger, KeywordDocumentAnalyzer,
    SessionSweeper, StaticSuggestionProvider, load_knowledge,
};
use medassist_presentation::{AppState, Cli, Command, ConsoleFormatter, DiagnosisRepl};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // === Configuration ===
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("failed to load configuration")?
    };

    let _log_guard = init_logging(cli.verbose, &config);
    info!("Starting medassist");

    if cli.command == Command::ShowConfig {
        return show_config(&cli, &config);
    }

    let warnings = config.ensure_valid()?;
    for warning in &warnings {
        warn!("{}", warning.message);
    }

    // === Dependency Injection ===
    let knowledge = Arc::new(load_knowledge(config.knowledge.dataset.as_deref())?);

    if let Command::Conditions { json } = cli.command {
        let output = if json {
            serde_json::to_string_pretty(knowledge.conditions())?
        } else {
            ConsoleFormatter::format_conditions(knowledge.conditions())
        };
        println!("{}", output);
        return Ok(());
    }

    let engine = Arc::new(DiagnosisEngine::new(
        knowledge.clone(),
        config.engine.to_policy(),
    )?);
    let params = config.sessions.to_params();
    let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new(&params));
    let event_logger: Option<Arc<dyn SessionEventLogger>> = config
        .logging
        .session_log
        .as_ref()
        .and_then(JsonlSessionLogger::open)
        .map(|logger| Arc::new(logger) as Arc<dyn SessionEventLogger>);

    let mut diagnosis = RunDiagnosisUseCase::new(engine, store.clone());
    if let Some(logger) = &event_logger {
        diagnosis = diagnosis.with_event_logger(logger.clone());
    }

    match cli.command {
        Command::Diagnose => {
            DiagnosisRepl::new(diagnosis).run().await?;
        }
        Command::Serve { bind } => {
            let addr = resolve_bind(bind.as_deref(), &config)?;
            let state = Arc::new(AppState {
                diagnosis,
                lookups: LookupRecommendationsUseCase::new(
                    knowledge.clone(),
                    Arc::new(StaticSuggestionProvider),
                ),
                documents: AnalyzeDocumentUseCase::new(
                    knowledge.clone(),
                    Arc::new(KeywordDocumentAnalyzer::new(knowledge)),
                )
                .with_max_bytes(config.server.max_upload_bytes),
            });

            let shutdown = CancellationToken::new();
            let mut sweeper = SessionSweeper::new(store, params);
            if let Some(logger) = event_logger {
                sweeper = sweeper.with_event_logger(logger);
            }
            let sweeper = sweeper.spawn(shutdown.clone());

            let signal = shutdown.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    info!("Received Ctrl+C, shutting down");
                }
                signal.cancel();
            });

            let served = medassist_presentation::serve(state, addr, shutdown.clone()).await;
            shutdown.cancel();
            if let Err(e) = sweeper.await {
                warn!("Session sweeper task failed: {}", e);
            }
            served.with_context(|| format!("HTTP server on {} failed", addr))?;
        }
        Command::Conditions { .. } | Command::ShowConfig => {}
    }

    Ok(())
}

/// Console logging from `-v` count (or `RUST_LOG`), plus a daily rolling
/// file when `logging.directory` is set.
fn init_logging(verbose: u8, config: &FileConfig) -> Option<WorkerGuard> {
    let filter = || {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"), // -vvv or more
        })
    };

    let console = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(filter());

    match &config.logging.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, "medassist.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let file = fmt::layer()
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(filter());
            tracing_subscriber::registry()
                .with(console)
                .with(file)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry().with(console).init();
            None
        }
    }
}

fn resolve_bind(flag: Option<&str>, config: &FileConfig) -> Result<SocketAddr> {
    match flag {
        Some(bind) => bind
            .parse()
            .with_context(|| format!("--bind '{}' is not a socket address", bind)),
        None => match config.server.parse_bind() {
            (Some(addr), _) => Ok(addr),
            (None, issues) => bail!("{}", ConsoleFormatter::format_issues(&issues)),
        },
    }
}

fn show_config(cli: &Cli, config: &FileConfig) -> Result<()> {
    println!("Configuration sources:");
    if cli.no_config {
        println!("  (disabled by --no-config, defaults only)");
    } else {
        for source in ConfigLoader::config_sources(cli.config.as_ref()) {
            println!("  {}", source);
        }
    }

    let issues = config.validate();
    if !issues.is_empty() {
        println!();
        println!("{}", ConsoleFormatter::format_issues(&issues));
    }

    println!();
    println!("{}", toml::to_string_pretty(config)?);
    Ok(())
}
