use std::{
    io::{self, Write},
    process,
    sync::Arc,
    time::Duration,
};

use serde::Serialize;
use tokio::sync::watch;
use tracing::{Dispatch, Level, dispatcher, error, info, warn};
use tracing_subscriber::fmt as tracing_fmt;
use weekly_digest::{
    application::{content::ContentService, error::AppError},
    cache::{CacheConfig, CacheState},
    config,
    infra::{
        error::InfraError,
        http::{self, HttpState},
        source, telemetry,
    },
};

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt()
        .with_max_level(Level::ERROR)
        .with_writer(io::stderr)
        .finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    telemetry::init(&settings.logging)?;
    let content = Arc::new(build_content_service(&settings));

    match command {
        config::Command::Serve(_) => run_serve(&settings, content).await,
        config::Command::Tags(_) => {
            let groups = content.tag_groups().await?;
            print_json(groups.as_slice())
        }
        config::Command::Content(args) => match content.get_content(&args.content_id).await? {
            Some(record) => print_json(&record),
            None => Err(AppError::not_found(args.content_id)),
        },
    }
}

fn build_content_service(settings: &config::Settings) -> ContentService {
    let cache = Arc::new(CacheState::new(CacheConfig::from(&settings.cache)));
    let service = ContentService::new(source::content_source(&settings.content), cache);
    match source::tag_group_source(&settings.content) {
        Some(groups) => service.with_precomputed_groups(groups),
        None => service,
    }
}

async fn run_serve(
    settings: &config::Settings,
    content: Arc<ContentService>,
) -> Result<(), AppError> {
    let router = http::build_router(HttpState::new(content));

    let listener = tokio::net::TcpListener::bind(settings.server.addr)
        .await
        .map_err(InfraError::from)?;
    info!(
        target = "weekly_digest::serve",
        addr = %settings.server.addr,
        content = %settings.content.path.display(),
        "Listening"
    );

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let server = axum::serve(listener, router.into_make_service()).with_graceful_shutdown(
        async move {
            shutdown_signal().await;
            let _ = shutdown_tx.send(true);
        },
    );

    let grace = settings.server.graceful_shutdown;
    tokio::select! {
        result = server.into_future() => result.map_err(InfraError::from)?,
        _ = drain_deadline(&mut shutdown_rx, grace) => {
            warn!(
                target = "weekly_digest::serve",
                grace_secs = grace.as_secs(),
                "Graceful shutdown timed out; dropping open connections"
            );
        }
    }

    info!(target = "weekly_digest::serve", "Server stopped");
    Ok(())
}

/// Resolves `grace` after shutdown starts; never resolves otherwise.
async fn drain_deadline(shutdown: &mut watch::Receiver<bool>, grace: Duration) {
    if shutdown.wait_for(|stopping| *stopping).await.is_err() {
        std::future::pending::<()>().await;
    }
    tokio::time::sleep(grace).await;
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!(target = "weekly_digest::serve", "Shutdown signal received");
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), AppError> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    serde_json::to_writer_pretty(&mut handle, value).map_err(InfraError::from)?;
    writeln!(handle).map_err(InfraError::from)?;
    Ok(())
}
