use std::sync::Arc;

use clap::Parser;
use tokio_util::sync::CancellationToken;

use visigoth::analysis::analyzer::Analyzer;
use visigoth::core::config::Config;
use visigoth::node::Node;
use visigoth::repo::IndexRepo;
use visigoth::server::{http, tcp};

#[derive(Parser)]
#[command(name = "visigoth-server", about = "Visigoth full-text search node")]
struct Cli {
    /// Address the binary wire protocol listener binds to.
    #[arg(long, default_value = "localhost:7373")]
    tcp: String,

    /// Address the HTTP/JSON control surface binds to.
    #[arg(long, default_value = "localhost:7374")]
    http: String,
}

impl Cli {
    fn into_config(self) -> Config {
        Config {
            tcp_addr: self.tcp,
            http_addr: self.http,
        }
    }
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Cli::parse().into_config();
    let repo = Arc::new(IndexRepo::new(Arc::new(Analyzer::spanish())));
    let node = Arc::new(Node::new(repo.clone()));
    let cancel = CancellationToken::new();

    let tcp_addr = config.tcp_addr.clone();
    let tcp_cancel = cancel.clone();
    let tcp_node = node.clone();
    let tcp_task = tokio::spawn(async move { tcp::serve(&tcp_addr, tcp_node, tcp_cancel).await });

    let http_addr = config.http_addr.clone();
    let http_cancel = cancel.clone();
    let http_task = tokio::spawn(async move {
        let listener = match tokio::net::TcpListener::bind(&http_addr).await {
            Ok(listener) => listener,
            Err(err) => {
                tracing::error!(%http_addr, %err, "failed to bind http listener");
                return Err(err);
            }
        };
        tracing::info!(addr = %http_addr, "http listener bound");
        let app = http::router(repo);
        axum::serve(listener, app)
            .with_graceful_shutdown(async move { http_cancel.cancelled().await })
            .await
    });

    tokio::spawn(async move {
        shutdown_signal().await;
        tracing::info!("shutdown signal received");
        cancel.cancel();
    });

    let (tcp_result, http_result) = tokio::join!(tcp_task, http_task);

    match (tcp_result, http_result) {
        (Ok(Ok(())), Ok(Ok(()))) => std::process::ExitCode::SUCCESS,
        _ => std::process::ExitCode::FAILURE,
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
