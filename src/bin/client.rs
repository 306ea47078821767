use clap::Parser;

use visigoth::client::{repl, tcp_client::TcpClient};

#[derive(Parser)]
#[command(name = "visigoth-client", about = "Interactive VQL client for a Visigoth node")]
struct Cli {
    #[arg(long, default_value = "localhost")]
    host: String,

    #[arg(long, default_value_t = 7373)]
    port: u16,
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let addr = format!("{}:{}", cli.host, cli.port);

    match TcpClient::connect(&addr).await {
        Ok(client) => {
            repl::run(client).await;
            std::process::ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("failed to connect to {}: {}", addr, err);
            std::process::ExitCode::FAILURE
        }
    }
}
