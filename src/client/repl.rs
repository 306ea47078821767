use std::io::Write as _;

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::client::evaluator::{self, Environment};
use crate::client::tcp_client::TcpClient;
use crate::protocol::message::Message;
use crate::vql::parser;

/// Reads VQL statements from stdin, evaluates each against `client`, and
/// prints the reply. Runs until stdin closes.
pub async fn run(client: TcpClient) {
    let mut env = Environment::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print_prompt(&env);
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(err) => {
                tracing::warn!(%err, "failed to read stdin");
                break;
            }
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let statement = match parser::parse(line) {
            Ok(statement) => statement,
            Err(err) => {
                println!("parse error: {}", err);
                continue;
            }
        };

        let id = client.next_id();
        if let Some(message) = evaluator::eval(statement, &mut env, id) {
            match client.request(message).await {
                Ok(response) => print_response(response),
                Err(err) => println!("request failed: {}", err),
            }
        }
    }
}

fn print_prompt(env: &Environment) {
    let index = env.index.as_deref().unwrap_or("<none>");
    print!(
        "\n+-------------------------+\n| index: {:<15} |\n+-------------------------+\n\n> ",
        index
    );
    let _ = std::io::stdout().flush();
}

fn print_response(message: Message) {
    match message {
        Message::ListRes { indices, .. } => {
            for (i, index) in indices.iter().enumerate() {
                println!("{}) {}", i + 1, index);
            }
        }
        Message::ListAliasesRes { aliases, .. } => {
            for (alias, targets) in aliases {
                println!("{} -> {}", alias, targets.join(", "));
            }
        }
        Message::SearchRes { rows, .. } => {
            println!("\ntotal: {}", rows.len());
            println!("---------------");
            for row in rows {
                println!("{{name={}, hits={}, content={}}}", row.name, row.hits, row.content);
            }
            println!("---------------\n");
        }
        Message::StatusRes { ok, .. } => println!("{}", if ok { "OK" } else { "ERROR" }),
        Message::DropRes { ok, index, .. } => {
            println!("drop {}: {}", index, if ok { "OK" } else { "ERROR" })
        }
        other => println!("{:?}", other),
    }
}
