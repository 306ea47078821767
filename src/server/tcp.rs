use std::sync::Arc;

use tokio::io::{AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::node::Node;
use crate::protocol::compiler::compile;
use crate::protocol::parser::parse;

/// Binds `addr` and accepts connections until `cancel` trips. Each
/// connection gets its own reader loop, writer loop, and request/response
/// channel pair; `node` is shared across all of them since it only reads
/// through `Arc<IndexRepo>`.
pub async fn serve(addr: &str, node: Arc<Node>, cancel: CancellationToken) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "tcp listener bound");

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("tcp listener shutting down");
                return Ok(());
            }
            accepted = listener.accept() => {
                let (stream, peer) = accepted?;
                tracing::debug!(%peer, "accepted connection");
                let node = node.clone();
                let cancel = cancel.child_token();
                tokio::spawn(async move {
                    if let Err(err) = handle_connection(stream, peer, node, cancel).await {
                        tracing::warn!(%peer, %err, "connection closed with error");
                    }
                });
            }
        }
    }
}

/// Reader loop parses frames and forwards them to the node; writer loop
/// drains the node's replies and encodes them back. Both terminate on
/// clean EOF, a parse/transport error, or cancellation.
async fn handle_connection(
    stream: TcpStream,
    peer: std::net::SocketAddr,
    node: Arc<Node>,
    cancel: CancellationToken,
) -> std::io::Result<()> {
    let (read_half, mut write_half) = stream.into_split();
    let mut reader = BufReader::new(read_half);

    let (in_tx, mut in_rx) = mpsc::channel(32);
    let (out_tx, mut out_rx) = mpsc::channel(32);

    let reader_cancel = cancel.clone();
    let reader_task = tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = reader_cancel.cancelled() => break,
                parsed = parse(&mut reader) => {
                    match parsed {
                        Ok(Some(message)) => {
                            if in_tx.send(message).await.is_err() {
                                break;
                            }
                        }
                        Ok(None) => {
                            tracing::debug!(%peer, "connection closed by peer");
                            break;
                        }
                        Err(err) => {
                            tracing::warn!(%peer, %err, "protocol error, closing connection");
                            break;
                        }
                    }
                }
            }
        }
    });

    let node_cancel = cancel.clone();
    let node_task = tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = node_cancel.cancelled() => break,
                received = in_rx.recv() => {
                    match received {
                        Some(request) => {
                            let response = node.dispatch(request).await;
                            if out_tx.send(response).await.is_err() {
                                break;
                            }
                        }
                        None => break,
                    }
                }
            }
        }
    });

    let writer_cancel = cancel.clone();
    let writer_task = tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = writer_cancel.cancelled() => break,
                received = out_rx.recv() => {
                    match received {
                        Some(message) => {
                            let encoded = compile(&message);
                            if write_half.write_all(&encoded).await.is_err() {
                                break;
                            }
                        }
                        None => break,
                    }
                }
            }
        }
    });

    let _ = reader_task.await;
    cancel.cancel();
    let _ = node_task.await;
    let _ = writer_task.await;
    Ok(())
}
