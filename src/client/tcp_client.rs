use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::io::{AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, oneshot};

use crate::core::error::{Error, Result};
use crate::protocol::compiler::compile;
use crate::protocol::message::Message;
use crate::protocol::parser::parse;

type Pending = Arc<Mutex<HashMap<u64, oneshot::Sender<Message>>>>;

/// One live connection to a node. Requests are tagged by correlation id and
/// matched to their reply by a reader task running independently of
/// callers; `request` is just a oneshot waiting on that match.
pub struct TcpClient {
    counter: AtomicU64,
    outbound: mpsc::Sender<Message>,
    pending: Pending,
}

impl TcpClient {
    pub async fn connect(addr: &str) -> Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        let (read_half, mut write_half) = stream.into_split();
        let mut reader = BufReader::new(read_half);

        let pending: Pending = Arc::new(Mutex::new(HashMap::new()));
        let reader_pending = pending.clone();

        let (out_tx, mut out_rx) = mpsc::channel::<Message>(32);

        tokio::spawn(async move {
            loop {
                match parse(&mut reader).await {
                    Ok(Some(message)) => {
                        if let Some(sender) = reader_pending.lock().remove(&message.id()) {
                            let _ = sender.send(message);
                        }
                    }
                    Ok(None) => {
                        tracing::debug!("server closed the connection");
                        break;
                    }
                    Err(err) => {
                        tracing::warn!(%err, "connection closed while reading");
                        break;
                    }
                }
            }
        });

        tokio::spawn(async move {
            while let Some(message) = out_rx.recv().await {
                let encoded = compile(&message);
                if write_half.write_all(&encoded).await.is_err() {
                    break;
                }
            }
        });

        Ok(TcpClient {
            counter: AtomicU64::new(0),
            outbound: out_tx,
            pending,
        })
    }

    /// Monotonic correlation id for a new request; starts at 1.
    pub fn next_id(&self) -> u64 {
        self.counter.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub async fn request(&self, message: Message) -> Result<Message> {
        let (tx, rx) = oneshot::channel();
        self.pending.lock().insert(message.id(), tx);
        self.outbound
            .send(message)
            .await
            .map_err(|_| Error::internal("client writer task has stopped"))?;
        rx.await
            .map_err(|_| Error::internal("connection closed before a response arrived"))
    }
}
