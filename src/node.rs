use std::sync::Arc;

use crate::core::types::{DocRequest, MimeType};
use crate::loaders;
use crate::protocol::message::{Message, SearchResRow};
use crate::protocol::types::{Format, MessageType};
use crate::repo::IndexRepo;

/// Consumes one parsed protocol message, drives the repository, and
/// produces the reply. Stateless beyond the shared repository handle, so
/// one `Node` can back every connection.
pub struct Node {
    repo: Arc<IndexRepo>,
}

impl Node {
    pub fn new(repo: Arc<IndexRepo>) -> Self {
        Node { repo }
    }

    pub async fn dispatch(&self, req: Message) -> Message {
        tracing::debug!(message_type = ?req.message_type(), id = req.id(), "dispatching");

        match req {
            Message::ListReq { .. } => {
                let indices = self.repo.list();
                Message::ListRes {
                    head: req.response_head(MessageType::ListRes),
                    indices,
                }
            }
            Message::ListAliasesReq { .. } => {
                let aliases = self.repo.list_aliases();
                Message::ListAliasesRes {
                    head: req.response_head(MessageType::ListAliasesRes),
                    aliases,
                }
            }
            Message::IndexReq {
                format,
                ref index,
                ref doc,
                ref payload,
                ..
            } => {
                let statement = match format {
                    Format::Text => loaders::text(payload),
                    Format::Json => match loaders::json(payload) {
                        Ok(flattened) => flattened,
                        Err(err) => {
                            tracing::warn!(%err, "malformed JSON payload");
                            return req.status(false);
                        }
                    },
                };
                let mime = match format {
                    Format::Text => MimeType::Text,
                    Format::Json => MimeType::Json,
                };
                let doc_req = DocRequest::with_statement(doc.clone(), payload.clone(), statement, mime);
                self.repo.put(index, doc_req).await;
                req.status(true)
            }
            Message::SearchReq {
                engine,
                ref index,
                ref terms,
                ..
            } => match self.repo.search(index, terms, engine).await {
                Ok(results) => {
                    let rows = results
                        .into_iter()
                        .map(|r| SearchResRow {
                            hits: r.hits,
                            name: r.document.id,
                            content: r.document.raw,
                        })
                        .collect();
                    Message::SearchRes {
                        head: req.response_head(MessageType::SearchRes),
                        engine,
                        rows,
                    }
                }
                Err(err) => {
                    tracing::warn!(%err, index = %index, "search failed");
                    req.status(false)
                }
            },
            Message::AliasReq {
                ref source,
                ref alias,
                ..
            } => {
                let ok = self.repo.alias(alias, source);
                req.status(ok)
            }
            Message::UnAliasReq {
                ref index,
                ref alias,
                ..
            } => {
                let ok = self.repo.unalias(alias, index);
                req.status(ok)
            }
            Message::DropReq { ref index, .. } => {
                let ok = self.repo.drop_index(index);
                Message::DropRes {
                    head: req.response_head(MessageType::DropRes),
                    ok,
                    index: index.clone(),
                }
            }
            other => {
                tracing::warn!(message_type = ?other.message_type(), "unhandled message type");
                other.status(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyzer::Analyzer;
    use crate::protocol::types::Head;
    use crate::search::engine::Engine;

    fn node() -> Node {
        Node::new(Arc::new(IndexRepo::new(Arc::new(Analyzer::spanish()))))
    }

    fn head(id: u64, message_type: MessageType) -> crate::protocol::types::Head {
        Head {
            id,
            version: 0,
            message_type,
        }
    }

    #[tokio::test]
    async fn index_then_search_round_trip() {
        let node = node();
        let index_req = Message::IndexReq {
            head: head(1, MessageType::IndexReq),
            format: Format::Text,
            index: "courses".to_string(),
            doc: "/c/java".to_string(),
            payload: "Curso de programacion en Java".to_string(),
        };
        let res = node.dispatch(index_req).await;
        assert_eq!(res, Message::StatusRes { head: head(1, MessageType::StatusRes), ok: true });

        let search_req = Message::SearchReq {
            head: head(2, MessageType::SearchReq),
            engine: Engine::Hits,
            index: "courses".to_string(),
            terms: "java".to_string(),
        };
        match node.dispatch(search_req).await {
            Message::SearchRes { rows, .. } => {
                assert_eq!(rows.len(), 1);
                assert_eq!(rows[0].name, "/c/java");
            }
            other => panic!("unexpected response {:?}", other),
        }
    }

    #[tokio::test]
    async fn search_on_unknown_index_returns_failure_status() {
        let node = node();
        let req = Message::SearchReq {
            head: head(1, MessageType::SearchReq),
            engine: Engine::Hits,
            index: "nope".to_string(),
            terms: "x".to_string(),
        };
        let res = node.dispatch(req).await;
        assert_eq!(res, Message::StatusRes { head: head(1, MessageType::StatusRes), ok: false });
    }
}
