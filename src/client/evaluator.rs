use crate::protocol::message::Message;
use crate::protocol::types::{Format, Head, MessageType};
use crate::search::engine::Engine;
use crate::vql::ast::{ShowTarget, Statement};

const VERSION: u8 = 0;

/// REPL-local state: the index an un-qualified `SEARCH`/`INDEX` falls back
/// to after a `USE`.
#[derive(Default)]
pub struct Environment {
    pub index: Option<String>,
}

impl Environment {
    pub fn new() -> Self {
        Environment::default()
    }
}

fn head(id: u64, message_type: MessageType) -> Head {
    Head {
        id,
        version: VERSION,
        message_type,
    }
}

fn lookup_engine(name: Option<&str>) -> Engine {
    match name.map(str::to_ascii_lowercase).as_deref() {
        Some("linear") => Engine::Linear,
        Some("smart_hits") => Engine::SmartHits,
        Some("noop") => Engine::NoopZero,
        Some("noop_all") => Engine::NoopAll,
        _ => Engine::Hits,
    }
}

/// Turns one parsed statement into the protocol message it corresponds to.
/// `USE` has no wire form; it only updates `env` and returns `None`.
pub fn eval(stmt: Statement, env: &mut Environment, id: u64) -> Option<Message> {
    match stmt {
        Statement::Search { index, terms, engine } => {
            let index = index.or_else(|| env.index.clone())?;
            let engine = lookup_engine(engine.as_deref());
            Some(Message::SearchReq {
                head: head(id, MessageType::SearchReq),
                engine,
                index,
                terms,
            })
        }
        Statement::Index { payload, doc, format, index } => {
            let index = index.or_else(|| env.index.clone()).unwrap_or_default();
            let doc = doc.unwrap_or_default();
            let format = match format.as_deref().map(str::to_ascii_uppercase).as_deref() {
                Some("JSON") => Format::Json,
                _ => Format::Text,
            };
            Some(Message::IndexReq {
                head: head(id, MessageType::IndexReq),
                format,
                index,
                doc,
                payload,
            })
        }
        Statement::Use { index } => {
            env.index = Some(index);
            None
        }
        Statement::Show { target } => Some(match target {
            ShowTarget::Indices => Message::ListReq {
                head: head(id, MessageType::ListReq),
            },
            ShowTarget::Aliases => Message::ListAliasesReq {
                head: head(id, MessageType::ListAliasesReq),
            },
        }),
        Statement::Drop { target } => Some(Message::DropReq {
            head: head(id, MessageType::DropReq),
            index: target,
        }),
        Statement::Alias { index, alias } => Some(Message::AliasReq {
            head: head(id, MessageType::AliasReq),
            source: index,
            alias,
        }),
        Statement::UnAlias { index, alias } => Some(Message::UnAliasReq {
            head: head(id, MessageType::UnAliasReq),
            index: index.unwrap_or_default(),
            alias,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn use_statement_sets_environment_and_emits_nothing() {
        let mut env = Environment::new();
        let result = eval(Statement::Use { index: "courses".to_string() }, &mut env, 1);
        assert!(result.is_none());
        assert_eq!(env.index.as_deref(), Some("courses"));
    }

    #[test]
    fn search_without_index_falls_back_to_environment() {
        let mut env = Environment::new();
        env.index = Some("courses".to_string());
        let msg = eval(
            Statement::Search { index: None, terms: "java".to_string(), engine: None },
            &mut env,
            2,
        )
        .unwrap();
        match msg {
            Message::SearchReq { index, engine, .. } => {
                assert_eq!(index, "courses");
                assert_eq!(engine, Engine::Hits);
            }
            other => panic!("unexpected message {:?}", other),
        }
    }

    #[test]
    fn search_with_no_index_and_no_environment_is_dropped() {
        let mut env = Environment::new();
        let result = eval(
            Statement::Search { index: None, terms: "java".to_string(), engine: None },
            &mut env,
            1,
        );
        assert!(result.is_none());
    }
}
