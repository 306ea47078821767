use std::sync::Arc;

use visigoth::analysis::analyzer::Analyzer;
use visigoth::node::Node;
use visigoth::protocol::compiler::compile;
use visigoth::protocol::message::Message;
use visigoth::protocol::parser::parse;
use visigoth::protocol::types::{Format, Head, MessageType};
use visigoth::repo::IndexRepo;
use visigoth::search::engine::Engine;
use visigoth::vql;

fn node() -> Node {
    Node::new(Arc::new(IndexRepo::new(Arc::new(Analyzer::spanish()))))
}

fn head(id: u64, message_type: MessageType) -> Head {
    Head { id, version: 0, message_type }
}

async fn index(node: &Node, index: &str, doc: &str, payload: &str) {
    let req = Message::IndexReq {
        head: head(1, MessageType::IndexReq),
        format: Format::Text,
        index: index.to_string(),
        doc: doc.to_string(),
        payload: payload.to_string(),
    };
    match node.dispatch(req).await {
        Message::StatusRes { ok, .. } => assert!(ok),
        other => panic!("unexpected response {:?}", other),
    }
}

async fn search(node: &Node, index: &str, terms: &str) -> Vec<(String, u32)> {
    let req = Message::SearchReq {
        head: head(2, MessageType::SearchReq),
        engine: Engine::Hits,
        index: index.to_string(),
        terms: terms.to_string(),
    };
    match node.dispatch(req).await {
        Message::SearchRes { rows, .. } => rows.into_iter().map(|r| (r.name, r.hits)).collect(),
        other => panic!("unexpected response {:?}", other),
    }
}

#[tokio::test]
async fn s1_single_token_hit() {
    let node = node();
    index(&node, "courses", "/c/java", "Curso de programacion en Java").await;
    index(&node, "courses", "/c/php", "Curso de programacion en PHP").await;

    let results = search(&node, "courses", "java").await;
    assert_eq!(results, vec![("/c/java".to_string(), 1)]);
}

#[tokio::test]
async fn s2_multi_token_and() {
    let node = node();
    index(&node, "courses", "/c/java", "Curso de programacion en Java").await;
    index(&node, "courses", "/c/php", "Curso de programacion en PHP").await;

    let results = search(&node, "courses", "programacion java").await;
    assert_eq!(results, vec![("/c/java".to_string(), 2)]);
}

#[tokio::test]
async fn s3_alias_fan_out() {
    let node = node();
    index(&node, "dedos", "pulgar", "este fue a por huevos").await;
    index(&node, "comida", "huevos", "los huevos son cuerpos redondeados").await;

    let alias_req = Message::AliasReq {
        head: head(3, MessageType::AliasReq),
        source: "dedos".to_string(),
        alias: "huevos:latest".to_string(),
    };
    assert!(matches!(node.dispatch(alias_req).await, Message::StatusRes { ok: true, .. }));
    let alias_req = Message::AliasReq {
        head: head(4, MessageType::AliasReq),
        source: "comida".to_string(),
        alias: "huevos:latest".to_string(),
    };
    assert!(matches!(node.dispatch(alias_req).await, Message::StatusRes { ok: true, .. }));

    let mut names: Vec<String> = search(&node, "huevos:latest", "huevos")
        .await
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    names.sort();
    assert_eq!(names, vec!["huevos".to_string(), "pulgar".to_string()]);
}

#[tokio::test]
async fn s4_drop_cascades_to_aliases() {
    let node = node();
    index(&node, "dedos", "a", "huevos").await;

    let alias_req = Message::AliasReq {
        head: head(2, MessageType::AliasReq),
        source: "dedos".to_string(),
        alias: "dedos:latest".to_string(),
    };
    node.dispatch(alias_req).await;

    let drop_req = Message::DropReq {
        head: head(3, MessageType::DropReq),
        index: "dedos".to_string(),
    };
    match node.dispatch(drop_req).await {
        Message::DropRes { ok, .. } => assert!(ok),
        other => panic!("unexpected response {:?}", other),
    }

    let list_req = Message::ListAliasesReq { head: head(4, MessageType::ListAliasesReq) };
    match node.dispatch(list_req).await {
        Message::ListAliasesRes { aliases, .. } => assert!(aliases.is_empty()),
        other => panic!("unexpected response {:?}", other),
    }
}

#[tokio::test]
async fn s6_protocol_round_trip() {
    let msg = Message::IndexReq {
        head: Head { id: 18446744073709551612, version: 2, message_type: MessageType::IndexReq },
        format: Format::Text,
        index: "verbos".to_string(),
        doc: "hinco".to_string(),
        payload: "accion de hincar".to_string(),
    };
    let encoded = compile(&msg);
    let mut cursor = std::io::Cursor::new(encoded);
    let decoded = parse(&mut cursor).await.unwrap();
    assert_eq!(decoded, Some(msg));
}

#[tokio::test]
async fn vql_search_round_trips_through_the_node() {
    let node = node();
    index(&node, "courses", "/c/java", "Curso de programacion en Java").await;

    let stmt = vql::parser::parse("SEARCH courses 'java'").unwrap();
    let req = visigoth::client::evaluator::eval(stmt, &mut visigoth::client::evaluator::Environment::new(), 1)
        .expect("SEARCH with an explicit index always produces a message");
    match node.dispatch(req).await {
        Message::SearchRes { rows, .. } => {
            assert_eq!(rows.len(), 1);
            assert_eq!(rows[0].name, "/c/java");
        }
        other => panic!("unexpected response {:?}", other),
    }
}
