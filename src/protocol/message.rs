use crate::protocol::types::{Format, Head, MessageType};
use crate::search::engine::Engine;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResRow {
    pub hits: u32,
    pub name: String,
    pub content: String,
}

/// Every message this service parses or compiles. `RenameReq` (tag 6) is
/// reserved on the wire but has no body layout or dispatch in this scope
/// — spec.md's node dispatch table never names it — so it is not
/// constructible here; a frame carrying it is treated like any other
/// unrecognized type at the header boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    StatusRes {
        head: Head,
        ok: bool,
    },
    AliasReq {
        head: Head,
        source: String,
        alias: String,
    },
    IndexReq {
        head: Head,
        format: Format,
        index: String,
        doc: String,
        payload: String,
    },
    SearchReq {
        head: Head,
        engine: Engine,
        index: String,
        terms: String,
    },
    SearchRes {
        head: Head,
        engine: Engine,
        rows: Vec<SearchResRow>,
    },
    DropReq {
        head: Head,
        index: String,
    },
    DropRes {
        head: Head,
        ok: bool,
        index: String,
    },
    ListReq {
        head: Head,
    },
    ListRes {
        head: Head,
        indices: Vec<String>,
    },
    UnAliasReq {
        head: Head,
        index: String,
        alias: String,
    },
    ListAliasesReq {
        head: Head,
    },
    ListAliasesRes {
        head: Head,
        aliases: Vec<(String, Vec<String>)>,
    },
}

impl Message {
    pub fn head(&self) -> Head {
        match self {
            Message::StatusRes { head, .. }
            | Message::AliasReq { head, .. }
            | Message::IndexReq { head, .. }
            | Message::SearchReq { head, .. }
            | Message::SearchRes { head, .. }
            | Message::DropReq { head, .. }
            | Message::DropRes { head, .. }
            | Message::ListReq { head }
            | Message::ListRes { head, .. }
            | Message::UnAliasReq { head, .. }
            | Message::ListAliasesReq { head }
            | Message::ListAliasesRes { head, .. } => *head,
        }
    }

    pub fn id(&self) -> u64 {
        self.head().id
    }

    pub fn version(&self) -> u8 {
        self.head().version
    }

    pub fn message_type(&self) -> MessageType {
        self.head().message_type
    }

    /// Builds the head for a reply to `self`, echoing id/version and
    /// stamping the response's own message type.
    pub fn response_head(&self, response_type: MessageType) -> Head {
        Head {
            id: self.id(),
            version: self.version(),
            message_type: response_type,
        }
    }

    pub fn status(&self, ok: bool) -> Message {
        Message::StatusRes {
            head: self.response_head(MessageType::StatusRes),
            ok,
        }
    }
}
