use bytes::{BufMut, BytesMut};

use crate::protocol::message::Message;
use crate::protocol::types::Head;

fn put_head(buf: &mut BytesMut, head: &Head) {
    buf.put_u64(head.id);
    buf.put_u8(head.version);
    buf.put_u8(head.message_type.to_wire());
}

fn put_name(buf: &mut BytesMut, s: &str) {
    buf.put_u8(s.len() as u8);
    buf.put_slice(s.as_bytes());
}

fn put_text(buf: &mut BytesMut, s: &str) {
    buf.put_u32(s.len() as u32);
    buf.put_slice(s.as_bytes());
}

fn put_long_text(buf: &mut BytesMut, s: &str) {
    buf.put_u64(s.len() as u64);
    buf.put_slice(s.as_bytes());
}

/// Encodes `msg` into its wire representation. The exact inverse of
/// [`crate::protocol::parser::parse`] — round-tripping any valid message
/// through `compile` then `parse` yields an equal message.
pub fn compile(msg: &Message) -> Vec<u8> {
    let mut buf = BytesMut::new();
    put_head(&mut buf, &msg.head());

    match msg {
        Message::StatusRes { ok, .. } => {
            buf.put_u8(if *ok { 1 } else { 0 });
        }
        Message::AliasReq { source, alias, .. } => {
            put_name(&mut buf, source);
            put_name(&mut buf, alias);
        }
        Message::UnAliasReq { index, alias, .. } => {
            put_name(&mut buf, index);
            put_name(&mut buf, alias);
        }
        Message::IndexReq {
            format,
            index,
            doc,
            payload,
            ..
        } => {
            buf.put_u8(format.to_wire());
            put_name(&mut buf, index);
            put_text(&mut buf, doc);
            put_text(&mut buf, payload);
        }
        Message::SearchReq {
            engine,
            index,
            terms,
            ..
        } => {
            buf.put_u8(engine.to_wire());
            put_name(&mut buf, index);
            put_text(&mut buf, terms);
        }
        Message::SearchRes { engine, rows, .. } => {
            buf.put_u8(engine.to_wire());
            buf.put_u32(rows.len() as u32);
            for row in rows {
                buf.put_u32(row.hits);
                put_text(&mut buf, &row.name);
                put_long_text(&mut buf, &row.content);
            }
        }
        Message::DropReq { index, .. } => {
            put_name(&mut buf, index);
        }
        Message::DropRes { ok, index, .. } => {
            buf.put_u8(if *ok { 1 } else { 0 });
            put_name(&mut buf, index);
        }
        Message::ListReq { .. } | Message::ListAliasesReq { .. } => {}
        Message::ListRes { indices, .. } => {
            buf.put_u32(indices.len() as u32);
            for index in indices {
                put_name(&mut buf, index);
            }
        }
        Message::ListAliasesRes { aliases, .. } => {
            buf.put_u32(aliases.len() as u32);
            for (alias, indices) in aliases {
                put_name(&mut buf, alias);
                buf.put_u8(indices.len() as u8);
                for index in indices {
                    put_name(&mut buf, index);
                }
            }
        }
    }

    buf.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::types::{Format, MessageType};

    #[test]
    fn s6_index_request_literal_bytes() {
        let msg = Message::IndexReq {
            head: Head {
                id: 18_446_744_073_709_551_612,
                version: 2,
                message_type: MessageType::IndexReq,
            },
            format: Format::Text,
            index: "verbos".to_string(),
            doc: "hinco".to_string(),
            payload: "accion de hincar".to_string(),
        };

        let encoded = compile(&msg);
        let expected: Vec<u8> = vec![
            0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFC, 0x02, 0x03, 0x01, 0x06, b'v', b'e',
            b'r', b'b', b'o', b's', 0x00, 0x00, 0x00, 0x05, b'h', b'i', b'n', b'c', b'o', 0x00,
            0x00, 0x00, 0x10, b'a', b'c', b'c', b'i', b'o', b'n', b' ', b'd', b'e', b' ', b'h',
            b'i', b'n', b'c', b'a', b'r',
        ];
        assert_eq!(encoded, expected);
    }
}
