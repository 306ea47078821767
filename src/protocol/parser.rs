use tokio::io::{AsyncRead, AsyncReadExt};

use crate::core::error::{Error, Result};
use crate::protocol::message::{Message, SearchResRow};
use crate::protocol::types::{Format, Head, MessageType};
use crate::search::engine::Engine;

async fn read_u8<R: AsyncRead + Unpin>(src: &mut R) -> Result<u8> {
    Ok(src.read_u8().await?)
}

async fn read_u32<R: AsyncRead + Unpin>(src: &mut R) -> Result<u32> {
    Ok(src.read_u32().await?)
}

async fn read_u64<R: AsyncRead + Unpin>(src: &mut R) -> Result<u64> {
    Ok(src.read_u64().await?)
}

/// Reads a `Name`: a u8-length-prefixed string, at most 255 bytes.
async fn read_name<R: AsyncRead + Unpin>(src: &mut R) -> Result<String> {
    let len = read_u8(src).await? as usize;
    read_string_of_len(src, len).await
}

/// Reads a `Text`: a u32-length-prefixed string.
async fn read_text<R: AsyncRead + Unpin>(src: &mut R) -> Result<String> {
    let len = read_u32(src).await? as usize;
    read_string_of_len(src, len).await
}

/// Reads a `LongText`: a u64-length-prefixed string.
async fn read_long_text<R: AsyncRead + Unpin>(src: &mut R) -> Result<String> {
    let len = read_u64(src).await? as usize;
    read_string_of_len(src, len).await
}

async fn read_string_of_len<R: AsyncRead + Unpin>(src: &mut R, len: usize) -> Result<String> {
    let mut buf = vec![0u8; len];
    src.read_exact(&mut buf).await?;
    String::from_utf8(buf).map_err(|e| Error::protocol(e.to_string()))
}

/// Reads the 10-byte header, distinguishing a clean close at the header
/// boundary (`Ok(None)`, zero bytes read) from every other outcome. Once
/// the first byte has arrived, the peer is mid-frame: any further EOF is a
/// truncation and surfaces as `Error::protocol` via the `io::Error` `From`
/// impl, not a clean close.
async fn read_head<R: AsyncRead + Unpin>(src: &mut R) -> Result<Option<Head>> {
    let mut first = [0u8; 1];
    if src.read(&mut first).await? == 0 {
        return Ok(None);
    }
    let mut rest = [0u8; 9];
    src.read_exact(&mut rest).await?;
    let id = u64::from_be_bytes([
        first[0], rest[0], rest[1], rest[2], rest[3], rest[4], rest[5], rest[6],
    ]);
    let version = rest[7];
    let tag = rest[8];
    let message_type = MessageType::from_wire(tag)
        .ok_or_else(|| Error::protocol(format!("unknown message type {}", tag)))?;
    Ok(Some(Head {
        id,
        version,
        message_type,
    }))
}

/// Reads one complete message from `src`. `Ok(None)` means the peer closed
/// the connection cleanly at a header boundary; `Err` with `ErrorKind::
/// Protocol` means the stream ended (or was otherwise malformed) partway
/// through a frame.
pub async fn parse<R: AsyncRead + Unpin>(src: &mut R) -> Result<Option<Message>> {
    let Some(head) = read_head(src).await? else {
        return Ok(None);
    };
    parse_body(src, head).await.map(Some)
}

async fn parse_body<R: AsyncRead + Unpin>(src: &mut R, head: Head) -> Result<Message> {
    match head.message_type {
        MessageType::StatusRes => {
            let ok = read_u8(src).await? == 1;
            Ok(Message::StatusRes { head, ok })
        }
        MessageType::AliasReq => {
            let source = read_name(src).await?;
            let alias = read_name(src).await?;
            Ok(Message::AliasReq { head, source, alias })
        }
        MessageType::UnAliasReq => {
            let index = read_name(src).await?;
            let alias = read_name(src).await?;
            Ok(Message::UnAliasReq { head, index, alias })
        }
        MessageType::IndexReq => {
            let format_tag = read_u8(src).await?;
            let format = Format::from_wire(format_tag)
                .ok_or_else(|| Error::protocol(format!("unknown format tag {}", format_tag)))?;
            let index = read_name(src).await?;
            let doc = read_text(src).await?;
            let payload = read_text(src).await?;
            Ok(Message::IndexReq {
                head,
                format,
                index,
                doc,
                payload,
            })
        }
        MessageType::SearchReq => {
            let engine_tag = read_u8(src).await?;
            let engine = Engine::from_wire(engine_tag)
                .ok_or_else(|| Error::protocol(format!("unknown engine tag {}", engine_tag)))?;
            let index = read_name(src).await?;
            let terms = read_text(src).await?;
            Ok(Message::SearchReq {
                head,
                engine,
                index,
                terms,
            })
        }
        MessageType::SearchRes => {
            let engine_tag = read_u8(src).await?;
            let engine = Engine::from_wire(engine_tag)
                .ok_or_else(|| Error::protocol(format!("unknown engine tag {}", engine_tag)))?;
            let count = read_u32(src).await?;
            let mut rows = Vec::with_capacity(count as usize);
            for _ in 0..count {
                let hits = read_u32(src).await?;
                let name = read_text(src).await?;
                let content = read_long_text(src).await?;
                rows.push(SearchResRow { hits, name, content });
            }
            Ok(Message::SearchRes { head, engine, rows })
        }
        MessageType::DropReq => {
            let index = read_name(src).await?;
            Ok(Message::DropReq { head, index })
        }
        MessageType::DropRes => {
            let ok = read_u8(src).await? == 1;
            let index = read_name(src).await?;
            Ok(Message::DropRes { head, ok, index })
        }
        MessageType::ListReq => Ok(Message::ListReq { head }),
        MessageType::ListRes => {
            let count = read_u32(src).await?;
            let mut indices = Vec::with_capacity(count as usize);
            for _ in 0..count {
                indices.push(read_name(src).await?);
            }
            Ok(Message::ListRes { head, indices })
        }
        MessageType::ListAliasesReq => Ok(Message::ListAliasesReq { head }),
        MessageType::ListAliasesRes => {
            let count = read_u32(src).await?;
            let mut aliases = Vec::with_capacity(count as usize);
            for _ in 0..count {
                let alias = read_name(src).await?;
                let k = read_u8(src).await?;
                let mut indices = Vec::with_capacity(k as usize);
                for _ in 0..k {
                    indices.push(read_name(src).await?);
                }
                aliases.push((alias, indices));
            }
            Ok(Message::ListAliasesRes { head, aliases })
        }
        MessageType::RenameReq => Err(Error::protocol("RenameReq has no wire body in this build")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::compiler::compile;

    #[tokio::test]
    async fn round_trips_every_constructible_message() {
        let messages = vec![
            Message::StatusRes {
                head: Head {
                    id: 1,
                    version: 0,
                    message_type: MessageType::StatusRes,
                },
                ok: true,
            },
            Message::AliasReq {
                head: Head {
                    id: 2,
                    version: 0,
                    message_type: MessageType::AliasReq,
                },
                source: "dedos".to_string(),
                alias: "dedos:latest".to_string(),
            },
            Message::IndexReq {
                head: Head {
                    id: 3,
                    version: 0,
                    message_type: MessageType::IndexReq,
                },
                format: Format::Json,
                index: "courses".to_string(),
                doc: "java".to_string(),
                payload: r#"{"a":1}"#.to_string(),
            },
            Message::SearchReq {
                head: Head {
                    id: 4,
                    version: 0,
                    message_type: MessageType::SearchReq,
                },
                engine: Engine::Hits,
                index: "courses".to_string(),
                terms: "java programacion".to_string(),
            },
            Message::ListAliasesRes {
                head: Head {
                    id: 5,
                    version: 0,
                    message_type: MessageType::ListAliasesRes,
                },
                aliases: vec![("alias".to_string(), vec!["idx".to_string(), "idy".to_string()])],
            },
        ];

        for msg in messages {
            let encoded = compile(&msg);
            let mut cursor = std::io::Cursor::new(encoded);
            let parsed = parse(&mut cursor).await.unwrap();
            assert_eq!(parsed, Some(msg));
        }
    }

    #[tokio::test]
    async fn clean_eof_at_header_boundary_is_a_closed_connection() {
        let mut cursor = std::io::Cursor::new(Vec::<u8>::new());
        let parsed = parse(&mut cursor).await.unwrap();
        assert_eq!(parsed, None);
    }

    #[tokio::test]
    async fn truncated_frame_is_a_protocol_error() {
        let encoded = compile(&Message::StatusRes {
            head: Head {
                id: 1,
                version: 0,
                message_type: MessageType::StatusRes,
            },
            ok: true,
        });
        // Cut the frame off partway through the header.
        let mut cursor = std::io::Cursor::new(encoded[..4].to_vec());
        let err = parse(&mut cursor).await.unwrap_err();
        assert!(matches!(err.kind, crate::core::error::ErrorKind::Protocol));
    }
}
