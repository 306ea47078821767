/// Message type tag values (spec.md §6.1). Fixed on the wire; do not
/// reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    StatusRes = 1,
    AliasReq = 2,
    IndexReq = 3,
    SearchReq = 4,
    SearchRes = 5,
    RenameReq = 6,
    DropReq = 7,
    DropRes = 8,
    ListReq = 9,
    ListRes = 10,
    UnAliasReq = 11,
    ListAliasesReq = 12,
    ListAliasesRes = 13,
}

impl MessageType {
    pub fn from_wire(tag: u8) -> Option<Self> {
        use MessageType::*;
        Some(match tag {
            1 => StatusRes,
            2 => AliasReq,
            3 => IndexReq,
            4 => SearchReq,
            5 => SearchRes,
            6 => RenameReq,
            7 => DropReq,
            8 => DropRes,
            9 => ListReq,
            10 => ListRes,
            11 => UnAliasReq,
            12 => ListAliasesReq,
            13 => ListAliasesRes,
            _ => return None,
        })
    }

    pub fn to_wire(self) -> u8 {
        self as u8
    }
}

/// Message header: `id:u64 ‖ version:u8 ‖ type:u8`, 10 bytes, big-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Head {
    pub id: u64,
    pub version: u8,
    pub message_type: MessageType,
}

pub const HEAD_LEN: usize = 8 + 1 + 1;

/// `IndexReq`'s payload format tag (spec.md §6.1: `1=TEXT, 2=JSON`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text = 1,
    Json = 2,
}

impl Format {
    pub fn from_wire(tag: u8) -> Option<Self> {
        match tag {
            1 => Some(Format::Text),
            2 => Some(Format::Json),
            _ => None,
        }
    }

    pub fn to_wire(self) -> u8 {
        self as u8
    }
}
