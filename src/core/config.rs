/// Server-wide configuration. Unlike the teacher crate's disk-backed
/// `Config` (storage path, memory limits, merge policy), this service has
/// nothing to persist — the only ambient knobs are the two listen addresses
/// spec.md §6.4 names.
#[derive(Debug, Clone)]
pub struct Config {
    pub tcp_addr: String,
    pub http_addr: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            tcp_addr: "localhost:7373".to_string(),
            http_addr: "localhost:7374".to_string(),
        }
    }
}
