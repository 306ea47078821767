pub mod evaluator;
pub mod repl;
pub mod tcp_client;
