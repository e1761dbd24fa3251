//! Inbound adapters driving the account directory.

pub mod http;
