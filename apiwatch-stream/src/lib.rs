pub mod client;
pub mod connection;
pub mod decode;

pub use client::CollectorClient;
pub use connection::{ConnectionState, LiveConnection, StreamItem};
pub use decode::{WireMessage, decode_message};
