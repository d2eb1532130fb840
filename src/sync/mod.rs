pub mod client;
pub mod message;

pub use client::{ConnectionState, SyncClient};
pub use message::{EngineMessage, SetMessage, UpdateBody, WorldSnapshot};
