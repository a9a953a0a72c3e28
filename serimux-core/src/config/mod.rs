//! Configuration types
//!
//! Per-endpoint engine settings and the board-level engine bindings. Both
//! serialize with serde and are stored as postcard binary data.

pub mod board;
pub mod endpoint;

pub use board::*;
pub use endpoint::*;
