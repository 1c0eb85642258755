//! Keys of the trailer dictionary.
//!
//! A xref stream carries the same keys in its stream dictionary.

pub const TRAILER: &[u8] = b"trailer";
pub const K_SIZE: &[u8] = b"Size";
pub const K_PREVIOUS: &[u8] = b"Prev";
pub const K_ENCRYPT: &[u8] = b"Encrypt";
pub const K_ROOT: &[u8] = b"Root";
pub const K_INFO: &[u8] = b"Info";
pub const K_ID: &[u8] = b"ID";
