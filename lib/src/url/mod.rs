//! Percent-encoding for URL query components.

mod encode;

pub use encode::{encode_plus, decode_plus};
