//! Resume intake: document decoding and section extraction.

pub mod decode;
pub mod handlers;
pub mod sections;
