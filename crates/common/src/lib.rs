//! Pieces shared by the server crate and the binary: response types and
//! tracing subscriber setup.

pub mod types;
pub mod utils;
