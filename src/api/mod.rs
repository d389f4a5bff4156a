//! Debug/health HTTP surface. See `debug.rs` for the router itself.

pub mod debug;

pub use debug::{router, DebugState};
