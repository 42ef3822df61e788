//! Logging bootstrap shared by the `fsrc-build` host and the `fsrc-agent` build agent.
mod logger;
pub use logger::*;
