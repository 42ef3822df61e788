//! Build orchestration: configuration, host pipeline and build agent.
//!
//! The host side ([`host`]) resolves its configuration, picks a container
//! engine ([`EngineSelector`]), builds the build-image and starts the agent
//! container with the agent's options forwarded ([`forward_arguments`]).
//! The agent side ([`agent`]) re-resolves the forwarded options and runs the
//! staged package build.
pub mod agent;
pub mod config;
pub mod error;
pub mod host;

mod engine;
pub use engine::{ENGINE_CANDIDATES, EngineSelector};

mod forward;
pub use forward::forward_arguments;

mod logging;
pub use logging::LogArgs;

mod version;
pub use version::VersionDeriver;
