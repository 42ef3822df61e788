//! Host orchestrator: build-image and agent container.
mod example;
pub use example::EXAMPLE_CONFIG;

mod options;
pub use options::{HostArgs, host_argument_spec, host_command};

mod pipeline;
pub use pipeline::{HostPipeline, HostState};

mod settings;
pub use settings::HostSettings;
