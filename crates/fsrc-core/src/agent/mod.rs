//! Build agent: the staged pipeline run inside the build container.
mod deps;
pub use deps::{
    BOOTSTRAP_PACKAGES, CENTOS_RELEASE_PACKAGES, CENTOS_REPOS, bootstrap_command,
    dependency_commands, dnf,
};

mod options;
pub use options::{AgentArgs, agent_argument_spec, agent_command};

mod package;
pub use package::{
    Descriptor, SOURCE_PACKAGE_SUFFIX, copy_tree, find_source_package, placeholder,
    rebuild_command, render_descriptor, source_package_command,
};

mod pipeline;
pub use pipeline::{AgentOutcome, AgentPipeline, AgentStage};

mod platform;
pub use platform::{OS_RELEASE_PATH, OsRelease};

mod settings;
pub use settings::{AgentSettings, FeatureSet};

mod source;
pub use source::{acquisition_commands, archive_command, archive_name, has_checkout};
