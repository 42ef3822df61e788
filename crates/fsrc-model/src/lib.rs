mod domain;
pub use domain::{
    ConfigValue, DEFAULT_BUILD_CONTEXT, DEFAULT_CONTAINERFILE, DEFAULT_GIT_REF, DEFAULT_GIT_REPO,
    DEFAULT_PACKAGE_NAME, DEFAULT_PACKAGE_SOURCE, DEFAULT_SOURCE_PATH, DEFAULT_WORKDIR,
    FALLBACK_WORKDIR,
};

mod error;
pub use error::{ModelError, ModelResult};

mod option;
pub use option::{ArgumentSpec, OptionKind, OptionSpec};

mod task;
pub use task::{Task, TaskSet};

mod version;
pub use version::{VersionInfo, normalize_commit_date};
