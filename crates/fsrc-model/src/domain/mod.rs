mod value;
pub use value::ConfigValue;

mod constants;
pub use constants::{
    DEFAULT_BUILD_CONTEXT, DEFAULT_CONTAINERFILE, DEFAULT_GIT_REF, DEFAULT_GIT_REPO,
    DEFAULT_PACKAGE_NAME, DEFAULT_PACKAGE_SOURCE, DEFAULT_SOURCE_PATH, DEFAULT_WORKDIR,
    FALLBACK_WORKDIR,
};
