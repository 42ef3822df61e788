//! Well-known defaults shared by the host orchestrator and the build agent.
//!
//! The agent declares these as its clap defaults; the host only sees them
//! through the agent's option declarations, never by importing paths directly.

/// Source checkout location inside the build container.
pub const DEFAULT_SOURCE_PATH: &str = "/srv/build/source";

/// Packaging sources (descriptor template, patches) baked into the image.
pub const DEFAULT_PACKAGE_SOURCE: &str = "/usr/local/lib/sources";

/// Workdir inside the build container where artifacts accumulate.
pub const DEFAULT_WORKDIR: &str = "/srv/build/work";

/// Workspace root used when the workdir was resolved to nothing.
pub const FALLBACK_WORKDIR: &str = "/tmp";

/// Package being built. Drives every artifact file name.
pub const DEFAULT_PACKAGE_NAME: &str = "samba";

/// Git reference checked out when none is configured.
pub const DEFAULT_GIT_REF: &str = "master";

/// Upstream repository cloned when no checkout is mounted.
pub const DEFAULT_GIT_REPO: &str = "https://git.samba.org/samba.git";

/// Image descriptor used by the host for `<engine> build -f`.
///
/// Relative to the repository checkout `fsrc-build` is run from.
pub const DEFAULT_CONTAINERFILE: &str = "images/fromsource/Containerfile";

/// Image build context: the repository checkout, so the image can compile
/// the agent and copy the packaging sources.
pub const DEFAULT_BUILD_CONTEXT: &str = ".";
