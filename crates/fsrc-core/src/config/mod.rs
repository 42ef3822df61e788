//! Layered configuration.
//!
//! Three sources are merged into one [`ResolvedConfig`]:
//! - values given on the command line ([`CliValues`]);
//! - an optional YAML file ([`ConfigFile`]), read under each option's primary
//!   key and then its alternate key;
//! - declared defaults.
//!
//! Host and agent each run their own [`ConfigResolver`] over their own
//! [`ArgumentSpec`](fsrc_model::ArgumentSpec); nothing is shared between the
//! two processes except the forwarded argument vector.
mod cli;
pub use cli::{CliValues, argument_spec};

mod error;
pub use error::ConfigError;

mod file;
pub use file::ConfigFile;

mod resolved;
pub use resolved::{OptionValues, ResolvedConfig};

mod resolver;
pub use resolver::ConfigResolver;
