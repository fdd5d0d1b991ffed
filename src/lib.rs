//! Load `KEY=VALUE` environment files and read variables back with typed
//! accessors.
//!
//! [`EnvLoader::load`] is the safe default and writes into a process-isolated
//! in-memory map.
//!
//! Convenience loaders (`dotenv`, `from_path`, `from_filename`) mutate the
//! process environment and are `unsafe`, because callers must guarantee no
//! concurrent process-environment access.
//!
//! ```no_run
//! use envfile::EnvLoader;
//!
//! let mut loader = EnvLoader::new().path("app.env").base_dir("/etc/myapp");
//! let report = loader.load()?;
//! if report.file_found() {
//!     let port = loader.target_env().get_as_int("PORT")?.unwrap_or(8080);
//!     let debug = loader.target_env().get_as_bool("DEBUG").unwrap_or(false);
//!     println!("port={port} debug={debug}");
//! }
//! # Ok::<(), envfile::Error>(())
//! ```

mod env;
mod error;
mod loader;
mod model;
mod parser;
mod substitute;

pub use env::TargetEnv;
pub use error::{Error, ParseError, ParseErrorKind};
pub use loader::{EnvLoader, dotenv, from_filename, from_path};
pub use model::{Entry, LoadReport, MalformedLineMode, SubstitutionMode};
pub use parser::{
    parse_bytes, parse_bytes_with_mode, parse_reader, parse_reader_with_mode, parse_str,
    parse_str_with_mode,
};
pub use substitute::substitute;
