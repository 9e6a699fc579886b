//! dcx - a throwaway shell inside a container
//!
//! dcx starts a detached container with the current directory mounted at
//! `/shared`, makes sure `bash` is available, sets a prompt that shows both
//! the host and container location, and attaches the terminal. With `rm` the
//! container is removed once the shell exits.
//!
//! # Example
//!
//! ```no_run
//! use dcx::{CliRuntime, HostContext, Intent, Session};
//!
//! let intent = Intent::from_args(&["rm".to_string(), "debian".to_string()]).unwrap();
//! let host = HostContext::resolve().unwrap();
//! let mut session = Session::new(CliRuntime::new("docker"), intent, host);
//! let outcome = session.run().unwrap();
//! std::process::exit(outcome.exit_code);
//! ```

pub mod cli;
pub mod error;
pub mod host;
pub mod logging;
pub mod output;
pub mod runtime;
pub mod session;

pub use error::{CommandFailure, DcxError, Result};
pub use host::HostContext;
pub use output::{format_plan, DryRunPlan, OutputFormat};
pub use runtime::{CliRuntime, ContainerRuntime, DryRunRuntime};
pub use session::{Intent, Session, SessionOutcome};
