//! Invocation intent: which image, and whether to remove the container on exit

use serde::Serialize;
use tracing::warn;

/// Image used when none is given
pub const DEFAULT_IMAGE: &str = "alpine";

/// Leading argument that selects remove-on-exit mode
pub const REMOVE_TOKEN: &str = "rm";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Intent {
    pub remove_on_exit: bool,
    pub image: String,
}

impl Intent {
    /// Classify the positional arguments.
    ///
    /// Returns `None` for an empty argument list, which is a request for usage
    /// help rather than a session.
    pub fn from_args(args: &[String]) -> Option<Self> {
        let (first, rest) = args.split_first()?;

        let (remove_on_exit, image, extra) = if first == REMOVE_TOKEN {
            (true, rest.first(), rest.get(1..).unwrap_or_default())
        } else {
            (false, Some(first), rest)
        };

        if !extra.is_empty() {
            warn!(ignored = ?extra, "ignoring extra arguments");
        }

        let image = match image {
            Some(name) if !name.is_empty() => name.clone(),
            _ => DEFAULT_IMAGE.to_string(),
        };

        Some(Self {
            remove_on_exit,
            image,
        })
    }
}
