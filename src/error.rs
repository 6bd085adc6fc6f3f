use std::fmt;
use std::io;

use crate::graph::Node;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug)]
pub enum Error {
    /// A root or an edge endpoint does not belong to the graph.
    UnknownNode(Node),
    /// The thread running a computation could not be spawned.
    Spawn(io::Error),
    /// The computation panicked. Carries the panic message if it was a string.
    Panicked(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownNode(node) => write!(f, "node {} does not belong to the graph", node.id()),
            Self::Spawn(err) => write!(f, "failed to spawn thread: {}", err),
            Self::Panicked(msg) => write!(f, "computation panicked: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Spawn(err) => Some(err),
            Self::UnknownNode(_) | Self::Panicked(_) => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Spawn(err)
    }
}
