//! Strongly connected components of directed graphs with Tarjan's algorithm.
//!
//! The same traversal is available on the native call stack ([`Recursive`])
//! and on an explicit, heap-allocated frame stack ([`Iterative`]). The latter
//! handles graphs of any depth without growing the thread's stack.
//!
//! ```
//! use tarjan_scc::{Graph, Iterative, Tarjan};
//!
//! let mut graph = Graph::new();
//! let a = graph.add_node("a");
//! let b = graph.add_node("b");
//! let c = graph.add_node("c");
//! graph.add_edge(a, b)?;
//! graph.add_edge(b, a)?;
//! graph.add_edge(b, c)?;
//!
//! let sccs = Iterative.tarjan(&graph, &[a])?;
//! assert_eq!(sccs.into_inner(), vec![vec![c], vec![b, a]]);
//! # Ok::<(), tarjan_scc::Error>(())
//! ```
use std::any::Any;

pub mod error;
pub mod graph;
pub mod tarjan;

pub use error::{Error, Result};
pub use graph::{families, Graph, Node};
pub use tarjan::{Engine, Iterative, Partition, Recursive, Sccs, Tarjan};

static_assertions::assert_impl_all!(Node: Copy, Send, Sync);
static_assertions::assert_impl_all!(Graph<()>: Send, Sync);
static_assertions::assert_impl_all!(Sccs: Send, Sync);
static_assertions::assert_impl_all!(Recursive: Copy, Send, Sync);
static_assertions::assert_impl_all!(Iterative: Copy, Send, Sync);
static_assertions::assert_impl_all!(Engine: Copy, Send, Sync);

/// Runs `f` on a fresh thread with a stack of `size` bytes and waits for it.
///
/// A panic inside `f` is reported as [`Error::Panicked`]. Overflowing the
/// stack aborts the whole process and cannot be caught.
pub fn with_stack_size<F, R>(size: usize, f: F) -> Result<R>
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    let handle = std::thread::Builder::new().stack_size(size).spawn(f)?;
    handle
        .join()
        .map_err(|payload| Error::Panicked(panic_message(payload)))
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    match payload.downcast::<String>() {
        Ok(msg) => *msg,
        Err(payload) => match payload.downcast::<&'static str>() {
            Ok(msg) => (*msg).to_string(),
            Err(_) => String::from("<non-string panic payload>"),
        },
    }
}
