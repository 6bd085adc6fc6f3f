//! Tarjan's strongly connected components algorithm.
//!
//! Two engines run the very same depth-first traversal: [`Recursive`] uses the
//! native call stack, [`Iterative`] simulates it with an explicit frame stack
//! on the heap. Both emit components in the same order, i.e. in reverse
//! topological order of the condensation, each component listed in the order
//! its nodes were popped off the candidate stack.
//!
//! ```text
//! index = 0; stack = []
//!
//! def dfs(v):
//!     indices[v] = lowlinks[v] = index; index += 1
//!     stack.push(v); on_stack.add(v)
//!     for w in graph[v]:
//!         if w not visited:
//!             dfs(w)
//!             lowlinks[v] = min(lowlinks[v], lowlinks[w])
//!         elif w in on_stack:
//!             lowlinks[v] = min(lowlinks[v], indices[w])
//!     if lowlinks[v] == indices[v]:
//!         pop stack down to and including v into a new component
//!
//! for v in roots:
//!     if v not visited: dfs(v)
//! ```
use std::cmp::min;
use std::collections::{BTreeSet, HashSet};

use tracing::{debug, trace};

use crate::error::Result;
use crate::graph::{Graph, Node};

mod iterative;
mod recursive;

use sealed::{Dfs, State};

pub use iterative::Iterative;
pub use recursive::Recursive;

/// Order-insensitive view of a set of components.
pub type Partition = HashSet<BTreeSet<Node>>;

/// A common interface for the engines.
///
/// An engine only supplies the depth-first search from a single root. Root
/// handling and the aggregation of components are shared, so all engines agree
/// on which traversals are started and in which order. The engines of this
/// crate are the only implementors:
///
/// ```compile_fail
/// use tarjan_scc::Tarjan;
///
/// struct Mine;
///
/// impl Tarjan for Mine {
///     fn name(&self) -> &'static str {
///         "mine"
///     }
/// }
/// ```
pub trait Tarjan: Dfs {
    fn name(&self) -> &'static str;

    /// Computes the strongly connected components of all nodes reachable from
    /// `roots`. Roots are tried in the given order, and a root that has already
    /// been reached from an earlier one does not start a traversal of its own.
    ///
    /// Fails with [`Error::UnknownNode`](crate::Error::UnknownNode) if a root
    /// does not belong to `graph`, before any node is visited.
    fn tarjan<T>(&self, graph: &Graph<T>, roots: &[Node]) -> Result<Sccs> {
        for &root in roots {
            graph.check(root)?;
        }
        Ok(traverse(self, graph, roots.iter().copied()))
    }

    fn partition<T>(&self, graph: &Graph<T>, roots: &[Node]) -> Result<Partition> {
        Ok(self.tarjan(graph, roots)?.to_partition())
    }

    /// Components of the whole graph, rooted at every node in id order.
    fn tarjan_all<T>(&self, graph: &Graph<T>) -> Sccs {
        traverse(self, graph, graph.nodes())
    }
}

fn traverse<E, T>(engine: &E, graph: &Graph<T>, roots: impl Iterator<Item = Node>) -> Sccs
where
    E: Tarjan + ?Sized,
{
    debug!(engine = engine.name(), nodes = graph.len(), "computing strongly connected components");
    let mut s = State::new(graph.len());
    for root in roots {
        if !s.is_visited(root) {
            engine.dfs(graph, root, &mut s);
            debug_assert!(s.stack.is_empty());
        }
    }
    s.into_sccs()
}

/// Runtime choice between the engines.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Engine {
    Recursive,
    Iterative,
}

impl Engine {
    pub const ALL: [Engine; 2] = [Engine::Recursive, Engine::Iterative];
}

impl Tarjan for Engine {
    fn name(&self) -> &'static str {
        match self {
            Self::Recursive => Recursive.name(),
            Self::Iterative => Iterative.name(),
        }
    }
}

impl Dfs for Engine {
    fn dfs<T>(&self, graph: &Graph<T>, root: Node, s: &mut State) {
        match self {
            Self::Recursive => Recursive.dfs(graph, root, s),
            Self::Iterative => Iterative.dfs(graph, root, s),
        }
    }
}

const UNVISITED: usize = usize::MAX;

mod sealed {
    use crate::graph::{Graph, Node};

    /// The bookkeeping of a single traversal, indexed by node id.
    pub struct State {
        pub(super) index: usize,
        pub(super) indices: Vec<usize>,
        pub(super) lowlinks: Vec<usize>,
        pub(super) on_stack: Vec<bool>,
        pub(super) stack: Vec<Node>,
        pub(super) components: Vec<Vec<Node>>,
    }

    /// The depth-first search from a single root. Not nameable outside the
    /// crate, which keeps [`Tarjan`](super::Tarjan) closed to other engines.
    pub trait Dfs {
        fn dfs<T>(&self, graph: &Graph<T>, root: Node, s: &mut State);
    }
}

impl State {
    fn new(n: usize) -> Self {
        Self {
            index: 0,
            indices: vec![UNVISITED; n],
            lowlinks: vec![UNVISITED; n],
            on_stack: vec![false; n],
            stack: Vec::new(),
            components: Vec::new(),
        }
    }

    fn is_visited(&self, v: Node) -> bool {
        self.indices[v.id()] != UNVISITED
    }

    fn is_on_stack(&self, v: Node) -> bool {
        self.on_stack[v.id()]
    }

    /// Assigns the next discovery index to `v` and pushes it onto the
    /// candidate stack.
    fn visit(&mut self, v: Node) {
        debug_assert!(!self.is_visited(v));
        self.indices[v.id()] = self.index;
        self.lowlinks[v.id()] = self.index;
        self.index += 1;
        self.stack.push(v);
        self.on_stack[v.id()] = true;
    }

    /// Folds the low-link of a child `w` that has been fully explored into the
    /// low-link of `v`.
    fn fold_lowlink(&mut self, v: Node, w: Node) {
        self.lowlinks[v.id()] = min(self.lowlinks[v.id()], self.lowlinks[w.id()]);
    }

    /// Folds the discovery index of a neighbour `w` into the low-link of `v`
    /// if `w` is still a candidate. Edges into finished components are ignored.
    fn fold_index(&mut self, v: Node, w: Node) {
        if self.is_on_stack(w) {
            self.lowlinks[v.id()] = min(self.lowlinks[v.id()], self.indices[w.id()]);
        }
    }

    /// Emits the component rooted at `v` if `v` is a root.
    fn finish(&mut self, v: Node) {
        debug_assert!(self.lowlinks[v.id()] <= self.indices[v.id()]);
        if self.lowlinks[v.id()] != self.indices[v.id()] {
            return;
        }
        let mut component = Vec::new();
        while let Some(w) = self.stack.pop() {
            self.on_stack[w.id()] = false;
            component.push(w);
            if w == v {
                break;
            }
        }
        debug_assert_eq!(component.last(), Some(&v));
        trace!(root = v.id(), size = component.len(), "emitting component");
        self.components.push(component);
    }

    fn into_sccs(self) -> Sccs {
        Sccs {
            components: self.components,
        }
    }
}

/// The strongly connected components found by a traversal, in emission order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Sccs {
    components: Vec<Vec<Node>>,
}

impl Sccs {
    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &[Node]> + '_ {
        self.components.iter().map(Vec::as_slice)
    }

    /// Number of nodes over all components, i.e. the number of nodes reached.
    pub fn node_count(&self) -> usize {
        self.components.iter().map(Vec::len).sum()
    }

    pub fn component_of(&self, node: Node) -> Option<&[Node]> {
        self.iter().find(|component| component.contains(&node))
    }

    pub fn to_partition(&self) -> Partition {
        self.iter()
            .map(|component| component.iter().copied().collect())
            .collect()
    }

    pub fn into_inner(self) -> Vec<Vec<Node>> {
        self.components
    }
}

impl IntoIterator for Sccs {
    type Item = Vec<Node>;
    type IntoIter = std::vec::IntoIter<Vec<Node>>;

    fn into_iter(self) -> Self::IntoIter {
        self.components.into_iter()
    }
}
