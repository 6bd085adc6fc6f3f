use super::sealed::{Dfs, State};
use super::Tarjan;
use crate::graph::{Graph, Node};

/// Tarjan's algorithm on the native call stack.
///
/// This is a direct transcription of the textbook algorithm and the reference
/// the [`Iterative`](super::Iterative) engine is checked against. The recursion
/// depth equals the length of the longest DFS path, so deep graphs such as long
/// paths overflow the stack. Use [`with_stack_size`](crate::with_stack_size) to
/// give it a larger one.
#[derive(Clone, Copy, Debug, Default)]
pub struct Recursive;

impl Tarjan for Recursive {
    fn name(&self) -> &'static str {
        "recursive"
    }
}

impl Dfs for Recursive {
    fn dfs<T>(&self, graph: &Graph<T>, root: Node, s: &mut State) {
        dfs(root, graph, s)
    }
}

fn dfs<T>(v: Node, graph: &Graph<T>, s: &mut State) {
    s.visit(v);

    for &w in graph.adjacents(v) {
        if !s.is_visited(w) {
            dfs(w, graph, s);
            s.fold_lowlink(v, w);
        } else {
            s.fold_index(v, w);
        }
    }

    s.finish(v);
}
