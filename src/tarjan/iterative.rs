use tracing::trace;

use super::sealed::{Dfs, State};
use super::Tarjan;
use crate::graph::{Graph, Node};

/// Tarjan's algorithm with the call stack simulated on the heap.
///
/// Every pending call of the recursive version is a frame on an explicit
/// frame stack. A frame runs in two phases. While *entering* it scans the
/// adjacency list of its node from a cursor and stops at the first unvisited
/// neighbour, which becomes the only child frame pushed on top of it. When the
/// child has returned, the parent resumes scanning from the cursor. Once the
/// neighbours are exhausted the frame is *returning*: it hands its low-link to
/// its caller, emits a component if its node is a root, and is popped.
///
/// Pushing one child at a time keeps the frame stack contiguous: the frames
/// above a frame always belong to the subtree of its current child. Pushing all
/// unvisited neighbours at once would interleave the subtrees of siblings and
/// fold low-links into the wrong callers as soon as a node has two unvisited
/// neighbours.
#[derive(Clone, Copy, Debug, Default)]
pub struct Iterative;

impl Tarjan for Iterative {
    fn name(&self) -> &'static str {
        "iterative"
    }
}

impl Dfs for Iterative {
    fn dfs<T>(&self, graph: &Graph<T>, root: Node, s: &mut State) {
        run(graph, s, vec![Frame::call(root, None)])
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Phase {
    /// Scanning the neighbours, starting at index `next`. A frame entered for
    /// the first time has not visited its node yet.
    Entering { first: bool, next: usize },
    Returning,
}

#[derive(Clone, Copy, Debug)]
struct Frame {
    node: Node,
    caller: Option<Node>,
    phase: Phase,
}

impl Frame {
    fn call(node: Node, caller: Option<Node>) -> Self {
        Self {
            node,
            caller,
            phase: Phase::Entering {
                first: true,
                next: 0,
            },
        }
    }
}

fn run<T>(graph: &Graph<T>, s: &mut State, mut frames: Vec<Frame>) {
    while let Some(frame) = frames.last_mut() {
        let (v, phase) = (frame.node, frame.phase);
        match phase {
            Phase::Entering { first, next } => {
                if first {
                    if s.is_visited(v) {
                        // The node was reached some other way after this frame
                        // had been pushed.
                        trace!(node = v.id(), "discarding phantom frame");
                        frames.pop();
                        continue;
                    }
                    s.visit(v);
                }

                let adjacents = graph.adjacents(v);
                let mut child = None;
                for (i, &w) in adjacents.iter().enumerate().skip(next) {
                    if s.is_visited(w) {
                        s.fold_index(v, w);
                    } else {
                        child = Some((i, w));
                        break;
                    }
                }

                match child {
                    Some((i, w)) => {
                        frame.phase = Phase::Entering {
                            first: false,
                            next: i + 1,
                        };
                        frames.push(Frame::call(w, Some(v)));
                    }
                    None => frame.phase = Phase::Returning,
                }
            }
            Phase::Returning => {
                if let Some(caller) = frame.caller {
                    s.fold_lowlink(caller, v);
                }
                s.finish(v);
                frames.pop();
            }
        }
    }
}

#[cfg(test)]
mod test {
    #![allow(non_upper_case_globals)]
    use super::*;
    use crate::graph::families;
    use crate::with_stack_size;

    const v0: Node = Node::new(0);
    const v1: Node = Node::new(1);
    const v2: Node = Node::new(2);
    const v3: Node = Node::new(3);

    const LARGE: usize = 100_000;

    #[test]
    fn phantom_frames_are_discarded() {
        // 0 -> 1 -> 2 -> 0, with a second frame for 1 queued below the root.
        let graph = families::cycle(3);
        let mut s = State::new(graph.len());
        run(&graph, &mut s, vec![Frame::call(v1, Some(v0)), Frame::call(v0, None)]);
        assert!(s.stack.is_empty());
        assert_eq!(s.into_sccs().into_inner(), vec![vec![v2, v1, v0]]);
    }

    #[test]
    fn only_one_child_frame_per_parent() {
        // 0 -> {1, 2, 3}, all leaves: the leaves are entered one after another.
        let graph = Graph::from_adjacency(vec![vec![v1, v2, v3], vec![], vec![], vec![]]).unwrap();
        let sccs = Iterative.tarjan(&graph, &[v0]).unwrap();
        assert_eq!(sccs.into_inner(), vec![vec![v1], vec![v2], vec![v3], vec![v0]]);
    }

    #[test]
    fn sibling_subtrees_do_not_interleave() {
        // 0 -> {1, 2}, 1 -> 0, 2 -> 3, 3 -> 2: the second child must not inherit
        // the low-link of the first.
        let graph = Graph::from_adjacency(vec![vec![v1, v2], vec![v0], vec![v3], vec![v2]]).unwrap();
        let sccs = Iterative.tarjan(&graph, &[v0]).unwrap();
        assert_eq!(sccs.into_inner(), vec![vec![v3, v2], vec![v1, v0]]);
    }

    #[test]
    fn iterative_is_stack_safe() {
        let graph = families::path(LARGE);
        let sccs = with_stack_size(64 * 1024, move || Iterative.tarjan_all(&graph)).unwrap();
        assert_eq!(sccs.len(), LARGE);
        assert!(sccs.into_iter().rev().enumerate().all(|(id, c)| c == vec![Node::new(id)]));
    }
}
