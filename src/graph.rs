//! Directed graphs as an arena of nodes with ordered adjacency lists.
//!
//! A [`Node`] is a handle into the [`Graph`] that created it. Its identity is
//! the handle itself, so two nodes carrying equal payloads are still distinct
//! vertices.
use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Node {
    id: usize,
}

impl Node {
    pub const fn new(id: usize) -> Self {
        Self { id }
    }

    pub const fn id(self) -> usize {
        self.id
    }
}

#[derive(Clone, Debug)]
pub struct Graph<T> {
    payloads: Vec<T>,
    adjacents: Vec<Vec<Node>>,
}

impl<T> Default for Graph<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Graph<T> {
    pub fn new() -> Self {
        Self {
            payloads: Vec::new(),
            adjacents: Vec::new(),
        }
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            payloads: Vec::with_capacity(n),
            adjacents: Vec::with_capacity(n),
        }
    }

    pub fn add_node(&mut self, payload: T) -> Node {
        let node = Node::new(self.payloads.len());
        self.payloads.push(payload);
        self.adjacents.push(Vec::new());
        node
    }

    /// Appends `to` to the adjacency list of `from`. Self-loops and repeated
    /// edges are kept as given.
    pub fn add_edge(&mut self, from: Node, to: Node) -> Result<()> {
        self.check(to)?;
        self.check(from)?;
        self.adjacents[from.id].push(to);
        Ok(())
    }

    /// The outgoing neighbours of `node`, in insertion order.
    ///
    /// # Panics
    ///
    /// Panics if `node` does not belong to this graph.
    pub fn adjacents(&self, node: Node) -> &[Node] {
        &self.adjacents[node.id]
    }

    pub fn payload(&self, node: Node) -> Option<&T> {
        self.payloads.get(node.id)
    }

    pub fn contains(&self, node: Node) -> bool {
        node.id < self.payloads.len()
    }

    pub fn len(&self) -> usize {
        self.payloads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payloads.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacents.iter().map(Vec::len).sum()
    }

    pub fn nodes(&self) -> impl ExactSizeIterator<Item = Node> + DoubleEndedIterator {
        (0..self.len()).map(Node::new)
    }

    pub(crate) fn check(&self, node: Node) -> Result<()> {
        if self.contains(node) {
            Ok(())
        } else {
            Err(Error::UnknownNode(node))
        }
    }
}

impl Graph<()> {
    /// Builds a payload-free graph where node `i` has the outgoing neighbours
    /// `adjacency[i]`.
    pub fn from_adjacency(adjacency: Vec<Vec<Node>>) -> Result<Self> {
        let n = adjacency.len();
        if let Some(&node) = adjacency.iter().flatten().find(|node| node.id >= n) {
            return Err(Error::UnknownNode(node));
        }
        Ok(Self {
            payloads: vec![(); n],
            adjacents: adjacency,
        })
    }
}

/// Graph families used by the tests and benchmarks.
///
/// All of them accept `n = 0` and return the empty graph for it.
pub mod families {
    use rand::Rng;

    use super::{Graph, Node};

    /// `0 -> 1 -> ... -> n-1`
    pub fn path(n: usize) -> Graph<()> {
        let mut adjacents: Vec<_> = (1..n).map(|id| vec![Node::new(id)]).collect();
        if n > 0 {
            adjacents.push(vec![]);
        }
        unchecked(adjacents)
    }

    /// `0 <- 1 <- ... <- n-1`
    pub fn path_rev(n: usize) -> Graph<()> {
        let mut adjacents = Vec::with_capacity(n);
        if n > 0 {
            adjacents.push(vec![]);
            adjacents.extend((0..(n - 1)).map(|id| vec![Node::new(id)]));
        }
        unchecked(adjacents)
    }

    /// `0 -> 1 -> ... -> n-1 -> 0`
    pub fn cycle(n: usize) -> Graph<()> {
        unchecked((0..n).map(|id| vec![Node::new((id + 1) % n)]).collect())
    }

    /// Every node has an edge to every node, itself included.
    pub fn complete(n: usize) -> Graph<()> {
        let outgoing: Vec<_> = (0..n).map(Node::new).collect();
        unchecked((0..n).map(|_| outgoing.clone()).collect())
    }

    /// Each of the `n * n` possible edges is present with probability `p`,
    /// clamped to `[0, 1]`.
    ///
    /// # Panics
    ///
    /// Panics if `p` is NaN.
    pub fn random(n: usize, p: f64, rng: &mut impl Rng) -> Graph<()> {
        assert!(!p.is_nan(), "edge probability must be a number");
        let p = p.clamp(0.0, 1.0);
        unchecked(
            (0..n)
                .map(|_| (0..n).filter(|_| rng.gen_bool(p)).map(Node::new).collect())
                .collect(),
        )
    }

    fn unchecked(adjacents: Vec<Vec<Node>>) -> Graph<()> {
        debug_assert!(adjacents.iter().flatten().all(|w| w.id < adjacents.len()));
        Graph {
            payloads: vec![(); adjacents.len()],
            adjacents,
        }
    }
}

#[cfg(test)]
mod test {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn equal_payloads_are_distinct_nodes() {
        let mut graph = Graph::new();
        let a = graph.add_node("same");
        let b = graph.add_node("same");
        assert_ne!(a, b);
        assert_eq!(graph.payload(a), graph.payload(b));
    }

    #[test]
    fn edges_keep_order_and_duplicates() {
        let mut graph = Graph::new();
        let a = graph.add_node(0);
        let b = graph.add_node(1);
        graph.add_edge(a, b).unwrap();
        graph.add_edge(a, a).unwrap();
        graph.add_edge(a, b).unwrap();
        assert_eq!(graph.adjacents(a), &[b, a, b]);
        assert!(graph.adjacents(b).is_empty());
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn foreign_nodes_are_rejected() {
        let mut graph = Graph::new();
        let a = graph.add_node(());
        let stranger = Node::new(7);
        assert!(matches!(graph.add_edge(a, stranger), Err(Error::UnknownNode(n)) if n == stranger));
        assert!(matches!(graph.add_edge(stranger, a), Err(Error::UnknownNode(n)) if n == stranger));
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.payload(stranger).is_none());
    }

    #[test]
    fn from_adjacency_validates_targets() {
        let graph = Graph::from_adjacency(vec![vec![Node::new(1)], vec![]]).unwrap();
        assert_eq!(graph.len(), 2);
        assert!(matches!(
            Graph::from_adjacency(vec![vec![Node::new(2)], vec![]]),
            Err(Error::UnknownNode(n)) if n == Node::new(2)
        ));
    }

    #[test]
    fn families_have_expected_shape() {
        assert_eq!(families::path(4).edge_count(), 3);
        assert_eq!(families::path(0).len(), 0);
        assert!(families::path_rev(4).adjacents(Node::new(0)).is_empty());
        assert_eq!(families::path_rev(4).adjacents(Node::new(3)), &[Node::new(2)]);
        assert_eq!(families::cycle(3).adjacents(Node::new(2)), &[Node::new(0)]);
        assert_eq!(families::complete(5).edge_count(), 25);
        assert!(families::cycle(0).is_empty());
        assert!(families::complete(0).is_empty());
    }

    #[test]
    fn random_clamps_probability() {
        let mut rng = StdRng::seed_from_u64(1);
        let single = families::random(1, 1.5, &mut rng);
        assert_eq!(single.adjacents(Node::new(0)), &[Node::new(0)]);
        assert_eq!(families::random(4, 3.0, &mut rng).edge_count(), 16);
        assert_eq!(families::random(4, -0.5, &mut rng).edge_count(), 0);
        assert!(families::random(0, 0.5, &mut rng).is_empty());
    }

    #[test]
    #[should_panic(expected = "edge probability must be a number")]
    fn random_rejects_nan() {
        families::random(3, f64::NAN, &mut StdRng::seed_from_u64(1));
    }
}
