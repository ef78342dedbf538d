//! 2-approximation execution.

use crate::cancel::CancelToken;
use crate::error::SteinerError;
use crate::graph::tree::trim_steiner_leaves;
use crate::graph::{minimum_spanning_tree, Graph, ShortestPaths, Terminals};

use super::closure::MetricClosure;

/// Distance-network heuristic.
pub struct TwoApproximation;

impl TwoApproximation {
    /// Approximates a Steiner tree of `graph` spanning `terminals`.
    ///
    /// Terminals in different components produce a forest, which callers
    /// reject through validation.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::BTreeSet;
    /// use steiner_grasp::approx::TwoApproximation;
    /// use steiner_grasp::cancel::CancelToken;
    /// use steiner_grasp::graph::Graph;
    ///
    /// let graph = Graph::try_from_edges([(1, 2, 1.0), (2, 3, 1.0), (1, 3, 5.0)]).unwrap();
    /// let tree = TwoApproximation::solve(&graph, &BTreeSet::from([1, 3]), &CancelToken::new()).unwrap();
    /// assert_eq!(tree.total_weight(), 2.0);
    /// ```
    pub fn solve(
        graph: &Graph,
        terminals: &Terminals,
        cancel: &CancelToken,
    ) -> Result<Graph, SteinerError> {
        let mut paths = ShortestPaths::new(graph);
        Self::solve_with_paths(&mut paths, terminals, cancel)
    }

    /// Same as [`TwoApproximation::solve`], reusing an existing
    /// shortest-path cache over the graph.
    #[tracing::instrument(level = "trace", skip_all, fields(terminals = terminals.len()))]
    pub fn solve_with_paths(
        paths: &mut ShortestPaths<'_>,
        terminals: &Terminals,
        cancel: &CancelToken,
    ) -> Result<Graph, SteinerError> {
        let graph = paths.graph();
        let closure = MetricClosure::build(paths, terminals, cancel)?;
        let closure_tree = minimum_spanning_tree(closure.graph());

        let mut expanded = Graph::new();
        for vertex in closure_tree.vertices() {
            expanded.add_vertex(vertex);
        }
        for edge in closure_tree.edges() {
            cancel.check()?;
            let path = closure.path(edge.key()).ok_or_else(|| {
                SteinerError::InvariantViolation(format!(
                    "closure edge {}-{} has no realizing path",
                    edge.u, edge.v
                ))
            })?;
            for key in path.edges() {
                let (a, b) = key.endpoints();
                let weight = graph.weight(a, b).ok_or_else(|| {
                    SteinerError::InvariantViolation(format!("path edge {a}-{b} is not in the graph"))
                })?;
                expanded.add_edge(a, b, weight);
            }
        }

        let mut tree = minimum_spanning_tree(&expanded);
        trim_steiner_leaves(&mut tree, terminals);
        Ok(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::tree::is_steiner_tree;
    use crate::graph::tests::square;
    use std::collections::BTreeSet;

    #[test]
    fn test_square_instance() {
        let graph = square();
        let terminals = BTreeSet::from([1, 3]);
        let tree = TwoApproximation::solve(&graph, &terminals, &CancelToken::new()).unwrap();
        assert!(is_steiner_tree(&graph, &terminals, &tree));
        assert!((tree.total_weight() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_tree_instance_is_solved_exactly() {
        // On a tree the only Steiner tree is the minimal subtree.
        let graph = Graph::try_from_edges([
            (1, 2, 3.0),
            (2, 3, 1.0),
            (2, 4, 2.0),
            (4, 5, 4.0),
            (4, 6, 1.5),
        ])
        .unwrap();
        let terminals = BTreeSet::from([1, 5, 3]);
        let tree = TwoApproximation::solve(&graph, &terminals, &CancelToken::new()).unwrap();
        assert!(is_steiner_tree(&graph, &terminals, &tree));
        assert!((tree.total_weight() - 10.0).abs() < 1e-12);
        assert!(!tree.contains_vertex(6));
    }

    #[test]
    fn test_star_instance() {
        let graph = Graph::try_from_edges((1..=5).map(|i| (0, i, i as f64))).unwrap();
        let terminals: Terminals = (1..=5).collect();
        let tree = TwoApproximation::solve(&graph, &terminals, &CancelToken::new()).unwrap();
        assert!((tree.total_weight() - 15.0).abs() < 1e-12);
    }

    #[test]
    fn test_single_and_empty_terminals() {
        let graph = square();
        let single = TwoApproximation::solve(&graph, &BTreeSet::from([2]), &CancelToken::new())
            .unwrap();
        assert_eq!(single.vertex_count(), 1);
        assert_eq!(single.edge_count(), 0);

        let empty = TwoApproximation::solve(&graph, &Terminals::new(), &CancelToken::new()).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_disconnected_terminals_give_invalid_forest() {
        let graph = Graph::try_from_edges([(1, 2, 1.0), (3, 4, 1.0)]).unwrap();
        let terminals = BTreeSet::from([1, 4]);
        let forest = TwoApproximation::solve(&graph, &terminals, &CancelToken::new()).unwrap();
        assert!(!is_steiner_tree(&graph, &terminals, &forest));
    }
}
