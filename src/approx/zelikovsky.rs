//! Zelikovsky's 11/6-approximation.

use std::collections::BTreeSet;

use tracing::debug;

use crate::cancel::CancelToken;
use crate::error::SteinerError;
use crate::graph::tree::trim_steiner_leaves;
use crate::graph::{minimum_spanning_tree, Graph, ShortestPaths, Terminals, Vertex};

use super::closure::MetricClosure;
use super::runner::TwoApproximation;

/// A terminal triple with its cheapest center.
#[derive(Debug, Clone)]
struct Triple {
    members: [Vertex; 3],
    center: Vertex,
    /// Sum of the distances from `center` to the three members.
    cost: f64,
}

/// Triple-contraction heuristic on top of the distance network.
///
/// Repeatedly picks the terminal triple whose contraction in the metric
/// closure saves the most weight after paying for its center, and pins
/// that center as a Steiner vertex. The 2-approximation is then run with
/// the pinned vertices as extra terminals.
pub struct Zelikovsky;

impl Zelikovsky {
    /// Approximates a Steiner tree of `graph` spanning `terminals`.
    ///
    /// # Examples
    ///
    /// ```
    /// use steiner_grasp::approx::Zelikovsky;
    /// use steiner_grasp::cancel::CancelToken;
    /// use steiner_grasp::graph::Graph;
    ///
    /// // Terminals 1, 2, 3 pairwise at distance 2; hub 0 at 1.1 from each.
    /// let mut edges = vec![(1, 2, 2.0), (2, 3, 2.0), (1, 3, 2.0)];
    /// edges.extend((1..=3).map(|t| (0, t, 1.1)));
    /// let graph = Graph::try_from_edges(edges).unwrap();
    /// let tree = Zelikovsky::solve(&graph, &(1..=3).collect(), &CancelToken::new()).unwrap();
    /// assert!((tree.total_weight() - 3.3).abs() < 1e-12);
    /// ```
    pub fn solve(
        graph: &Graph,
        terminals: &Terminals,
        cancel: &CancelToken,
    ) -> Result<Graph, SteinerError> {
        let mut paths = ShortestPaths::new(graph);
        Self::solve_with_paths(&mut paths, terminals, cancel)
    }

    /// Same as [`Zelikovsky::solve`], reusing an existing shortest-path
    /// cache over the graph.
    ///
    /// The plain 2-approximation tree is returned instead whenever it is
    /// strictly lighter.
    #[tracing::instrument(level = "trace", skip_all, fields(terminals = terminals.len()))]
    pub fn solve_with_paths(
        paths: &mut ShortestPaths<'_>,
        terminals: &Terminals,
        cancel: &CancelToken,
    ) -> Result<Graph, SteinerError> {
        let pinned = Self::pin_centers(paths, terminals, cancel)?;
        let plain = TwoApproximation::solve_with_paths(paths, terminals, cancel)?;
        if pinned.is_empty() {
            return Ok(plain);
        }

        let mut extended = terminals.clone();
        extended.extend(pinned.iter().copied());
        let mut tree = TwoApproximation::solve_with_paths(paths, &extended, cancel)?;
        trim_steiner_leaves(&mut tree, terminals);
        debug!(
            pinned = pinned.len(),
            weight = tree.total_weight(),
            plain = plain.total_weight(),
            "centers pinned"
        );
        if plain.total_weight() < tree.total_weight() {
            return Ok(plain);
        }
        Ok(tree)
    }

    /// Greedily selects triple centers while contracting a triple still
    /// pays for its center.
    fn pin_centers(
        paths: &mut ShortestPaths<'_>,
        terminals: &Terminals,
        cancel: &CancelToken,
    ) -> Result<BTreeSet<Vertex>, SteinerError> {
        let triples = Self::triples(paths, terminals, cancel)?;
        let mut pinned = BTreeSet::new();
        if triples.is_empty() {
            return Ok(pinned);
        }

        let mut closure = MetricClosure::build(paths, terminals, cancel)?.graph().clone();
        loop {
            cancel.check()?;
            let spanning = minimum_spanning_tree(&closure).total_weight();
            let mut best: Option<(f64, &Triple)> = None;
            for triple in &triples {
                cancel.check()?;
                let mut contracted = closure.clone();
                contract(&mut contracted, &triple.members);
                let win = spanning - minimum_spanning_tree(&contracted).total_weight() - triple.cost;
                if best.map_or(true, |(max, _)| win > max) {
                    best = Some((win, triple));
                }
            }
            let Some((win, triple)) = best.filter(|(win, _)| *win > 0.0) else {
                break;
            };
            debug!(win, center = triple.center, members = ?triple.members, "pinning center");
            contract(&mut closure, &triple.members);
            pinned.insert(triple.center);
        }
        Ok(pinned)
    }

    /// Every reachable terminal triple with the vertex minimizing the sum
    /// of distances to its members.
    fn triples(
        paths: &mut ShortestPaths<'_>,
        terminals: &Terminals,
        cancel: &CancelToken,
    ) -> Result<Vec<Triple>, SteinerError> {
        let graph = paths.graph();
        let members: Vec<Vertex> = terminals
            .iter()
            .copied()
            .filter(|t| graph.contains_vertex(*t))
            .collect();
        if members.len() < 3 {
            return Ok(Vec::new());
        }
        let vertices: Vec<Vertex> = graph.vertex_set().into_iter().collect();
        let mut distances = Vec::with_capacity(members.len());
        for &terminal in &members {
            cancel.check()?;
            let row: Vec<f64> = vertices.iter().map(|&v| paths.distance(terminal, v)).collect();
            distances.push(row);
        }

        let mut triples = Vec::new();
        for i in 0..members.len() {
            for j in i + 1..members.len() {
                cancel.check()?;
                for k in j + 1..members.len() {
                    let mut center: Option<(f64, Vertex)> = None;
                    for (index, &vertex) in vertices.iter().enumerate() {
                        let cost = distances[i][index] + distances[j][index] + distances[k][index];
                        if cost.is_finite() && center.map_or(true, |(best, _)| cost < best) {
                            center = Some((cost, vertex));
                        }
                    }
                    if let Some((cost, center)) = center {
                        triples.push(Triple {
                            members: [members[i], members[j], members[k]],
                            center,
                            cost,
                        });
                    }
                }
            }
        }
        Ok(triples)
    }
}

/// Sets the closure edges among `members` to zero weight.
fn contract(closure: &mut Graph, members: &[Vertex; 3]) {
    for (i, &a) in members.iter().enumerate() {
        for &b in &members[i + 1..] {
            if closure.contains_edge(a, b) {
                closure.add_edge(a, b, 0.0);
            }
        }
    }
}
