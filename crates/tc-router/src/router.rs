//! All-pairs route table and itinerary reconstruction.
//!
//! # Table layout
//!
//! The table is one flat `Vec<Option<RouteEntry>>` of `V × V` slots indexed
//! by `from * V + to`.  `None` means "no route".  An entry's `prev_edge` is
//! the last edge on the best known path; only the identity entries
//! `(v, v)` have `prev_edge == None`, which is where reconstruction stops.
//!
//! # Precomputation
//!
//! Edge-based Floyd–Warshall:
//!
//! 1. `(v, v) = (0, None)` for every vertex.
//! 2. Every edge `(a, b, w)` with `a ≠ b` seeds `(a, b) = (w, Some(edge))`,
//!    keeping the cheapest of parallel edges (the first on ties).
//! 3. For `k` in `0..V`, every `(i, j)` with both `(i, k)` and `(k, j)`
//!    present is relaxed through `k`.  A candidate replaces the slot only
//!    when the slot is empty or the candidate is strictly cheaper.
//!
//! Row `k` is copied before pass `k` and every row is relaxed against the
//! copy.  With non-negative weights row `k` cannot improve during its own
//! pass, so the copy changes nothing except making the rows independent,
//! which is what lets the `parallel` feature hand them to Rayon.
//!
//! O(V³) time, O(V²) space.  Run it once, offline, before serving queries.

use tc_core::{EdgeId, VertexId};
use tracing::info;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{Graph, RouterError, RouterResult};

// ── RouteEntry / Itinerary ────────────────────────────────────────────────────

/// Best known route for one ordered vertex pair.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RouteEntry {
    pub weight:    f64,
    pub prev_edge: Option<EdgeId>,
}

/// A reconstructed path: edges in travel order plus total weight.
#[derive(Clone, Debug, PartialEq)]
pub struct Itinerary {
    pub edges:        Vec<EdgeId>,
    pub total_weight: f64,
}

impl Itinerary {
    /// `true` when source and destination coincide.
    pub fn is_trivial(&self) -> bool {
        self.edges.is_empty()
    }
}

// ── Router ────────────────────────────────────────────────────────────────────

/// Owns a [`Graph`] and its precomputed route table.
///
/// Immutable once built; share it freely between reader threads.
#[derive(Clone, Debug, PartialEq)]
pub struct Router {
    graph: Graph,
    table: Vec<Option<RouteEntry>>,
}

impl Router {
    /// Precompute the route table for `graph`.
    ///
    /// An empty graph yields an empty table.
    pub fn build(graph: Graph) -> Self {
        let n = graph.vertex_count();
        let mut table = vec![None; n * n];
        if n == 0 {
            return Self { graph, table };
        }

        for v in 0..n {
            table[v * n + v] = Some(RouteEntry { weight: 0.0, prev_edge: None });
        }
        for (i, edge) in graph.edges().iter().enumerate() {
            if edge.from == edge.to {
                continue;
            }
            let slot = &mut table[edge.from.index() * n + edge.to.index()];
            if slot.is_none_or(|e| edge.weight < e.weight) {
                *slot = Some(RouteEntry { weight: edge.weight, prev_edge: Some(EdgeId(i as u32)) });
            }
        }

        for k in 0..n {
            let row_k = table[k * n..(k + 1) * n].to_vec();

            #[cfg(feature = "parallel")]
            table.par_chunks_mut(n).for_each(|row| relax_row(row, &row_k, k));

            #[cfg(not(feature = "parallel"))]
            for row in table.chunks_mut(n) {
                relax_row(row, &row_k, k);
            }
        }

        let routes = table.iter().filter(|e| e.is_some()).count();
        info!(
            vertices = n,
            edges = graph.edge_count(),
            routes,
            "route table built"
        );
        Self { graph, table }
    }

    /// Reassemble a router from a previously built table.
    ///
    /// `table` is the flat row-major `V × V` buffer.  Fails with
    /// [`RouterError::Inconsistent`] on a wrong length, an out-of-range
    /// predecessor edge, or a negative / non-finite weight.  The table is
    /// otherwise trusted: nothing is recomputed.
    pub fn from_parts(graph: Graph, table: Vec<Option<RouteEntry>>) -> RouterResult<Self> {
        let n = graph.vertex_count();
        if table.len() != n * n {
            return Err(RouterError::Inconsistent(format!(
                "table has {} slots, expected {n} × {n}",
                table.len()
            )));
        }
        for entry in table.iter().flatten() {
            if !(entry.weight.is_finite() && entry.weight >= 0.0) {
                return Err(RouterError::Inconsistent(format!("route weight {}", entry.weight)));
            }
            match entry.prev_edge {
                Some(edge) if edge.index() >= graph.edge_count() => {
                    return Err(RouterError::Inconsistent(format!(
                        "predecessor {edge} out of range ({} edges)",
                        graph.edge_count()
                    )));
                }
                _ => {}
            }
        }
        Ok(Self { graph, table })
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn vertex_count(&self) -> usize {
        self.graph.vertex_count()
    }

    /// The table row for `from`: one slot per destination vertex.
    pub fn row(&self, from: VertexId) -> RouterResult<&[Option<RouteEntry>]> {
        self.check(from)?;
        let n = self.vertex_count();
        Ok(&self.table[from.index() * n..(from.index() + 1) * n])
    }

    /// Every row in origin order.
    pub fn rows(&self) -> impl Iterator<Item = &[Option<RouteEntry>]> + '_ {
        // An empty table yields nothing; `max(1)` keeps `chunks` from panicking.
        self.table.chunks(self.vertex_count().max(1))
    }

    /// Raw table entry for `(from, to)`.
    pub fn entry(&self, from: VertexId, to: VertexId) -> RouterResult<Option<RouteEntry>> {
        self.check(to)?;
        Ok(self.row(from)?[to.index()])
    }

    /// Cheapest itinerary from `from` to `to`, or `None` if unreachable.
    ///
    /// `from == to` is always the empty, zero-weight itinerary.
    pub fn shortest(&self, from: VertexId, to: VertexId) -> RouterResult<Option<Itinerary>> {
        let entry = self.entry(from, to)?;
        if from == to {
            return Ok(Some(Itinerary { edges: vec![], total_weight: 0.0 }));
        }
        let Some(entry) = entry else {
            return Ok(None);
        };

        let n = self.vertex_count();
        let mut edges = Vec::new();
        let mut at = to;
        let mut prev = entry.prev_edge;
        while let Some(edge_id) = prev {
            // A shortest path visits each vertex at most once.
            if edges.len() >= n {
                return Err(RouterError::Inconsistent(format!(
                    "route {from} → {to} exceeds {n} hops"
                )));
            }
            let edge = self
                .graph
                .edge(edge_id)
                .filter(|e| e.to == at)
                .ok_or_else(|| {
                    RouterError::Inconsistent(format!("predecessor {edge_id} does not reach {at}"))
                })?;
            edges.push(edge_id);
            at = edge.from;
            prev = self.table[from.index() * n + at.index()]
                .ok_or_else(|| RouterError::Inconsistent(format!("broken chain {from} → {at}")))?
                .prev_edge;
        }
        if at != from {
            return Err(RouterError::Inconsistent(format!(
                "route {from} → {to} ends at {at}"
            )));
        }
        edges.reverse();

        Ok(Some(Itinerary { edges, total_weight: entry.weight }))
    }

    fn check(&self, vertex: VertexId) -> RouterResult<()> {
        let count = self.vertex_count();
        if vertex.index() >= count {
            return Err(RouterError::InvalidVertex { vertex, count });
        }
        Ok(())
    }
}

// ── Relaxation ────────────────────────────────────────────────────────────────

/// Relax one row (origin `i`) through vertex `k`, given a snapshot of row `k`.
#[inline]
fn relax_row(row_i: &mut [Option<RouteEntry>], row_k: &[Option<RouteEntry>], k: usize) {
    let Some(to_k) = row_i[k] else {
        return;
    };
    for (slot, through) in row_i.iter_mut().zip(row_k) {
        let Some(k_to_j) = through else {
            continue;
        };
        let candidate = to_k.weight + k_to_j.weight;
        if slot.is_none_or(|e| candidate < e.weight) {
            *slot = Some(RouteEntry {
                weight:    candidate,
                prev_edge: k_to_j.prev_edge.or(to_k.prev_edge),
            });
        }
    }
}
