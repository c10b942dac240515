//! Directed weighted graph.
//!
//! # Data layout
//!
//! Edges are stored in insertion order and indexed by `EdgeId`.  Outgoing
//! adjacency uses **Compressed Sparse Row (CSR)** format over edge ids:
//!
//! ```text
//! out_edges[ out_start[v] .. out_start[v+1] ]
//! ```
//!
//! Unlike a sort-by-source edge array, the CSR indirection keeps edge ids
//! equal to insertion order, which the persisted route table relies on.
//! Within one vertex the ids are ascending, i.e. also in insertion order.
//!
//! A [`Graph`] has no mutating methods.  Build it with [`GraphBuilder`].

use std::ops::Range;

use tc_core::{EdgeId, VertexId};

use crate::{RouterError, RouterResult};

// ── Edge ──────────────────────────────────────────────────────────────────────

/// One directed, weighted transition.  `weight` is finite and ≥ 0.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Edge {
    pub from:   VertexId,
    pub to:     VertexId,
    pub weight: f64,
}

// ── Graph ─────────────────────────────────────────────────────────────────────

/// Immutable directed graph in CSR format.
#[derive(Clone, Debug, PartialEq)]
pub struct Graph {
    vertex_count: usize,
    /// Indexed by `EdgeId`.
    edges:        Vec<Edge>,
    /// CSR row pointer.  Length = `vertex_count + 1`.
    out_start:    Vec<u32>,
    out_edges:    Vec<EdgeId>,
}

impl Graph {
    /// A graph with no vertices and no edges.
    pub fn empty() -> Self {
        GraphBuilder::new().build()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertex_count == 0
    }

    /// The edge with id `id`, or `None` if out of range.
    #[inline]
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.index())
    }

    /// All edges, indexed by `EdgeId`.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Ids of the edges leaving `vertex`, in insertion order.
    ///
    /// Empty for an out-of-range vertex.
    #[inline]
    pub fn edges_from(&self, vertex: VertexId) -> &[EdgeId] {
        if vertex.index() >= self.vertex_count {
            return &[];
        }
        let start = self.out_start[vertex.index()] as usize;
        let end   = self.out_start[vertex.index() + 1] as usize;
        &self.out_edges[start..end]
    }

    pub fn out_degree(&self, vertex: VertexId) -> usize {
        self.edges_from(vertex).len()
    }
}

// ── GraphBuilder ──────────────────────────────────────────────────────────────

/// Accumulate vertices and edges, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use tc_core::VertexId;
/// use tc_router::GraphBuilder;
///
/// let mut b = GraphBuilder::new();
/// b.add_vertex_range(2);
/// let e = b.add_edge(VertexId(0), VertexId(1), 31.0).unwrap();
/// let g = b.build();
/// assert_eq!(g.edge(e).unwrap().weight, 31.0);
/// assert_eq!(g.edges_from(VertexId(0)), &[e]);
/// ```
#[derive(Debug, Default)]
pub struct GraphBuilder {
    vertex_count: usize,
    edges:        Vec<Edge>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate for the expected number of edges.
    pub fn with_capacity(edges: usize) -> Self {
        Self { vertex_count: 0, edges: Vec::with_capacity(edges) }
    }

    /// Append `count` vertices and return their index range.  Called once on
    /// a fresh builder this is `0..count`.
    ///
    /// # Panics
    /// Panics if the total vertex count would not fit a `VertexId`.
    pub fn add_vertex_range(&mut self, count: usize) -> Range<usize> {
        let start = self.vertex_count;
        let end = start + count;
        assert!(end <= u32::MAX as usize, "vertex count {end} exceeds VertexId range");
        self.vertex_count = end;
        start..end
    }

    /// Append a directed edge and return its id (sequential from 0).
    pub fn add_edge(&mut self, from: VertexId, to: VertexId, weight: f64) -> RouterResult<EdgeId> {
        for vertex in [from, to] {
            if vertex.index() >= self.vertex_count {
                return Err(RouterError::InvalidVertex { vertex, count: self.vertex_count });
            }
        }
        if !(weight.is_finite() && weight >= 0.0) {
            return Err(RouterError::InvalidWeight(weight));
        }
        let id = EdgeId::try_from(self.edges.len())
            .map_err(|_| RouterError::Inconsistent("edge count exceeds EdgeId range".into()))?;
        self.edges.push(Edge { from, to, weight });
        Ok(id)
    }

    pub fn vertex_count(&self) -> usize { self.vertex_count }
    pub fn edge_count(&self) -> usize { self.edges.len() }

    /// Freeze into a [`Graph`].  O(V + E).
    pub fn build(self) -> Graph {
        let vertex_count = self.vertex_count;
        let edge_count = self.edges.len();

        // Build CSR row pointer.
        let mut out_start = vec![0u32; vertex_count + 1];
        for e in &self.edges {
            out_start[e.from.index() + 1] += 1;
        }
        for i in 1..=vertex_count {
            out_start[i] += out_start[i - 1];
        }
        debug_assert_eq!(out_start[vertex_count] as usize, edge_count);

        // Scatter edge ids; enumeration order keeps each row ascending.
        let mut cursor = out_start.clone();
        let mut out_edges = vec![EdgeId(0); edge_count];
        for (i, e) in self.edges.iter().enumerate() {
            let slot = &mut cursor[e.from.index()];
            out_edges[*slot as usize] = EdgeId(i as u32);
            *slot += 1;
        }

        Graph { vertex_count, edges: self.edges, out_start, out_edges }
    }
}
