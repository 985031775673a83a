//! Left-right planarity test (Brandes, "The Left-Right Planarity Test").
//!
//! Phase one orients the graph along a DFS forest and computes low points. Phase two walks the
//! forest again, keeping a stack of conflict pairs of return-edge intervals; an unresolvable
//! conflict proves the graph non-planar. Phase three turns the recorded sides into a rotation
//! system. All three walks keep their own frame stack instead of recursing.

use super::embedding::PlanarEmbedding;
use crate::error::{Error, Result};
use rustc_hash::FxHashSet;
use wdplot_graph::alg::UndirectedProjection;

type EdgeId = usize;

const UNVISITED: usize = usize::MAX;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Interval {
    low: Option<EdgeId>,
    high: Option<EdgeId>,
}

impl Interval {
    fn is_empty(&self) -> bool {
        self.low.is_none() && self.high.is_none()
    }
}

#[derive(Debug, Clone, Copy)]
struct ConflictPair {
    /// Identity used to recognise the stack bottom recorded for an edge.
    id: usize,
    left: Interval,
    right: Interval,
}

impl ConflictPair {
    fn swap(&mut self) {
        std::mem::swap(&mut self.left, &mut self.right);
    }
}

/// DFS frame: a vertex, the index of its next outgoing edge, and the tree edge whose subtree
/// is being explored, if any.
#[derive(Debug, Clone, Copy)]
struct Frame {
    v: usize,
    next: usize,
    descended: Option<EdgeId>,
}

impl Frame {
    fn new(v: usize) -> Self {
        Self {
            v,
            next: 0,
            descended: None,
        }
    }
}

/// Runs the full test and returns the embedding when the projection is planar.
pub(crate) fn planar_embedding(graph: &UndirectedProjection) -> Result<Option<PlanarEmbedding>> {
    let mut state = LrState::new(graph);
    if !state.run_test() {
        return Ok(None);
    }
    state.embed().map(Some)
}

/// Runs phases one and two only.
pub(crate) fn is_planar(graph: &UndirectedProjection) -> bool {
    LrState::new(graph).run_test()
}

struct LrState<'a> {
    adjacency: &'a [Vec<usize>],
    n: usize,
    m: usize,

    // Oriented edges, in orientation order.
    src: Vec<usize>,
    dst: Vec<usize>,
    out: Vec<Vec<EdgeId>>,
    oriented: FxHashSet<(usize, usize)>,

    height: Vec<usize>,
    parent_edge: Vec<Option<EdgeId>>,
    roots: Vec<usize>,

    lowpt: Vec<usize>,
    lowpt2: Vec<usize>,
    nesting_depth: Vec<i64>,
    ordered_adjs: Vec<Vec<EdgeId>>,

    refs: Vec<Option<EdgeId>>,
    side: Vec<i8>,
    stack: Vec<ConflictPair>,
    stack_bottom: Vec<Option<usize>>,
    lowpt_edge: Vec<Option<EdgeId>>,
    next_pair_id: usize,

    left_ref: Vec<Option<usize>>,
    right_ref: Vec<Option<usize>>,
}

impl<'a> LrState<'a> {
    fn new(graph: &'a UndirectedProjection) -> Self {
        let n = graph.vertex_count();
        let m = graph.edge_count();
        Self {
            adjacency: &graph.adjacency,
            n,
            m,
            src: Vec::with_capacity(m),
            dst: Vec::with_capacity(m),
            out: vec![Vec::new(); n],
            oriented: FxHashSet::default(),
            height: vec![UNVISITED; n],
            parent_edge: vec![None; n],
            roots: Vec::new(),
            lowpt: Vec::with_capacity(m),
            lowpt2: Vec::with_capacity(m),
            nesting_depth: Vec::with_capacity(m),
            ordered_adjs: vec![Vec::new(); n],
            refs: Vec::with_capacity(m),
            side: Vec::with_capacity(m),
            stack: Vec::new(),
            stack_bottom: Vec::with_capacity(m),
            lowpt_edge: Vec::with_capacity(m),
            next_pair_id: 0,
            left_ref: vec![None; n],
            right_ref: vec![None; n],
        }
    }

    fn run_test(&mut self) -> bool {
        if self.n > 2 && self.m > 3 * self.n - 6 {
            return false;
        }

        for v in 0..self.n {
            if self.height[v] == UNVISITED {
                self.height[v] = 0;
                self.roots.push(v);
                self.dfs_orientation(v);
            }
        }

        for v in 0..self.n {
            let mut edges = self.out[v].clone();
            edges.sort_by_key(|&e| self.nesting_depth[e]);
            self.ordered_adjs[v] = edges;
        }

        for i in 0..self.roots.len() {
            let root = self.roots[i];
            if !self.dfs_testing(root) {
                return false;
            }
        }
        true
    }

    fn orient(&mut self, v: usize, w: usize) -> EdgeId {
        let e = self.src.len();
        self.src.push(v);
        self.dst.push(w);
        self.out[v].push(e);
        self.lowpt.push(self.height[v]);
        self.lowpt2.push(self.height[v]);
        self.nesting_depth.push(0);
        self.refs.push(None);
        self.side.push(1);
        self.stack_bottom.push(None);
        self.lowpt_edge.push(None);
        e
    }

    fn dfs_orientation(&mut self, root: usize) {
        let mut stack = vec![Frame::new(root)];
        while let Some(top) = stack.len().checked_sub(1) {
            let Frame { v, next, descended } = stack[top];
            let vw = match descended {
                Some(vw) => {
                    stack[top].descended = None;
                    vw
                }
                None => {
                    let Some(&w) = self.adjacency[v].get(next) else {
                        stack.pop();
                        continue;
                    };
                    if !self.oriented.insert((v.min(w), v.max(w))) {
                        stack[top].next += 1;
                        continue;
                    }
                    let vw = self.orient(v, w);
                    if self.height[w] == UNVISITED {
                        self.parent_edge[w] = Some(vw);
                        self.height[w] = self.height[v] + 1;
                        stack[top].descended = Some(vw);
                        stack.push(Frame::new(w));
                        continue;
                    }
                    self.lowpt[vw] = self.height[w];
                    vw
                }
            };
            stack[top].next += 1;
            self.finish_orientation(v, vw);
        }
    }

    /// Nesting depth of `vw` and its low points folded into the parent edge of `v`.
    fn finish_orientation(&mut self, v: usize, vw: EdgeId) {
        self.nesting_depth[vw] = 2 * self.lowpt[vw] as i64;
        if self.lowpt2[vw] < self.height[v] {
            self.nesting_depth[vw] += 1;
        }

        let Some(e) = self.parent_edge[v] else {
            return;
        };
        if self.lowpt[vw] < self.lowpt[e] {
            self.lowpt2[e] = self.lowpt[e].min(self.lowpt2[vw]);
            self.lowpt[e] = self.lowpt[vw];
        } else if self.lowpt[vw] > self.lowpt[e] {
            self.lowpt2[e] = self.lowpt2[e].min(self.lowpt[vw]);
        } else {
            self.lowpt2[e] = self.lowpt2[e].min(self.lowpt2[vw]);
        }
    }

    fn push_pair(&mut self, left: Interval, right: Interval) {
        let id = self.next_pair_id;
        self.next_pair_id += 1;
        self.stack.push(ConflictPair { id, left, right });
    }

    fn top_id(&self) -> Option<usize> {
        self.stack.last().map(|p| p.id)
    }

    fn dfs_testing(&mut self, root: usize) -> bool {
        let mut stack = vec![Frame::new(root)];
        while let Some(top) = stack.len().checked_sub(1) {
            let Frame { v, next, descended } = stack[top];
            let ei = match descended {
                Some(ei) => {
                    stack[top].descended = None;
                    ei
                }
                None => {
                    let Some(&ei) = self.ordered_adjs[v].get(next) else {
                        stack.pop();
                        if let Some(e) = self.parent_edge[v] {
                            self.remove_back_edges(e);
                        }
                        continue;
                    };
                    let w = self.dst[ei];
                    self.stack_bottom[ei] = self.top_id();
                    if self.parent_edge[w] == Some(ei) {
                        stack[top].descended = Some(ei);
                        stack.push(Frame::new(w));
                        continue;
                    }
                    self.lowpt_edge[ei] = Some(ei);
                    self.push_pair(
                        Interval::default(),
                        Interval {
                            low: Some(ei),
                            high: Some(ei),
                        },
                    );
                    ei
                }
            };
            stack[top].next += 1;
            if !self.integrate_return_edges(v, next, ei) {
                return false;
            }
        }
        true
    }

    /// Merges the return edges of `ei`, the `index`-th outgoing edge of `v`, into the
    /// constraints of the parent edge of `v`.
    fn integrate_return_edges(&mut self, v: usize, index: usize, ei: EdgeId) -> bool {
        if self.lowpt[ei] >= self.height[v] {
            return true;
        }
        let Some(e) = self.parent_edge[v] else {
            return true;
        };
        if index == 0 {
            self.lowpt_edge[e] = self.lowpt_edge[ei];
            true
        } else {
            self.add_constraints(ei, e)
        }
    }

    fn conflicting(&self, interval: Interval, b: EdgeId) -> bool {
        !interval.is_empty() && interval.high.is_some_and(|h| self.lowpt[h] > self.lowpt[b])
    }

    fn lowest(&self, pair: &ConflictPair) -> usize {
        let left = pair.left.low.map(|e| self.lowpt[e]);
        let right = pair.right.low.map(|e| self.lowpt[e]);
        match (left, right) {
            (Some(l), Some(r)) => l.min(r),
            (Some(x), None) | (None, Some(x)) => x,
            (None, None) => usize::MAX,
        }
    }

    fn add_constraints(&mut self, ei: EdgeId, e: EdgeId) -> bool {
        let mut p = ConflictPair {
            id: 0,
            left: Interval::default(),
            right: Interval::default(),
        };

        // Merge return edges of ei into P.right.
        loop {
            let Some(mut q) = self.stack.pop() else {
                break;
            };
            if !q.left.is_empty() {
                q.swap();
            }
            if !q.left.is_empty() {
                return false;
            }
            let Some(q_low) = q.right.low else {
                break;
            };
            if self.lowpt[q_low] > self.lowpt[e] {
                if p.right.is_empty() {
                    p.right = q.right;
                } else if let Some(p_low) = p.right.low {
                    self.refs[p_low] = q.right.high;
                }
                p.right.low = q.right.low;
            } else {
                self.refs[q_low] = self.lowpt_edge[e];
            }
            if self.top_id() == self.stack_bottom[ei] {
                break;
            }
        }

        // Merge conflicting return edges of the earlier siblings into P.left.
        while let Some(&top) = self.stack.last() {
            if !(self.conflicting(top.left, ei) || self.conflicting(top.right, ei)) {
                break;
            }
            self.stack.pop();
            let mut q = top;
            if self.conflicting(q.right, ei) {
                q.swap();
            }
            if self.conflicting(q.right, ei) {
                return false;
            }
            if let Some(p_low) = p.right.low {
                self.refs[p_low] = q.right.high;
            }
            if q.right.low.is_some() {
                p.right.low = q.right.low;
            }
            if p.left.is_empty() {
                p.left = q.left;
            } else if let Some(p_low) = p.left.low {
                self.refs[p_low] = q.left.high;
            }
            p.left.low = q.left.low;
        }

        if !(p.left.is_empty() && p.right.is_empty()) {
            self.push_pair(p.left, p.right);
        }
        true
    }

    fn remove_back_edges(&mut self, e: EdgeId) {
        let u = self.src[e];

        // Drop conflict pairs whose lowest return edge ends at u.
        while let Some(top) = self.stack.last() {
            if self.lowest(top) != self.height[u] {
                break;
            }
            let Some(pair) = self.stack.pop() else { break };
            if let Some(low) = pair.left.low {
                self.side[low] = -1;
            }
        }

        if let Some(mut pair) = self.stack.pop() {
            while let Some(high) = pair.left.high {
                if self.dst[high] != u {
                    break;
                }
                pair.left.high = self.refs[high];
            }
            if pair.left.high.is_none() {
                if let Some(low) = pair.left.low.take() {
                    self.refs[low] = pair.right.low;
                    self.side[low] = -1;
                }
            }

            while let Some(high) = pair.right.high {
                if self.dst[high] != u {
                    break;
                }
                pair.right.high = self.refs[high];
            }
            if pair.right.high.is_none() {
                if let Some(low) = pair.right.low.take() {
                    self.refs[low] = pair.left.low;
                    self.side[low] = -1;
                }
            }
            self.stack.push(pair);
        }

        // The return edge of e towards the parent of u.
        if self.lowpt[e] < self.height[u] {
            if let Some(top) = self.stack.last() {
                let (hl, hr) = (top.left.high, top.right.high);
                self.refs[e] = match (hl, hr) {
                    (Some(l), Some(r)) if self.lowpt[l] > self.lowpt[r] => Some(l),
                    (Some(l), None) => Some(l),
                    _ => hr,
                };
            }
        }
    }

    /// Resolves the final side of `e` by following its reference chain.
    fn sign(&mut self, e: EdgeId) -> i8 {
        let mut chain = vec![e];
        let mut cur = e;
        while let Some(next) = self.refs[cur] {
            chain.push(next);
            cur = next;
        }
        for i in (0..chain.len().saturating_sub(1)).rev() {
            let (edge, next) = (chain[i], chain[i + 1]);
            self.side[edge] *= self.side[next];
            self.refs[edge] = None;
        }
        self.side[e]
    }

    fn embed(&mut self) -> Result<PlanarEmbedding> {
        for e in 0..self.src.len() {
            let side = self.sign(e) as i64;
            self.nesting_depth[e] *= side;
        }

        let mut embedding = PlanarEmbedding::new(self.n);
        for v in 0..self.n {
            let mut edges = self.out[v].clone();
            edges.sort_by_key(|&e| self.nesting_depth[e]);
            let mut previous: Option<usize> = None;
            for &e in &edges {
                let w = self.dst[e];
                embedding.add_half_edge_cw(v, w, previous)?;
                previous = Some(w);
            }
            self.ordered_adjs[v] = edges;
        }

        for i in 0..self.roots.len() {
            let root = self.roots[i];
            self.dfs_embedding(root, &mut embedding)?;
        }
        Ok(embedding)
    }

    fn dfs_embedding(&mut self, root: usize, embedding: &mut PlanarEmbedding) -> Result<()> {
        let mut stack = vec![Frame::new(root)];
        while let Some(top) = stack.len().checked_sub(1) {
            let Frame { v, next, .. } = stack[top];
            let Some(&ei) = self.ordered_adjs[v].get(next) else {
                stack.pop();
                continue;
            };
            stack[top].next += 1;
            let w = self.dst[ei];
            if self.parent_edge[w] == Some(ei) {
                embedding.add_half_edge_first(w, v)?;
                self.left_ref[v] = Some(w);
                self.right_ref[v] = Some(w);
                stack.push(Frame::new(w));
            } else if self.side[ei] == 1 {
                let reference = self.right_ref[w].ok_or_else(|| {
                    Error::embedding(format!("back edge {v} -> {w} has no right reference"))
                })?;
                embedding.add_half_edge_cw(w, v, Some(reference))?;
            } else {
                let reference = self.left_ref[w].ok_or_else(|| {
                    Error::embedding(format!("back edge {v} -> {w} has no left reference"))
                })?;
                embedding.add_half_edge_ccw(w, v, Some(reference))?;
                self.left_ref[w] = Some(v);
            }
        }
        Ok(())
    }
}
