use crate::error::{Error, Result};
use rustc_hash::{FxHashMap, FxHashSet};

/// Rotation links of one half-edge `v -> w`: the neighbours of `v` that follow `w` clockwise
/// and counter-clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Rotation {
    cw: usize,
    ccw: usize,
}

/// Combinatorial embedding of an undirected graph over dense node indices.
///
/// Every node stores a cyclic (clockwise) order of its neighbours. Each undirected edge is
/// present as two half-edges `v -> w` and `w -> v`. Faces are recovered by walking half-edges
/// with [`PlanarEmbedding::next_face_half_edge`].
#[derive(Debug, Clone, Default)]
pub struct PlanarEmbedding {
    rotations: Vec<FxHashMap<usize, Rotation>>,
    first_nbr: Vec<Option<usize>>,
}

impl PlanarEmbedding {
    pub fn new(node_count: usize) -> Self {
        Self {
            rotations: vec![FxHashMap::default(); node_count],
            first_nbr: vec![None; node_count],
        }
    }

    pub fn node_count(&self) -> usize {
        self.rotations.len()
    }

    /// Number of undirected edges, assuming every half-edge has its twin.
    pub fn edge_count(&self) -> usize {
        self.rotations.iter().map(FxHashMap::len).sum::<usize>() / 2
    }

    pub fn degree(&self, v: usize) -> usize {
        self.rotations.get(v).map_or(0, FxHashMap::len)
    }

    pub fn has_half_edge(&self, v: usize, w: usize) -> bool {
        self.rotations.get(v).is_some_and(|r| r.contains_key(&w))
    }

    pub fn first_neighbor(&self, v: usize) -> Option<usize> {
        self.first_nbr.get(v).copied().flatten()
    }

    fn rotation(&self, v: usize, w: usize) -> Result<Rotation> {
        self.rotations
            .get(v)
            .and_then(|r| r.get(&w))
            .copied()
            .ok_or_else(|| Error::embedding(format!("half-edge {v} -> {w} is missing")))
    }

    fn rotation_mut(&mut self, v: usize, w: usize) -> Result<&mut Rotation> {
        self.rotations
            .get_mut(v)
            .and_then(|r| r.get_mut(&w))
            .ok_or_else(|| Error::embedding(format!("half-edge {v} -> {w} is missing")))
    }

    /// Neighbour of `v` that follows `w` clockwise.
    pub fn cw(&self, v: usize, w: usize) -> Result<usize> {
        Ok(self.rotation(v, w)?.cw)
    }

    /// Neighbour of `v` that follows `w` counter-clockwise.
    pub fn ccw(&self, v: usize, w: usize) -> Result<usize> {
        Ok(self.rotation(v, w)?.ccw)
    }

    fn insert_new(&mut self, start: usize, end: usize, rotation: Rotation) -> Result<()> {
        let Some(slot) = self.rotations.get_mut(start) else {
            return Err(Error::embedding(format!("node {start} is out of range")));
        };
        if end >= self.first_nbr.len() {
            return Err(Error::embedding(format!("node {end} is out of range")));
        }
        if slot.contains_key(&end) {
            return Err(Error::embedding(format!(
                "half-edge {start} -> {end} added twice"
            )));
        }
        slot.insert(end, rotation);
        Ok(())
    }

    fn set_sole_neighbor(&mut self, start: usize, end: usize) -> Result<()> {
        if self.degree(start) != 0 {
            return Err(Error::embedding(format!(
                "node {start} already has neighbours; a reference is required"
            )));
        }
        self.insert_new(start, end, Rotation { cw: end, ccw: end })?;
        self.first_nbr[start] = Some(end);
        Ok(())
    }

    /// Adds `start -> end` directly clockwise after `start -> reference`.
    ///
    /// Without a reference, `end` becomes the only neighbour of `start`.
    pub fn add_half_edge_cw(
        &mut self,
        start: usize,
        end: usize,
        reference: Option<usize>,
    ) -> Result<()> {
        let Some(reference) = reference else {
            return self.set_sole_neighbor(start, end);
        };
        let cw_reference = self.cw(start, reference)?;
        self.insert_new(
            start,
            end,
            Rotation {
                cw: cw_reference,
                ccw: reference,
            },
        )?;
        self.rotation_mut(start, reference)?.cw = end;
        self.rotation_mut(start, cw_reference)?.ccw = end;
        Ok(())
    }

    /// Adds `start -> end` directly counter-clockwise before `start -> reference`.
    pub fn add_half_edge_ccw(
        &mut self,
        start: usize,
        end: usize,
        reference: Option<usize>,
    ) -> Result<()> {
        let Some(reference) = reference else {
            return self.set_sole_neighbor(start, end);
        };
        let ccw_reference = self.ccw(start, reference)?;
        self.add_half_edge_cw(start, end, Some(ccw_reference))?;
        if self.first_nbr[start] == Some(reference) {
            self.first_nbr[start] = Some(end);
        }
        Ok(())
    }

    /// Adds `start -> end` as the new first neighbour in the clockwise order of `start`.
    pub fn add_half_edge_first(&mut self, start: usize, end: usize) -> Result<()> {
        let reference = self.first_neighbor(start);
        self.add_half_edge_ccw(start, end, reference)
    }

    /// Joins two components with the edge `v - w`, inserted first at both ends.
    pub fn connect_components(&mut self, v: usize, w: usize) -> Result<()> {
        self.add_half_edge_first(v, w)?;
        self.add_half_edge_first(w, v)
    }

    /// Half-edge following `v -> w` on the face to its right.
    pub fn next_face_half_edge(&self, v: usize, w: usize) -> Result<(usize, usize)> {
        Ok((w, self.ccw(w, v)?))
    }

    pub fn neighbors_cw_order(&self, v: usize) -> Result<Vec<usize>> {
        let Some(start) = self.first_neighbor(v) else {
            return Ok(Vec::new());
        };
        let degree = self.degree(v);
        let mut out = Vec::with_capacity(degree);
        out.push(start);
        let mut cur = self.cw(v, start)?;
        while cur != start {
            if out.len() >= degree {
                return Err(Error::embedding(format!(
                    "rotation at node {v} does not close"
                )));
            }
            out.push(cur);
            cur = self.cw(v, cur)?;
        }
        Ok(out)
    }

    /// Nodes on the face to the right of `v -> w`, marking each traversed half-edge.
    pub fn traverse_face(
        &self,
        v: usize,
        w: usize,
        marked: &mut FxHashSet<(usize, usize)>,
    ) -> Result<Vec<usize>> {
        let mut face = vec![v];
        marked.insert((v, w));
        let incoming = self.cw(v, w)?;
        let (mut prev, mut cur) = (v, w);
        while cur != v || prev != incoming {
            face.push(cur);
            (prev, cur) = self.next_face_half_edge(prev, cur)?;
            if !marked.insert((prev, cur)) {
                return Err(Error::embedding(format!(
                    "face through {v} -> {w} revisits half-edge {prev} -> {cur}"
                )));
            }
        }
        Ok(face)
    }

    /// One node of each connected component, in ascending node order.
    pub fn component_representatives(&self) -> Vec<usize> {
        let mut seen = vec![false; self.node_count()];
        let mut reps = Vec::new();
        for start in 0..self.node_count() {
            if seen[start] {
                continue;
            }
            seen[start] = true;
            reps.push(start);
            let mut stack = vec![start];
            while let Some(v) = stack.pop() {
                for &w in self.rotations[v].keys() {
                    if !seen[w] {
                        seen[w] = true;
                        stack.push(w);
                    }
                }
            }
        }
        reps
    }

    /// Validates twin half-edges, rotation links and Euler's formula per component.
    pub fn check_structure(&self) -> Result<()> {
        for (v, rotation) in self.rotations.iter().enumerate() {
            for (&w, links) in rotation {
                if !self.has_half_edge(w, v) {
                    return Err(Error::embedding(format!("half-edge {v} -> {w} has no twin")));
                }
                if self.ccw(v, links.cw)? != w || self.cw(v, links.ccw)? != w {
                    return Err(Error::embedding(format!(
                        "rotation links around {v} -> {w} are inconsistent"
                    )));
                }
            }
            if self.neighbors_cw_order(v)?.len() != rotation.len() {
                return Err(Error::embedding(format!(
                    "rotation at node {v} does not cover all neighbours"
                )));
            }
        }

        let mut marked = FxHashSet::default();
        let mut seen = vec![false; self.node_count()];
        for start in 0..self.node_count() {
            if seen[start] {
                continue;
            }
            let mut component = vec![start];
            seen[start] = true;
            let mut i = 0;
            while i < component.len() {
                for &w in self.rotations[component[i]].keys() {
                    if !seen[w] {
                        seen[w] = true;
                        component.push(w);
                    }
                }
                i += 1;
            }
            if component.len() == 1 {
                continue;
            }

            let mut half_edges = 0usize;
            let mut faces = 0usize;
            for &v in &component {
                for w in self.neighbors_cw_order(v)? {
                    half_edges += 1;
                    if !marked.contains(&(v, w)) {
                        faces += 1;
                        self.traverse_face(v, w, &mut marked)?;
                    }
                }
            }
            let euler = component.len() as i64 - (half_edges / 2) as i64 + faces as i64;
            if euler != 2 {
                return Err(Error::embedding(format!(
                    "component of node {start} violates Euler's formula (V - E + F = {euler})"
                )));
            }
        }
        Ok(())
    }
}
