//! Embedding augmentation and canonical ordering for the shift method.

use crate::error::{Error, Result};
use crate::planarity::PlanarEmbedding;
use indexmap::IndexSet;
use rustc_hash::FxHashSet;

/// One step of a canonical ordering: the node and the contour path `wp ..= wq` it attaches to.
#[derive(Debug, Clone)]
pub(crate) struct OrderedNode {
    pub node: usize,
    pub contour: Vec<usize>,
}

/// Upper bound on half-edges of a simple planar embedding (`2 * (3n - 6)`), plus slack.
fn walk_limit(embedding: &PlanarEmbedding) -> usize {
    8 * embedding.node_count() + 16
}

/// Connects components, makes the embedding biconnected and triangulates every face except
/// the largest one, which is returned as the outer face.
pub(crate) fn triangulate_embedding(embedding: &mut PlanarEmbedding) -> Result<Vec<usize>> {
    let reps = embedding.component_representatives();
    for pair in reps.windows(2) {
        embedding.connect_components(pair[0], pair[1])?;
    }

    let mut faces: Vec<Vec<usize>> = Vec::new();
    let mut outer: Option<usize> = None;
    let mut visited: FxHashSet<(usize, usize)> = FxHashSet::default();

    for v in 0..embedding.node_count() {
        // The rotation at v may grow while its faces are processed; newly inserted neighbours
        // are visited as well.
        let Some(start) = embedding.first_neighbor(v) else {
            continue;
        };
        let mut w = start;
        let mut steps = 0usize;
        loop {
            let face = make_bi_connected(embedding, v, w, &mut visited)?;
            if !face.is_empty() {
                let longest = outer.map_or(0, |i| faces[i].len());
                if face.len() > longest {
                    outer = Some(faces.len());
                }
                faces.push(face);
            }
            w = embedding.cw(v, w)?;
            if w == start {
                break;
            }
            steps += 1;
            if steps > walk_limit(embedding) {
                return Err(Error::embedding(format!("rotation at node {v} does not close")));
            }
        }
    }

    for (i, face) in faces.iter().enumerate() {
        if Some(i) != outer {
            triangulate_face(embedding, face[0], face[1])?;
        }
    }

    Ok(outer.map(|i| faces.swap_remove(i)).unwrap_or_default())
}

/// Walks the face right of `start -> out`, adding an edge around every cut vertex met twice.
fn make_bi_connected(
    embedding: &mut PlanarEmbedding,
    start: usize,
    out: usize,
    visited: &mut FxHashSet<(usize, usize)>,
) -> Result<Vec<usize>> {
    if !visited.insert((start, out)) {
        return Ok(Vec::new());
    }

    let (mut v1, mut v2) = (start, out);
    let mut face = vec![start];
    let mut on_face: FxHashSet<usize> = FxHashSet::default();
    on_face.insert(start);
    let (_, mut v3) = embedding.next_face_half_edge(v1, v2)?;

    let limit = walk_limit(embedding);
    let mut steps = 0usize;
    while v2 != start || v3 != out {
        if v1 == v2 {
            return Err(Error::embedding(format!("degenerate half-edge at node {v1}")));
        }
        steps += 1;
        if steps > limit {
            return Err(Error::embedding(format!("face through {start} -> {out} does not close")));
        }

        if on_face.contains(&v2) {
            embedding.add_half_edge_cw(v1, v3, Some(v2))?;
            embedding.add_half_edge_ccw(v3, v1, Some(v2))?;
            visited.insert((v2, v3));
            visited.insert((v3, v1));
            v2 = v1;
        } else {
            on_face.insert(v2);
            face.push(v2);
        }

        v1 = v2;
        (v2, v3) = embedding.next_face_half_edge(v2, v3)?;
        visited.insert((v1, v2));
    }
    Ok(face)
}

/// Fans chords across the face right of `v1 -> v2` until it is a triangle.
fn triangulate_face(embedding: &mut PlanarEmbedding, mut v1: usize, mut v2: usize) -> Result<()> {
    let (_, mut v3) = embedding.next_face_half_edge(v1, v2)?;
    let (_, mut v4) = embedding.next_face_half_edge(v2, v3)?;
    if v1 == v2 || v1 == v3 {
        return Ok(());
    }

    let limit = walk_limit(embedding);
    let mut steps = 0usize;
    while v1 != v4 {
        steps += 1;
        if steps > limit {
            return Err(Error::embedding(format!("face through {v1} -> {v2} does not close")));
        }
        if embedding.has_half_edge(v1, v3) {
            (v1, v2, v3) = (v2, v3, v4);
        } else {
            embedding.add_half_edge_cw(v1, v3, Some(v2))?;
            embedding.add_half_edge_ccw(v3, v1, Some(v2))?;
            (v2, v3) = (v3, v4);
        }
        (_, v4) = embedding.next_face_half_edge(v2, v3)?;
    }
    Ok(())
}

/// Canonical ordering of an internally triangulated, biconnected embedding.
///
/// The first two entries are `outer_face[0]` and `outer_face[1]`. Every later node is attached
/// to the contour path recorded with it.
pub(crate) fn canonical_ordering(
    embedding: &PlanarEmbedding,
    outer_face: &[usize],
) -> Result<Vec<OrderedNode>> {
    let n = embedding.node_count();
    let (v1, v2) = match outer_face {
        [a, b, _, ..] => (*a, *b),
        _ => {
            return Err(Error::embedding(format!(
                "outer face has {} node(s), at least 3 are required",
                outer_face.len()
            )));
        }
    };

    let mut chords = vec![0i64; n];
    let mut marked = vec![false; n];
    let mut ready: IndexSet<usize> = outer_face.iter().copied().collect();

    let mut ccw_nbr: Vec<Option<usize>> = vec![None; n];
    let mut prev = v2;
    for &x in &outer_face[2..] {
        ccw_nbr[prev] = Some(x);
        prev = x;
    }
    ccw_nbr[prev] = Some(v1);

    let mut cw_nbr: Vec<Option<usize>> = vec![None; n];
    let mut prev = v1;
    for &x in outer_face[1..].iter().rev() {
        cw_nbr[prev] = Some(x);
        prev = x;
    }

    let is_outer_face_nbr = |cw: &[Option<usize>], ccw: &[Option<usize>], x: usize, y: usize| {
        cw[x] == Some(y) || ccw[x] == Some(y)
    };
    let is_on_outer_face =
        |marked: &[bool], ccw: &[Option<usize>], x: usize| !marked[x] && (ccw[x].is_some() || x == v1);

    for &v in outer_face {
        for nbr in embedding.neighbors_cw_order(v)? {
            if is_on_outer_face(&marked, &ccw_nbr, nbr)
                && !is_outer_face_nbr(&cw_nbr, &ccw_nbr, v, nbr)
            {
                chords[v] += 1;
                ready.swap_remove(&v);
            }
        }
    }
    ready.swap_remove(&v1);
    ready.swap_remove(&v2);

    let mut ordering: Vec<Option<OrderedNode>> = vec![None; n];
    ordering[0] = Some(OrderedNode {
        node: v1,
        contour: Vec::new(),
    });
    ordering[1] = Some(OrderedNode {
        node: v2,
        contour: Vec::new(),
    });

    for k in (2..n).rev() {
        let v = ready
            .pop()
            .ok_or_else(|| Error::embedding(format!("no removable contour node at step {k}")))?;
        marked[v] = true;

        let mut wp = None;
        let mut wq = None;
        for nbr in embedding.neighbors_cw_order(v)? {
            if marked[nbr] {
                continue;
            }
            if is_on_outer_face(&marked, &ccw_nbr, nbr) {
                if nbr == v1 {
                    wp = Some(v1);
                } else if nbr == v2 {
                    wq = Some(v2);
                } else if cw_nbr[nbr] == Some(v) {
                    wp = Some(nbr);
                } else {
                    wq = Some(nbr);
                }
            }
            if wp.is_some() && wq.is_some() {
                break;
            }
        }
        let (Some(wp), Some(wq)) = (wp, wq) else {
            return Err(Error::embedding(format!(
                "node {v} has no contour neighbours on both sides"
            )));
        };

        let mut contour = vec![wp];
        let mut nbr = wp;
        while nbr != wq {
            if contour.len() > embedding.degree(v) {
                return Err(Error::embedding(format!(
                    "contour between {wp} and {wq} does not close around {v}"
                )));
            }
            let next = embedding.ccw(v, nbr)?;
            contour.push(next);
            cw_nbr[nbr] = Some(next);
            ccw_nbr[next] = Some(nbr);
            nbr = next;
        }

        if contour.len() == 2 {
            // The chord wp - wq is now part of the outer face.
            for x in [wp, wq] {
                chords[x] -= 1;
                if chords[x] == 0 && x != v1 && x != v2 {
                    ready.insert(x);
                }
            }
        } else {
            let inner = &contour[1..contour.len() - 1];
            let new_face_nodes: FxHashSet<usize> = inner.iter().copied().collect();
            for &w in inner {
                ready.insert(w);
                for nbr in embedding.neighbors_cw_order(w)? {
                    if is_on_outer_face(&marked, &ccw_nbr, nbr)
                        && !is_outer_face_nbr(&cw_nbr, &ccw_nbr, w, nbr)
                    {
                        chords[w] += 1;
                        ready.swap_remove(&w);
                        if !new_face_nodes.contains(&nbr) {
                            chords[nbr] += 1;
                            ready.swap_remove(&nbr);
                        }
                    }
                }
            }
        }

        ordering[k] = Some(OrderedNode { node: v, contour });
    }

    ordering
        .into_iter()
        .enumerate()
        .map(|(k, step)| {
            step.ok_or_else(|| Error::embedding(format!("canonical ordering has no node at {k}")))
        })
        .collect()
}
