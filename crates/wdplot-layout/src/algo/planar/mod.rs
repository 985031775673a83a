//! Straight-line planar drawing (de Fraysseix-Pach-Pollack shift method).
//!
//! The embedding is augmented until a canonical ordering exists, nodes are placed one by one on
//! an integer grid with relative x offsets kept in a tree, and the offsets are accumulated into
//! absolute coordinates at the end.

mod canonical;

use crate::error::{Error, Result};
use crate::graph::{Point, rescale};
use crate::planarity::PlanarEmbedding;

const SMALL_GRAPH_CORNERS: [(i64, i64); 3] = [(0, 0), (2, 0), (1, 1)];

/// Normalised coordinates for every node of `embedding`, by node index.
pub(crate) fn layout(embedding: &PlanarEmbedding) -> Result<Vec<Point>> {
    let grid = grid_positions(embedding)?;
    let mut points: Vec<Point> = grid
        .into_iter()
        .map(|(x, y)| Point::new(x as f64, y as f64))
        .collect();
    rescale(&mut points);
    Ok(points)
}

/// Integer grid coordinates; every edge of `embedding` can be drawn straight without crossings.
pub(crate) fn grid_positions(embedding: &PlanarEmbedding) -> Result<Vec<(i64, i64)>> {
    let n = embedding.node_count();
    if n < 4 {
        return Ok(SMALL_GRAPH_CORNERS[..n].to_vec());
    }

    let mut augmented = embedding.clone();
    let outer_face = canonical::triangulate_embedding(&mut augmented)?;
    let order = canonical::canonical_ordering(&augmented, &outer_face)?;
    tracing::trace!(outer_face = outer_face.len(), "canonical ordering computed");

    let mut left_child: Vec<Option<usize>> = vec![None; n];
    let mut right_child: Vec<Option<usize>> = vec![None; n];
    let mut delta_x = vec![0i64; n];
    let mut y = vec![0i64; n];

    let (v1, v2, v3) = (order[0].node, order[1].node, order[2].node);
    delta_x[v1] = 0;
    y[v1] = 0;
    right_child[v1] = Some(v3);
    delta_x[v2] = 1;
    y[v2] = 0;
    delta_x[v3] = 1;
    y[v3] = 1;
    right_child[v3] = Some(v2);

    for step in &order[3..] {
        let vk = step.node;
        let contour = &step.contour;
        let &[wp, wp1, ..] = contour.as_slice() else {
            return Err(Error::embedding(format!("node {vk} has a contour shorter than 2")));
        };
        let (wq, wq1) = (contour[contour.len() - 1], contour[contour.len() - 2]);
        let adds_mult_tri = contour.len() > 2;

        // Stretch the gaps around vk.
        delta_x[wp1] += 1;
        delta_x[wq] += 1;

        let span: i64 = contour[1..].iter().map(|&x| delta_x[x]).sum();

        delta_x[vk] = (-y[wp] + span + y[wq]).div_euclid(2);
        y[vk] = (y[wp] + span + y[wq]).div_euclid(2);
        delta_x[wq] = span - delta_x[vk];
        if adds_mult_tri {
            delta_x[wp1] -= delta_x[vk];
        }

        right_child[wp] = Some(vk);
        right_child[vk] = Some(wq);
        if adds_mult_tri {
            left_child[vk] = Some(wp1);
            right_child[wq1] = None;
        } else {
            left_child[vk] = None;
        }
    }

    let mut pos: Vec<Option<(i64, i64)>> = vec![None; n];
    pos[v1] = Some((0, y[v1]));
    let mut remaining = vec![v1];
    while let Some(parent) = remaining.pop() {
        let Some((parent_x, _)) = pos[parent] else {
            continue;
        };
        for child in [left_child[parent], right_child[parent]].into_iter().flatten() {
            pos[child] = Some((parent_x + delta_x[child], y[child]));
            remaining.push(child);
        }
    }

    pos.into_iter()
        .enumerate()
        .map(|(v, p)| p.ok_or_else(|| Error::embedding(format!("node {v} was never placed"))))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planarity::lr;
    use wdplot_graph::alg::UndirectedProjection;

    fn projection(n: usize, edges: &[(usize, usize)]) -> UndirectedProjection {
        let mut adjacency = vec![Vec::new(); n];
        for &(a, b) in edges {
            adjacency[a].push(b);
            adjacency[b].push(a);
        }
        UndirectedProjection {
            vertices: (0..n).collect(),
            adjacency,
            edges: edges.to_vec(),
        }
    }

    fn grid(n: usize, edges: &[(usize, usize)]) -> Vec<(i64, i64)> {
        let embedding = lr::planar_embedding(&projection(n, edges))
            .unwrap()
            .expect("planar");
        grid_positions(&embedding).unwrap()
    }

    #[test]
    fn small_graphs_use_triangle_corners() {
        assert_eq!(grid(3, &[(0, 1)]), vec![(0, 0), (2, 0), (1, 1)]);
        assert_eq!(grid(1, &[]), vec![(0, 0)]);
    }

    #[test]
    fn k4_grid_positions_are_distinct() {
        let pos = grid(4, &[(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
        for i in 0..4 {
            for j in (i + 1)..4 {
                assert_ne!(pos[i], pos[j]);
            }
        }
    }

    #[test]
    fn disconnected_graph_is_placed() {
        let pos = grid(6, &[(0, 1), (2, 3), (3, 4)]);
        assert_eq!(pos.len(), 6);
        let mut seen = std::collections::HashSet::new();
        for p in &pos {
            assert!(seen.insert(*p), "duplicate grid point {p:?}");
        }
    }
}
