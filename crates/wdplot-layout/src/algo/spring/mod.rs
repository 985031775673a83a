//! Fruchterman-Reingold force-directed layout.
//!
//! All vertex pairs repel with `k^2 / d`, adjacent pairs attract with `d^2 / k`, and each step
//! moves a vertex along its net force by at most the current temperature, which cools linearly
//! to zero. Springs have unit strength; arc weights do not influence the simulation.

use super::SpringOptions;
use crate::graph::{Point, rescale};
use wdplot_graph::alg::UndirectedProjection;

const MIN_DISTANCE: f64 = 0.01;

/// Normalised positions by projection index. `seed` fixes the initial placement.
pub(crate) fn layout(graph: &UndirectedProjection, opts: &SpringOptions, seed: u64) -> Vec<Point> {
    let n = graph.vertex_count();
    match n {
        0 => return Vec::new(),
        1 => return vec![Point::default()],
        _ => {}
    }

    let mut rng = XorShift64Star::new(seed);
    let mut pos: Vec<Point> = (0..n)
        .map(|_| {
            let x = rng.next_f64_unit();
            let y = rng.next_f64_unit();
            Point::new(x, y)
        })
        .collect();

    let k = (1.0 / n as f64).sqrt();
    let (min_x, max_x, min_y, max_y) = pos.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY),
        |(a, b, c, d), p| (a.min(p.x), b.max(p.x), c.min(p.y), d.max(p.y)),
    );
    let mut t = (max_x - min_x).max(max_y - min_y) * 0.1;
    let dt = t / (opts.iterations as f64 + 1.0);

    let mut displacement = vec![Point::default(); n];
    for iteration in 0..opts.iterations {
        for (i, d) in displacement.iter_mut().enumerate() {
            let pi = pos[i];
            let mut fx = 0.0;
            let mut fy = 0.0;
            for (j, &pj) in pos.iter().enumerate() {
                if i == j {
                    continue;
                }
                let dx = pi.x - pj.x;
                let dy = pi.y - pj.y;
                let dist = dx.hypot(dy).max(MIN_DISTANCE);
                let f = k * k / (dist * dist);
                fx += dx * f;
                fy += dy * f;
            }
            for &j in &graph.adjacency[i] {
                let pj = pos[j];
                let dx = pi.x - pj.x;
                let dy = pi.y - pj.y;
                let dist = dx.hypot(dy).max(MIN_DISTANCE);
                let f = dist / k;
                fx -= dx * f;
                fy -= dy * f;
            }
            *d = Point::new(fx, fy);
        }

        let mut moved_sq = 0.0;
        for (p, d) in pos.iter_mut().zip(&displacement) {
            let mut length = d.x.hypot(d.y);
            if length < MIN_DISTANCE {
                length = 0.1;
            }
            let step_x = d.x * t / length;
            let step_y = d.y * t / length;
            p.x += step_x;
            p.y += step_y;
            moved_sq += step_x * step_x + step_y * step_y;
        }
        t -= dt;

        if moved_sq.sqrt() / (n as f64) < opts.threshold {
            tracing::trace!(iteration, "spring layout converged");
            break;
        }
    }

    rescale(&mut pos);
    pos
}

#[derive(Debug, Clone)]
pub(crate) struct XorShift64Star {
    state: u64,
}

impl XorShift64Star {
    pub(crate) fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D_u64)
    }

    /// Uniform in `[0, 1)` with 53 bits of precision.
    pub(crate) fn next_f64_unit(&mut self) -> f64 {
        let u = self.next_u64() >> 11;
        (u as f64) / ((1u64 << 53) as f64)
    }
}
