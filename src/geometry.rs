//! Pure geometry helpers: convex hull ordering and the smooth 2-D noise
//! driving the blob wobble.

use egui::Pos2;

/// Computes the convex hull of a point set using a Graham scan.
///
/// Finds the lowest point (leftmost on ties), sorts the rest by polar angle
/// around it (ties broken by distance), then sweeps keeping only
/// left-turning triples. Fewer than 3 input points are returned unchanged.
///
/// The result is a subset of the input in counter-clockwise cyclic order.
pub fn convex_hull(points: &[Pos2]) -> Vec<Pos2> {
    if points.len() <= 3 {
        return points.to_vec();
    }

    let mut lowest = points[0];
    for p in &points[1..] {
        if p.y < lowest.y || (p.y == lowest.y && p.x < lowest.x) {
            lowest = *p;
        }
    }

    let mut sorted: Vec<Pos2> = points.to_vec();
    sorted.sort_by(|a, b| {
        let angle_a = (a.y - lowest.y).atan2(a.x - lowest.x);
        let angle_b = (b.y - lowest.y).atan2(b.x - lowest.x);
        angle_a
            .partial_cmp(&angle_b)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| {
                let dist_a = (*a - lowest).length_sq();
                let dist_b = (*b - lowest).length_sq();
                dist_a
                    .partial_cmp(&dist_b)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    });

    let mut hull = vec![sorted[0], sorted[1]];
    for p in &sorted[2..] {
        while hull.len() > 1 && !is_left_turn(hull[hull.len() - 2], hull[hull.len() - 1], *p) {
            hull.pop();
        }
        hull.push(*p);
    }
    hull
}

/// Cross-product test: does the path `p1 -> p2 -> p3` turn left?
fn is_left_turn(p1: Pos2, p2: Pos2, p3: Pos2) -> bool {
    (p2.x - p1.x) * (p3.y - p1.y) - (p2.y - p1.y) * (p3.x - p1.x) > 0.0
}

/// Smooth pseudo-noise in `[-1, 1]`, continuous in both arguments.
///
/// Value noise over an integer lattice with a smoothstep blend. Sampled as
/// `noise(f(angle or position), time)` by the blob renderer; adjacent samples
/// vary gently, which is what gives blob outlines their organic breathing.
pub fn wobble_noise(x: f32, y: f32) -> f32 {
    let x0 = x.floor();
    let y0 = y.floor();
    let fx = x - x0;
    let fy = y - y0;
    let ix = x0 as i32;
    let iy = y0 as i32;

    // Smoothstep fade keeps the gradient continuous across cell borders.
    let sx = fx * fx * (3.0 - 2.0 * fx);
    let sy = fy * fy * (3.0 - 2.0 * fy);

    let n00 = lattice(ix, iy);
    let n10 = lattice(ix + 1, iy);
    let n01 = lattice(ix, iy + 1);
    let n11 = lattice(ix + 1, iy + 1);

    let top = n00 + (n10 - n00) * sx;
    let bottom = n01 + (n11 - n01) * sx;
    top + (bottom - top) * sy
}

/// Deterministic hash of a lattice corner to `[-1, 1]`.
fn lattice(ix: i32, iy: i32) -> f32 {
    let mut h = (ix as u32)
        .wrapping_mul(0x9e37_79b1)
        .wrapping_add((iy as u32).wrapping_mul(0x85eb_ca77));
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^= h >> 16;
    (h as f32 / u32::MAX as f32) * 2.0 - 1.0
}
