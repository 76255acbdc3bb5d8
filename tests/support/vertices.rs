#![allow(dead_code)]

use post_transform::Vertex;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Clip-space vertices in front of the eye (`w > 0`), mostly inside the cube.
pub fn front_vertices(n: usize, seed: u64) -> Vec<Vertex> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let w: f32 = rng.gen_range(0.01..1000.0);
            let x: f32 = rng.gen_range(-1.2..1.2);
            let y: f32 = rng.gen_range(-1.2..1.2);
            let z: f32 = rng.gen_range(-1.2..1.2);
            Vertex::new(x * w, y * w, z * w, w)
        })
        .collect()
}

/// Clip-space vertices covering every classification case: inside, outside
/// the cube, on the eye plane, behind the eye, and on cube faces.
pub fn mixed_vertices(n: usize, seed: u64) -> Vec<Vertex> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|_| match rng.gen_range(0..6) {
            0 => Vertex::new(
                rng.gen_range(-3.0..3.0),
                rng.gen_range(-3.0..3.0),
                rng.gen_range(-3.0..3.0),
                rng.gen_range(-2.0..2.0),
            ),
            1 => {
                let w: f32 = rng.gen_range(-10.0..-0.01);
                Vertex::new(rng.gen_range(-1.0..1.0), 0.0, 0.0, w)
            }
            2 => Vertex::new(0.0, 0.0, 0.0, 0.0),
            3 => {
                // Exactly on a cube face.
                let w: f32 = rng.gen_range(0.5..4.0);
                let sign = if rng.gen::<bool>() { 1.0 } else { -1.0 };
                Vertex::new(sign * w, rng.gen_range(-0.5..0.5) * w, 0.0, w)
            }
            _ => {
                let w: f32 = rng.gen_range(0.1..100.0);
                Vertex::new(
                    rng.gen_range(-1.0..1.0) * w,
                    rng.gen_range(-1.0..1.0) * w,
                    rng.gen_range(-1.0..1.0) * w,
                    w,
                )
            }
        })
        .collect()
}

/// NDC vertices, including some well outside [-1, 1] and the (-1, 1) corner.
pub fn ndc_vertices(n: usize, seed: u64) -> Vec<Vertex> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|i| {
            let (x, y) = match i % 16 {
                0 => (rng.gen_range(-50.0..50.0), rng.gen_range(-50.0..50.0)),
                1 => (-1.0, 1.0),
                _ => (rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)),
            };
            Vertex::new(x, y, rng.gen_range(-1.0..1.0), rng.gen_range(0.001..10.0))
        })
        .collect()
}

/// Group a flat vertex list into primitives, dropping any remainder.
pub fn group<const N: usize>(vertices: &[Vertex]) -> Vec<[Vertex; N]> {
    vertices
        .chunks_exact(N)
        .map(|c| std::array::from_fn(|i| c[i]))
        .collect()
}

/// Relative error of `got` against an f64 reference.
pub fn rel_err(got: f32, want: f64) -> f64 {
    let denom = want.abs().max(f32::MIN_POSITIVE as f64);
    (got as f64 - want).abs() / denom
}

/// Assert a divided vertex matches the f64 reference of its clip-space input.
pub fn assert_divided(out: &Vertex, clip: &Vertex, tol: f64) {
    let w = clip.w as f64;
    let want = [clip.x as f64 / w, clip.y as f64 / w, clip.z as f64 / w, 1.0 / w];
    let got = out.to_array();
    for (c, (g, r)) in got.iter().zip(want.iter()).enumerate() {
        let e = rel_err(*g, *r);
        assert!(
            e <= tol,
            "component {} of {:?}: got {}, want {} (rel err {:e})",
            c,
            clip,
            g,
            r,
            e
        );
    }
}
