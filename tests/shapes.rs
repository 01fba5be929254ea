//! Geometric properties of the triangulation on concrete shapes.

use earclip::{deviation, Earclip, Index};

fn triangulate(data: &[f64], hole_indices: &[u32]) -> Vec<u32> {
    let mut triangles = vec![];
    Earclip::new().triangulate(data, hole_indices, 2, &mut triangles);
    triangles
}

/// sum of the absolute triangle areas
fn covered_area<N: Index>(data: &[f64], triangles: &[N]) -> f64 {
    triangles
        .chunks_exact(3)
        .map(|t| {
            let (a, b, c) = (
                t[0].into_usize() * 2,
                t[1].into_usize() * 2,
                t[2].into_usize() * 2,
            );
            ((data[a] - data[c]) * (data[b + 1] - data[a + 1])
                - (data[a] - data[b]) * (data[c + 1] - data[a + 1]))
                .abs()
                / 2.0
        })
        .sum()
}

#[test]
fn square_covers_its_area() {
    let data = [0.0, 0.0, 10.0, 0.0, 10.0, 10.0, 0.0, 10.0];
    let triangles = triangulate(&data, &[]);
    assert_eq!(triangles.len(), 6);
    assert_eq!(covered_area(&data, &triangles), 100.0);
}

#[test]
fn square_with_hole_covers_ring_area() {
    let data = [
        0.0, 0.0, 10.0, 0.0, 10.0, 10.0, 0.0, 10.0, 2.0, 2.0, 2.0, 8.0, 8.0, 8.0, 8.0, 2.0,
    ];
    let triangles = triangulate(&data, &[4]);
    assert_eq!(triangles.len(), 8 * 3);
    assert_eq!(covered_area(&data, &triangles), 100.0 - 36.0);
    assert_eq!(deviation(&data, &[4u32], 2, &triangles), 0.0);
}

#[test]
fn collinear_triangle_is_empty() {
    let data = [0.0, 0.0, 5.0, 5.0, 10.0, 10.0];
    let triangles = triangulate(&data, &[]);
    assert!(triangles.is_empty());
}

#[test]
fn winding_does_not_change_coverage() {
    let data = [0.0, 0.0, 10.0, 0.0, 10.0, 10.0, 0.0, 10.0];
    let mut reversed = vec![];
    for v in data.chunks_exact(2).rev() {
        reversed.extend_from_slice(v);
    }
    let forward = triangulate(&data, &[]);
    let backward = triangulate(&reversed, &[]);
    assert_eq!(forward.len(), backward.len());
    assert_eq!(
        covered_area(&data, &forward),
        covered_area(&reversed, &backward)
    );
}

#[test]
fn unbridgeable_hole_is_dropped() {
    // the hole lies entirely to the left of the outer square, so the leftward
    // bridge ray finds nothing and the hole is left out of the result
    let data = [
        0.0, 0.0, 10.0, 0.0, 10.0, 10.0, 0.0, 10.0, -20.0, 2.0, -20.0, 8.0, -14.0, 8.0, -14.0, 2.0,
    ];
    let triangles = triangulate(&data, &[4]);
    assert_eq!(triangles.len(), 6);
    assert!(triangles.iter().all(|&i| i < 4));
    assert_eq!(covered_area(&data, &triangles), 100.0);
}

#[test]
fn convex_polygon_uses_every_vertex() {
    // irregular octagon, no collinear triples
    let data = [
        3.0, 0.0, 7.0, 1.0, 9.0, 4.0, 8.0, 7.0, 5.0, 9.0, 2.0, 8.0, 0.0, 5.0, 1.0, 2.0,
    ];
    let n = data.len() / 2;
    let triangles = triangulate(&data, &[]);
    assert_eq!(triangles.len(), 3 * (n - 2));
    for v in 0..n as u32 {
        assert!(triangles.contains(&v), "vertex {v} missing from output");
    }
    assert!(deviation(&data, &[] as &[u32], 2, &triangles) < 1e-14);
}

#[test]
fn concave_polygon_count_and_range() {
    // staircase: concave, 10 vertices, no degeneracies
    let data = [
        0.0, 0.0, 4.0, 0.0, 4.0, 1.0, 3.0, 1.0, 3.0, 2.0, 2.0, 2.0, 2.0, 3.0, 1.0, 3.0, 1.0, 4.0,
        0.0, 4.0,
    ];
    let n = data.len() / 2;
    let triangles = triangulate(&data, &[]);
    assert_eq!(triangles.len(), 3 * (n - 2));
    assert!(triangles.iter().all(|&i| (i as usize) < n));
    assert_eq!(deviation(&data, &[] as &[u32], 2, &triangles), 0.0);
}

#[test]
fn large_polygon_takes_indexed_path() {
    // sawtooth strip with enough vertices to enable the z-order hash
    let n = 200usize;
    let mut data = vec![0.0, 0.0, n as f64, 0.0];
    for x in (1..n).rev() {
        data.push(x as f64);
        data.push(if x % 2 == 0 { 5.0 } else { 8.0 });
    }
    assert!(data.len() > 80 * 2);
    let verts = data.len() / 2;
    let triangles = triangulate(&data, &[]);
    assert_eq!(triangles.len(), 3 * (verts - 2));
    assert!(triangles.iter().all(|&i| (i as usize) < verts));
    assert!(deviation(&data, &[] as &[u32], 2, &triangles) < 1e-12);
}
