use earclip::{deviation, Earclip};

#[test]
fn test_empty() {
    let mut earclip = Earclip::new();
    let data: [f64; 0] = [];
    let hole_indices: &[u32] = &[];
    let mut triangles = vec![];
    earclip.triangulate(&data, hole_indices, 2, &mut triangles);
    assert_eq!(triangles.len(), 0);
    assert_eq!(deviation(&data, hole_indices, 2, &triangles), 0.0);
}

#[test]
fn test_invalid_point() {
    let mut earclip = Earclip::new();
    let data = [100.0, 200.0];
    let hole_indices: &[u32] = &[];
    let mut triangles = vec![];
    earclip.triangulate(&data, hole_indices, 2, &mut triangles);
    assert_eq!(triangles.len(), 0);
    assert_eq!(deviation(&data, hole_indices, 2, &triangles), 0.0);
}

#[test]
fn test_invalid_line() {
    let mut earclip = Earclip::new();
    let data = [0.0, 0.0, 100.0, 200.0];
    let hole_indices: &[u32] = &[];
    let mut triangles = vec![];
    earclip.triangulate(&data, hole_indices, 2, &mut triangles);
    assert_eq!(triangles.len(), 0);
    assert_eq!(deviation(&data, hole_indices, 2, &triangles), 0.0);
}

#[test]
fn test_invalid_empty_hole() {
    let mut earclip = Earclip::new();
    let data = [0.0, 0.0, 100.0, 0.0, 100.0, 100.0];
    let hole_indices: &[u32] = &[3];
    let mut triangles = vec![];
    earclip.triangulate(&data, hole_indices, 2, &mut triangles);
    assert_eq!(triangles.len(), 3);
    assert_eq!(deviation(&data, hole_indices, 2, &triangles), 0.0);
}

#[test]
fn test_steiner_point_hole() {
    let mut earclip = Earclip::new();
    let data = [0.0, 0.0, 100.0, 0.0, 100.0, 100.0, 50.0, 30.0];
    let hole_indices: &[u32] = &[3];
    let mut triangles = vec![];
    earclip.triangulate(&data, hole_indices, 2, &mut triangles);
    assert_eq!(triangles.len(), 3 * 3);
    assert_eq!(deviation(&data, hole_indices, 2, &triangles), 0.0);
}

#[test]
fn test_steiner_line_hole() {
    let mut earclip = Earclip::new();
    let data = [0., 0., 100., 0., 100., 100., 50., 30., 60., 30.];
    let hole_indices: &[u32] = &[3];
    let mut triangles = vec![];
    earclip.triangulate(&data, hole_indices, 2, &mut triangles);
    assert_eq!(triangles.len(), 5 * 3);
    assert_eq!(deviation(&data, hole_indices, 2, &triangles), 0.0);
}

#[test]
fn test_square() {
    let mut earclip = Earclip::new();
    let data = [0.0, 0.0, 100.0, 0.0, 100.0, 100.0, 0.0, 100.0];
    let hole_indices: &[u32] = &[];
    let mut triangles = vec![];
    earclip.triangulate(&data, hole_indices, 2, &mut triangles);
    assert_eq!(triangles, vec![2, 3, 0, 0, 1, 2]);
    assert_eq!(deviation(&data, hole_indices, 2, &triangles), 0.0);
}

#[test]
fn test_square_u16() {
    let mut earclip = Earclip::new();
    let data = [0.0, 0.0, 100.0, 0.0, 100.0, 100.0, 0.0, 100.0];
    let hole_indices: &[u16] = &[];
    let mut triangles = vec![];
    earclip.triangulate(&data, hole_indices, 2, &mut triangles);
    assert_eq!(triangles, vec![2, 3, 0, 0, 1, 2]);
    assert_eq!(deviation(&data, hole_indices, 2, &triangles), 0.0);
}

#[test]
fn test_square_usize() {
    let mut earclip = Earclip::new();
    let data = [0.0, 0.0, 100.0, 0.0, 100.0, 100.0, 0.0, 100.0];
    let hole_indices: &[usize] = &[];
    let mut triangles = vec![];
    earclip.triangulate(&data, hole_indices, 2, &mut triangles);
    assert_eq!(triangles, vec![2, 3, 0, 0, 1, 2]);
    assert_eq!(deviation(&data, hole_indices, 2, &triangles), 0.0);
}

#[test]
fn test_square_dim_3() {
    // the third coordinate of each vertex is carried in the stride but ignored
    let mut earclip = Earclip::new();
    let data = [
        0.0, 0.0, 1.0, 100.0, 0.0, 1.0, 100.0, 100.0, 1.0, 0.0, 100.0, 1.0,
    ];
    let hole_indices: &[u32] = &[];
    let mut triangles = vec![];
    earclip.triangulate(&data, hole_indices, 3, &mut triangles);
    assert_eq!(triangles, vec![2, 3, 0, 0, 1, 2]);
    assert_eq!(deviation(&data, hole_indices, 3, &triangles), 0.0);
}

#[test]
fn test_square_with_square_hole() {
    let mut earclip = Earclip::new();
    let data = [
        0.0, 0.0, 100.0, 0.0, 100.0, 100.0, 0.0, 100.0, 10.0, 10.0, 90.0, 10.0, 90.0, 90.0, 10.0,
        90.0,
    ];
    let hole_indices: &[u32] = &[4];
    let mut triangles = vec![];
    earclip.triangulate(&data, hole_indices, 2, &mut triangles);
    // 8 ring vertices plus two bridge duplicates yield 8 triangles
    assert_eq!(triangles.len(), 8 * 3);
    assert_eq!(deviation(&data, hole_indices, 2, &triangles), 0.0);
}

#[test]
fn test_instance_reuse() {
    let mut earclip = Earclip::new();
    let hole_indices: &[u32] = &[];
    let mut triangles = vec![];
    let square = [0.0, 0.0, 100.0, 0.0, 100.0, 100.0, 0.0, 100.0];
    earclip.triangulate(&square, hole_indices, 2, &mut triangles);
    assert_eq!(triangles, vec![2, 3, 0, 0, 1, 2]);
    let triangle = [0.0, 0.0, 50.0, 0.0, 50.0, 50.0];
    earclip.triangulate(&triangle, hole_indices, 2, &mut triangles);
    assert_eq!(triangles.len(), 3);
    assert_eq!(deviation(&triangle, hole_indices, 2, &triangles), 0.0);
}
