use earclip::{deviation, Earclip};

fn main() {
    // a square with a square hole
    let data = [
        0.0, 0.0, 10.0, 0.0, 10.0, 10.0, 0.0, 10.0, // outer ring
        2.0, 2.0, 2.0, 8.0, 8.0, 8.0, 8.0, 2.0, // hole
    ];
    let hole_indices: [u32; 1] = [4];

    let mut earclip = Earclip::new();
    let mut triangles: Vec<u32> = vec![];
    earclip.triangulate(&data, &hole_indices, 2, &mut triangles);

    println!("{} triangles:", triangles.len() / 3);
    for t in triangles.chunks_exact(3) {
        println!("  ({}, {}, {})", t[0], t[1], t[2]);
    }
    println!(
        "deviation from polygon area: {}",
        deviation(&data, &hole_indices, 2, &triangles)
    );
}
