use glam::DVec3;
use light_probe_delaunay::*;

fn main() {
    // a 4x4x4 probe grid, nudged off the lattice so no five probes share a sphere
    let points: Vec<DVec3> = (0..64)
        .map(|i: usize| {
            let cell = DVec3::new((i % 4) as f64, ((i / 4) % 4) as f64, (i / 16) as f64);
            let jitter = DVec3::new(
                ((i * 7919) % 13) as f64,
                ((i * 104_729) % 17) as f64,
                ((i * 1_299_709) % 19) as f64,
            );
            cell * 2.0 + jitter * 0.01
        })
        .collect();

    let mut delaunay = Delaunay::new();

    if let Err(err) = delaunay.build(&points) {
        eprintln!("build failed: {err}");
        return;
    }

    println!(
        "{} probes, {} tetrahedra, {} exterior cells ({} degenerate)",
        delaunay.vertices().len(),
        delaunay.interior_count(),
        delaunay.exterior_count(),
        delaunay.count_of(CellKind::ExteriorDegenerate),
    );

    match delaunay.validate() {
        Ok(()) => println!("valid"),
        Err(err) => println!("invalid: {err}"),
    }
}
