use glam::{DMat3, DVec3, DVec4};

use crate::{
    cell::Cell,
    config::{BuildOptions, ExteriorBasis},
    error::BuildError,
    geometry::Tetrahedron,
    vertex::Vertex,
};

/// Fill in the basis of every cell. Exterior cells whose cubic collapses are
/// turned into [`Cell::ExteriorDegenerate`].
pub(crate) fn compute_matrices(
    vertices: &[Vertex],
    cells: &mut [Cell],
    options: &BuildOptions,
) -> Result<(), BuildError> {
    let mut degenerate = 0;

    for (index, cell) in cells.iter_mut().enumerate() {
        let replacement = match cell {
            Cell::Interior(interior) => {
                let positions = interior.vertices.map(|v| vertices[v].position);
                interior.matrix = interior_matrix(positions, options.degenerate_tolerance)
                    .map_err(|determinant| {
                        tracing::warn!(cell = index, determinant, "singular interior cell");
                        BuildError::DegenerateCell {
                            cell: index,
                            determinant,
                        }
                    })?;
                None
            }
            Cell::Exterior(exterior) | Cell::ExteriorDegenerate(exterior) => {
                let positions = exterior.vertices.map(|v| vertices[v].position);
                let normals = exterior.vertices.map(|v| vertices[v].normal);
                let basis = exterior_matrix(
                    positions,
                    normals,
                    options.exterior_basis,
                    options.exterior_epsilon,
                );

                exterior.matrix = basis.matrix;
                exterior.offset = basis.offset;

                Some(if basis.degenerate {
                    degenerate += 1;
                    Cell::ExteriorDegenerate(*exterior)
                } else {
                    Cell::Exterior(*exterior)
                })
            }
        };

        if let Some(replacement) = replacement {
            *cell = replacement;
        }
    }

    if degenerate > 0 {
        tracing::debug!(degenerate, "exterior cells fall back to a quadratic");
    }

    Ok(())
}

/// Inverse of `columns(p0-p3, p1-p3, p2-p3)`, or the determinant when the
/// basis is too close to singular to invert.
pub(crate) fn interior_matrix(positions: [DVec3; 4], tolerance: f64) -> Result<DMat3, f64> {
    let basis = Tetrahedron::new(positions).basis();
    let determinant = basis.determinant();
    let scale = basis.x_axis.length() * basis.y_axis.length() * basis.z_axis.length();

    // negated so NaN is rejected too
    if !(determinant.abs() > tolerance * scale) {
        return Err(determinant);
    }

    Ok(basis.inverse())
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ExteriorMatrix {
    pub matrix: DMat3,
    pub offset: DVec3,
    pub degenerate: bool,
}

/// Basis of the region beyond a hull triangle.
///
/// A point `x` lies on the triangle swept out along the probe normals,
/// `pᵢ + t·nᵢ`, when `det(A + t·A', B + t·B', x - p₂ + t·C') = 0`. Expanding in
/// `t` gives a cubic whose coefficients are affine in `x`. The three
/// coefficient rows `[x, y, z, 1]` for `t²`, `t` and `1` are normalized by the
/// `t³` coefficient unless it vanishes.
pub(crate) fn exterior_matrix(
    positions: [DVec3; 3],
    normals: [DVec3; 3],
    basis: ExteriorBasis,
    epsilon: f64,
) -> ExteriorMatrix {
    let [p0, p1, p2] = positions;
    let [n0, n1, n2] = normals;

    let (a, ap, b, bp) = match basis {
        ExteriorBasis::Corrected => (p0 - p2, n0 - n2, p1 - p2, n1 - n2),
        ExteriorBasis::Legacy => (p1 - p2, n1 - n2, DVec3::ZERO, DVec3::ZERO),
    };
    let cp = -n2;

    let square = ap.cross(bp);
    let linear = a.cross(bp) + ap.cross(b);
    let constant = a.cross(b);

    let rows = [
        square.extend(linear.dot(cp) - p2.dot(square)),
        linear.extend(constant.dot(cp) - p2.dot(linear)),
        constant.extend(-p2.dot(constant)),
    ];

    let leading = square.dot(cp);
    let degenerate = !(leading.abs() > epsilon);

    let rows = if degenerate {
        rows
    } else {
        rows.map(|row| row / leading)
    };

    let (matrix, offset) = pack(rows);

    ExteriorMatrix {
        matrix,
        offset,
        degenerate,
    }
}

/// Store rows `[p, q, r]` in the transposed layout the runtime reads: with
/// `m[3j + i]` the entry of row `i` and column `j`, the matrix columns are
/// `(m0, m4, m8)`, `(m1, m5, m9)`, `(m2, m6, m10)` and the offset is
/// `(m3, m7, m11)`.
fn pack(rows: [DVec4; 3]) -> (DMat3, DVec3) {
    let m: [f64; 12] = std::array::from_fn(|k| rows[k % 3][k / 3]);

    let matrix = DMat3::from_cols_array(&[m[0], m[4], m[8], m[1], m[5], m[9], m[2], m[6], m[10]]);
    let offset = DVec3::new(m[3], m[7], m[11]);

    (matrix, offset)
}

// =============================================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::cell::ExteriorCell;

    fn triangle() -> [DVec3; 3] {
        [
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
        ]
    }

    fn cell_with(basis: ExteriorMatrix) -> ExteriorCell {
        let mut cell = ExteriorCell::new([0, 1, 2], 0);
        cell.matrix = basis.matrix;
        cell.offset = basis.offset;
        cell
    }

    fn cubic(coefficients: DVec3, t: f64) -> f64 {
        t * t * t + coefficients.x * t * t + coefficients.y * t + coefficients.z
    }

    #[test]
    fn test_interior_inverse() {
        let positions = [
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
            DVec3::new(0.0, 0.0, 1.0),
        ];

        let inverse = interior_matrix(positions, 1e-10).unwrap();
        let basis = Tetrahedron::new(positions).basis();
        assert!((inverse * basis).abs_diff_eq(DMat3::IDENTITY, 1e-12));

        // the first corner maps to (1, 0, 0)
        let uvw = inverse * (positions[0] - positions[3]);
        assert!(uvw.abs_diff_eq(DVec3::X, 1e-12));
    }

    #[test]
    fn test_interior_singular() {
        let flat = [
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
            DVec3::new(1.0, 1.0, 0.0),
        ];

        assert_eq!(interior_matrix(flat, 1e-10), Err(0.0));

        let sliver = [
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
            DVec3::new(1.0, 1.0, 1e-14),
        ];
        assert!(interior_matrix(sliver, 1e-10).is_err());
        assert!(interior_matrix(sliver, 0.0).is_ok());
    }

    #[test]
    fn test_cubic_root_recovers_sweep() {
        let positions = triangle();
        let normals = [
            DVec3::new(-0.5, -0.5, 1.0).normalize(),
            DVec3::new(0.7, -0.2, 1.0).normalize(),
            DVec3::new(-0.1, 0.6, 1.0).normalize(),
        ];

        let basis = exterior_matrix(positions, normals, ExteriorBasis::Corrected, 1e-6);
        assert!(!basis.degenerate);
        let cell = cell_with(basis);

        let weights = [0.2, 0.3, 0.5];
        for t in [0.0, 0.25, 0.8, 3.0] {
            let point: DVec3 = (0..3)
                .map(|i| weights[i] * (positions[i] + t * normals[i]))
                .sum();

            let residual = cubic(cell.polynomial(point), t);
            assert!(residual.abs() < 1e-9, "t = {t}, residual = {residual}");
        }
    }

    #[test]
    fn test_parallel_normals_degenerate() {
        let normals = [DVec3::Z; 3];

        let basis = exterior_matrix(triangle(), normals, ExteriorBasis::Corrected, 1e-6);
        assert!(basis.degenerate);

        // straight extrusion: -t + z = 0
        let coefficients = cell_with(basis).polynomial(DVec3::new(0.2, 0.2, 1.5));
        assert!(coefficients.abs_diff_eq(DVec3::new(0.0, -1.0, 1.5), 1e-12));
    }

    #[test]
    fn test_legacy_basis_collapses() {
        let normals = [
            DVec3::new(-0.5, -0.5, 1.0).normalize(),
            DVec3::new(0.7, -0.2, 1.0).normalize(),
            DVec3::new(-0.1, 0.6, 1.0).normalize(),
        ];

        let basis = exterior_matrix(triangle(), normals, ExteriorBasis::Legacy, 1e-6);
        assert!(basis.degenerate);
        assert_eq!(basis.matrix, DMat3::ZERO);
        assert_eq!(basis.offset, DVec3::ZERO);
    }
}
