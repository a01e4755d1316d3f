use glam::{DMat3, DVec3, DVec4};

use crate::geometry::{barycentric_weights, weights_inside, Circumsphere, Tetrahedron};

// =============================================================================

/// A tetrahedron of the triangulation, bounded on all sides by probes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteriorCell {
    pub(crate) vertices: [usize; 4],
    pub(crate) neighbours: [Option<usize>; 4],
    pub(crate) matrix: DMat3,
    pub(crate) centroid: DVec3,
    pub(crate) circumsphere: Circumsphere,
}

impl InteriorCell {
    pub(crate) fn new(vertices: [usize; 4], positions: &[DVec3]) -> Self {
        let tetra = Tetrahedron::from_indices(positions, vertices);

        Self {
            vertices,
            neighbours: [None; 4],
            matrix: DMat3::ZERO,
            centroid: tetra.centroid(),
            circumsphere: tetra.circumsphere(),
        }
    }

    pub fn vertices(&self) -> [usize; 4] {
        self.vertices
    }

    /// Slot `k` holds the cell across the face opposite vertex `k`.
    pub fn neighbours(&self) -> [Option<usize>; 4] {
        self.neighbours
    }

    /// Inverse of `columns(p0-p3, p1-p3, p2-p3)`.
    pub fn matrix(&self) -> DMat3 {
        self.matrix
    }

    pub fn centroid(&self) -> DVec3 {
        self.centroid
    }

    pub fn circumsphere(&self) -> &Circumsphere {
        &self.circumsphere
    }

    /// Barycentric weights `(u, v, w, s)` of `point` for the corners in order.
    /// `origin` is the position of the last corner.
    pub fn barycentric(&self, origin: DVec3, point: DVec3) -> DVec4 {
        barycentric_weights(&self.matrix, origin, point)
    }

    pub fn contains(&self, origin: DVec3, point: DVec3) -> bool {
        weights_inside(self.barycentric(origin, point))
    }
}

/// The unbounded region beyond one convex hull face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExteriorCell {
    pub(crate) vertices: [usize; 3],
    pub(crate) neighbours: [Option<usize>; 4],
    pub(crate) matrix: DMat3,
    pub(crate) offset: DVec3,
}

impl ExteriorCell {
    pub(crate) fn new(vertices: [usize; 3], interior: usize) -> Self {
        Self {
            vertices,
            neighbours: [None, None, None, Some(interior)],
            matrix: DMat3::ZERO,
            offset: DVec3::ZERO,
        }
    }

    pub fn vertices(&self) -> [usize; 3] {
        self.vertices
    }

    /// Slots 0 to 2 hold the exterior cells across the edge opposite vertex `k`,
    /// slot 3 the interior cell this one extends.
    pub fn neighbours(&self) -> [Option<usize>; 4] {
        self.neighbours
    }

    pub fn interior(&self) -> Option<usize> {
        self.neighbours[3]
    }

    pub fn matrix(&self) -> DMat3 {
        self.matrix
    }

    pub fn offset(&self) -> DVec3 {
        self.offset
    }

    /// Unpack the stored layout back into its three coefficient rows, each
    /// `[x, y, z, constant]`, for the `t²`, `t` and `1` terms.
    pub fn coefficient_rows(&self) -> [DVec4; 3] {
        let c = self.matrix.to_cols_array();
        let o = self.offset;
        [
            DVec4::new(c[0], o.x, c[7], c[5]),
            DVec4::new(c[3], c[1], o.y, c[8]),
            DVec4::new(c[6], c[4], c[2], o.z),
        ]
    }

    /// The polynomial coefficients `(p, q, r)` for `point`. The extrapolation
    /// parameter of `point` is a root of `t³ + p·t² + q·t + r`, or of
    /// `p·t² + q·t + r` for a degenerate cell.
    pub fn polynomial(&self, point: DVec3) -> DVec3 {
        let x = point.extend(1.0);
        let [p, q, r] = self.coefficient_rows();
        DVec3::new(p.dot(x), q.dot(x), r.dot(x))
    }
}

// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    Interior,
    Exterior,
    /// An exterior cell whose cubic collapsed; the runtime solves a quadratic.
    ExteriorDegenerate,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell {
    Interior(InteriorCell),
    Exterior(ExteriorCell),
    ExteriorDegenerate(ExteriorCell),
}

impl Cell {
    pub fn kind(&self) -> CellKind {
        match self {
            Cell::Interior(_) => CellKind::Interior,
            Cell::Exterior(_) => CellKind::Exterior,
            Cell::ExteriorDegenerate(_) => CellKind::ExteriorDegenerate,
        }
    }

    pub fn is_interior(&self) -> bool {
        matches!(self, Cell::Interior(_))
    }

    pub fn as_interior(&self) -> Option<&InteriorCell> {
        match self {
            Cell::Interior(cell) => Some(cell),
            _ => None,
        }
    }

    pub fn as_exterior(&self) -> Option<&ExteriorCell> {
        match self {
            Cell::Exterior(cell) | Cell::ExteriorDegenerate(cell) => Some(cell),
            Cell::Interior(_) => None,
        }
    }

    /// Vertex indices, 4 for interior cells and 3 for exterior cells.
    pub fn vertices(&self) -> &[usize] {
        match self {
            Cell::Interior(cell) => &cell.vertices,
            Cell::Exterior(cell) | Cell::ExteriorDegenerate(cell) => &cell.vertices,
        }
    }

    pub fn neighbours(&self) -> [Option<usize>; 4] {
        match self {
            Cell::Interior(cell) => cell.neighbours,
            Cell::Exterior(cell) | Cell::ExteriorDegenerate(cell) => cell.neighbours,
        }
    }

    pub fn neighbour(&self, slot: usize) -> Option<usize> {
        self.neighbours()[slot]
    }

    pub(crate) fn set_neighbour(&mut self, slot: usize, cell: usize) {
        match self {
            Cell::Interior(c) => c.neighbours[slot] = Some(cell),
            Cell::Exterior(c) | Cell::ExteriorDegenerate(c) => c.neighbours[slot] = Some(cell),
        }
    }

    pub fn matrix(&self) -> DMat3 {
        match self {
            Cell::Interior(cell) => cell.matrix,
            Cell::Exterior(cell) | Cell::ExteriorDegenerate(cell) => cell.matrix,
        }
    }

    /// Flat vertex indices with the 4th slot set to `-1` for exterior cells and
    /// `-2` for degenerate exterior cells.
    pub fn raw_vertex_indices(&self) -> [i32; 4] {
        match self {
            Cell::Interior(cell) => cell.vertices.map(|v| v as i32),
            Cell::Exterior(cell) => {
                let [a, b, c] = cell.vertices.map(|v| v as i32);
                [a, b, c, -1]
            }
            Cell::ExteriorDegenerate(cell) => {
                let [a, b, c] = cell.vertices.map(|v| v as i32);
                [a, b, c, -2]
            }
        }
    }

    /// Flat neighbour indices with `-1` for unassigned slots.
    pub fn raw_neighbours(&self) -> [i32; 4] {
        self.neighbours().map(|n| n.map_or(-1, |i| i as i32))
    }
}

// =============================================================================

#[cfg(test)]
mod test {
    use super::*;

    fn unit_positions() -> Vec<DVec3> {
        vec![
            (0.0, 0.0, 0.0).into(),
            (1.0, 0.0, 0.0).into(),
            (0.0, 1.0, 0.0).into(),
            (0.0, 0.0, 1.0).into(),
        ]
    }

    #[test]
    fn test_raw_views() {
        let positions = unit_positions();
        let mut interior = Cell::Interior(InteriorCell::new([0, 1, 2, 3], &positions));
        interior.set_neighbour(2, 7);

        assert_eq!(interior.raw_vertex_indices(), [0, 1, 2, 3]);
        assert_eq!(interior.raw_neighbours(), [-1, -1, 7, -1]);
        assert_eq!(interior.vertices().len(), 4);

        let exterior = ExteriorCell::new([3, 1, 2], 0);
        assert_eq!(Cell::Exterior(exterior).raw_vertex_indices(), [3, 1, 2, -1]);
        assert_eq!(
            Cell::ExteriorDegenerate(exterior).raw_vertex_indices(),
            [3, 1, 2, -2]
        );
        assert_eq!(Cell::Exterior(exterior).raw_neighbours(), [-1, -1, -1, 0]);
        assert_eq!(exterior.interior(), Some(0));
    }

    #[test]
    fn test_kinds() {
        let positions = unit_positions();
        let interior = Cell::Interior(InteriorCell::new([0, 1, 2, 3], &positions));
        let exterior = Cell::ExteriorDegenerate(ExteriorCell::new([0, 1, 2], 0));

        assert_eq!(interior.kind(), CellKind::Interior);
        assert!(interior.as_exterior().is_none());
        assert_eq!(exterior.kind(), CellKind::ExteriorDegenerate);
        assert!(exterior.as_exterior().is_some());
        assert!(!exterior.is_interior());

        let cell = interior.as_interior().unwrap();
        assert!(cell.centroid().abs_diff_eq(DVec3::splat(0.25), 1e-12));
        assert!(cell
            .circumsphere()
            .center
            .abs_diff_eq(DVec3::splat(0.5), 1e-12));
    }

    #[test]
    fn test_coefficient_layout() {
        // m[3j + i] is row i, column j
        let m: [f64; 12] = std::array::from_fn(|k| k as f64);
        let mut cell = ExteriorCell::new([0, 1, 2], 0);
        cell.matrix = DMat3::from_cols_array(&[m[0], m[4], m[8], m[1], m[5], m[9], m[2], m[6], m[10]]);
        cell.offset = DVec3::new(m[3], m[7], m[11]);

        let [p, q, r] = cell.coefficient_rows();
        assert_eq!(p, DVec4::new(0.0, 3.0, 6.0, 9.0));
        assert_eq!(q, DVec4::new(1.0, 4.0, 7.0, 10.0));
        assert_eq!(r, DVec4::new(2.0, 5.0, 8.0, 11.0));
    }
}
