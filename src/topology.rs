//! Transient faces and edges used while stitching cells together.

/// Corner order of the face opposite each vertex of a tetrahedron. With the
/// orientation every built cell shares, these windings face outward.
pub(crate) const FACE_WINDING: [[usize; 3]; 4] = [[1, 3, 2], [0, 2, 3], [0, 3, 1], [0, 1, 2]];

/// Corner pair of the edge opposite each vertex of a hull triangle.
pub(crate) const EDGE_WINDING: [[usize; 2]; 3] = [[1, 2], [2, 0], [0, 1]];

/// A face of a tetrahedron: owning cell, slot in that cell, and wound corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Face {
    pub cell: usize,
    pub slot: usize,
    pub vertices: [usize; 3],
}

impl Face {
    pub fn all(cell: usize, tetra: &[usize; 4]) -> [Face; 4] {
        std::array::from_fn(|slot| Face {
            cell,
            slot,
            vertices: FACE_WINDING[slot].map(|k| tetra[k]),
        })
    }

    /// Winding independent identity of the face.
    pub fn key(&self) -> [usize; 3] {
        let mut key = self.vertices;
        key.sort_unstable();
        key
    }
}

/// An edge of a hull triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Edge {
    pub cell: usize,
    pub slot: usize,
    pub vertices: [usize; 2],
}

impl Edge {
    pub fn all(cell: usize, triangle: &[usize; 3]) -> [Edge; 3] {
        std::array::from_fn(|slot| Edge {
            cell,
            slot,
            vertices: EDGE_WINDING[slot].map(|k| triangle[k]),
        })
    }

    pub fn key(&self) -> [usize; 2] {
        let [a, b] = self.vertices;
        [a.min(b), a.max(b)]
    }
}
