use glam::DVec3;
use itertools::Itertools;
use rstar::{
    primitives::{GeomWithData, Rectangle},
    RTree,
};

use crate::{
    cell::InteriorCell,
    geometry::{Circumsphere, Tetrahedron},
    topology::Face,
};

// =============================================================================

type TreePoint = [f64; 3];
type TreeRect = Rectangle<TreePoint>;
type IndexRect = GeomWithData<TreeRect, usize>;

// =============================================================================

/// A tetrahedron under construction.
#[derive(Debug, Clone, Copy)]
struct Pending {
    vertices: [usize; 4],
    sphere: Circumsphere,
}

/// Bowyer-Watson insertion over a fixed position array whose last four entries
/// are the corners of an enclosing tetrahedron.
#[derive(Debug)]
pub(crate) struct InsertionProcess<'a> {
    positions: &'a [DVec3],
    tetra: Vec<Option<Pending>>,
    faces: Vec<Face>,
    bad_tetrahedra: Vec<usize>,
    bad_tree: Vec<IndexRect>,
    lookup_accel: RTree<IndexRect>,
}

impl<'a> InsertionProcess<'a> {
    pub fn new(positions: &'a [DVec3]) -> Self {
        let first = positions.len() - 4;

        let mut ret = Self {
            positions,
            tetra: Default::default(),
            faces: Default::default(),
            bad_tetrahedra: Default::default(),
            bad_tree: Default::default(),
            lookup_accel: Default::default(),
        };

        ret.push_tetra([first, first + 1, first + 2, first + 3]);

        ret
    }

    fn push_tetra(&mut self, vertices: [usize; 4]) {
        let sphere = Tetrahedron::from_indices(self.positions, vertices).circumsphere();
        let spot = self.tetra.len();

        self.tetra.push(Some(Pending { vertices, sphere }));

        // a flat tetrahedron can never contain a point, so it never needs finding
        if sphere.is_finite() {
            let bb = sphere.bounds();
            self.lookup_accel.insert(IndexRect::new(
                TreeRect::from_corners(bb.min.into(), bb.max.into()),
                spot,
            ));
        }
    }

    /// Insert the real points, `0..positions.len() - 4`, in order.
    pub fn add_points(&mut self) {
        for index in 0..self.positions.len() - 4 {
            self.add_point(index);
        }
    }

    fn add_point(&mut self, index: usize) {
        let point = self.positions[index];

        self.bad_tetrahedra.clear();
        self.bad_tree.clear();

        for rect in self.lookup_accel.locate_all_at_point(&point.into()) {
            let Some(tetra) = &self.tetra[rect.data] else {
                continue;
            };

            if tetra.sphere.contains(point) {
                self.bad_tetrahedra.push(rect.data);
                self.bad_tree.push(*rect);
            }
        }

        self.find_boundary_polygon();

        // Remove bad tetrahedra
        for bad_tetra_index in &self.bad_tetrahedra {
            self.tetra[*bad_tetra_index] = None;
        }

        // we also need to erase the tetra in our accel tree
        for bad_tree_node in &self.bad_tree {
            self.lookup_accel.remove(bad_tree_node);
        }

        tracing::trace!(
            index,
            removed = self.bad_tetrahedra.len(),
            created = self.faces.len(),
            "inserted probe"
        );

        self.create_new_tetrahedra(index);
    }

    /// Collect the faces of the bad tetrahedra that are not shared between two
    /// of them. What is left bounds the cavity.
    fn find_boundary_polygon(&mut self) {
        self.faces.clear();

        for &bad_tetra_index in &self.bad_tetrahedra {
            if let Some(bad_tetra) = &self.tetra[bad_tetra_index] {
                self.faces
                    .extend(Face::all(bad_tetra_index, &bad_tetra.vertices));
            }
        }

        let counts = self.faces.iter().map(Face::key).counts();
        self.faces.retain(|face| counts[&face.key()] == 1);
    }

    fn create_new_tetrahedra(&mut self, index: usize) {
        let faces = std::mem::take(&mut self.faces);

        for face in &faces {
            let [a, b, c] = face.vertices;
            self.push_tetra([a, b, c, index]);
        }

        self.faces = faces;
    }

    /// Drop every tetrahedron touching the enclosing corners and return the rest.
    pub fn finish(self) -> Vec<InteriorCell> {
        let real = self.positions.len() - 4;

        self.tetra
            .into_iter()
            .flatten()
            .filter(|tetra| tetra.vertices.iter().all(|&v| v < real))
            .map(|tetra| InteriorCell::new(tetra.vertices, self.positions))
            .collect()
    }
}

/// Stable sort of cells by distance of their centroid from `center`.
pub(crate) fn reorder(cells: &mut [InteriorCell], center: DVec3) {
    cells.sort_by(|a, b| {
        a.centroid
            .distance_squared(center)
            .total_cmp(&b.centroid.distance_squared(center))
    });
}

// =============================================================================
