use glam::{DVec3, DVec4};

use crate::{
    adjacency::compute_adjacency,
    cell::{Cell, CellKind},
    config::BuildOptions,
    error::BuildError,
    geometry::{bounding_tetrahedron, AABB},
    matrices::compute_matrices,
    tetrahedralize::{reorder, InsertionProcess},
    vertex::Vertex,
};

/// Builds and owns the probe tetrahedralization: the probe vertices, the
/// interior and exterior cells, their adjacency, and the per-cell bases the
/// runtime needs to locate a point and blend probes.
///
/// Interior cells come first in [`Delaunay::cells`], followed by exterior cells.
#[derive(Debug, Clone, Default)]
pub struct Delaunay {
    options: BuildOptions,
    pub(crate) vertices: Vec<Vertex>,
    pub(crate) cells: Vec<Cell>,
}

impl Delaunay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: BuildOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Rebuild from `points`. On error the structure is left empty.
    pub fn build(&mut self, points: &[DVec3]) -> Result<(), BuildError> {
        self.reset();

        if points.len() < 4 {
            tracing::warn!(count = points.len(), "too few probes to tetrahedralize");
            return Err(BuildError::InsufficientPoints {
                count: points.len(),
            });
        }

        self.vertices = points.iter().copied().map(Vertex::new).collect();

        if let Err(err) = self.run() {
            self.reset();
            return Err(err);
        }

        debug_assert!(
            self.validate().is_ok(),
            "invalid tetrahedralization: {:?}",
            self.validate()
        );

        tracing::debug!(
            probes = self.vertices.len(),
            cells = self.cells.len(),
            "built probe tetrahedralization"
        );

        Ok(())
    }

    fn run(&mut self) -> Result<(), BuildError> {
        self.tetrahedralize()?;
        compute_adjacency(&mut self.vertices, &mut self.cells);
        compute_matrices(&self.vertices, &mut self.cells, &self.options)
    }

    fn tetrahedralize(&mut self) -> Result<(), BuildError> {
        let probe_count = self.vertices.len();

        let positions: Vec<DVec3> = self.vertices.iter().map(|v| v.position).collect();
        let bounds = AABB::from_points(&positions).ok_or(BuildError::InsufficientPoints {
            count: probe_count,
        })?;

        // the enclosing corners live at the end until insertion is done
        self.vertices.extend(
            bounding_tetrahedron(&bounds, self.options.super_cell_scale).map(Vertex::new),
        );
        let positions: Vec<DVec3> = self.vertices.iter().map(|v| v.position).collect();

        let mut process = InsertionProcess::new(&positions);
        process.add_points();
        let mut cells = process.finish();

        self.vertices.truncate(probe_count);

        if cells.is_empty() {
            tracing::warn!(probes = probe_count, "no tetrahedra after removing the enclosing cell");
            return Err(BuildError::EmptyTriangulation);
        }

        if self.options.reorder_cells {
            reorder(&mut cells, bounds.center());
        }

        tracing::debug!(probes = probe_count, tetrahedra = cells.len(), "tetrahedralized");

        self.cells = cells.into_iter().map(Cell::Interior).collect();
        Ok(())
    }

    pub fn reset(&mut self) {
        self.vertices.clear();
        self.cells.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Mutable access for filling in probe coefficients after a build.
    pub fn vertices_mut(&mut self) -> &mut [Vertex] {
        &mut self.vertices
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    pub fn interior_count(&self) -> usize {
        self.cells.iter().take_while(|c| c.is_interior()).count()
    }

    pub fn exterior_count(&self) -> usize {
        self.cells.len() - self.interior_count()
    }

    pub fn count_of(&self, kind: CellKind) -> usize {
        self.cells.iter().filter(|c| c.kind() == kind).count()
    }

    /// Barycentric weights of `point` in interior cell `cell`, ordered like the
    /// cell's vertices. `None` for exterior or missing cells.
    pub fn barycentric(&self, cell: usize, point: DVec3) -> Option<DVec4> {
        let interior = self.cells.get(cell)?.as_interior()?;
        let origin = self.vertices[interior.vertices[3]].position;
        Some(interior.barycentric(origin, point))
    }

    /// Split into the vertex and cell arrays, for serialization.
    pub fn into_parts(self) -> (Vec<Vertex>, Vec<Cell>) {
        (self.vertices, self.cells)
    }
}

// =============================================================================
