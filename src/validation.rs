use itertools::{iproduct, Itertools};

use crate::{cell::Cell, delaunay::Delaunay, error::ValidationError};

/// Relative depth below which a vertex inside a circumsphere is put down to
/// rounding rather than reported.
pub const DELAUNAY_TOLERANCE: f64 = 1e-9;

impl Delaunay {
    /// Check every structural invariant and the Delaunay property.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.validate_topology()?;
        self.validate_delaunay(DELAUNAY_TOLERANCE)
    }

    /// Vertex references, complete and symmetric neighbour links, and that
    /// exterior cells hang off interior cells.
    pub fn validate_topology(&self) -> Result<(), ValidationError> {
        let vertex_count = self.vertices().len();
        let cells = self.cells();

        for (index, cell) in cells.iter().enumerate() {
            if let Some(&vertex) = cell.vertices().iter().find(|&&v| v >= vertex_count) {
                return Err(ValidationError::VertexOutOfRange {
                    cell: index,
                    vertex,
                });
            }

            if !cell.vertices().iter().all_unique() {
                return Err(ValidationError::DuplicateVertex { cell: index });
            }

            for (slot, neighbour) in cell.neighbours().into_iter().enumerate() {
                let neighbour = neighbour.ok_or(ValidationError::MissingNeighbour {
                    cell: index,
                    slot,
                })?;

                let other = cells
                    .get(neighbour)
                    .ok_or(ValidationError::NeighbourOutOfRange {
                        cell: index,
                        slot,
                        neighbour,
                    })?;

                if !other.neighbours().contains(&Some(index)) {
                    return Err(ValidationError::AsymmetricNeighbour {
                        cell: index,
                        neighbour,
                    });
                }

                let expect_interior = match cell {
                    Cell::Interior(_) => None,
                    Cell::Exterior(_) | Cell::ExteriorDegenerate(_) => Some(slot == 3),
                };

                if expect_interior.is_some_and(|interior| interior != other.is_interior()) {
                    return Err(ValidationError::MismatchedNeighbourKind { cell: index, slot });
                }
            }
        }

        Ok(())
    }

    /// No probe lies deeper than `tolerance` (relative to the squared radius)
    /// inside any interior cell's circumsphere.
    pub fn validate_delaunay(&self, tolerance: f64) -> Result<(), ValidationError> {
        let interiors = self
            .cells()
            .iter()
            .enumerate()
            .filter_map(|(index, cell)| cell.as_interior().map(|c| (index, c)));

        for ((index, cell), (vertex, probe)) in
            iproduct!(interiors, self.vertices().iter().enumerate())
        {
            if cell.vertices.contains(&vertex) {
                continue;
            }

            let sphere = cell.circumsphere();
            let depth = sphere.radius_squared - probe.position.distance_squared(sphere.center);

            if depth > tolerance * sphere.radius_squared {
                return Err(ValidationError::DelaunayViolation {
                    cell: index,
                    vertex,
                });
            }
        }

        Ok(())
    }
}

// =============================================================================
