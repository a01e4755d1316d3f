use thiserror::Error;

/// Why [`Delaunay::build`](crate::Delaunay::build) produced no structure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    #[error("at least 4 probe positions are required, got {count}")]
    InsufficientPoints { count: usize },

    #[error("no tetrahedron survived triangulation, the probes are likely coplanar or coincident")]
    EmptyTriangulation,

    #[error("cell {cell} has a singular basis (determinant {determinant})")]
    DegenerateCell { cell: usize, determinant: f64 },
}

/// A broken invariant found by [`Delaunay::validate`](crate::Delaunay::validate).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("cell {cell} references vertex {vertex}, which does not exist")]
    VertexOutOfRange { cell: usize, vertex: usize },

    #[error("cell {cell} repeats a vertex")]
    DuplicateVertex { cell: usize },

    #[error("cell {cell} has no neighbour in slot {slot}")]
    MissingNeighbour { cell: usize, slot: usize },

    #[error("cell {cell} slot {slot} points at missing cell {neighbour}")]
    NeighbourOutOfRange {
        cell: usize,
        slot: usize,
        neighbour: usize,
    },

    #[error("cell {cell} lists {neighbour} as neighbour, but not the other way around")]
    AsymmetricNeighbour { cell: usize, neighbour: usize },

    #[error("cell {cell} slot {slot} links to a cell of the wrong kind")]
    MismatchedNeighbourKind { cell: usize, slot: usize },

    #[error("vertex {vertex} lies inside the circumsphere of cell {cell}")]
    DelaunayViolation { cell: usize, vertex: usize },
}
