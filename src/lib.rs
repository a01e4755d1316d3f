//! Delaunay tetrahedralization of light probes.
//!
//! [`Delaunay::build`] turns a cloud of probe positions into:
//!
//! - interior cells, the tetrahedra of the Delaunay tetrahedralization, each with
//!   the inverse basis that converts a point into barycentric weights;
//! - exterior cells, one per convex hull face, each with a basis for
//!   extrapolating along the blended probe normals beyond the hull;
//! - neighbour links between all of them, so a runtime can walk from any cell
//!   toward a query point.
//!
//! ```
//! use glam::DVec3;
//! use light_probe_delaunay::Delaunay;
//!
//! let mut delaunay = Delaunay::new();
//! delaunay
//!     .build(&[
//!         DVec3::new(0.0, 0.0, 0.0),
//!         DVec3::new(1.0, 0.0, 0.0),
//!         DVec3::new(0.0, 1.0, 0.0),
//!         DVec3::new(0.0, 0.0, 1.0),
//!     ])
//!     .unwrap();
//!
//! assert_eq!(delaunay.interior_count(), 1);
//! assert_eq!(delaunay.exterior_count(), 4);
//! ```

mod adjacency;
mod cell;
mod config;
mod delaunay;
mod error;
mod geometry;
mod matrices;
mod tetrahedralize;
mod topology;
mod validation;
mod vertex;

pub use cell::{Cell, CellKind, ExteriorCell, InteriorCell};
pub use config::{BuildOptions, ExteriorBasis};
pub use delaunay::Delaunay;
pub use error::{BuildError, ValidationError};
pub use geometry::{bounding_tetrahedron, Circumsphere, Tetrahedron, AABB};
pub use validation::DELAUNAY_TOLERANCE;
pub use vertex::Vertex;
