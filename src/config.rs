/// Which edge vectors feed the exterior cell polynomial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExteriorBasis {
    /// `A = p0 - p2`, `B = p1 - p2` and the matching normal differences.
    #[default]
    Corrected,
    /// `A = p1 - p2` with `B` and its normal difference left at zero, matching
    /// data baked by older tools. Every exterior cell comes out degenerate with
    /// a zero basis.
    Legacy,
}

/// Tunables for [`Delaunay::build`](crate::Delaunay::build).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuildOptions {
    /// Distance of the enclosing tetrahedron's corners from the bounds center,
    /// in multiples of the largest bounds extent.
    pub super_cell_scale: f64,
    /// Exterior cells whose cubic leading coefficient is at or below this
    /// magnitude fall back to a quadratic.
    pub exterior_epsilon: f64,
    /// Interior cells whose basis determinant, relative to the product of its
    /// edge lengths, is at or below this are rejected as degenerate.
    pub degenerate_tolerance: f64,
    /// Sort interior cells so those nearest the bounds center come first.
    pub reorder_cells: bool,
    pub exterior_basis: ExteriorBasis,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            super_cell_scale: 10.0,
            exterior_epsilon: 1e-6,
            degenerate_tolerance: 1e-10,
            reorder_cells: true,
            exterior_basis: ExteriorBasis::Corrected,
        }
    }
}

impl BuildOptions {
    pub fn with_super_cell_scale(mut self, scale: f64) -> Self {
        self.super_cell_scale = scale;
        self
    }

    pub fn with_exterior_epsilon(mut self, epsilon: f64) -> Self {
        self.exterior_epsilon = epsilon;
        self
    }

    pub fn with_degenerate_tolerance(mut self, tolerance: f64) -> Self {
        self.degenerate_tolerance = tolerance;
        self
    }

    pub fn with_reorder_cells(mut self, reorder: bool) -> Self {
        self.reorder_cells = reorder;
        self
    }

    pub fn with_exterior_basis(mut self, basis: ExteriorBasis) -> Self {
        self.exterior_basis = basis;
        self
    }
}
