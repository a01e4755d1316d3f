use glam::DVec3;

/// A light probe sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    pub position: DVec3,
    /// Blended outward normal of the hull faces touching this probe. Zero for
    /// probes strictly inside the hull.
    pub normal: DVec3,
    /// Baked lighting data, filled in by the caller after a build.
    pub coefficients: Vec<DVec3>,
}

impl Vertex {
    pub fn new(position: DVec3) -> Self {
        Self {
            position,
            normal: DVec3::ZERO,
            coefficients: Vec::new(),
        }
    }

    pub fn is_on_hull(&self) -> bool {
        self.normal != DVec3::ZERO
    }
}

impl From<DVec3> for Vertex {
    fn from(position: DVec3) -> Self {
        Self::new(position)
    }
}
