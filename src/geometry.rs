use glam::{DMat3, DVec3, DVec4};

// =============================================================================

/// The sphere passing through the four corners of a tetrahedron.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circumsphere {
    pub center: DVec3,
    pub radius_squared: f64,
}

impl Circumsphere {
    /// Compute the circumsphere of four points. Coplanar points yield a sphere
    /// with a non-finite center, see [`Circumsphere::is_finite`].
    pub fn new(p0: DVec3, p1: DVec3, p2: DVec3, p3: DVec3) -> Self {
        // https://math.stackexchange.com/questions/2414640/circumsphere-of-a-tetrahedron
        let u1 = p1 - p0;
        let u2 = p2 - p0;
        let u3 = p3 - p0;

        let l01_sq = u1.length_squared();
        let l02_sq = u2.length_squared();
        let l03_sq = u3.length_squared();

        let center = p0
            + (l01_sq * (u2.cross(u3)) + l02_sq * (u3.cross(u1)) + l03_sq * (u1.cross(u2)))
                / (2.0 * u1.dot(u2.cross(u3)));

        Self {
            center,
            radius_squared: center.distance_squared(p0),
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius_squared.sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.center.is_finite() && self.radius_squared.is_finite()
    }

    /// Check if a point is strictly inside this sphere.
    pub fn contains(&self, point: DVec3) -> bool {
        self.is_finite() && point.distance_squared(self.center) < self.radius_squared
    }

    /// Axis-aligned box enclosing the sphere.
    pub fn bounds(&self) -> AABB {
        let radius = self.radius();
        AABB::new(self.center - radius, self.center + radius)
    }
}

// =============================================================================

/// A Tetrahedron, represented as 4x 3D points.
#[derive(Debug, Clone, Copy)]
pub struct Tetrahedron {
    vertices: [DVec3; 4],
}

impl Tetrahedron {
    pub fn new(vertices: [DVec3; 4]) -> Tetrahedron {
        Self { vertices }
    }

    /// Gather the corners of a tetrahedron from a position array.
    pub fn from_indices(positions: &[DVec3], indices: [usize; 4]) -> Tetrahedron {
        Self::new(indices.map(|i| positions[i]))
    }

    pub fn vertices(&self) -> &[DVec3; 4] {
        &self.vertices
    }

    pub fn circumsphere(&self) -> Circumsphere {
        let [p0, p1, p2, p3] = self.vertices;
        Circumsphere::new(p0, p1, p2, p3)
    }

    /// Average of the four corners.
    pub fn centroid(&self) -> DVec3 {
        self.vertices.iter().sum::<DVec3>() * 0.25
    }

    /// Returns the signed volume of this [`Tetrahedron`].
    pub fn volume(&self) -> f64 {
        let a = self.vertices[1] - self.vertices[0];
        let b = self.vertices[2] - self.vertices[0];
        let c = self.vertices[3] - self.vertices[0];

        (a.cross(b)).dot(c) / 6.0
    }

    /// The edge basis relative to the last corner, `columns(p0-p3, p1-p3, p2-p3)`.
    pub fn basis(&self) -> DMat3 {
        let [p0, p1, p2, p3] = self.vertices;
        DMat3::from_cols(p0 - p3, p1 - p3, p2 - p3)
    }

    /// Barycentric weights of `point`, ordered like the corners. This inverts the
    /// basis on each call; built cells cache the inverse instead.
    pub fn barycentric(&self, point: DVec3) -> DVec4 {
        barycentric_weights(&self.basis().inverse(), self.vertices[3], point)
    }

    /// Test if a point is inside this [`Tetrahedron`]. This can be expensive to call repeatedly.
    pub fn test_point(&self, point: DVec3) -> bool {
        weights_inside(self.barycentric(point))
    }
}

/// Weights `(u, v, w, s)` from a cached inverse basis and its origin corner.
pub(crate) fn barycentric_weights(inverse: &DMat3, origin: DVec3, point: DVec3) -> DVec4 {
    let uvw = *inverse * (point - origin);
    uvw.extend(1.0 - uvw.element_sum())
}

pub(crate) fn weights_inside(weights: DVec4) -> bool {
    weights.cmpge(DVec4::ZERO).all() && weights.cmple(DVec4::ONE).all()
}

// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    pub min: DVec3,
    pub max: DVec3,
}

impl AABB {
    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    /// Smallest box holding every point, or `None` for an empty slice.
    pub fn from_points(points: &[DVec3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let bounds = rest.iter().fold(Self::new(*first, *first), |b, p| {
            Self::new(b.min.min(*p), b.max.max(*p))
        });
        Some(bounds)
    }

    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    pub fn extent(&self) -> DVec3 {
        self.max - self.min
    }

    pub fn largest_extent(&self) -> f64 {
        self.extent().max_element()
    }

    pub fn contains(&self, point: DVec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

/// The four corners of a tetrahedron enclosing `bounds` with a wide margin:
/// each corner sits `scale` times the largest extent away from the center.
pub fn bounding_tetrahedron(bounds: &AABB, scale: f64) -> [DVec3; 4] {
    let c = bounds.center();
    let o = bounds.largest_extent() * scale;

    [
        DVec3::new(c.x, c.y + o, c.z),
        DVec3::new(c.x - o, c.y - o, c.z - o),
        DVec3::new(c.x - o, c.y - o, c.z + o),
        DVec3::new(c.x + o, c.y - o, c.z),
    ]
}

// =============================================================================
