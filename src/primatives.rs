use ultraviolet::DVec3;

/// Distances closer than this are discarded so a ray leaving a surface does
/// not immediately hit that same surface again.
pub const SURFACE_EPSILON: f64 = 0.001;

/// Triangle determinants below this are treated as parallel or back facing.
pub const PARALLEL_EPSILON: f64 = 0.0001;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: DVec3,
    pub direction: DVec3,
}

impl Ray {
    /// `direction` is expected to be normalized already.
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self { origin, direction }
    }

    /// Ray from `origin` passing through `target`.
    pub fn through(origin: DVec3, target: DVec3) -> Self {
        Self {
            origin,
            direction: (target - origin).normalized(),
        }
    }

    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }
}

/// Mirror `direction` about `normal`.
pub fn reflected(direction: DVec3, normal: DVec3) -> DVec3 {
    direction - normal * (2.0 * direction.dot(normal))
}

/// Clamp every channel of a colour into [0, 1].
pub fn clamped(color: DVec3) -> DVec3 {
    DVec3::new(
        color.x.clamp(0.0, 1.0),
        color.y.clamp(0.0, 1.0),
        color.z.clamp(0.0, 1.0),
    )
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sphere {
    pub center: DVec3,
    pub radius: f64,
}

impl Sphere {
    /// Distance to the nearest usable root, `f64::INFINITY` on a miss.
    pub fn intersect(&self, ray: &Ray) -> f64 {
        let oc = ray.origin - self.center;

        let a = ray.direction.dot(ray.direction);
        let b = 2.0 * oc.dot(ray.direction);
        let c = oc.dot(oc) - self.radius * self.radius;
        let discriminant = b * b - 4.0 * a * c;

        if discriminant < 0.0 {
            return f64::INFINITY;
        }

        let root = discriminant.sqrt();
        let t1 = (-b - root) / (2.0 * a);
        let t2 = (-b + root) / (2.0 * a);

        let t = if t1 < 0.0 {
            t2
        } else if t2 < 0.0 {
            t1
        } else {
            t1.min(t2)
        };

        // Also covers both roots being negative.
        if t < SURFACE_EPSILON {
            return f64::INFINITY;
        }
        t
    }

    /// Outward normal at `pos`, flipped to face against `direction`.
    pub fn normal(&self, pos: DVec3, direction: DVec3) -> DVec3 {
        let n = (pos - self.center) / self.radius;
        if direction.dot(n) > 0.0 {
            -n
        } else {
            n
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub p0: DVec3,
    pub p1: DVec3,
    pub p2: DVec3,
    pub n: DVec3,
}

impl Triangle {
    pub fn new(p0: DVec3, p1: DVec3, p2: DVec3) -> Self {
        let n = (p1 - p0).cross(p2 - p0).normalized();
        Self { p0, p1, p2, n }
    }

    /// Single sided Möller–Trumbore test, `f64::INFINITY` on a miss.
    pub fn intersect(&self, ray: &Ray) -> f64 {
        let edge1 = self.p1 - self.p0;
        let edge2 = self.p2 - self.p0;
        let h = ray.direction.cross(edge2);
        let a = edge1.dot(h);
        if a < PARALLEL_EPSILON {
            // Parallel to the plane, or seen from behind.
            return f64::INFINITY;
        }

        let f = 1.0 / a;
        let s = ray.origin - self.p0;
        let u = f * s.dot(h);
        if !(0.0..=1.0).contains(&u) {
            return f64::INFINITY;
        }

        let q = s.cross(edge1);
        let v = f * ray.direction.dot(q);
        if v < 0.0 || u + v > 1.0 {
            return f64::INFINITY;
        }

        let t = f * edge2.dot(q);
        if t < SURFACE_EPSILON {
            // Line intersection, but behind the ray.
            return f64::INFINITY;
        }
        t
    }
}
