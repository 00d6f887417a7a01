use ultraviolet::DVec3;

use crate::{
    materials::MaterialId,
    primatives::{Ray, Sphere, Triangle},
};

pub use self::hitable::{Hit, Hittable};

pub mod hitable;

#[derive(Debug)]
pub struct SphereRenderObject {
    pub sphere: Sphere,
    pub mat: MaterialId,
}

impl SphereRenderObject {
    pub fn new(center: DVec3, radius: f64, mat: MaterialId) -> Self {
        Self {
            sphere: Sphere { center, radius },
            mat,
        }
    }
}

impl Hittable for SphereRenderObject {
    fn intersect(&self, ray: &Ray) -> Hit<'_> {
        let t = self.sphere.intersect(ray);
        if t == f64::INFINITY {
            return Hit::miss();
        }

        let pos = ray.at(t);
        Hit::new(self, t, self.sphere.normal(pos, ray.direction))
    }

    fn material(&self) -> MaterialId {
        self.mat
    }
}

#[derive(Debug)]
pub struct TriRenderObject {
    pub tri: Triangle,
    pub mat: MaterialId,
}

impl TriRenderObject {
    pub fn new(p0: DVec3, p1: DVec3, p2: DVec3, mat: MaterialId) -> Self {
        Self {
            tri: Triangle::new(p0, p1, p2),
            mat,
        }
    }
}

impl Hittable for TriRenderObject {
    fn intersect(&self, ray: &Ray) -> Hit<'_> {
        let t = self.tri.intersect(ray);
        if t == f64::INFINITY {
            return Hit::miss();
        }
        // Flat shading: one normal for the whole face.
        Hit::new(self, t, self.tri.n)
    }

    fn material(&self) -> MaterialId {
        self.mat
    }
}

/// Triangles sharing a single material. Hits report the triangle that was
/// struck, not the mesh.
#[derive(Debug)]
pub struct MeshRenderObject {
    pub tris: Vec<TriRenderObject>,
    pub mat: MaterialId,
}

impl MeshRenderObject {
    pub fn new(mat: MaterialId) -> Self {
        Self {
            tris: Vec::new(),
            mat,
        }
    }

    pub fn push(&mut self, p0: DVec3, p1: DVec3, p2: DVec3) {
        self.tris.push(TriRenderObject::new(p0, p1, p2, self.mat));
    }

    pub fn len(&self) -> usize {
        self.tris.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tris.is_empty()
    }
}

impl Hittable for MeshRenderObject {
    fn intersect(&self, ray: &Ray) -> Hit<'_> {
        nearest(self.tris.iter().map(|tri| tri.intersect(ray)))
    }

    fn material(&self) -> MaterialId {
        self.mat
    }
}

/// Keep the strictly closest hit; on equal distances the first one wins.
pub(crate) fn nearest<'a>(hits: impl Iterator<Item = Hit<'a>>) -> Hit<'a> {
    let mut min_hit = Hit::miss();
    for hit in hits {
        if hit.distance < min_hit.distance {
            min_hit = hit;
        }
    }
    min_hit
}

#[derive(Debug)]
pub enum Shape {
    Sphere(SphereRenderObject),
    Triangle(TriRenderObject),
    Mesh(MeshRenderObject),
}

impl Shape {
    pub fn sphere(center: DVec3, radius: f64, mat: MaterialId) -> Self {
        Shape::Sphere(SphereRenderObject::new(center, radius, mat))
    }

    pub fn triangle(p0: DVec3, p1: DVec3, p2: DVec3, mat: MaterialId) -> Self {
        Shape::Triangle(TriRenderObject::new(p0, p1, p2, mat))
    }

    fn inner(&self) -> &dyn Hittable {
        match self {
            Shape::Sphere(sphere) => sphere,
            Shape::Triangle(tri) => tri,
            Shape::Mesh(mesh) => mesh,
        }
    }
}

impl From<SphereRenderObject> for Shape {
    fn from(sphere: SphereRenderObject) -> Self {
        Shape::Sphere(sphere)
    }
}

impl From<TriRenderObject> for Shape {
    fn from(tri: TriRenderObject) -> Self {
        Shape::Triangle(tri)
    }
}

impl From<MeshRenderObject> for Shape {
    fn from(mesh: MeshRenderObject) -> Self {
        Shape::Mesh(mesh)
    }
}

impl Hittable for Shape {
    fn intersect(&self, ray: &Ray) -> Hit<'_> {
        self.inner().intersect(ray)
    }

    fn material(&self) -> MaterialId {
        self.inner().material()
    }
}
