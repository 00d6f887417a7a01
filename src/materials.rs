use std::fmt;

use ultraviolet::DVec3;

/// Phong surface description. Immutable once built.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub ambient: DVec3,
    pub diffuse: DVec3,
    pub specular: DVec3,
    pub specular_exponent: f64,
}

impl Material {
    pub fn new(ambient: DVec3, diffuse: DVec3, specular: DVec3, specular_exponent: f64) -> Self {
        Self {
            ambient,
            diffuse,
            specular,
            specular_exponent,
        }
    }

    pub fn is_reflective(&self) -> bool {
        self.specular != DVec3::zero()
    }
}

impl Default for Material {
    fn default() -> Self {
        Material {
            ambient: DVec3::zero(),
            diffuse: DVec3::new(1.0, 1.0, 1.0),
            specular: DVec3::zero(),
            specular_exponent: 1.0,
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Material")?;
        writeln!(f, "    ambient: {:?}", self.ambient)?;
        writeln!(f, "    diffuse: {:?}", self.diffuse)?;
        write!(
            f,
            "    specular: {:?} - {}",
            self.specular, self.specular_exponent
        )
    }
}

/// Handle to a material held by a [`MaterialStore`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MaterialId(usize);

impl MaterialId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Owns every material of a scene. Shapes only keep a [`MaterialId`], so a
/// mesh and all of its triangles can share one entry.
#[derive(Debug, Default)]
pub struct MaterialStore {
    materials: Vec<Material>,
}

impl MaterialStore {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn insert(&mut self, material: Material) -> MaterialId {
        self.materials.push(material);
        MaterialId(self.materials.len() - 1)
    }

    /// Ids are only handed out by `insert` and entries are never removed.
    ///
    /// # Panics
    ///
    /// If `id` was issued by a different store and is out of range here.
    pub fn get(&self, id: MaterialId) -> &Material {
        &self.materials[id.0]
    }

    pub fn contains(&self, id: MaterialId) -> bool {
        id.0 < self.materials.len()
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_hands_out_stable_ids() {
        let mut store = MaterialStore::new();
        let red = store.insert(Material::new(
            DVec3::new(0.1, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::zero(),
            1.0,
        ));
        let mirror = store.insert(Material::new(
            DVec3::zero(),
            DVec3::zero(),
            DVec3::new(0.9, 0.9, 0.9),
            64.0,
        ));

        assert_eq!(store.len(), 2);
        assert_ne!(red, mirror);
        assert_eq!(store.get(red).diffuse, DVec3::new(1.0, 0.0, 0.0));
        assert!(store.get(mirror).is_reflective());
        assert!(!store.get(red).is_reflective());
        assert!(store.contains(mirror));
        assert!(!MaterialStore::new().contains(mirror));
    }
}
