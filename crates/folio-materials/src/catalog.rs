//! Material catalog: owns every material instance and resolves roles to ids.

use std::sync::Arc;

use crate::material::{Material, MaterialError, MaterialId};
use crate::texture::Texture;

/// Role a catalog material plays for classified geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MaterialRole {
    /// Matcap material for rock meshes.
    Rock,
    /// Matcap material for building meshes.
    Building,
    /// Base floor material that per-instance floors are cloned from.
    Floor,
    /// Diagnostic material for unrecognized meshes.
    Normal,
}

/// Dense store of materials, indexed by [`MaterialId`].
///
/// Materials are never removed, so ids stay valid for the catalog's lifetime.
/// The four role materials are created up front.
#[derive(Debug)]
pub struct MaterialCatalog {
    materials: Vec<Material>,
    rock: MaterialId,
    building: MaterialId,
    floor: MaterialId,
    normal: MaterialId,
}

impl MaterialCatalog {
    /// Creates the role materials. Missing matcap textures leave the slot unbound.
    pub fn new(rock_matcap: Option<Arc<Texture>>, building_matcap: Option<Arc<Texture>>) -> Self {
        let materials = vec![
            Material::matcap("rock", rock_matcap),
            Material::matcap("building", building_matcap),
            Material::floor("floor"),
            Material::normal(),
        ];
        Self {
            materials,
            rock: MaterialId(0),
            building: MaterialId(1),
            floor: MaterialId(2),
            normal: MaterialId(3),
        }
    }

    /// Id of the material serving `role`.
    pub fn role(&self, role: MaterialRole) -> MaterialId {
        match role {
            MaterialRole::Rock => self.rock,
            MaterialRole::Building => self.building,
            MaterialRole::Floor => self.floor,
            MaterialRole::Normal => self.normal,
        }
    }

    /// Material serving `role`.
    pub fn by_role(&self, role: MaterialRole) -> &Material {
        &self.materials[self.role(role).0 as usize]
    }

    /// Looks up a material by id.
    pub fn get(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id.0 as usize)
    }

    /// Looks up a material by id for mutation.
    pub fn get_mut(&mut self, id: MaterialId) -> Option<&mut Material> {
        self.materials.get_mut(id.0 as usize)
    }

    /// Adds a material and returns its id.
    pub fn insert(&mut self, material: Material) -> MaterialId {
        let id = MaterialId(self.materials.len() as u32);
        self.materials.push(material);
        id
    }

    /// Inserts an independent copy of `id`. Texture bindings are shared by reference.
    ///
    /// # Errors
    ///
    /// Returns [`MaterialError::UnknownMaterial`] if `id` is not in the catalog.
    pub fn clone_material(&mut self, id: MaterialId) -> Result<MaterialId, MaterialError> {
        let copy = self
            .get(id)
            .cloned()
            .ok_or(MaterialError::UnknownMaterial(id))?;
        Ok(self.insert(copy))
    }

    /// Number of materials, role materials included.
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Always `false`: the role materials exist from construction.
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Iterates `(id, material)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (MaterialId, &Material)> {
        self.materials
            .iter()
            .enumerate()
            .map(|(i, m)| (MaterialId(i as u32), m))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::material::{MaterialFamily, UniformValue, uniforms};

    #[test]
    fn test_roles_resolve_to_distinct_materials() {
        let catalog = MaterialCatalog::new(None, None);
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.by_role(MaterialRole::Rock).name(), "rock");
        assert_eq!(catalog.by_role(MaterialRole::Building).name(), "building");
        assert_eq!(
            catalog.by_role(MaterialRole::Floor).family(),
            MaterialFamily::Floor
        );
        assert_eq!(
            catalog.by_role(MaterialRole::Normal).family(),
            MaterialFamily::Normal
        );
        assert_ne!(
            catalog.role(MaterialRole::Rock),
            catalog.role(MaterialRole::Building)
        );
    }

    #[test]
    fn test_clone_is_independent() {
        let mut catalog = MaterialCatalog::new(None, None);
        let floor = catalog.role(MaterialRole::Floor);
        let copy = catalog.clone_material(floor).unwrap();
        assert_ne!(copy, floor);

        catalog
            .get_mut(copy)
            .unwrap()
            .set_uniform(uniforms::SHADOW_COLOR, UniformValue::Color(Color::WHITE));

        assert_eq!(
            catalog.get(floor).unwrap().color(uniforms::SHADOW_COLOR),
            Some(Color::BLACK)
        );
        assert_eq!(
            catalog.get(copy).unwrap().color(uniforms::SHADOW_COLOR),
            Some(Color::WHITE)
        );
    }

    #[test]
    fn test_clone_unknown_id_fails() {
        let mut catalog = MaterialCatalog::new(None, None);
        let result = catalog.clone_material(MaterialId(99));
        assert!(matches!(result, Err(MaterialError::UnknownMaterial(MaterialId(99)))));
        assert_eq!(catalog.len(), 4);
    }

    #[test]
    fn test_iter_in_insertion_order() {
        let mut catalog = MaterialCatalog::new(None, None);
        let extra = catalog.insert(Material::floor("floor-extra"));
        let ids: Vec<_> = catalog.iter().map(|(id, _)| id).collect();
        assert_eq!(ids.last(), Some(&extra));
        assert_eq!(ids.len(), 5);
    }
}
