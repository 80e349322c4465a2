use thiserror::Error;
use wgpu::Device;

use crate::gfx::{
    camera::camera_utils::CameraManager,
    geometry::{generate_cube, generate_plane, generate_sphere},
    resources::material::{Material, MaterialManager},
};

use super::object::{Mesh, Object};

/// Errors raised while loading scene assets from disk.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to load OBJ file '{path}': {source}")]
    Obj {
        path: String,
        #[source]
        source: tobj::LoadError,
    },
    #[error("OBJ file '{path}' contains no geometry")]
    Empty { path: String },
}

/// Main scene containing objects, materials, and camera
pub struct Scene {
    pub camera_manager: CameraManager,
    pub objects: Vec<Object>,
    pub material_manager: MaterialManager,
}

impl Scene {
    /// Creates a new scene with the given camera manager
    pub fn new(camera_manager: CameraManager) -> Self {
        Self {
            camera_manager,
            objects: Vec::new(),
            material_manager: MaterialManager::new(),
        }
    }

    /// Updates the scene (camera matrices, etc.)
    pub fn update(&mut self) {
        self.camera_manager.camera.update_view_proj();
    }

    /// Loads a 3D object from an OBJ file with automatic material extraction
    ///
    /// Loads geometry and materials from the OBJ/MTL files. A load failure is
    /// reported through the log and the object is substituted with a unit
    /// cube so the scene keeps running.
    pub fn add_object(&mut self, object_path: &str) -> ObjectBuilder {
        match self.load_obj_object(object_path) {
            Ok(object) => self.push_object(object),
            Err(err) => {
                log::error!("{err}; substituting placeholder cube");
                let mut object = Object::new(vec![Mesh::from_geometry(&generate_cube())]);
                object.set_name(object_path.to_string());
                self.push_object(object)
            }
        }
    }

    fn load_obj_object(&mut self, object_path: &str) -> Result<Object, AssetError> {
        let (models, materials) = tobj::load_obj(
            object_path,
            &tobj::LoadOptions {
                triangulate: true,
                single_index: true,
                ..Default::default()
            },
        )
        .map_err(|source| AssetError::Obj {
            path: object_path.to_string(),
            source,
        })?;

        if models.is_empty() {
            return Err(AssetError::Empty {
                path: object_path.to_string(),
            });
        }

        let materials = materials.unwrap_or_else(|_| {
            log::debug!("no MTL file for '{object_path}', using default materials");
            Vec::new()
        });

        // Load materials from the OBJ file into the material manager
        for (i, mtl) in materials.iter().enumerate() {
            let material_name = if mtl.name.is_empty() {
                format!("material_{}", i)
            } else {
                mtl.name.clone()
            };

            if self.material_manager.get_material(&material_name).is_some() {
                continue;
            }

            let diffuse = mtl.diffuse.unwrap_or([0.8, 0.8, 0.8]);
            let material = Material::new(
                &material_name,
                [
                    diffuse[0],
                    diffuse[1],
                    diffuse[2],
                    mtl.dissolve.unwrap_or(1.0),
                ],
                0.0, // MTL has no direct metallic value
                1.0 - (mtl.shininess.unwrap_or(32.0) / 128.0).clamp(0.0, 1.0),
            );

            self.material_manager.add_material(material);
        }

        let mut meshes = Vec::new();

        for m in models.iter() {
            let mesh = &m.mesh;

            // Use normals from the OBJ if present, otherwise calculate them
            let normals = if !mesh.normals.is_empty() && mesh.normals.len() == mesh.positions.len()
            {
                mesh.normals.clone()
            } else {
                Mesh::calculate_face_normals(&mesh.positions, &mesh.indices)
            };

            meshes.push(Mesh::new(mesh.positions.clone(), normals, mesh.indices.clone()));
        }

        let mut object = Object::new(meshes);

        if let Some(first_model) = models.first() {
            if !first_model.name.is_empty() {
                object.set_name(first_model.name.clone());
            }

            if let Some(material_id) = first_model.mesh.material_id {
                if material_id < materials.len() {
                    let material_name = if materials[material_id].name.is_empty() {
                        format!("material_{}", material_id)
                    } else {
                        materials[material_id].name.clone()
                    };
                    object.set_material(&material_name);
                }
            }
        }

        Ok(object)
    }

    /// Adds a procedural unit cube to the scene
    pub fn add_cube(&mut self) -> ObjectBuilder {
        let object = Object::new(vec![Mesh::from_geometry(&generate_cube())]);
        self.push_object(object)
    }

    /// Adds a procedural unit sphere to the scene
    pub fn add_sphere(&mut self, longitude_segments: u32, latitude_segments: u32) -> ObjectBuilder {
        let object = Object::new(vec![Mesh::from_geometry(&generate_sphere(
            longitude_segments,
            latitude_segments,
        ))]);
        self.push_object(object)
    }

    /// Adds a procedural plane to the scene (normal +Z)
    pub fn add_plane(
        &mut self,
        width: f32,
        height: f32,
        width_segments: u32,
        height_segments: u32,
    ) -> ObjectBuilder {
        let object = Object::new(vec![Mesh::from_geometry(&generate_plane(
            width,
            height,
            width_segments,
            height_segments,
        ))]);
        self.push_object(object)
    }

    fn push_object(&mut self, mut object: Object) -> ObjectBuilder {
        if object.name.is_empty() {
            object.set_name(format!("object_{}", self.objects.len()));
        }
        let desired = object.name.clone();
        let unique = self.ensure_unique_name(&desired);
        object.set_name(unique);
        self.objects.push(object);
        let index = self.objects.len() - 1;
        ObjectBuilder { scene: self, index }
    }

    /// Creates a new material and adds it to the material manager
    ///
    /// # Arguments
    /// * `name` - Unique name for the material
    /// * `base_color` - RGBA base color
    /// * `metallic` - Metallic factor
    /// * `roughness` - Roughness factor
    pub fn add_material(
        &mut self,
        name: &str,
        base_color: [f32; 4],
        metallic: f32,
        roughness: f32,
    ) -> &mut Material {
        let material = Material::new(name, base_color, metallic, roughness);
        self.material_manager.add_material(material);
        self.material_manager.get_material_mut(name).unwrap()
    }

    /// Convenience method for creating materials with RGB colors
    pub fn add_material_rgb(
        &mut self,
        name: &str,
        r: f32,
        g: f32,
        b: f32,
        metallic: f32,
        roughness: f32,
    ) -> &mut Material {
        self.add_material(name, [r, g, b, 1.0], metallic, roughness)
    }

    /// Initializes GPU resources for all objects and materials
    ///
    /// Must be called after the GPU context is available and before rendering.
    pub fn init_gpu_resources(&mut self, device: &Device, queue: &wgpu::Queue) {
        for object in self.objects.iter_mut() {
            object.init_gpu_resources(device);
        }

        self.material_manager.update_all_gpu_resources(device, queue);
    }

    /// Applies UI/simulation transform changes and syncs them to the GPU
    ///
    /// Called each frame after the simulation update so transform changes
    /// reach the per-object uniform buffers.
    pub fn apply_ui_transforms_and_update_gpu(&mut self, queue: &wgpu::Queue) {
        for object in &mut self.objects {
            if object.visible {
                object.apply_ui_transform();
                object.update_transform(queue);
            }
        }
    }

    /// Gets material for rendering an object
    ///
    /// Returns the material assigned to the object, or the default material
    /// if no material is assigned or the assigned material doesn't exist.
    pub fn get_material_for_object(&self, object: &Object) -> &Material {
        self.material_manager
            .get_material_for_object(object.get_material_id())
    }

    /// Gets all object names for UI display
    pub fn get_object_names(&self) -> Vec<String> {
        self.objects.iter().map(|obj| obj.name.clone()).collect()
    }

    /// Gets the total number of objects
    pub fn get_object_count(&self) -> usize {
        self.objects.len()
    }

    /// Gets mutable reference to an object by index
    pub fn get_object_mut(&mut self, index: usize) -> Option<&mut Object> {
        self.objects.get_mut(index)
    }

    /// Gets immutable reference to an object by index
    pub fn get_object(&self, index: usize) -> Option<&Object> {
        self.objects.get(index)
    }

    /// Finds an object's index by name
    pub fn find_object(&self, name: &str) -> Option<usize> {
        self.objects.iter().position(|obj| obj.name == name)
    }

    /// Finds a mutable object by name
    pub fn find_object_mut(&mut self, name: &str) -> Option<&mut Object> {
        self.objects.iter_mut().find(|obj| obj.name == name)
    }

    pub fn ensure_unique_name(&mut self, desired_name: &str) -> String {
        let mut counter = 0;
        let mut test_name = desired_name.to_string();

        while self.objects.iter().any(|obj| obj.name == test_name) {
            counter += 1;
            test_name = format!("{} ({})", desired_name, counter);
        }

        test_name
    }
}

/// Builder for configuring a freshly added object
pub struct ObjectBuilder<'a> {
    scene: &'a mut Scene,
    index: usize,
}

impl<'a> ObjectBuilder<'a> {
    /// Assigns a material by ID
    pub fn with_material(self, material_id: &str) -> Self {
        if let Some(object) = self.scene.objects.get_mut(self.index) {
            object.set_material(material_id);
        }
        self
    }

    /// Renames the object (made unique against the rest of the scene)
    pub fn with_name(self, name: &str) -> Self {
        // Clear the current name first so the object can't collide with itself
        if let Some(object) = self.scene.objects.get_mut(self.index) {
            object.set_name(String::new());
        }
        let unique = self.scene.ensure_unique_name(name);
        if let Some(object) = self.scene.objects.get_mut(self.index) {
            object.set_name(unique);
        }
        self
    }

    /// Sets position, uniform scale, and yaw (degrees about world up)
    pub fn with_transform(self, position: [f32; 3], scale: f32, yaw_degrees: f32) -> Self {
        if let Some(object) = self.scene.objects.get_mut(self.index) {
            object.ui_transform.position = position;
            object.ui_transform.scale = scale;
            object.ui_transform.rotation = [0.0, 0.0, yaw_degrees];
            object.apply_ui_transform();
        }
        self
    }

    /// Index of the object in the scene
    pub fn index(&self) -> usize {
        self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::{CameraController, CameraManager, OrbitCamera};
    use cgmath::{Vector3, Zero};

    fn test_scene() -> Scene {
        let camera = OrbitCamera::new(5.0, 0.4, 0.2, Vector3::zero(), 1.0);
        let controller = CameraController::new(0.005, 0.1);
        Scene::new(CameraManager::new(camera, controller))
    }

    #[test]
    fn test_unique_names_get_suffixed() {
        let mut scene = test_scene();
        scene.add_cube().with_name("gull");
        scene.add_cube().with_name("gull");
        scene.add_cube().with_name("gull");

        let names = scene.get_object_names();
        assert_eq!(names, vec!["gull", "gull (1)", "gull (2)"]);
    }

    #[test]
    fn test_find_object_by_name() {
        let mut scene = test_scene();
        scene.add_cube().with_name("ship");
        scene
            .add_sphere(8, 6)
            .with_name("island")
            .with_transform([5.0, 0.0, 0.0], 2.0, 0.0);

        assert_eq!(scene.find_object("ship"), Some(0));
        assert_eq!(scene.find_object("island"), Some(1));
        assert_eq!(scene.find_object("kraken"), None);

        let island = scene.find_object_mut("island").unwrap();
        assert_eq!(island.ui_transform.position, [5.0, 0.0, 0.0]);
        assert_eq!(island.ui_transform.scale, 2.0);
    }

    #[test]
    fn test_missing_obj_substitutes_placeholder() {
        let mut scene = test_scene();
        scene
            .add_object("does/not/exist.obj")
            .with_name("phantom")
            .with_material("default");

        // The scene keeps running with a cube in the asset's place
        assert_eq!(scene.get_object_count(), 1);
        let object = scene.get_object(0).unwrap();
        assert_eq!(object.name, "phantom");
        assert_eq!(object.meshes.len(), 1);
        assert_eq!(object.meshes[0].vertex_count, 24);
    }

    #[test]
    fn test_material_fallback_for_objects() {
        let mut scene = test_scene();
        scene.add_material_rgb("ocean", 0.0, 0.1, 0.86, 0.0, 0.3);
        scene.add_cube().with_material("ocean");
        scene.add_cube().with_material("missing_material");

        let ocean_obj = scene.get_object(0).unwrap();
        assert_eq!(scene.get_material_for_object(ocean_obj).name, "ocean");

        let fallback_obj = scene.get_object(1).unwrap();
        assert_eq!(scene.get_material_for_object(fallback_obj).name, "Default");
    }
}
