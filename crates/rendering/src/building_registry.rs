//! Building Registry: one box-shaped entity per campus building, the
//! pickable surfaces, and the hover highlight.

use std::collections::HashMap;

use bevy::math::bounding::Aabb3d;
use bevy::prelude::*;

use campus::picking::BuildingId;
use campus::{BuildingDescriptor, BuildingVisual, CampusData};

use crate::labels::{spawn_label, LabelAssets};
use crate::NavigatorState;

/// Root of one building; its `Transform` carries the hover elevation.
#[derive(Component, Debug, Clone, Copy)]
pub struct BuildingRoot {
    pub id: BuildingId,
}

/// The box volume under a [`BuildingRoot`].
#[derive(Component)]
pub struct BuildingBody;

#[derive(Debug, Clone)]
pub struct SceneBuilding {
    pub descriptor: BuildingDescriptor,
    pub root: Entity,
    pub label: Entity,
    pub material: Handle<StandardMaterial>,
    pub hovered: bool,
}

/// Every building in the mounted scene, in descriptor order.
#[derive(Resource, Debug, Default)]
pub struct BuildingRegistry {
    buildings: Vec<SceneBuilding>,
    by_name: HashMap<String, BuildingId>,
}

impl BuildingRegistry {
    pub fn len(&self) -> usize {
        self.buildings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buildings.is_empty()
    }

    pub fn get(&self, id: BuildingId) -> Option<&SceneBuilding> {
        self.buildings.get(id.0)
    }

    pub fn by_name(&self, name: &str) -> Option<(BuildingId, &SceneBuilding)> {
        let id = *self.by_name.get(name)?;
        self.get(id).map(|building| (id, building))
    }

    pub fn iter(&self) -> impl Iterator<Item = (BuildingId, &SceneBuilding)> {
        self.buildings
            .iter()
            .enumerate()
            .map(|(i, building)| (BuildingId(i), building))
    }

    /// One surface per building, sized for its current hover state.
    pub fn pickable_surfaces(&self) -> impl Iterator<Item = (BuildingId, Aabb3d)> + '_ {
        self.iter()
            .map(|(id, building)| (id, building.descriptor.pick_bounds(building.hovered)))
    }

    fn push(&mut self, building: SceneBuilding) {
        let id = BuildingId(self.buildings.len());
        self.by_name.insert(building.descriptor.name.clone(), id);
        self.buildings.push(building);
    }

    /// Highlight and lift (`active`) or restore a building. The visual is
    /// recomputed from the descriptor each time, so toggling never drifts.
    pub fn set_hover(
        &mut self,
        id: BuildingId,
        active: bool,
        roots: &mut Query<&mut Transform, With<BuildingRoot>>,
        materials: &mut Assets<StandardMaterial>,
    ) -> Option<BuildingVisual> {
        let building = self.buildings.get_mut(id.0)?;
        let visual = BuildingVisual::for_hover(&building.descriptor, active);
        building.hovered = active;

        if let Ok(mut transform) = roots.get_mut(building.root) {
            transform.translation.y = visual.elevation;
        }
        if let Some(material) = materials.get_mut(&building.material) {
            material.base_color = visual.color.to_color();
        }
        Some(visual)
    }
}

/// Build the registry from the configured descriptors.
pub fn build_registry(
    mut commands: Commands,
    data: Res<CampusData>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut images: ResMut<Assets<Image>>,
) {
    let mut registry = BuildingRegistry::default();
    let label_assets = LabelAssets::new(&mut meshes);

    for (index, descriptor) in data.buildings.iter().enumerate() {
        let id = BuildingId(index);
        let rest = BuildingVisual::for_hover(descriptor, false);
        let material = materials.add(StandardMaterial {
            base_color: rest.color.to_color(),
            perceptual_roughness: 0.7,
            metallic: 0.3,
            ..default()
        });
        let size = descriptor.size;

        let root = commands
            .spawn((
                BuildingRoot { id },
                Transform::from_xyz(descriptor.position.x, rest.elevation, descriptor.position.z),
                Visibility::default(),
                StateScoped(NavigatorState::Mounted),
                Name::new(descriptor.name.clone()),
            ))
            .with_children(|parent| {
                parent.spawn((
                    BuildingBody,
                    Mesh3d(meshes.add(Cuboid::new(size.x, size.y, size.z))),
                    MeshMaterial3d(material.clone()),
                    // Base sits on the root, not the box centre.
                    Transform::from_xyz(0.0, size.y * 0.5, 0.0),
                ));
            })
            .id();

        let label = spawn_label(
            &mut commands,
            &label_assets,
            &mut images,
            &mut materials,
            descriptor,
            index,
        );
        commands.entity(root).add_child(label);

        registry.push(SceneBuilding {
            descriptor: descriptor.clone(),
            root,
            label,
            material,
            hovered: false,
        });
    }

    info!("Campus scene built with {} building(s)", registry.len());
    commands.insert_resource(registry);
}
