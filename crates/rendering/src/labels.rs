//! Building name labels.
//!
//! Each label is drawn once into its own texture by an offscreen 2D camera
//! (one render layer per label), then shown on a quad above the building.
//! The quad is turned to face the camera every frame.

use bevy::pbr::NotShadowCaster;
use bevy::prelude::*;
use bevy::render::camera::RenderTarget;
use bevy::render::render_asset::RenderAssetUsages;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat, TextureUsages};
use bevy::render::view::RenderLayers;

use campus::config::{
    LABEL_FONT_SIZE, LABEL_GAP, LABEL_HEIGHT, LABEL_TEXTURE_HEIGHT, LABEL_TEXTURE_WIDTH,
    LABEL_WIDTH,
};
use campus::BuildingDescriptor;

use crate::camera::NavigatorCamera;
use crate::NavigatorState;

/// Layer 0 is the 3D scene; labels use the layers after it.
const FIRST_LABEL_LAYER: usize = 1;
const PLATE_COLOR: Color = Color::srgba(0.0, 0.0, 0.0, 0.7);
const BORDER_COLOR: Color = Color::srgba(1.0, 1.0, 1.0, 0.8);
const BORDER_WIDTH: f32 = 4.0;

/// The quad showing a label texture. Child of a building root.
#[derive(Component, Debug, Clone)]
pub struct BuildingLabel {
    pub building: String,
}

/// Offscreen camera that draws one label texture.
#[derive(Component)]
pub struct LabelCamera;

/// Shared quad mesh for all labels in a scene.
pub struct LabelAssets {
    quad: Handle<Mesh>,
}

impl LabelAssets {
    pub fn new(meshes: &mut Assets<Mesh>) -> Self {
        Self {
            quad: meshes.add(Rectangle::new(LABEL_WIDTH, LABEL_HEIGHT)),
        }
    }
}

/// Blank render-target texture for one label.
pub fn label_texture() -> Image {
    let size = Extent3d {
        width: LABEL_TEXTURE_WIDTH,
        height: LABEL_TEXTURE_HEIGHT,
        depth_or_array_layers: 1,
    };
    let mut image = Image::new_fill(
        size,
        TextureDimension::D2,
        &[0, 0, 0, 0],
        TextureFormat::Bgra8UnormSrgb,
        RenderAssetUsages::default(),
    );
    image.texture_descriptor.usage =
        TextureUsages::TEXTURE_BINDING | TextureUsages::COPY_DST | TextureUsages::RENDER_ATTACHMENT;
    image
}

/// Spawn the texture pipeline and the quad for one building; returns the
/// quad entity, which despawns with the building it is parented to.
pub fn spawn_label(
    commands: &mut Commands,
    assets: &LabelAssets,
    images: &mut Assets<Image>,
    materials: &mut Assets<StandardMaterial>,
    descriptor: &BuildingDescriptor,
    index: usize,
) -> Entity {
    let texture = images.add(label_texture());
    let layer = RenderLayers::layer(FIRST_LABEL_LAYER + index);

    commands.spawn((
        Camera2d,
        Camera {
            target: RenderTarget::Image(texture.clone()),
            clear_color: ClearColorConfig::Custom(PLATE_COLOR),
            order: -1 - index as isize,
            ..default()
        },
        layer.clone(),
        LabelCamera,
        StateScoped(NavigatorState::Mounted),
    ));

    let width = LABEL_TEXTURE_WIDTH as f32;
    let height = LABEL_TEXTURE_HEIGHT as f32;
    let half = Vec2::new(width, height) * 0.5 - BORDER_WIDTH * 0.5 - 2.0;
    for (offset, size) in [
        (Vec2::new(0.0, half.y), Vec2::new(width - 4.0, BORDER_WIDTH)),
        (Vec2::new(0.0, -half.y), Vec2::new(width - 4.0, BORDER_WIDTH)),
        (Vec2::new(-half.x, 0.0), Vec2::new(BORDER_WIDTH, height - 4.0)),
        (Vec2::new(half.x, 0.0), Vec2::new(BORDER_WIDTH, height - 4.0)),
    ] {
        commands.spawn((
            Sprite::from_color(BORDER_COLOR, size),
            Transform::from_translation(offset.extend(0.0)),
            layer.clone(),
            StateScoped(NavigatorState::Mounted),
        ));
    }

    commands.spawn((
        Text2d::new(descriptor.name.clone()),
        TextFont {
            font_size: LABEL_FONT_SIZE,
            ..default()
        },
        TextColor(Color::WHITE),
        Transform::from_xyz(0.0, 0.0, 1.0),
        layer,
        StateScoped(NavigatorState::Mounted),
    ));

    let material = materials.add(StandardMaterial {
        base_color_texture: Some(texture),
        unlit: true,
        alpha_mode: AlphaMode::Blend,
        cull_mode: None,
        depth_bias: 1_000.0,
        ..default()
    });

    commands
        .spawn((
            BuildingLabel {
                building: descriptor.name.clone(),
            },
            Mesh3d(assets.quad.clone()),
            MeshMaterial3d(material),
            Transform::from_xyz(0.0, descriptor.size.y + LABEL_GAP, 0.0),
            NotShadowCaster,
        ))
        .id()
}

/// Turn every label to face the camera. Labels hang off unrotated building
/// roots, so copying the camera rotation is enough.
pub fn billboard_labels(
    camera: Query<&Transform, With<NavigatorCamera>>,
    mut labels: Query<&mut Transform, (With<BuildingLabel>, Without<NavigatorCamera>)>,
) {
    let Ok(camera) = camera.get_single() else {
        return;
    };
    for mut transform in &mut labels {
        transform.rotation = camera.rotation;
    }
}
