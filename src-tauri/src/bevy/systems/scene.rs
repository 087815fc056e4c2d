//! Scene setup system
//!
//! This module handles the initial setup of the 3D scene: the offscreen
//! camera and its render target, and the 26 cubies with their stickers.

use std::collections::HashMap;

use bevy::{
    asset::Assets,
    camera::RenderTarget,
    core_pipeline::tonemapping::Tonemapping,
    image::Image,
    log::info,
    math::primitives::Rectangle,
    pbr::{MeshMaterial3d, StandardMaterial},
    prelude::*,
    render::{
        render_resource::{Extent3d, TextureFormat, TextureUsages},
        renderer::RenderDevice,
    },
};

use crate::bevy::components::{CameraController, Cubie, OffscreenCamera, Sticker};
use crate::bevy::geometry::rounded_box;
use crate::bevy::plugins::image_copy::ImageCopier;
use crate::bevy::resources::{FaceletMaterials, OrbitCameraState, RenderTargetHandle};
use crate::config::geometry::*;
use crate::config::{RENDER_HEIGHT, RENDER_WIDTH};
use crate::cube::{
    position::FACELET_AXES,
    state::{FaceletColour, FILLER},
    CubiePosition,
};

/// Setup the 3D scene with the camera and the cube
pub fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut images: ResMut<Assets<Image>>,
    render_device: Res<RenderDevice>,
    orbit_state: Res<OrbitCameraState>,
) {
    info!("[Bevy] Setting up scene...");

    let size = Extent3d {
        width: RENDER_WIDTH,
        height: RENDER_HEIGHT,
        depth_or_array_layers: 1,
    };

    // Create render target texture
    let mut render_target_image =
        Image::new_target_texture(size.width, size.height, TextureFormat::bevy_default());
    render_target_image.texture_descriptor.usage |= TextureUsages::COPY_SRC;
    let render_target_image_handle = images.add(render_target_image);

    commands.insert_resource(RenderTargetHandle(render_target_image_handle.clone()));

    // Spawn image copier for GPU-to-CPU transfer
    commands.spawn(ImageCopier::new(
        render_target_image_handle.clone(),
        size,
        &render_device,
    ));

    // Stickers and cubie bodies are flat shaded, no lights needed
    commands.spawn((
        Camera3d::default(),
        Camera {
            target: RenderTarget::Image(render_target_image_handle.into()),
            clear_color: ClearColorConfig::Custom(Color::srgb(0.05, 0.08, 0.12)),
            ..default()
        },
        Tonemapping::None,
        Transform::from_translation(orbit_state.eye()).looking_at(orbit_state.center, Vec3::Y),
        OffscreenCamera,
        CameraController,
    ));

    let sticker_materials: HashMap<FaceletColour, Handle<StandardMaterial>> = FaceletColour::ALL
        .into_iter()
        .map(|colour| (colour, materials.add(unlit(colour.color()))))
        .collect();
    let body_material = materials.add(unlit(Color::BLACK));
    let body_mesh = meshes.add(rounded_box(CUBIE_SIZE, CUBIE_RADIUS, CUBIE_SMOOTHNESS));
    let sticker_mesh = meshes.add(Rectangle::new(FACELET_SIZE, FACELET_SIZE));

    for position in CubiePosition::ALL {
        let home = position.home();
        commands
            .spawn((
                Mesh3d(body_mesh.clone()),
                MeshMaterial3d(body_material.clone()),
                Transform::from_translation(home),
                Cubie { position },
                Name::new(position.name()),
            ))
            .with_children(|cubie| {
                for (slot, (axis, index)) in FACELET_AXES
                    .iter()
                    .zip(position.facelet_indices())
                    .enumerate()
                {
                    if index.is_none() {
                        continue;
                    }
                    let outward = axis.unit() * axis.component(home).signum();
                    cubie.spawn((
                        Mesh3d(sticker_mesh.clone()),
                        // Recoloured from the session on the first frame
                        MeshMaterial3d(sticker_materials[&FILLER].clone()),
                        Transform::from_translation(outward * (CUBIE_SIZE / 2.0 + FACELET_LIFT))
                            .with_rotation(Quat::from_rotation_arc(Vec3::Z, outward)),
                        Sticker { position, slot },
                    ));
                }
            });
    }

    commands.insert_resource(FaceletMaterials(sticker_materials));

    info!("[Bevy] Scene setup complete!");
}

fn unlit(color: Color) -> StandardMaterial {
    StandardMaterial {
        base_color: color,
        unlit: true,
        ..default()
    }
}
