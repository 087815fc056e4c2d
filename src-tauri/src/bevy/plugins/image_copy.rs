//! GPU to CPU frame copy
//!
//! Copies the offscreen render target into a mappable buffer after the
//! camera driver runs, then hands the raw (row padded) bytes to the main
//! world over a channel.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use bevy::{
    log::{error, warn},
    prelude::*,
    render::{
        render_asset::RenderAssets,
        render_graph::{self, NodeRunError, RenderGraph, RenderGraphContext, RenderLabel},
        render_resource::{
            Buffer, BufferDescriptor, BufferUsages, CommandEncoderDescriptor, Extent3d, MapMode,
            PollType, TexelCopyBufferInfo, TexelCopyBufferLayout,
        },
        renderer::{RenderContext, RenderDevice, RenderQueue},
        texture::GpuImage,
        Extract, Render, RenderApp, RenderSystems,
    },
};

use crate::bevy::resources::{MainWorldReceiver, RenderWorldSender};

pub struct ImageCopyPlugin;

impl Plugin for ImageCopyPlugin {
    fn build(&self, app: &mut App) {
        let (sender, receiver) = crossbeam_channel::unbounded();

        let render_app = app
            .insert_resource(MainWorldReceiver(receiver))
            .sub_app_mut(RenderApp);

        let mut graph = render_app.world_mut().resource_mut::<RenderGraph>();
        graph.add_node(FrameCopy, FrameCopyDriver);
        graph.add_node_edge(bevy::render::graph::CameraDriverLabel, FrameCopy);

        render_app
            .insert_resource(RenderWorldSender(sender))
            .add_systems(ExtractSchedule, extract_image_copiers)
            .add_systems(Render, read_copied_frames.after(RenderSystems::Render));
    }
}

/// Copy job for one render target, spawned in the main world
#[derive(Clone, Component)]
pub struct ImageCopier {
    buffer: Buffer,
    enabled: Arc<AtomicBool>,
    src_image: Handle<Image>,
}

impl ImageCopier {
    pub fn new(src_image: Handle<Image>, size: Extent3d, render_device: &RenderDevice) -> Self {
        let padded_bytes_per_row = RenderDevice::align_copy_bytes_per_row(size.width as usize) * 4;

        let buffer = render_device.create_buffer(&BufferDescriptor {
            label: Some("cube_frame_readback"),
            size: padded_bytes_per_row as u64 * size.height as u64,
            usage: BufferUsages::MAP_READ | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            buffer,
            src_image,
            enabled: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    fn disable(&self) {
        self.enabled.store(false, Ordering::Relaxed);
    }
}

#[derive(Clone, Default, Resource, Deref, DerefMut)]
struct ImageCopiers(Vec<ImageCopier>);

fn extract_image_copiers(mut commands: Commands, copiers: Extract<Query<&ImageCopier>>) {
    commands.insert_resource(ImageCopiers(copiers.iter().cloned().collect()));
}

#[derive(Debug, PartialEq, Eq, Clone, Hash, RenderLabel)]
struct FrameCopy;

#[derive(Default)]
struct FrameCopyDriver;

impl render_graph::Node for FrameCopyDriver {
    fn run(
        &self,
        _graph: &mut RenderGraphContext,
        render_context: &mut RenderContext,
        world: &World,
    ) -> Result<(), NodeRunError> {
        let (Some(copiers), Some(gpu_images), Some(render_queue)) = (
            world.get_resource::<ImageCopiers>(),
            world.get_resource::<RenderAssets<GpuImage>>(),
            world.get_resource::<RenderQueue>(),
        ) else {
            return Ok(());
        };

        for copier in copiers.iter().filter(|c| c.enabled()) {
            // Target not uploaded yet on the first frames
            let Some(src_image) = gpu_images.get(&copier.src_image) else {
                continue;
            };

            let block_dimensions = src_image.texture_format.block_dimensions();
            let Some(block_size) = src_image.texture_format.block_copy_size(None) else {
                warn!("[Bevy] Render target format has no copy size, disabling frame copy");
                copier.disable();
                continue;
            };

            let padded_bytes_per_row = RenderDevice::align_copy_bytes_per_row(
                (src_image.size.width as usize / block_dimensions.0 as usize) * block_size as usize,
            );

            let mut encoder = render_context
                .render_device()
                .create_command_encoder(&CommandEncoderDescriptor::default());

            encoder.copy_texture_to_buffer(
                src_image.texture.as_image_copy(),
                TexelCopyBufferInfo {
                    buffer: &copier.buffer,
                    layout: TexelCopyBufferLayout {
                        offset: 0,
                        bytes_per_row: Some(padded_bytes_per_row as u32),
                        rows_per_image: None,
                    },
                },
                src_image.size,
            );

            render_queue.submit(std::iter::once(encoder.finish()));
        }

        Ok(())
    }
}

fn read_copied_frames(
    copiers: Res<ImageCopiers>,
    render_device: Res<RenderDevice>,
    sender: Res<RenderWorldSender>,
) {
    for copier in copiers.iter().filter(|c| c.enabled()) {
        let buffer_slice = copier.buffer.slice(..);

        let (map_sender, map_receiver) = crossbeam_channel::bounded(1);
        buffer_slice.map_async(MapMode::Read, move |result| {
            let _ = map_sender.send(result);
        });

        if let Err(err) = render_device.poll(PollType::wait()) {
            error!("[Bevy] Failed to poll device for frame readback: {err}");
            continue;
        }

        match map_receiver.recv() {
            Ok(Ok(())) => {
                let _ = sender.send(buffer_slice.get_mapped_range().to_vec());
                copier.buffer.unmap();
            }
            Ok(Err(err)) => error!("[Bevy] Failed to map frame buffer: {err}"),
            Err(err) => error!("[Bevy] Frame buffer mapping was dropped: {err}"),
        }
    }
}
