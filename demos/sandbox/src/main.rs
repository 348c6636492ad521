// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

// Ember sandbox
// Drives the full resource lifecycle: backend selection, producer threads
// creating dynamic textures through the queue, a deferred-update pass, a
// blocking flush, and teardown.

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use ember_core::renderer::api::{BackendConfig, PixelFormat, RenderSettings};
use ember_core::resource::{DynamicTexture2D, RenderDevice, ResourceHandle};
use ember_infra::{FeatureTier, StandardBackendFactory};

const PRODUCERS: usize = 3;

fn config_from_args() -> BackendConfig {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let has = |flag: &str| args.iter().any(|arg| arg == flag);

    // The probe stands in for a real driver query; the reference rasterizer
    // always reports the advanced tier.
    let mut config =
        BackendConfig::with_probe(std::sync::Arc::new(|| FeatureTier::Advanced.capabilities()));
    config.force_null = has("-nullrhi");
    config.headless_server = has("-headless");
    config.force_baseline = has("-forcebaseline");
    config.force_advanced = has("-forceadvanced");
    config.prefer_tiled = has("-tiled");
    config.allow_advanced = !has("-noadvanced");
    config
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct Texel {
    rgba: [u8; 4],
}

fn checkerboard(width: u32, height: u32, tint: u8) -> Vec<Texel> {
    let mut texels = Vec::with_capacity((width * height) as usize);
    for y in 0..height {
        for x in 0..width {
            let on = (x / 8 + y / 8) % 2 == 0;
            texels.push(Texel {
                rgba: if on { [tint, 0, 255, 255] } else { [0, 0, 0, 255] },
            });
        }
    }
    texels
}

fn main() -> Result<()> {
    env_logger::init();

    let mut device = RenderDevice::new(RenderSettings::default());
    device.init(&StandardBackendFactory::new(), &config_from_args())?;
    let context = device.context().expect("device just initialized").clone();
    log::info!(
        "backend up: {} (capabilities {:?})",
        context.backend().adapter_info().name,
        context.capabilities()
    );

    // Producer threads create textures and stage content; none of them ever
    // touches the backend directly.
    let (handle_sender, handle_receiver) = mpsc::channel::<ResourceHandle<DynamicTexture2D>>();
    let workers: Vec<_> = (0..PRODUCERS)
        .map(|worker| {
            let queue = device.queue();
            let sender = handle_sender.clone();
            thread::spawn(move || {
                let size: u32 = 64 << worker;
                let handle =
                    DynamicTexture2D::create(&queue, size, size, PixelFormat::Rgba8UnormSrgb, false)
                        .expect("dimensions are valid");
                handle
                    .lock()
                    .set_texels(&checkerboard(size, size, worker as u8 * 0x40));
                log::info!("producer {worker}: staged a {size}x{size} texture");

                // A transient scratch texture, synchronously torn down before
                // the producer moves on.
                if let Some(scratch) =
                    DynamicTexture2D::create(&queue, 16, 16, PixelFormat::Rgba8Unorm, true)
                {
                    let generation = queue.release_and_flush(&scratch);
                    log::info!("producer {worker}: scratch flushed at generation {generation}");
                }

                sender.send(handle).expect("main thread is receiving");
            })
        })
        .collect();
    drop(handle_sender);

    // The device thread's main loop: pump commands until the producers are
    // done and their handles collected.
    let mut handles = Vec::new();
    while handles.len() < PRODUCERS || workers.iter().any(|worker| !worker.is_finished()) {
        device.pump(Duration::from_millis(5));
        while let Ok(handle) = handle_receiver.try_recv() {
            handles.push(handle);
        }
    }
    for worker in workers {
        worker.join().expect("producer thread panicked");
    }
    device.drain();

    // One texture refreshes exactly once, the rest every frame.
    for (index, handle) in handles.iter().enumerate() {
        device.add_to_deferred_updates(handle, index == 0);
    }
    for frame in 0..3 {
        device.mark_needs_update();
        device.update_deferred_resources();
        log::info!(
            "frame {frame}: {} deferred entries remain",
            device.deferred_update_count()
        );
    }

    let stats = context.backend().texture_memory_stats();
    log::info!(
        "{} live resources, {} textures, {} bytes of texture memory",
        device.live_resource_count(),
        stats.texture_count,
        stats.allocated_bytes
    );

    let queue = device.queue();
    for handle in &handles {
        queue.begin_release(handle);
    }
    device.drain();
    device.shutdown();
    log::info!("clean shutdown");
    Ok(())
}
