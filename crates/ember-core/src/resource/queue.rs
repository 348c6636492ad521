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

//! The producer side of the deferred command queue.

use crate::resource::handle::{AnyResourceCell, GpuResource, ResourceHandle};
use std::sync::Arc;

/// A one-shot lifecycle request, owned by the queue from enqueue until the
/// device thread executes it. Commands always execute; there is no
/// cancellation and no retry.
pub(crate) enum ResourceCommand {
    /// Transition the resource into the initialized, backend-resident state.
    Init(Arc<dyn AnyResourceCell>),
    /// Tear down and rebuild the resource's backend state in place.
    Update(Arc<dyn AnyResourceCell>),
    /// Transition the resource back to the uninitialized state.
    Release(Arc<dyn AnyResourceCell>),
    /// Acknowledge with the executed-command generation once every earlier
    /// command has run.
    Flush(flume::Sender<u64>),
}

/// The sanctioned way for code on arbitrary threads to drive a resource's
/// lifecycle.
///
/// Cloning is cheap; every clone feeds the same device queue, and commands
/// execute on the device thread strictly in the order they were enqueued.
#[derive(Debug, Clone)]
pub struct RenderQueue {
    sender: flume::Sender<ResourceCommand>,
}

impl RenderQueue {
    pub(crate) fn new(sender: flume::Sender<ResourceCommand>) -> Self {
        Self { sender }
    }

    /// Enqueues an init for `resource`.
    pub fn begin_init<R: GpuResource>(&self, resource: &ResourceHandle<R>) {
        self.submit(ResourceCommand::Init(resource.cell()));
    }

    /// Enqueues an update for `resource`.
    pub fn begin_update<R: GpuResource>(&self, resource: &ResourceHandle<R>) {
        self.submit(ResourceCommand::Update(resource.cell()));
    }

    /// Enqueues a release for `resource`.
    pub fn begin_release<R: GpuResource>(&self, resource: &ResourceHandle<R>) {
        self.submit(ResourceCommand::Release(resource.cell()));
    }

    /// Enqueues a release for `resource` and blocks until the device thread
    /// has executed it along with everything enqueued before it.
    ///
    /// Returns the device's executed-command generation at the moment the
    /// flush was acknowledged. Used when a caller needs the synchronous
    /// guarantee that backend-side teardown has completed, e.g. immediately
    /// before freeing memory the backend resource pointed into. The device
    /// thread must be pumping its queue or this call will not return.
    pub fn release_and_flush<R: GpuResource>(&self, resource: &ResourceHandle<R>) -> u64 {
        self.submit(ResourceCommand::Release(resource.cell()));
        let (ack_sender, ack_receiver) = flume::bounded(1);
        self.submit(ResourceCommand::Flush(ack_sender));
        match ack_receiver.recv() {
            Ok(generation) => generation,
            Err(_) => {
                log::error!("render device dropped before acknowledging a flush");
                0
            }
        }
    }

    fn submit(&self, command: ResourceCommand) {
        if self.sender.send(command).is_err() {
            log::error!("failed to enqueue render resource command: device queue disconnected");
        }
    }
}
