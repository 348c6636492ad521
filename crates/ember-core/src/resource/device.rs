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

//! The device-side owner of the backend, the command queue consumer, and the
//! registries of live and deferred-update resources.

use crate::renderer::api::{BackendConfig, RenderSettings};
use crate::renderer::error::SelectionError;
use crate::renderer::selection::select_and_create;
use crate::renderer::traits::BackendFactory;
use crate::renderer::BackendContext;
use crate::resource::deferred::DeferredUpdateSet;
use crate::resource::handle::{AnyResourceCell, GpuResource, ResourceHandle};
use crate::resource::queue::{RenderQueue, ResourceCommand};
use crate::resource::registry::ResourceRegistry;
use std::sync::Arc;
use std::thread::{self, ThreadId};
use std::time::Duration;

/// The single owner of the active backend and the only executor of resource
/// lifecycle transitions.
///
/// A `RenderDevice` is claimed by the first thread that initializes or pumps
/// it; from then on every lifecycle-executing call must come from that same
/// thread. Producers on other threads interact exclusively through the
/// [`RenderQueue`] returned by [`RenderDevice::queue`]. Commands drain in
/// strict FIFO enqueue order, so two requests for the same resource can never
/// be reordered or interleaved.
pub struct RenderDevice {
    context: Option<Arc<BackendContext>>,
    settings: RenderSettings,
    registry: ResourceRegistry,
    updates: DeferredUpdateSet,
    receiver: flume::Receiver<ResourceCommand>,
    queue: RenderQueue,
    executed: u64,
    owner: Option<ThreadId>,
}

impl RenderDevice {
    /// Creates an uninitialized device. No backend exists until
    /// [`RenderDevice::init`] runs.
    pub fn new(settings: RenderSettings) -> Self {
        let (sender, receiver) = flume::unbounded();
        Self {
            context: None,
            settings,
            registry: ResourceRegistry::default(),
            updates: DeferredUpdateSet::default(),
            receiver,
            queue: RenderQueue::new(sender),
            executed: 0,
            owner: None,
        }
    }

    /// Returns a producer handle onto this device's command queue.
    pub fn queue(&self) -> RenderQueue {
        self.queue.clone()
    }

    /// Whether a backend is currently active.
    pub fn is_initialized(&self) -> bool {
        self.context.is_some()
    }

    /// The active backend context, if any.
    pub fn context(&self) -> Option<&Arc<BackendContext>> {
        self.context.as_ref()
    }

    /// The number of resources currently linked into the registry.
    pub fn live_resource_count(&self) -> usize {
        self.registry.live_count()
    }

    /// The number of entries in the deferred-update list.
    pub fn deferred_update_count(&self) -> usize {
        self.updates.len()
    }

    /// The number of lifecycle commands executed so far.
    pub fn executed_generation(&self) -> u64 {
        self.executed
    }

    /// Selects and constructs the backend for `config`.
    ///
    /// Idempotent: a second call on an initialized device is a no-op. Once
    /// the backend is up, every resource that was logically initialized
    /// before the device existed gets its backend state created, so early
    /// registration is safe.
    ///
    /// # Errors
    ///
    /// Any [`SelectionError`]; a process cannot proceed without a backend, so
    /// callers treat this as fatal.
    pub fn init(
        &mut self,
        factory: &dyn BackendFactory,
        config: &BackendConfig,
    ) -> Result<(), SelectionError> {
        self.claim_owner("initialize the render device");
        if self.context.is_some() {
            log::trace!("render device already initialized; ignoring init");
            return Ok(());
        }

        let context = Arc::new(select_and_create(factory, config, self.settings.clone())?);

        let mut revived = 0usize;
        for cell in self.registry.live() {
            if cell.lifecycle().is_initialized() {
                cell.init_state(&context);
                revived += 1;
            }
        }
        if revived > 0 {
            log::debug!("created backend state for {revived} early-registered resources");
        }

        self.context = Some(context);
        Ok(())
    }

    /// Destroys the backend. Registered resources lose their backend state
    /// but stay logically initialized, exactly as after a device loss; a
    /// later [`RenderDevice::init`] brings them back.
    ///
    /// Calling on an uninitialized device is a no-op.
    pub fn shutdown(&mut self) {
        self.claim_owner("shut down the render device");
        let Some(context) = self.context.take() else {
            log::trace!("render device not initialized; ignoring shutdown");
            return;
        };

        let mut released = 0usize;
        for cell in self.registry.live() {
            if cell.lifecycle().is_initialized() {
                cell.release_state(&context);
                released += 1;
            }
        }
        log::info!("render device shut down; {released} resources lost their backend state");
    }

    /// Executes every pending command in FIFO order and returns how many ran.
    pub fn drain(&mut self) -> usize {
        self.claim_owner("drain the render queue");
        let mut ran = 0usize;
        while let Ok(command) = self.receiver.try_recv() {
            self.execute(command);
            ran += 1;
        }
        ran
    }

    /// Blocks up to `timeout` for a command, then drains everything pending.
    ///
    /// Returns how many commands ran; zero means the timeout elapsed with an
    /// empty queue. This is the device thread's main-loop primitive.
    pub fn pump(&mut self, timeout: Duration) -> usize {
        self.claim_owner("pump the render queue");
        match self.receiver.recv_timeout(timeout) {
            Ok(command) => {
                self.execute(command);
                1 + self.drain()
            }
            Err(_) => 0,
        }
    }

    /// Registers a resource for deferred updates.
    ///
    /// Adding an already-present resource is a no-op apart from re-arming its
    /// policy: the latest `update_once` request wins.
    pub fn add_to_deferred_updates<R: GpuResource>(
        &mut self,
        resource: &ResourceHandle<R>,
        update_once: bool,
    ) {
        self.claim_owner("edit the deferred-update list");
        self.updates.add(resource.cell(), update_once);
    }

    /// Unlinks a resource from the deferred-update list if present.
    pub fn remove_from_deferred_updates<R: GpuResource>(&mut self, resource: &ResourceHandle<R>) {
        self.claim_owner("edit the deferred-update list");
        self.updates.remove(&resource.cell());
    }

    /// Flags the deferred-update list for a refresh pass. Called once per
    /// frame boundary by the scene renderer.
    pub fn mark_needs_update(&mut self) {
        self.updates.mark_needs_update();
    }

    /// Runs the deferred refresh pass if one was requested.
    ///
    /// Every listed resource goes through a full update cycle; one-shot
    /// entries leave the list afterwards, and the shared needs-update flag is
    /// cleared so at most one pass runs per flag-set cycle.
    pub fn update_deferred_resources(&mut self) {
        self.claim_owner("run the deferred-update pass");
        for cell in self.updates.drain_pass() {
            self.update_cell(&cell);
        }
    }

    /// Tears down and rebuilds the backend state of every registered
    /// resource in place, preserving logical identity. Used after structural
    /// device changes such as a device-lost/reset cycle.
    pub fn reinit_all_resources(&mut self) {
        self.claim_owner("re-initialize all resources");
        if self.context.is_none() {
            return;
        }
        let live = self.registry.live();
        for cell in &live {
            self.update_cell(cell);
        }
        log::info!("re-initialized {} resources after a device reset", live.len());
    }

    fn execute(&mut self, command: ResourceCommand) {
        match command {
            ResourceCommand::Init(cell) => {
                self.execute_init(cell);
                self.executed += 1;
            }
            ResourceCommand::Update(cell) => {
                self.update_cell(&cell);
                self.executed += 1;
            }
            ResourceCommand::Release(cell) => {
                self.execute_release(cell);
                self.executed += 1;
            }
            ResourceCommand::Flush(ack) => {
                // FIFO order guarantees everything enqueued before the flush
                // has already run; the generation makes that observable.
                let _ = ack.send(self.executed);
            }
        }
    }

    fn execute_init(&mut self, cell: Arc<dyn AnyResourceCell>) {
        if cell.lifecycle().is_initialized() {
            return;
        }
        let slot = self.registry.insert(Arc::downgrade(&cell));
        cell.lifecycle().set_slot(slot);
        if let Some(context) = &self.context {
            cell.init_state(context);
        }
        cell.lifecycle().set_initialized(true);
    }

    fn execute_release(&mut self, cell: Arc<dyn AnyResourceCell>) {
        if !cell.lifecycle().is_initialized() {
            return;
        }
        if let Some(context) = &self.context {
            cell.release_state(context);
        }
        if let Some(slot) = cell.lifecycle().take_slot() {
            self.registry.remove(slot);
        }
        // A released resource has no business being refreshed anymore.
        self.updates.remove(&cell);
        cell.lifecycle().set_initialized(false);
    }

    fn update_cell(&self, cell: &Arc<dyn AnyResourceCell>) {
        if !cell.lifecycle().is_initialized() {
            return;
        }
        if let Some(context) = &self.context {
            cell.release_state(context);
            cell.init_state(context);
        }
    }

    fn claim_owner(&mut self, operation: &str) {
        let current = thread::current().id();
        match self.owner {
            None => self.owner = Some(current),
            Some(owner) if owner == current => {}
            Some(owner) => panic!(
                "attempted to {operation} from thread {current:?}, but the render device is \
                 owned by thread {owner:?}; route the request through the render queue instead"
            ),
        }
    }
}

impl std::fmt::Debug for RenderDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderDevice")
            .field("initialized", &self.is_initialized())
            .field("live_resources", &self.registry.live_count())
            .field("deferred_updates", &self.updates.len())
            .field("executed", &self.executed)
            .finish()
    }
}
