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

//! Resource handles and the two-phase lifecycle hooks.

use crate::renderer::BackendContext;
use crate::resource::registry::RegistrySlot;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

/// The backend-facing lifecycle hooks a resource kind implements.
///
/// A resource is constructed logically on any thread; the hooks below run
/// only on the device-owning thread, always with a ready [`BackendContext`].
/// The shared-state pair covers setup that multiple instances of a resource
/// kind can share (so several instances amortize expensive one-time work);
/// the backend-state pair covers per-instance backend objects. All four
/// default to doing nothing so a resource kind overrides only what it needs.
pub trait GpuResource: Send + 'static {
    /// Creates state shared across instances of this resource kind.
    fn init_shared_state(&mut self, _context: &BackendContext) {}

    /// Creates the per-instance backend objects.
    fn init_backend_state(&mut self, _context: &BackendContext) {}

    /// Releases the per-instance backend objects.
    ///
    /// Must be safely re-entrant with [`GpuResource::init_backend_state`] so
    /// an update can compose the two.
    fn release_backend_state(&mut self, _context: &BackendContext) {}

    /// Releases state shared across instances of this resource kind.
    fn release_shared_state(&mut self, _context: &BackendContext) {}

    /// An identifying description used in diagnostics and fatal errors.
    fn describe(&self) -> String;
}

/// Lifecycle bookkeeping shared between the handle and the device.
#[derive(Default)]
pub(crate) struct LifecycleState {
    initialized: AtomicBool,
    slot: Mutex<Option<RegistrySlot>>,
}

impl LifecycleState {
    pub(crate) fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    pub(crate) fn set_initialized(&self, initialized: bool) {
        self.initialized.store(initialized, Ordering::Release);
    }

    pub(crate) fn set_slot(&self, slot: RegistrySlot) {
        *self.slot.lock().unwrap() = Some(slot);
    }

    pub(crate) fn take_slot(&self) -> Option<RegistrySlot> {
        self.slot.lock().unwrap().take()
    }
}

/// The type-erased view of a resource cell, used by the command queue, the
/// registry, and the deferred-update set.
pub(crate) trait AnyResourceCell: Send + Sync {
    fn lifecycle(&self) -> &LifecycleState;

    /// Runs the init hooks: shared state first, then backend state.
    fn init_state(&self, context: &BackendContext);

    /// Runs the release hooks: backend state first, then shared state.
    fn release_state(&self, context: &BackendContext);

    fn describe(&self) -> String;
}

/// Returns whether two erased cells refer to the same resource.
pub(crate) fn same_cell(a: &Arc<dyn AnyResourceCell>, b: &Arc<dyn AnyResourceCell>) -> bool {
    Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
}

struct ResourceCell<R: GpuResource> {
    state: Mutex<R>,
    lifecycle: LifecycleState,
}

impl<R: GpuResource> AnyResourceCell for ResourceCell<R> {
    fn lifecycle(&self) -> &LifecycleState {
        &self.lifecycle
    }

    fn init_state(&self, context: &BackendContext) {
        let mut state = self.state.lock().unwrap();
        state.init_shared_state(context);
        state.init_backend_state(context);
    }

    fn release_state(&self, context: &BackendContext) {
        let mut state = self.state.lock().unwrap();
        state.release_backend_state(context);
        state.release_shared_state(context);
    }

    fn describe(&self) -> String {
        self.state.lock().unwrap().describe()
    }
}

impl<R: GpuResource> Drop for ResourceCell<R> {
    fn drop(&mut self) {
        // A resource must observe a release before destruction. Dropping the
        // last handle while still backend-resident is a usage error in the
        // caller and is reported fatally, never ignored.
        if self.lifecycle.is_initialized() && !std::thread::panicking() {
            let description = match self.state.get_mut() {
                Ok(state) => state.describe(),
                Err(poisoned) => poisoned.into_inner().describe(),
            };
            panic!(
                "render resource dropped while still initialized: {description}; \
                 release it through the render queue before dropping the last handle"
            );
        }
    }
}

/// A shared, cloneable handle to a render resource.
///
/// The handle owns the resource's logical state; the device thread mutates it
/// through the queued lifecycle commands. Cloning is cheap and handles can
/// cross threads freely.
pub struct ResourceHandle<R: GpuResource> {
    cell: Arc<ResourceCell<R>>,
}

impl<R: GpuResource> ResourceHandle<R> {
    /// Wraps a logically constructed resource. The resource stays
    /// uninitialized until an init command executes on the device thread.
    pub fn new(resource: R) -> Self {
        Self {
            cell: Arc::new(ResourceCell {
                state: Mutex::new(resource),
                lifecycle: LifecycleState::default(),
            }),
        }
    }

    /// Locks the resource state for inspection or staging updates.
    pub fn lock(&self) -> MutexGuard<'_, R> {
        self.cell.state.lock().unwrap()
    }

    /// Whether the resource is currently in the initialized state.
    pub fn is_initialized(&self) -> bool {
        self.cell.lifecycle.is_initialized()
    }

    pub(crate) fn cell(&self) -> Arc<dyn AnyResourceCell> {
        self.cell.clone()
    }
}

impl<R: GpuResource> Clone for ResourceHandle<R> {
    fn clone(&self) -> Self {
        Self {
            cell: self.cell.clone(),
        }
    }
}

impl<R: GpuResource> std::fmt::Debug for ResourceHandle<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceHandle")
            .field("resource", &self.cell.describe())
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::testing::ProbeResource;
    use std::panic::AssertUnwindSafe;

    #[test]
    fn fresh_handle_is_uninitialized() {
        let events = ProbeResource::event_log();
        let handle = ResourceHandle::new(ProbeResource::new("fresh", &events));
        assert!(!handle.is_initialized());
        assert!(events.lock().unwrap().is_empty());
    }

    #[test]
    fn dropping_uninitialized_resource_is_quiet() {
        let events = ProbeResource::event_log();
        let handle = ResourceHandle::new(ProbeResource::new("quiet", &events));
        drop(handle);
    }

    #[test]
    fn dropping_initialized_resource_is_fatal() {
        let events = ProbeResource::event_log();
        let handle = ResourceHandle::new(ProbeResource::new("leaky", &events));
        handle.cell().lifecycle().set_initialized(true);

        let result = std::panic::catch_unwind(AssertUnwindSafe(move || drop(handle)));
        let message = *result.unwrap_err().downcast::<String>().unwrap();
        assert!(message.contains("still initialized"));
        assert!(message.contains("leaky"));
    }

    #[test]
    fn clones_share_the_same_cell() {
        let events = ProbeResource::event_log();
        let handle = ResourceHandle::new(ProbeResource::new("shared", &events));
        let clone = handle.clone();
        assert!(same_cell(&handle.cell(), &clone.cell()));

        let other = ResourceHandle::new(ProbeResource::new("other", &events));
        assert!(!same_cell(&handle.cell(), &other.cell()));
    }
}
