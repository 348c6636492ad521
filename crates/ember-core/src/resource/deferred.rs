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

//! The per-frame registry of resources needing a refresh pass.
//!
//! Separates "refresh every frame" (e.g. live render-target content) from
//! "refresh exactly once, then stop costing cycles" (e.g. a texture built
//! once from generated content).

use crate::resource::handle::{same_cell, AnyResourceCell};
use std::sync::Arc;

struct UpdateEntry {
    cell: Arc<dyn AnyResourceCell>,
    update_once: bool,
}

/// The deferred-update registry. Mutated only from the device-owning thread.
///
/// All entries share one needs-update flag: it is set once per frame
/// boundary and cleared after the drain pass, so update passes occur at most
/// once per flag-set cycle even if several frames elapse without a new
/// request.
#[derive(Default)]
pub(crate) struct DeferredUpdateSet {
    entries: Vec<UpdateEntry>,
    needs_update: bool,
}

impl DeferredUpdateSet {
    /// Registers a resource for deferred updates.
    ///
    /// The list is small and changes rarely, so a linear scan keeps duplicate
    /// adds collapsed to one entry. A repeated add re-arms the entry: the
    /// latest `update_once` request wins.
    pub(crate) fn add(&mut self, cell: Arc<dyn AnyResourceCell>, update_once: bool) {
        for entry in &mut self.entries {
            if same_cell(&entry.cell, &cell) {
                entry.update_once = update_once;
                return;
            }
        }
        self.entries.push(UpdateEntry { cell, update_once });
    }

    /// Unlinks a resource if present; a no-op otherwise.
    pub(crate) fn remove(&mut self, cell: &Arc<dyn AnyResourceCell>) {
        self.entries.retain(|entry| !same_cell(&entry.cell, cell));
    }

    /// Flags that the next [`DeferredUpdateSet::drain_pass`] should run.
    pub(crate) fn mark_needs_update(&mut self) {
        self.needs_update = true;
    }

    pub(crate) fn needs_update(&self) -> bool {
        self.needs_update
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn contains(&self, cell: &Arc<dyn AnyResourceCell>) -> bool {
        self.entries.iter().any(|entry| same_cell(&entry.cell, cell))
    }

    /// Returns the resources of the current pass, dropping one-shot entries
    /// and clearing the shared flag. Empty when no update was requested.
    pub(crate) fn drain_pass(&mut self) -> Vec<Arc<dyn AnyResourceCell>> {
        if !self.needs_update {
            return Vec::new();
        }
        let pass = self
            .entries
            .iter()
            .map(|entry| entry.cell.clone())
            .collect();
        self.entries.retain(|entry| !entry.update_once);
        self.needs_update = false;
        pass
    }
}
