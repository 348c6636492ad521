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

//! The registry of live resources, used for bulk re-initialization sweeps.

use crate::resource::handle::AnyResourceCell;
use std::sync::{Arc, Weak};

/// A lightweight handle into the registry's slot table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RegistrySlot(usize);

/// A slot arena of weak references to every initialized resource.
///
/// Mutated only from the device-owning thread. Slots are recycled through a
/// free list so the table stays dense and a full sweep is a plain array scan.
#[derive(Default)]
pub(crate) struct ResourceRegistry {
    slots: Vec<Option<Weak<dyn AnyResourceCell>>>,
    free: Vec<usize>,
}

impl ResourceRegistry {
    pub(crate) fn insert(&mut self, cell: Weak<dyn AnyResourceCell>) -> RegistrySlot {
        match self.free.pop() {
            Some(index) => {
                self.slots[index] = Some(cell);
                RegistrySlot(index)
            }
            None => {
                self.slots.push(Some(cell));
                RegistrySlot(self.slots.len() - 1)
            }
        }
    }

    pub(crate) fn remove(&mut self, slot: RegistrySlot) {
        if let Some(entry) = self.slots.get_mut(slot.0) {
            if entry.take().is_some() {
                self.free.push(slot.0);
            }
        }
    }

    /// Upgrades every occupied slot, skipping resources whose last handle is
    /// already gone.
    pub(crate) fn live(&self) -> Vec<Arc<dyn AnyResourceCell>> {
        self.slots
            .iter()
            .flatten()
            .filter_map(Weak::upgrade)
            .collect()
    }

    pub(crate) fn live_count(&self) -> usize {
        self.slots
            .iter()
            .flatten()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }
}
