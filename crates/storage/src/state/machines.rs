// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::MaterializedState;
use cm_core::{MachineId, MachineSnapshot};

impl MaterializedState {
    pub(super) fn put_machine(&mut self, snapshot: MachineSnapshot) {
        self.machines.insert(snapshot.id, snapshot);
    }

    pub fn machine(&self, id: MachineId) -> Option<&MachineSnapshot> {
        self.machines.get(&id)
    }
}
