//! The four-slot exclusivity table.
//!
//! Invariant: at most one of {process, system, mixed} is occupied at any
//! time; microphone may coexist with process or system but never with
//! mixed. Each claim validates against the current occupancy and either
//! records the session or returns the blocking slot as a typed rejection.

use crate::models::error::RecorderError;
use crate::models::session_kind::{MixSource, SessionKind, SlotKind};

#[derive(Debug, Default)]
pub struct SlotTable {
    process: Option<u32>,
    microphone: Option<String>,
    system: bool,
    mixed: Option<MixedSlot>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MixedSlot {
    pub source: MixSource,
    pub microphone_device_id: Option<String>,
}

impl SlotTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn claim_process(&mut self, pid: u32) -> Result<(), RecorderError> {
        if self.mixed.is_some() {
            return Err(RecorderError::SlotOccupied(SlotKind::Mixed));
        }
        if self.system {
            return Err(RecorderError::SlotOccupied(SlotKind::System));
        }
        if self.process.is_some() {
            return Err(RecorderError::SlotOccupied(SlotKind::Process));
        }
        self.process = Some(pid);
        Ok(())
    }

    pub fn claim_system(&mut self) -> Result<(), RecorderError> {
        if self.mixed.is_some() {
            return Err(RecorderError::SlotOccupied(SlotKind::Mixed));
        }
        if self.process.is_some() {
            return Err(RecorderError::SlotOccupied(SlotKind::Process));
        }
        if self.system {
            return Err(RecorderError::SlotOccupied(SlotKind::System));
        }
        self.system = true;
        Ok(())
    }

    pub fn claim_microphone(&mut self, device_id: String) -> Result<(), RecorderError> {
        if self.mixed.is_some() {
            return Err(RecorderError::SlotOccupied(SlotKind::Mixed));
        }
        if self.microphone.is_some() {
            return Err(RecorderError::SlotOccupied(SlotKind::Microphone));
        }
        self.microphone = Some(device_id);
        Ok(())
    }

    /// Mixed claims the engine's process-capture slot and, when a
    /// microphone is included, the microphone slot, so it requires the
    /// whole table to be empty.
    pub fn claim_mixed(
        &mut self,
        source: MixSource,
        microphone_device_id: Option<String>,
    ) -> Result<(), RecorderError> {
        if self.process.is_some() {
            return Err(RecorderError::SlotOccupied(SlotKind::Process));
        }
        if self.microphone.is_some() {
            return Err(RecorderError::SlotOccupied(SlotKind::Microphone));
        }
        if self.system {
            return Err(RecorderError::SlotOccupied(SlotKind::System));
        }
        if self.mixed.is_some() {
            return Err(RecorderError::SlotOccupied(SlotKind::Mixed));
        }
        self.mixed = Some(MixedSlot {
            source,
            microphone_device_id,
        });
        Ok(())
    }

    /// Record the resolved device id for an already-claimed microphone
    /// slot. Claiming happens before resolution so a blocked request
    /// never reaches the engine.
    pub fn set_microphone(&mut self, device_id: String) {
        if self.microphone.is_some() {
            self.microphone = Some(device_id);
        }
    }

    /// Update the microphone recorded for the mixed slot once it has been
    /// resolved mid-startup.
    pub fn set_mixed_microphone(&mut self, device_id: Option<String>) {
        if let Some(slot) = &mut self.mixed {
            slot.microphone_device_id = device_id;
        }
    }

    /// Clear `slot`, returning what occupied it. Unconditional: clearing
    /// an empty slot is a no-op and never an error.
    pub fn release(&mut self, slot: SlotKind) -> Option<SessionKind> {
        match slot {
            SlotKind::Process => self.process.take().map(SessionKind::Process),
            SlotKind::Microphone => self.microphone.take().map(SessionKind::Microphone),
            SlotKind::System => {
                let was = self.system;
                self.system = false;
                was.then_some(SessionKind::System)
            }
            SlotKind::Mixed => self.mixed.take().map(|m| SessionKind::Mixed {
                source: m.source,
                microphone_device_id: m.microphone_device_id,
            }),
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_occupied(&self, slot: SlotKind) -> bool {
        match slot {
            SlotKind::Process => self.process.is_some(),
            SlotKind::Microphone => self.microphone.is_some(),
            SlotKind::System => self.system,
            SlotKind::Mixed => self.mixed.is_some(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.process.is_none() && self.microphone.is_none() && !self.system && self.mixed.is_none()
    }

    /// Occupied slots in stable order.
    pub fn occupied(&self) -> Vec<SlotKind> {
        let mut slots = Vec::new();
        for kind in [
            SlotKind::Process,
            SlotKind::Microphone,
            SlotKind::System,
            SlotKind::Mixed,
        ] {
            if self.is_occupied(kind) {
                slots.push(kind);
            }
        }
        slots
    }
}
