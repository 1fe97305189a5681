//! Register versioning
//!
//! The target has no mutable variables, so every write to a register slot
//! introduces a fresh binding. Version 0 is the name the block-entry pattern
//! bound; each rebinding bumps the slot's version and renders as
//! `<slot><version>` (`a1`, `bp3`, ...).

use crate::compiler::ir::Reg;

/// Current symbolic name of every register slot within one block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterVersions {
    versions: [u32; Reg::COUNT],
    names: [String; Reg::COUNT],
}

impl RegisterVersions {
    /// Block-entry state: every slot at version 0 under its base name
    pub fn new() -> Self {
        Self {
            versions: [0; Reg::COUNT],
            names: Reg::ALL.map(|reg| reg.name().to_string()),
        }
    }

    /// Most recent name bound for `reg`
    pub fn current(&self, reg: Reg) -> &str {
        &self.names[reg.index()]
    }

    /// Number of rebindings of `reg` since block entry
    pub fn version(&self, reg: Reg) -> u32 {
        self.versions[reg.index()]
    }

    /// Allocates the next version of `reg` and returns its name
    pub fn rebind(&mut self, reg: Reg) -> &str {
        let i = reg.index();
        self.versions[i] += 1;
        self.names[i] = format!("{}{}", reg.name(), self.versions[i]);
        &self.names[i]
    }

    /// Makes `reg` refer to an existing expression without a new version
    pub fn alias(&mut self, reg: Reg, name: impl Into<String>) {
        self.names[reg.index()] = name.into();
    }

    /// Returns to the block-entry state
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Space-separated current names of all six slots, in machine order
    pub fn vector(&self) -> String {
        self.names.join(" ")
    }
}

impl Default for RegisterVersions {
    fn default() -> Self {
        Self::new()
    }
}
