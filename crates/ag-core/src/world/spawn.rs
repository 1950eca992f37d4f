//! Quest spawn commands issued by the quest system

use serde::{Deserialize, Serialize};

use super::Prototype;

/// Request to place `quantity` copies of a prototype somewhere in an Area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnCommand {
    object_to_spawn: Prototype,
    quantity: u32,
}

impl SpawnCommand {
    pub fn new(object_to_spawn: Prototype, quantity: u32) -> Self {
        Self {
            object_to_spawn,
            quantity,
        }
    }

    pub fn object_to_spawn(&self) -> &Prototype {
        &self.object_to_spawn
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }
}
