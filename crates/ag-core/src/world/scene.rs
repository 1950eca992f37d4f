//! Scene materialization contract
//!
//! The renderer owns the real objects. Areas and rooms only keep the
//! handles they were given and drive activation and destruction.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use super::Prototype;
use crate::CELL_SIZE;
use crate::grid::Point;

/// Opaque reference to an instantiated scene object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectHandle(pub u64);

/// Position in world units. Grid `x` maps to `x`, grid `y` to `z`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPos {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl WorldPos {
    /// World position of a grid cell, raised by `y_offset`
    pub fn from_cell(cell: Point, y_offset: f32) -> Self {
        let scaled = cell * CELL_SIZE;
        Self {
            x: scaled.x as f32,
            y: y_offset,
            z: scaled.y as f32,
        }
    }

    /// Grid cell this position falls in
    pub fn to_cell(self) -> Point {
        let size = CELL_SIZE as f32;
        Point::new((self.x / size).round() as i32, (self.z / size).round() as i32)
    }
}

/// Creates, toggles and destroys visual objects
pub trait SceneSink {
    /// Instantiate `prototype` at `position`, rotated by `yaw_degrees` about
    /// the vertical axis
    fn instantiate(&mut self, prototype: &Prototype, position: WorldPos, yaw_degrees: u16) -> ObjectHandle;

    fn set_active(&mut self, handle: ObjectHandle, active: bool);

    fn destroy(&mut self, handle: ObjectHandle);
}

/// An object held by [`MemoryScene`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub handle: ObjectHandle,
    pub prototype: Prototype,
    pub position: WorldPos,
    pub yaw_degrees: u16,
    pub active: bool,
}

/// Scene that keeps objects in memory, for headless runs and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryScene {
    objects: HashMap<ObjectHandle, SceneObject>,
    next_handle: u64,
    created_total: u64,
}

impl MemoryScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, handle: ObjectHandle) -> Option<&SceneObject> {
        self.objects.get(&handle)
    }

    /// Live objects ordered by creation
    pub fn objects(&self) -> impl Iterator<Item = &SceneObject> {
        let mut live: Vec<&SceneObject> = self.objects.values().collect();
        live.sort_by_key(|o| o.handle);
        live.into_iter()
    }

    /// Objects not yet destroyed
    pub fn live_count(&self) -> usize {
        self.objects.len()
    }

    pub fn active_count(&self) -> usize {
        self.objects.values().filter(|o| o.active).count()
    }

    /// Live objects instantiated from the prototype called `name`
    pub fn count_named(&self, name: &str) -> usize {
        self.objects.values().filter(|o| o.prototype.name == name).count()
    }

    /// Objects ever instantiated, destroyed ones included
    pub fn created_total(&self) -> u64 {
        self.created_total
    }
}

impl SceneSink for MemoryScene {
    fn instantiate(&mut self, prototype: &Prototype, position: WorldPos, yaw_degrees: u16) -> ObjectHandle {
        let handle = ObjectHandle(self.next_handle);
        self.next_handle += 1;
        self.created_total += 1;
        self.objects.insert(
            handle,
            SceneObject {
                handle,
                prototype: prototype.clone(),
                position,
                yaw_degrees,
                active: true,
            },
        );
        handle
    }

    fn set_active(&mut self, handle: ObjectHandle, active: bool) {
        if let Some(obj) = self.objects.get_mut(&handle) {
            obj.active = active;
        }
    }

    fn destroy(&mut self, handle: ObjectHandle) {
        self.objects.remove(&handle);
    }
}
