//! Rectangular rooms inside an Area's tile grid
//!
//! A room's bounds are fixed at generation. What it owns in the scene
//! (decoration and quest objects) comes and goes with show/hide/destroy.

use serde::{Deserialize, Serialize};

use super::{TileCell, TileGrid};
use crate::error::{AreaError, ConfigError};
use crate::grid::{Direction, Point};
use crate::rng::GenRng;
use crate::world::{ObjectHandle, Prototype, SceneSink, SpawnCommand, TileSet, WorldPos};
use crate::{DECORATION_VARIANTS, PORTAL_JITTER_SEED};

/// Scene residency of a room's content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RoomState {
    /// No content has been created
    #[default]
    Unpopulated,
    Shown,
    /// Content exists but is deactivated
    Hidden,
}

/// Quest material a room must spawn whenever it is populated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestPayload {
    pub prototype: Prototype,
    pub quantity: u32,
}

/// Room with inclusive bounds `bot_left..=top_right`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    bot_left: Point,
    top_right: Point,
    #[serde(skip)]
    state: RoomState,
    #[serde(skip)]
    objects: Vec<ObjectHandle>,
    quest: Option<QuestPayload>,
}

impl Room {
    /// Create a room spanning two opposite corners
    pub fn new(a: Point, b: Point) -> Self {
        Self {
            bot_left: Point::new(a.x.min(b.x), a.y.min(b.y)),
            top_right: Point::new(a.x.max(b.x), a.y.max(b.y)),
            state: RoomState::Unpopulated,
            objects: Vec::new(),
            quest: None,
        }
    }

    pub fn bot_left(&self) -> Point {
        self.bot_left
    }

    pub fn top_right(&self) -> Point {
        self.top_right
    }

    /// Size along x
    pub fn length(&self) -> i32 {
        self.top_right.x - self.bot_left.x + 1
    }

    /// Size along y
    pub fn height(&self) -> i32 {
        self.top_right.y - self.bot_left.y + 1
    }

    /// Center cell, rounding toward the bottom-left corner
    pub fn center(&self) -> Point {
        let diff = self.top_right - self.bot_left;
        self.bot_left + Point::new(diff.x / 2, diff.y / 2)
    }

    pub fn area(&self) -> usize {
        (self.length() * self.height()) as usize
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.bot_left.x
            && p.x <= self.top_right.x
            && p.y >= self.bot_left.y
            && p.y <= self.top_right.y
    }

    /// True unless the rooms are separated on some axis. Bounds are closed,
    /// so rooms sharing an edge cell intersect.
    pub fn intersects(&self, other: &Room) -> bool {
        !(self.bot_left.x > other.top_right.x
            || self.top_right.x < other.bot_left.x
            || self.bot_left.y > other.top_right.y
            || self.top_right.y < other.bot_left.y)
    }

    /// Copy of this room grown by `margin` cells on every side
    pub fn expanded(&self, margin: i32) -> Room {
        Room::new(
            self.bot_left - Point::new(margin, margin),
            self.top_right + Point::new(margin, margin),
        )
    }

    /// Every cell of the room, x-major
    pub fn cells(&self) -> impl Iterator<Item = Point> + '_ {
        (self.bot_left.x..=self.top_right.x)
            .flat_map(move |x| (self.bot_left.y..=self.top_right.y).map(move |y| Point::new(x, y)))
    }

    /// Uniformly random cell of the room
    pub fn random_cell(&self, rng: &mut GenRng) -> Point {
        Point::new(
            rng.range_inclusive(self.bot_left.x, self.top_right.x),
            rng.range_inclusive(self.bot_left.y, self.top_right.y),
        )
    }

    /// Carve a portal in the wall row just outside the edge facing `dir`.
    ///
    /// The cell sits near the edge midpoint, shifted by a jitter drawn from a
    /// fixed-seed rng so placement never depends on the Area seed.
    pub fn create_portal(&self, dir: Direction, tiles: &mut TileGrid) -> Result<Point, AreaError> {
        let mut rng = GenRng::new(PORTAL_JITTER_SEED);
        let jitter = rng.range_inclusive(-1, 0);

        let bl = self.bot_left;
        let tr = self.top_right;
        let along_x = |x: i32| x.clamp(bl.x, tr.x);
        let along_y = |y: i32| y.clamp(bl.y, tr.y);

        let cell = match dir {
            Direction::Up => Point::new(along_x(tr.x - (self.length() / 2 + jitter)), tr.y + 1),
            Direction::Left => Point::new(bl.x - 1, along_y(tr.y - (self.height() / 2 + jitter))),
            Direction::Down => Point::new(along_x(bl.x + (self.length() / 2 + jitter)), bl.y - 1),
            Direction::Right => Point::new(tr.x + 1, along_y(bl.y + (self.height() / 2 + jitter))),
        };

        tiles
            .set(cell, TileCell::Portal(dir))
            .map_err(|_| ConfigError::PortalOutOfBounds { direction: dir, cell })?;
        Ok(cell)
    }

    /// Record quest material for this room. Returns false, leaving the
    /// existing payload untouched, if the room already carries one.
    pub fn generate_quest_material(&mut self, command: &SpawnCommand) -> bool {
        if self.quest.is_some() {
            return false;
        }
        self.quest = Some(QuestPayload {
            prototype: command.object_to_spawn().clone(),
            quantity: command.quantity(),
        });
        true
    }

    pub fn is_quest_room(&self) -> bool {
        self.quest.is_some()
    }

    pub fn quest(&self) -> Option<&QuestPayload> {
        self.quest.as_ref()
    }

    pub fn state(&self) -> RoomState {
        self.state
    }

    /// Scene objects currently owned by this room
    pub fn objects(&self) -> &[ObjectHandle] {
        &self.objects
    }

    /// Populate the room if it has no content, otherwise reactivate it.
    ///
    /// Population draws a decoration variant and prop positions from `rng`,
    /// then places the quest objects, if any, at uniformly drawn cells.
    pub fn show_room(&mut self, rng: &mut GenRng, tile_set: &TileSet, scene: &mut dyn SceneSink) {
        match self.state {
            RoomState::Unpopulated => {
                let variant = rng.index(DECORATION_VARIANTS);
                let mut spawned = Vec::new();

                for _ in 0..variant {
                    if let Some(prop) = rng.pick(&tile_set.decor) {
                        let cell = self.random_cell(rng);
                        spawned.push(scene.instantiate(prop, WorldPos::from_cell(cell, prop.y_offset), 0));
                    }
                }

                if let Some(quest) = &self.quest {
                    for _ in 0..quest.quantity {
                        let cell = self.random_cell(rng);
                        let pos = WorldPos::from_cell(cell, quest.prototype.y_offset);
                        spawned.push(scene.instantiate(&quest.prototype, pos, 0));
                    }
                }

                tracing::trace!(
                    "room {}..{} populated with {} objects (variant {})",
                    self.bot_left,
                    self.top_right,
                    spawned.len(),
                    variant
                );
                self.objects = spawned;
                self.state = RoomState::Shown;
            }
            RoomState::Hidden => self.reactivate_room(scene),
            RoomState::Shown => {}
        }
    }

    /// Reactivate hidden content. Needs no theme, since nothing is created.
    pub fn reactivate_room(&mut self, scene: &mut dyn SceneSink) {
        if self.state == RoomState::Hidden {
            for handle in &self.objects {
                scene.set_active(*handle, true);
            }
            self.state = RoomState::Shown;
        }
    }

    /// Deactivate the room's content
    pub fn hide_room(&mut self, scene: &mut dyn SceneSink) {
        if self.state == RoomState::Shown {
            for handle in &self.objects {
                scene.set_active(*handle, false);
            }
            self.state = RoomState::Hidden;
        }
    }

    /// Release the room's content. Quest payload and bounds are kept.
    pub fn destroy_room(&mut self, scene: &mut dyn SceneSink) {
        if self.state != RoomState::Unpopulated {
            for handle in self.objects.drain(..) {
                scene.destroy(handle);
            }
            self.state = RoomState::Unpopulated;
        }
    }
}
