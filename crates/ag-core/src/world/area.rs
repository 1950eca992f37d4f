//! One cell of the world grid and the dungeon layout it owns
//!
//! An Area moves through the states in [`super::lifecycle`]: its layout is
//! generated from the area seed, materialized into the scene when the player
//! comes near, hidden when they leave, and released when memory is needed.
//! Quest Areas are pinned and keep their layout across releases.

use std::sync::{Arc, Weak};

use bitflags::bitflags;

use super::lifecycle::{AreaState, Lifecycle, ReleaseOutcome};
use super::{AreaGroup, Biome, ObjectHandle, SceneSink, SpawnCommand, ThemeCatalog, TileSet, WorldMap, WorldPos};
use crate::CELL_SIZE;
use crate::dungeon::{GeneratedLayout, Room, RoomGenerator, TileCell, TileGrid};
use crate::error::{AreaError, ConfigError};
use crate::grid::{Direction, Point};
use crate::rng::GenRng;

bitflags! {
    /// Directions in which a neighboring Area exists
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Connections: u8 {
        const NORTH = 0x01;
        const EAST = 0x02;
        const SOUTH = 0x04;
        const WEST = 0x08;
    }
}

impl Connections {
    pub fn from_flags(north: bool, east: bool, south: bool, west: bool) -> Self {
        let mut c = Connections::empty();
        c.set(Connections::NORTH, north);
        c.set(Connections::EAST, east);
        c.set(Connections::SOUTH, south);
        c.set(Connections::WEST, west);
        c
    }

    pub const fn of(dir: Direction) -> Self {
        match dir {
            Direction::Up => Connections::NORTH,
            Direction::Right => Connections::EAST,
            Direction::Down => Connections::SOUTH,
            Direction::Left => Connections::WEST,
        }
    }

    pub fn has(self, dir: Direction) -> bool {
        self.contains(Connections::of(dir))
    }

    /// Connected directions in north, east, south, west order
    pub fn directions(self) -> impl Iterator<Item = Direction> {
        Direction::ALL.into_iter().filter(move |d| self.has(*d))
    }
}

/// A portal cell and the direction it leads
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Portal {
    pub cell: Point,
    pub facing: Direction,
}

#[derive(Debug, Clone)]
struct AreaLayout {
    tiles: TileGrid,
    rooms: Vec<Room>,
    corridors: Vec<Point>,
    portals: Vec<Portal>,
}

#[derive(Debug)]
pub struct Area {
    position: Point,
    connections: Connections,
    seed: u64,
    group: Option<Weak<AreaGroup>>,
    lifecycle: Lifecycle,
    layout: Option<AreaLayout>,
    /// Every materialized tile object, portals included
    tile_objects: Vec<ObjectHandle>,
    portal_handles: Vec<ObjectHandle>,
}

impl Area {
    pub fn new(position: Point, seed: u64, connections: Connections) -> Self {
        Self {
            position,
            connections,
            seed,
            group: None,
            lifecycle: Lifecycle::new(),
            layout: None,
            tile_objects: Vec::new(),
            portal_handles: Vec::new(),
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn connections(&self) -> Connections {
        self.connections
    }

    pub fn connection_count(&self) -> usize {
        self.connections.bits().count_ones() as usize
    }

    /// Attach this Area to `group`. The Area does not keep the group alive.
    pub fn set_group(&mut self, group: &Arc<AreaGroup>) {
        self.group = Some(Arc::downgrade(group));
    }

    pub fn group(&self) -> Option<Arc<AreaGroup>> {
        self.group.as_ref().and_then(Weak::upgrade)
    }

    pub fn biome(&self) -> Biome {
        self.group().map_or(Biome::NotAssigned, |g| g.biome())
    }

    pub fn state(&self) -> AreaState {
        self.lifecycle.state()
    }

    pub fn is_generated(&self) -> bool {
        self.lifecycle.is_generated()
    }

    pub fn is_created(&self) -> bool {
        self.lifecycle.is_created()
    }

    pub fn is_hidden(&self) -> bool {
        self.lifecycle.is_hidden()
    }

    pub fn is_quest_area(&self) -> bool {
        self.lifecycle.is_pinned()
    }

    pub fn tiles(&self) -> Option<&TileGrid> {
        self.layout.as_ref().map(|l| &l.tiles)
    }

    pub fn rooms(&self) -> &[Room] {
        self.layout.as_ref().map(|l| l.rooms.as_slice()).unwrap_or_default()
    }

    pub fn room_count(&self) -> usize {
        self.rooms().len()
    }

    pub fn corridors(&self) -> &[Point] {
        self.layout.as_ref().map(|l| l.corridors.as_slice()).unwrap_or_default()
    }

    pub fn portals(&self) -> &[Portal] {
        self.layout.as_ref().map(|l| l.portals.as_slice()).unwrap_or_default()
    }

    /// Handles of the materialized portal objects
    pub fn portal_handles(&self) -> &[ObjectHandle] {
        &self.portal_handles
    }

    /// Scene objects owned by this Area and its rooms
    pub fn object_count(&self) -> usize {
        self.tile_objects.len() + self.rooms().iter().map(|r| r.objects().len()).sum::<usize>()
    }

    /// Where a player entering without a portal is placed: the center of the
    /// first room, in world units
    pub fn default_spawn(&self) -> Option<Point> {
        self.rooms().first().map(|r| r.center() * CELL_SIZE)
    }

    /// Generate the layout from the area seed. No-op once generated.
    pub fn generate_area(&mut self, generator: &RoomGenerator) -> Result<(), AreaError> {
        if self.lifecycle.is_generated() {
            return Ok(());
        }
        let layout = generator.generate(self.seed)?;
        self.adopt_layout(layout)
    }

    /// Install a layout generated elsewhere, typically on a worker thread,
    /// and carve the portals. No-op once generated.
    pub fn adopt_layout(&mut self, layout: GeneratedLayout) -> Result<(), AreaError> {
        if self.lifecycle.is_generated() {
            return Ok(());
        }

        let GeneratedLayout {
            mut tiles,
            rooms,
            corridors,
            ..
        } = layout;
        let portals = setup_portals(self.position, self.connections, &rooms, &mut tiles)?;

        tracing::debug!(
            "area {} generated: {} rooms, {} portals",
            self.position,
            rooms.len(),
            portals.len()
        );

        self.layout = Some(AreaLayout {
            tiles,
            rooms,
            corridors,
            portals,
        });
        self.lifecycle.mark_generated();
        Ok(())
    }

    /// Materialize the Area in the scene, generating it first if needed.
    /// A hidden Area only has its existing objects reactivated, so that
    /// path needs neither the group nor a theme.
    pub fn show_area(
        &mut self,
        generator: &RoomGenerator,
        themes: &dyn ThemeCatalog,
        scene: &mut dyn SceneSink,
    ) -> Result<(), AreaError> {
        if self.lifecycle.state() == AreaState::Shown {
            return Ok(());
        }

        if self.lifecycle.is_hidden() {
            for handle in &self.tile_objects {
                scene.set_active(*handle, true);
            }
            if let Some(layout) = self.layout.as_mut() {
                for room in &mut layout.rooms {
                    room.reactivate_room(scene);
                }
            }
            self.lifecycle.mark_shown();
            tracing::debug!("area {} reshown", self.position);
            return Ok(());
        }

        let group = self.group().ok_or(ConfigError::MissingGroup {
            position: self.position,
        })?;
        let tile_set = themes.tile_set(group.biome())?;

        self.generate_area(generator)?;
        let Some(layout) = self.layout.as_mut() else {
            return Ok(());
        };

        for (cell, tile) in layout.tiles.iter() {
            let (prototype, yaw) = match tile {
                TileCell::Empty => continue,
                TileCell::Floor => (&tile_set.floor, 0),
                TileCell::BorderWall => (&tile_set.wall, 0),
                TileCell::Portal(facing) => (&tile_set.portal, facing.yaw_degrees()),
            };
            let handle = scene.instantiate(prototype, WorldPos::from_cell(cell, prototype.y_offset), yaw);
            if tile.portal_facing().is_some() {
                self.portal_handles.push(handle);
            }
            self.tile_objects.push(handle);
        }
        show_rooms(&mut layout.rooms, self.seed, tile_set, scene);
        self.lifecycle.mark_shown();

        tracing::debug!(
            "area {} shown with {} tile objects ({})",
            self.position,
            self.tile_objects.len(),
            tile_set.name
        );
        Ok(())
    }

    /// Deactivate the Area's objects, keeping them and the layout
    pub fn hide_area(&mut self, scene: &mut dyn SceneSink) {
        if self.lifecycle.state() != AreaState::Shown {
            return;
        }
        if let Some(layout) = self.layout.as_mut() {
            for room in &mut layout.rooms {
                room.hide_room(scene);
            }
        }
        for handle in &self.tile_objects {
            scene.set_active(*handle, false);
        }
        self.lifecycle.mark_hidden();
        tracing::debug!("area {} hidden", self.position);
    }

    /// Destroy the Area's scene objects and, unless pinned, drop its layout
    pub fn release_data(&mut self, scene: &mut dyn SceneSink) -> ReleaseOutcome {
        if !self.lifecycle.is_generated() {
            return ReleaseOutcome::Ignored;
        }

        for handle in self.tile_objects.drain(..) {
            scene.destroy(handle);
        }
        self.portal_handles.clear();
        if let Some(layout) = self.layout.as_mut() {
            for room in &mut layout.rooms {
                room.destroy_room(scene);
            }
        }

        let outcome = self.lifecycle.release();
        if outcome == ReleaseOutcome::Evicted {
            self.layout = None;
        }
        tracing::debug!("area {} released: {:?}", self.position, outcome);
        outcome
    }

    /// Areas in every connected direction that lies inside the map
    pub fn neighbors<'m, M: WorldMap + ?Sized>(&self, map: &'m M) -> Vec<&'m Area> {
        self.connections
            .directions()
            .filter_map(|dir| {
                let p = self.position.step(dir);
                if !map.within_bounds(p) {
                    tracing::warn!("area {} has a {} connection leaving the map", self.position, dir);
                    return None;
                }
                map.area(p)
            })
            .collect()
    }

    /// Pin the Area and give one random room the quest payload, using
    /// process entropy for the room choice
    pub fn execute_spawn_command(
        &mut self,
        command: &SpawnCommand,
        generator: &RoomGenerator,
    ) -> Result<usize, AreaError> {
        self.execute_spawn_command_with(command, generator, &mut GenRng::from_entropy())
    }

    /// Pin the Area and give the room drawn from `rng` the quest payload.
    /// Returns the chosen room's index.
    pub fn execute_spawn_command_with(
        &mut self,
        command: &SpawnCommand,
        generator: &RoomGenerator,
        rng: &mut GenRng,
    ) -> Result<usize, AreaError> {
        self.generate_area(generator)?;

        let position = self.position;
        let layout = self
            .layout
            .as_mut()
            .filter(|l| !l.rooms.is_empty())
            .ok_or(ConfigError::NoRooms { position })?;

        let idx = rng.index(layout.rooms.len());
        self.lifecycle.pin();
        if !layout.rooms[idx].generate_quest_material(command) {
            tracing::warn!(
                "area {} room {} already holds quest material, {} x{} dropped",
                position,
                idx,
                command.object_to_spawn().name,
                command.quantity()
            );
        }
        Ok(idx)
    }
}

fn show_rooms(rooms: &mut [Room], seed: u64, tile_set: &TileSet, scene: &mut dyn SceneSink) {
    let mut rng = GenRng::new(seed);
    for room in rooms {
        room.show_room(&mut rng, tile_set, scene);
    }
}

/// The room furthest in `dir`. Ties go to the earliest room.
fn extremal_room(rooms: &[Room], dir: Direction) -> Option<&Room> {
    let reach = |r: &Room| match dir {
        Direction::Up => r.top_right().y,
        Direction::Right => r.top_right().x,
        Direction::Down => -r.bot_left().y,
        Direction::Left => -r.bot_left().x,
    };

    let mut best: Option<&Room> = None;
    for room in rooms {
        if best.is_none_or(|b| reach(room) > reach(b)) {
            best = Some(room);
        }
    }
    best
}

fn setup_portals(
    position: Point,
    connections: Connections,
    rooms: &[Room],
    tiles: &mut TileGrid,
) -> Result<Vec<Portal>, AreaError> {
    let mut portals = Vec::new();
    for dir in connections.directions() {
        let room = extremal_room(rooms, dir).ok_or(ConfigError::NoRooms { position })?;
        let cell = room.create_portal(dir, tiles)?;
        portals.push(Portal { cell, facing: dir });
    }
    Ok(portals)
}
