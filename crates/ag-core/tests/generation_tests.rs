use std::collections::VecDeque;

use ag_core::dungeon::{GeneratedLayout, Room, RoomGenerator, TileCell, TileGrid};
use ag_core::{GeneratorConfig, Point};
use proptest::prelude::*;

fn generator() -> RoomGenerator {
    RoomGenerator::new(GeneratorConfig::default()).unwrap()
}

/// Walkable cells reachable from `start` over 4-way steps
fn reachable(tiles: &TileGrid, start: Point) -> Vec<Vec<bool>> {
    let mut seen = vec![vec![false; tiles.height()]; tiles.width()];
    let mut queue = VecDeque::from([start]);
    while let Some(p) = queue.pop_front() {
        if !tiles.get_or_empty(p).is_walkable() || seen[p.x as usize][p.y as usize] {
            continue;
        }
        seen[p.x as usize][p.y as usize] = true;
        queue.extend([p.up(), p.down(), p.left(), p.right()]);
    }
    seen
}

fn assert_connected(layout: &GeneratedLayout) {
    let seen = reachable(&layout.tiles, layout.rooms[0].center());
    for room in &layout.rooms {
        for cell in room.cells() {
            assert!(seen[cell.x as usize][cell.y as usize], "room cell {} unreachable", cell);
        }
    }
    for cell in &layout.corridors {
        assert!(seen[cell.x as usize][cell.y as usize], "corridor cell {} unreachable", cell);
    }
}

fn assert_walled(tiles: &TileGrid) {
    for (p, cell) in tiles.iter() {
        if !cell.is_floor() {
            continue;
        }
        for dx in -1..=1 {
            for dy in -1..=1 {
                let n = p + Point::new(dx, dy);
                assert!(
                    tiles.in_bounds(n) && !tiles.get_or_empty(n).is_empty(),
                    "floor {} is open to {}",
                    p,
                    n
                );
            }
        }
    }
}

#[test]
fn test_room_examples() {
    let a = Room::new(Point::new(0, 0), Point::new(4, 4));
    assert_eq!(a.center(), Point::new(2, 2));

    let b = Room::new(Point::new(0, 0), Point::new(3, 3));
    let c = Room::new(Point::new(4, 4), Point::new(6, 6));
    assert!(!b.intersects(&c));

    let d = Room::new(Point::new(4, 0), Point::new(8, 4));
    assert!(a.intersects(&d));
    assert!(d.intersects(&a));
}

#[test]
fn test_layout_cells_are_consistent() {
    let layout = generator().generate(42).unwrap();
    assert!(layout.room_count() >= 1);
    assert_eq!(layout.seed, 42);

    let floors = layout.tiles.count(TileCell::is_floor);
    let room_cells: usize = layout.rooms.iter().map(Room::area).sum();
    assert_eq!(floors, room_cells + layout.corridors.len());
    assert_eq!(layout.tiles.count(|c| c.portal_facing().is_some()), 0);
}

#[test]
fn test_small_config() {
    let config = GeneratorConfig {
        width: 12,
        height: 12,
        min_rooms: 1,
        target_rooms: 3,
        room_min_size: 2,
        room_max_size: 4,
        ..Default::default()
    };
    let layout = RoomGenerator::new(config).unwrap().generate(5).unwrap();
    assert_connected(&layout);
    assert_walled(&layout.tiles);
}

#[test]
fn test_layout_serializes() {
    let layout = generator().generate(77).unwrap();
    let json = serde_json::to_string(&layout).unwrap();
    let back: GeneratedLayout = serde_json::from_str(&json).unwrap();
    assert_eq!(back, layout);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_generation_is_deterministic(seed in any::<u64>()) {
        let g = generator();
        prop_assert_eq!(g.generate(seed).unwrap(), g.generate(seed).unwrap());
    }

    #[test]
    fn prop_rooms_never_overlap(seed in any::<u64>()) {
        let layout = generator().generate(seed).unwrap();
        prop_assert!(layout.room_count() >= 1);
        for (i, a) in layout.rooms.iter().enumerate() {
            for b in &layout.rooms[i + 1..] {
                prop_assert!(!a.intersects(b));
            }
        }
    }

    #[test]
    fn prop_rooms_are_connected(seed in any::<u64>()) {
        assert_connected(&generator().generate(seed).unwrap());
    }

    #[test]
    fn prop_floor_is_enclosed(seed in any::<u64>()) {
        assert_walled(&generator().generate(seed).unwrap().tiles);
    }

    #[test]
    fn prop_custom_sizes_stay_in_bounds(
        seed in any::<u64>(),
        width in 10usize..60,
        height in 10usize..60,
        target in 1usize..12,
    ) {
        let config = GeneratorConfig {
            width,
            height,
            min_rooms: 1,
            target_rooms: target,
            room_min_size: 2,
            room_max_size: 6,
            ..Default::default()
        };
        let layout = RoomGenerator::new(config).unwrap().generate(seed).unwrap();
        prop_assert!(layout.room_count() >= 1 && layout.room_count() <= target);
        assert_connected(&layout);
        assert_walled(&layout.tiles);
    }
}
