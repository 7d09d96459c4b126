//! Procedural floor generation.
//!
//! A floor is built in passes: rejection-sampled rooms, distance-biased boss
//! selection, room carving, a linear chain of L-shaped corridors, the outer
//! wall frame, gameplay door detection and the decorative door stamp. The
//! whole layout is rebuilt until every room is reachable from the entrance,
//! up to `MAX_GENERATION_ATTEMPTS` times; after that the last layout is
//! returned as-is.

use std::collections::HashSet;

use rand::Rng;
use tracing::{debug, info, warn};

use super::connectivity::reachable_rooms_from;
use super::types::{DoorData, DoorOrientation, Dungeon, GridPos, Room, RoomType, Tile};
use crate::core::config::RoomConfig;
use crate::core::constants::*;

/// Builds floors from a [`RoomConfig`]
#[derive(Debug, Clone, Default)]
pub struct DungeonGenerator {
    config: RoomConfig,
}

/// Generates a floor with the default config and a thread-local RNG.
pub fn generate_floor(floor: u32) -> Dungeon {
    DungeonGenerator::default().generate(floor, &mut rand::thread_rng())
}

impl DungeonGenerator {
    pub fn new(config: RoomConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RoomConfig {
        &self.config
    }

    /// Target room count: `min(base + floor(floor * per_floor), max)`
    pub fn room_count(&self, floor: u32) -> usize {
        let extra = (floor as f64 * self.config.rooms_per_floor).floor() as u32;
        self.config
            .base_rooms
            .saturating_add(extra)
            .min(self.config.max_rooms) as usize
    }

    /// Grid `(width, height)` for a floor, capped at `GRID_MAX_SIZING_FLOOR`
    pub fn grid_dimensions(&self, floor: u32) -> (i32, i32) {
        let depth = floor.min(GRID_MAX_SIZING_FLOOR) as f64;
        let width = GRID_BASE_WIDTH.saturating_add((depth * GRID_WIDTH_PER_FLOOR).floor() as i32);
        let height =
            GRID_BASE_HEIGHT.saturating_add((depth * GRID_HEIGHT_PER_FLOOR).floor() as i32);
        (width, height)
    }

    /// Generates a floor. Never fails; a floor that stays disconnected after
    /// every attempt comes back with `fully_connected == false`.
    pub fn generate(&self, floor: u32, rng: &mut impl Rng) -> Dungeon {
        let floor = floor.max(1);
        let mut attempt = 1;
        let mut dungeon = self.build_layout(floor, rng);

        loop {
            let reachable = reachable_rooms_from(&dungeon.tiles, &dungeon.rooms).len();
            let connected = reachable == dungeon.rooms.len() && dungeon.boss_room.is_some();

            if connected {
                dungeon.fully_connected = true;
                break;
            }

            debug!(
                floor,
                attempt,
                reachable,
                rooms = dungeon.rooms.len(),
                "layout rejected"
            );

            if attempt >= MAX_GENERATION_ATTEMPTS {
                warn!(
                    floor,
                    attempts = attempt,
                    reachable,
                    rooms = dungeon.rooms.len(),
                    "no fully connected layout found, keeping last attempt"
                );
                break;
            }

            attempt += 1;
            dungeon = self.build_layout(floor, rng);
        }

        dungeon.generation_attempts = attempt;
        debug!(
            floor,
            attempts = attempt,
            rooms = dungeon.rooms.len(),
            doors = dungeon.doors.len(),
            "floor generated"
        );
        dungeon
    }

    /// One full layout pass, without connectivity validation
    fn build_layout(&self, floor: u32, rng: &mut impl Rng) -> Dungeon {
        let (width, height) = self.grid_dimensions(floor);
        let target_rooms = self.room_count(floor);

        let mut tiles = vec![vec![Tile::Wall; width as usize]; height as usize];
        let mut rooms = self.place_rooms(width, height, target_rooms, rng);
        let boss_room = assign_boss_room(&mut rooms, rng);

        for room in &rooms {
            carve_room(&mut tiles, room);
        }
        connect_rooms(&mut tiles, &rooms);
        enforce_border(&mut tiles);

        let doors = find_room_doors(&tiles, &rooms);
        stamp_visual_doors(&mut tiles, &rooms, rng);

        let player_start = rooms.first().map(Room::center).unwrap_or_default();
        let stairwell_position = boss_room.map(|i| rooms[i].center());

        Dungeon {
            floor,
            width,
            height,
            rooms,
            tiles,
            player_start,
            boss_room,
            stairwell_position,
            doors,
            generation_attempts: 1,
            fully_connected: false,
        }
    }

    /// Rejection-samples up to `target` non-overlapping rooms inside the
    /// border-safe area. Rooms that fail every attempt are skipped.
    fn place_rooms(&self, width: i32, height: i32, target: usize, rng: &mut impl Rng) -> Vec<Room> {
        let min_size = self.config.min_room_size;
        let max_size = self.config.max_room_size.max(min_size + 1);
        let mut rooms: Vec<Room> = Vec::with_capacity(target);

        for _ in 0..target {
            for _ in 0..ROOM_PLACEMENT_ATTEMPTS {
                let room_width = rng.gen_range(min_size..max_size);
                let room_height = rng.gen_range(min_size..max_size);

                let max_x = width - BORDER_THICKNESS - room_width;
                let max_y = height - BORDER_THICKNESS - room_height;
                if max_x < BORDER_THICKNESS || max_y < BORDER_THICKNESS {
                    continue;
                }

                let x = rng.gen_range(BORDER_THICKNESS..=max_x);
                let y = rng.gen_range(BORDER_THICKNESS..=max_y);

                let room_type = if rooms.is_empty() {
                    RoomType::Entrance
                } else {
                    roll_room_type(rng)
                };
                let candidate = Room::new(x, y, room_width, room_height, room_type);

                if !rooms
                    .iter()
                    .any(|r| candidate.overlaps(r, ROOM_OVERLAP_BUFFER))
                {
                    rooms.push(candidate);
                    break;
                }
            }
        }

        rooms
    }
}

/// Weighted type draw for every room after the entrance
fn roll_room_type(rng: &mut impl Rng) -> RoomType {
    let roll: f64 = rng.gen();
    if roll < ROOM_TYPE_COMBAT_THRESHOLD {
        RoomType::Combat
    } else if roll < ROOM_TYPE_TREASURE_THRESHOLD {
        RoomType::Treasure
    } else {
        RoomType::Shop
    }
}

#[derive(Debug, Clone, Copy)]
struct BossCandidate {
    index: usize,
    distance: i32,
    is_combat: bool,
}

/// Orders boss candidates farthest-first, letting a non-combat room jump
/// ahead of combat rooms at most `BOSS_NEAR_TIE_DISTANCE` farther.
fn order_boss_candidates(candidates: &mut [BossCandidate]) {
    candidates.sort_by(|a, b| b.distance.cmp(&a.distance));

    for i in 1..candidates.len() {
        let mut j = i;
        while j > 0 {
            let (ahead, behind) = (candidates[j - 1], candidates[j]);
            let near_tie = ahead.distance - behind.distance <= BOSS_NEAR_TIE_DISTANCE;
            if near_tie && ahead.is_combat && !behind.is_combat {
                candidates.swap(j - 1, j);
                j -= 1;
            } else {
                break;
            }
        }
    }
}

/// Converts one non-entrance room into the boss room and returns its index.
///
/// Walks the ordered candidates (skipping the closest) and converts position
/// `i` with probability `0.9^i`; if nothing converts, the second-farthest
/// candidate is forced.
pub(crate) fn assign_boss_room(rooms: &mut [Room], rng: &mut impl Rng) -> Option<usize> {
    if rooms.len() < 2 {
        warn!(rooms = rooms.len(), "not enough rooms to place a boss away from the entrance");
        return None;
    }

    let entrance = rooms[0].center();
    let mut candidates: Vec<BossCandidate> = rooms
        .iter()
        .enumerate()
        .skip(1)
        .map(|(index, room)| BossCandidate {
            index,
            distance: room.center().manhattan(entrance),
            is_combat: room.room_type == RoomType::Combat,
        })
        .collect();
    order_boss_candidates(&mut candidates);

    let eligible = candidates.len() - 1;
    for (position, candidate) in candidates.iter().take(eligible).enumerate() {
        let probability = BOSS_PLACEMENT_DECAY.powi(position as i32);
        if rng.gen::<f64>() < probability {
            let previous = rooms[candidate.index].room_type;
            rooms[candidate.index].room_type = RoomType::Boss;
            info!(
                room = candidate.index,
                was = ?previous,
                distance = candidate.distance,
                probability,
                "boss room placed"
            );
            return Some(candidate.index);
        }
    }

    let forced = candidates[1.min(candidates.len() - 1)];
    let previous = rooms[forced.index].room_type;
    rooms[forced.index].room_type = RoomType::Boss;
    info!(
        room = forced.index,
        was = ?previous,
        distance = forced.distance,
        "boss room force-placed in second-farthest room"
    );
    Some(forced.index)
}

fn set_tile(tiles: &mut [Vec<Tile>], x: i32, y: i32, tile: Tile) {
    if x < 0 || y < 0 {
        return;
    }
    if let Some(cell) = tiles
        .get_mut(y as usize)
        .and_then(|row| row.get_mut(x as usize))
    {
        *cell = tile;
    }
}

fn get_tile(tiles: &[Vec<Tile>], x: i32, y: i32) -> Option<Tile> {
    if x < 0 || y < 0 {
        return None;
    }
    tiles
        .get(y as usize)
        .and_then(|row| row.get(x as usize))
        .copied()
}

fn carve_room(tiles: &mut [Vec<Tile>], room: &Room) {
    for y in room.y..room.y + room.height {
        for x in room.x..room.x + room.width {
            set_tile(tiles, x, y, Tile::Floor);
        }
    }
}

/// Chains room `i - 1` to room `i` for every `i`
fn connect_rooms(tiles: &mut [Vec<Tile>], rooms: &[Room]) {
    for pair in rooms.windows(2) {
        carve_corridor(tiles, pair[0].center(), pair[1].center());
    }
}

/// L-shaped corridor: horizontal leg along `from.y`, then vertical along `to.x`
fn carve_corridor(tiles: &mut [Vec<Tile>], from: GridPos, to: GridPos) {
    let (mut x, mut y) = (from.x, from.y);

    while x != to.x {
        set_tile(tiles, x, y, Tile::Floor);
        x += if x < to.x { 1 } else { -1 };
    }

    while y != to.y {
        set_tile(tiles, x, y, Tile::Floor);
        y += if y < to.y { 1 } else { -1 };
    }
}

/// Forces a `BORDER_THICKNESS`-wide wall frame around the grid
fn enforce_border(tiles: &mut [Vec<Tile>]) {
    let height = tiles.len() as i32;
    for (y, row) in tiles.iter_mut().enumerate() {
        let width = row.len() as i32;
        for (x, cell) in row.iter_mut().enumerate() {
            let (x, y) = (x as i32, y as i32);
            if x < BORDER_THICKNESS
                || y < BORDER_THICKNESS
                || x >= width - BORDER_THICKNESS
                || y >= height - BORDER_THICKNESS
            {
                *cell = Tile::Wall;
            }
        }
    }
}

/// Perimeter tiles of combat and boss rooms that open onto a corridor.
fn find_room_doors(tiles: &[Vec<Tile>], rooms: &[Room]) -> Vec<DoorData> {
    let mut doors = Vec::new();

    for (room_index, room) in rooms.iter().enumerate() {
        if !room.room_type.is_guarded() {
            continue;
        }

        let left = room.x;
        let right = room.x + room.width - 1;
        let top = room.y;
        let bottom = room.y + room.height - 1;

        // (x, y, outward dx, outward dy, orientation); top, bottom, left, right
        let mut edges: Vec<(i32, i32, i32, i32, DoorOrientation)> = Vec::new();
        for x in left..=right {
            edges.push((x, top, 0, -1, DoorOrientation::Horizontal));
        }
        for x in left..=right {
            edges.push((x, bottom, 0, 1, DoorOrientation::Horizontal));
        }
        for y in top..=bottom {
            edges.push((left, y, -1, 0, DoorOrientation::Vertical));
        }
        for y in top..=bottom {
            edges.push((right, y, 1, 0, DoorOrientation::Vertical));
        }

        let mut seen: HashSet<(i32, i32)> = HashSet::new();
        for (x, y, dx, dy, orientation) in edges {
            let is_junction = get_tile(tiles, x, y) == Some(Tile::Floor)
                && get_tile(tiles, x + dx, y + dy) == Some(Tile::Floor);
            if is_junction && seen.insert((x, y)) {
                doors.push(DoorData {
                    id: format!("door-{}-{}-{}", room_index, x, y),
                    grid_x: x,
                    grid_y: y,
                    orientation,
                    room_index,
                });
            }
        }
    }

    doors
}

/// Stamps one decorative door tile per room at the midpoint of a random side.
///
/// Independent of the gameplay door list; the two need not coincide.
fn stamp_visual_doors(tiles: &mut [Vec<Tile>], rooms: &[Room], rng: &mut impl Rng) {
    for room in rooms {
        let (x, y) = match rng.gen_range(0..4) {
            0 => (room.x + room.width / 2, room.y),
            1 => (room.x + room.width - 1, room.y + room.height / 2),
            2 => (room.x + room.width / 2, room.y + room.height - 1),
            _ => (room.x, room.y + room.height / 2),
        };
        set_tile(tiles, x, y, Tile::Door);
    }
}
