//! Dungeon layout data structures.
//!
//! Everything here is plain data produced by `DungeonGenerator`; nothing
//! mutates a `Dungeon` after generation.

use serde::{Deserialize, Serialize};

use crate::core::constants::{TILE_DOOR, TILE_FLOOR, TILE_WALL};

/// A single cell of the tile grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    Floor,
    Wall,
    Door,
}

impl Tile {
    /// Numeric tile code (FLOOR=0, WALL=1, DOOR=2)
    pub fn code(&self) -> u8 {
        match self {
            Tile::Floor => TILE_FLOOR,
            Tile::Wall => TILE_WALL,
            Tile::Door => TILE_DOOR,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            TILE_FLOOR => Some(Tile::Floor),
            TILE_WALL => Some(Tile::Wall),
            TILE_DOOR => Some(Tile::Door),
            _ => None,
        }
    }

    pub fn is_walkable(&self) -> bool {
        matches!(self, Tile::Floor | Tile::Door)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomType {
    /// Player start, always room 0, never holds enemies
    Entrance,
    Combat,
    Treasure,
    Puzzle,
    Shop,
    /// Exactly one per floor, holds the stairwell
    Boss,
}

impl RoomType {
    /// Map glyph used by the ASCII renderer
    pub fn icon(&self) -> char {
        match self {
            RoomType::Entrance => 'E',
            RoomType::Combat => 'C',
            RoomType::Treasure => 'T',
            RoomType::Puzzle => 'P',
            RoomType::Shop => 'S',
            RoomType::Boss => 'B',
        }
    }

    /// Rooms whose entrances get gameplay doors
    pub fn is_guarded(&self) -> bool {
        matches!(self, RoomType::Combat | RoomType::Boss)
    }
}

/// A tile coordinate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn manhattan(&self, other: GridPos) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

/// Axis-aligned room rectangle in tile coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub room_type: RoomType,
}

impl Room {
    pub fn new(x: i32, y: i32, width: i32, height: i32, room_type: RoomType) -> Self {
        Self {
            x,
            y,
            width,
            height,
            room_type,
        }
    }

    pub fn center_x(&self) -> i32 {
        self.x + self.width / 2
    }

    pub fn center_y(&self) -> i32 {
        self.y + self.height / 2
    }

    pub fn center(&self) -> GridPos {
        GridPos::new(self.center_x(), self.center_y())
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    /// Manhattan distance between room centers
    pub fn center_distance(&self, other: &Room) -> i32 {
        self.center().manhattan(other.center())
    }

    /// True if `other` intersects this room grown by `buffer` tiles on every side
    pub fn overlaps(&self, other: &Room, buffer: i32) -> bool {
        self.x - buffer < other.x + other.width
            && self.x + self.width + buffer > other.x
            && self.y - buffer < other.y + other.height
            && self.y + self.height + buffer > other.y
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DoorOrientation {
    /// On a top or bottom room edge
    Horizontal,
    /// On a left or right room edge
    Vertical,
}

/// A gameplay door at a corridor junction of a combat or boss room.
///
/// Open/closed state is not part of this record; see `dungeon::locks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoorData {
    pub id: String,
    pub grid_x: i32,
    pub grid_y: i32,
    pub orientation: DoorOrientation,
    pub room_index: usize,
}

impl DoorData {
    pub fn position(&self) -> GridPos {
        GridPos::new(self.grid_x, self.grid_y)
    }
}

/// One generated floor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dungeon {
    pub floor: u32,
    pub width: i32,
    pub height: i32,
    /// Room 0 is the entrance
    pub rooms: Vec<Room>,
    /// Indexed `tiles[y][x]`
    pub tiles: Vec<Vec<Tile>>,
    pub player_start: GridPos,
    /// Index into `rooms`
    pub boss_room: Option<usize>,
    pub stairwell_position: Option<GridPos>,
    pub doors: Vec<DoorData>,
    /// Layout attempts used (1..=MAX_GENERATION_ATTEMPTS)
    pub generation_attempts: u32,
    /// False when every attempt left some room unreachable and the last
    /// layout was kept anyway
    pub fully_connected: bool,
}

impl Dungeon {
    pub fn tile_at(&self, x: i32, y: i32) -> Option<Tile> {
        if x < 0 || y < 0 {
            return None;
        }
        self.tiles
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
            .copied()
    }

    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.tile_at(x, y).is_some_and(|t| t.is_walkable())
    }

    pub fn entrance(&self) -> Option<&Room> {
        self.rooms.first()
    }

    pub fn boss(&self) -> Option<&Room> {
        self.boss_room.and_then(|i| self.rooms.get(i))
    }

    /// Indices of rooms of the given type
    pub fn rooms_of_type(&self, room_type: RoomType) -> Vec<usize> {
        self.rooms
            .iter()
            .enumerate()
            .filter(|(_, r)| r.room_type == room_type)
            .map(|(i, _)| i)
            .collect()
    }

    /// Index of the room containing the tile, if any
    pub fn room_at(&self, x: i32, y: i32) -> Option<usize> {
        self.rooms.iter().position(|r| r.contains(x, y))
    }

    pub fn doors_for_room(&self, room_index: usize) -> impl Iterator<Item = &DoorData> {
        self.doors.iter().filter(move |d| d.room_index == room_index)
    }

    /// Distance from the entrance center to the boss room center
    pub fn boss_distance(&self) -> Option<i32> {
        match (self.entrance(), self.boss()) {
            (Some(entrance), Some(boss)) => Some(entrance.center_distance(boss)),
            _ => None,
        }
    }
}
