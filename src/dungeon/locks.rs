//! Runtime open/closed state for gameplay doors.
//!
//! Doors start open. Entering a combat or boss room that still has live
//! enemies closes all of that room's doors; clearing the room reopens them.

use std::collections::BTreeMap;

use tracing::debug;

use super::types::{DoorData, GridPos};

#[derive(Debug, Clone)]
struct DoorState {
    position: GridPos,
    room_index: usize,
    is_open: bool,
}

#[derive(Debug, Clone, Default)]
pub struct DoorLocks {
    doors: BTreeMap<String, DoorState>,
    locked_room: Option<usize>,
}

impl DoorLocks {
    pub fn new(doors: &[DoorData]) -> Self {
        let doors = doors
            .iter()
            .map(|d| {
                (
                    d.id.clone(),
                    DoorState {
                        position: d.position(),
                        room_index: d.room_index,
                        is_open: true,
                    },
                )
            })
            .collect();
        Self {
            doors,
            locked_room: None,
        }
    }

    pub fn is_open(&self, door_id: &str) -> Option<bool> {
        self.doors.get(door_id).map(|d| d.is_open)
    }

    pub fn locked_room(&self) -> Option<usize> {
        self.locked_room
    }

    /// True if a closed door sits on the tile
    pub fn blocks(&self, x: i32, y: i32) -> bool {
        self.doors
            .values()
            .any(|d| !d.is_open && d.position == GridPos::new(x, y))
    }

    /// Door ids belonging to a room
    pub fn room_doors(&self, room_index: usize) -> Vec<&str> {
        self.doors
            .iter()
            .filter(|(_, d)| d.room_index == room_index)
            .map(|(id, _)| id.as_str())
            .collect()
    }

    /// Player stepped into a room. Returns the ids that were closed.
    pub fn enter_room(&mut self, room_index: usize, live_enemies: usize) -> Vec<String> {
        if live_enemies == 0 {
            return Vec::new();
        }
        let closed = self.set_room_doors(room_index, false);
        if !closed.is_empty() {
            self.locked_room = Some(room_index);
            debug!(room = room_index, doors = closed.len(), live_enemies, "room locked");
        }
        closed
    }

    /// Room has no live enemies left. Returns the ids that were reopened.
    pub fn clear_room(&mut self, room_index: usize) -> Vec<String> {
        let opened = self.set_room_doors(room_index, true);
        if self.locked_room == Some(room_index) {
            self.locked_room = None;
            debug!(room = room_index, doors = opened.len(), "room unlocked");
        }
        opened
    }

    fn set_room_doors(&mut self, room_index: usize, open: bool) -> Vec<String> {
        self.doors
            .iter_mut()
            .filter(|(_, d)| d.room_index == room_index && d.is_open != open)
            .map(|(id, d)| {
                d.is_open = open;
                id.clone()
            })
            .collect()
    }
}
