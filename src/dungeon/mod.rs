//! Floor layout: generation, reachability, door locks and rendering.

pub mod connectivity;
pub mod generation;
pub mod locks;
pub mod map;
pub mod types;

pub use connectivity::{is_fully_connected, reachable_rooms};
pub use generation::{generate_floor, DungeonGenerator};
pub use locks::DoorLocks;
pub use types::*;
