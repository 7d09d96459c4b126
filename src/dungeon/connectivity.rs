//! Reachability checks over the tile grid.

use std::collections::{BTreeSet, VecDeque};

use super::types::{Dungeon, GridPos, Room, Tile};

const NEIGHBOR_OFFSETS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Flood-fills walkable tiles (floor and door) from `start`.
///
/// Returns a `visited[y][x]` mask. A non-walkable start visits nothing.
pub fn flood_fill(tiles: &[Vec<Tile>], start: GridPos) -> Vec<Vec<bool>> {
    let height = tiles.len();
    let width = tiles.first().map_or(0, |row| row.len());
    let mut visited = vec![vec![false; width]; height];

    let walkable = |x: i32, y: i32| -> bool {
        x >= 0
            && y >= 0
            && (y as usize) < height
            && (x as usize) < width
            && tiles[y as usize][x as usize].is_walkable()
    };

    if !walkable(start.x, start.y) {
        return visited;
    }

    let mut queue = VecDeque::new();
    visited[start.y as usize][start.x as usize] = true;
    queue.push_back(start);

    while let Some(pos) = queue.pop_front() {
        for (dx, dy) in NEIGHBOR_OFFSETS {
            let (nx, ny) = (pos.x + dx, pos.y + dy);
            if walkable(nx, ny) && !visited[ny as usize][nx as usize] {
                visited[ny as usize][nx as usize] = true;
                queue.push_back(GridPos::new(nx, ny));
            }
        }
    }

    visited
}

/// Indices of rooms with at least one visited tile inside their rectangle.
pub fn rooms_touched(rooms: &[Room], visited: &[Vec<bool>]) -> BTreeSet<usize> {
    rooms
        .iter()
        .enumerate()
        .filter(|(_, room)| {
            (room.y..room.y + room.height).any(|y| {
                (room.x..room.x + room.width).any(|x| {
                    x >= 0
                        && y >= 0
                        && visited
                            .get(y as usize)
                            .and_then(|row| row.get(x as usize))
                            .copied()
                            .unwrap_or(false)
                })
            })
        })
        .map(|(i, _)| i)
        .collect()
}

/// Rooms reachable from the entrance room's center.
pub fn reachable_rooms_from(tiles: &[Vec<Tile>], rooms: &[Room]) -> BTreeSet<usize> {
    let Some(entrance) = rooms.first() else {
        return BTreeSet::new();
    };
    let visited = flood_fill(tiles, entrance.center());
    rooms_touched(rooms, &visited)
}

pub fn reachable_rooms(dungeon: &Dungeon) -> BTreeSet<usize> {
    reachable_rooms_from(&dungeon.tiles, &dungeon.rooms)
}

pub fn is_fully_connected(dungeon: &Dungeon) -> bool {
    reachable_rooms(dungeon).len() == dungeon.rooms.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::types::RoomType;

    fn grid(rows: &[&str]) -> Vec<Vec<Tile>> {
        rows.iter()
            .map(|row| {
                row.chars()
                    .map(|c| match c {
                        '.' => Tile::Floor,
                        '+' => Tile::Door,
                        _ => Tile::Wall,
                    })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_flood_fill_crosses_doors() {
        let tiles = grid(&["#####", "#.+.#", "#####"]);
        let visited = flood_fill(&tiles, GridPos::new(1, 1));
        assert!(visited[1][3]);
        assert!(!visited[0][0]);
    }

    #[test]
    fn test_flood_fill_from_wall_visits_nothing() {
        let tiles = grid(&["###", "#.#", "###"]);
        let visited = flood_fill(&tiles, GridPos::new(0, 0));
        assert!(visited.iter().flatten().all(|v| !v));
    }

    #[test]
    fn test_disconnected_room_not_reachable() {
        let tiles = grid(&[
            "##########",
            "#..#######",
            "#..####..#",
            "#######..#",
            "##########",
        ]);
        let rooms = vec![
            Room::new(1, 1, 2, 2, RoomType::Entrance),
            Room::new(7, 2, 2, 2, RoomType::Combat),
        ];
        let reachable = reachable_rooms_from(&tiles, &rooms);
        assert_eq!(reachable.into_iter().collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn test_corridor_connects_rooms() {
        let tiles = grid(&[
            "##########",
            "#..#######",
            "#........#",
            "#######..#",
            "##########",
        ]);
        let rooms = vec![
            Room::new(1, 1, 2, 2, RoomType::Entrance),
            Room::new(7, 2, 2, 2, RoomType::Combat),
        ];
        assert_eq!(reachable_rooms_from(&tiles, &rooms).len(), 2);
    }

    #[test]
    fn test_no_rooms_is_empty() {
        let tiles = grid(&["#"]);
        assert!(reachable_rooms_from(&tiles, &[]).is_empty());
    }
}
