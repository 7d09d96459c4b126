//! Plain-text rendering of a floor.

use super::types::{DoorOrientation, Dungeon, Tile};

/// Renders the tile grid, one line per row.
///
/// `#` wall, `.` floor, `+` stamped door tile, `|`/`-` gameplay door,
/// room-type glyph at each room center, `@` player start.
pub fn render_ascii(dungeon: &Dungeon) -> String {
    let mut grid: Vec<Vec<char>> = dungeon
        .tiles
        .iter()
        .map(|row| {
            row.iter()
                .map(|tile| match tile {
                    Tile::Wall => '#',
                    Tile::Floor => '.',
                    Tile::Door => '+',
                })
                .collect()
        })
        .collect();

    let mut put = |x: i32, y: i32, c: char| {
        if x >= 0 && y >= 0 {
            if let Some(cell) = grid.get_mut(y as usize).and_then(|r| r.get_mut(x as usize)) {
                *cell = c;
            }
        }
    };

    for door in &dungeon.doors {
        let glyph = match door.orientation {
            DoorOrientation::Horizontal => '-',
            DoorOrientation::Vertical => '|',
        };
        put(door.grid_x, door.grid_y, glyph);
    }
    for room in &dungeon.rooms {
        put(room.center_x(), room.center_y(), room.room_type.icon());
    }
    put(dungeon.player_start.x, dungeon.player_start.y, '@');

    let mut out = String::with_capacity(grid.len() * (dungeon.width as usize + 1));
    for row in grid {
        out.extend(row);
        out.push('\n');
    }
    out
}

/// Legend line for the CLI
pub fn legend() -> &'static str {
    "@ start  E entrance  C combat  T treasure  S shop  P puzzle  B boss  |- door  + door tile"
}
