//! Room descriptors and the adjacency table.
//!
//! Rooms are data, not code: one `RoomDef` per room names its doors, inner
//! blocks, mob spawn points and backdrop, and a single generic builder in
//! the parent module turns the active descriptor into colliders. The
//! adjacency table is the transition function of the navigation state
//! machine: `(room, crossing direction) -> (destination, entry coordinate)`.
//!
//! World coordinates are centered on the room: a room is 16x12 tiles of
//! 64 units, so the interior spans +-HALF_W x +-HALF_H. Tile indices count
//! from the bottom-left corner.

use bevy::prelude::*;

use crate::common::facing::Facing;

pub const TILE: f32 = 64.0;
pub const TILES_X: usize = 16;
pub const TILES_Y: usize = 12;
pub const ROOM_WIDTH: f32 = TILE * TILES_X as f32;
pub const ROOM_HEIGHT: f32 = TILE * TILES_Y as f32;
pub const HALF_W: f32 = ROOM_WIDTH / 2.0;
pub const HALF_H: f32 = ROOM_HEIGHT / 2.0;

pub const START_ROOM: RoomId = RoomId(0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoomId(pub usize);

/// Backdrop identifier; the renderer picks floor tints from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backdrop {
    Station,
    Trap,
    Bonus,
    Boss,
}

impl Backdrop {
    /// Checkerboard floor tints.
    pub fn tint(self, alt: bool) -> Color {
        match (self, alt) {
            (Backdrop::Station, false) => Color::srgb(0.14, 0.14, 0.16),
            (Backdrop::Station, true) => Color::srgb(0.12, 0.12, 0.14),
            (Backdrop::Trap, false) => Color::srgb(0.18, 0.11, 0.11),
            (Backdrop::Trap, true) => Color::srgb(0.15, 0.09, 0.09),
            (Backdrop::Bonus, false) => Color::srgb(0.17, 0.15, 0.09),
            (Backdrop::Bonus, true) => Color::srgb(0.14, 0.13, 0.08),
            (Backdrop::Boss, false) => Color::srgb(0.16, 0.09, 0.17),
            (Backdrop::Boss, true) => Color::srgb(0.13, 0.07, 0.14),
        }
    }
}

/// Inclusive tile range left open in a boundary wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoorSpan {
    pub first: usize,
    pub last: usize,
}

const fn door(first: usize, last: usize) -> Option<DoorSpan> {
    Some(DoorSpan { first, last })
}

#[derive(Debug, Clone, Copy)]
pub struct RoomDef {
    pub name: &'static str,
    pub backdrop: Backdrop,
    pub door_up: Option<DoorSpan>,
    pub door_down: Option<DoorSpan>,
    pub door_left: Option<DoorSpan>,
    pub door_right: Option<DoorSpan>,
    /// Single-tile inner wall blocks, as (tile_x, tile_y).
    pub blocks: &'static [(usize, usize)],
    pub mob_spawns: &'static [Vec2],
}

impl RoomDef {
    pub fn door(&self, side: Facing) -> Option<DoorSpan> {
        match side {
            Facing::Up => self.door_up,
            Facing::Down => self.door_down,
            Facing::Left => self.door_left,
            Facing::Right => self.door_right,
        }
    }
}

const NO_MOBS: &[Vec2] = &[];
const PAIR: &[Vec2] = &[Vec2::new(-192.0, 128.0), Vec2::new(192.0, 128.0)];
const QUAD: &[Vec2] = &[
    Vec2::new(-256.0, 128.0),
    Vec2::new(256.0, 128.0),
    Vec2::new(-256.0, -128.0),
    Vec2::new(256.0, -128.0),
];
const BOSS_PACK: &[Vec2] = &[
    Vec2::new(-320.0, 192.0),
    Vec2::new(0.0, 224.0),
    Vec2::new(320.0, 192.0),
    Vec2::new(-320.0, -192.0),
    Vec2::new(0.0, -224.0),
    Vec2::new(320.0, -192.0),
];

pub const ROOMS: [RoomDef; 12] = [
    // 0: entry hall, safe.
    RoomDef {
        name: "Hall",
        backdrop: Backdrop::Station,
        door_up: door(6, 7),
        door_down: None,
        door_left: None,
        door_right: None,
        blocks: &[],
        mob_spawns: NO_MOBS,
    },
    // 1: first crossing.
    RoomDef {
        name: "Crossing",
        backdrop: Backdrop::Station,
        door_up: door(6, 7),
        door_down: door(6, 7),
        door_left: None,
        door_right: door(4, 5),
        blocks: &[(7, 4)],
        mob_spawns: PAIR,
    },
    // 2: trap pocket above the crossing.
    RoomDef {
        name: "TrapNorth",
        backdrop: Backdrop::Trap,
        door_up: None,
        door_down: door(6, 7),
        door_left: None,
        door_right: None,
        blocks: &[],
        mob_spawns: QUAD,
    },
    // 3: central junction, four doors.
    RoomDef {
        name: "Junction",
        backdrop: Backdrop::Station,
        door_up: door(6, 7),
        door_down: door(6, 7),
        door_left: door(4, 5),
        door_right: door(4, 5),
        blocks: &[(5, 5), (7, 5)],
        mob_spawns: PAIR,
    },
    // 4: bonus alcove below the junction.
    RoomDef {
        name: "BonusSouth",
        backdrop: Backdrop::Bonus,
        door_up: door(6, 7),
        door_down: None,
        door_left: None,
        door_right: None,
        blocks: &[(7, 5)],
        mob_spawns: NO_MOBS,
    },
    // 5: pillar corridor.
    RoomDef {
        name: "Pillars",
        backdrop: Backdrop::Station,
        door_up: door(2, 3),
        door_down: None,
        door_left: door(4, 5),
        door_right: door(4, 5),
        blocks: &[(5, 5), (5, 6), (5, 7)],
        mob_spawns: PAIR,
    },
    // 6: bonus alcove east of the pillars.
    RoomDef {
        name: "BonusEast",
        backdrop: Backdrop::Bonus,
        door_up: None,
        door_down: None,
        door_left: door(4, 5),
        door_right: None,
        blocks: &[(5, 5)],
        mob_spawns: NO_MOBS,
    },
    // 7: western gallery.
    RoomDef {
        name: "Gallery",
        backdrop: Backdrop::Station,
        door_up: door(2, 3),
        door_down: door(2, 3),
        door_left: door(6, 7),
        door_right: None,
        blocks: &[],
        mob_spawns: PAIR,
    },
    // 8: trap pocket west of the gallery.
    RoomDef {
        name: "TrapWest",
        backdrop: Backdrop::Trap,
        door_up: None,
        door_down: door(6, 7),
        door_left: None,
        door_right: door(6, 7),
        blocks: &[],
        mob_spawns: QUAD,
    },
    // 9: upper walkway.
    RoomDef {
        name: "Walkway",
        backdrop: Backdrop::Station,
        door_up: None,
        door_down: door(2, 3),
        door_left: door(4, 5),
        door_right: None,
        blocks: &[(7, 5)],
        mob_spawns: PAIR,
    },
    // 10: antechamber before the boss.
    RoomDef {
        name: "Antechamber",
        backdrop: Backdrop::Station,
        door_up: door(6, 7),
        door_down: None,
        door_left: door(4, 5),
        door_right: door(4, 5),
        blocks: &[(5, 5), (7, 5)],
        mob_spawns: PAIR,
    },
    // 11: boss chamber, terminal.
    RoomDef {
        name: "Boss",
        backdrop: Backdrop::Boss,
        door_up: None,
        door_down: None,
        door_left: None,
        door_right: door(4, 5),
        blocks: &[],
        mob_spawns: BOSS_PACK,
    },
];

/// Transition function of the room state machine.
///
/// Returns the destination and the coordinate the player's crossed axis is
/// reset to (y for Up/Down crossings, x for Left/Right). Edges absent from
/// the table have no doorway; the caller must treat them as a no-op.
///
/// The graph is directed and deliberately not symmetric: the antechamber's
/// top exit drops back into the entry hall at mid-room, and the hall has no
/// downward edge back out.
pub fn neighbor(room: RoomId, crossing: Facing) -> Option<(RoomId, f32)> {
    use Facing::*;
    let (dest, entry) = match (room.0, crossing) {
        (0, Up) => (1, -HALF_H),
        (1, Up) => (2, -HALF_H),
        (1, Down) => (0, HALF_H),
        (1, Right) => (3, -HALF_W),
        (2, Down) => (1, HALF_H),
        (3, Up) => (8, -HALF_H),
        (3, Down) => (4, HALF_H),
        (3, Left) => (1, HALF_W),
        (3, Right) => (5, -HALF_W),
        (4, Up) => (3, -HALF_H),
        (5, Up) => (7, -HALF_H),
        (5, Left) => (3, HALF_W),
        (5, Right) => (6, -HALF_W),
        (6, Left) => (5, HALF_W),
        (7, Up) => (9, -HALF_H),
        (7, Down) => (5, HALF_H),
        (7, Left) => (8, HALF_W),
        (8, Down) => (3, HALF_H),
        (8, Right) => (7, -HALF_W),
        (9, Down) => (7, HALF_H),
        (9, Left) => (10, HALF_W),
        (10, Up) => (0, 0.0),
        (10, Left) => (11, HALF_W),
        (10, Right) => (9, -HALF_W),
        (11, Right) => (10, -HALF_W),
        _ => return None,
    };
    Some((RoomId(dest), entry))
}
