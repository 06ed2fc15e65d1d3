//! Generation-update rule on a toroidal grid.

use crate::world::World;
use life_core::{Direction, Position};

/// Count live cells among the eight neighbours of `pos`, wrapping at the edges.
pub fn neighbors(world: &World, pos: Position) -> u8 {
    Direction::all()
        .into_iter()
        .filter(|&direction| world.get(pos.step(direction)))
        .count() as u8
}

/// Standard B3/S23 rule: a live cell survives with 2 or 3 neighbours, a dead
/// cell is born with exactly 3.
pub fn next_cell(alive: bool, neighbors: u8) -> bool {
    matches!((alive, neighbors), (true, 2) | (true, 3) | (false, 3))
}

/// Write the generation following `old` into `new`.
///
/// Both worlds must have the same dimensions; `old` is only read.
pub fn next_state(old: &World, new: &mut World) {
    debug_assert!(
        old.same_dimensions(new),
        "next_state needs equally sized worlds"
    );

    for pos in old.positions() {
        new.set(pos, next_cell(old.get(pos), neighbors(old, pos)));
    }
}
