//! Double-buffered generation stepping.

use crate::evolution::next_state;
use crate::world::World;
use tracing::trace;

/// Owns the current world and a scratch buffer of the same size.
///
/// Every step writes the next generation into the scratch buffer and swaps the
/// two, so no grid memory is allocated after construction.
#[derive(Debug, Clone)]
pub struct Simulation {
    current: World,
    next: World,
    generation: u64,
}

impl Simulation {
    pub fn new(world: World) -> Self {
        let next = world.clone();
        Self {
            current: world,
            next,
            generation: 0,
        }
    }

    /// Advance one generation and return the new population.
    pub fn step(&mut self) -> usize {
        next_state(&self.current, &mut self.next);
        std::mem::swap(&mut self.current, &mut self.next);
        self.generation += 1;

        let population = self.current.population();
        trace!(generation = self.generation, population, "Generation advanced");
        population
    }

    pub fn current(&self) -> &World {
        &self.current
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn into_world(self) -> World {
        self.current
    }
}
