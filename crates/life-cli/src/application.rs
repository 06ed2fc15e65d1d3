//! Terminal runner that paces generations and reacts to cancellation.

use life_core::{AppConfig, Error, Result};
use life_world::{Simulation, World};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::io::Write;
use tokio::time::{sleep, Duration};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument};

/// Move the cursor home and clear the screen
const CLEAR_SCREEN: &str = "\x1b[H\x1b[2J";

pub struct Application {
    config: AppConfig,
}

impl Application {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Build the first generation, either from the configured state file or by
    /// random seeding.
    pub fn initial_world(&self) -> Result<World> {
        match &self.config.initial_state {
            Some(path) => {
                let world = World::from_state_file(path)?;
                info!(path = %path.display(), "Starting from saved state");
                Ok(world)
            }
            None => {
                let mut world = World::new(self.config.height, self.config.width)?;
                let seed = self.config.seed.unwrap_or_else(|| rand::thread_rng().gen());
                info!(seed, "Seeding world");
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                world.rand_init(self.config.fill_percentage, &mut rng);
                Ok(world)
            }
        }
    }

    /// Run until `max_generations` is reached or `cancel` fires.
    ///
    /// Returns the last generation on normal completion and `Error::Cancelled`
    /// on cancellation. The last generation is saved in both cases when a save
    /// path is configured. After cancellation that saved generation is one step
    /// past the last frame printed, since each step runs before the pause.
    #[instrument(skip_all, fields(height = self.config.height, width = self.config.width))]
    pub async fn run<W: Write>(&self, cancel: CancellationToken, out: &mut W) -> Result<World> {
        let mut simulation = Simulation::new(self.initial_world()?);
        info!(
            population = simulation.current().population(),
            "Starting simulation"
        );

        let outcome = self.drive(&mut simulation, &cancel, out).await;

        if let Some(path) = &self.config.save_path {
            match simulation.current().save_state(path) {
                Ok(()) => info!(path = %path.display(), generation = simulation.generation(), "Final state saved"),
                Err(e) if outcome.is_err() => {
                    error!("Failed to save final state to {}: {}", path.display(), e);
                }
                Err(e) => return Err(e),
            }
        }

        outcome?;
        Ok(simulation.into_world())
    }

    async fn drive<W: Write>(
        &self,
        simulation: &mut Simulation,
        cancel: &CancellationToken,
        out: &mut W,
    ) -> Result<()> {
        let interval = Duration::from_millis(self.config.tick_interval_ms);

        loop {
            if self.config.clear_screen {
                write!(out, "{CLEAR_SCREEN}")?;
            }
            writeln!(out, "{}", simulation.current())?;
            out.flush()?;

            if let Some(max) = self.config.max_generations {
                if simulation.generation() >= max {
                    info!(generations = simulation.generation(), "Generation limit reached");
                    return Ok(());
                }
            }

            let population = simulation.step();
            if simulation.generation() % 100 == 0 {
                debug!(generation = simulation.generation(), population, "Progress");
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    return Err(Error::Cancelled);
                }
                _ = sleep(interval) => {}
            }
        }
    }
}
