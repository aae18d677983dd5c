use std::io;
use std::io::Write;
use std::thread;
use std::time::Duration;

use tracing::info;

use crate::config::Config;
use crate::engine::Engine;
use crate::engine::EngineError;
use crate::life::Life;
use crate::render::Renderer;
use crate::world::World;

/// Ties the engine, the terminal view of the grid and the renderer together.
pub struct Game {
    engine: Engine,
    world: World,
    renderer: Renderer,
    tick: Duration,
}

impl Game {
    /// Start a game from the seeded `life`. The first frame shows `life` as is.
    pub fn new(config: &Config, life: Life) -> Result<Self, EngineError> {
        assert_eq!(life.extent(), config.extent, "grid does not match the config");

        let engine = Engine::new(life, config.tile, config.threads)?;
        let mut world = World::new(config.extent);
        world.ingest(engine.life().current());

        info!(
            width = config.extent.width,
            height = config.extent.height,
            tick_ms = config.tick.as_millis() as u64,
            "game ready"
        );

        Ok(Self {
            engine,
            world,
            renderer: Renderer::new(config.extent, config.window),
            tick: config.tick,
        })
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Evolve one generation and age the view accordingly.
    pub fn step(&mut self) {
        self.engine.evolve();
        self.world.ingest(self.engine.life().current());
    }

    /// The frame for the current state of the world.
    pub fn frame(&mut self) -> io::Result<&[u8]> {
        self.renderer.frame(&self.world)
    }

    /// Draw the current frame on a separate thread while waiting out the tick. Returns once both
    /// are done.
    pub fn present<W: Write + Send + ?Sized>(&mut self, out: &mut W) -> io::Result<()> {
        let Self {
            world,
            renderer,
            tick,
            ..
        } = self;

        thread::scope(|s| {
            let render = s.spawn(|| renderer.draw(world, out));
            thread::sleep(*tick);

            render
                .join()
                .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
        })
    }

    /// Draw and evolve forever. Only returns if writing to `out` fails.
    pub fn run<W: Write + Send + ?Sized>(&mut self, out: &mut W) -> io::Result<()> {
        loop {
            self.present(out)?;
            self.step();
        }
    }
}
