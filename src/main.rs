use std::io;

use anyhow::Context;
use clap::Parser;
use crossterm::execute;
use crossterm::terminal;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use lifetrail::config::Config;
use lifetrail::config::Options;
use lifetrail::game::Game;
use lifetrail::io::select_pattern;
use lifetrail::io::terminal_size;
use lifetrail::life::Life;
use lifetrail::seed;

fn main() -> anyhow::Result<()> {
    // Frames go to stdout, so logs stay on stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let options = Options::parse();
    debug!(?options, "parsed options");

    let (cols, rows) = terminal_size().context("Failed to query the terminal size")?;
    let config = Config::from_terminal(cols, rows)?.with_threads(options.threads);

    let pattern = match options.pattern {
        Some(pattern) => pattern,
        None => select_pattern(&mut io::stdin().lock(), &mut io::stdout())
            .context("Failed to select a pattern")?,
    };

    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut life = Life::new(config.extent);
    seed::plant(&mut life, pattern, options.density, &mut rng)
        .context("Failed to seed the grid")?;

    let mut game = Game::new(&config, life).context("Failed to start the engine")?;

    let mut stdout = io::stdout();
    execute!(stdout, terminal::Clear(terminal::ClearType::All))?;

    game.run(&mut stdout).context("Failed to draw")
}
