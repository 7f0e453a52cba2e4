use clap::{Args, Parser, Subcommand};
use env_logger::{Env, Target};
use log::{info, warn};
use std::fs::{self, File};
use std::io;
use termlife::colors::PRESETS;
use termlife::life::{EdgePolicy, Life};
use termlife::settings::Settings;
use termlife::terminal::Terminal;
use termlife::viz::life::draw_cell;
use termlife::LifeConfig;

#[derive(Parser)]
#[command(name = "termlife")]
#[command(author = "Terminal Art Generator")]
#[command(version = "0.1.0")]
#[command(about = "Terminal-based Conway's Game of Life with paint tools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive simulator
    Run {
        #[command(flatten)]
        opts: LifeOpts,

        /// Animation speed (seconds per generation)
        #[arg(short, long)]
        time: Option<f32>,
    },

    /// Run a number of generations headless and print the final grid
    Print {
        #[command(flatten)]
        opts: LifeOpts,

        /// Generations to run before printing
        #[arg(short, long, default_value = "0")]
        generations: u64,

        /// Viewport width in characters
        #[arg(short = 'W', long, default_value = "79")]
        width: u16,

        /// Viewport height in characters
        #[arg(short = 'H', long, default_value = "23")]
        height: u16,
    },
}

/// Options shared by every mode; unset flags fall back to the settings file
#[derive(Args)]
struct LifeOpts {
    /// Random seed for reproducibility
    #[arg(short, long)]
    seed: Option<u64>,

    /// Cell size in characters (1-8)
    #[arg(short = 'z', long)]
    cell_size: Option<u16>,

    /// Gap inside each cell in characters
    #[arg(long)]
    spacing: Option<u16>,

    /// Randomness bias (0 = half alive, 100 = all dead)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=100))]
    randomness: Option<u8>,

    /// Brush size (odd)
    #[arg(short, long)]
    brush: Option<u16>,

    /// Neighbor policy at the grid border
    #[arg(short, long, value_enum)]
    edge: Option<EdgePolicy>,

    /// Palette preset (matrix, fire, ice, pink, gold, electric, lava, mono, rainbow, neon)
    #[arg(short, long)]
    palette: Option<String>,

    /// Character to use for drawing cells
    #[arg(short, long)]
    char: Option<String>,

    /// Show dead cells in grey
    #[arg(long)]
    corpses: bool,

    /// Show grid lines (needs spacing)
    #[arg(long)]
    grid: bool,
}

impl LifeOpts {
    fn apply(self, config: &mut LifeConfig) {
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(size) = self.cell_size {
            config.cell_size = size;
        }
        if let Some(spacing) = self.spacing {
            config.spacing = spacing;
        }
        if let Some(r) = self.randomness {
            config.randomness = r;
        }
        if let Some(b) = self.brush {
            config.brush_size = b;
        }
        if let Some(edge) = self.edge {
            config.edge = edge;
        }
        if let Some(name) = self.palette {
            match PRESETS.iter().find(|(n, _)| n.eq_ignore_ascii_case(&name)) {
                Some((_, colors)) => config.palette = colors.to_vec(),
                None => {
                    eprintln!("Unknown palette: {}. Keeping configured palette.", name);
                    eprintln!("Available: matrix, fire, ice, pink, gold, electric, lava, mono, rainbow, neon");
                }
            }
        }
        if let Some(c) = self.char.and_then(|s| s.chars().next()) {
            config.draw_char = c;
        }
        config.show_corpses |= self.corpses;
        config.grid_lines |= self.grid;
    }
}

/// Log to a file while the screen is owned by the viewer, else to stderr
fn init_logging(interactive: bool) {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
    if interactive {
        let dir = dirs::cache_dir().unwrap_or_else(|| ".".into()).join("termlife");
        match fs::create_dir_all(&dir).and_then(|_| File::create(dir.join("termlife.log"))) {
            Ok(file) => {
                builder.target(Target::Pipe(Box::new(file)));
            }
            Err(_) => {
                builder.filter_level(log::LevelFilter::Off);
            }
        }
    }
    builder.init();
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    init_logging(matches!(cli.command, Commands::Run { .. }));

    let settings = Settings::load();
    let mut config = LifeConfig::from_settings(&settings.life);

    match cli.command {
        Commands::Run { opts, time } => {
            opts.apply(&mut config);
            if let Some(t) = time {
                config.time_step = t;
            }
            let mut term = Terminal::new(true)?;
            termlife::viz::life::run(&mut term, &config)?;
        }
        Commands::Print {
            opts,
            generations,
            width,
            height,
        } => {
            opts.apply(&mut config);
            if config.seed.is_none() {
                warn!("no seed given; output is not reproducible");
            }
            let mut life = Life::new(&config, width, height);
            for _ in 0..generations {
                life.advance();
            }
            let stats = life.stats();
            info!("generation {}: {} alive, {} dead", stats.generation, stats.alive, stats.dead);

            let mut term = Terminal::offscreen(width, height);
            for view in life.snapshot() {
                draw_cell(&mut term, life.dims(), &view, config.draw_char);
            }
            term.print_to_stdout()?;
        }
    }

    Ok(())
}
