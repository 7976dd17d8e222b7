//! Chainreact: a chain-reaction board game engine.
//!
//! ## Usage
//!
//! - `chainreact` - Show a short cascade demo
//! - `chainreact demo` - Same as above
//! - `chainreact selfplay` - Let two AIs play a full game

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};

use chainreact::board::{Board, Color, Pos};
use chainreact::situation::{CascadeObserver, FieldSetup, Situation};
use chainreact::strategy::{Difficulty, Strategy, StrategyConfig};

/// Chainreact: a chain-reaction board game engine
#[derive(Parser)]
#[command(name = "chainreact")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a short demo of the cascade mechanics
    Demo,
    /// Play a full AI-vs-AI game and print it
    Selfplay(SelfplayArgs),
}

#[derive(clap::Args)]
struct SelfplayArgs {
    /// Board width
    #[arg(long, default_value_t = chainreact::constants::DEFAULT_DIM_X)]
    width: usize,

    /// Board height
    #[arg(long, default_value_t = chainreact::constants::DEFAULT_DIM_Y)]
    height: usize,

    /// Difficulty of the white player
    #[arg(long, value_enum, default_value_t = DifficultyArg::Search)]
    white: DifficultyArg,

    /// Difficulty of the black player
    #[arg(long, value_enum, default_value_t = DifficultyArg::Heuristic)]
    black: DifficultyArg,

    /// Thinking-time budget per move in milliseconds
    #[arg(long, default_value_t = chainreact::constants::DEFAULT_THINKING_TIME_MS)]
    time_ms: u64,

    /// Seed for deterministic tie-breaking
    #[arg(long)]
    seed: Option<u64>,

    /// Pre-populate fields, format "x,y,color,tokens" (repeatable)
    #[arg(long = "setup")]
    setup: Vec<String>,

    /// Print the board after every cascade step, not only after moves
    #[arg(long)]
    show_steps: bool,
}

#[derive(Copy, Clone, ValueEnum)]
enum DifficultyArg {
    Random,
    Heuristic,
    Search,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Random => Difficulty::Random,
            DifficultyArg::Heuristic => Difficulty::Heuristic,
            DifficultyArg::Search => Difficulty::Search,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Selfplay(args)) => run_selfplay(&args),
        Some(Commands::Demo) | None => {
            run_demo();
            Ok(())
        }
    }
}

fn run_demo() {
    println!("Chainreact: chain-reaction board game engine\n");

    let board = Board::new(3, 3);
    let mut situation = Situation::new(&board);

    println!("=== Cascade Demo (3x3) ===");
    println!("White fills the corner (0,0), limit {}:", board.limit(Pos::new(0, 0)));
    situation.add_token(Pos::new(0, 0), Color::White, None);
    println!("{situation}");

    println!("A second token overflows it onto both neighbors:");
    situation.add_token(Pos::new(0, 0), Color::White, None);
    println!("{situation}");

    println!("Black stacks the center, white overflows the corner again:");
    situation.add_token(Pos::new(1, 1), Color::Black, None);
    situation.add_token(Pos::new(0, 0), Color::White, None);
    situation.add_token(Pos::new(0, 0), Color::White, None);
    println!("{situation}");
}

/// Prints the board after every resolved cascade step.
struct StepPrinter;

impl CascadeObserver for StepPrinter {
    fn move_placed(&mut self, situation: &Situation, pos: Pos) {
        println!("placed at {pos}:\n{situation}");
    }

    fn cascade_step(&mut self, situation: &Situation) {
        println!("cascade step:\n{situation}");
    }
}

fn run_selfplay(args: &SelfplayArgs) -> Result<()> {
    if args.width < 2 || args.height < 2 {
        bail!("board must be at least 2x2, got {}x{}", args.width, args.height);
    }

    let board = Board::new(args.width, args.height);
    let setup = args
        .setup
        .iter()
        .map(|entry| parse_setup(&board, entry))
        .collect::<Result<Vec<_>>>()?;
    let mut situation = Situation::with_setup(&board, &setup);

    let cfg = StrategyConfig {
        thinking_time: std::time::Duration::from_millis(args.time_ms),
        seed: args.seed,
        ..StrategyConfig::default()
    };
    let mut white = Strategy::new(Color::White, args.white.into(), cfg.clone());
    let mut black = Strategy::new(Color::Black, args.black.into(), cfg);

    println!("{situation}");

    // Bounded by the board filling up: every turn adds a token and the
    // uniform check ends a decided game, but cap the loop as a safety net.
    let max_turns = args.width * args.height * 50;
    let mut printer = StepPrinter;

    for turn in 0..max_turns {
        let strategy = if turn % 2 == 0 { &mut white } else { &mut black };
        let player = strategy.player();

        let Some(pos) = strategy.request_move(&situation) else {
            println!("{player} has no legal move");
            break;
        };
        println!("turn {}: {player} plays {pos}", turn + 1);

        let observer: Option<&mut dyn CascadeObserver> = if args.show_steps {
            Some(&mut printer)
        } else {
            None
        };
        situation.add_token(pos, player, observer);
        println!("{situation}");

        if let Some(winner) = situation.dominant_color() {
            println!("{winner} wins after {} turns", turn + 1);
            return Ok(());
        }
    }

    println!("game aborted without a winner");
    Ok(())
}

/// Parses one "x,y,color,tokens" setup entry.
fn parse_setup(board: &Board, entry: &str) -> Result<FieldSetup> {
    let parts: Vec<&str> = entry.split(',').collect();
    if parts.len() != 4 {
        bail!("setup entry '{entry}' must have the form x,y,color,tokens");
    }

    let x: usize = parts[0]
        .trim()
        .parse()
        .with_context(|| format!("bad x coordinate in '{entry}'"))?;
    let y: usize = parts[1]
        .trim()
        .parse()
        .with_context(|| format!("bad y coordinate in '{entry}'"))?;
    let color = match parts[2].trim() {
        "white" | "w" => Color::White,
        "black" | "b" => Color::Black,
        other => bail!("unknown color '{other}' in '{entry}'"),
    };
    let tokens: u8 = parts[3]
        .trim()
        .parse()
        .with_context(|| format!("bad token count in '{entry}'"))?;

    let pos = Pos::new(x, y);
    if !board.contains(pos) {
        bail!("setup position {pos} is outside the {}x{} board", board.dim_x(), board.dim_y());
    }
    if tokens == 0 || tokens as usize >= board.limit(pos) {
        bail!(
            "setup token count {tokens} at {pos} must be between 1 and {}",
            board.limit(pos) - 1
        );
    }

    Ok(FieldSetup { pos, color, tokens })
}
