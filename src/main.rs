use std::path::PathBuf;

use chrono::Local;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use shift_board::date::extract_date_from_channel_name;
use shift_board::display::{print_board, write_board_to_file, BoardExport};
use shift_board::parser::{load_assignments, load_slots};
use shift_board::schedule::{
    board_from_assignments, build_board, has_gap_shift, parse_intervals, ShiftBoard, SlotScheme,
};
use shift_board::ShiftError;

#[derive(Parser)]
#[command(name = "shift-board")]
#[command(about = "Lays out hourly shift rosters and highlights schedule changes")]
struct Cli {
    /// Log pipeline decisions (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a table from reaction-collected slots
    Create {
        #[arg(long)]
        slots: PathBuf,
        #[arg(long, env = "SHIFT_BOARD_COLUMNS", default_value_t = 4)]
        columns: usize,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Build a role table from a decided assignment list
    Auto {
        #[arg(long)]
        assignments: PathBuf,
        #[arg(long)]
        runner: String,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Parse interval text and report stepping-stone shifts
    Intervals { text: String },
}

#[derive(Args)]
struct OutputArgs {
    #[arg(long)]
    title: Option<String>,
    /// Channel name to read the shift date from
    #[arg(long, env = "SHIFT_BOARD_CHANNEL")]
    channel: Option<String>,
    /// Also write the table to this text file
    #[arg(long)]
    out: Option<PathBuf>,
    /// Print the board as JSON instead of a table
    #[arg(short, long)]
    json: bool,
}

impl OutputArgs {
    fn resolve_title(&self) -> String {
        if let Some(title) = &self.title {
            return title.clone();
        }
        let today = Local::now().date_naive();
        self.channel
            .as_deref()
            .and_then(|name| extract_date_from_channel_name(name, today))
            .unwrap_or_else(|| "Shift".to_string())
    }

    fn emit(&self, board: &ShiftBoard) -> Result<(), Box<dyn std::error::Error>> {
        let title = self.resolve_title();

        if self.json {
            println!("{}", BoardExport::new(&title, board).to_json()?);
        } else {
            print_board(&title, board);
        }

        if let Some(path) = &self.out {
            write_board_to_file(&title, board, path)?;
            println!("Board saved to {}", path.display());
        }
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Create { slots, columns, output } => {
            let loaded = load_slots(&slots)?;
            if loaded.is_empty() {
                return Err(ShiftError::NoSlots(slots.display().to_string()).into());
            }
            info!(slots = loaded.len(), columns, "building board");

            let board = build_board(&loaded, &SlotScheme::generic(columns));
            output.emit(&board)?;
        }
        Commands::Auto { assignments, runner, output } => {
            let list = load_assignments(&assignments)?;
            if list.schedule.is_empty() {
                return Err(ShiftError::NoSlots(assignments.display().to_string()).into());
            }
            if let Some(reasoning) = &list.reasoning {
                info!(%reasoning, "assignment reasoning");
            }

            let board = board_from_assignments(&list.schedule, &runner, &SlotScheme::roles());
            output.emit(&board)?;
        }
        Commands::Intervals { text } => {
            let intervals = parse_intervals(&text);
            if intervals.is_empty() {
                return Err(ShiftError::InvalidTimeLabel(text).into());
            }
            for (start, end) in &intervals {
                println!("{}-{}", start, end);
            }
            println!("stepping-stone shift: {}", if has_gap_shift(&intervals) { "yes" } else { "no" });
        }
    }

    Ok(())
}
