use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use sapper_core::{
    FinishedPress, Game, GameSettings, JsonFileRecordStore, Levels, MatchState, PolledScheduler,
    RecordStore, Scheduler, Snapshot,
};

use command::{Command, HELP};

mod command;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Level to start with
    #[arg(short, long, default_value = Levels::BEGINNER)]
    level: String,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Pressing a cell after the match ended starts a new one
    #[arg(long)]
    restart_on_finished: bool,

    /// File holding the best time of each level [default: <local data dir>/sapper/records.json]
    #[arg(long)]
    records: Option<PathBuf>,
}

fn default_records_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sapper")
        .join("records.json")
}

type CliGame = Game<PolledScheduler, JsonFileRecordStore>;

fn init_logging(filter: log::LevelFilter) {
    use tracing_subscriber::filter::LevelFilter;

    let level = match filter {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn print_board(out: &mut impl Write, snapshot: &Snapshot) -> io::Result<()> {
    let (_, cols) = snapshot.size;
    write!(out, "    ")?;
    for col in 0..cols {
        write!(out, "{}", col % 10)?;
    }
    writeln!(out)?;
    for (row, line) in snapshot.render_text().lines().enumerate() {
        writeln!(out, "{row:>3} {line}")?;
    }

    let best = snapshot.best.as_deref().unwrap_or("--:--");
    writeln!(
        out,
        "{:?} | {} | time {} | mines {} | best {}",
        snapshot.state, snapshot.level, snapshot.elapsed, snapshot.remaining_mines, best
    )
}

fn announce_results(game: &mut CliGame) {
    let mut last_state = game.state();
    game.subscribe(move |snapshot| {
        if snapshot.state != last_state {
            match snapshot.state {
                MatchState::Win => println!("Cleared in {}!", snapshot.elapsed),
                MatchState::Lose => println!("Boom."),
                MatchState::Idle | MatchState::Playing => {}
            }
            last_state = snapshot.state;
        }
    });
}

fn run_command<S: Scheduler, R: RecordStore>(
    game: &mut Game<S, R>,
    command: Command,
    out: &mut impl Write,
) -> anyhow::Result<bool> {
    match command {
        Command::Reveal(coords) => {
            game.reveal_cell(coords)?;
        }
        Command::Mark(coords) => {
            game.toggle_mark(coords)?;
        }
        Command::Start(coords) => {
            game.start(coords)?;
        }
        Command::Reset => game.reset(),
        Command::Level(id) => game.select_level(&id)?,
        Command::Levels => {
            for (id, setting) in game.levels().iter() {
                writeln!(
                    out,
                    "{id:<14} {}x{} {} mines",
                    setting.rows, setting.cols, setting.mines
                )?;
            }
            return Ok(true);
        }
        Command::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(&game.snapshot())?)?;
            return Ok(true);
        }
        Command::Help => {
            writeln!(out, "{HELP}")?;
            return Ok(true);
        }
        Command::Show => {}
        Command::Quit => return Ok(false),
    }

    print_board(out, &game.snapshot())?;
    Ok(true)
}

/// Runs one input line. Returns `false` once the player quits.
fn handle_line<S: Scheduler, R: RecordStore>(
    game: &mut Game<S, R>,
    line: &str,
    out: &mut impl Write,
) -> anyhow::Result<bool> {
    let result = line
        .parse::<Command>()
        .and_then(|command| run_command(game, command, out));
    match result {
        Ok(keep_going) => Ok(keep_going),
        Err(err) => {
            log::debug!("command failed: {err:?}");
            writeln!(out, "error: {err}")?;
            Ok(true)
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose.log_level_filter());

    let settings = GameSettings {
        level: args.level,
        finished_press: if args.restart_on_finished {
            FinishedPress::Restart
        } else {
            FinishedPress::Ignore
        },
        seed: args.seed,
    };
    log::debug!("settings: {:?}", settings);

    let scheduler = PolledScheduler::new();
    let records_path = args.records.unwrap_or_else(default_records_path);
    log::debug!("records file: {}", records_path.display());
    let records = JsonFileRecordStore::new(records_path);
    let mut game = Game::new(&settings, Levels::standard(), scheduler.clone(), records)?;
    announce_results(&mut game);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{HELP}")?;
    print_board(&mut out, &game.snapshot())?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        scheduler.poll();

        if !handle_line(&mut game, &line, &mut out)? {
            break;
        }
    }

    Ok(())
}
