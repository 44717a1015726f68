//! Rollbook console record managers
//!
//! One binary, four menu-driven programs over the same record store.

mod console;
mod library;
mod roster;
mod students;
mod todo;

use std::io::{self, BufRead, ErrorKind, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use rollbook::config::DEFAULT_CAPACITY;
use rollbook::{Config, DuplicateKeys, Engine, KeyPolicy, LoadStop, Record};
use tracing_subscriber::{fmt, EnvFilter};

use console::Console;

/// Default data file of the student manager
const STUDENTS_FILE: &str = "students.txt";

/// Rollbook
#[derive(Parser, Debug)]
#[command(name = "rollbook")]
#[command(about = "Console record managers backed by a flat-file record store")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    program: Program,
}

#[derive(Subcommand, Debug)]
enum Program {
    /// Student manager (roll, name, age, marks), saved to a file on exit
    Students {
        /// Data file
        #[arg(short, long, default_value = STUDENTS_FILE)]
        file: PathBuf,

        /// Maximum number of students
        #[arg(short, long, default_value_t = DEFAULT_CAPACITY)]
        capacity: usize,

        /// Accept a roll number that is already in use
        #[arg(long)]
        allow_duplicate_rolls: bool,
    },

    /// Student roster (roll, name, course, year)
    Roster {
        #[command(flatten)]
        store: StoreOpts,
    },

    /// Library catalog with issue and return
    Library {
        #[command(flatten)]
        store: StoreOpts,
    },

    /// To-do list
    Todo {
        #[command(flatten)]
        store: StoreOpts,
    },
}

/// Storage options for the in-memory programs
#[derive(clap::Args, Debug)]
struct StoreOpts {
    /// Persist to this file (default: keep everything in memory)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Maximum number of records (default: unbounded)
    #[arg(short, long)]
    capacity: Option<usize>,
}

impl StoreOpts {
    fn config(self, key_policy: KeyPolicy) -> Config {
        let mut builder = Config::builder().key_policy(key_policy).unbounded();
        if let Some(file) = self.file {
            builder = builder.data_file(file);
        }
        if let Some(capacity) = self.capacity {
            builder = builder.capacity(capacity);
        }
        builder.build()
    }
}

fn main() -> ExitCode {
    // Initialize tracing/logging (stderr, so menus on stdout stay readable)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    tracing::debug!("Rollbook v{}", rollbook::VERSION);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock());

    let result = match args.program {
        Program::Students {
            file,
            capacity,
            allow_duplicate_rolls,
        } => {
            let duplicates = if allow_duplicate_rolls {
                DuplicateKeys::Permit
            } else {
                DuplicateKeys::Reject
            };
            let config = Config::builder()
                .data_file(file)
                .capacity(capacity)
                .key_policy(KeyPolicy::CallerSupplied)
                .duplicate_keys(duplicates)
                .build();
            session(&mut console, config, students::run)
        }
        Program::Roster { store } => {
            session(&mut console, store.config(KeyPolicy::CallerSupplied), roster::run)
        }
        Program::Library { store } => {
            session(&mut console, store.config(KeyPolicy::Assigned), library::run)
        }
        Program::Todo { store } => {
            session(&mut console, store.config(KeyPolicy::Assigned), todo::run)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("rollbook: {}", e);
            ExitCode::FAILURE
        }
    }
}

type Menu<R, I, O> = fn(&mut Console<I, O>, &mut Engine<R>) -> io::Result<()>;

/// Open the engine, run one menu until exit, then save (retrying on request)
fn session<R, I, O>(console: &mut Console<I, O>, config: Config, menu: Menu<R, I, O>) -> rollbook::Result<()>
where
    R: Record,
    I: BufRead,
    O: Write,
{
    let mut engine = Engine::<R>::open(config)?;

    if let Some(report) = engine.load_report() {
        match &report.stop {
            Some(LoadStop::Malformed { line, reason }) => console.say(format!(
                "Warning: loaded {} records; line {} was unreadable ({}) and loading stopped there.",
                report.loaded, line, reason
            ))?,
            Some(LoadStop::CapacityReached { line }) => console.say(format!(
                "Warning: store is full after {} records; lines from {} on were not loaded.",
                report.loaded, line
            ))?,
            None => {}
        }
    }

    match menu(console, &mut engine) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
            tracing::debug!("input closed, leaving menu");
        }
        Err(e) => return Err(e.into()),
    }

    if engine.data_file().is_none() {
        return engine.close();
    }
    save_with_retry(console, &mut engine)?;
    console.say("Data saved. Exiting.")?;
    Ok(())
}

/// Save, asking whether to try again each time the save fails
///
/// Returns the last `Save` error if the user declines a retry or input ends.
fn save_with_retry<R, I, O>(console: &mut Console<I, O>, engine: &mut Engine<R>) -> rollbook::Result<()>
where
    R: Record,
    I: BufRead,
    O: Write,
{
    loop {
        let err = match engine.save() {
            Ok(()) => return Ok(()),
            Err(e) => e,
        };

        console.say(format!("Error: {}", err))?;
        console.say("Unsaved changes will be lost if you exit now.")?;
        match console.confirm("Retry saving? (y/n): ") {
            Ok(true) => continue,
            Ok(false) => return Err(err),
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => return Err(err),
            Err(e) => return Err(e.into()),
        }
    }
}
