use std::io::{self, Read};
use std::num::NonZeroU64;
use std::path::PathBuf;
use std::process::ExitCode;

use log::{LevelFilter, Log, Metadata, Record};
use mlfq_model::{
    Admission, ConfigError, Quanta, Sim, SimConfig,
    config::ConfigFormat,
    report,
    sim::{BernoulliWorkload, process_metrics, summarize},
};

const USAGE: &str = "\
usage: mlfq_model [PATH|-] [--format legacy|toml] [--admission cycle|slice]
                  [--random SEED] [--trace] [-v|-vv] [--help]

Reads a process table (stdin when PATH is omitted or `-`) and prints the
two-level MLFQ schedule as a Gantt chart.";

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{:<5}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

// Quanta used with --random workloads
const RANDOM_TQ0: NonZeroU64 = NonZeroU64::new(2).unwrap();
const RANDOM_TQ1: NonZeroU64 = NonZeroU64::new(4).unwrap();

enum Input {
    Stdin,
    File(PathBuf),
    Random(u64),
}

struct Args {
    input: Input,
    format: Option<ConfigFormat>,
    admission: Option<Admission>,
    trace: bool,
    verbosity: u8,
}

/// Why argument parsing stopped short of a runnable `Args`.
#[derive(Debug, PartialEq, Eq)]
enum ArgsError {
    Help,
    Usage(String),
}

impl ArgsError {
    fn usage(msg: impl Into<String>) -> Self {
        Self::Usage(msg.into())
    }

    fn report(&self) -> ExitCode {
        match self {
            Self::Help => {
                println!("{USAGE}");
                ExitCode::SUCCESS
            }
            Self::Usage(msg) => {
                eprintln!("error: {msg}");
                eprintln!();
                eprintln!("{USAGE}");
                ExitCode::from(2)
            }
        }
    }
}

fn parse_args(argv: impl IntoIterator<Item = String>) -> Result<Args, ArgsError> {
    let mut args = Args {
        input: Input::Stdin,
        format: None,
        admission: None,
        trace: false,
        verbosity: 0,
    };
    let mut path_seen = false;
    let mut random_seen = false;
    let mut it = argv.into_iter();

    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--help" | "-h" => return Err(ArgsError::Help),
            "--format" => {
                args.format = Some(match it.next().as_deref() {
                    Some("legacy") => ConfigFormat::Legacy,
                    Some("toml") => ConfigFormat::Toml,
                    _ => return Err(ArgsError::usage("--format expects `legacy` or `toml`")),
                });
            }
            "--admission" => {
                args.admission = Some(match it.next().as_deref() {
                    Some("cycle") => Admission::CycleBoundary,
                    Some("slice") => Admission::EverySlice,
                    _ => return Err(ArgsError::usage("--admission expects `cycle` or `slice`")),
                });
            }
            "--random" => {
                let seed = it
                    .next()
                    .and_then(|s| s.parse().ok())
                    .ok_or_else(|| ArgsError::usage("--random expects an integer seed"))?;
                if random_seen {
                    return Err(ArgsError::usage("--random given more than once"));
                }
                random_seen = true;
                args.input = Input::Random(seed);
            }
            "--trace" => args.trace = true,
            "-v" => args.verbosity = args.verbosity.max(1),
            "-vv" => args.verbosity = 2,
            "-" if !path_seen => path_seen = true,
            other if other.starts_with('-') && other != "-" => {
                return Err(ArgsError::usage(format!("unknown flag `{other}`")));
            }
            path if !path_seen => {
                path_seen = true;
                args.input = Input::File(PathBuf::from(path));
            }
            extra => return Err(ArgsError::usage(format!("unexpected argument `{extra}`"))),
        }
    }

    if path_seen && random_seen {
        return Err(ArgsError::usage(
            "--random generates its own input and cannot be combined with PATH or `-`",
        ));
    }

    Ok(args)
}

fn load(args: &Args) -> Result<SimConfig, ConfigError> {
    match &args.input {
        Input::Random(seed) => Ok(SimConfig {
            quanta: Quanta::new(RANDOM_TQ0, RANDOM_TQ1),
            admission: Admission::default(),
            processes: BernoulliWorkload::default().generate(*seed),
        }),
        Input::File(path) => match args.format {
            Some(format) => SimConfig::parse(&std::fs::read_to_string(path)?, format),
            None => SimConfig::load(path),
        },
        Input::Stdin => {
            let mut input = String::new();
            io::stdin().read_to_string(&mut input)?;
            SimConfig::parse(&input, args.format.unwrap_or(ConfigFormat::Legacy))
        }
    }
}

fn main() -> ExitCode {
    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(err) => return err.report(),
    };

    let level = match args.verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }

    let mut config = match load(&args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(1);
        }
    };
    if let Some(admission) = args.admission {
        config.admission = admission;
    }

    print!("{}", report::render_parsed_values(&config));

    let outcome = match Sim::new(config).run() {
        Ok(outcome) => outcome,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(1);
        }
    };

    if args.trace {
        print!("{}", report::render_events(&outcome));
    }
    println!("{}", report::render_gantt(&outcome.timeline));

    let metrics = process_metrics(&outcome);
    print!("{}", report::render_stats(&metrics, &summarize(&outcome, &metrics)));

    ExitCode::SUCCESS
}
