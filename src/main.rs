mod app;
mod help;
mod hooks;
mod moon;
mod theme;
mod widget;
use crate::app::App;
use crate::hooks::{Annotations, DateBounds};
use anyhow::Context;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};
use flexi_logger::{FileSpec, Logger, LoggerHandle};
use lexopt::{Arg, Parser, ValueExt};
use monthpick::{CalendarDate, CalendarState};
use ratatui::{DefaultTerminal, style::Color};
use std::io::Write;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;

const DEFAULT_LOG_LEVEL: &str = if cfg!(debug_assertions) {
    "debug"
} else {
    "info"
};

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(RunOptions),
    Help,
    Version,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct RunOptions {
    start: Option<CalendarDate>,
    annotations: Annotations,
    dot_color: Option<Color>,
    bounds: DateBounds,
    log_file: Option<PathBuf>,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut opts = RunOptions::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Long("dot") => {
                    opts.annotations.dates.insert(parser.value()?.parse()?);
                }
                Arg::Long("moon") => opts.annotations.moon = true,
                Arg::Long("dot-color") => opts.dot_color = Some(parser.value()?.parse()?),
                Arg::Long("min") => opts.bounds.min = Some(parser.value()?.parse()?),
                Arg::Long("max") => opts.bounds.max = Some(parser.value()?.parse()?),
                Arg::Long("no-weekends") => opts.bounds.no_weekends = true,
                Arg::Long("log-file") => opts.log_file = Some(parser.value()?.into()),
                Arg::Value(value) if opts.start.is_none() => opts.start = Some(value.parse()?),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(opts))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(opts) => {
                let _logger = opts.log_file.as_deref().map(init_logging).transpose()?;
                let now = OffsetDateTime::now_local().context("failed to determine local date")?;
                let today = CalendarDate::try_from(now).context("today is out of range")?;
                let start = opts.start.unwrap_or(today);
                log::info!("Starting at {start}; today is {today}");
                let mut app = App::new(CalendarState::new(start), today)
                    .bounds(opts.bounds)
                    .annotations(opts.annotations);
                if let Some(color) = opts.dot_color {
                    app = app.dot_color(color);
                }
                with_terminal(|terminal| {
                    app.run(terminal)?;
                    Ok(())
                })
            }
            Command::Help => {
                println!("Usage: monthpick [<options>] [YYYY-MM-DD]");
                println!();
                println!("Single-month terminal date picker");
                println!();
                println!("Options:");
                println!("  --dot YYYY-MM-DD     Mark the given date with a dot (repeatable)");
                println!("  --moon               Mark NetHack's new & full moons with dots");
                println!("  --dot-color COLOR    Draw dots in the given color [default: red]");
                println!("  --min YYYY-MM-DD     Refuse to select dates before this one");
                println!("  --max YYYY-MM-DD     Refuse to select dates after this one");
                println!("  --no-weekends        Refuse to select Saturdays & Sundays");
                println!("  --log-file PATH      Write logs to the given file");
                println!("  -h, --help           Display this help message and exit");
                println!("  -V, --version        Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

/// The terminal belongs to the UI, so logs only go anywhere when a file is
/// given.  The level comes from `RUST_LOG` if set.
fn init_logging(path: &Path) -> anyhow::Result<LoggerHandle> {
    Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)?
        .log_to_file(FileSpec::try_from(path)?)
        .start()
        .context("failed to start logger")
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = execute!(std::io::stdout(), EnableMouseCapture)
        .context("failed to enable mouse capture")
        .and_then(|()| func(terminal));
    release_mouse(&mut std::io::stdout());
    ratatui::restore();
    r
}

/// Teardown keeps going if this fails, so the error is only logged
fn release_mouse<W: Write>(out: &mut W) {
    if let Err(e) = execute!(out, DisableMouseCapture) {
        log::warn!("Failed to disable mouse capture: {e}");
    }
}
