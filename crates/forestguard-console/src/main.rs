use std::collections::HashMap;
use std::error::Error;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use forestguard_console::{
    ConsoleApp, MockDataSource, Verbosity, init_subscriber, set_terminal_owned,
};
use forestguard_core::tracing_config::span_names;
use forestguard_core::{emit_config_loaded, load_from_sources};
use forestguard_tui::InputEvent;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::info;

struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalGuard {
    fn enter() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        set_terminal_owned(true);
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        );
        let _ = self.terminal.show_cursor();
        set_terminal_owned(false);
    }
}

#[derive(Debug, Default, Clone)]
struct RuntimeOptions {
    config: Option<PathBuf>,
    log_file: Option<PathBuf>,
    verbose: bool,
    quiet: bool,
}

fn parse_runtime_options() -> Result<RuntimeOptions, Box<dyn Error>> {
    let mut options = RuntimeOptions::default();
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => options.config = Some(path_argument(&mut args, "--config")?),
            "--log-file" => options.log_file = Some(path_argument(&mut args, "--log-file")?),
            "-v" | "--verbose" => options.verbose = true,
            "-q" | "--quiet" => options.quiet = true,
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            other => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("unknown argument: {other}"),
                )
                .into());
            }
        }
    }
    Ok(options)
}

fn path_argument(args: &mut impl Iterator<Item = String>, flag: &str) -> io::Result<PathBuf> {
    args.next().map(PathBuf::from).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{flag} requires a filesystem path argument"),
        )
    })
}

fn print_help() {
    println!("forestguard");
    println!();
    println!("Usage:");
    println!("  forestguard [--config <path>] [-v|--verbose] [-q|--quiet] [--log-file <path>]");
    println!();
    println!("Flags:");
    println!("  --config <path>    Read settings from this TOML file");
    println!("  --log-file <path>  Append diagnostics to this file");
    println!("  -v, --verbose      Debug-level diagnostics");
    println!("  -q, --quiet        Errors only");
    println!("  -h, --help         Show this help message");
    println!();
    println!("Environment:");
    println!("  FORESTGUARD_LOG=<directives>      overrides RUST_LOG and -v/-q");
    println!("  FORESTGUARD_LOG_LEVEL=<level>     base level when no flag is given");
    println!("  FORESTGUARD_HIT_TOLERANCE=<f64>");
    println!("  FORESTGUARD_MAX_QUERY_LEN=<n>");
    println!("  FORESTGUARD_THEME=dark|light");
    println!("  FORESTGUARD_REPORTING_YEAR=<year>");
    println!("  FORESTGUARD_TICK_RATE_MS=<ms>");
}

fn main() -> Result<(), Box<dyn Error>> {
    let options = parse_runtime_options()?;
    init_subscriber(
        Verbosity::from_flags(options.verbose, options.quiet),
        options.log_file.as_deref(),
    )?;

    let env: HashMap<String, String> = std::env::vars().collect();
    let home = std::env::var_os("HOME").map_or_else(|| PathBuf::from("."), PathBuf::from);
    let loaded = load_from_sources(options.config.as_deref(), &env, &home)?;
    emit_config_loaded(&loaded);
    let config = loaded.config;

    let mut app = ConsoleApp::from_source(&MockDataSource::sample(), &config)?;
    let mut terminal = TerminalGuard::enter()?;
    info!(target: span_names::CONSOLE, "console started");

    let tick = Duration::from_millis(config.tick_rate_ms);
    loop {
        terminal.terminal.draw(|frame| app.render(frame))?;
        if event::poll(tick)?
            && let Some(input) = InputEvent::from_crossterm(event::read()?)
            && app.handle_input(&input)
        {
            break;
        }
    }

    info!(target: span_names::CONSOLE, "console stopped");
    Ok(())
}
