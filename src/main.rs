// beamview: lazy, paginated variables view for BEAM terms

use std::error::Error;
use std::fs::{self, File};
use std::io;
use std::path::Path;

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{LevelFilter, info};
use ratatui::{Terminal, backend::CrosstermBackend};

use beamview::inspector::InspectorConfig;
use beamview::inspector::constants::{MAX_CHILDREN_TO_SHOW, MAX_VALUE_LENGTH};
use beamview::reader::read_bindings;
use beamview::ui::{App, VariablesTree};

/// Environment variable naming the log file
const LOG_FILE_ENV: &str = "BEAMVIEW_LOG";

struct Options {
    path: String,
    batch_size: usize,
    max_value_length: usize,
}

fn usage(program_name: &str) {
    eprintln!(
        "Usage: {} <file.term> [--batch-size N] [--max-value-length N]",
        program_name
    );
    eprintln!();
    eprintln!("Options:");
    eprintln!(
        "  --batch-size N         Children loaded per expansion step (default {})",
        MAX_CHILDREN_TO_SHOW
    );
    eprintln!(
        "  --max-value-length N   Longest inline value before truncation (default {})",
        MAX_VALUE_LENGTH
    );
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} demos/sample.term", program_name);
    eprintln!("  {} demos/sample.term --batch-size 20", program_name);
    eprintln!();
    eprintln!("Set {}=<path> to write logs (filtered by RUST_LOG).", LOG_FILE_ENV);
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut path = None;
    let mut batch_size = MAX_CHILDREN_TO_SHOW;
    let mut max_value_length = MAX_VALUE_LENGTH;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--batch-size" | "--max-value-length" => {
                let value = iter
                    .next()
                    .ok_or_else(|| format!("Missing value for {}", arg))?;
                let number = value
                    .parse::<usize>()
                    .map_err(|_| format!("Invalid value '{}' for {}", value, arg))?;
                if arg == "--batch-size" {
                    batch_size = number;
                } else {
                    max_value_length = number;
                }
            }
            flag if flag.starts_with("--") => return Err(format!("Unknown option '{}'", flag)),
            file if path.is_none() => path = Some(file.to_string()),
            extra => return Err(format!("Unexpected argument '{}'", extra)),
        }
    }

    let path = path.ok_or_else(|| "No input file provided".to_string())?;
    Ok(Options {
        path,
        batch_size,
        max_value_length,
    })
}

/// Log to a file; stderr belongs to the alternate screen while the UI runs
fn init_logging() -> io::Result<()> {
    let Some(path) = std::env::var_os(LOG_FILE_ENV) else {
        return Ok(());
    };
    let file = File::create(path)?;
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("beamview");

    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("Error: {}", message);
            eprintln!();
            usage(program_name);
            std::process::exit(1);
        }
    };

    if !Path::new(&options.path).exists() {
        eprintln!("Error: File '{}' not found", options.path);
        usage(program_name);
        std::process::exit(1);
    }

    init_logging()?;

    let config = match InspectorConfig::new(options.batch_size, options.max_value_length) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let source = fs::read_to_string(&options.path)?;
    let bindings = match read_bindings(&source) {
        Ok(bindings) => bindings,
        Err(e) => {
            eprintln!("Error in {}: {}", options.path, e);
            std::process::exit(1);
        }
    };
    info!(
        "read {} binding(s) from {} (batch size {}, max value length {})",
        bindings.len(),
        options.path,
        config.max_children_to_show(),
        config.max_value_length()
    );

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(VariablesTree::new(bindings, config), options.path);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("beamview")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_defaults() {
        let options = parse_args(&args(&["vars.term"])).unwrap();
        assert_eq!(options.path, "vars.term");
        assert_eq!(options.batch_size, MAX_CHILDREN_TO_SHOW);
        assert_eq!(options.max_value_length, MAX_VALUE_LENGTH);
    }

    #[test]
    fn test_flags() {
        let options =
            parse_args(&args(&["--batch-size", "20", "vars.term", "--max-value-length", "80"]))
                .unwrap();
        assert_eq!(options.batch_size, 20);
        assert_eq!(options.max_value_length, 80);
    }

    #[test]
    fn test_errors() {
        assert!(parse_args(&args(&[])).is_err());
        assert!(parse_args(&args(&["a.term", "b.term"])).is_err());
        assert!(parse_args(&args(&["a.term", "--batch-size"])).is_err());
        assert!(parse_args(&args(&["a.term", "--batch-size", "x"])).is_err());
        assert!(parse_args(&args(&["a.term", "--verbose"])).is_err());
    }
}
