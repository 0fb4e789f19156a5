use clap::{Parser, Subcommand};
use linesift_core::config::AppConfig;
use linesift_core::{SearchService, SearchSource};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "linesift - load a text file and filter its lines", long_about = None)]
struct Args {
    /// Config file (default: ./linesift.toml|yaml|json when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the interactive viewer
    Start {
        /// File to load on startup
        #[arg(index = 1)]
        file: Option<PathBuf>,
    },
    /// Print the lines of FILE containing QUERY (case-insensitive)
    Filter {
        #[arg(index = 1)]
        file: PathBuf,
        #[arg(index = 2)]
        query: String,
        /// Prefix each line with its line number
        #[arg(short = 'n', long)]
        line_numbers: bool,
        /// Emit a JSON document instead of plain lines
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(interactive: bool, app_root: &Path) -> WorkerGuard {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if interactive {
        // TUI mode: log to file, the terminal belongs to the viewer
        let log_file = app_root.join("linesift.log");
        let file = std::fs::create_dir_all(app_root).and_then(|_| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&log_file)
        });
        let (non_blocking, guard) = match file {
            Ok(file) => tracing_appender::non_blocking(file),
            Err(_) => tracing_appender::non_blocking(std::io::sink()),
        };
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(non_blocking)
            .with_ansi(false)
            .init();
        guard
    } else {
        // CLI mode: stdout carries the results
        let (non_blocking, guard) = tracing_appender::non_blocking(std::io::stderr());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(non_blocking)
            .with_ansi(true)
            .init();
        guard
    }
}

/// Loads `file`, runs one search and renders the matches for stdout.
fn filter_output(
    file: &Path,
    query: &str,
    source: SearchSource,
    line_numbers: bool,
    json: bool,
) -> anyhow::Result<String> {
    let mut service = SearchService::new(source);
    service.load(file)?;
    let result = service.search(query)?;

    if json {
        let doc = serde_json::json!({
            "path": file.display().to_string(),
            "query": result.query,
            "matches": result.matches,
        });
        return Ok(serde_json::to_string_pretty(&doc)?);
    }

    let lines: Vec<String> = result
        .matches
        .iter()
        .map(|m| {
            if line_numbers {
                format!("{}:{}", m.number, m.text)
            } else {
                m.text.clone()
            }
        })
        .collect();
    Ok(lines.join("\n"))
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match AppConfig::load(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("❌ Error: Configuration invalid: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let command = args.command.unwrap_or(Commands::Start { file: None });
    let interactive = matches!(command, Commands::Start { .. });
    // flushes buffered log lines when dropped at the end of main
    let _guard = init_logging(interactive, &config.app_root);

    linesift_core::init();

    match command {
        Commands::Start { file } => match linesift_tui::run(config, file) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                error!("viewer failed: {}", e);
                eprintln!("TUI Error: {}", e);
                ExitCode::FAILURE
            }
        },
        Commands::Filter { file, query, line_numbers, json } => {
            let line_numbers = line_numbers || config.line_numbers;
            match filter_output(&file, &query, config.search_source, line_numbers, json) {
                Ok(out) => {
                    if !out.is_empty() {
                        println!("{}", out);
                    }
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    error!("filter failed: {}", e);
                    eprintln!("Error: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::fs;

    fn fruit_file(dir: &tempfile::TempDir) -> PathBuf {
        let path = dir.path().join("fruit.txt");
        fs::write(&path, "Apple\nbanana\nGrape\npineapple\n").unwrap();
        path
    }

    #[test]
    fn cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn filter_args_parse() {
        let args = Args::parse_from(["linesift", "filter", "log.txt", "error", "-n", "--json"]);
        match args.command {
            Some(Commands::Filter { file, query, line_numbers, json }) => {
                assert_eq!(file, PathBuf::from("log.txt"));
                assert_eq!(query, "error");
                assert!(line_numbers);
                assert!(json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn no_subcommand_starts_viewer() {
        let args = Args::parse_from(["linesift"]);
        assert!(args.command.is_none());
        let args = Args::parse_from(["linesift", "start", "notes.txt"]);
        assert!(matches!(args.command, Some(Commands::Start { file: Some(_) })));
    }

    #[test]
    fn plain_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = fruit_file(&dir);
        let out = filter_output(&path, "apple", SearchSource::Memory, false, false).unwrap();
        assert_eq!(out, "Apple\npineapple");

        let numbered = filter_output(&path, "apple", SearchSource::Memory, true, false).unwrap();
        assert_eq!(numbered, "1:Apple\n4:pineapple");
    }

    #[test]
    fn json_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = fruit_file(&dir);
        let out = filter_output(&path, " GRAPE ", SearchSource::Disk, false, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["query"], "GRAPE");
        assert_eq!(value["matches"][0]["number"], 3);
        assert_eq!(value["matches"][0]["text"], "Grape");
        assert_eq!(value["matches"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn errors_surface_service_messages() {
        let dir = tempfile::tempdir().unwrap();
        let err = filter_output(&dir.path().join("nope.txt"), "x", SearchSource::Memory, false, false)
            .unwrap_err();
        assert!(err.to_string().starts_with("Error loading file"));

        let path = fruit_file(&dir);
        let err = filter_output(&path, "   ", SearchSource::Memory, false, false).unwrap_err();
        assert_eq!(err.to_string(), "Please enter a search string.");
    }
}
