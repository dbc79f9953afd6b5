use std::path::PathBuf;

use chrono::Utc;

use crate::config::{self, ConfigError};
use crate::core_service::{CoreService, ServiceError};
use crate::logging;

#[derive(Debug)]
pub enum RuntimeError {
    Config(ConfigError),
    Service(ServiceError),
    Io(std::io::Error),
    Encode(String),
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(error) => write!(f, "config error: {error}"),
            Self::Service(error) => write!(f, "service error: {error}"),
            Self::Io(error) => write!(f, "io error: {error}"),
            Self::Encode(error) => write!(f, "encode error: {error}"),
        }
    }
}

impl std::error::Error for RuntimeError {}

impl From<ConfigError> for RuntimeError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<ServiceError> for RuntimeError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}

impl From<std::io::Error> for RuntimeError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Classify { query: String },
    Filter { query: String, candidates: Vec<String> },
    Clock,
    Serve,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeOptions {
    pub config_path: Option<PathBuf>,
    pub command: Command,
}

pub const USAGE: &str = "usage: spotlight-core [--config <path>] <classify <query>|filter <query> [candidate...]|clock|serve>";

pub fn parse_cli_args(args: &[String]) -> Result<RuntimeOptions, String> {
    let mut config_path = None;
    let mut rest = Vec::new();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| "--config requires a path".to_string())?;
                config_path = Some(PathBuf::from(value));
            }
            _ if arg.starts_with("--config=") => {
                config_path = Some(PathBuf::from(&arg["--config=".len()..]));
            }
            "-h" | "--help" => return Err(USAGE.to_string()),
            _ => rest.push(arg.clone()),
        }
    }

    let Some((name, operands)) = rest.split_first() else {
        return Err(USAGE.to_string());
    };

    let command = match name.as_str() {
        "classify" => Command::Classify {
            query: operands.join(" "),
        },
        "filter" => {
            let (query, candidates) = operands
                .split_first()
                .ok_or_else(|| "filter requires a query".to_string())?;
            Command::Filter {
                query: query.clone(),
                candidates: candidates.to_vec(),
            }
        }
        "clock" => Command::Clock,
        "serve" => Command::Serve,
        other => return Err(format!("unknown command '{other}'\n{USAGE}")),
    };

    Ok(RuntimeOptions {
        config_path,
        command,
    })
}

pub fn run_with_options(options: RuntimeOptions) -> Result<(), RuntimeError> {
    let config = config::load(options.config_path.as_deref())?;
    if let Err(error) = logging::init() {
        eprintln!("[spotlight-core] logging disabled: {error}");
    }
    logging::info(&format!(
        "startup config_path={} settings_path={}",
        config.config_path.display(),
        config.settings_path.display()
    ));

    let mut service = CoreService::new(config)?;

    match options.command {
        Command::Classify { query } => {
            let classification = service.classify(&query);
            logging::info(&format!("classified mode={}", classification.mode_name()));
            print_json(&classification)?;
        }
        Command::Filter { query, candidates } => {
            for matched in crate::fuzzy::fuzzy_filter(&query, &candidates) {
                println!("{matched}");
            }
        }
        Command::Clock => {
            print_json(&service.clock(Utc::now())?)?;
        }
        Command::Serve => {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            let handled =
                crate::transport::serve_lines(&mut service, stdin.lock(), stdout.lock())?;
            logging::info(&format!("serve finished requests={handled}"));
        }
    }

    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), RuntimeError> {
    let encoded =
        serde_json::to_string_pretty(value).map_err(|e| RuntimeError::Encode(e.to_string()))?;
    println!("{encoded}");
    Ok(())
}
