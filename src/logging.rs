use chrono::{ DateTime, Local };
use log::Level;
use std::fmt::Arguments;
use std::fs::File;
use std::io::Write;

use crate::cli::Args;
use crate::error::{ ClientError, Result };

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn format_line(timestamp: DateTime<Local>, level: Level, args: &Arguments<'_>) -> String {
    format!("{} {}: {}", timestamp.format(TIMESTAMP_FORMAT), level, args)
}

/// Installs the global logger. `RUST_LOG` still overrides the default level.
/// With a log file the file is truncated, one record per line.
pub fn init(args: &Args) -> Result<()> {
    let default_level = if args.debug { "debug" } else { "info" };
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_level)
    );

    if let Some(path) = &args.log_file {
        let file = File::create(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
        builder.format(|buf, record| {
            writeln!(buf, "{}", format_line(Local::now(), record.level(), record.args()))
        });
    }

    builder.try_init().map_err(|e| ClientError::Config(format!("logger already set: {}", e)))
}
