use std::io::IsTerminal;

use crate::cli::OutputFormat;
use crate::error::AppError;
use crate::hardware::types::HardwareSnapshot;
use crate::render::render_snapshot;

pub fn format_data(snapshot: &HardwareSnapshot, format: OutputFormat, color: bool) -> Result<String, AppError> {
    let text = match format {
        OutputFormat::Json => serde_json::to_string_pretty(snapshot)? + "\n",
        OutputFormat::Yaml => serde_yaml::to_string(snapshot)?,
        OutputFormat::Pretty => render_snapshot(snapshot, color),
    };
    Ok(text)
}

pub fn output_data(snapshot: &HardwareSnapshot, format: OutputFormat) -> Result<(), AppError> {
    let color = std::io::stdout().is_terminal();
    print!("{}", format_data(snapshot, format, color)?);
    Ok(())
}

pub fn print_error(message: &str) {
    eprintln!("\x1b[31m❌ Error: {}\x1b[0m", message);
}
