use realty_csv::{ConversionReport, Error};
use serde_json::json;

/// Prints a finished run as pretty JSON.
pub fn print_report_json(report: &ConversionReport) {
    match serde_json::to_string_pretty(report) {
        Ok(body) => println!("{}", body),
        Err(e) => eprintln!("Error: failed to serialize report: {}", e),
    }
}

/// Prints a failed run as JSON: `{"error": ..., "file": ...}`.
pub fn print_error_json(error: &Error) {
    let file = match error {
        Error::File { path, .. } => Some(path.display().to_string()),
        _ => None,
    };
    let body = json!({
        "error": error.root().to_string(),
        "file": file,
    });
    println!("{}", body);
}

/// Human-readable closing summary.
pub fn print_summary(report: &ConversionReport) {
    println!(
        "\nГотово! Файлов: {}, строк: {}.",
        report.files.len(),
        report.rows.total()
    );
    for output in &report.outputs {
        println!("  -> {}", output.display());
    }
}
