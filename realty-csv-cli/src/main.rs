mod console;
mod report;

use std::path::{self, PathBuf};
use std::process::ExitCode;

use atty::Stream;
use clap::Parser;
use realty_csv::{
    ConvertOptions, Converter, Error,
    options::{DEFAULT_INPUT_DIR, DEFAULT_INPUT_PATTERN, DEFAULT_OUTPUT_DIR},
};

use crate::console::Console;
use crate::report::{print_error_json, print_report_json, print_summary};

/// Converts real-estate transaction XML extracts into semicolon-delimited CSV tables.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory scanned for *.xml extracts (created if missing)
    #[arg(long, default_value = DEFAULT_INPUT_DIR)]
    input_dir: PathBuf,

    /// Directory receiving the CSV tables (created if missing)
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// File name glob selecting the extracts, matched case-insensitively
    #[arg(long, default_value = DEFAULT_INPUT_PATTERN)]
    input_pattern: String,

    /// Do not wait for ENTER before and after the conversion
    #[arg(long)]
    no_pause: bool,

    /// Print the run report as JSON instead of progress lines
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let console = Console::new(!args.no_pause && atty::is(Stream::Stdin), args.json);
    let options = ConvertOptions::new()
        .with_input_dir(absolute(args.input_dir))
        .with_output_dir(absolute(args.output_dir))
        .with_input_pattern(args.input_pattern);

    if let Err(e) = options.ensure_dirs() {
        fail(&console, args.json, &e);
        return ExitCode::FAILURE;
    }

    console.say(format!(
        "1. Положите XML-файлы в папку {}.",
        options.input_dir.display()
    ));
    console.say("2. Нажмите ENTER для продолжения.");
    console.pause();

    let converter = Converter::new(options);
    match converter.run(|event| console.progress(&event)) {
        Ok(report) => {
            if args.json {
                print_report_json(&report);
            } else {
                print_summary(&report);
            }
            console.say("Ready! Press key Enter ...");
            console.pause();
            ExitCode::SUCCESS
        }
        Err(e) => {
            match &e {
                Error::NoInputFiles(_) if !args.json => {
                    console.say("\nОшибка! XML-файлов не обнаружено");
                }
                // already shown on the progress line of the failed file
                Error::File { .. } if !args.json => {}
                _ => fail(&console, args.json, &e),
            }
            console.pause();
            ExitCode::FAILURE
        }
    }
}

fn fail(console: &Console, json: bool, error: &Error) {
    if json {
        print_error_json(error);
    } else {
        console.say(format!("Ошибка! {}", error));
    }
}

/// Resolves `dir` against the working directory so prompts show where to put files.
fn absolute(dir: PathBuf) -> PathBuf {
    path::absolute(&dir).unwrap_or(dir)
}
