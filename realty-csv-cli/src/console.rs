use std::io::{self, BufRead, Write};

use realty_csv::Progress;

/// Operator-facing console output and the ENTER prompts.
pub struct Console {
    interactive: bool,
    quiet: bool,
}

impl Console {
    /// `interactive` enables the ENTER prompts; `quiet` silences progress lines
    /// (used when the report is printed as JSON).
    pub fn new(interactive: bool, quiet: bool) -> Self {
        Self { interactive, quiet }
    }

    pub fn say(&self, line: impl AsRef<str>) {
        if !self.quiet {
            println!("{}", line.as_ref());
        }
    }

    /// Blocks until the operator presses ENTER. No-op outside a terminal.
    pub fn pause(&self) {
        if !self.interactive {
            return;
        }
        let _ = io::stdout().flush();
        let mut line = String::new();
        if let Err(e) = io::stdin().lock().read_line(&mut line) {
            log::warn!("Failed to read from stdin: {}", e);
        }
    }

    pub fn progress(&self, event: &Progress<'_>) {
        match event {
            Progress::Converting { index, path, .. } => {
                if *index == 0 {
                    self.say("\nКонвертируем файлы:");
                }
                self.say(format!("  {} ...", path.display()));
            }
            Progress::Converted { .. } => self.say("  ... ok"),
            Progress::Failed { error, .. } => {
                self.say(format!("  ... Ошибка! {}", error.root()));
            }
        }
    }
}
