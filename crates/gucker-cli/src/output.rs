//! Terminal output for the CLI commands
//!
//! Commands report through [`Output`], which renders either
//! human-readable lines or one JSON object per message depending on the
//! global `--json` flag. Errors always go to stderr.

/// Output format selector
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Renders command results in the selected format
pub struct Output {
    format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    #[must_use]
    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Reports a successful outcome
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("\u{2713} {}", message),
            OutputFormat::Json => println!(
                "{}",
                serde_json::json!({"success": true, "message": message})
            ),
        }
    }

    /// Reports a failure to stderr
    pub fn error(&self, message: &str) {
        match self.format {
            OutputFormat::Human => eprintln!("\u{2717} Error: {}", message),
            OutputFormat::Json => eprintln!(
                "{}",
                serde_json::json!({"success": false, "error": message})
            ),
        }
    }

    /// Prints an indented detail line; suppressed in JSON mode, where
    /// commands emit structured records instead
    pub fn info(&self, message: &str) {
        if self.format == OutputFormat::Human {
            println!("  {}", message);
        }
    }

    /// Prints a structured record; suppressed in human mode
    pub fn print_json(&self, value: &serde_json::Value) {
        if self.format == OutputFormat::Json {
            println!(
                "{}",
                serde_json::to_string_pretty(value).unwrap_or_default()
            );
        }
    }
}
