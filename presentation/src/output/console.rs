//! Console output formatter for generated duas

use colored::Colorize;
use duaonai_domain::DuaRecord;

/// Formats a [`DuaRecord`] for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete record
    pub fn format(record: &DuaRecord) -> String {
        let mut output = String::new();

        output.push_str(&Self::header(&record.title));
        output.push('\n');

        output.push_str(&format!("\n{}\n", Self::section("Arabic")));
        output.push_str(&format!("{}\n", record.arabic_text.bold()));

        output.push_str(&format!("\n{}\n", Self::section("English")));
        output.push_str(&format!("{}\n", record.english_translation));

        output.push_str(&format!("\n{}\n", Self::section("Urdu")));
        output.push_str(&format!("{}\n", record.urdu_translation));

        output.push_str(&format!(
            "\n{} {}\n",
            "Reference:".cyan().bold(),
            record.reference
        ));

        if let Some(note) = &record.note {
            output.push_str(&format!("\n{} {}\n", "Note:".yellow().bold(), note.yellow()));
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format as JSON
    pub fn format_json(record: &DuaRecord) -> String {
        serde_json::to_string_pretty(record).unwrap_or_else(|_| "{}".to_string())
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section(title: &str) -> String {
        format!("{}\n{}", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}
