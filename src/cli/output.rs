//! Colored output helpers for CLI
//!
//! Provides consistent, colored terminal output for the VitaHealth client.

use owo_colors::OwoColorize;
use std::io::{self, Write};
use vitahealth_core::flows::{Modal, Tone};

/// Output style configuration
pub struct Output {
    /// Whether to use colored output
    pub colored: bool,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    /// Create a new output helper with colors enabled
    pub fn new() -> Self {
        Self { colored: true }
    }

    /// Create a new output helper with colors disabled
    pub fn no_color() -> Self {
        Self { colored: false }
    }

    /// Print the brand line
    pub fn banner(&self) {
        if self.colored {
            println!(
                "\n  {} {}\n",
                "VitaHealth".bright_green().bold(),
                format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
            );
        } else {
            println!("\n  VitaHealth v{}\n", env!("CARGO_PKG_VERSION"));
        }
    }

    /// Print a success message with a checkmark
    pub fn success(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "✓".green().bold(), message.green());
        } else {
            println!("  [OK] {}", message);
        }
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "•".blue(), message);
        } else {
            println!("  [INFO] {}", message);
        }
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "⚠".yellow().bold(), message.yellow());
        } else {
            println!("  [WARN] {}", message);
        }
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        if self.colored {
            eprintln!("  {} {}", "✗".red().bold(), message.red());
        } else {
            eprintln!("  [ERROR] {}", message);
        }
    }

    /// Render a page modal as a titled message
    pub fn modal(&self, modal: &Modal) {
        let line = format!("{}: {}", modal.title, modal.message);
        match modal.tone {
            Tone::Success => self.success(&line),
            Tone::Warning => self.warning(&line),
            Tone::Error => self.error(&line),
        }
    }

    /// Print a header for a section
    pub fn header(&self, title: &str) {
        if self.colored {
            println!("\n  {}", title.bright_white().bold().underline());
        } else {
            println!("\n  === {} ===", title);
        }
    }

    /// Print a subheader
    pub fn subheader(&self, title: &str) {
        if self.colored {
            println!("\n  {}", title.cyan().bold());
        } else {
            println!("\n  --- {} ---", title);
        }
    }

    /// Print a key-value pair
    pub fn kv(&self, key: &str, value: &str) {
        if self.colored {
            println!("    {}: {}", key.dimmed(), value.bright_white());
        } else {
            println!("    {}: {}", key, value);
        }
    }

    /// Print a list item
    pub fn list_item(&self, item: &str) {
        if self.colored {
            println!("    {} {}", "•".blue(), item);
        } else {
            println!("    - {}", item);
        }
    }

    /// Print a checklist line
    pub fn check_item(&self, done: bool, item: &str) {
        match (self.colored, done) {
            (true, true) => println!("  {} {}", "[x]".green().bold(), item.dimmed()),
            (true, false) => println!("  {} {}", "[ ]".dimmed(), item.bright_white().bold()),
            (false, true) => println!("  [x] {}", item),
            (false, false) => println!("  [ ] {}", item),
        }
    }

    /// Print a meal line, colored by meal type
    pub fn meal(&self, meal_type: &str, food: &str) {
        if !self.colored {
            println!("      {:<10} {}", meal_type, food);
            return;
        }
        let label = format!("{:<10}", meal_type);
        let label = match meal_type.to_ascii_lowercase().as_str() {
            "breakfast" => label.blue().to_string(),
            "lunch" => label.yellow().to_string(),
            "dinner" => label.green().to_string(),
            "snack" => label.magenta().to_string(),
            _ => label.dimmed().to_string(),
        };
        println!("      {} {}", label, food);
    }

    /// Print a progress bar with its percentage
    pub fn progress(&self, done: usize, total: usize, percent: u8) {
        const WIDTH: usize = 20;
        let filled = (usize::from(percent) * WIDTH + 50) / 100;
        let bar = format!("{}{}", "#".repeat(filled), "-".repeat(WIDTH - filled.min(WIDTH)));
        if self.colored {
            println!(
                "  {} {} {}",
                format!("[{}]", bar).green(),
                format!("{}%", percent).bright_white().bold(),
                format!("({}/{} days)", done, total).dimmed()
            );
        } else {
            println!("  [{}] {}% ({}/{} days)", bar, percent, done, total);
        }
    }

    /// Print a hint/tip message
    pub fn hint(&self, message: &str) {
        if self.colored {
            println!("\n  {} {}", "💡".dimmed(), message.dimmed().italic());
        } else {
            println!("\n  [TIP] {}", message);
        }
    }

    /// Print a command suggestion
    pub fn command(&self, cmd: &str) {
        if self.colored {
            println!("     {}", format!("$ {}", cmd).bright_cyan());
        } else {
            println!("     $ {}", cmd);
        }
    }

    /// Prompt for confirmation (returns true if user confirms)
    pub fn confirm(&self, message: &str) -> bool {
        if self.colored {
            print!(
                "  {} {} [y/N]: ",
                "?".bright_yellow().bold(),
                message.bright_white()
            );
        } else {
            print!("  [?] {} [y/N]: ", message);
        }

        io::stdout().flush().ok();

        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_ok() {
            let input = input.trim().to_lowercase();
            input == "y" || input == "yes"
        } else {
            false
        }
    }

    /// Print a table header row
    pub fn table_header(&self, columns: &[&str]) {
        let header: String = columns
            .iter()
            .map(|c| format!("{:<22}", c))
            .collect::<Vec<_>>()
            .join(" ");
        if self.colored {
            println!("    {}", header.bright_white().bold());
            println!("    {}", "─".repeat(columns.len() * 23).dimmed());
        } else {
            println!("    {}", header);
            println!("    {}", "-".repeat(columns.len() * 23));
        }
    }

    /// Print a table row
    pub fn table_row(&self, values: &[&str]) {
        let row: String = values
            .iter()
            .map(|v| format!("{:<22}", v))
            .collect::<Vec<_>>()
            .join(" ");
        println!("    {}", row);
    }

    /// Print newline
    pub fn newline(&self) {
        println!();
    }
}
