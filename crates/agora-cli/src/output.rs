//! Terminal output helpers.

use colored::Colorize;

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

pub fn print_field(label: &str, value: impl std::fmt::Display) {
    println!("  {:<18} {}", label.dimmed(), value);
}

pub fn print_heading(text: &str) {
    println!("{}", text.bold());
}
