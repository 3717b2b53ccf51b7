//! Logging with timestamped, colored module prefixes.
//!
//! Provides the `log!` macro used everywhere in the binary:
//!
//! ```ignore
//! log!("watch"; "rebuilding {}", dir.display());
//! // [14:02:17] [watch] rebuilding bread/quickbreads
//! ```

use chrono::Local;
use colored::{ColoredString, Colorize};
use std::io::{Write, stderr};

/// Log a message with a colored module prefix.
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Write a timestamped log line to stderr.
pub fn log(module: &str, message: &str) {
    let timestamp = format!("[{}]", Local::now().format("%H:%M:%S")).dimmed();
    let prefix = colorize_prefix(module);

    let mut stderr = stderr().lock();
    writeln!(stderr, "{timestamp} {prefix} {message}").ok();
}

/// Apply color to a module prefix based on module type.
#[inline]
fn colorize_prefix(module: &str) -> ColoredString {
    let prefix = format!("[{module}]");
    match module {
        "watch" => prefix.bright_green().bold(),
        "error" => prefix.bright_red().bold(),
        _ => prefix.bright_yellow().bold(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colorize_prefix_brackets() {
        // The prefix always keeps the bracketed module name, whatever the
        // color layer adds around it.
        for module in ["build", "watch", "error"] {
            let colored = colorize_prefix(module).to_string();
            assert!(colored.contains(&format!("[{module}]")));
        }
    }
}
