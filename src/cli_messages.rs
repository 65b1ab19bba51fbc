//! CLI command messaging
//!
//! Colored one-line status messages for `config` and `start`. Warnings and
//! errors go to stderr so headless output on stdout stays clean.

fn print_tagged(tag: &str, title: &str, details: &str) {
    if details.is_empty() {
        println!("{} {}", tag, title);
    } else {
        println!("{} {}\t {}", tag, title, details);
    }
}

/// Print CLI command info message
pub fn print_info(title: &str, details: &str) {
    print_tagged("\x1b[1;33m[INFO]\x1b[0m", title, details);
}

/// Print CLI command success
pub fn print_success(title: &str, details: &str) {
    print_tagged("\x1b[1;32m[SUCCESS]\x1b[0m", title, details);
}

/// Print CLI command warn message
pub fn print_warn(title: &str, details: &str) {
    if details.is_empty() {
        eprintln!("\x1b[1;91m[WARN]\x1b[0m {}", title);
    } else {
        eprintln!("\x1b[1;91m[WARN]\x1b[0m {}\t {}", title, details);
    }
}

/// Print CLI command error
pub fn print_error(title: &str, details: Option<&str>) {
    eprintln!("\x1b[1;31m[ERROR]\x1b[0m {}", title);
    if let Some(details) = details {
        eprintln!("\x1b[1;31m[ERROR]\x1b[0m Details: {}", details);
    }
}

#[macro_export]
macro_rules! print_cmd_info {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_info($title, &format!($($details)*))
    };
}

#[macro_export]
macro_rules! print_cmd_warn {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_warn($title, &format!($($details)*))
    };
}

#[macro_export]
macro_rules! print_cmd_error {
    ($title:expr) => {
        $crate::cli_messages::print_error($title, None)
    };
    ($title:expr, $details:expr) => {
        $crate::cli_messages::print_error($title, Some($details))
    };
}

#[macro_export]
macro_rules! print_cmd_success {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_success($title, &format!($($details)*))
    };
}
