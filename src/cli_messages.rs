//! Console output for one-shot commands
//!
//! Tagged status lines plus plain rendering of collaborator replies.

use crate::network::ApiResponse;

const INFO: &str = "\x1b[1;33m[INFO]\x1b[0m";
const WARN: &str = "\x1b[1;91m[WARN]\x1b[0m";
const ERROR: &str = "\x1b[1;31m[ERROR]\x1b[0m";
const SUCCESS: &str = "\x1b[1;32m[SUCCESS]\x1b[0m";

fn print_tagged(tag: &str, title: &str, details: &str) {
    if details.is_empty() {
        println!("{} {}", tag, title);
    } else {
        println!("{} {}\t {}", tag, title, details);
    }
}

pub fn print_info(title: &str, details: &str) {
    print_tagged(INFO, title, details);
}

pub fn print_warn(title: &str, details: &str) {
    print_tagged(WARN, title, details);
}

/// Errors go to stderr so that piped output stays parseable.
pub fn print_error(title: &str, details: Option<&str>) {
    eprintln!("{} {}", ERROR, title);
    if let Some(details) = details {
        eprintln!("{} Details: {}", ERROR, details);
    }
}

pub fn print_success(title: &str, details: &str) {
    print_tagged(SUCCESS, title, details);
}

/// Prints a reply the way the dashboard shows it: status line, then the body.
pub fn print_response(action: &str, response: &ApiResponse) {
    if response.ok {
        print_success(action, &format!("HTTP {}", response.status));
    } else {
        print_warn(action, &format!("HTTP {}", response.status));
    }
    if response.is_raw() {
        println!("{}", response.body_text());
    } else if let Ok(pretty) = serde_json::to_string_pretty(&response.data) {
        println!("{}", pretty);
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
