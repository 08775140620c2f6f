/// Command-line argument handling
///
/// Thread-safe storage of the process arguments plus flag helpers used by
/// the logger and the entry point. Binaries and tests can override the
/// arguments with `set_cmd_args`.
use std::env;
use std::sync::Mutex;

use once_cell::sync::Lazy;

/// Global command-line arguments storage
pub static CMD_ARGS: Lazy<Mutex<Vec<String>>> = Lazy::new(|| Mutex::new(env::args().collect()));

/// Override the stored arguments (tests, embedded use)
pub fn set_cmd_args(args: Vec<String>) {
    if let Ok(mut cmd_args) = CMD_ARGS.lock() {
        *cmd_args = args;
    }
}

/// Copy of the current arguments
pub fn get_cmd_args() -> Vec<String> {
    match CMD_ARGS.lock() {
        Ok(args) => args.clone(),
        Err(_) => env::args().collect(),
    }
}

/// Whether a specific flag is present
pub fn has_arg(arg: &str) -> bool {
    get_cmd_args().iter().any(|a| a == arg)
}

/// Value following a flag (`--config path.json` -> Some("path.json"))
pub fn get_arg_value(flag: &str) -> Option<String> {
    let args = get_cmd_args();
    for (i, arg) in args.iter().enumerate() {
        if arg == flag && i + 1 < args.len() {
            return Some(args[i + 1].clone());
        }
    }
    None
}

/// `--help` / `-h`
pub fn is_help_requested() -> bool {
    has_arg("--help") || has_arg("-h")
}

/// Webserver module debug mode
pub fn is_debug_webserver_enabled() -> bool {
    has_arg("--debug-webserver")
}

/// AI analysis debug mode
pub fn is_debug_ai_enabled() -> bool {
    has_arg("--debug-ai")
}

/// Print usage information
pub fn print_help() {
    println!("finsight - financial analytics backend");
    println!();
    println!("USAGE:");
    println!("    finsight [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    --config <path>      Config file path (default: config.json)");
    println!("    --port <port>        Override the webserver port");
    println!("    --debug-<module>     Enable debug logs for a module (ai, api, webserver, store)");
    println!("    --debug-all          Enable debug logs for all modules");
    println!("    --verbose            Enable verbose logs");
    println!("    --quiet              Only warnings and errors");
    println!("    -h, --help           Show this help");
}
