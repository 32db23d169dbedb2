use owo_colors::OwoColorize;

/// Small wrapper around stdout/stderr printing to provide consistent, colored
/// user-facing messages. Colors are enabled only when output is a TTY.
fn stdout_is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

fn stderr_is_tty() -> bool {
    atty::is(atty::Stream::Stderr)
}

pub fn print_info(msg: &str) {
    if stdout_is_tty() {
        println!("{} {}", "info:".cyan().bold(), msg);
    } else {
        println!("info: {}", msg);
    }
}

pub fn print_warn(msg: &str) {
    if stderr_is_tty() {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {}", msg);
    }
}

pub fn print_error(msg: &str) {
    if stderr_is_tty() {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

/// Aligned `label = value` line for verbose reports.
pub fn print_detail(label: &str, value: &dyn std::fmt::Display) {
    if stdout_is_tty() {
        println!("{:<12} = {}", label.dimmed(), value);
    } else {
        println!("{:<12} = {}", label, value);
    }
}

/// Print a plain user-facing line (no prefix). Use this for primary outputs
/// such as "moved X to Y" which users may script against.
pub fn print_user(msg: &str) {
    println!("{}", msg);
}
