//! Terminal output helpers: colors, spinners, and the generation progress
//! bar fed by the orchestrator's progress callback.

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use parking_lot::Mutex;

/// RGB tuple constants for use with the `colored` crate's `.truecolor()` method
pub mod rgb {
    pub const NEON_CYAN: (u8, u8, u8) = (128, 255, 234);
    pub const ELECTRIC_YELLOW: (u8, u8, u8) = (241, 250, 140);
    pub const SUCCESS_GREEN: (u8, u8, u8) = (80, 250, 123);
    pub const ERROR_RED: (u8, u8, u8) = (255, 99, 99);
    pub const DIM_WHITE: (u8, u8, u8) = (180, 180, 190);
}

/// Track quiet mode state
static QUIET_MODE: std::sync::LazyLock<Mutex<bool>> =
    std::sync::LazyLock::new(|| Mutex::new(false));

/// Enable or disable quiet mode
pub fn set_quiet_mode(enabled: bool) {
    let mut quiet_mode = QUIET_MODE.lock();
    *quiet_mode = enabled;
}

/// Check if quiet mode is enabled
pub fn is_quiet_mode() -> bool {
    *QUIET_MODE.lock()
}

/// Progress bar for the section fan-out; one tick per completed section
pub fn create_section_progress(total: u64) -> ProgressBar {
    if is_quiet_mode() {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40.bright_cyan/dim} {pos}/{len} {msg}")
            .expect("Could not set progress bar style")
            .progress_chars("━╸─"),
    );
    pb
}

pub fn print_success(message: &str) {
    let (r, g, b) = rgb::SUCCESS_GREEN;
    println!("{}", message.truecolor(r, g, b));
}

pub fn print_error(message: &str) {
    let (r, g, b) = rgb::ERROR_RED;
    eprintln!("{}", message.truecolor(r, g, b));
}

pub fn print_warning(message: &str) {
    let (r, g, b) = rgb::ELECTRIC_YELLOW;
    println!("{}", message.truecolor(r, g, b));
}

pub fn print_info(message: &str) {
    let (r, g, b) = rgb::NEON_CYAN;
    println!("{}", message.truecolor(r, g, b));
}

pub fn print_dim(message: &str) {
    let (r, g, b) = rgb::DIM_WHITE;
    println!("{}", message.truecolor(r, g, b));
}

pub fn print_version(version: &str) {
    println!(
        "{} {}",
        "paperforge".truecolor(128, 255, 234).bold(),
        version.truecolor(241, 250, 140)
    );
}
