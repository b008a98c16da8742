use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

const TICKS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Spinner for one step against the cluster. Draws nothing when stderr is not a terminal.
pub fn stage_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(TICKS)
            .template("{spinner} {msg} {elapsed:.dim}")
            .expect("invalid spinner template"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

pub fn finish_spinner(pb: &ProgressBar, success: bool) {
    pb.set_style(ProgressStyle::with_template("{msg}").expect("invalid spinner template"));
    if success {
        pb.finish_with_message(format!("✓ {}", pb.message()));
    } else {
        pb.finish_with_message(format!("✗ {}", pb.message()));
    }
}

/// Finish a spinner with the reason the step failed.
pub fn fail_spinner(pb: &ProgressBar, reason: &str) {
    pb.set_message(format!("{}: {reason}", pb.message()));
    finish_spinner(pb, false);
}
