use kpm_console::Reporter;
use std::thread;
use std::time::{Duration, Instant};

const LABEL_EVERY: Duration = Duration::from_millis(250);

/// Spin for `seconds`, relabelling the activity as time passes.
pub fn spin(reporter: &dyn Reporter, seconds: u64, text: &str) {
    let deadline = Duration::from_secs(seconds);
    let started = Instant::now();
    let mut activity = reporter.activity();
    tracing::debug!(interactive = activity.is_interactive(), seconds, "spin");

    activity.tick(text);
    while started.elapsed() < deadline {
        thread::sleep(LABEL_EVERY.min(deadline.saturating_sub(started.elapsed())));
        let elapsed = started.elapsed().as_secs_f64();
        activity.tick(&format!("{text} ({elapsed:.1}s)"));
    }
    activity.end();

    reporter.success(&format!("{text} done"));
}
