use kpm_console::Reporter;
use std::thread;
use std::time::Duration;

/// Tick a progress bar `total` times.
pub fn progress(reporter: &dyn Reporter, total: u64, delay_ms: u64) {
    let delay = Duration::from_millis(delay_ms);
    let mut bar = reporter.progress(total);
    tracing::debug!(total, enabled = bar.is_enabled(), "progress");

    for _ in 0..total {
        if !delay.is_zero() {
            thread::sleep(delay);
        }
        bar.tick();
    }

    reporter.success(&format!("{total} ticks"));
}
