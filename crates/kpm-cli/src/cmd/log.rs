use kpm_console::Reporter;

/// Print one line of every kind, in the order a real command would.
pub fn log(reporter: &dyn Reporter, message: &str) {
    reporter.header("log");
    reporter.step(1, 2, "Logging to stdout");
    reporter.log(message);
    reporter.info(message);
    reporter.success(message);
    reporter.command(&format!("echo {message}"));
    reporter.step(2, 2, "Logging to stderr");
    reporter.warn(message);
    reporter.error(message);
    reporter.footer(true);
}
