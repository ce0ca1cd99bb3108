use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// Test context with an isolated kpm home
struct TestContext {
    temp_dir: TempDir,
    kpm_home: PathBuf,
}

impl TestContext {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let kpm_home = temp_dir.path().join(".kpm");
        std::fs::create_dir_all(&kpm_home).expect("failed to create kpm home");
        Self { temp_dir, kpm_home }
    }

    fn write_config(&self, content: &str) {
        std::fs::write(self.kpm_home.join("console.toml"), content)
            .expect("failed to write config");
    }

    fn kpm_cmd(&self) -> Command {
        let bin_path = env!("CARGO_BIN_EXE_kpm");
        let mut cmd = Command::new(bin_path);
        cmd.env("HOME", self.temp_dir.path());
        cmd.env("KPM_HOME", &self.kpm_home);
        for var in [
            "RUST_LOG",
            "KPM_CONFIG",
            "KPM_ACTIVITY",
            "KPM_COLUMNS",
            "KPM_NO_EMOJI",
            "KPM_SPINNER_INTERVAL_MS",
        ] {
            cmd.env_remove(var);
        }
        cmd
    }

    /// Run with `stdin` piped in and stdout/stderr captured.
    fn run(&self, args: &[&str], stdin: &[u8]) -> Output {
        Self::run_cmd(self.kpm_cmd(), args, stdin)
    }

    fn run_cmd(mut cmd: Command, args: &[&str], stdin: &[u8]) -> Output {
        let mut child = cmd
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("failed to run kpm");
        // kpm may exit before reading, a closed pipe is fine
        let _ = child.stdin.take().expect("stdin is piped").write_all(stdin);
        child.wait_with_output().expect("failed to wait for kpm")
    }
}

#[test]
fn test_help_command() {
    let ctx = TestContext::new();
    let output = ctx.run(&["--help"], b"");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("select"));
}

#[test]
fn test_log_splits_channels() {
    let ctx = TestContext::new();
    let output = ctx.run(&["log", "hi"], b"");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stdout.contains("\x1b[34minfo\x1b[39m hi\n"));
    assert!(stdout.contains("\x1b[32msuccess\x1b[39m hi\n"));
    assert!(stdout.contains("Done in "));
    assert!(stderr.contains("\x1b[33mwarning\x1b[39m hi\n"));
    assert!(stderr.contains("\x1b[31merror\x1b[39m hi\n"));
    assert!(!stdout.contains("warning"));
}

#[test]
fn test_progress_is_silent_when_piped() {
    let ctx = TestContext::new();
    let output = ctx.run(&["progress", "5", "--delay-ms", "0"], b"");
    assert!(output.status.success());
    assert!(output.stderr.is_empty(), "unexpected stderr: {output:?}");
}

#[test]
fn test_select_from_piped_stdin() {
    let ctx = TestContext::new();
    let output = ctx.run(&["select", "foo", "bar"], b"2\n");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Choose an option\n1. foo\n2. bar\n"));
    assert!(stdout.contains("Select one?:"));
    assert!(stdout.ends_with("bar\n"));
    assert!(!stdout.contains('\x1b'), "cursor control on a pipe: {stdout:?}");
}

#[test]
fn test_select_fails_on_closed_stdin() {
    let ctx = TestContext::new();
    let output = ctx.run(&["select", "foo", "bar"], b"");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("input closed"), "stderr: {stderr}");
}

#[test]
fn test_spin_plain_fallback_from_config() {
    let ctx = TestContext::new();
    ctx.write_config("activity_fallback = \"plain\"\n");
    let output = ctx.run(&["spin", "--seconds", "0", "--text", "fetching"], b"");
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr, "fetching\n");
}

#[test]
fn test_spin_silent_by_default() {
    let ctx = TestContext::new();
    let output = ctx.run(&["spin", "--seconds", "0"], b"");
    assert!(output.status.success());
    assert!(output.stderr.is_empty());
}

#[test]
fn test_explicit_config_flag() {
    let ctx = TestContext::new();
    let config = ctx.temp_dir.path().join("other.toml");
    std::fs::write(&config, "tool_name = \"yarn\"\nemoji = false\n").expect("write config");

    let output = ctx.run(&["--config", config.to_str().expect("utf-8 path"), "log"], b"");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\x1b[1myarn log v"));
    assert!(!stdout.contains('✨'));
}

#[test]
fn test_broken_config_is_reported() {
    let ctx = TestContext::new();
    ctx.write_config("spinner_interval_ms = \"fast\"\n");
    let output = ctx.run(&["log"], b"");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to load console config"));
}

#[cfg(unix)]
#[test]
fn test_non_utf8_environment_is_tolerated() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let ctx = TestContext::new();
    let mut cmd = ctx.kpm_cmd();
    cmd.env("SOME_BINARY_VAR", OsStr::from_bytes(b"\xff\xfe"));
    let output = TestContext::run_cmd(cmd, &["log", "hi"], b"");
    assert!(output.status.success(), "kpm failed: {output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\x1b[34minfo\x1b[39m hi\n"));
}
