//! End-to-end runs of the `movieshelf` binary against an isolated config dir

#![cfg(target_os = "linux")]

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

struct CliContext {
    temp_dir: TempDir,
}

impl CliContext {
    fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    fn config_file(&self) -> PathBuf {
        self.temp_dir.path().join("movieshelf").join("config.json")
    }

    fn write_config(&self, content: &str) {
        let path = self.config_file();
        fs::create_dir_all(path.parent().unwrap()).expect("Failed to create config dir");
        fs::write(path, content).expect("Failed to write config");
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_movieshelf"))
            .args(args)
            .env("XDG_CONFIG_HOME", self.temp_dir.path())
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .output()
            .expect("Failed to run movieshelf")
    }
}

#[test]
fn test_corrupt_config_warning_reaches_stderr() {
    let ctx = CliContext::new();
    ctx.write_config("{ broken");

    let output = ctx.run(&["match", "Titanic", "Titanic"]);
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stderr.contains("Config file corrupted"),
        "stderr was: {}",
        stderr
    );
    assert!(stdout.contains("match:         true"), "stdout was: {}", stdout);
    assert!(ctx.config_file().with_extension("json.corrupt").exists());
}

#[test]
fn test_config_log_level_silences_info() {
    let ctx = CliContext::new();
    ctx.write_config(r#"{"log_level":"WARN"}"#);

    let output = ctx.run(&["match", "Titanic", "Avatar"]);
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stderr.contains("MovieShelf v"), "stderr was: {}", stderr);
    assert!(stdout.contains("match:         false"));
}

#[test]
fn test_add_in_demo_mode_leaves_no_side_files() {
    let ctx = CliContext::new();
    ctx.write_config(r#"{"api_url":"demo","demo_delay_ms":0}"#);

    let output = ctx.run(&["add", "Amélie", "--support", "dvd"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Added in demo mode"));

    let entries: Vec<_> = fs::read_dir(ctx.temp_dir.path().join("movieshelf"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(entries, vec!["config.json"]);
}

#[test]
fn test_missing_api_url_fails() {
    let ctx = CliContext::new();

    let output = ctx.run(&["list"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("API URL not configured"));
}
