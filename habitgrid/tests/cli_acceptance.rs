use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

struct CliTestEnv {
    _temp_dir: TempDir,
    home: PathBuf,
    xdg_config: PathBuf,
    xdg_state: PathBuf,
    snapshots: PathBuf,
}

impl CliTestEnv {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let base = temp_dir.path().to_path_buf();
        let home = base.join("home");
        let xdg_config = base.join("xdg-config");
        let xdg_state = base.join("xdg-state");
        let snapshots = base.join("snapshots");

        fs::create_dir_all(&home).expect("failed to create HOME");
        fs::create_dir_all(&xdg_config).expect("failed to create XDG_CONFIG_HOME");
        fs::create_dir_all(&xdg_state).expect("failed to create XDG_STATE_HOME");
        fs::create_dir_all(&snapshots).expect("failed to create snapshot dir");

        seed_snapshot_fixture(&snapshots, "weekly-reading.toml");
        seed_snapshot_fixture(&snapshots, "quit-snacks.toml");

        Self {
            _temp_dir: temp_dir,
            home,
            xdg_config,
            xdg_state,
            snapshots,
        }
    }

    fn snapshot(&self, name: &str) -> String {
        self.snapshots.join(name).to_string_lossy().into_owned()
    }

    fn write_config(&self, content: &str) {
        let dir = self.xdg_config.join("habitgrid");
        fs::create_dir_all(&dir).expect("failed to create config dir");
        fs::write(dir.join("config.toml"), content).expect("failed to write config");
    }
}

fn seed_snapshot_fixture(target_dir: &Path, name: &str) {
    let source = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../habitgrid-core/tests/fixtures")
        .join(name);
    fs::copy(source, target_dir.join(name)).expect("failed to copy snapshot fixture");
}

fn run_bin(env: &CliTestEnv, args: &[&str]) -> Output {
    let bin_path = PathBuf::from(assert_cmd::cargo::cargo_bin!("habitgrid"));

    Command::new(bin_path)
        .args(args)
        .env("HOME", &env.home)
        .env("XDG_CONFIG_HOME", &env.xdg_config)
        .env("XDG_STATE_HOME", &env.xdg_state)
        .env_remove("RUST_LOG")
        .output()
        .unwrap_or_else(|e| panic!("failed to execute habitgrid: {e}"))
}

fn assert_success(args: &[&str], output: &Output) {
    if output.status.success() {
        return;
    }

    let rendered_args = args
        .iter()
        .map(|arg| OsString::from(arg).to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    panic!(
        "habitgrid {rendered_args} failed\nstatus: {}\nstdout:\n{}\nstderr:\n{}",
        output.status, stdout, stderr
    );
}

#[test]
fn text_report_for_weekly_habit() {
    let env = CliTestEnv::new();
    let snapshot = env.snapshot("weekly-reading.toml");
    let args = [snapshot.as_str(), "--today", "2026-01-15", "--weeks", "4"];

    let output = run_bin(&env, &args);
    assert_success(&args, &output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Read (build)"), "unexpected stdout:\n{stdout}");
    assert!(stdout.contains("Goal:     3 days a week"));
    assert!(stdout.contains("Status:   2 week streak"));
    assert!(stdout.contains("Streak:   2 weeks"));
    assert!(stdout.contains("Weeks:    2 of 4 met goal"));
    assert!(stdout.contains("..##"));
    assert!(stdout.contains("Months:   none"));

    let log_dir = env.xdg_state.join("habitgrid");
    assert!(
        log_dir.exists(),
        "log directory should exist at {}",
        log_dir.display()
    );
}

#[test]
fn json_report_for_quit_habit() {
    let env = CliTestEnv::new();
    let snapshot = env.snapshot("quit-snacks.toml");
    let args = [snapshot.as_str(), "--today", "2026-01-15", "--format", "json"];

    let output = run_bin(&env, &args);
    assert_success(&args, &output);

    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(report["habit"], "Late-night snacks");
    assert_eq!(report["habit_type"], "quit");
    assert_eq!(report["today"], "2026-01-15");
    assert_eq!(report["subtitle"]["goal_text"], "Max 2 a day");
    assert_eq!(report["subtitle"]["secondary_text"], "1 over limit");
    assert_eq!(report["subtitle"]["secondary_style"], "violation");
    assert_eq!(report["today_state"]["state"], "failed");
    assert_eq!(report["grid"]["weeks"], 52);
    assert_eq!(
        report["week_indicators"]
            .as_array()
            .expect("week_indicators should be an array")
            .len(),
        52
    );
}

#[test]
fn config_sets_grid_width_and_week_start() {
    let env = CliTestEnv::new();
    env.write_config("[calendar]\nfirst_weekday = \"monday\"\n\n[grid]\nweeks = 3\n");
    let snapshot = env.snapshot("weekly-reading.toml");
    let args = [snapshot.as_str(), "--today", "2026-01-15", "--format", "json"];

    let output = run_bin(&env, &args);
    assert_success(&args, &output);

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["grid"]["weeks"], 3);
    assert_eq!(report["grid"]["start"], "2025-12-29");
}

#[test]
fn rejects_bad_input() {
    let env = CliTestEnv::new();
    let snapshot = env.snapshot("weekly-reading.toml");

    let output = run_bin(&env, &[snapshot.as_str(), "--format", "yaml"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown format"));

    let output = run_bin(&env, &[snapshot.as_str(), "--weeks", "0"]);
    assert!(!output.status.success());

    let missing = env.snapshot("missing.toml");
    let output = run_bin(&env, &[missing.as_str()]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to load snapshot"));
}
