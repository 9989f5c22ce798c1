use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

struct CliTestEnv {
    temp_dir: TempDir,
    home: PathBuf,
    xdg_config: PathBuf,
    xdg_state: PathBuf,
}

impl CliTestEnv {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let base = temp_dir.path().to_path_buf();
        let home = base.join("home");
        let xdg_config = base.join("xdg-config");
        let xdg_state = base.join("xdg-state");

        fs::create_dir_all(&home).expect("failed to create HOME");
        fs::create_dir_all(&xdg_config).expect("failed to create XDG_CONFIG_HOME");
        fs::create_dir_all(&xdg_state).expect("failed to create XDG_STATE_HOME");

        Self {
            temp_dir,
            home,
            xdg_config,
            xdg_state,
        }
    }

    fn write_tickets(&self, json: &str) -> PathBuf {
        let path = self.temp_dir.path().join("tickets.json");
        fs::write(&path, json).expect("failed to write tickets");
        path
    }
}

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../ticketscope-core/tests/fixtures/tickets.json")
}

fn run_bin(env: &CliTestEnv, args: &[&str]) -> Output {
    let bin_path = PathBuf::from(assert_cmd::cargo::cargo_bin!("ticketscope"));
    let mut command = Command::new(bin_path);

    command
        .args(args)
        .env("HOME", &env.home)
        .env("XDG_CONFIG_HOME", &env.xdg_config)
        .env("XDG_STATE_HOME", &env.xdg_state)
        // Fixture tickets are from 2024; keep them inside the fetch window
        .env("TICKETSCOPE_LOOKBACK_DAYS", "36500")
        .env_remove("JIRA_URL")
        .env_remove("JIRA_EMAIL")
        .env_remove("JIRA_API_TOKEN")
        .env_remove("RUST_LOG")
        .output()
        .unwrap_or_else(|e| panic!("failed to execute ticketscope: {e}"))
}

fn run_with_fixture(env: &CliTestEnv, args: &[&str]) -> Output {
    let fixture = fixture_path();
    let fixture = fixture.to_str().expect("fixture path is not UTF-8");
    let mut full = vec!["--input", fixture];
    full.extend_from_slice(args);
    let output = run_bin(env, &full);
    assert_success(&full, &output);
    output
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
        "ticketscope {rendered_args} failed\nstatus: {}\nstdout:\n{}\nstderr:\n{}",
        output.status, stdout, stderr
    );
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn report_prints_terminal_summary() {
    let env = CliTestEnv::new();
    let output = run_with_fixture(&env, &["report"]);

    let stdout = stdout(&output);
    assert!(stdout.contains("TICKET ANALYTICS"), "got:\n{stdout}");
    assert!(stdout.contains("Amy Pond"));
    assert!(stdout.contains("PROJECTS (3)"));
    assert!(stdout.contains("2024-02"));

    assert!(
        env.xdg_state.join("ticketscope").is_dir(),
        "log directory should be created under XDG_STATE_HOME"
    );
}

#[test]
fn report_exports_json() {
    let env = CliTestEnv::new();
    let output = run_with_fixture(&env, &["report", "--export", "json"]);

    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(json["total_records"], 9);
    assert_eq!(json["overview"]["resolved_tickets"], 4);
    assert_eq!(json["overview"]["other_tickets"], 1);
    assert_eq!(json["assignees"]["assignee_stats"][0]["assignee"], "Amy Pond");
    assert_eq!(json["projects"]["project_count"], 3);
    assert!(json["data_freshness"].is_string());
}

#[test]
fn report_exports_markdown() {
    let env = CliTestEnv::new();
    let output = run_with_fixture(&env, &["report", "--export", "md"]);

    let stdout = stdout(&output);
    assert!(stdout.starts_with("# Ticket Analytics"), "got:\n{stdout}");
    assert!(stdout.contains("| OPS | 3 | 2 | 66.7% | 6.0d |"));
    assert!(stdout.contains("- **2024-01**: 4"));
    // Cross-tabs carry a per-row total
    assert!(stdout.contains("| | DATA | OPS | WEB | Total |"), "got:\n{stdout}");
    assert!(stdout.contains("| Pending | 1 | 0 | 2 | 3 |"));
}

#[test]
fn report_rejects_unknown_export_format() {
    let env = CliTestEnv::new();
    let fixture = fixture_path();
    let output = run_bin(
        &env,
        &["--input", fixture.to_str().unwrap(), "report", "--export", "pdf"],
    );

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown export format"));
}

#[test]
fn empty_input_prints_no_data() {
    let env = CliTestEnv::new();
    let path = env.write_tickets("[]");
    let path = path.to_str().unwrap();

    for command in [&["report"][..], &["assignees"][..], &["top"][..]] {
        let mut args = vec!["--input", path];
        args.extend_from_slice(command);
        let output = run_bin(&env, &args);
        assert_success(&args, &output);
        assert_eq!(stdout(&output).trim(), "No data available");
    }
}

#[test]
fn top_ranks_by_metric() {
    let env = CliTestEnv::new();
    let output = run_with_fixture(
        &env,
        &["top", "--metric", "avg_resolution_time", "--limit", "2"],
    );

    let stdout = stdout(&output);
    assert!(stdout.contains("TOP ASSIGNEES BY avg_resolution_time"));
    let cat = stdout.find("Cat Jones").expect("Cat Jones listed");
    let amy = stdout.find("Amy Pond").expect("Amy Pond listed");
    assert!(cat < amy, "fastest resolver should come first:\n{stdout}");
    assert!(!stdout.contains("Bob Smith"));
}

#[test]
fn top_rejects_unknown_metric() {
    let env = CliTestEnv::new();
    let fixture = fixture_path();
    let output = run_bin(
        &env,
        &["--input", fixture.to_str().unwrap(), "top", "--metric", "velocity"],
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("metric must be one of"), "got:\n{stderr}");
    assert!(stderr.contains("avg_resolution_time"));
}

#[test]
fn assignee_lookup_is_case_insensitive() {
    let env = CliTestEnv::new();

    let output = run_with_fixture(&env, &["assignee", "AMY"]);
    let detail = stdout(&output);
    assert!(detail.contains("Assignee:        Amy Pond"), "got:\n{detail}");
    assert!(detail.contains("66.7%"));

    let output = run_with_fixture(&env, &["assignee", "zelda"]);
    assert_eq!(stdout(&output).trim(), "No assignee matching 'zelda'");
}

#[test]
fn assignees_respects_min_tickets() {
    let env = CliTestEnv::new();
    let output = run_with_fixture(&env, &["assignees", "--min-tickets", "3"]);

    let stdout = stdout(&output);
    assert!(stdout.contains("Amy Pond"));
    assert!(stdout.contains("Bob Smith"));
    assert!(!stdout.contains("Cat Jones"));
    assert!(!stdout.contains("Unassigned"));
}

#[test]
fn missing_jira_config_is_an_error() {
    let env = CliTestEnv::new();
    let output = run_bin(&env, &["report"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--input"), "got:\n{stderr}");
}

#[test]
fn config_shows_effective_settings() {
    let env = CliTestEnv::new();
    fs::create_dir_all(env.xdg_config.join("ticketscope")).unwrap();
    fs::write(
        env.xdg_config.join("ticketscope/config.toml"),
        "[analytics]\ncache_duration_secs = 60\n",
    )
    .unwrap();

    let output = run_bin(&env, &["config"]);
    assert_success(&["config"], &output);

    let stdout = stdout(&output);
    assert!(stdout.contains("Cache duration: 60s"), "got:\n{stdout}");
    assert!(stdout.contains("Lookback:       36500 days"));
    assert!(stdout.contains("jira (not configured)"));
}
