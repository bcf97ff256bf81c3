use assert_cmd::Command;

fn libris() -> Command {
    let mut cmd = Command::cargo_bin("libris").unwrap();
    // Point at an empty directory so local config files never leak in.
    cmd.env("LIBRIS_CONFIG_DIR", std::env::temp_dir().join("libris-cli-no-config"))
        .env_remove("LIBRIS_ENV");
    cmd
}

#[test]
fn help_lists_subcommands() {
    let output = libris().arg("--help").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("serve"));
    assert!(stdout.contains("check-config"));
}

#[test]
fn check_config_prints_defaults() {
    let output = libris().arg("check-config").output().unwrap();
    assert!(output.status.success());

    let settings: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(settings["environment"], "local");
    assert_eq!(settings["server"]["port"], 8080);
    assert_eq!(settings["catalog"]["seed_starter_books"], true);
}

#[test]
fn check_config_honours_environment_overrides() {
    let output = libris()
        .arg("check-config")
        .env("LIBRIS_SERVER__PORT", "9191")
        .env("LIBRIS_ENV", "staging")
        .output()
        .unwrap();
    assert!(output.status.success());

    let settings: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(settings["environment"], "staging");
    assert_eq!(settings["server"]["port"], 9191);
}

#[test]
fn unknown_environment_fails() {
    let output = libris()
        .arg("check-config")
        .env("LIBRIS_ENV", "qa")
        .output()
        .unwrap();
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unsupported environment 'qa'"));
}
