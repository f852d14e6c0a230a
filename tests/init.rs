use std::process::Command;

#[test]
fn init_creates_valid_toml() {
    let dir = tempfile::tempdir().unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_devstats"))
        .arg("init")
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert!(output.status.success(), "devstats init failed: {}", String::from_utf8_lossy(&output.stderr));

    let config_path = dir.path().join(".devstats.toml");
    assert!(config_path.exists(), ".devstats.toml should exist");

    let content = std::fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("[input]"));
    assert!(content.contains("[analysis]"));

    // Everything is commented out, so it parses to the defaults.
    let config: devstats_core::DevstatsConfig = toml::from_str(&content).unwrap();
    assert_eq!(config.analysis.city, "Paris");
    assert_eq!(config.analysis.top_n, 5);
}

#[test]
fn init_template_values_are_valid_when_uncommented() {
    let dir = tempfile::tempdir().unwrap();

    let status = Command::new(env!("CARGO_BIN_EXE_devstats"))
        .arg("init")
        .current_dir(dir.path())
        .status()
        .unwrap();
    assert!(status.success());

    let content = std::fs::read_to_string(dir.path().join(".devstats.toml")).unwrap();
    let uncommented: String = content
        .lines()
        .map(|line| match line.strip_prefix("# ") {
            Some(rest) if rest.contains(" = ") => rest,
            _ => line,
        })
        .collect::<Vec<_>>()
        .join("\n");

    let config = devstats_core::DevstatsConfig::from_toml(&uncommented).unwrap();
    assert_eq!(config.analysis.min_followers, 200);
    assert_eq!(config.analysis.top_licenses, 3);
    assert!(config.analysis.include_blank_company);
}

#[test]
fn init_refuses_if_exists() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(".devstats.toml"), "# existing").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_devstats"))
        .arg("init")
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert!(!output.status.success());
    let kept = std::fs::read_to_string(dir.path().join(".devstats.toml")).unwrap();
    assert_eq!(kept, "# existing");
}
