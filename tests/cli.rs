use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn write_input(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_cli_rank_two_node_cycle() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let input = write_input(&dir, "cycle.txt", "0:1\n1:0\n");

    let mut cmd = Command::cargo_bin("edgerank")?;
    cmd.arg("rank").arg(&input).arg("0.85");
    cmd.assert()
        .success()
        .stdout("5.0000000000e-1\n5.0000000000e-1\n");
    Ok(())
}

#[test]
fn test_cli_rank_keys_and_sum() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let input = write_input(&dir, "chain.txt", "0:1\n\n1:2\n2:\n");

    let mut cmd = Command::cargo_bin("edgerank")?;
    cmd.args(["rank", "--keys", "--sum", "--strategy", "pull"])
        .arg(&input)
        .arg("0.85");
    let output = cmd.assert().success().get_output().stdout.clone();
    let text = String::from_utf8(output)?;

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("0\t"));
    assert!(lines[2].starts_with("2\t"));
    assert!(lines[3].starts_with("sum\t"));
    Ok(())
}

#[test]
fn test_cli_rejects_bad_damping() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let input = write_input(&dir, "cycle.txt", "0:1\n1:0\n");

    for damping in ["1.5", "-0.2", "abc"] {
        let mut cmd = Command::cargo_bin("edgerank")?;
        cmd.arg("rank").arg(&input).arg(damping);
        cmd.assert()
            .failure()
            .code(1)
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("between 0 and 1"));
    }
    Ok(())
}

#[test]
fn test_cli_malformed_record() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let input = write_input(&dir, "bad.txt", "garbage-no-colon\n");

    let mut cmd = Command::cargo_bin("edgerank")?;
    cmd.arg("rank").arg(&input).arg("0.85");
    cmd.assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("record 1"));
    Ok(())
}

#[test]
fn test_cli_missing_and_empty_files() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;

    let mut cmd = Command::cargo_bin("edgerank")?;
    cmd.arg("rank").arg(dir.path().join("nope.txt")).arg("0.85");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));

    let empty = write_input(&dir, "empty.txt", "\n  \n");
    let mut cmd = Command::cargo_bin("edgerank")?;
    cmd.arg("rank").arg(&empty).arg("0.85");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Input file is empty"));
    Ok(())
}

#[test]
fn test_cli_iteration_cap() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let input = write_input(&dir, "chain.txt", "0:1\n1:2\n2:\n");

    let mut cmd = Command::cargo_bin("edgerank")?;
    cmd.args(["rank", "--max-iterations", "2"]).arg(&input).arg("0.85");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("did not converge"));

    let mut cmd = Command::cargo_bin("edgerank")?;
    cmd.args(["rank", "--max-iterations", "2", "--allow-unconverged"])
        .arg(&input)
        .arg("0.85");
    cmd.assert()
        .success()
        .stdout(predicate::function(|out: &str| out.lines().count() == 3));
    Ok(())
}

#[test]
fn test_cli_config_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let input = write_input(&dir, "keys.txt", "10:2\n2:10\n");
    let config = write_input(&dir, "run.json", r#"{ "key_order": "lexicographic" }"#);

    let mut cmd = Command::cargo_bin("edgerank")?;
    cmd.args(["rank", "--keys", "--config"])
        .arg(&config)
        .arg(&input)
        .arg("0.85");
    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("10\t"));
    Ok(())
}

#[test]
fn test_cli_generate_then_rank() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let dataset = dir.path().join("generated.txt");

    let mut cmd = Command::cargo_bin("edgerank")?;
    cmd.args(["generate", "40"])
        .arg(&dataset)
        .args(["--max-outgoing", "4", "--seed", "42"]);
    cmd.assert().success();

    let content = fs::read_to_string(&dataset)?;
    assert_eq!(content.lines().count(), 40);

    let mut cmd = Command::cargo_bin("edgerank")?;
    cmd.args(["rank", "--sum"]).arg(&dataset).arg("0.85");
    let output = cmd.assert().success().get_output().stdout.clone();
    let text = String::from_utf8(output)?;
    assert_eq!(text.lines().count(), 41);
    let sum: f64 = text.lines().last().unwrap().replace("e+", "e").parse()?;
    assert!((sum - 1.0).abs() < 1e-6);
    Ok(())
}
