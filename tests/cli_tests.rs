use regex::Regex;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn lcsforge(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_lcsforge"))
        .args(args)
        .output()
        .expect("Failed to execute lcsforge")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn assert_ok(output: &Output) {
    assert!(
        output.status.success(),
        "command failed\nstdout:\n{}\nstderr:\n{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
}

fn path_arg(p: &Path) -> String {
    p.to_string_lossy().to_string()
}

#[test]
fn test_compare_prints_both_variants() {
    let output = lcsforge(&["compare", "--str1", "ABCBDAB", "--str2", "BDCABA"]);
    assert_ok(&output);
    let stdout = stdout_of(&output);

    let row = Regex::new(r"\|\s*(subsequence|substring)\s*\|\s*(dynamic programming|brute force)\s*\|\s*(\w*)\s*\|\s*(\d+)\s*\|")
        .unwrap();
    let rows: Vec<(String, String, usize)> = row
        .captures_iter(&stdout)
        .map(|c| (c[1].to_string(), c[2].to_string(), c[4].parse().unwrap()))
        .collect();

    assert_eq!(rows.len(), 4, "unexpected table:\n{}", stdout);
    for (variant, _, length) in &rows {
        let expected = if variant == "subsequence" { 4 } else { 2 };
        assert_eq!(*length, expected);
    }
}

#[test]
fn test_compare_skips_oracle_over_ceiling() {
    let output = lcsforge(&[
        "compare",
        "--str1",
        "ABCD",
        "--str2",
        "ABCD",
        "--bf-product-ceiling",
        "4",
    ]);
    assert_ok(&output);
    let stdout = stdout_of(&output);
    assert_eq!(stdout.matches("skipped (product 16 > 4)").count(), 2);
}

#[test]
fn test_example_prints_final_table() {
    let output = lcsforge(&["example", "--no-image"]);
    assert_ok(&output);
    let stdout = stdout_of(&output);

    let step = Regex::new(r"Step (\d+) of (\d+):").unwrap();
    let caps = step.captures(&stdout).expect("step line");
    assert_eq!(&caps[1], "30");
    assert_eq!(&caps[2], "30");
    assert!(stdout.contains("Final result: 'abcf' (length: 4)"));
}

#[test]
fn test_example_at_early_step() {
    let output = lcsforge(&["example", "--no-image", "--at-step", "1"]);
    assert_ok(&output);
    let stdout = stdout_of(&output);
    assert!(stdout.contains("Step 1 of 30: Match: 'a' at DP[1,1] = 1 (diagonal + 1)"));
    assert!(!stdout.contains("Final result"));
}

#[test]
fn test_example_writes_image() {
    let dir = TempDir::new().unwrap();
    let figures = dir.path().join("figures");
    let output = lcsforge(&["example", "--str1", "AB", "--str2", "BA", "--figures-dir", &path_arg(&figures)]);
    assert_ok(&output);
    assert!(figures.join("dp_table_example.png").is_file());
}

#[test]
fn test_verify_small_run() {
    let output = lcsforge(&[
        "verify",
        "--trials",
        "40",
        "--max-len",
        "6",
        "--seed",
        "3",
        "--alphabet",
        "ABC",
    ]);
    assert_ok(&output);
    assert!(stdout_of(&output).contains("All 40 pairs agree"));
}

#[test]
fn test_invalid_config_exits_non_zero() {
    let output = lcsforge(&["bench", "--step", "0"]);
    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_config_file_with_cli_override() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");
    std::fs::write(&config, r#"{ "harness": { "bf_product_ceiling": 4 } }"#).unwrap();

    let output = lcsforge(&[
        "compare",
        "--config",
        &path_arg(&config),
        "--str1",
        "ABC",
        "--str2",
        "ABC",
    ]);
    assert_ok(&output);
    assert!(stdout_of(&output).contains("skipped (product 9 > 4)"));

    let output = lcsforge(&[
        "compare",
        "--config",
        &path_arg(&config),
        "--bf-product-ceiling",
        "100",
        "--str1",
        "ABC",
        "--str2",
        "ABC",
    ]);
    assert_ok(&output);
    assert!(!stdout_of(&output).contains("skipped"));
}

#[test]
fn test_split_passes_merge_and_plot() {
    let dir = TempDir::new().unwrap();
    let data = path_arg(&dir.path().join("data"));
    let figures = path_arg(&dir.path().join("figures"));
    let outputs = ["--data-dir", &data, "--figures-dir", &figures];
    let common = [
        "--min-length",
        "2",
        "--max-length",
        "4",
        "--seed",
        "11",
        "--alphabet",
        "ABCD",
        "--data-dir",
        &data,
        "--figures-dir",
        &figures,
    ];

    for mode in ["dp", "bf"] {
        let mut args = vec!["bench", "--mode", mode];
        args.extend_from_slice(&common);
        let output = lcsforge(&args);
        assert_ok(&output);
        assert!(stdout_of(&output).contains("[9/9]"));
    }

    let dp_csv = std::fs::read_to_string(dir.path().join("data").join("dp_results.csv")).unwrap();
    assert_eq!(dp_csv.lines().count(), 10);
    assert!(dp_csv.lines().skip(1).all(|l| l.contains(",NA,")));

    let mut args = vec!["merge"];
    args.extend_from_slice(&outputs);
    let output = lcsforge(&args);
    assert_ok(&output);
    assert!(stdout_of(&output).contains("into 9 length pairs"));

    let mut args = vec!["plot"];
    args.extend_from_slice(&outputs);
    let output = lcsforge(&args);
    assert_ok(&output);
    let created = Regex::new(r"Created (\d+) plots").unwrap();
    let stdout = stdout_of(&output);
    let caps = created.captures(&stdout).expect("plot summary");
    assert_eq!(&caps[1], "3");
    assert!(dir.path().join("figures").join("speedup.png").is_file());
}

#[test]
fn test_generate_then_bench_from_cases() {
    let dir = TempDir::new().unwrap();
    let cases = path_arg(&dir.path().join("cases.json"));
    let results = path_arg(&dir.path().join("results.csv"));

    let output = lcsforge(&[
        "generate",
        "--min-length",
        "1",
        "--max-length",
        "2",
        "--cases",
        "2",
        "--seed",
        "5",
        "-o",
        &cases,
    ]);
    assert_ok(&output);
    assert!(stdout_of(&output).contains("Generated 8 test cases"));

    let output = lcsforge(&["bench", "--cases-file", &cases, "-o", &results]);
    assert_ok(&output);
    let stdout = stdout_of(&output);
    assert!(stdout.contains("Completed 8 trials, 8 with both algorithms"));

    let csv = std::fs::read_to_string(&results).unwrap();
    assert_eq!(csv.lines().count(), 9);
}

#[test]
fn test_subcommands_reject_flags_they_do_not_read() {
    let output = lcsforge(&["compare", "--min-length", "3", "--str1", "AB", "--str2", "BA"]);
    assert_eq!(output.status.code(), Some(2));

    let output = lcsforge(&["serve", "--help"]);
    assert_ok(&output);
    let help = stdout_of(&output);
    assert!(help.contains("--port"));
    assert!(!help.contains("--min-length"));
    assert!(!help.contains("--data-dir"));
}
