mod common;

use std::{
    io::Write,
    process::{Command, Output},
};

use common::{letter_a, letter_b};
use fingerspell::Landmark;
use tempfile::NamedTempFile;

fn frame_line(sequence: u64, hands: &[Vec<Landmark>]) -> String {
    serde_json::json!({ "sequence": sequence, "hands": hands }).to_string()
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fingerspell"))
        .args(args)
        .env_remove("FINGERSPELL_CONFIG")
        .env_remove("FINGERSPELL_THRESHOLD")
        .output()
        .expect("run fingerspell")
}

#[test]
fn prints_one_line_per_hand() {
    let mut input = NamedTempFile::new().expect("temp input");
    writeln!(input, "{}", frame_line(1, &[letter_a(), letter_b()])).unwrap();
    writeln!(input, "not json").unwrap();
    writeln!(input).unwrap();
    writeln!(input, "{}", frame_line(2, &[])).unwrap();
    writeln!(input, "{}", frame_line(3, &[vec![Landmark::default(); 21]])).unwrap();

    let output = run(&[input.path().to_str().unwrap()]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "frame 1 hand 0: A (10.00)",
            "frame 1 hand 1: B (10.00)",
            "frame 2: no hands",
            "frame 3 hand 0: no gesture",
        ]
    );
}

#[test]
fn json_output_and_threshold_flag() {
    let mut input = NamedTempFile::new().expect("temp input");
    writeln!(input, "{}", frame_line(7, &[letter_a()])).unwrap();

    let output = run(&[input.path().to_str().unwrap(), "--json"]);
    assert!(output.status.success());
    let frame: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("one JSON frame");
    assert_eq!(frame["sequence"], 7);
    assert_eq!(frame["gestures"][0]["name"], "A");

    let output = run(&[input.path().to_str().unwrap(), "--threshold", "10.5"]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap().trim(),
        "frame 7 hand 0: no gesture"
    );
}

#[test]
fn lists_configured_gestures() {
    let mut config = NamedTempFile::new().expect("temp config");
    writeln!(
        config,
        r#"
        threshold = 7.0
        [[gestures]]
        name = "fist"
        [[gestures.rules]]
        fingers = ["index", "middle", "ring", "pinky"]
        curl = "full_curl"
        weight = 1.0
        "#
    )
    .unwrap();

    let output = run(&["--list", "--config", config.path().to_str().unwrap()]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("15 gestures, threshold 7"));
    assert!(stdout.lines().any(|l| l.trim() == "fist  max 4.00"));
    assert!(stdout.lines().any(|l| l.trim() == "pinky: full curl 1.00"));
    // Letter A's thumb: one curl rule and three direction alternatives.
    let a_thumb = "thumb: no curl 1.00, vertical up 1.00, diagonal up left 0.90, \
                   diagonal up right 0.90";
    assert!(stdout.lines().any(|l| l.trim() == a_thumb));
}

#[test]
fn latest_only_reports_the_final_frame() {
    let mut input = NamedTempFile::new().expect("temp input");
    let a = letter_a();
    for sequence in 1..2000 {
        writeln!(input, "{}", frame_line(sequence, &[a.clone()])).unwrap();
    }
    writeln!(input, "{}", frame_line(2000, &[letter_b()])).unwrap();

    let output = run(&[input.path().to_str().unwrap(), "--latest-only"]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().last(), Some("frame 2000 hand 0: B (10.00)"));
}

#[test]
fn rejects_invalid_config() {
    let mut config = NamedTempFile::new().expect("temp config");
    writeln!(config, "threshold = \"high\"").unwrap();

    let output = run(&["--list", "--config", config.path().to_str().unwrap()]);
    assert!(!output.status.success());
}
