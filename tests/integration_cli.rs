// Drives the compiled binary's non-interactive paths. HOME points at a temp
// dir so logs and config stay out of the real user directories.

use assert_cmd::Command;

fn hangr(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("hangr").unwrap();
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"));
    cmd
}

#[test]
fn missing_word_bank_exits_with_one() {
    let dir = tempfile::tempdir().unwrap();
    let output = hangr(dir.path())
        .args(["--words", dir.path().join("nope.csv").to_str().unwrap()])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("could not open word bank"));
}

#[test]
fn scores_prints_ranked_board() {
    let dir = tempfile::tempdir().unwrap();
    let board = dir.path().join("leaderboard.txt");
    std::fs::write(
        &board,
        "A|100|Regular|2026-10-18 12:00\nB|150|Timed|2026-10-18 12:01\nA|150|Regular|2026-10-18 12:02\n",
    )
    .unwrap();

    let output = hangr(dir.path())
        .args(["--leaderboard", board.to_str().unwrap(), "scores"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with(" 1. A"));
    assert!(lines[0].contains("150"));
    assert!(lines[1].starts_with(" 2. B"));
    assert!(lines[2].contains("100"));
}

#[test]
fn scores_without_file_is_empty_not_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = hangr(dir.path())
        .args([
            "--leaderboard",
            dir.path().join("absent.txt").to_str().unwrap(),
            "scores",
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("No scores recorded yet."));
}

#[test]
fn export_subcommand_writes_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let board = dir.path().join("leaderboard.txt");
    std::fs::write(&board, "Ada|130|Timed|2026-10-18 12:00\n").unwrap();
    let dest = dir.path().join("out.txt");

    hangr(dir.path())
        .args([
            "--leaderboard",
            board.to_str().unwrap(),
            "export",
            dest.to_str().unwrap(),
        ])
        .assert()
        .success();

    let text = std::fs::read_to_string(&dest).unwrap();
    assert!(text.contains(" 1. Ada"));
}

#[test]
fn export_failure_exits_with_three() {
    let dir = tempfile::tempdir().unwrap();
    hangr(dir.path())
        .args(["export", dir.path().to_str().unwrap()])
        .assert()
        .code(3);
}

#[test]
fn non_tty_stdin_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let words = dir.path().join("words.csv");
    std::fs::write(&words, "category,word,difficulty\npet,dog,easy\n").unwrap();

    hangr(dir.path())
        .args(["--words", words.to_str().unwrap()])
        .write_stdin("")
        .assert()
        .code(2);
}
