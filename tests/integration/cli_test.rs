//! Integration tests for the video-looper CLI

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use crate::helpers::{media_dir, sh_config};

fn looper() -> Command {
    let mut cmd = Command::cargo_bin("video-looper").unwrap();
    cmd.env_remove("VIDEO_LOOPER_CONFIG").env_remove("RUST_LOG");
    cmd
}

// ============================================================================
// Help Output Tests
// ============================================================================

#[test]
fn help_lists_subcommands() {
    looper()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("play"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn version_flag_prints_version() {
    looper()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn play_without_file_is_usage_error() {
    looper()
        .arg("play")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("<FILE>"));
}

// ============================================================================
// List Tests
// ============================================================================

#[test]
fn list_prints_playable_files_sorted() {
    let dir = media_dir(&["b.mp4", "a.mkv", "notes.txt"]);
    let config = sh_config(dir.path(), "exit 0", "");

    looper()
        .args(["--config", config.to_str().unwrap(), "list"])
        .assert()
        .success()
        .stdout("a.mkv\nb.mp4\n");
}

#[test]
fn list_missing_directory_fails() {
    let dir = TempDir::new().unwrap();
    let config = sh_config(dir.path(), "exit 0", "");

    looper()
        .args(["--config", config.to_str().unwrap()])
        .args(["list", "--dir", "/nonexistent/video-looper"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Cannot list"));
}

// ============================================================================
// Play Tests
// ============================================================================

#[test]
fn play_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    let config = sh_config(dir.path(), "exit 0", "");

    looper()
        .args(["--config", config.to_str().unwrap(), "play", "ghost.mp4"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("File not found"))
        .stderr(predicate::str::contains("ghost.mp4"));
}

#[test]
fn play_unsupported_file_fails() {
    let dir = media_dir(&["notes.txt"]);
    let config = sh_config(dir.path(), "exit 0", "");
    let file = dir.path().join("notes.txt");

    looper()
        .args(["--config", config.to_str().unwrap(), "play"])
        .arg(&file)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unsupported file type"));
}

#[test]
#[cfg(unix)]
fn play_runs_player_until_it_exits() {
    let dir = media_dir(&["clip.mp4"]);
    let config = sh_config(dir.path(), "exit 0", "");
    let file = dir.path().join("clip.mp4");

    looper()
        .args(["--config", config.to_str().unwrap(), "play"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Playing"))
        .stdout(predicate::str::contains("clip.mp4"));
}

#[test]
#[cfg(unix)]
fn play_passes_loop_flag_and_media_path() {
    let dir = media_dir(&["clip.mp4"]);
    let record = dir.path().join("args.txt");
    let script = format!("printf '%s\\n' \"$@\" > '{}'", record.display());
    let config = sh_config(dir.path(), &script, "");
    let file = dir.path().join("clip.mp4");

    looper()
        .args(["--config", config.to_str().unwrap(), "play", "--loop"])
        .arg(&file)
        .assert()
        .success();

    let recorded = std::fs::read_to_string(&record).unwrap();
    let args: Vec<_> = recorded.lines().collect();
    assert_eq!(args.first(), Some(&"--loop"));
    assert!(args.last().unwrap().ends_with("/clip.mp4"));
}

#[test]
fn play_with_missing_player_reports_launch_error() {
    let dir = media_dir(&["clip.mp4"]);
    let config = dir.path().join("config.toml");
    std::fs::write(
        &config,
        "[player]\nprogram = \"/nonexistent/video-looper-player\"\n",
    )
    .unwrap();

    looper()
        .args(["--config", config.to_str().unwrap(), "play"])
        .arg(dir.path().join("clip.mp4"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to launch player"));
}

#[test]
fn play_with_titles_but_no_duration_is_rejected() {
    let dir = media_dir(&["clip.mp4"]);
    let config = sh_config(dir.path(), "exit 0", "show_titles = true");

    looper()
        .args(["--config", config.to_str().unwrap(), "play"])
        .arg(dir.path().join("clip.mp4"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("title_duration"));
}

// ============================================================================
// Console Tests
// ============================================================================

#[test]
fn run_console_lists_and_quits() {
    let dir = media_dir(&["intro.mp4", "outro.mov"]);
    let config = sh_config(dir.path(), "exit 0", "");

    looper()
        .args(["--config", config.to_str().unwrap(), "run", "--no-autoplay"])
        .write_stdin("list\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Available commands"))
        .stdout(predicate::str::contains("intro.mp4\noutro.mov\n"));
}

#[test]
#[cfg(unix)]
fn run_console_plays_and_stops() {
    let dir = media_dir(&["a.mp4"]);
    let config = sh_config(dir.path(), "exec sleep 30", "");

    looper()
        .args(["--config", config.to_str().unwrap(), "run"])
        .write_stdin("play a.mp4\nstate\nstop\nbogus\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Playing: a.mp4"))
        .stdout(predicate::str::contains("State: Playing, File: a.mp4"))
        .stdout(predicate::str::contains("Stopped playback"))
        .stdout(predicate::str::contains("Unknown command"));
}

#[test]
fn run_console_exits_at_end_of_input() {
    let dir = media_dir(&[]);
    let config = sh_config(dir.path(), "exit 0", "");

    looper()
        .args(["--config", config.to_str().unwrap(), "run"])
        .write_stdin("")
        .assert()
        .success();
}

// ============================================================================
// Config Tests
// ============================================================================

#[test]
fn config_path_prints_override() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("looper.toml");

    looper()
        .args(["--config", path.to_str().unwrap(), "config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("looper.toml"));
}

#[test]
fn config_init_refuses_to_overwrite_without_force() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");
    let path_arg = path.to_str().unwrap();

    looper()
        .args(["--config", path_arg, "config", "init"])
        .assert()
        .success();
    assert!(path.exists());

    looper()
        .args(["--config", path_arg, "config", "init"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already exists"));

    looper()
        .args(["--config", path_arg, "config", "init", "--force"])
        .assert()
        .success();
}

#[test]
fn config_show_prints_defaults_for_missing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");

    looper()
        .args(["--config", path.to_str().unwrap(), "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[player]"))
        .stdout(predicate::str::contains("program = \"vlc\""))
        .stdout(predicate::str::contains("[looper]"));
}

#[test]
fn invalid_config_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[player\n").unwrap();

    looper()
        .args(["--config", path.to_str().unwrap(), "list"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid config"));
}

// ============================================================================
// Shell Completion Tests
// ============================================================================

#[test]
fn completions_generate_bash_script() {
    looper()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("video-looper"));
}
