//! Lifecycle scenarios for PlaybackSupervisor through the public API

#![cfg(unix)]

use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

use video_looper::player::{LoopMode, SessionState};
use video_looper::{PlaybackSupervisor, PlayerError, PlayerOptions};

use crate::helpers::pid_alive;

fn sleeper_options() -> PlayerOptions {
    PlayerOptions {
        program: "sh".to_string(),
        args: vec![
            "-c".to_string(),
            "exec sleep 30".to_string(),
            "looper-test".to_string(),
        ],
        ..PlayerOptions::default()
    }
}

#[test]
fn plain_start_and_stop() {
    let mut supervisor = PlaybackSupervisor::with_options(sleeper_options()).unwrap();
    assert!(!supervisor.is_playing());

    supervisor
        .start(Path::new("/media/clip.mp4"), LoopMode::Once, None)
        .unwrap();
    let args = &supervisor.session().unwrap().args;
    assert!(args.last().unwrap().to_string_lossy().ends_with("/clip.mp4"));
    assert!(supervisor.is_playing());

    supervisor.stop(Duration::from_secs(3));
    assert!(!supervisor.is_playing());
}

#[test]
fn titled_looping_start_writes_overlay() {
    let options = PlayerOptions {
        show_titles: true,
        title_duration: Some(5),
        ..sleeper_options()
    };
    let mut supervisor = PlaybackSupervisor::with_options(options).unwrap();

    supervisor
        .start(Path::new("/media/a.mp4"), LoopMode::Forever, Some("Hello"))
        .unwrap();

    let args = &supervisor.session().unwrap().args;
    assert!(args.iter().any(|a| a == "--loop"));
    let flag = args.iter().position(|a| a == "--sub-file").unwrap();
    let overlay = fs::read_to_string(&args[flag + 1]).unwrap();
    let lines: Vec<_> = overlay.lines().collect();
    assert_eq!(lines, ["5", "Hello"]);
}

#[test]
fn titles_without_duration_are_a_configuration_error() {
    let options = PlayerOptions {
        show_titles: true,
        ..PlayerOptions::default()
    };
    let err = PlaybackSupervisor::with_options(options).unwrap_err();
    assert!(matches!(err, PlayerError::Configuration { .. }));
}

#[test]
fn repeated_starts_keep_one_player_alive() {
    let mut supervisor = PlaybackSupervisor::with_options(sleeper_options()).unwrap();
    let mut previous = Vec::new();

    for i in 0..5 {
        let media = format!("/media/clip{}.mp4", i);
        supervisor
            .start(Path::new(&media), LoopMode::Once, None)
            .unwrap();
        let pid = supervisor.process_id().unwrap();

        assert!(pid_alive(pid));
        assert!(previous.iter().all(|&old| !pid_alive(old)));
        previous.push(pid);
    }
}

#[test]
fn zero_timeout_stop_is_prompt() {
    let mut supervisor = PlaybackSupervisor::with_options(sleeper_options()).unwrap();
    supervisor
        .start(Path::new("/media/clip.mp4"), LoopMode::Once, None)
        .unwrap();

    let started = Instant::now();
    supervisor.stop(Duration::ZERO);
    assert!(started.elapsed() < Duration::from_secs(2));
    assert_eq!(supervisor.state(), SessionState::Stopped);
    assert!(!supervisor.is_playing());
}

#[test]
fn teardown_twice_cleans_overlay_dir() {
    let options = PlayerOptions {
        show_titles: true,
        title_duration: Some(3),
        ..sleeper_options()
    };
    let mut supervisor = PlaybackSupervisor::with_options(options).unwrap();
    supervisor
        .start(Path::new("/media/a.mp4"), LoopMode::Once, Some("Title"))
        .unwrap();
    let dir = supervisor.overlay_dir().unwrap().to_path_buf();
    let pid = supervisor.process_id().unwrap();

    supervisor.shutdown();
    supervisor.shutdown();
    drop(supervisor);

    assert!(!dir.exists());
    assert!(!pid_alive(pid));
}
