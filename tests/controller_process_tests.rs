//! Controller tests against real processes
//!
//! `sh -c <script> <$0>` stands in for the speech program; the voice flags,
//! the end-of-options marker and the text arrive as `$1..$5`.

#![cfg(unix)]

use nix::sys::signal::kill;
use nix::unistd::Pid;
use readaloud::speech::{ControllerState, EngineConfig, SpeechController, StopReason, UtteranceRequest};
use readaloud::ReadAloudError;
use std::fs;
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};
use tempfile::TempDir;

fn sh_controller(script: &str, arg0: &str) -> SpeechController {
    let engine = EngineConfig::new("sh").with_extra_args(["-c", script, arg0]);
    SpeechController::new(engine).with_stop_timeout(Duration::from_secs(5))
}

fn hello() -> UtteranceRequest {
    UtteranceRequest::new("  Hello, World!!  ", 280, 40, 100)
}

fn process_exists(pid: u32) -> bool {
    kill(Pid::from_raw(pid as i32), None).is_ok()
}

/// Wait until `check` holds or the timeout expires
fn wait_for(timeout: Duration, mut check: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if check() {
            return true;
        }
        thread::sleep(Duration::from_millis(20));
    }
    check()
}

fn read_args(path: &Path) -> Option<Vec<String>> {
    let content = fs::read_to_string(path).ok()?;
    let lines: Vec<String> = content.lines().map(str::to_string).collect();
    (lines.len() == 5).then_some(lines)
}

#[test]
fn test_speak_passes_arguments_and_stop_reaps() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("args.txt");
    let mut controller = sh_controller(
        r#"printf '%s\n' "$@" > "$0.tmp" && mv "$0.tmp" "$0"; exec sleep 30"#,
        out.to_str().unwrap(),
    );

    controller.speak(&hello()).unwrap();
    assert_eq!(controller.state(), ControllerState::Speaking);
    let pid = controller.process_id().expect("process should be running");

    assert!(
        wait_for(Duration::from_secs(5), || read_args(&out).is_some()),
        "engine never wrote its arguments"
    );
    assert_eq!(
        read_args(&out).unwrap(),
        vec!["-s280", "-p40", "-a100", "--", "Hello, World!!"]
    );

    controller.stop();
    assert_eq!(controller.state(), ControllerState::Idle);
    assert_eq!(controller.last_stop_reason(), Some(StopReason::Stopped));
    assert!(!process_exists(pid), "process {} survived stop", pid);
}

#[test]
fn test_dash_text_is_not_parsed_as_option() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("parsed.txt");
    let mut controller = sh_controller(
        r#"{ while getopts "s:p:a:w:" o; do echo "$o=$OPTARG"; done; shift $((OPTIND-1)); echo "positional=$#:$*"; } > "$0.tmp" && mv "$0.tmp" "$0""#,
        out.to_str().unwrap(),
    );

    controller
        .speak(&UtteranceRequest::new("-wout", 280, 40, 100))
        .unwrap();
    assert!(wait_for(Duration::from_secs(5), || controller.poll_completion() == Ok(true)));

    let parsed = fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = parsed.lines().collect();
    assert_eq!(lines, vec!["s=280", "p=40", "a=100", "positional=1:-wout"]);
}

#[test]
fn test_natural_completion_is_polled() {
    let mut controller = sh_controller("exit 0", "readaloud-test");

    controller.speak(&hello()).unwrap();

    assert!(wait_for(Duration::from_secs(5), || controller.poll_completion() == Ok(true)));
    assert_eq!(controller.state(), ControllerState::Idle);
    assert_eq!(controller.last_stop_reason(), Some(StopReason::Finished));
    assert_eq!(controller.poll_completion(), Ok(false));
}

#[test]
fn test_second_speak_replaces_first_process() {
    let mut controller = sh_controller("exec sleep 30", "readaloud-test");

    controller.speak(&hello()).unwrap();
    let first = controller.process_id().unwrap();

    controller.speak(&UtteranceRequest::new("Again", 200, 50, 80)).unwrap();
    let second = controller.process_id().unwrap();

    assert_ne!(first, second);
    assert!(!process_exists(first), "first process still alive");
    assert!(process_exists(second));

    controller.stop();
    assert!(!process_exists(second));
}

#[test]
fn test_stop_paused_process() {
    let mut controller = sh_controller("exec sleep 30", "readaloud-test");

    controller.speak(&hello()).unwrap();
    let pid = controller.process_id().unwrap();
    controller.pause().unwrap();
    assert_eq!(controller.state(), ControllerState::Paused);

    let started = Instant::now();
    controller.stop();

    assert!(started.elapsed() < Duration::from_secs(4));
    assert_eq!(controller.state(), ControllerState::Idle);
    assert!(!process_exists(pid));
}

#[test]
fn test_stop_kills_process_ignoring_terminate() {
    let engine = EngineConfig::new("sh").with_extra_args([
        "-c",
        "trap '' TERM; while :; do sleep 0.05; done",
        "readaloud-test",
    ]);
    let mut controller =
        SpeechController::new(engine).with_stop_timeout(Duration::from_millis(200));

    controller.speak(&hello()).unwrap();
    let pid = controller.process_id().unwrap();
    // Let the shell install its trap
    thread::sleep(Duration::from_millis(200));

    controller.stop();

    assert_eq!(controller.state(), ControllerState::Idle);
    assert!(!process_exists(pid));
}

#[test]
fn test_missing_program_reported() {
    let mut controller = SpeechController::new(EngineConfig::new("readaloud-no-such-speech-program"));

    let err = controller.speak(&hello()).unwrap_err();
    assert_eq!(
        err,
        ReadAloudError::DependencyMissingError("readaloud-no-such-speech-program".into())
    );
    assert_eq!(controller.state(), ControllerState::Idle);
}

#[cfg(target_os = "linux")]
mod linux {
    use super::*;

    /// Scheduler state letter from /proc/<pid>/stat
    fn proc_state(pid: u32) -> Option<char> {
        let stat = fs::read_to_string(format!("/proc/{}/stat", pid)).ok()?;
        let after_name = stat.rsplit_once(')')?.1;
        after_name.trim_start().chars().next()
    }

    #[test]
    fn test_pause_suspends_and_resume_continues() {
        let mut controller = sh_controller("exec sleep 30", "readaloud-test");

        controller.speak(&hello()).unwrap();
        let pid = controller.process_id().unwrap();

        controller.pause().unwrap();
        assert!(
            wait_for(Duration::from_secs(2), || proc_state(pid) == Some('T')),
            "process not stopped: {:?}",
            proc_state(pid)
        );

        controller.resume().unwrap();
        assert!(
            wait_for(Duration::from_secs(2), || proc_state(pid) != Some('T')),
            "process still stopped"
        );
        assert_eq!(controller.state(), ControllerState::Speaking);

        controller.stop();
        assert!(!process_exists(pid));
    }
}
