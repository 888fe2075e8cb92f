mod common;

use camview::{run_live, CaptureSession, KeyCode, LiveOptions, QuitKey, StopReason, ViewerError};
use common::{RecordingDisplay, ScriptedSource, Step};

#[test]
fn closed_session_never_runs_the_loop() {
    let mut display = RecordingDisplay::default();
    let summary =
        run_live(CaptureSession::closed(), &mut display, &LiveOptions::default()).unwrap();

    assert_eq!(summary.reason, StopReason::NeverOpened);
    assert_eq!(summary.frames, 0);
    assert_eq!(display.shows, 0);
    assert_eq!(display.polls, 0);
    assert_eq!(display.calls, ["close"]);
}

#[test]
fn end_of_stream_stops_the_loop() {
    let (source, counters) =
        ScriptedSource::new([Step::Frame, Step::Frame, Step::End, Step::Frame]);
    let mut display = RecordingDisplay::default();

    let summary = run_live(
        CaptureSession::from_source(Box::new(source)),
        &mut display,
        &LiveOptions::default(),
    )
    .unwrap();

    assert_eq!(summary.reason, StopReason::StreamEnded);
    assert_eq!(summary.frames, 2);
    assert_eq!(counters.reads.get(), 3);
    assert_eq!(display.calls, ["show", "poll", "show", "poll", "close"]);
    assert_eq!(counters.releases.get(), 1);
}

#[test]
fn failed_read_stops_without_retry() {
    let (source, counters) = ScriptedSource::new([Step::Frame, Step::Fail, Step::Frame]);
    let mut display = RecordingDisplay::default();

    let summary = run_live(
        CaptureSession::from_source(Box::new(source)),
        &mut display,
        &LiveOptions::default(),
    )
    .unwrap();

    assert_eq!(summary.reason, StopReason::ReadFailed);
    assert_eq!(summary.frames, 1);
    assert_eq!(counters.reads.get(), 2);
    assert_eq!(counters.releases.get(), 1);
}

#[test]
fn quit_key_stops_after_that_iterations_render() {
    let (source, counters) = ScriptedSource::endless();
    let mut display = RecordingDisplay::with_keys([
        None,
        Some(KeyCode::Char('x')),
        Some(KeyCode::Char('q')),
        None,
    ]);

    let summary = run_live(
        CaptureSession::from_source(Box::new(source)),
        &mut display,
        &LiveOptions::default(),
    )
    .unwrap();

    assert_eq!(summary.reason, StopReason::QuitKey);
    assert_eq!(summary.frames, 3);
    assert_eq!(
        display.calls,
        ["show", "poll", "show", "poll", "show", "poll", "close"]
    );
    assert_eq!(counters.reads.get(), 3);
    assert_eq!(counters.releases.get(), 1);
}

#[test]
fn escape_can_be_the_quit_key() {
    let (source, _counters) = ScriptedSource::endless();
    let mut display =
        RecordingDisplay::with_keys([Some(KeyCode::Char('q')), Some(KeyCode::Escape)]);
    let options = LiveOptions {
        quit_key: QuitKey::new(KeyCode::Escape),
        ..LiveOptions::default()
    };

    let summary = run_live(
        CaptureSession::from_source(Box::new(source)),
        &mut display,
        &options,
    )
    .unwrap();

    assert_eq!(summary.reason, StopReason::QuitKey);
    assert_eq!(summary.frames, 2);
}

#[test]
fn closing_the_window_stops_the_loop() {
    let (source, counters) = ScriptedSource::endless();
    let mut display = RecordingDisplay {
        close_after: Some(4),
        ..RecordingDisplay::default()
    };

    let summary = run_live(
        CaptureSession::from_source(Box::new(source)),
        &mut display,
        &LiveOptions::default(),
    )
    .unwrap();

    assert_eq!(summary.reason, StopReason::WindowClosed);
    assert_eq!(summary.frames, 4);
    assert_eq!(counters.releases.get(), 1);
}

#[test]
fn display_error_still_releases_once() {
    let (source, counters) = ScriptedSource::endless();
    let mut display = RecordingDisplay {
        fail_show: true,
        ..RecordingDisplay::default()
    };

    let result = run_live(
        CaptureSession::from_source(Box::new(source)),
        &mut display,
        &LiveOptions::default(),
    );

    assert!(matches!(result, Err(ViewerError::Display(_))));
    assert_eq!(counters.reads.get(), 1);
    assert_eq!(counters.releases.get(), 1);
    assert_eq!(display.closes, 1);
}

#[test]
fn dropping_an_unreleased_session_releases_once() {
    let (source, counters) = ScriptedSource::endless();
    let mut session = CaptureSession::from_source(Box::new(source));
    assert!(session.is_opened());
    assert!(session.read().unwrap().is_some());

    drop(session);
    assert_eq!(counters.releases.get(), 1);
}

#[test]
fn explicit_release_then_drop_releases_once() {
    let (source, counters) = ScriptedSource::endless();
    let mut session = CaptureSession::from_source(Box::new(source));

    session.release().unwrap();
    session.release().unwrap();
    assert!(!session.is_opened());
    assert!(matches!(session.read(), Err(ViewerError::SessionClosed)));

    drop(session);
    assert_eq!(counters.releases.get(), 1);
    assert_eq!(counters.reads.get(), 0);
}

#[test]
fn stats_interval_does_not_change_the_loop() {
    for stats_interval in [0, 2] {
        let (source, counters) = ScriptedSource::new(
            std::iter::repeat_with(|| Step::Frame)
                .take(5)
                .chain([Step::End]),
        );
        let mut display = RecordingDisplay::default();
        let options = LiveOptions {
            stats_interval,
            ..LiveOptions::default()
        };

        let summary = run_live(
            CaptureSession::from_source(Box::new(source)),
            &mut display,
            &options,
        )
        .unwrap();

        assert_eq!(summary.reason, StopReason::StreamEnded);
        assert_eq!(summary.frames, 5);
        assert_eq!(display.shows, 5);
        assert_eq!(counters.reads.get(), 6);
        assert_eq!(counters.releases.get(), 1);
    }
}

#[test]
fn session_reports_source_resolution_until_released() {
    let (source, _counters) = ScriptedSource::endless();
    let mut session = CaptureSession::from_source(Box::new(source));
    assert_eq!(session.resolution(), Some((4, 3)));

    session.release().unwrap();
    assert_eq!(session.resolution(), None);
    assert_eq!(CaptureSession::closed().resolution(), None);
}
