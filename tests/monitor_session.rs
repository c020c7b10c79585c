//! End-to-end check: pick a color from a frame, persist it, and run a
//! monitor session from the stored settings.

use chromatap::{
    ActionDispatcher, Color, Coordinate, Error, Frame, Monitor, MonitorConfig, PickSession, Result,
    SequenceSource, Settings, TargetRegistry,
};
use parking_lot::Mutex;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

struct RecordingDispatcher {
    taps: Arc<Mutex<Vec<Coordinate>>>,
}

impl ActionDispatcher for RecordingDispatcher {
    fn dispatch(&mut self, coordinate: Coordinate) -> Result<()> {
        self.taps.lock().push(coordinate);
        Ok(())
    }
}

fn wait_for(what: &str, mut condition: impl FnMut() -> bool) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if condition() {
            return;
        }
        thread::sleep(Duration::from_millis(2));
    }
    panic!("timed out waiting for {}", what);
}

#[test]
fn test_pick_persist_and_monitor_round_trip() {
    let _ = env_logger::builder().is_test(true).try_init();

    // A 4x3 frame with a single red pixel at (2, 1).
    let mut data = vec![32u8; 4 * 3 * 4];
    data[24..28].copy_from_slice(&[255, 0, 0, 255]);
    let snapshot = Frame::tight(4, 3, data).unwrap();

    // Pick the red pixel; an out-of-bounds selection first is ignored.
    let mut session = PickSession::new(snapshot);
    assert!(session.select(9, 9).is_none());
    let pick = session.select(2, 1).expect("in-bounds pick resolves");
    assert_eq!(pick.color, Color::opaque(255, 0, 0));

    // Persist the pick and reload it.
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chromatap.toml");
    let mut settings = Settings::default();
    settings.remember_pick(&pick);
    settings.save(&path).unwrap();

    let settings = Settings::load(&path).unwrap();
    let config = MonitorConfig::from_settings(&settings)
        .unwrap()
        .with_poll_interval(Duration::from_millis(2));
    assert_eq!(config.coordinate, Coordinate::new(2, 1));

    // Arm a registry with the stored color and feed the monitor one
    // frame that matches it within tolerance.
    let registry = Arc::new(TargetRegistry::new());
    registry.add(settings.target_color());
    registry.set_enabled(true);

    let live = Frame::solid(4, 3, Color::opaque(250, 5, 5)).unwrap();
    let source = SequenceSource::new(vec![live]);

    let taps = Arc::new(Mutex::new(Vec::new()));
    let dispatcher = RecordingDispatcher { taps: taps.clone() };

    let mut monitor = Monitor::new(config, registry);
    monitor.start(source, dispatcher).unwrap();
    wait_for("the tap to fire", || !taps.lock().is_empty());
    monitor.stop();

    assert_eq!(*taps.lock(), vec![Coordinate::new(2, 1)]);
    let status = monitor.status();
    assert_eq!(status.match_hits, 1);
    assert_eq!(status.dispatches, 1);
}

#[test]
fn test_session_requires_coordinate() {
    let settings = Settings::default();
    let err = MonitorConfig::from_settings(&settings).unwrap_err();
    assert!(matches!(err, Error::CoordinateUnset));
}
