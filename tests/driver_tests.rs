//! Driver tests - timer scheduling against a live session, and the event log

use std::path::PathBuf;
use std::time::{Duration, Instant};

use color_tetris::core::{Board, EngineConfig, GameSession, Piece};
use color_tetris::driver::{drive, EventLog, TickDriver};
use color_tetris::types::{BlockColor, Rotation, Shape};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn session_with_pending_clear(seed: u32) -> GameSession {
    let board = Board::from_rows(&[".#########"], BlockColor::Green);
    let mut session = GameSession::with_board(seed, EngineConfig::default(), board);
    let piece = Piece {
        shape: Shape::I,
        color: BlockColor::Sky,
        rotation: Rotation::West,
        x: -1,
        y: 1,
    };
    assert!(session.place_active(piece));
    session
}

fn temp_log_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "color-tetris-{}-{}.jsonl",
        name,
        std::process::id()
    ))
}

#[test]
fn test_gravity_follows_drop_interval() {
    let t0 = Instant::now();
    let mut session = GameSession::new(21);
    let mut driver = TickDriver::new();
    let start_y = session.active().unwrap().y;

    assert_eq!(drive(&mut session, &mut driver, t0), 0);
    assert_eq!(drive(&mut session, &mut driver, t0 + ms(999)), 0);
    assert_eq!(drive(&mut session, &mut driver, t0 + ms(1000)), 1);
    assert_eq!(session.active().unwrap().y, start_y + 1);
    assert_eq!(driver.next_deadline(), Some(t0 + ms(2000)));
}

#[test]
fn test_flash_runs_to_completion_then_gravity_resumes() {
    let t0 = Instant::now();
    let mut session = session_with_pending_clear(22);
    let mut driver = TickDriver::new();

    assert!(session.hard_drop());
    drive(&mut session, &mut driver, t0);
    let plan = driver.plan().unwrap();
    assert_eq!((plan.gravity_ms, plan.flash_ms), (None, Some(150)));

    for step in 1..=5u64 {
        assert_eq!(drive(&mut session, &mut driver, t0 + ms(150 * step)), 1);
        assert_eq!(session.score(), 0);
    }
    assert_eq!(drive(&mut session, &mut driver, t0 + ms(900)), 1);

    assert_eq!(session.score(), 11);
    assert!(session.active().is_some());
    let plan = driver.plan().unwrap();
    assert_eq!((plan.gravity_ms, plan.flash_ms), (Some(1000), None));
    assert_eq!(driver.next_deadline(), Some(t0 + ms(1900)));
}

#[test]
fn test_new_game_restarts_timers() {
    let t0 = Instant::now();
    let mut session = GameSession::new(23);
    let mut driver = TickDriver::new();
    drive(&mut session, &mut driver, t0);

    session.new_game();
    drive(&mut session, &mut driver, t0 + ms(800));

    assert_eq!(driver.plan().unwrap().epoch, 2);
    assert_eq!(driver.next_deadline(), Some(t0 + ms(1800)));
    // The old epoch's deadline at t0 + 1000 no longer fires.
    assert_eq!(drive(&mut session, &mut driver, t0 + ms(1000)), 0);
}

#[test]
fn test_game_over_stops_timers() {
    let mut lines = vec![""; 20];
    lines[0] = "...####...";
    let board = Board::from_rows(&lines, BlockColor::Red);
    let mut session = GameSession::with_board(24, EngineConfig::default(), board);
    let mut driver = TickDriver::new();

    let t0 = Instant::now();
    drive(&mut session, &mut driver, t0);
    assert_eq!(driver.next_deadline(), None);
    assert_eq!(driver.timeout(t0, ms(50)), ms(50));
}

#[test]
fn test_event_log_writes_one_json_object_per_line() {
    let path = temp_log_path("events");
    let _ = std::fs::remove_file(&path);

    let mut session = GameSession::with_board(
        25,
        EngineConfig::instant(),
        Board::from_rows(&[".#########"], BlockColor::Green),
    );
    assert!(session.place_active(Piece {
        shape: Shape::I,
        color: BlockColor::Sky,
        rotation: Rotation::West,
        x: -1,
        y: 1,
    }));
    session.hard_drop();

    let log = EventLog::start(path.to_str().unwrap()).unwrap();
    let events = session.take_events();
    for event in &events {
        log.record(event);
    }
    log.close();

    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<serde_json::Value> = text
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    let types: Vec<&str> = lines.iter().map(|v| v["type"].as_str().unwrap()).collect();

    assert_eq!(lines.len(), events.len());
    assert_eq!(
        types,
        vec![
            "new_game",
            "spawned",
            "locked",
            "rows_flashing",
            "rows_cleared",
            "spawned"
        ]
    );
    assert_eq!(lines[2]["color"], "sky");
    assert_eq!(lines[4]["rows"], serde_json::json!([19]));
    assert_eq!(lines[4]["points"], 11);
    assert!(lines.iter().all(|v| v["epoch"] == 1));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_event_log_appends() {
    let path = temp_log_path("append");
    let _ = std::fs::remove_file(&path);
    let mut session = GameSession::new(26);

    for _ in 0..2 {
        let log = EventLog::start(path.to_str().unwrap()).unwrap();
        for event in session.take_events() {
            log.record(&event);
        }
        log.close();
        session.new_game();
    }

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), 4);
    assert!(text.ends_with('\n'));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_event_log_keeps_epochs_when_new_game_precedes_drain() {
    let path = temp_log_path("epochs");
    let _ = std::fs::remove_file(&path);
    let mut session = GameSession::new(27);
    session.hard_drop();
    session.new_game();

    let log = EventLog::start(path.to_str().unwrap()).unwrap();
    for event in session.take_events() {
        log.record(&event);
    }
    log.close();

    let text = std::fs::read_to_string(&path).unwrap();
    let records: Vec<(String, u64)> = text
        .lines()
        .map(|l| {
            let v: serde_json::Value = serde_json::from_str(l).unwrap();
            (
                v["type"].as_str().unwrap().to_string(),
                v["epoch"].as_u64().unwrap(),
            )
        })
        .collect();

    let expected: Vec<(String, u64)> = [
        ("new_game", 1),
        ("spawned", 1),
        ("locked", 1),
        ("spawned", 1),
        ("new_game", 2),
        ("spawned", 2),
    ]
    .iter()
    .map(|&(t, e)| (t.to_string(), e))
    .collect();
    assert_eq!(records, expected);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_no_log_path_means_no_log() {
    assert!(EventLog::start_optional(None).unwrap().is_none());
}
