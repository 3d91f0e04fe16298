//! Async game loop tests on a paused tokio clock

use std::time::Duration;

use blocktris::core::{GameState, PieceGenerator};
use blocktris::driver::{spawn_driver, spawn_game_loop, DriverConfig, GameDriver};
use blocktris::types::{GameAction, GameEvent, GamePhase, PieceKind};

fn t_piece_driver(config: &DriverConfig) -> GameDriver {
    let game = GameState::with_generator(PieceGenerator::cycle(&[PieceKind::T]));
    GameDriver::with_game(game, config)
}

#[tokio::test(start_paused = true)]
async fn test_gravity_ticks_on_runtime_clock() {
    let (handle, mut events) =
        spawn_driver(t_piece_driver(&DriverConfig::default()), None).unwrap();

    handle.key(GameAction::NewGame).await.unwrap();
    assert_eq!(events.recv().await, Some(GameEvent::GameStarted { level: 1 }));

    tokio::time::sleep(Duration::from_millis(3_500)).await;
    let snapshot = handle.snapshot();
    assert_eq!(snapshot.phase(), GamePhase::Playing);
    assert_eq!(snapshot.position.y, 3);

    handle.join().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_paused_game_does_not_fall() {
    let (handle, _events) = spawn_driver(t_piece_driver(&DriverConfig::default()), None).unwrap();

    handle.key(GameAction::NewGame).await.unwrap();
    handle.key(GameAction::Pause).await.unwrap();
    tokio::time::sleep(Duration::from_secs(30)).await;

    let snapshot = handle.snapshot();
    assert_eq!(snapshot.phase(), GamePhase::Paused);
    assert_eq!(snapshot.position.y, 0);

    handle.join().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_hard_drop_events_reach_subscriber() {
    let (handle, mut events) = spawn_driver(t_piece_driver(&DriverConfig::default()), None).unwrap();

    handle.key(GameAction::NewGame).await.unwrap();
    handle.key(GameAction::HardDrop).await.unwrap();

    assert_eq!(events.recv().await, Some(GameEvent::GameStarted { level: 1 }));
    assert_eq!(
        events.recv().await,
        Some(GameEvent::ScoreUpdated {
            score: 2,
            increase: 2,
            level: 1
        })
    );

    let mut snapshots = handle.subscribe();
    let snapshot = snapshots.borrow_and_update().clone();
    assert_eq!(snapshot.score, 2);
    assert_eq!(snapshot.board.occupied_count(), 4);

    handle.join().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_time_up_pauses_match() {
    let config = DriverConfig {
        match_ms: Some(5_000),
        ..DriverConfig::default()
    };
    let (handle, mut events) = spawn_game_loop(config).unwrap();
    handle.action(GameAction::NewGame).await.unwrap();

    loop {
        match events.recv().await {
            Some(GameEvent::TimeUp { .. }) => break,
            Some(_) => continue,
            None => panic!("event stream closed before time ran out"),
        }
    }
    assert_eq!(handle.snapshot().phase(), GamePhase::Paused);

    // Resume refused while the match is over
    handle.key(GameAction::Pause).await.unwrap();
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(handle.snapshot().phase(), GamePhase::Paused);

    handle.join().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_stops_loop() {
    let (handle, mut events) = spawn_game_loop(DriverConfig::default()).unwrap();
    handle.shutdown();
    handle.shutdown();

    // Loop exit drops the event sender
    assert_eq!(events.recv().await, None);
    assert!(handle.is_finished() || handle.key(GameAction::Pause).await.is_err());
    handle.join().await.unwrap();
}

#[tokio::test]
async fn test_event_log_complete_after_join() {
    let path = std::env::temp_dir().join(format!(
        "blocktris-runtime-log-{}.jsonl",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);

    let config = DriverConfig {
        event_log_path: Some(path.to_string_lossy().into_owned()),
        ..DriverConfig::default()
    };
    let (handle, _events) = spawn_driver(t_piece_driver(&config), config.event_log_path).unwrap();
    handle.key(GameAction::NewGame).await.unwrap();
    handle.key(GameAction::HardDrop).await.unwrap();
    handle.join().await.unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let kinds: Vec<String> = text
        .lines()
        .map(|line| {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            value["event"]["type"].as_str().unwrap().to_string()
        })
        .collect();
    assert_eq!(kinds, vec!["game_start", "score_update"]);
    let _ = std::fs::remove_file(&path);
}
