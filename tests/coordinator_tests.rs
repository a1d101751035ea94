#![cfg(feature = "std")]

use std::sync::Arc;

use tetroship::{Coordinator, InMemoryTransport, Phase, PlayerId, PlayerSession, Transport};
use tokio::sync::mpsc;
use tokio::time::{timeout, Duration};

const EVEN_ROWS: &str = "I 2 0 0 0 2 0 0 2 2 0 0 4 2 0 0 6 2 0 0 8";
const ODD_ROWS: &str = "I 2 0 0 1 2 0 0 3 2 0 0 5 2 0 0 7 2 0 0 9";

/// Seat `player` behind an in-memory pipe and run its session in the background.
async fn connect(coordinator: &Arc<Coordinator>, player: PlayerId) -> InMemoryTransport {
    let (client, server) = InMemoryTransport::pair();
    let session = PlayerSession::join(coordinator.clone(), player, Box::new(server))
        .await
        .unwrap();
    tokio::spawn(session.run());
    client
}

async fn request(client: &mut InMemoryTransport, line: &str) -> String {
    client.send(line).await.unwrap();
    next(client).await
}

async fn next(client: &mut InMemoryTransport) -> String {
    timeout(Duration::from_secs(5), client.recv())
        .await
        .expect("timed out waiting for a response")
        .unwrap()
        .expect("connection closed")
}

async fn into_combat(p1: &mut InMemoryTransport, p2: &mut InMemoryTransport) {
    assert_eq!(request(p1, "B 10 10").await, "A");
    assert_eq!(request(p2, "B").await, "A");
    assert_eq!(request(p1, EVEN_ROWS).await, "A");
    assert_eq!(request(p2, ODD_ROWS).await, "A");
}

#[tokio::test]
async fn seat_cannot_be_taken_twice() {
    let coordinator = Arc::new(Coordinator::new());
    let (tx, _rx) = mpsc::unbounded_channel();
    coordinator.seat(PlayerId::One, tx.clone()).await.unwrap();
    assert!(coordinator.seat(PlayerId::One, tx.clone()).await.is_err());
    assert!(coordinator.seat(PlayerId::Two, tx).await.is_ok());
}

#[tokio::test]
async fn submit_routes_responses_to_seats() {
    let coordinator = Coordinator::new();
    let (tx1, mut rx1) = mpsc::unbounded_channel();
    let (tx2, mut rx2) = mpsc::unbounded_channel();
    let seat1 = coordinator.seat(PlayerId::One, tx1).await.unwrap();
    let seat2 = coordinator.seat(PlayerId::Two, tx2).await.unwrap();

    assert!(coordinator.submit(&seat1, "B 10 10").await.is_none());
    assert_eq!(rx1.recv().await.unwrap().to_string(), "A");
    coordinator.submit(&seat2, "B").await;
    assert_eq!(rx2.recv().await.unwrap().to_string(), "A");
    assert_eq!(coordinator.snapshot().await.phase, Phase::AwaitingPlacement);

    let result = coordinator.submit(&seat2, "F").await.unwrap();
    assert_eq!(result.winner, PlayerId::One);
    assert_eq!(rx2.recv().await.unwrap().to_string(), "H 0");
    assert_eq!(rx1.recv().await.unwrap().to_string(), "H 1");
    assert_eq!(coordinator.generation().await, 1);
    assert_eq!(coordinator.snapshot().await.phase, Phase::AwaitingSetup);

    // Old seats belong to a finished match.
    assert!(coordinator.submit(&seat1, "B 10 10").await.is_none());
    assert_eq!(rx1.recv().await.unwrap().to_string(), "E 100");
    assert!(coordinator.disconnect(&seat2).await.is_none());
}

#[tokio::test]
async fn disconnect_forfeits_and_resets() {
    let coordinator = Arc::new(Coordinator::new());
    let mut p1 = connect(&coordinator, PlayerId::One).await;
    let mut p2 = connect(&coordinator, PlayerId::Two).await;
    into_combat(&mut p1, &mut p2).await;
    assert_eq!(request(&mut p1, "S 0 0").await, "R 5 M");

    let finished = {
        let coordinator = coordinator.clone();
        tokio::spawn(async move { coordinator.wait_finished(0).await })
    };
    p1.close();
    assert_eq!(next(&mut p2).await, "H 1");
    timeout(Duration::from_secs(5), finished).await.unwrap().unwrap();

    assert_eq!(coordinator.generation().await, 1);
    assert_eq!(coordinator.snapshot().await.phase, Phase::AwaitingSetup);

    // The survivor's connection is stale until it reconnects.
    assert_eq!(request(&mut p2, "B").await, "E 100");

    let mut p1 = connect(&coordinator, PlayerId::One).await;
    assert_eq!(request(&mut p1, "B 11 11").await, "A");
}

#[tokio::test]
async fn out_of_turn_shot_is_rejected_not_queued() {
    let coordinator = Arc::new(Coordinator::new());
    let mut p1 = connect(&coordinator, PlayerId::One).await;
    let mut p2 = connect(&coordinator, PlayerId::Two).await;
    into_combat(&mut p1, &mut p2).await;

    assert_eq!(request(&mut p2, "S 0 0").await, "E 103");
    assert_eq!(request(&mut p1, "S 9 9").await, "R 5 M");
    assert_eq!(request(&mut p2, "S 0 0").await, "R 5 H");
    assert_eq!(request(&mut p1, "Q").await, "G 5 M 9 9");
}

#[tokio::test]
async fn idle_session_is_treated_as_disconnected() {
    let coordinator = Arc::new(Coordinator::new());
    let (_p1_client, p1_server) = InMemoryTransport::pair();
    let session = PlayerSession::join(coordinator.clone(), PlayerId::One, Box::new(p1_server))
        .await
        .unwrap()
        .with_idle_timeout(Some(Duration::from_millis(50)));
    let mut p2 = connect(&coordinator, PlayerId::Two).await;

    timeout(Duration::from_secs(5), session.run())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(next(&mut p2).await, "H 1");
    assert_eq!(coordinator.generation().await, 1);
}
