use huddle_core::{ImageMessage, ServerEvent};
use std::collections::HashSet;

use crate::utils::{
    assert_silent, collect_events, create_test_hub, image_message, init_tracing, join, next_event,
    send_event,
};

#[tokio::test]
async fn broadcast_image_carries_no_target() {
    init_tracing();
    let (cmd_tx, mut event_rx, _delivery) = create_test_hub();

    let alice = join(&cmd_tx, "lobby", "Alice").await;
    let _ = next_event(&mut event_rx).await;
    let bob = join(&cmd_tx, "lobby", "Bob").await;
    let _ = collect_events(&mut event_rx, 2).await;

    send_event(
        &cmd_tx,
        &alice,
        image_message("Alice", "for all", "lobby", false, "base64data"),
    )
    .await;

    let events = collect_events(&mut event_rx, 2).await;
    let recipients: HashSet<_> = events.iter().map(|(conn, _)| conn.clone()).collect();
    assert_eq!(recipients, HashSet::from([alice, bob]));

    for (_, event) in events {
        assert_eq!(
            event,
            ServerEvent::ImageMessage(ImageMessage {
                sender: "Alice".to_string(),
                image: "base64data".to_string(),
                target: None,
            })
        );
    }
}

#[tokio::test]
async fn public_directed_image_names_its_target() {
    init_tracing();
    let (cmd_tx, mut event_rx, _delivery) = create_test_hub();

    let alice = join(&cmd_tx, "lobby", "Alice").await;
    let _ = next_event(&mut event_rx).await;
    let _bob = join(&cmd_tx, "lobby", "Bob").await;
    let _ = collect_events(&mut event_rx, 2).await;

    send_event(
        &cmd_tx,
        &alice,
        image_message("Alice", "Bob", "lobby", true, "base64data"),
    )
    .await;

    let events = collect_events(&mut event_rx, 2).await;
    for (_, event) in events {
        assert_eq!(
            event,
            ServerEvent::ImageMessage(ImageMessage {
                sender: "Alice".to_string(),
                image: "base64data".to_string(),
                target: Some("Bob".to_string()),
            })
        );
    }
}

#[tokio::test]
async fn private_image_unicasts_and_echoes_with_target() {
    init_tracing();
    let (cmd_tx, mut event_rx, _delivery) = create_test_hub();

    let alice = join(&cmd_tx, "lobby", "Alice").await;
    let _ = next_event(&mut event_rx).await;
    let bob = join(&cmd_tx, "lobby", "Bob").await;
    let _ = collect_events(&mut event_rx, 2).await;
    let _carol = join(&cmd_tx, "lobby", "Carol").await;
    let _ = collect_events(&mut event_rx, 3).await;

    send_event(
        &cmd_tx,
        &alice,
        image_message("Alice", "Bob", "lobby", false, "base64data"),
    )
    .await;

    let (conn, event) = next_event(&mut event_rx).await;
    assert_eq!(conn, bob);
    assert_eq!(
        event,
        ServerEvent::ImageMessage(ImageMessage {
            sender: "Alice".to_string(),
            image: "base64data".to_string(),
            target: None,
        })
    );

    let (conn, event) = next_event(&mut event_rx).await;
    assert_eq!(conn, alice);
    assert_eq!(
        event,
        ServerEvent::ImageMessage(ImageMessage {
            sender: "Alice".to_string(),
            image: "base64data".to_string(),
            target: Some("Bob".to_string()),
        })
    );

    assert_silent(&mut event_rx).await;
}
