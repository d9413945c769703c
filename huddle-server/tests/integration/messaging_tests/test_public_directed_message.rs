use huddle_core::ServerEvent;
use std::collections::HashSet;

use crate::utils::{
    collect_events, create_test_hub, init_tracing, join, next_event, send_event, text_message,
};

#[tokio::test]
async fn public_directed_message_still_reaches_the_whole_room() {
    init_tracing();
    let (cmd_tx, mut event_rx, _delivery) = create_test_hub();

    let alice = join(&cmd_tx, "lobby", "Alice").await;
    let _ = next_event(&mut event_rx).await;
    let bob = join(&cmd_tx, "lobby", "Bob").await;
    let _ = collect_events(&mut event_rx, 2).await;
    let carol = join(&cmd_tx, "lobby", "Carol").await;
    let _ = collect_events(&mut event_rx, 3).await;

    send_event(
        &cmd_tx,
        &alice,
        text_message("Alice", "Bob", "lobby", true, "hi"),
    )
    .await;

    let events = collect_events(&mut event_rx, 3).await;
    let recipients: HashSet<_> = events.iter().map(|(conn, _)| conn.clone()).collect();
    assert_eq!(recipients, HashSet::from([alice, bob, carol]));

    for (_, event) in events {
        assert_eq!(
            event,
            ServerEvent::Message("Alice in public talks to Bob: hi".to_string())
        );
    }
}
