use crate::{PAST_UPDATE_INTERVAL, start_session};
use social_presence::ActivityKind;
use std::time::Duration;

#[test]
fn multiplayer_presence_is_pushed_after_the_interval() {
    let (mut session, mock, clock) = start_session();

    session.enter_multiplayer("Alice's Server", "cookie123");
    session.tick();
    assert!(mock.pushes().is_empty());

    clock.advance(PAST_UPDATE_INTERVAL);
    session.tick();

    let pushes = mock.pushes();
    assert_eq!(pushes.len(), 1);
    assert_eq!(pushes[0].details, "Alice's Server");
    assert_eq!(pushes[0].join_secret, "cookie123");
    assert_eq!(pushes[0].kind, ActivityKind::Playing);
    assert_eq!(pushes[0].large_image_key, "openttd_512");
    assert_eq!(pushes[0].start_timestamp, Some(1_700_000_000));
    assert!(!session.needs_update());
}

#[test]
fn exactly_the_interval_is_not_enough() {
    let (mut session, mock, clock) = start_session();

    session.enter_singleplayer();
    clock.advance(Duration::from_secs(10));
    session.tick();
    assert!(mock.pushes().is_empty());

    clock.advance(Duration::from_millis(1));
    session.tick();
    assert_eq!(mock.pushes().len(), 1);
}

#[test]
fn updates_are_coalesced_and_the_latest_wins() {
    let (mut session, mock, clock) = start_session();

    session.enter_singleplayer();
    session.exit_gameplay();
    session.enter_multiplayer("First", "a");
    session.enter_company("Bob Transport", 1);
    session.enter_multiplayer("Second", "b");
    session.enter_spectate();

    clock.advance(PAST_UPDATE_INTERVAL);
    session.tick();
    session.tick();

    let pushes = mock.pushes();
    assert_eq!(pushes.len(), 1);
    assert_eq!(pushes[0].details, "Second");
    assert_eq!(pushes[0].join_secret, "b");
    assert_eq!(pushes[0].state.as_deref(), Some("Spectating"));
    assert_eq!(pushes[0].kind, ActivityKind::Watching);
}

#[test]
fn at_most_one_push_per_interval() {
    let (mut session, mock, clock) = start_session();
    session.enter_multiplayer("Server", "cookie");

    // A lifecycle call every second for two minutes, ticking in between
    for second in 0..120 {
        session.enter_company(&format!("Company {second}"), second);
        session.tick();
        clock.advance(Duration::from_secs(1));
    }

    // Flushed at 11s, then every 11s since the interval must be exceeded
    let pushes = mock.pushes();
    assert_eq!(pushes.len(), 10);
    assert_eq!(pushes[0].state.as_deref(), Some("Company 11"));
    assert_eq!(pushes[9].state.as_deref(), Some("Company 110"));
}

#[test]
fn nothing_is_pushed_without_changes() {
    let (mut session, mock, clock) = start_session();

    for _ in 0..5 {
        clock.advance(PAST_UPDATE_INTERVAL);
        session.tick();
    }

    assert!(mock.pushes().is_empty());
    assert_eq!(mock.clears(), 0);
}

#[test]
fn leaving_the_game_clears_the_presence() {
    let (mut session, mock, clock) = start_session();

    session.enter_singleplayer();
    clock.advance(PAST_UPDATE_INTERVAL);
    session.tick();

    session.exit_gameplay();
    session.tick();
    assert_eq!(mock.clears(), 0);

    clock.advance(PAST_UPDATE_INTERVAL);
    session.tick();
    assert_eq!(mock.pushes().len(), 1);
    assert_eq!(mock.clears(), 1);
}
