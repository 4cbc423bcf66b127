use crate::start_session;
use social_presence::{HostEvent, JOIN_REQUEST_CAPACITY, JoinReply, JoinToken};
use std::time::Duration;

fn requested_tokens(events: &[HostEvent]) -> Vec<JoinToken> {
    events
        .iter()
        .filter_map(|event| match event {
            HostEvent::JoinRequest { token, .. } => Some(*token),
            _ => None,
        })
        .collect()
}

#[test]
fn join_request_reaches_the_host() {
    let (mut session, mock, _clock) = start_session();
    session.enter_multiplayer("Alice's Server", "cookie123");

    mock.send_join_request("1001", "Bob");
    let events = session.tick();

    assert_eq!(events.len(), 1);
    let HostEvent::JoinRequest {
        token,
        display_name,
    } = &events[0]
    else {
        panic!("Expected a join request, got {:?}", events[0]);
    };
    assert_eq!(display_name, "Bob");
    assert_eq!(token.index, 0);
    assert_eq!(session.pending_join_requests(), 1);
    assert!(mock.replies().is_empty());
}

#[test]
fn requests_beyond_capacity_are_ignored() {
    let (mut session, mock, _clock) = start_session();

    for user in 0..=JOIN_REQUEST_CAPACITY {
        mock.send_join_request(&format!("user{user}"), &format!("User {user}"));
    }
    let events = session.tick();

    let tokens = requested_tokens(&events);
    assert_eq!(tokens.len(), JOIN_REQUEST_CAPACITY);
    assert_eq!(session.pending_join_requests(), JOIN_REQUEST_CAPACITY);
    assert_eq!(
        mock.replies(),
        vec![(format!("user{JOIN_REQUEST_CAPACITY}"), JoinReply::Ignore)]
    );

    let mut indices: Vec<_> = tokens.iter().map(|token| token.index).collect();
    indices.sort_unstable();
    indices.dedup();
    assert_eq!(indices.len(), JOIN_REQUEST_CAPACITY);
}

#[test]
fn a_request_is_answered_once() {
    let (mut session, mock, _clock) = start_session();

    mock.send_join_request("1001", "Bob");
    let token = requested_tokens(&session.tick())[0];

    assert!(session.respond_join_request(token, JoinReply::Accept));
    assert!(!session.respond_join_request(token, JoinReply::Reject));

    assert_eq!(
        mock.replies(),
        vec![("1001".to_string(), JoinReply::Accept)]
    );
    assert_eq!(session.pending_join_requests(), 0);
}

#[test]
fn reused_slot_does_not_accept_old_tokens() {
    let (mut session, mock, _clock) = start_session();

    mock.send_join_request("1001", "Bob");
    let first = requested_tokens(&session.tick())[0];
    assert!(session.respond_join_request(first, JoinReply::Reject));

    mock.send_join_request("1002", "Carol");
    let second = requested_tokens(&session.tick())[0];
    assert_eq!(second.index, first.index);
    assert_ne!(second, first);

    assert!(!session.respond_join_request(first, JoinReply::Accept));
    assert_eq!(session.pending_join_requests(), 1);

    assert!(session.respond_join_request(second, JoinReply::Accept));
    assert_eq!(
        mock.replies(),
        vec![
            ("1001".to_string(), JoinReply::Reject),
            ("1002".to_string(), JoinReply::Accept)
        ]
    );
}

#[test]
fn unanswered_requests_expire() {
    let (mut session, mock, clock) = start_session();

    mock.send_join_request("1001", "Bob");
    let token = requested_tokens(&session.tick())[0];

    clock.advance(Duration::from_secs(600));
    assert!(session.tick().is_empty());

    clock.advance(Duration::from_secs(1));
    let events = session.tick();
    assert_eq!(events, vec![HostEvent::JoinRequestCancelled { token }]);
    assert!(session.tick().is_empty());

    assert!(!session.respond_join_request(token, JoinReply::Accept));
    assert!(mock.replies().is_empty());
    assert_eq!(session.pending_join_requests(), 0);
}

#[test]
fn expiry_is_reported_before_new_requests() {
    let (mut session, mock, clock) = start_session();

    mock.send_join_request("1001", "Bob");
    let old = requested_tokens(&session.tick())[0];

    clock.advance(Duration::from_secs(601));
    mock.send_join_request("1002", "Carol");
    let events = session.tick();

    assert_eq!(events.len(), 2);
    assert_eq!(events[0], HostEvent::JoinRequestCancelled { token: old });
    assert!(matches!(
        &events[1],
        HostEvent::JoinRequest { display_name, .. } if display_name == "Carol"
    ));
}

#[test]
fn accepted_invite_is_forwarded() {
    let (mut session, mock, _clock) = start_session();

    mock.send_join_accepted("cookie456");
    let events = session.tick();

    assert_eq!(
        events,
        vec![HostEvent::JoinRequestedGame {
            join_secret: "cookie456".to_string()
        }]
    );
    assert_eq!(session.pending_join_requests(), 0);
}
