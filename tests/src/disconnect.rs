use crate::{PAST_UPDATE_INTERVAL, start_session};
use mock_backend::{ManualClock, MockBackend};
use social_presence::{
    Config, HostEvent, InboundEvent, JOIN_REQUEST_CAPACITY, JoinReply, PresenceSession, SdkError,
};
use std::sync::Arc;

#[test]
fn refused_connection_is_reported() {
    let (backend, mock) = MockBackend::new();
    mock.refuse_connection();

    let result = PresenceSession::new(
        Config::default(),
        Box::new(backend),
        Arc::new(ManualClock::default()),
    );

    assert!(matches!(result, Err(SdkError::CouldNotConnect)));
    assert!(mock.calls().is_empty());
}

#[test]
fn lost_connection_while_pumping_tears_down() {
    let (mut session, mock, clock) = start_session();

    mock.send_join_request("1001", "Bob");
    session.tick();
    mock.drop_connection();

    assert!(session.tick().is_empty());
    assert!(!session.is_connected());
    assert_eq!(mock.disconnects(), 1);
    assert_eq!(session.pending_join_requests(), 0);

    session.enter_singleplayer();
    clock.advance(PAST_UPDATE_INTERVAL);
    assert!(session.tick().is_empty());
    assert!(mock.pushes().is_empty());
    assert!(mock.replies().is_empty());
    assert_eq!(mock.disconnects(), 1);
}

#[test]
fn failed_push_tears_down() {
    let (mut session, mock, clock) = start_session();

    session.enter_multiplayer("Server", "cookie");
    mock.drop_connection();
    clock.advance(PAST_UPDATE_INTERVAL);

    assert!(session.tick().is_empty());
    assert!(!session.is_connected());
    assert_eq!(mock.pushes().len(), 1);
    assert_eq!(mock.disconnects(), 1);
}

#[test]
fn failed_reply_tears_down() {
    let (mut session, mock, _clock) = start_session();

    mock.send_join_request("1001", "Bob");
    let events = session.tick();
    let HostEvent::JoinRequest { token, .. } = events[0] else {
        panic!("Expected a join request, got {:?}", events[0]);
    };

    mock.drop_connection();
    assert!(session.respond_join_request(token, JoinReply::Accept));
    assert!(!session.is_connected());
    assert_eq!(mock.disconnects(), 1);
}

#[test]
fn failed_decline_still_delivers_the_rest_of_the_batch() {
    let (mut session, mock, _clock) = start_session();

    for user in 0..JOIN_REQUEST_CAPACITY {
        mock.send_join_request(&format!("user{user}"), &format!("User {user}"));
    }
    assert_eq!(session.tick().len(), JOIN_REQUEST_CAPACITY);

    mock.fail_replies();
    mock.send_join_request("late", "Late");
    mock.send_join_request("later", "Later");
    mock.send_join_accepted("cookie456");
    let events = session.tick();

    assert_eq!(
        events,
        vec![HostEvent::JoinRequestedGame {
            join_secret: "cookie456".to_string()
        }]
    );
    assert_eq!(mock.replies(), vec![("late".to_string(), JoinReply::Ignore)]);
    assert!(!session.is_connected());
    assert_eq!(mock.disconnects(), 1);
}

#[test]
fn shutdown_drops_pending_requests_silently() {
    let (mut session, mock, _clock) = start_session();

    mock.send_join_request("1001", "Bob");
    mock.send_join_request("1002", "Carol");
    mock.send_join_request("1003", "Dave");
    let events = session.tick();
    assert_eq!(events.len(), 3);

    session.shutdown();

    assert_eq!(session.pending_join_requests(), 0);
    assert!(mock.replies().is_empty());
    assert_eq!(mock.disconnects(), 1);

    for event in events {
        if let HostEvent::JoinRequest { token, .. } = event {
            assert!(!session.respond_join_request(token, JoinReply::Accept));
        }
    }
    assert!(mock.replies().is_empty());
}

#[test]
fn dropping_the_session_disconnects() {
    let (session, mock, _clock) = start_session();

    drop(session);

    assert_eq!(mock.disconnects(), 1);
}

#[tokio::test]
async fn events_from_another_task_are_delivered_in_order() {
    let (mut session, mock, _clock) = start_session();
    let sender = mock.inbound_sender();

    let network = tokio::spawn(async move {
        sender
            .send(InboundEvent::JoinRequest {
                remote_user_id: "1001".to_string(),
                display_name: "Bob".to_string(),
            })
            .await
            .unwrap();

        sender
            .send(InboundEvent::JoinAccepted {
                join_secret: "cookie456".to_string(),
            })
            .await
            .unwrap();
    });
    network.await.unwrap();

    let events = session.tick();
    assert_eq!(events.len(), 2);
    assert!(matches!(&events[0], HostEvent::JoinRequest { display_name, .. } if display_name == "Bob"));
    assert_eq!(
        events[1],
        HostEvent::JoinRequestedGame {
            join_secret: "cookie456".to_string()
        }
    );
}
