use log::trace;
use social_presence::{BackendError, InboundEvent, JoinReply, Presence, PresenceBackend};
use std::sync::{Arc, Mutex, MutexGuard};

/// Everything the plugin asked the backend to do, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    Connect,
    UpdatePresence(Presence),
    ClearPresence,
    Reply {
        remote_user_id: String,
        reply: JoinReply,
    },
    Disconnect,
}

#[derive(Debug, Default)]
struct MockState {
    calls: Vec<BackendCall>,
    refuse_connection: bool,
    failing_replies: bool,
    dropped: bool,
}

/// A backend that records calls and delivers whatever was queued through its [MockHandle].
pub struct MockBackend {
    state: Arc<Mutex<MockState>>,
    inbound_rx: async_channel::Receiver<InboundEvent>,
}

/// The test's side of a [MockBackend].
#[derive(Clone)]
pub struct MockHandle {
    state: Arc<Mutex<MockState>>,
    inbound_tx: async_channel::Sender<InboundEvent>,
}

impl MockBackend {
    pub fn new() -> (Self, MockHandle) {
        let state = Arc::new(Mutex::new(MockState::default()));
        let (inbound_tx, inbound_rx) = async_channel::unbounded();

        (
            Self {
                state: state.clone(),
                inbound_rx,
            },
            MockHandle { state, inbound_tx },
        )
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().expect("Mock state lock poisoned")
    }

    fn record(&self, call: BackendCall) -> Result<(), BackendError> {
        trace!("Mock backend: {call:?}");
        let mut state = self.state();
        state.calls.push(call);
        if state.dropped {
            Err(BackendError::Disconnected)
        } else {
            Ok(())
        }
    }
}

impl PresenceBackend for MockBackend {
    fn name(&self) -> &'static str {
        "Mock"
    }

    fn connect(&mut self) -> Result<(), BackendError> {
        if self.state().refuse_connection {
            return Err(BackendError::NotRunning);
        }

        self.record(BackendCall::Connect)
    }

    fn update_presence(&mut self, presence: &Presence) -> Result<(), BackendError> {
        self.record(BackendCall::UpdatePresence(presence.clone()))
    }

    fn clear_presence(&mut self) -> Result<(), BackendError> {
        self.record(BackendCall::ClearPresence)
    }

    fn reply(&mut self, remote_user_id: &str, reply: JoinReply) -> Result<(), BackendError> {
        self.record(BackendCall::Reply {
            remote_user_id: remote_user_id.to_string(),
            reply,
        })?;

        if self.state().failing_replies {
            Err(BackendError::TransmittingError)
        } else {
            Ok(())
        }
    }

    fn pump(&mut self) -> Result<Vec<InboundEvent>, BackendError> {
        if self.state().dropped {
            return Err(BackendError::Disconnected);
        }

        let mut events = Vec::new();
        while let Ok(event) = self.inbound_rx.try_recv() {
            trace!("Mock backend delivers {event:?}");
            events.push(event);
        }

        Ok(events)
    }

    fn disconnect(&mut self) {
        let _ = self.record(BackendCall::Disconnect);
    }
}

impl MockHandle {
    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().expect("Mock state lock poisoned")
    }

    pub fn calls(&self) -> Vec<BackendCall> {
        self.state().calls.clone()
    }

    /// Every presence pushed so far.
    pub fn pushes(&self) -> Vec<Presence> {
        self.state()
            .calls
            .iter()
            .filter_map(|call| match call {
                BackendCall::UpdatePresence(presence) => Some(presence.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn clears(&self) -> usize {
        self.state()
            .calls
            .iter()
            .filter(|call| **call == BackendCall::ClearPresence)
            .count()
    }

    /// Every join request answer sent so far.
    pub fn replies(&self) -> Vec<(String, JoinReply)> {
        self.state()
            .calls
            .iter()
            .filter_map(|call| match call {
                BackendCall::Reply {
                    remote_user_id,
                    reply,
                } => Some((remote_user_id.clone(), *reply)),
                _ => None,
            })
            .collect()
    }

    pub fn disconnects(&self) -> usize {
        self.state()
            .calls
            .iter()
            .filter(|call| **call == BackendCall::Disconnect)
            .count()
    }

    /// Makes the next connection attempt fail as if the client wasn't running.
    pub fn refuse_connection(&self) {
        self.state().refuse_connection = true;
    }

    /// Makes every following reply fail while pumping keeps working.
    pub fn fail_replies(&self) {
        self.state().failing_replies = true;
    }

    /// Makes every following call fail as if the client went away.
    pub fn drop_connection(&self) {
        self.state().dropped = true;
    }

    /// Queues a join request, delivered on the next pump.
    pub fn send_join_request(&self, remote_user_id: &str, display_name: &str) {
        self.send(InboundEvent::JoinRequest {
            remote_user_id: remote_user_id.to_string(),
            display_name: display_name.to_string(),
        });
    }

    /// Queues an accepted invite, delivered on the next pump.
    pub fn send_join_accepted(&self, join_secret: &str) {
        self.send(InboundEvent::JoinAccepted {
            join_secret: join_secret.to_string(),
        });
    }

    /// The queue's sending side, for feeding events from another task the way a network thread would.
    pub fn inbound_sender(&self) -> async_channel::Sender<InboundEvent> {
        self.inbound_tx.clone()
    }

    fn send(&self, event: InboundEvent) {
        self.inbound_tx
            .try_send(event)
            .expect("Mock backend was dropped");
    }
}
