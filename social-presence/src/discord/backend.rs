use crate::backend::PresenceBackend;
use crate::discord::commands::{self, ACTIVITY_JOIN, ACTIVITY_JOIN_REQUEST};
use crate::discord::event_matcher::{into_error, into_inbound_event};
use crate::discord::{OP_CLOSE, OP_FRAME, OP_PING, OP_PONG};
use crate::enums::inbound_event::InboundEvent;
use crate::enums::join_reply::JoinReply;
use crate::errors::backend_error::BackendError;
use crate::models::presence::Presence;
use async_channel::TryRecvError;
use discord_rich_presence::{DiscordIpc, DiscordIpcClient};
use log::{debug, error, info, trace, warn};
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use tokio::runtime::Runtime;
use tokio::sync::mpsc;

#[derive(Debug)]
enum Command {
    SetActivity(Presence),
    ClearActivity,
    Reply {
        remote_user_id: String,
        reply: JoinReply,
    },
}

/// Talks to the Discord client through two IPC connections: one for the commands we send, one for the events we
/// subscribe to. Each is owned by a blocking worker, so the host's thread never waits on Discord after connecting.
pub struct DiscordBackend {
    application_id: String,
    rt: Option<Runtime>,
    command_tx: Option<mpsc::UnboundedSender<Command>>,
    event_rx: Option<async_channel::Receiver<InboundEvent>>,
}

impl DiscordBackend {
    pub fn new(application_id: String) -> Self {
        Self {
            application_id,
            rt: None,
            command_tx: None,
            event_rx: None,
        }
    }

    fn open_connection(&self) -> Result<DiscordIpcClient, BackendError> {
        let mut client = DiscordIpcClient::new(&self.application_id);
        client.connect().map_err(|error| {
            debug!("{error}");
            BackendError::NotRunning
        })?;

        Ok(client)
    }

    fn send(&self, command: Command) -> Result<(), BackendError> {
        trace!("C: {command:?}");
        self.command_tx
            .as_ref()
            .ok_or(BackendError::Disconnected)?
            .send(command)
            .or(Err(BackendError::Disconnected))
    }
}

impl PresenceBackend for DiscordBackend {
    fn name(&self) -> &'static str {
        "Discord"
    }

    fn connect(&mut self) -> Result<(), BackendError> {
        let rt = Runtime::new().or(Err(BackendError::CouldNotCreateRuntime))?;
        let command_client = self.open_connection()?;
        let mut event_client = self.open_connection()?;

        let nonce = Arc::new(AtomicU32::new(0));
        for event in [ACTIVITY_JOIN, ACTIVITY_JOIN_REQUEST] {
            event_client
                .send(
                    commands::subscribe(event, nonce.fetch_add(1, Ordering::SeqCst)),
                    OP_FRAME,
                )
                .or(Err(BackendError::TransmittingError))?;
        }

        let (event_tx, event_rx) = async_channel::unbounded::<InboundEvent>();
        let (command_tx, command_rx) = mpsc::unbounded_channel::<Command>();

        let event_task_tx = event_tx.clone();
        rt.spawn_blocking(move || {
            if let Err(error) = receive_events(event_client, &event_task_tx) {
                warn!("Discord event connection lost: {error}");
            }

            event_task_tx.close();
        });

        rt.spawn_blocking(move || {
            if let Err(error) = send_commands(command_client, command_rx, nonce) {
                warn!("Discord command connection lost: {error}");
            }

            event_tx.close();
        });

        self.rt = Some(rt);
        self.command_tx = Some(command_tx);
        self.event_rx = Some(event_rx);
        Ok(())
    }

    fn update_presence(&mut self, presence: &Presence) -> Result<(), BackendError> {
        self.send(Command::SetActivity(presence.clone()))
    }

    fn clear_presence(&mut self) -> Result<(), BackendError> {
        self.send(Command::ClearActivity)
    }

    fn reply(&mut self, remote_user_id: &str, reply: JoinReply) -> Result<(), BackendError> {
        self.send(Command::Reply {
            remote_user_id: remote_user_id.to_string(),
            reply,
        })
    }

    fn pump(&mut self) -> Result<Vec<InboundEvent>, BackendError> {
        let event_rx = self.event_rx.as_ref().ok_or(BackendError::Disconnected)?;

        let mut events = Vec::new();
        loop {
            match event_rx.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Empty) => return Ok(events),
                // Hand over what arrived before the connection dropped, the next pump reports it
                Err(TryRecvError::Closed) if !events.is_empty() => return Ok(events),
                Err(TryRecvError::Closed) => return Err(BackendError::Disconnected),
            }
        }
    }

    fn disconnect(&mut self) {
        // Dropping the sender lets the command worker close its connection
        self.command_tx.take();
        self.event_rx.take();

        // The event worker stays blocked on its socket until Discord sends something, don't wait for it
        if let Some(rt) = self.rt.take() {
            rt.shutdown_background();
        }
    }
}

impl Drop for DiscordBackend {
    fn drop(&mut self) {
        self.disconnect();
    }
}

/// Forwards subscribed events until Discord closes the connection or nobody pumps anymore.
fn receive_events(
    mut client: DiscordIpcClient,
    event_tx: &async_channel::Sender<InboundEvent>,
) -> Result<(), BackendError> {
    loop {
        let (opcode, payload) = client.recv().map_err(|error| {
            debug!("{error}");
            BackendError::ReceivingError
        })?;

        match u8::try_from(opcode) {
            Ok(OP_FRAME) => {
                trace!("S: {payload}");
                if let Some(error) = into_error(&payload) {
                    warn!("Discord returned an error: {error}");
                }

                if let Some(event) = into_inbound_event(&payload)
                    && event_tx.send_blocking(event).is_err()
                {
                    return Ok(());
                }
            }

            Ok(OP_PING) => {
                client.send(payload, OP_PONG).map_err(|error| {
                    debug!("{error}");
                    BackendError::TransmittingError
                })?;
            }

            Ok(OP_CLOSE) => {
                info!("Discord closed the event connection: {payload}");
                return Err(BackendError::Disconnected);
            }

            _ => trace!("Ignoring opcode {opcode}"),
        }
    }
}

/// Sends commands in order, reading each response before the next. Returns once the backend drops its sender.
fn send_commands(
    mut client: DiscordIpcClient,
    mut command_rx: mpsc::UnboundedReceiver<Command>,
    nonce: Arc<AtomicU32>,
) -> Result<(), BackendError> {
    while let Some(command) = command_rx.blocking_recv() {
        let sent = match &command {
            Command::SetActivity(presence) => client.set_activity(commands::activity(presence)),
            Command::ClearActivity => client.clear_activity(),
            Command::Reply {
                remote_user_id,
                reply,
            } => client.send(
                commands::join_reply(
                    remote_user_id,
                    *reply,
                    nonce.fetch_add(1, Ordering::SeqCst),
                ),
                OP_FRAME,
            ),
        };

        sent.map_err(|error| {
            error!("Could not send {command:?} to Discord: {error}");
            BackendError::TransmittingError
        })?;

        let (_, payload) = client.recv().map_err(|error| {
            debug!("{error}");
            BackendError::ReceivingError
        })?;

        trace!("S: {payload}");
        if let Some(error) = into_error(&payload) {
            warn!("Discord rejected {command:?}: {error}");
        }
    }

    let _ = client.close();
    Ok(())
}
