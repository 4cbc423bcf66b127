use crate::enums::activity_kind::ActivityKind;

/// State text shown while spectating.
pub const SPECTATING_STATE: &str = "Spectating";

/// The presence the user should currently be shown with. Only pushed to the network by the update scheduler.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct Presence {
    /// Server name, empty in singleplayer.
    pub details: String,
    /// Company name or [SPECTATING_STATE]. Only meaningful while [in_game][Presence::in_game].
    pub state: Option<String>,
    /// Lets other users request to join. Empty disables joining.
    pub join_secret: String,
    /// Session start, in seconds since the Unix epoch.
    pub start_timestamp: Option<i64>,
    pub kind: ActivityKind,
    pub large_image_key: String,
    pub in_game: bool,
}

impl Presence {
    pub(crate) fn new(large_image_key: String) -> Self {
        Self {
            details: String::new(),
            state: None,
            join_secret: String::new(),
            start_timestamp: None,
            kind: ActivityKind::Playing,
            large_image_key,
            in_game: false,
        }
    }

    pub(crate) fn enter_singleplayer(&mut self, now: i64) {
        self.details.clear();
        self.kind = ActivityKind::Playing;
        self.join_secret.clear();
        self.start_timestamp = Some(now);
        self.in_game = true;
    }

    pub(crate) fn enter_multiplayer(&mut self, server_name: &str, join_secret: &str, now: i64) {
        self.details = server_name.to_string();
        self.kind = ActivityKind::Playing;
        self.join_secret = join_secret.to_string();
        self.start_timestamp = Some(now);
        self.in_game = true;
    }

    /// Returns false, leaving everything untouched, when not in game.
    pub(crate) fn enter_company(&mut self, company_name: &str) -> bool {
        if !self.in_game {
            return false;
        }

        self.kind = ActivityKind::Playing;
        self.state = Some(company_name.to_string());
        true
    }

    /// Returns false, leaving everything untouched, when not in game.
    pub(crate) fn enter_spectate(&mut self) -> bool {
        if !self.in_game {
            return false;
        }

        self.kind = ActivityKind::Watching;
        self.state = Some(SPECTATING_STATE.to_string());
        true
    }

    pub(crate) fn exit_gameplay(&mut self) {
        self.details.clear();
        self.state = None;
        self.join_secret.clear();
        self.start_timestamp = None;
        self.in_game = false;
    }
}
