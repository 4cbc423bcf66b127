//! The C ABI the host loads the library through. The host resolves [SocialInit], hands over its callbacks and gets
//! back a table of entry points.
//!
//! The host API has no context argument, so the one live session sits in a process-wide slot here. Callbacks are
//! invoked after the slot is unlocked, which lets the host answer a join request from inside `handle_join_request`.

#![allow(non_snake_case)]

use crate::clock::SystemClock;
use crate::config::Config;
use crate::discord::backend::DiscordBackend;
use crate::enums::host_event::HostEvent;
use crate::enums::join_reply::JoinReply;
use crate::errors::sdk_error::SdkError;
use crate::logging;
use crate::models::join_token::JoinToken;
use crate::session::PresenceSession;
use log::{error, warn};
use std::ffi::{CStr, CString, c_char, c_int, c_void};
use std::ptr;
use std::sync::{Arc, Mutex};

/// Version of the host API implemented here. [SocialInit] refuses any other.
pub const SOCIAL_PLUGIN_API_VERSION: c_int = 1;

/// Entry points filled in for the host by [SocialInit].
#[repr(C)]
#[derive(Debug, Default, Clone, Copy)]
pub struct SocialPluginApi {
    pub shutdown: Option<extern "C" fn()>,
    pub event_loop: Option<extern "C" fn()>,
    pub enter_singleplayer: Option<extern "C" fn()>,
    pub enter_multiplayer: Option<unsafe extern "C" fn(*const c_char, *const c_char)>,
    pub enter_company: Option<unsafe extern "C" fn(*const c_char, c_int)>,
    pub enter_spectate: Option<extern "C" fn()>,
    pub exit_gameplay: Option<extern "C" fn()>,
    pub respond_join_request: Option<extern "C" fn(*mut c_void, c_int)>,
}

/// Callbacks supplied by the host. Null entries are skipped. Strings are only valid during the call.
#[repr(C)]
#[derive(Debug, Default, Clone, Copy)]
pub struct SocialPluginCallbacks {
    pub handle_join_request: Option<extern "C" fn(*mut c_void, *const c_char)>,
    pub handle_join_request_cancel: Option<extern "C" fn(*mut c_void)>,
    pub join_requested_game: Option<extern "C" fn(*const c_char)>,
}

impl SocialPluginCallbacks {
    fn dispatch(&self, event: HostEvent) {
        match event {
            HostEvent::JoinRequest {
                token,
                display_name,
            } => {
                if let Some(handle_join_request) = self.handle_join_request {
                    let display_name = to_c_string(display_name);
                    handle_join_request(into_cookie(token), display_name.as_ptr());
                }
            }

            HostEvent::JoinRequestCancelled { token } => {
                if let Some(handle_join_request_cancel) = self.handle_join_request_cancel {
                    handle_join_request_cancel(into_cookie(token));
                }
            }

            HostEvent::JoinRequestedGame { join_secret } => {
                if let Some(join_requested_game) = self.join_requested_game {
                    let join_secret = to_c_string(join_secret);
                    join_requested_game(join_secret.as_ptr());
                }
            }
        }
    }
}

const API: SocialPluginApi = SocialPluginApi {
    shutdown: Some(plugin_shutdown),
    event_loop: Some(plugin_event_loop),
    enter_singleplayer: Some(plugin_enter_singleplayer),
    enter_multiplayer: Some(plugin_enter_multiplayer),
    enter_company: Some(plugin_enter_company),
    enter_spectate: Some(plugin_enter_spectate),
    exit_gameplay: Some(plugin_exit_gameplay),
    respond_join_request: Some(plugin_respond_join_request),
};

struct HostBinding {
    session: PresenceSession,
    callbacks: SocialPluginCallbacks,
}

static BINDING: Mutex<Option<HostBinding>> = Mutex::new(None);

/// Library entry point. Returns 1 and fills `api` on success, 0 on a version mismatch, if already initialized or
/// if Discord isn't reachable.
///
/// # Safety
/// `api` and `callbacks` must be null or point to valid, properly aligned tables.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn SocialInit(
    api_version: c_int,
    api: *mut SocialPluginApi,
    callbacks: *const SocialPluginCallbacks,
) -> c_int {
    logging::init();

    // SAFETY: the caller guarantees both pointers are either null or valid.
    let (Some(api), Some(callbacks)) = (unsafe { api.as_mut() }, unsafe { callbacks.as_ref() }) else {
        warn!("SocialInit called without API or callback table");
        return 0;
    };

    install(api_version, api, callbacks, || {
        let config = Config::load();
        let backend = DiscordBackend::new(config.application_id.clone());
        PresenceSession::new(config, Box::new(backend), Arc::new(SystemClock))
    })
}

/// Does the work of [SocialInit] with the session built by `connect`, which is only called once the version
/// matches and no live session exists.
pub fn install<F>(
    api_version: c_int,
    api: &mut SocialPluginApi,
    callbacks: &SocialPluginCallbacks,
    connect: F,
) -> c_int
where
    F: FnOnce() -> Result<PresenceSession, SdkError>,
{
    if api_version != SOCIAL_PLUGIN_API_VERSION {
        warn!(
            "Host speaks plugin API version {api_version}, expected {SOCIAL_PLUGIN_API_VERSION}"
        );
        return 0;
    }

    let mut binding = match BINDING.lock() {
        Ok(binding) => binding,
        Err(error) => {
            error!("{error}");
            return 0;
        }
    };

    if binding
        .as_ref()
        .is_some_and(|binding| binding.session.is_connected())
    {
        warn!("{}", SdkError::AlreadyInitialized);
        return 0;
    }

    match connect() {
        Ok(session) => {
            *binding = Some(HostBinding {
                session,
                callbacks: *callbacks,
            });
            *api = API;
            1
        }

        Err(error) => {
            warn!("{error}");
            0
        }
    }
}

/// Runs `f` on the live session, then hands the events it produced to the host with the lock released.
fn drive(f: impl FnOnce(&mut PresenceSession) -> Vec<HostEvent>) {
    let (events, callbacks) = {
        let mut binding = match BINDING.lock() {
            Ok(binding) => binding,
            Err(error) => {
                error!("{error}");
                return;
            }
        };

        let Some(binding) = binding.as_mut() else {
            return;
        };

        (f(&mut binding.session), binding.callbacks)
    };

    for event in events {
        callbacks.dispatch(event);
    }
}

extern "C" fn plugin_shutdown() {
    let binding = match BINDING.lock() {
        Ok(mut binding) => binding.take(),
        Err(error) => {
            error!("{error}");
            return;
        }
    };

    if let Some(mut binding) = binding {
        binding.session.shutdown();
    }
}

extern "C" fn plugin_event_loop() {
    drive(|session| session.tick());
}

extern "C" fn plugin_enter_singleplayer() {
    drive(|session| {
        session.enter_singleplayer();
        Vec::new()
    });
}

unsafe extern "C" fn plugin_enter_multiplayer(
    server_name: *const c_char,
    server_cookie: *const c_char,
) {
    // SAFETY: the host passes null or NUL-terminated strings that outlive the call.
    let (server_name, server_cookie) = unsafe { (from_c_str(server_name), from_c_str(server_cookie)) };
    drive(|session| {
        session.enter_multiplayer(&server_name, &server_cookie);
        Vec::new()
    });
}

unsafe extern "C" fn plugin_enter_company(company_name: *const c_char, company_id: c_int) {
    // SAFETY: the host passes a null or NUL-terminated string that outlives the call.
    let company_name = unsafe { from_c_str(company_name) };
    drive(|session| {
        session.enter_company(&company_name, company_id);
        Vec::new()
    });
}

extern "C" fn plugin_enter_spectate() {
    drive(|session| {
        session.enter_spectate();
        Vec::new()
    });
}

extern "C" fn plugin_exit_gameplay() {
    drive(|session| {
        session.exit_gameplay();
        Vec::new()
    });
}

extern "C" fn plugin_respond_join_request(join_request_cookie: *mut c_void, response: c_int) {
    let Some(token) = JoinToken::from_cookie(join_request_cookie.addr()) else {
        return;
    };

    let reply = JoinReply::try_from(response).unwrap_or_else(|code| {
        warn!("Unknown join request response {code}, ignoring the request");
        JoinReply::Ignore
    });

    drive(|session| {
        session.respond_join_request(token, reply);
        Vec::new()
    });
}

fn into_cookie(token: JoinToken) -> *mut c_void {
    ptr::without_provenance_mut(token.into_cookie())
}

/// Copies a host string. Null reads as empty, invalid UTF-8 is replaced.
///
/// # Safety
/// `string` must be null or a valid NUL-terminated string.
unsafe fn from_c_str(string: *const c_char) -> String {
    if string.is_null() {
        return String::new();
    }

    // SAFETY: checked for null above, validity is up to the caller.
    unsafe { CStr::from_ptr(string) }
        .to_string_lossy()
        .into_owned()
}

fn to_c_string(string: String) -> CString {
    CString::new(string).unwrap_or_else(|error| {
        let mut bytes = error.into_vec();
        bytes.retain(|byte| *byte != 0);
        CString::new(bytes).unwrap_or_default()
    })
}
