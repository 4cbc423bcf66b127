use crate::models::join_token::{GENERATION_MASK, JoinToken};
use std::time::{Duration, Instant};

/// How many join requests can wait for an answer at once.
pub const JOIN_REQUEST_CAPACITY: usize = 15;

/// A join request waiting for the host's decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingJoinRequest {
    pub remote_user_id: String,
    pub opened_at: Instant,
}

#[derive(Debug, Default)]
struct Slot {
    generation: u32,
    request: Option<PendingJoinRequest>,
}

impl Slot {
    fn matches(&self, token: JoinToken) -> bool {
        self.generation == token.generation && self.request.is_some()
    }

    fn free(&mut self) -> Option<PendingJoinRequest> {
        let request = self.request.take()?;
        self.generation = self.generation.wrapping_add(1) & GENERATION_MASK;
        Some(request)
    }
}

/// Fixed set of slots for pending join requests.
#[derive(Debug)]
pub struct JoinRequestTable {
    slots: [Slot; JOIN_REQUEST_CAPACITY],
}

impl JoinRequestTable {
    pub fn new() -> Self {
        Self {
            slots: Default::default(),
        }
    }

    /// Stores a request in the first free slot. Returns `None` if every slot is taken.
    pub fn admit(&mut self, remote_user_id: String, now: Instant) -> Option<JoinToken> {
        let (index, slot) = self
            .slots
            .iter_mut()
            .enumerate()
            .find(|(_, slot)| slot.request.is_none())?;

        slot.request = Some(PendingJoinRequest {
            remote_user_id,
            opened_at: now,
        });

        Some(JoinToken {
            index: index as u32,
            generation: slot.generation,
        })
    }

    pub fn get(&self, token: JoinToken) -> Option<&PendingJoinRequest> {
        let slot = self.slots.get(token.index as usize)?;
        if slot.matches(token) {
            slot.request.as_ref()
        } else {
            None
        }
    }

    /// Frees the token's slot and hands back its request. Stale tokens get `None` and change nothing.
    pub fn take(&mut self, token: JoinToken) -> Option<PendingJoinRequest> {
        let slot = self.slots.get_mut(token.index as usize)?;
        if slot.matches(token) {
            slot.free()
        } else {
            None
        }
    }

    /// Frees every request older than `timeout` and returns their now stale tokens.
    pub fn expire(&mut self, now: Instant, timeout: Duration) -> Vec<JoinToken> {
        let mut expired = Vec::new();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            let Some(request) = &slot.request else {
                continue;
            };

            if now.saturating_duration_since(request.opened_at) > timeout {
                expired.push(JoinToken {
                    index: index as u32,
                    generation: slot.generation,
                });
                slot.free();
            }
        }

        expired
    }

    /// Drops every pending request. Returns how many there were.
    pub fn clear(&mut self) -> usize {
        self.slots
            .iter_mut()
            .filter_map(|slot| slot.free())
            .count()
    }

    pub fn len(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.request.is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_full(&self) -> bool {
        self.len() == JOIN_REQUEST_CAPACITY
    }
}

impl Default for JoinRequestTable {
    fn default() -> Self {
        Self::new()
    }
}
