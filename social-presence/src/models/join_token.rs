/// Generations are kept to 24 bits so a token always fits a 32-bit cookie next to its index.
pub(crate) const GENERATION_MASK: u32 = 0x00FF_FFFF;
const INDEX_BITS: usize = 8;
const INDEX_MASK: usize = (1 << INDEX_BITS) - 1;

/// Stable handle to a pending join request. The only thing the host ever gets to identify a request.
///
/// A token stops matching once its request is answered or expires, even if the slot is reused later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, uniffi::Record)]
pub struct JoinToken {
    pub index: u32,
    pub generation: u32,
}

impl JoinToken {
    /// Packs the token into a non-zero integer, used as the opaque cookie handed across the C ABI.
    pub fn into_cookie(self) -> usize {
        ((self.generation & GENERATION_MASK) as usize) << INDEX_BITS | (self.index as usize + 1)
    }

    /// Unpacks a cookie made by [into_cookie][JoinToken::into_cookie]. Zero is never a valid cookie.
    pub fn from_cookie(cookie: usize) -> Option<Self> {
        let index = (cookie & INDEX_MASK).checked_sub(1)?;
        Some(Self {
            index: index as u32,
            generation: (cookie >> INDEX_BITS) as u32 & GENERATION_MASK,
        })
    }
}
