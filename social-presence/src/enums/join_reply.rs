/// The host's decision on a join request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum JoinReply {
    Ignore,
    Accept,
    Reject,
}

impl TryFrom<i32> for JoinReply {
    type Error = i32;

    /// Host response codes: 0 ignore, 1 accept, 2 reject.
    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(JoinReply::Ignore),
            1 => Ok(JoinReply::Accept),
            2 => Ok(JoinReply::Reject),
            _ => Err(code),
        }
    }
}
