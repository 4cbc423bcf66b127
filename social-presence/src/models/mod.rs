pub mod join_token;
pub mod presence;
