pub mod backend_error;
pub mod sdk_error;
