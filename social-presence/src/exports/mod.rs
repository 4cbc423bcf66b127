pub mod c_api;
pub mod plugin;
