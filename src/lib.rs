pub mod client;
pub mod game;
pub mod protocol;
pub mod server;
