pub mod constants;
pub mod math;
pub mod sim;
pub mod spawn;
pub mod types;
pub mod world;
