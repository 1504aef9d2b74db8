pub mod item;
pub mod config;

pub use item::*;
pub use config::*;
