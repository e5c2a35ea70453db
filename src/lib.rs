// Library exports for the Battlesnake bot
// The server binary, the replay tool and integration tests share these modules.

#[macro_use]
extern crate rocket;

pub mod board;
pub mod bot;
pub mod config;
pub mod debug_logger;
pub mod error;
pub mod food;
pub mod handler;
pub mod pathfinder;
pub mod policy;
pub mod replay;
pub mod safety;
pub mod types;
