pub mod connection;
pub mod dao;
pub mod entities;

pub use connection::{connect, sync_schema};
