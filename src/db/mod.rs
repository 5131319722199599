//! Database layer (Postgres).

pub mod mahjong;
pub mod postgres;
pub mod retry;

pub use postgres::{Database, LIST_LIMIT};
