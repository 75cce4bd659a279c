//! Exam seating planner: spreads students predicted to attend across rooms
//! so that students of the same department are not seated next to each
//! other, and serves the result over a small HTTP API.

pub mod attendance;
pub mod capacity;
pub mod colors;
pub mod config;
pub mod data;
pub mod error;
pub mod export;
pub mod history;
pub mod roster;
pub mod seating;
pub mod seatmap;
pub mod server;
pub mod store;
