//! Terminal UI: a full-screen game view with a column selector, the
//! running scoreboard, and automatic computer moves.

mod app;
mod game_view;

pub use app::App;
