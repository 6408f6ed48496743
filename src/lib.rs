// Library surface for the binary, headless integration tests and reuse.
pub mod app;
pub mod app_dirs;
pub mod config;
pub mod leaderboard;
pub mod round;
pub mod runtime;
pub mod scoring;
pub mod ui;
pub mod word_bank;
