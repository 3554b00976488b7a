//! # LifeOS - personal productivity, from quarterly quests to focus sessions
//!
//! A command-line companion for structured deep work: run Plan/Focus/Reflect
//! focus sessions, keep a daily plan, track quarterly quests and review the
//! focus-minutes activity log.
//!
//! ## Features
//!
//! - **Focus Sessions**: A three-phase session timer with pause accounting,
//!   disruptor tracking and per-day session numbering
//! - **Activity Log**: Focus minutes accumulated per calendar day
//! - **Daily Plans**: Plan items with crash-safe draft autosave
//! - **Quarterly Quests**: Goals grouped by calendar quarter
//! - **Data Export**: Sessions as CSV or JSON
//!
//! ## Usage
//!
//! ```rust,no_run
//! use lifeos::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     Cli::menu().await
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
