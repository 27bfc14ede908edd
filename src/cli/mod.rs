//! Handles Command Line Interface (CLI) related functionalities.
//!
//! Includes the clap command definitions and `App` state (`commands`), terminal
//! rendering (`display`) and the prompts used by the interactive menu (`prompts`).

mod commands;
pub mod display;
mod prompts;

pub use commands::*;
pub use prompts::*;
