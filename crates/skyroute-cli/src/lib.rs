//! SkyRoute CLI library.
//!
//! Command handlers, terminal styling and output formatting for the
//! `skyroute` binary.

pub mod commands;
pub mod output;
pub mod terminal;
