//! Terminal front-end: text rendering of screens and command parsing.

pub mod command;
pub mod render;
