//! # shortlink
//!
//! Terminal client for a cookie-session URL-shortening service.
//!
//! The crate is split the same way the UI is driven:
//!
//! - [`net`]: wire types and the [`net::api::ShortenerApi`] seam over HTTP.
//! - [`state`]: session gate and per-screen state machines. Pure, no I/O.
//! - [`routes`]: maps session + requested route to the view to render.
//! - [`app`]: event loop that runs effects and feeds outcomes back.
//! - [`ui`]: text rendering and command parsing for the terminal front-end.

pub mod app;
pub mod clipboard;
pub mod config;
pub mod net;
pub mod routes;
pub mod state;
pub mod ui;
