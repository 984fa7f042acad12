//! Client-side state machines.
//!
//! DESIGN
//! ======
//! State is split by concern (`session`, `links`, `auth_form`, `copy`) so each
//! screen depends on a small focused model. Nothing here performs I/O:
//! transitions take outcomes as values and return the request to run next,
//! which keeps every machine testable with canned results.

pub mod auth_form;
pub mod copy;
pub mod links;
pub mod session;
