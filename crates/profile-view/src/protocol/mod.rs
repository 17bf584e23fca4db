//! Profile endpoint protocol modules.
//!
//! This namespace groups wire-compatible JSON structures by domain:
//! - [`constants`]: endpoint paths and well-known client names.
//! - [`users`]: the `/users` response document and its lenient raw records.

pub mod constants;
pub mod users;
