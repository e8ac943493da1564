//! Admin dashboard access.
//!
//! A single configured password unlocks the dashboard; sessions live in
//! memory and are carried by an http-only cookie.

pub mod admin;
