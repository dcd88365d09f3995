//! Core IME functionality
//!
//! Key classification, the composition engine and the session that drives
//! them against a text sink.

pub mod candidate;
pub mod controller;
pub mod engine;
pub mod keycode;
pub mod layout;
pub mod mode;
pub mod session;
pub mod sink;
pub mod state;
pub mod worker;
