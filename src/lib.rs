//! GreenScore Tracker library
//!
//! This module exposes the core functionality for use in tests
//! and as a library.

pub mod core;
pub mod dashboard;
pub mod db;
pub mod scoring;
pub mod session;
pub mod usage;
