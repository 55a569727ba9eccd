//! Spincon firmware library.
//!
//! Command console and persistent configuration for the Spincon arcade
//! spin/lighting controller. The pure-logic modules here run unchanged on
//! the host for tests and simulation; device-specific bootstrap lives in
//! the binary behind the `espidf` feature.

#![deny(unused_must_use)]

pub mod adapters;
pub mod codec;
pub mod config;
pub mod console;
pub mod persist;
pub mod ports;
pub mod runtime;
pub mod store;
