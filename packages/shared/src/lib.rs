//! Client library for the music subscription gateway.
//!
//! Layers, bottom up:
//! - `gateway` normalizes the gateway's response envelopes into typed values
//! - `repositories` talk to the outside world (the HTTP gateway, session storage)
//! - `services` hold the per-call rules (status checks, user-facing messages)
//! - `screens` keep the state a user sees between calls

pub mod config;
pub mod gateway;
pub mod models;
pub mod repositories;
pub mod screens;
pub mod services;
pub mod utils;
