//! Student Spot - session core for the member portal
//!
//! This crate owns the client-side picture of who is signed in, decides
//! whether a route may render, and drives interactive sign-in and sign-out
//! against a pluggable identity provider.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
