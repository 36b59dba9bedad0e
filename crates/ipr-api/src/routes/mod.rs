//! # Route Modules
//!
//! Each module defines an Axum router for one API surface area.
//! Routers are assembled into the application in `lib.rs`.

pub mod ip;
