//! Chroma Reflect
//!
//! Watches the desktop wallpaper and mirrors its colors on Razer Chroma
//! RGB devices. This library exposes modules for integration testing.

pub mod error;
pub mod models;
pub mod services;
