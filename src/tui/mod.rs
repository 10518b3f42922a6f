//! Terminal front end. Drives the sheets; holds no settlement logic.

pub mod app;
pub mod controller;
mod ui;
