//! Interface layer
//! CLI 진입점과 composition root.

pub mod cli;
