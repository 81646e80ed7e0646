//! Services used by handlers

pub mod upload;
