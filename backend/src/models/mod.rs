// src/models/mod.rs

pub mod design;
pub mod page;
pub mod progress;
pub mod quiz;
