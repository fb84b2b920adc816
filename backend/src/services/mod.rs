// src/services/mod.rs

pub mod feedback;
pub mod prompts;
