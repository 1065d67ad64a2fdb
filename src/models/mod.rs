// src/models/mod.rs

pub mod attendance;
pub mod notification;
pub mod quiz;
pub mod score;
pub mod user;
pub mod vote;
