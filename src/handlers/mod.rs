// src/handlers/mod.rs

pub mod admin;
pub mod attendance;
pub mod auth;
pub mod notification;
pub mod quiz;
pub mod score;
pub mod vote;
