// src/utils/mod.rs

pub mod clock;
pub mod data_uri;
pub mod extract;
pub mod geo;
pub mod html;
pub mod qr_token;
