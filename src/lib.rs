//! Pharaoh Fy Me: upload a portrait, pick an ancient Egyptian style, and let
//! Gemini repaint you into it.

pub mod config;
pub mod encoder;
pub mod error;
pub mod gemini;
pub mod models;
pub mod routes;
pub mod studio;
pub mod styles;
