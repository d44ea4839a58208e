// src/lib.rs

pub mod api;
pub mod app;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod errors;
pub mod logging;
pub mod models;
pub mod renderer;
pub mod retriever;
pub mod session;
pub mod turn;
pub mod utils;
