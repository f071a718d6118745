//! Terminal chat client that answers either with an AI assistant or with the
//! current weather for a city.

pub mod app;
pub mod chat;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod display;
pub mod input;
pub mod responders;
