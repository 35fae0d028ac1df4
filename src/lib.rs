pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod images;
pub mod movies;
pub mod state;
pub mod storage;
pub mod users;
