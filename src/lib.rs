pub mod api_docs;
pub mod app;
pub mod bootstrap;
pub mod config;
pub mod database;
pub mod entities;
pub mod error;
pub mod extractor;
pub mod middleware;
pub mod repositories;
pub mod routes;
pub mod seed;
pub mod services;
pub mod state;
pub mod utils;
