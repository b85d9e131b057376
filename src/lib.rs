pub mod auth;
pub mod config;
pub mod dates;
pub mod db;
pub mod domain;
pub mod dto;
pub mod error;
pub mod extract;
pub mod models;
pub mod params;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod state;
pub mod usecases;

pub use routes::create_router;
pub use state::AppState;
