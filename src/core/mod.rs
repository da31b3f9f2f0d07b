pub mod bounds;
pub mod config;
pub mod converter;
pub mod geo;
