pub mod associations;
pub mod config;
pub mod db;
pub mod dto;
pub mod entity;
pub mod error;
pub mod migration;
pub mod money;
pub mod schema;
pub mod services;
pub mod state;
