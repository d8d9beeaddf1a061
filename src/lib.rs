pub mod api;
pub mod catalog;
mod db;
pub mod error;
pub mod graph;
pub mod resources;
pub mod settings;
pub mod snippet;
pub mod snippets;
