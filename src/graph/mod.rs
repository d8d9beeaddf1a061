mod client;
mod models;

pub use client::{GraphService, GRAPH_HOST};
pub use models::GraphResponse;
