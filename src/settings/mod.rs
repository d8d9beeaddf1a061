pub mod beta_label;
pub mod graph_base_url;

pub use beta_label::{default_beta_label, get_beta_label, reset_beta_label, set_beta_label};
pub use graph_base_url::{get_graph_base_url, reset_graph_base_url, set_graph_base_url};
