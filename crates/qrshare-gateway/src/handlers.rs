mod health;
mod text;

pub use health::health_handler;
pub use text::{get_text_handler, publish_handler};
