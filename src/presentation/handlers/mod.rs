mod export;
mod extract;
mod health;
mod models;
mod save;
mod status;

pub use export::export_handler;
pub use extract::extract_handler;
pub use health::health_handler;
pub use models::models_handler;
pub use save::save_handler;
pub use status::status_handler;
