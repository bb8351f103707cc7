//! Request handlers.

pub mod catalog;
pub mod health;
pub mod process;
pub mod uploads;

pub use catalog::list_catalog;
pub use health::health;
pub use process::process_audio;
pub use uploads::create_upload_url;
