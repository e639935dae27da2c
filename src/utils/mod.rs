pub mod environment;
pub mod logging;
pub mod terminal;

pub use environment::{API_KEY_ENV, API_URL_ENV, Config};
pub use logging::init_logging;
pub use terminal::sanitize_for_terminal;
