//! Display formatting for analysis output and session history.
//!
//! Output panes render HTML, so everything that did not come from the model
//! (raw bodies, error text, user code) is escaped before it is embedded.

pub mod html;
pub mod listing;

pub use html::{error_html, escape_html, extraction_error_html, html_document, result_html};
pub use listing::{format_age, history_detail, history_summary};
