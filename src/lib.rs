//! DevPilot - send source code to a chat-completion model for review
//!
//! This library holds the analysis request pipeline behind the `devpilot`
//! binary:
//!
//! - Building the prompt for an analysis type ([`prompt`])
//! - Sending it to OpenRouter's chat-completion endpoint ([`transport`])
//! - Extracting the model's answer from the response body ([`extractor`])
//! - Recording completed analyses in an in-memory session history ([`history_store`])
//!
//! [`pipeline::Analyzer`] ties these together; front ends only talk to it.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use devpilot::{AnalysisRequest, AnalysisType, Analyzer, Config, HistoryStore, OpenRouterClient};
//!
//! let config = Config::from_env()?;
//! let client = OpenRouterClient::with_endpoint(config.api_url.clone(), config.timeout)?;
//! let analyzer = Analyzer::from_config(client, Arc::new(HistoryStore::new()), &config);
//!
//! let request = AnalysisRequest::new("print(1)", AnalysisType::FindBugs, "openai/gpt-4o-mini");
//! let result = analyzer.run_analysis(&request)?;
//! println!("{}", result.extracted_content);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod clipboard;
pub mod extractor;
pub mod history_store;
pub mod models;
pub mod pipeline;
pub mod prompt;
pub mod render;
pub mod transport;
pub mod utils;

// Re-export commonly used types
pub use extractor::{ExtractionError, extract_content};
pub use history_store::{HistoryError, HistoryStore};
pub use models::{AnalysisRequest, AnalysisResult, AnalysisType, HistoryEntry};
pub use pipeline::{AnalysisError, Analyzer, ConfigError, PendingAnalysis};
pub use prompt::build_prompt;
pub use transport::{OpenRouterClient, Transport, TransportError};
pub use utils::Config;
