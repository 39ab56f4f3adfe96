//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the json-table
//! crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use json_table::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let settings = Settings::from_file("path/to/settings.json")?;
//! let options = settings.initial_options();
//! let request = ConversionRequest::builder(&options).build();
//! let call = settings.schema.encode(&request)?;
//! println!("{} -> {}", call.method, call.params);
//! # Ok(())
//! # }
//! ```

// Options, requests and responses
pub use crate::format::{FormatFamily, OutputFormat};
pub use crate::preset::{FilterPair, FilterPreset, FilterPresetCatalog};
pub use crate::request::{ConversionOptions, ConversionRequest, ConversionRequestBuilder};
pub use crate::response::{ConversionResponse, Row, TableData};

// Gateway
pub use crate::gateway::{ConversionGateway, HttpGateway, RequestSchema, RpcCall};

// Presentation
pub use crate::dispatch::{
    ButtonVisibility, GridColumn, GridConfig, ModalSize, Presentation, PresentationConfig,
    ResultDispatcher, TextConfig, column_width,
};
pub use crate::prettify::{ButtonVariant, prettify};
pub use crate::surface::{Alert, ErrorSink, PresentationSurface};

// Session and configuration
pub use crate::config::Settings;
pub use crate::session::{LoadingFlag, Session};

// Error types
pub use crate::error::{ActionError, ConfigError, ConversionError, FormatError, PresentationError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
