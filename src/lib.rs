//! # json-table - Conversion Requests and Result Presentation
//!
//! **json-table** is the client side of a JSON-to-table conversion service. It turns
//! the options a user picked into a request, sends it through a pluggable gateway and
//! decides how the returned payload is shown: as a data grid, as verbatim CSV or
//! console text, or as pretty-printed raw JSON with download metadata.
//!
//! ## Core Workflow
//!
//! 1.  **Collect Options**: Fill a `ConversionOptions` (or let a `Session` own it). Filter presets
//!     such as `FilterPreset::Soql` overwrite both filter strings at once.
//! 2.  **Build the Request**: `ConversionRequest::builder(&options).build()` copies the options and
//!     attaches the per-process cache-bust token.
//! 3.  **Convert**: Any `ConversionGateway` turns the request into a `ConversionResponse`.
//!     `HttpGateway` talks to a real service in either the legacy or the extended request schema.
//! 4.  **Dispatch**: `ResultDispatcher::dispatch` reads the response according to the output format
//!     and produces exactly one `PresentationConfig`, which a `PresentationSurface` then shows.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use json_table::prelude::*;
//! use serde_json::json;
//!
//! fn main() -> Result<()> {
//!     let mut options = ConversionOptions {
//!         source_text: r#"{"totalSize":1,"done":true,"records":[{"Id":"001"}]}"#.to_string(),
//!         output_format: OutputFormat::Grid,
//!         ..ConversionOptions::default()
//!     };
//!     options.apply_preset(FilterPreset::Soql);
//!
//!     let request = ConversionRequest::builder(&options).build();
//!     let call = RequestSchema::Extended.encode(&request)?;
//!     println!("POST .../{} {}", call.method, call.params);
//!
//!     // Pretend the service answered with a table.
//!     let response = ConversionResponse::new(json!({
//!         "columns": ["Id"],
//!         "data": [{"Id": "001"}]
//!     }));
//!
//!     match ResultDispatcher::dispatch(request.output_format, &response)? {
//!         PresentationConfig::Grid(grid) => println!("{}", grid.to_csv()?),
//!         PresentationConfig::Text(text) => println!("{}", text.content),
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod dispatch;
pub mod error;
pub mod format;
pub mod gateway;
pub mod prelude;
pub mod preset;
pub mod prettify;
pub mod request;
pub mod response;
pub mod session;
pub mod surface;
