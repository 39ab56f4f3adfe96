use crate::format::OutputFormat;
use crate::preset::{FilterPreset, FilterPresetCatalog};
use std::sync::OnceLock;

static SESSION_CACHE_BUST: OnceLock<f64> = OnceLock::new();

/// Random token attached to every request of this process so the service
/// cannot answer from a stale cache. Generated once, then reused.
pub fn session_cache_bust() -> f64 {
    *SESSION_CACHE_BUST.get_or_init(rand::random::<f64>)
}

/// The option values currently selected by the user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversionOptions {
    pub source_text: String,
    pub number_column: bool,
    pub attribute_filter: String,
    pub list_name_filter: String,
    pub include_child_lists: bool,
    pub path: String,
    pub output_format: OutputFormat,
    pub filter_preset: FilterPreset,
}

impl ConversionOptions {
    /// Selects a preset and overwrites both filter strings with its values.
    pub fn apply_preset(&mut self, preset: FilterPreset) {
        let pair = FilterPresetCatalog::resolve(preset);
        self.filter_preset = preset;
        self.attribute_filter = pair.attribute_filter.to_string();
        self.list_name_filter = pair.list_name_filter.to_string();
    }
}

/// A single request to the conversion service.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub source_text: String,
    pub number_column: bool,
    pub attribute_filter: String,
    pub list_name_filter: String,
    pub include_child_lists: bool,
    pub path: String,
    pub output_format: OutputFormat,
    pub cache_bust: f64,
}

impl ConversionRequest {
    pub fn builder(options: &ConversionOptions) -> ConversionRequestBuilder<'_> {
        ConversionRequestBuilder::new(options)
    }
}

/// Copies the current options into a fresh [`ConversionRequest`].
///
/// The source text is passed through untouched, even when empty or not
/// valid JSON; rejecting it is the service's job.
pub struct ConversionRequestBuilder<'a> {
    options: &'a ConversionOptions,
    cache_bust: Option<f64>,
}

impl<'a> ConversionRequestBuilder<'a> {
    pub fn new(options: &'a ConversionOptions) -> Self {
        Self {
            options,
            cache_bust: None,
        }
    }

    /// Overrides the session token, e.g. for reproducible payloads in tests.
    pub fn with_cache_bust(mut self, cache_bust: f64) -> Self {
        self.cache_bust = Some(cache_bust);
        self
    }

    pub fn build(self) -> ConversionRequest {
        let options = self.options;
        ConversionRequest {
            source_text: options.source_text.clone(),
            number_column: options.number_column,
            attribute_filter: options.attribute_filter.clone(),
            list_name_filter: options.list_name_filter.clone(),
            include_child_lists: options.include_child_lists,
            path: options.path.clone(),
            output_format: options.output_format,
            cache_bust: self.cache_bust.unwrap_or_else(session_cache_bust),
        }
    }
}
