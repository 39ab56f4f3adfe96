use crate::config::Settings;
use crate::dispatch::{Presentation, ResultDispatcher};
use crate::error::ActionError;
use crate::format::OutputFormat;
use crate::gateway::ConversionGateway;
use crate::preset::FilterPreset;
use crate::prettify::{ButtonVariant, prettify};
use crate::request::{ConversionOptions, ConversionRequest};
use crate::surface::{Alert, ErrorSink, PresentationSurface};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, warn};

/// Shared view of whether a request is in flight.
#[derive(Debug, Clone, Default)]
pub struct LoadingFlag(Arc<AtomicBool>);

impl LoadingFlag {
    pub fn is_loading(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Sets the flag until the returned guard is dropped.
    pub fn begin(&self) -> LoadingGuard {
        self.0.store(true, Ordering::SeqCst);
        LoadingGuard(Arc::clone(&self.0))
    }
}

/// Clears the loading flag on drop, whichever way the work ended.
#[must_use = "the loading flag is cleared as soon as the guard is dropped"]
pub struct LoadingGuard(Arc<AtomicBool>);

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// The state of one user session: selected options, UI flags and the
/// injected collaborators.
///
/// Actions follow a single path: build the request, call the gateway,
/// dispatch the response and show it. Any failure along the way becomes one
/// alert on the error sink. The session does not guard against a second
/// action while one is in flight.
pub struct Session {
    options: ConversionOptions,
    loading: LoadingFlag,
    prettify_variant: ButtonVariant,
    result_theme: String,
    gateway: Arc<dyn ConversionGateway>,
    surface: Arc<dyn PresentationSurface>,
    errors: Arc<dyn ErrorSink>,
}

impl Session {
    pub fn new(
        gateway: Arc<dyn ConversionGateway>,
        surface: Arc<dyn PresentationSurface>,
        errors: Arc<dyn ErrorSink>,
    ) -> Self {
        Self {
            options: ConversionOptions::default(),
            loading: LoadingFlag::default(),
            prettify_variant: ButtonVariant::Neutral,
            result_theme: "default".to_string(),
            gateway,
            surface,
            errors,
        }
    }

    pub fn from_settings(
        settings: &Settings,
        gateway: Arc<dyn ConversionGateway>,
        surface: Arc<dyn PresentationSurface>,
        errors: Arc<dyn ErrorSink>,
    ) -> Self {
        let mut session = Self::new(gateway, surface, errors);
        session.options = settings.initial_options();
        session.result_theme = settings.result_theme.clone();
        session
    }

    pub fn options(&self) -> &ConversionOptions {
        &self.options
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }

    pub fn loading_flag(&self) -> LoadingFlag {
        self.loading.clone()
    }

    pub fn prettify_variant(&self) -> ButtonVariant {
        self.prettify_variant
    }

    pub fn result_theme(&self) -> &str {
        &self.result_theme
    }

    // --- Option changes ---

    pub fn set_source_text(&mut self, text: impl Into<String>) {
        self.options.source_text = text.into();
    }

    pub fn set_number_column(&mut self, enabled: bool) {
        self.options.number_column = enabled;
    }

    pub fn set_attribute_filter(&mut self, filter: impl Into<String>) {
        self.options.attribute_filter = filter.into();
    }

    pub fn set_list_name_filter(&mut self, filter: impl Into<String>) {
        self.options.list_name_filter = filter.into();
    }

    pub fn set_include_child_lists(&mut self, enabled: bool) {
        self.options.include_child_lists = enabled;
    }

    pub fn set_path(&mut self, path: impl Into<String>) {
        self.options.path = path.into();
    }

    pub fn select_output_format(&mut self, format: OutputFormat) {
        self.options.output_format = format;
    }

    /// Replaces both filter strings with the preset's values.
    pub fn select_preset(&mut self, preset: FilterPreset) {
        self.options.apply_preset(preset);
    }

    pub fn set_result_theme(&mut self, theme: impl Into<String>) {
        self.result_theme = theme.into();
    }

    // --- Actions ---

    /// Converts the current source text and shows the result.
    ///
    /// The loading flag is raised for the gateway call and dispatch, and is
    /// down again before the surface opens. On failure the alert has already
    /// been raised when the error is returned.
    pub async fn create_table(&self) -> Result<(), ActionError> {
        let presentation = {
            let _loading = self.loading.begin();
            self.fetch_presentation().await
        };
        let presentation = presentation.map_err(|e| self.report(e))?;
        self.surface.show(presentation).await;
        Ok(())
    }

    /// Re-indents the source text in place.
    ///
    /// On failure the text is kept as it was and the prettify control turns
    /// destructive.
    pub fn prettify_source(&mut self) -> Result<(), ActionError> {
        let _loading = self.loading.begin();
        match prettify(&self.options.source_text) {
            Ok(text) => {
                self.options.source_text = text;
                self.prettify_variant = ButtonVariant::Success;
                Ok(())
            }
            Err(e) => {
                self.prettify_variant = ButtonVariant::Destructive;
                Err(self.report(e.into()))
            }
        }
    }

    async fn fetch_presentation(&self) -> Result<Presentation, ActionError> {
        let request = ConversionRequest::builder(&self.options).build();
        info!(
            format = %request.output_format,
            source_len = request.source_text.len(),
            "requesting conversion"
        );

        let response = self.gateway.convert(&request).await?;
        let presentation = ResultDispatcher::present(request.output_format, &response)?
            .with_theme(self.result_theme.as_str());
        Ok(presentation)
    }

    fn report(&self, error: ActionError) -> ActionError {
        warn!(error = %error, "action failed");
        self.errors.alert(Alert::error(error.to_string()));
        error
    }
}
