//! View-state controller for the scanner screen.
//!
//! Owns the current mode, the most recent result, the error banner and the
//! text the user typed. Every operation runs to completion before the next
//! one can start, since each takes `&mut self`.

use crate::error::ScanError;
use crate::images_to_text::ImageSource;
use crate::model::AnalysisResult;
use crate::pipelines;
use crate::providers::LlmProvider;
use log::{debug, info};
use std::sync::Arc;

/// Which view the screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Start screen; the error banner, if any, is shown here
    #[default]
    Home,
    /// A scan or analysis is in flight
    Loading,
    /// The last analysis succeeded
    Results,
}

pub struct ScanScreen {
    provider: Arc<dyn LlmProvider>,
    mode: Mode,
    analysis: Option<AnalysisResult>,
    error: Option<String>,
    text_input: String,
    show_text_input: bool,
}

impl ScanScreen {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        ScanScreen {
            provider,
            mode: Mode::Home,
            analysis: None,
            error: None,
            text_input: String::new(),
            show_text_input: false,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn analysis(&self) -> Option<&AnalysisResult> {
        self.analysis.as_ref()
    }

    /// Banner message of the last failure, until dismissed or reset
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn text_input(&self) -> &str {
        &self.text_input
    }

    /// Whether the typed text has anything to analyze
    pub fn has_text_input(&self) -> bool {
        !self.text_input.trim().is_empty()
    }

    pub fn is_text_input_open(&self) -> bool {
        self.show_text_input
    }

    pub fn open_text_input(&mut self) {
        self.show_text_input = true;
    }

    pub fn close_text_input(&mut self) {
        self.show_text_input = false;
    }

    pub fn set_text_input(&mut self, text: impl Into<String>) {
        self.text_input = text.into();
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Scan a label image: extract the ingredients, then analyze them.
    pub async fn scan_image(&mut self, source: &ImageSource) {
        self.begin();
        let outcome = pipelines::image::process(self.provider.as_ref(), source).await;
        self.finish(outcome);
    }

    /// Analyze the typed text.
    ///
    /// Empty or whitespace-only text is ignored and no request is made.
    /// Returns whether an analysis was started.
    pub async fn submit_text(&mut self) -> bool {
        if !self.has_text_input() {
            debug!("Ignoring empty ingredient text");
            return false;
        }

        self.begin();
        self.show_text_input = false;
        let outcome = pipelines::text::analyze(self.provider.as_ref(), &self.text_input).await;
        self.finish(outcome);
        true
    }

    /// Go back to the start screen, forgetting the result, banner and typed text.
    pub fn reset(&mut self) {
        self.mode = Mode::Home;
        self.analysis = None;
        self.error = None;
        self.text_input.clear();
        self.show_text_input = false;
    }

    fn begin(&mut self) {
        self.mode = Mode::Loading;
        self.error = None;
        self.analysis = None;
    }

    fn finish(&mut self, outcome: Result<AnalysisResult, ScanError>) {
        match outcome {
            Ok(result) => {
                info!(
                    "Analysis complete: {} okay, {} concerns",
                    result.safe_ingredients.len(),
                    result.concerns.len()
                );
                self.analysis = Some(result);
                self.mode = Mode::Results;
            }
            Err(e) => {
                info!("Scan failed: {}", e);
                self.error = Some(e.user_message());
                self.mode = Mode::Home;
            }
        }
    }
}
