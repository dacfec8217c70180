//! Presentation of the scanner screen.
//!
//! `render_screen` draws the current view as plain terminal text;
//! `render_html` turns a finished analysis into a standalone HTML report.

use crate::model::{AnalysisResult, Finding};
use crate::screen::{Mode, ScanScreen};
use html_escape::encode_text;
use std::fmt::Write;

pub const TITLE: &str = "FoodScan AI";
pub const TAGLINE: &str = "Smart ingredient analysis at your fingertips";
pub const DISCLAIMER: &str = "Medical Disclaimer: This tool provides general information only and is not medical advice. Always consult healthcare professionals for dietary concerns or allergies.";

pub const LOADING: &str = "Analyzing ingredients...";

const RULE: &str = "----------------------------------------";

/// Render whichever view the screen is currently in
pub fn render_screen(screen: &ScanScreen) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}\n{}\n{}", TITLE, TAGLINE, RULE);

    match (screen.mode(), screen.analysis()) {
        (Mode::Loading, _) => render_loading(&mut out),
        (Mode::Results, Some(analysis)) => out.push_str(&render_analysis(analysis)),
        _ => render_home(&mut out, screen),
    }

    let _ = writeln!(out, "{}\n{}", RULE, DISCLAIMER);
    out
}

fn render_home(out: &mut String, screen: &ScanScreen) {
    if let Some(error) = screen.error() {
        let _ = writeln!(out, "[!] {}\n", error);
    }

    if screen.is_text_input_open() {
        let _ = writeln!(out, "Enter Ingredients");
        if screen.text_input().is_empty() {
            let _ = writeln!(
                out,
                "  (e.g. Water, Sugar, Wheat Flour, Palm Oil, Salt, Sodium Benzoate, Red 40)"
            );
        } else {
            for line in screen.text_input().lines() {
                let _ = writeln!(out, "  {}", line);
            }
        }
        let _ = writeln!(out);
        return;
    }

    let _ = writeln!(out, "Scan a label: point your camera at any food label and let AI decode the ingredients for you.");
    let _ = writeln!(out, "Or paste the ingredient list for instant analysis.\n");
    let _ = writeln!(out, "How it works");
    let _ = writeln!(out, "  1. Capture or paste: take a photo or paste the ingredients list");
    let _ = writeln!(out, "  2. AI processing: the ingredients are extracted and analyzed");
    let _ = writeln!(out, "  3. Instant insights: clear explanations for each ingredient");
}

fn render_loading(out: &mut String) {
    let _ = writeln!(out, "{}", LOADING);
}

/// Render the results view for a finished analysis.
///
/// Sections with nothing in them are left out.
pub fn render_analysis(analysis: &AnalysisResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Analysis Complete! Here's what we found.\n");

    section(&mut out, "Safe Ingredients", "+", &analysis.safe_ingredients);
    section(&mut out, "Watch Out For", "!", &analysis.concerns);

    if !analysis.summary.is_empty() {
        let _ = writeln!(out, "Overall Summary\n  {}\n", analysis.summary);
    }
    if let Some(note) = &analysis.uncertainty_note {
        let _ = writeln!(out, "Note: {}\n", note);
    }

    out
}

fn section(out: &mut String, heading: &str, marker: &str, findings: &[Finding]) {
    if findings.is_empty() {
        return;
    }

    let _ = writeln!(out, "{}", heading);
    for finding in findings {
        let _ = writeln!(out, "  [{}] {}", marker, finding);
    }
    let _ = writeln!(out);
}

/// Render a standalone HTML report. All model text is escaped.
pub fn render_html(analysis: &AnalysisResult) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n<h1>{}</h1>\n",
        TITLE, TITLE
    );

    html_section(&mut html, "okay", "Safe Ingredients", &analysis.safe_ingredients);
    html_section(&mut html, "concerns", "Watch Out For", &analysis.concerns);

    if !analysis.summary.is_empty() {
        let _ = write!(
            html,
            "<section class=\"summary\">\n<h2>Overall Summary</h2>\n<p>{}</p>\n</section>\n",
            encode_text(&analysis.summary)
        );
    }
    if let Some(note) = &analysis.uncertainty_note {
        let _ = write!(
            html,
            "<p class=\"note\"><strong>Note:</strong> {}</p>\n",
            encode_text(note)
        );
    }

    let _ = write!(
        html,
        "<footer><small>{}</small></footer>\n</body>\n</html>\n",
        encode_text(DISCLAIMER)
    );
    html
}

fn html_section(html: &mut String, class: &str, heading: &str, findings: &[Finding]) {
    if findings.is_empty() {
        return;
    }

    let _ = write!(html, "<section class=\"{}\">\n<h2>{}</h2>\n<ul>\n", class, heading);
    for finding in findings {
        if finding.explanation.is_empty() {
            let _ = writeln!(html, "<li><strong>{}</strong></li>", encode_text(&finding.name));
        } else {
            let _ = writeln!(
                html,
                "<li><strong>{}</strong>: {}</li>",
                encode_text(&finding.name),
                encode_text(&finding.explanation)
            );
        }
    }
    html.push_str("</ul>\n</section>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::scripted::ScriptedProvider;
    use std::sync::Arc;

    fn sample() -> AnalysisResult {
        AnalysisResult {
            safe_ingredients: vec![Finding::new("Water", "basic ingredient")],
            concerns: vec![Finding::new("Red 40", "artificial dye <synthetic>")],
            summary: "Mostly fine & simple.".to_string(),
            uncertainty_note: None,
        }
    }

    #[test]
    fn test_render_analysis_sections() {
        let text = render_analysis(&sample());
        assert!(text.contains("Safe Ingredients"));
        assert!(text.contains("  [+] Water: basic ingredient"));
        assert!(text.contains("Watch Out For"));
        assert!(text.contains("  [!] Red 40: artificial dye <synthetic>"));
        assert!(text.contains("Overall Summary"));
        assert!(!text.contains("Note:"));
    }

    #[test]
    fn test_render_analysis_skips_empty_sections() {
        let analysis = AnalysisResult {
            summary: "Only a summary.".to_string(),
            ..Default::default()
        };
        let text = render_analysis(&analysis);
        assert!(!text.contains("Safe Ingredients"));
        assert!(!text.contains("Watch Out For"));
        assert!(text.contains("Only a summary."));
    }

    #[test]
    fn test_render_html_escapes_model_text() {
        let html = render_html(&sample());
        assert!(html.contains("artificial dye &lt;synthetic&gt;"));
        assert!(html.contains("Mostly fine &amp; simple."));
        assert!(!html.contains("<synthetic>"));
        assert!(html.contains("<section class=\"concerns\">"));
    }

    #[test]
    fn test_render_home_with_banner() {
        let provider = Arc::new(ScriptedProvider::new(&[]));
        let mut screen = ScanScreen::new(provider);
        assert!(render_screen(&screen).contains("How it works"));

        screen.open_text_input();
        screen.set_text_input("Water, Salt");
        let text = render_screen(&screen);
        assert!(text.contains("Enter Ingredients"));
        assert!(text.contains("  Water, Salt"));
        assert!(text.ends_with(&format!("{}\n", DISCLAIMER)));
    }

    #[tokio::test]
    async fn test_render_error_banner() {
        let provider = Arc::new(ScriptedProvider::with_results(vec![Err(500)]));
        let mut screen = ScanScreen::new(provider);
        screen.set_text_input("Water");
        screen.submit_text().await;

        let text = render_screen(&screen);
        assert!(text.contains("[!] Failed to analyze ingredients. Please try again."));
    }
}
