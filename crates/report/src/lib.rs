//! PDF report rendering
//!
//! Turns a generated policy and a short weather summary into a
//! downloadable PDF document. Rendering sits behind the `pdf-export`
//! feature (default on); when compiled out, [`render_policy_pdf`]
//! returns empty bytes and callers surface "export unavailable"
//! instead of an error.

use chrono::{DateTime, Utc};
use thiserror::Error;

#[cfg(feature = "pdf-export")]
mod layout;
#[cfg(feature = "pdf-export")]
mod pdf;

/// Report rendering errors
#[derive(Debug, Error)]
pub enum ReportError {
    /// Document assembly failed
    #[error("Report rendering failed: {0}")]
    Render(String),
}

/// Input for one rendered report
#[derive(Debug, Clone, PartialEq)]
pub struct ReportContext {
    /// City the policy was generated for
    pub city: String,
    /// Generation timestamp, embedded in the cover and the filename
    pub generated_at: DateTime<Utc>,
    /// Short per-day forecast lines for the weather summary section
    pub summary_lines: Vec<String>,
    /// The model's policy text
    pub policy_text: String,
}

/// Whether PDF rendering was compiled in
#[must_use]
pub const fn pdf_export_enabled() -> bool {
    cfg!(feature = "pdf-export")
}

/// Render the policy report as PDF bytes
///
/// # Errors
///
/// Returns an error when the document cannot be assembled.
#[cfg(feature = "pdf-export")]
pub fn render_policy_pdf(context: &ReportContext) -> Result<Vec<u8>, ReportError> {
    Ok(pdf::render(context))
}

/// Render the policy report as PDF bytes
///
/// Rendering is compiled out in this configuration; returns empty bytes
/// so callers degrade to "export unavailable".
///
/// # Errors
///
/// Never fails with rendering compiled out.
#[cfg(not(feature = "pdf-export"))]
pub fn render_policy_pdf(_context: &ReportContext) -> Result<Vec<u8>, ReportError> {
    Ok(Vec::new())
}

/// Download filename for a report: `policy_{city}_{timestamp}.pdf`,
/// whitespace in the city replaced with underscores
#[must_use]
pub fn report_filename(city: &str, at: &DateTime<Utc>) -> String {
    let city = city.split_whitespace().collect::<Vec<_>>().join("_");
    format!("policy_{city}_{}.pdf", at.format("%Y%m%d_%H%M"))
}
