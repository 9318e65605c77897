//! Application state shared across handlers

use std::sync::Arc;

use application::{PolicyPort, WeatherService};
use arc_swap::ArcSwapOption;
use chrono::{DateTime, Utc};
use domain::PolicyResult;
use infrastructure::{AppConfig, TemplateEngine};

/// The latest generated policy together with its generation time
#[derive(Debug, Clone, PartialEq)]
pub struct SessionEntry {
    pub result: PolicyResult,
    pub generated_at: DateTime<Utc>,
}

/// Single-slot store for the most recent policy result
///
/// The dashboard's table, report, and export views all read whatever
/// `/policy` stored last. A new result replaces the previous one
/// atomically; readers keep the snapshot they loaded. The most recent
/// PDF rendering is kept alongside so the export tab's preview and the
/// download link reuse one rendering; storing a new result drops it.
#[derive(Debug, Default)]
pub struct DashboardSession {
    slot: ArcSwapOption<SessionEntry>,
    last_pdf: ArcSwapOption<Vec<u8>>,
}

impl DashboardSession {
    /// Create an empty session
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a generated result as the latest, stamped with the current time
    pub fn store(&self, result: PolicyResult) {
        self.store_at(result, Utc::now());
    }

    /// Store a generated result with an explicit timestamp
    ///
    /// Any cached PDF rendering belongs to the previous result and is
    /// dropped.
    pub fn store_at(&self, result: PolicyResult, generated_at: DateTime<Utc>) {
        self.slot.store(Some(Arc::new(SessionEntry {
            result,
            generated_at,
        })));
        self.last_pdf.store(None);
    }

    /// The latest stored entry, if any
    #[must_use]
    pub fn latest(&self) -> Option<Arc<SessionEntry>> {
        self.slot.load_full()
    }

    /// Keep a PDF rendering of the latest entry for reuse
    pub fn store_pdf(&self, bytes: Vec<u8>) {
        self.last_pdf.store(Some(Arc::new(bytes)));
    }

    /// The most recent PDF rendering, if one is still valid
    #[must_use]
    pub fn latest_pdf(&self) -> Option<Arc<Vec<u8>>> {
        self.last_pdf.load_full()
    }

    /// Drop the stored entry and any cached rendering
    pub fn clear(&self) {
        self.slot.store(None);
        self.last_pdf.store(None);
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Weather aggregation across both providers
    pub weather_service: Arc<WeatherService>,
    /// Policy generation pipeline, cache decorator included
    pub policy: Arc<dyn PolicyPort>,
    /// Template engine for the dashboard page
    pub templates: Arc<TemplateEngine>,
    /// Latest dashboard result
    pub session: Arc<DashboardSession>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}
