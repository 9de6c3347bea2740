//! Application state shared by the axum handlers.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use thiserror::Error;

use skyroute_lib::{load_airports_or_sample, Error as LibError, RouteGraphEngine};

/// Error during application state initialization.
#[derive(Debug, Error)]
pub enum AppStateError {
    /// The airport dataset could not be read or parsed.
    #[error("failed to load airports: {0}")]
    AirportsLoad(#[source] LibError),

    /// The airport set was rejected while building the route graph.
    #[error("failed to build route graph: {0}")]
    GraphBuild(#[source] LibError),
}

/// Shared application state for all axum handlers.
///
/// Cheaply cloneable; share it via axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    engine: RouteGraphEngine,
    started: Instant,
    started_at: DateTime<Utc>,
}

impl AppState {
    /// Load airports from `airports_path` (or the sample network) and build the engine.
    pub fn load(airports_path: Option<&Path>) -> Result<Self, AppStateError> {
        let airports = load_airports_or_sample(airports_path).map_err(AppStateError::AirportsLoad)?;

        let engine = RouteGraphEngine::new();
        engine
            .build_graph(airports)
            .map_err(AppStateError::GraphBuild)?;
        tracing::info!(
            airports = engine.list_airports().len(),
            routes = engine.route_count(),
            "route graph ready"
        );

        Ok(Self::from_engine(engine))
    }

    /// Wrap an existing engine, built or not.
    pub fn from_engine(engine: RouteGraphEngine) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                engine,
                started: Instant::now(),
                started_at: Utc::now(),
            }),
        }
    }

    /// The shared route engine.
    pub fn engine(&self) -> &RouteGraphEngine {
        &self.inner.engine
    }

    /// Seconds since the state was created.
    pub fn uptime_secs(&self) -> f64 {
        self.inner.started.elapsed().as_secs_f64()
    }

    /// Wall-clock start time, reported by `/api/health`.
    pub fn started_at(&self) -> DateTime<Utc> {
        self.inner.started_at
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("built", &self.inner.engine.is_built())
            .field("route_count", &self.inner.engine.route_count())
            .field("started_at", &self.inner.started_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_without_path_uses_sample_network() {
        let state = AppState::load(None).expect("sample loads");
        assert!(state.engine().is_built());
        assert_eq!(state.engine().list_airports().len(), 8);
    }

    #[test]
    fn load_missing_file_fails() {
        let err = AppState::load(Some(Path::new("/nonexistent/airports.json"))).unwrap_err();
        assert!(matches!(err, AppStateError::AirportsLoad(_)));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn load_csv_dataset() {
        use std::io::Write;

        let mut file = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .expect("temp file");
        writeln!(file, "code,name,city,latitude,longitude,fee").unwrap();
        writeln!(file, "AAA,Alpha Field,Alpha,10.0,10.0,5").unwrap();
        writeln!(file, "BBB,Beta Field,Beta,11.0,11.0,5").unwrap();

        let state = AppState::load(Some(file.path())).expect("csv loads");
        assert_eq!(state.engine().list_airports().len(), 2);
        assert_eq!(state.engine().route_count(), 2);
    }

    #[test]
    fn load_duplicate_codes_fails_graph_build() {
        use std::io::Write;

        let mut file = tempfile::Builder::new()
            .suffix(".json")
            .tempfile()
            .expect("temp file");
        write!(
            file,
            r#"[{{"code":"AAA","name":"A","city":"A","latitude":0,"longitude":0}},{{"code":"AAA","name":"B","city":"B","latitude":1,"longitude":1}}]"#
        )
        .unwrap();

        let err = AppState::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, AppStateError::GraphBuild(_)));
    }

    #[test]
    fn clones_share_the_engine() {
        let state = AppState::from_engine(RouteGraphEngine::new());
        let clone = state.clone();
        assert!(std::ptr::eq(state.engine(), clone.engine()));
    }

    #[test]
    fn debug_output() {
        let state = AppState::from_engine(RouteGraphEngine::new());
        let debug = format!("{state:?}");
        assert!(debug.contains("AppState"));
        assert!(debug.contains("built: false"));
    }
}
