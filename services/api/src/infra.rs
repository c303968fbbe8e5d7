use marketing_scorecard::analysis::{HistoryError, ReportExport, ReportHistory};
use metrics_exporter_prometheus::PrometheusHandle;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// History persisted as a JSON array of report exports, oldest first.
#[derive(Debug)]
pub(crate) struct JsonFileHistory {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileHistory {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    fn guard(&self) -> Result<MutexGuard<'_, ()>, HistoryError> {
        self.lock
            .lock()
            .map_err(|_| HistoryError::Unavailable("history lock poisoned".to_string()))
    }

    fn load(&self) -> Result<Vec<ReportExport>, HistoryError> {
        match fs::read(&self.path) {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Vec::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => Err(err.into()),
        }
    }
}

impl ReportHistory for JsonFileHistory {
    fn record(&self, report: &ReportExport) -> Result<(), HistoryError> {
        let _guard = self.guard()?;
        let mut entries = self.load()?;
        entries.push(report.clone());

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let encoded = serde_json::to_vec_pretty(&entries)?;
        fs::write(&self.path, encoded)?;
        Ok(())
    }

    fn recent(&self, limit: usize) -> Result<Vec<ReportExport>, HistoryError> {
        let _guard = self.guard()?;
        let entries = self.load()?;
        Ok(entries.into_iter().rev().take(limit).collect())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryHistory {
    entries: Arc<Mutex<Vec<ReportExport>>>,
}

impl ReportHistory for InMemoryHistory {
    fn record(&self, report: &ReportExport) -> Result<(), HistoryError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|_| HistoryError::Unavailable("history mutex poisoned".to_string()))?;
        guard.push(report.clone());
        Ok(())
    }

    fn recent(&self, limit: usize) -> Result<Vec<ReportExport>, HistoryError> {
        let guard = self
            .entries
            .lock()
            .map_err(|_| HistoryError::Unavailable("history mutex poisoned".to_string()))?;
        Ok(guard.iter().rev().take(limit).cloned().collect())
    }
}

/// Parse `platform:handle`; a bare platform name yields an empty (unverified) handle.
pub(crate) fn parse_social_handle(raw: &str) -> Result<(String, String), String> {
    let (platform, handle) = match raw.split_once(':') {
        Some((platform, handle)) => (platform.trim(), handle.trim()),
        None => (raw.trim(), ""),
    };
    if platform.is_empty() {
        return Err(format!(
            "failed to parse '{raw}' as platform:handle (platform is empty)"
        ));
    }
    Ok((platform.to_ascii_lowercase(), handle.to_string()))
}
