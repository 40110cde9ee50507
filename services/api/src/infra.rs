use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use exam_ai::config::GraderConfig;
use exam_ai::grading::{
    FallbackScorer, GraderGateway, GradingService, HttpGraderClient, ReportId, ReportPolicy,
    ReportRecord, ReportRepository, RepositoryError, ScoringConfig,
};
use tracing::{info, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryReportRepository {
    records: Arc<Mutex<HashMap<ReportId, ReportRecord>>>,
}

impl ReportRepository for InMemoryReportRepository {
    fn insert(&self, record: ReportRecord) -> Result<ReportRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &ReportId) -> Result<Option<ReportRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn recent(&self, limit: usize) -> Result<Vec<ReportRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut records: Vec<ReportRecord> = guard.values().cloned().collect();
        records.sort_by(|a, b| b.id.0.cmp(&a.id.0));
        records.truncate(limit);
        Ok(records)
    }
}

pub(crate) fn default_scoring_config() -> ScoringConfig {
    ScoringConfig::standard()
}

pub(crate) fn default_report_policy() -> ReportPolicy {
    ReportPolicy::standard()
}

/// Build the grading service, attaching the remote gateway only when a
/// credential is configured; the service grades on the fallback scorer alone
/// otherwise.
pub(crate) fn build_grading_service(
    repository: Arc<InMemoryReportRepository>,
    grader: &GraderConfig,
) -> GradingService<InMemoryReportRepository> {
    let service = GradingService::new(
        repository,
        FallbackScorer::new(default_scoring_config()),
        default_report_policy(),
    );

    match build_gateway(grader) {
        Some(gateway) => service.with_gateway(gateway),
        None => service,
    }
}

fn build_gateway(grader: &GraderConfig) -> Option<Box<dyn GraderGateway>> {
    if !grader.remote_enabled() {
        info!("no grader credential configured; serving fallback grading only");
        return None;
    }

    match HttpGraderClient::new(grader.clone()) {
        Ok(client) => {
            info!(model = %grader.model, "remote grading enabled");
            Some(Box::new(client))
        }
        Err(err) => {
            warn!(error = %err, "remote grader unavailable; serving fallback grading only");
            None
        }
    }
}
