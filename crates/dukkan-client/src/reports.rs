//! # Report Endpoints
//!
//! Read-only aggregate views: the date-filtered report and the home
//! dashboard counters. Both are computed server-side; the client only
//! decodes and caches them.

use dukkan_core::types::{DashboardStats, DateRange, ReportSummary};

use crate::error::ClientResult;
use crate::http::{ApiClient, DataEnvelope};

impl ApiClient {
    /// `GET /reports?date_range=` - aggregates for the chosen range.
    ///
    /// `DateRange::All` sends no `date_range` parameter at all, matching
    /// the collaborator's "absent means unfiltered" convention.
    pub async fn fetch_report(&self, range: DateRange) -> ClientResult<ReportSummary> {
        let params: Vec<(&str, String)> = range
            .as_param()
            .map(|value| vec![("date_range", value.to_string())])
            .unwrap_or_default();
        let envelope: DataEnvelope<ReportSummary> = self.get_json("reports", &params).await?;
        Ok(envelope.data)
    }

    /// `GET /reports/dashboard` - the home page counters.
    pub async fn fetch_dashboard_stats(&self) -> ClientResult<DashboardStats> {
        let envelope: DataEnvelope<DashboardStats> =
            self.get_json("reports/dashboard", &[]).await?;
        Ok(envelope.data)
    }
}
