use super::traits::IndexWriter;
use crate::error::{AdminError, Result};
use crate::models::{RentableCar, RentableListing};
use tracing::{debug, error, info};

/// What happened to one record during a sync run
#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    Upserted { id: String },
    Failed { id: String, name: String, reason: String },
}

/// Per-record results of one sync run, in list order.
///
/// The run stops at the first failure, so `outcomes` ends with at most one
/// `Failed` entry and `skipped` counts the records never attempted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncReport {
    pub outcomes: Vec<SyncOutcome>,
    pub skipped: usize,
}

impl SyncReport {
    pub fn attempted(&self) -> usize {
        self.outcomes.len()
    }

    pub fn upserted(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, SyncOutcome::Upserted { .. }))
            .count()
    }

    pub fn failure(&self) -> Option<&SyncOutcome> {
        self.outcomes
            .iter()
            .find(|o| matches!(o, SyncOutcome::Failed { .. }))
    }

    /// Number of upserted records, or an error naming the record that failed
    pub fn into_result(self) -> Result<usize> {
        match self.failure() {
            Some(SyncOutcome::Failed { name, .. }) => Err(AdminError::SyncFailed { name: name.clone() }),
            _ => Ok(self.upserted()),
        }
    }
}

/// Upsert every record into the index, one at a time, stopping at the first failure
pub async fn sync_listings<W>(writer: &W, records: &[RentableCar]) -> SyncReport
where
    W: IndexWriter + ?Sized,
{
    info!(
        "Syncing {} rentable cars to the search index via {}",
        records.len(),
        writer.writer_name()
    );

    let mut report = SyncReport::default();

    for (position, record) in records.iter().enumerate() {
        let listing = RentableListing::from(record);

        match writer.upsert(&listing).await {
            Ok(()) => {
                debug!("Upserted {} ({})", record.car.name, record.id);
                report.outcomes.push(SyncOutcome::Upserted {
                    id: record.id.clone(),
                });
            }
            Err(e) => {
                error!("Error adding car {} to the search index: {}", record.car.name, e);
                report.outcomes.push(SyncOutcome::Failed {
                    id: record.id.clone(),
                    name: record.car.name.clone(),
                    reason: e.to_string(),
                });
                report.skipped = records.len() - position - 1;
                return report;
            }
        }
    }

    info!("Search index sync finished: {} upserted", report.upserted());
    report
}
