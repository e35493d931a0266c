use super::types::{NewRentable, Pagination, RentableUpdate};
use super::{expect_deleted, AdminApi};
use crate::error::{AdminError, Result};
use crate::graphql::{decode_field, documents};
use crate::models::{RentablePage, RentableSummary};
use crate::search::{sync_listings, IndexWriter, SearchIndex, SyncReport};
use serde_json::json;
use tracing::{info, warn};

impl AdminApi {
    pub async fn list_rentable(&self, page: Pagination) -> Result<RentablePage> {
        let data = self
            .execute(documents::GET_RENTABLE_CARS, page.to_variables())
            .await?;
        decode_field(data, "getRentableCars")
    }

    /// Fetch the authoritative rentable list and push it into the search index
    pub async fn fetch_and_sync<W>(&self, page: Pagination, writer: &W) -> Result<(RentablePage, SyncReport)>
    where
        W: IndexWriter + ?Sized,
    {
        let rentable = self.list_rentable(page).await?;
        let report = sync_listings(writer, &rentable.rentable_cars).await;
        Ok((rentable, report))
    }

    pub async fn add_rentable(&self, input: &NewRentable) -> Result<RentableSummary> {
        input.validate()?;
        let data = self
            .execute(documents::ADD_RENTABLE_CAR, json!({ "input": input }))
            .await?;
        let created: RentableSummary = decode_field(data, "addRentable")?;
        info!("Car added to rentable list as {}", created.id);
        Ok(created)
    }

    pub async fn update_rentable(&self, id: &str, update: &RentableUpdate) -> Result<RentableSummary> {
        update.validate()?;
        let data = self
            .execute(
                documents::UPDATE_RENTABLE_CAR,
                json!({ "id": id, "input": update }),
            )
            .await?;
        let updated: RentableSummary = decode_field(data, "updateRentableCar")?;
        info!("Rentable car {} updated", updated.id);
        Ok(updated)
    }

    /// Delete a rentable car, then drop its search document.
    ///
    /// The index removal is best-effort: the source record is already gone,
    /// so a failure there is only logged.
    pub async fn delete_rentable<S>(&self, id: &str, index: Option<&S>) -> Result<()>
    where
        S: SearchIndex + ?Sized,
    {
        if id.trim().is_empty() {
            return Err(AdminError::Validation("Rentable car id is required".to_string()));
        }

        let data = self
            .execute(documents::DELETE_RENTABLE_CAR, json!({ "id": id }))
            .await?;
        expect_deleted(data, "deleteRentableCar", "rentable car")?;
        info!("Rentable car {} deleted", id);

        match index {
            Some(index) => {
                if let Err(e) = index.delete_document(id).await {
                    warn!("Rentable car {} is still searchable: {}", id, e);
                }
            }
            None => warn!("No search index configured, {} stays searchable until reindexed", id),
        }
        Ok(())
    }
}
