pub mod query;
pub mod sync;
pub mod traits;
pub mod types;
pub mod typesense;
pub mod view;

pub use query::SearchRequest;
pub use sync::{sync_listings, SyncOutcome, SyncReport};
pub use traits::{IndexWriter, SearchIndex};
pub use types::{SearchCriteria, SortDirection};
pub use typesense::{GraphqlIndexWriter, TypesenseClient};
pub use view::{ListingRow, ListingView};

use crate::error::{AdminError, Result};
use crate::models::RentableListing;
use tracing::{debug, error};

/// Search rentable listings.
///
/// Invalid criteria are reported as validation errors. Any failure from the
/// index itself is logged and collapsed into [`AdminError::SearchFailed`].
pub async fn search_listings<S>(index: &S, criteria: &SearchCriteria) -> Result<Vec<RentableListing>>
where
    S: SearchIndex + ?Sized,
{
    debug!("Search parameters: {:?}", criteria);
    let request = SearchRequest::from_criteria(criteria)?;
    debug!("Filters being used: {}", request.filter_by);

    match index.search(&request).await {
        Ok(listings) => {
            debug!("Search returned {} hits", listings.len());
            Ok(listings)
        }
        Err(e) => {
            error!("Search error: {}", e);
            Err(AdminError::SearchFailed)
        }
    }
}
