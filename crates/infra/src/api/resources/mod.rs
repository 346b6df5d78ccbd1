//! One client per backend resource
//!
//! Each client is a thin typed wrapper over [`ApiClient`]: serialize the
//! parameters, send, unwrap the envelope. No retries, caching or paging
//! logic live here.
//!
//! [`ApiClient`]: super::ApiClient

pub mod bookings;
pub mod catalog;
pub mod dashboard;
pub mod dealerships;
pub mod enquiries;
pub mod files;
pub mod quotations;
pub mod remarks;
pub mod stock;
pub mod users;

use std::borrow::Cow;

pub use bookings::BookingsClient;
pub use catalog::CatalogClient;
pub use dashboard::DashboardClient;
pub use dealerships::DealershipsClient;
pub use enquiries::EnquiriesClient;
pub use files::FilesClient;
pub use quotations::QuotationsClient;
pub use remarks::RemarksClient;
pub use stock::StockClient;
pub use users::UsersClient;

/// Percent-encode an id for use as a path segment
pub(crate) fn segment(id: &str) -> Cow<'_, str> {
    urlencoding::encode(id)
}
