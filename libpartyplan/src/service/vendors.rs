//! Vendor directory and booking

use std::sync::Arc;

use crate::service::changes::{Change, ChangeBus};
use crate::source::DataSource;
use crate::types::{EventId, Vendor, VendorId};

/// Category value that disables the category filter
pub const ALL_CATEGORIES: &str = "All";

/// Case-insensitive substring match on name or category. An empty query
/// matches every vendor.
pub fn vendor_matches(vendor: &Vendor, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let query = query.to_lowercase();
    vendor.name.to_lowercase().contains(&query) || vendor.category.to_lowercase().contains(&query)
}

#[derive(Clone)]
pub struct VendorService {
    source: Arc<dyn DataSource>,
    bus: ChangeBus,
}

impl VendorService {
    pub fn new(source: Arc<dyn DataSource>, bus: ChangeBus) -> Self {
        Self { source, bus }
    }

    pub async fn fetch_vendors(&self) -> Vec<Vendor> {
        self.source.fetch_vendors().await
    }

    pub async fn fetch_vendors_by_category(&self, category: &str) -> Vec<Vendor> {
        self.source.fetch_vendors_by_category(category).await
    }

    pub async fn book_vendor(&self, event_id: EventId, vendor_id: VendorId) -> bool {
        let booked = self.source.book_vendor(event_id, vendor_id).await;
        if booked {
            self.bus.emit(Change::VendorBooked {
                event_id,
                vendor_id,
            });
        }
        booked
    }

    /// Vendor directory search.
    ///
    /// `category` is an exact filter applied first; `None` or `"All"` skips
    /// it. Then `query` narrows by name or category.
    pub async fn search_vendors(&self, query: &str, category: Option<&str>) -> Vec<Vendor> {
        let vendors = self.fetch_vendors().await;
        let category = category.filter(|c| *c != ALL_CATEGORIES);

        let results: Vec<Vendor> = vendors
            .into_iter()
            .filter(|v| category.map_or(true, |c| v.category == c))
            .filter(|v| vendor_matches(v, query))
            .collect();

        tracing::debug!(query, ?category, count = results.len(), "searched vendors");
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MockDataSource;
    use chrono::Utc;

    fn service() -> (VendorService, ChangeBus) {
        let bus = ChangeBus::new(16);
        let source = Arc::new(MockDataSource::seeded_instant(Utc::now()));
        (VendorService::new(source, bus.clone()), bus)
    }

    fn ids(vendors: &[Vendor]) -> Vec<VendorId> {
        vendors.iter().map(|v| v.id).collect()
    }

    #[tokio::test]
    async fn test_search_by_name_or_category() {
        let (vendors, _) = service();

        assert_eq!(ids(&vendors.search_vendors("dj", None).await), vec![6]);
        assert_eq!(ids(&vendors.search_vendors("FOOD", None).await), vec![2, 8]);
        assert_eq!(ids(&vendors.search_vendors("decor", None).await), vec![3, 7]);
    }

    #[tokio::test]
    async fn test_search_with_category_filter() {
        let (vendors, _) = service();

        assert_eq!(
            ids(&vendors.search_vendors("", Some("Decoration")).await),
            vec![3, 7]
        );
        assert_eq!(
            ids(&vendors.search_vendors("budget", Some("Decoration")).await),
            vec![7]
        );
        assert!(vendors.search_vendors("budget", Some("Food")).await.is_empty());
    }

    #[tokio::test]
    async fn test_all_category_and_empty_query_return_everything() {
        let (vendors, _) = service();

        assert_eq!(vendors.search_vendors("", Some("All")).await.len(), 8);
        assert_eq!(vendors.search_vendors("", None).await.len(), 8);
    }

    #[tokio::test]
    async fn test_book_vendor_emits_change() {
        let (vendors, bus) = service();
        let mut changes = bus.subscribe();

        assert!(!vendors.book_vendor(1, 99).await);
        assert!(vendors.book_vendor(1, 5).await);

        assert_eq!(
            changes.try_recv().unwrap(),
            Change::VendorBooked {
                event_id: 1,
                vendor_id: 5
            }
        );
        assert!(changes.try_recv().is_err());

        let venues = vendors.fetch_vendors_by_category("Venue").await;
        assert!(venues[0].is_booked);
    }
}
