use crate::config::content_tables::ContentTables;
use crate::config::FacadeSettings;
use crate::domain::model::{AcademyProduct, ServiceItem, Testimonial, UnitConfig};
use crate::domain::ports::ContentSource;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Content access over the in-memory tables.
///
/// Each call re-derives its result from the tables and waits out the
/// simulated delay; nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct StaticContentSource {
    tables: Arc<ContentTables>,
    delay: Duration,
}

impl StaticContentSource {
    pub fn new(tables: Arc<ContentTables>, settings: &FacadeSettings) -> Self {
        Self {
            tables,
            delay: settings.simulated_delay,
        }
    }

    pub fn tables(&self) -> &ContentTables {
        &self.tables
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    async fn respond<T: Send>(&self, operation: &str, value: T) -> T {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        tracing::debug!("{} resolved after {:?}", operation, self.delay);
        value
    }
}

#[async_trait]
impl ContentSource for StaticContentSource {
    async fn fetch_all_services(&self) -> Vec<ServiceItem> {
        let services = self.tables.services.clone();
        tracing::debug!("fetch_all_services: {} items", services.len());
        self.respond("fetch_all_services", services).await
    }

    async fn fetch_all_units(&self) -> Vec<UnitConfig> {
        let units = self.tables.units.clone();
        tracing::debug!("fetch_all_units: {} items", units.len());
        self.respond("fetch_all_units", units).await
    }

    async fn fetch_unit_by_slug(&self, slug: &str) -> Option<UnitConfig> {
        let unit = self.tables.unit(slug).cloned();
        tracing::debug!("fetch_unit_by_slug({:?}): found={}", slug, unit.is_some());
        self.respond("fetch_unit_by_slug", unit).await
    }

    async fn fetch_all_academy_products(&self) -> Vec<AcademyProduct> {
        let products = self.tables.academy_products.clone();
        tracing::debug!("fetch_all_academy_products: {} items", products.len());
        self.respond("fetch_all_academy_products", products).await
    }

    async fn fetch_all_testimonials(&self) -> Vec<Testimonial> {
        let testimonials = self.tables.testimonials.clone();
        tracing::debug!("fetch_all_testimonials: {} items", testimonials.len());
        self.respond("fetch_all_testimonials", testimonials).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use tokio::time::Instant;

    fn source() -> StaticContentSource {
        let tables = ContentTables::builtin().unwrap().into_shared();
        StaticContentSource::new(tables, &FacadeSettings::default())
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_waits_out_the_delay() {
        let source = source();
        let started = Instant::now();

        let services = source.fetch_all_services().await;

        assert!(started.elapsed() >= Duration::from_millis(600));
        assert_eq!(services.len(), 13);
    }

    #[tokio::test(start_paused = true)]
    async fn test_services_are_unique() {
        let services = source().fetch_all_services().await;
        let ids: HashSet<&str> = services.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids.len(), services.len());
    }

    #[tokio::test(start_paused = true)]
    async fn test_unit_lookup_is_exact() {
        let source = source();

        let unit = source.fetch_unit_by_slug("chapadao").await.unwrap();
        assert_eq!(unit.name, "Loft Beauty Chapadão");

        assert!(source.fetch_unit_by_slug("recife").await.is_none());
        assert!(source.fetch_unit_by_slug("").await.is_none());
        assert!(source.fetch_unit_by_slug("chapadao ").await.is_none());
        assert!(source.fetch_unit_by_slug("CHAPADAO").await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_repeated_fetches_are_equal_and_independent() {
        let source = source();

        let mut first = source.fetch_all_testimonials().await;
        let second = source.fetch_all_testimonials().await;
        assert_eq!(first, second);

        first[0].text.clear();
        let third = source.fetch_all_testimonials().await;
        assert_eq!(third, second);
    }

    #[test]
    fn test_zero_delay_needs_no_timer() {
        let tables = ContentTables::builtin().unwrap().into_shared();
        let source = StaticContentSource::new(tables, &FacadeSettings::immediate());

        let products = tokio_test::block_on(source.fetch_all_academy_products());
        assert_eq!(products.len(), 3);
    }
}
