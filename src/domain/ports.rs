use crate::domain::model::{AcademyProduct, ServiceItem, Testimonial, UnitConfig};
use async_trait::async_trait;

/// Read access to site content.
///
/// Every operation resolves exactly once and never fails: collections resolve
/// to their full contents, and the slug lookup resolves to `None` on a miss.
/// A remote backend implementing this trait has to map its own failures onto
/// that contract.
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn fetch_all_services(&self) -> Vec<ServiceItem>;

    /// Units in the order they were declared in the content tables.
    async fn fetch_all_units(&self) -> Vec<UnitConfig>;

    /// Exact, case-sensitive slug match.
    async fn fetch_unit_by_slug(&self, slug: &str) -> Option<UnitConfig>;

    async fn fetch_all_academy_products(&self) -> Vec<AcademyProduct>;

    async fn fetch_all_testimonials(&self) -> Vec<Testimonial>;
}
