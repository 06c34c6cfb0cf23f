use crate::domain::model::{ServiceCategory, ServiceItem, Testimonial};
use crate::utils::error::Result;

/// Label of the catalog tab that shows every category.
pub const ALL_CATEGORIES_LABEL: &str = "Todos";

pub const UNIT_PAGE_FEATURED_LIMIT: usize = 3;

pub const INITIAL_TESTIMONIALS: usize = 3;

/// Local filtering over an already fetched service list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceFilter {
    /// `None` shows every category.
    pub category: Option<ServiceCategory>,
    /// Keep only services offered in this unit.
    pub unit: Option<String>,
    pub featured_only: bool,
    pub limit: Option<usize>,
}

impl ServiceFilter {
    pub fn all() -> Self {
        Self::default()
    }

    /// Builds a filter from a catalog tab label. Matching is exact.
    pub fn from_tab(label: &str) -> Result<Self> {
        Ok(Self {
            category: parse_category_tab(label)?,
            ..Self::default()
        })
    }

    pub fn category(mut self, category: ServiceCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn unit(mut self, slug: impl Into<String>) -> Self {
        self.unit = Some(slug.into());
        self
    }

    pub fn featured(mut self) -> Self {
        self.featured_only = true;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn matches(&self, service: &ServiceItem) -> bool {
        if let Some(category) = self.category {
            if service.category != category {
                return false;
            }
        }
        if let Some(unit) = &self.unit {
            if !service.is_offered_in(unit) {
                return false;
            }
        }
        !self.featured_only || service.featured
    }

    /// Keeps source order.
    pub fn apply(&self, services: &[ServiceItem]) -> Vec<ServiceItem> {
        let matching = services.iter().filter(|s| self.matches(s)).cloned();
        match self.limit {
            Some(limit) => matching.take(limit).collect(),
            None => matching.collect(),
        }
    }
}

/// Tab labels in display order: "Todos" followed by each category.
pub fn category_tabs() -> Vec<&'static str> {
    std::iter::once(ALL_CATEGORIES_LABEL)
        .chain(ServiceCategory::ALL.iter().map(|c| c.label()))
        .collect()
}

pub fn parse_category_tab(label: &str) -> Result<Option<ServiceCategory>> {
    if label == ALL_CATEGORIES_LABEL {
        return Ok(None);
    }
    label.parse().map(Some)
}

/// Home page carousel.
pub fn featured_services(services: &[ServiceItem]) -> Vec<ServiceItem> {
    ServiceFilter::all().featured().apply(services)
}

pub fn unit_featured_services(services: &[ServiceItem], unit_slug: &str) -> Vec<ServiceItem> {
    ServiceFilter::all()
        .unit(unit_slug)
        .featured()
        .limit(UNIT_PAGE_FEATURED_LIMIT)
        .apply(services)
}

/// Splits into the testimonials shown up front and those behind "show more".
pub fn split_testimonials(
    testimonials: &[Testimonial],
    initial: usize,
) -> (&[Testimonial], &[Testimonial]) {
    testimonials.split_at(initial.min(testimonials.len()))
}
