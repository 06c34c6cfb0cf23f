use crate::domain::model::{AcademyProduct, ServiceItem, Testimonial, UnitConfig};
use crate::utils::error::{CmsError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::sync::{Arc, LazyLock};

/// Content shipped with the binary.
pub const BUILTIN_CONTENT: &str = include_str!("../../content/loft.toml");

static ENV_VAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is a valid regex"));

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactConfig {
    /// Central booking number used by the catalog.
    pub main_whatsapp: String,
}

/// The site's content, loaded once and read-only afterwards.
///
/// Collections keep their declaration order; `units` in particular is the
/// order `fetch_all_units` reports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentTables {
    pub contact: ContactConfig,
    #[serde(default)]
    pub services: Vec<ServiceItem>,
    #[serde(default)]
    pub units: Vec<UnitConfig>,
    #[serde(default)]
    pub academy_products: Vec<AcademyProduct>,
    #[serde(default)]
    pub testimonials: Vec<Testimonial>,
}

impl ContentTables {
    /// Parses and validates the bundled content.
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_CONTENT)
    }

    /// Loads content from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        tracing::debug!("Loaded content file: {}", path.as_ref().display());
        Self::from_toml_str(&content)
    }

    /// Parses TOML content, then validates it. Malformed tables are rejected
    /// as a whole.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);
        let tables: ContentTables = toml::from_str(&processed_content)?;
        tables.validate()?;

        tracing::debug!(
            "Content tables ready: {} services, {} units, {} academy products, {} testimonials",
            tables.services.len(),
            tables.units.len(),
            tables.academy_products.len(),
            tables.testimonials.len()
        );
        Ok(tables)
    }

    /// Replaces `${VAR}` with the environment value; unset variables are left as-is.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_PATTERN
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn unit(&self, slug: &str) -> Option<&UnitConfig> {
        self.units.iter().find(|u| u.slug == slug)
    }

    fn validate_services(&self) -> Result<()> {
        validation::validate_unique_keys("services", self.services.iter().map(|s| s.id.as_str()))?;

        let unit_slugs: HashSet<&str> = self.units.iter().map(|u| u.slug.as_str()).collect();
        for service in &self.services {
            validation::validate_non_empty_string("services.id", &service.id)?;
            validation::validate_non_empty_string("services.title", &service.title)?;
            validation::validate_non_empty_string("services.price", &service.price)?;
            validation::validate_url("services.image_url", &service.image_url)?;

            for unit in service.available_in.iter().flatten() {
                if !unit_slugs.contains(unit.as_str()) {
                    return Err(CmsError::UnknownUnitReference {
                        service: service.id.clone(),
                        unit: unit.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    fn validate_units(&self) -> Result<()> {
        validation::validate_unique_keys("units", self.units.iter().map(|u| u.slug.as_str()))?;

        for unit in &self.units {
            validation::validate_slug("units.slug", &unit.slug)?;
            validation::validate_non_empty_string("units.name", &unit.name)?;
            validation::validate_phone_digits("units.whatsapp", &unit.whatsapp)?;
            validation::validate_instagram_handle(
                "units.instagram_handle",
                &unit.instagram_handle,
            )?;
            validation::validate_url("units.map_embed_url", &unit.map_embed_url)?;
            validation::validate_url("units.hero_image", &unit.hero_image)?;
            for image in &unit.gallery_images {
                validation::validate_url("units.gallery_images", image)?;
            }
        }
        Ok(())
    }

    fn validate_academy(&self) -> Result<()> {
        validation::validate_unique_keys(
            "academy_products",
            self.academy_products.iter().map(|p| p.id.as_str()),
        )?;
        for product in &self.academy_products {
            validation::validate_non_empty_string("academy_products.title", &product.title)?;
            validation::validate_url("academy_products.image_url", &product.image_url)?;
        }
        Ok(())
    }

    fn validate_testimonials(&self) -> Result<()> {
        validation::validate_unique_keys(
            "testimonials",
            self.testimonials.iter().map(|t| t.id.as_str()),
        )?;
        for testimonial in &self.testimonials {
            validation::validate_non_empty_string("testimonials.name", &testimonial.name)?;
            validation::validate_non_empty_string("testimonials.text", &testimonial.text)?;
        }
        Ok(())
    }
}

impl Validate for ContentTables {
    fn validate(&self) -> Result<()> {
        validation::validate_phone_digits("contact.main_whatsapp", &self.contact.main_whatsapp)?;
        self.validate_units()?;
        self.validate_services()?;
        self.validate_academy()?;
        self.validate_testimonials()
    }
}
