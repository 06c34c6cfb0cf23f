use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::error::CmsError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceCategory {
    #[serde(rename = "Micropigmentação")]
    Micropigmentacao,
    #[serde(rename = "Design & Olhar")]
    DesignOlhar,
    #[serde(rename = "Cabelo")]
    Cabelo,
    #[serde(rename = "Manicure & Spa")]
    Manicure,
    #[serde(rename = "Estética Facial")]
    Facial,
}

impl ServiceCategory {
    /// Declaration order, as shown in the catalog filter bar.
    pub const ALL: [ServiceCategory; 5] = [
        ServiceCategory::Micropigmentacao,
        ServiceCategory::DesignOlhar,
        ServiceCategory::Cabelo,
        ServiceCategory::Manicure,
        ServiceCategory::Facial,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ServiceCategory::Micropigmentacao => "Micropigmentação",
            ServiceCategory::DesignOlhar => "Design & Olhar",
            ServiceCategory::Cabelo => "Cabelo",
            ServiceCategory::Manicure => "Manicure & Spa",
            ServiceCategory::Facial => "Estética Facial",
        }
    }

    /// Exact, case-sensitive match against the display label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ServiceCategory {
    type Err = CmsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| CmsError::UnknownCategory {
            label: s.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceItem {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Display string: a fixed amount or "Sob Consulta".
    pub price: String,
    pub category: ServiceCategory,
    pub image_url: String,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub featured: bool,
    /// Unit slugs offering this service. Absent or empty means unscoped.
    #[serde(default)]
    pub available_in: Option<Vec<String>>,
}

impl ServiceItem {
    pub fn is_scoped(&self) -> bool {
        self.available_in
            .as_ref()
            .is_some_and(|units| !units.is_empty())
    }

    /// Unscoped services are offered everywhere.
    pub fn is_offered_in(&self, unit_slug: &str) -> bool {
        match &self.available_in {
            Some(units) if !units.is_empty() => units.iter().any(|u| u == unit_slug),
            _ => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitConfig {
    pub slug: String,
    pub name: String,
    pub city: String,
    pub address: String,
    /// Digits only, used to build `wa.me` links.
    pub whatsapp: String,
    pub whatsapp_display: String,
    pub map_embed_url: String,
    pub instagram_handle: String,
    pub hero_image: String,
    pub description: String,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub gallery_images: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AcademyProductKind {
    #[serde(rename = "Presencial")]
    InPerson,
    #[serde(rename = "Online")]
    Online,
    #[serde(rename = "Mentoria")]
    Mentorship,
}

impl AcademyProductKind {
    pub fn label(self) -> &'static str {
        match self {
            AcademyProductKind::InPerson => "Presencial",
            AcademyProductKind::Online => "Online",
            AcademyProductKind::Mentorship => "Mentoria",
        }
    }
}

impl fmt::Display for AcademyProductKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcademyProduct {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: AcademyProductKind,
    pub description: String,
    pub image_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TestimonialRole {
    #[serde(rename = "Cliente")]
    Client,
    #[serde(rename = "Aluna Academy")]
    AcademyStudent,
}

impl TestimonialRole {
    pub fn label(self) -> &'static str {
        match self {
            TestimonialRole::Client => "Cliente",
            TestimonialRole::AcademyStudent => "Aluna Academy",
        }
    }
}

impl fmt::Display for TestimonialRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    pub id: String,
    pub name: String,
    pub role: TestimonialRole,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(available_in: Option<Vec<&str>>) -> ServiceItem {
        ServiceItem {
            id: "nanoblading".to_string(),
            title: "Nanoblading Fio a Fio".to_string(),
            description: "desc".to_string(),
            price: "R$ 850,00".to_string(),
            category: ServiceCategory::Micropigmentacao,
            image_url: "https://example.com/a.jpg".to_string(),
            duration: Some("2h 30m".to_string()),
            featured: true,
            available_in: available_in.map(|v| v.into_iter().map(String::from).collect()),
        }
    }

    #[test]
    fn test_category_label_is_exact() {
        assert_eq!(
            ServiceCategory::from_label("Micropigmentação"),
            Some(ServiceCategory::Micropigmentacao)
        );
        assert_eq!(ServiceCategory::from_label("micropigmentação"), None);
        assert_eq!(ServiceCategory::from_label("Micropigmentacao"), None);
        assert!("Cabelo ".parse::<ServiceCategory>().is_err());
    }

    #[test]
    fn test_category_serde_uses_labels() {
        let json = serde_json::to_string(&ServiceCategory::DesignOlhar).unwrap();
        assert_eq!(json, "\"Design & Olhar\"");
    }

    #[test]
    fn test_unit_scoping() {
        let scoped = service(Some(vec!["sorriso"]));
        assert!(scoped.is_scoped());
        assert!(scoped.is_offered_in("sorriso"));
        assert!(!scoped.is_offered_in("chapadao"));

        let unscoped = service(None);
        assert!(!unscoped.is_scoped());
        assert!(unscoped.is_offered_in("chapadao"));

        let empty = service(Some(vec![]));
        assert!(!empty.is_scoped());
        assert!(empty.is_offered_in("sorriso"));
    }
}
