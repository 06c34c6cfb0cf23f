use crate::core::links;
use crate::domain::model::{AcademyProduct, ServiceItem, Testimonial, UnitConfig};
use crate::utils::error::Result;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(format!(
                "Unsupported format '{}'. Valid formats: table, json, csv",
                other
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        };
        f.write_str(name)
    }
}

/// A flat record that can be printed as a table row or a CSV record.
pub trait TableRow: Serialize {
    fn headers() -> &'static [&'static str];
    fn cells(&self) -> Vec<String>;
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceRow {
    pub id: String,
    pub title: String,
    pub category: &'static str,
    pub price: String,
    pub duration: String,
    pub featured: bool,
    pub available_in: String,
    pub booking_link: String,
}

impl ServiceRow {
    pub fn new(service: &ServiceItem, main_whatsapp: &str) -> Result<Self> {
        Ok(Self {
            id: service.id.clone(),
            title: service.title.clone(),
            category: service.category.label(),
            price: service.price.clone(),
            duration: service.duration.clone().unwrap_or_default(),
            featured: service.featured,
            available_in: service
                .available_in
                .as_deref()
                .map(|units| units.join(";"))
                .unwrap_or_default(),
            booking_link: links::service_booking_link(main_whatsapp, service)?.to_string(),
        })
    }
}

impl TableRow for ServiceRow {
    fn headers() -> &'static [&'static str] {
        &["ID", "TITLE", "CATEGORY", "PRICE", "DURATION", "FEATURED"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.title.clone(),
            self.category.to_string(),
            self.price.clone(),
            self.duration.clone(),
            if self.featured { "★" } else { "" }.to_string(),
        ]
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UnitRow {
    pub slug: String,
    pub name: String,
    pub city: String,
    pub address: String,
    pub whatsapp: String,
    pub instagram: String,
}

impl From<&UnitConfig> for UnitRow {
    fn from(unit: &UnitConfig) -> Self {
        Self {
            slug: unit.slug.clone(),
            name: unit.name.clone(),
            city: unit.city.clone(),
            address: unit.address.clone(),
            whatsapp: unit.whatsapp_display.clone(),
            instagram: unit.instagram_handle.clone(),
        }
    }
}

impl TableRow for UnitRow {
    fn headers() -> &'static [&'static str] {
        &["SLUG", "NAME", "CITY", "WHATSAPP"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.slug.clone(),
            self.name.clone(),
            self.city.clone(),
            self.whatsapp.clone(),
        ]
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AcademyRow {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub description: String,
}

impl From<&AcademyProduct> for AcademyRow {
    fn from(product: &AcademyProduct) -> Self {
        Self {
            id: product.id.clone(),
            title: product.title.clone(),
            kind: product.kind.label(),
            description: product.description.clone(),
        }
    }
}

impl TableRow for AcademyRow {
    fn headers() -> &'static [&'static str] {
        &["ID", "TITLE", "TYPE"]
    }

    fn cells(&self) -> Vec<String> {
        vec![self.id.clone(), self.title.clone(), self.kind.to_string()]
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TestimonialRow {
    pub id: String,
    pub name: String,
    pub role: &'static str,
    pub text: String,
}

impl From<&Testimonial> for TestimonialRow {
    fn from(testimonial: &Testimonial) -> Self {
        Self {
            id: testimonial.id.clone(),
            name: testimonial.name.clone(),
            role: testimonial.role.label(),
            text: testimonial.text.clone(),
        }
    }
}

impl TableRow for TestimonialRow {
    fn headers() -> &'static [&'static str] {
        &["ID", "NAME", "ROLE", "TEXT"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.role.to_string(),
            self.text.clone(),
        ]
    }
}

pub fn render_rows<R: TableRow>(rows: &[R], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(render_table(R::headers(), rows.iter().map(|r| r.cells()))),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(rows)?),
        OutputFormat::Csv => render_csv(rows),
    }
}

fn render_csv<R: Serialize>(rows: &[R]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| crate::utils::error::CmsError::IoError(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn render_table<I>(headers: &[&str], rows: I) -> String
where
    I: IntoIterator<Item = Vec<String>>,
{
    let rows: Vec<Vec<String>> = rows.into_iter().collect();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_line = |cells: Vec<String>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| {
                let pad = width.saturating_sub(cell.chars().count());
                format!("{}{}", cell, " ".repeat(pad))
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![format_line(headers.iter().map(|h| h.to_string()).collect())];
    lines.extend(rows.into_iter().map(format_line));
    lines.join("\n")
}

#[derive(Debug, Clone, Serialize)]
pub struct UnitDetail {
    #[serde(flatten)]
    pub unit: UnitConfig,
    pub booking_link: String,
    pub instagram_link: String,
    pub featured_services: Vec<ServiceRow>,
}

impl UnitDetail {
    pub fn new(unit: UnitConfig, featured_services: Vec<ServiceRow>) -> Result<Self> {
        Ok(Self {
            booking_link: links::unit_booking_link(&unit)?.to_string(),
            instagram_link: links::instagram_profile_link(&unit.instagram_handle)?.to_string(),
            unit,
            featured_services,
        })
    }
}

pub fn render_unit_detail(detail: &UnitDetail, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(detail)?),
        OutputFormat::Csv => render_csv(&[UnitRow::from(&detail.unit)]),
        OutputFormat::Table => {
            let unit = &detail.unit;
            let mut lines = vec![
                format!("{} ({})", unit.name, unit.slug),
                format!("City:       {}", unit.city),
                format!("Address:    {}", unit.address),
                format!("WhatsApp:   {}", unit.whatsapp_display),
                format!("Book:       {}", detail.booking_link),
                format!("Instagram:  {}", detail.instagram_link),
            ];
            if !unit.amenities.is_empty() {
                lines.push(format!("Amenities:  {}", unit.amenities.join(", ")));
            }
            if !detail.featured_services.is_empty() {
                lines.push(String::new());
                lines.push(render_table(
                    ServiceRow::headers(),
                    detail.featured_services.iter().map(|r| r.cells()),
                ));
            }
            Ok(lines.join("\n"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::content_tables::ContentTables;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("csv".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_render_table_aligns_columns() {
        let tables = ContentTables::builtin().unwrap();
        let rows: Vec<UnitRow> = tables.units.iter().map(UnitRow::from).collect();

        let output = render_rows(&rows, OutputFormat::Table).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("SLUG"));
        assert!(lines[1].starts_with("sorriso "));
        assert_eq!(lines[1].find("Loft"), lines[2].find("Loft"));
    }

    #[test]
    fn test_render_csv_has_header() {
        let tables = ContentTables::builtin().unwrap();
        let rows: Vec<TestimonialRow> =
            tables.testimonials.iter().map(TestimonialRow::from).collect();

        let output = render_rows(&rows, OutputFormat::Csv).unwrap();
        let mut reader = csv::Reader::from_reader(output.as_bytes());

        assert_eq!(
            reader.headers().unwrap().iter().collect::<Vec<_>>(),
            vec!["id", "name", "role", "text"]
        );
        assert_eq!(reader.records().count(), 6);
    }

    #[test]
    fn test_unit_detail_json_is_flat() {
        let tables = ContentTables::builtin().unwrap();
        let unit = tables.unit("sorriso").unwrap().clone();
        let detail = UnitDetail::new(unit, vec![]).unwrap();

        let output = render_unit_detail(&detail, OutputFormat::Json).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(json["slug"], "sorriso");
        assert_eq!(json["instagram_link"], "https://instagram.com/patriciarios.sorriso");
    }
}
