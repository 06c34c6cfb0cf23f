use crate::app::render::{
    self, AcademyRow, OutputFormat, ServiceRow, TestimonialRow, UnitDetail, UnitRow,
};
use crate::config::cli::{CliConfig, Command};
use crate::config::content_tables::ContentTables;
use crate::config::FacadeSettings;
use crate::core::catalog::{self, ServiceFilter, INITIAL_TESTIMONIALS};
use crate::core::facade::StaticContentSource;
use crate::core::hooks::{self, HomeHooks, SharedSource, UnitHook};
use crate::utils::error::{CmsError, Result};
use std::sync::Arc;

/// Loads content, runs one command, returns its rendered output.
pub async fn run(config: &CliConfig) -> Result<String> {
    let tables = load_tables(config)?;

    if matches!(config.command, Command::Validate) {
        return Ok(format!(
            "Content OK: {} services, {} units, {} academy products, {} testimonials",
            tables.services.len(),
            tables.units.len(),
            tables.academy_products.len(),
            tables.testimonials.len()
        ));
    }

    let main_whatsapp = tables.contact.main_whatsapp.clone();
    let source: SharedSource = Arc::new(StaticContentSource::new(
        tables.into_shared(),
        &config.facade_settings(),
    ));
    execute(&config.command, &source, &main_whatsapp, config.format).await
}

fn load_tables(config: &CliConfig) -> Result<ContentTables> {
    match &config.content {
        Some(path) => {
            tracing::info!("📁 Loading content from: {}", path.display());
            ContentTables::from_file(path)
        }
        None => {
            tracing::debug!("Using bundled content");
            ContentTables::builtin()
        }
    }
}

/// Runs a command against any content source.
pub async fn execute(
    command: &Command,
    source: &SharedSource,
    main_whatsapp: &str,
    format: OutputFormat,
) -> Result<String> {
    match command {
        Command::Services {
            category,
            unit,
            featured,
            limit,
        } => {
            let mut filter = match category {
                Some(label) => ServiceFilter::from_tab(label)?,
                None => ServiceFilter::all(),
            };
            filter.unit = unit.clone();
            filter.featured_only = *featured;
            filter.limit = *limit;

            let services = hooks::use_services(source).wait_ready().await.unwrap_or_default();
            let selected = filter.apply(&services);
            tracing::info!("Selected {} of {} services", selected.len(), services.len());

            let rows = selected
                .iter()
                .map(|s| ServiceRow::new(s, main_whatsapp))
                .collect::<Result<Vec<_>>>()?;
            render::render_rows(&rows, format)
        }
        Command::Units => {
            let units = hooks::use_units(source).wait_ready().await.unwrap_or_default();
            let rows: Vec<UnitRow> = units.iter().map(UnitRow::from).collect();
            render::render_rows(&rows, format)
        }
        Command::Unit { slug } => {
            let unit_hook = UnitHook::new(source, Some(slug.as_str()));
            let services_hook = hooks::use_services(source);

            let (unit, services) = tokio::join!(unit_hook.wait_ready(), services_hook.wait_ready());
            let unit = unit.ok_or_else(|| CmsError::UnitNotFound { slug: slug.clone() })?;

            let services = services.unwrap_or_default();
            let featured = catalog::unit_featured_services(&services, &unit.slug)
                .iter()
                .map(|s| ServiceRow::new(s, main_whatsapp))
                .collect::<Result<Vec<_>>>()?;
            let detail = UnitDetail::new(unit, featured)?;
            render::render_unit_detail(&detail, format)
        }
        Command::Academy => {
            let products = hooks::use_academy(source).wait_ready().await.unwrap_or_default();
            let rows: Vec<AcademyRow> = products.iter().map(AcademyRow::from).collect();
            render::render_rows(&rows, format)
        }
        Command::Testimonials => {
            let testimonials = hooks::use_testimonials(source)
                .wait_ready()
                .await
                .unwrap_or_default();
            let rows: Vec<TestimonialRow> = testimonials.iter().map(TestimonialRow::from).collect();
            render::render_rows(&rows, format)
        }
        Command::Home => {
            let home = HomeHooks::start(source);
            let content = home.wait_ready().await.unwrap_or_else(|| hooks::HomeContent {
                services: home.services.data(),
                units: home.units.data(),
                academy_products: home.academy.data(),
                testimonials: home.testimonials.data(),
            });
            render_home(&content, format)
        }
        Command::Validate => Ok("Content OK".to_string()),
    }
}

fn render_home(content: &hooks::HomeContent, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(content)?);
    }

    let units: Vec<UnitRow> = content.units.iter().map(UnitRow::from).collect();
    let carousel: Vec<String> = catalog::featured_services(&content.services)
        .into_iter()
        .map(|s| s.title)
        .collect();
    let (initial, more) = catalog::split_testimonials(&content.testimonials, INITIAL_TESTIMONIALS);
    let initial: Vec<TestimonialRow> = initial.iter().map(TestimonialRow::from).collect();

    let sections = [
        format!("Featured: {}", carousel.join(" | ")),
        render::render_rows(&units, format)?,
        render::render_rows(
            &content
                .academy_products
                .iter()
                .map(AcademyRow::from)
                .collect::<Vec<_>>(),
            format,
        )?,
        render::render_rows(&initial, format)?,
        format!("(+{} more testimonials)", more.len()),
    ];
    Ok(sections.join("\n\n"))
}

/// Same as [`run`] with settings supplied directly; used by tests and embedders.
pub async fn run_with(
    tables: ContentTables,
    settings: &FacadeSettings,
    command: &Command,
    format: OutputFormat,
) -> Result<String> {
    let main_whatsapp = tables.contact.main_whatsapp.clone();
    let source: SharedSource = Arc::new(StaticContentSource::new(tables.into_shared(), settings));
    execute(command, &source, &main_whatsapp, format).await
}
