use crate::app::render::OutputFormat;
use crate::config::{FacadeSettings, DEFAULT_SIMULATED_DELAY_MS, MAX_SIMULATED_DELAY_MS};
use crate::domain::model::ServiceCategory;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "loft-cms")]
#[command(about = "Browse the Loft Beauty & Academy site content")]
pub struct CliConfig {
    /// Content file to load instead of the bundled content
    #[arg(long, global = true, env = "LOFT_CMS_CONTENT")]
    pub content: Option<PathBuf>,

    /// Simulated fetch latency in milliseconds
    #[arg(
        long,
        global = true,
        env = "LOFT_CMS_DELAY_MS",
        default_value_t = DEFAULT_SIMULATED_DELAY_MS
    )]
    pub delay_ms: u64,

    /// Output format: table, json or csv
    #[arg(long, global = true, default_value = "table")]
    pub format: OutputFormat,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List catalog services
    Services {
        /// Exact category label, e.g. "Micropigmentação"; "Todos" for all
        #[arg(long)]
        category: Option<String>,

        /// Only services offered in this unit
        #[arg(long)]
        unit: Option<String>,

        /// Only featured services
        #[arg(long)]
        featured: bool,

        #[arg(long)]
        limit: Option<usize>,
    },
    /// List units
    Units,
    /// Show one unit by slug
    Unit { slug: String },
    /// List academy products
    Academy,
    /// List testimonials
    Testimonials,
    /// Load everything the home page shows
    Home,
    /// Validate the content file and exit
    Validate,
}

impl CliConfig {
    pub fn facade_settings(&self) -> FacadeSettings {
        FacadeSettings::from_millis(self.delay_ms)
    }

    /// Category requested by `services --category`, `None` for all.
    pub fn category(&self) -> Result<Option<ServiceCategory>> {
        match &self.command {
            Command::Services {
                category: Some(label),
                ..
            } => crate::core::catalog::parse_category_tab(label),
            _ => Ok(None),
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_range("delay_ms", self.delay_ms, 0, MAX_SIMULATED_DELAY_MS)?;

        if let Some(path) = &self.content {
            validation::validate_non_empty_string("content", &path.to_string_lossy())?;
        }

        match &self.command {
            Command::Services { limit, unit, .. } => {
                if let Some(limit) = limit {
                    validation::validate_positive_number("limit", *limit, 1)?;
                }
                if let Some(unit) = unit {
                    validation::validate_slug("unit", unit)?;
                }
                self.category().map(|_| ())
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_services_command() {
        let config = CliConfig::parse_from([
            "loft-cms",
            "services",
            "--category",
            "Micropigmentação",
            "--unit",
            "sorriso",
            "--format",
            "json",
        ]);

        assert!(config.validate().is_ok());
        assert_eq!(config.category().unwrap(), Some(ServiceCategory::Micropigmentacao));
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.delay_ms, 600);
    }

    #[test]
    fn test_rejects_fuzzy_category() {
        let config = CliConfig::parse_from(["loft-cms", "services", "--category", "cabelo"]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_limit() {
        let config = CliConfig::parse_from(["loft-cms", "services", "--limit", "0"]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let config = CliConfig::parse_from(["loft-cms", "unit", "chapadao", "--delay-ms", "0"]);
        assert_eq!(config.facade_settings(), FacadeSettings::immediate());
        assert!(matches!(config.command, Command::Unit { ref slug } if slug == "chapadao"));
    }
}
