//! Command-line surface.

use clap::{Args, Parser, Subcommand};
use folio_core::{CategoryFilter, ChartPoint, ProjectCategory, RecordId};
use std::path::PathBuf;

/// Portfolio content manager: edit the site's content document locally and
/// export `portfolio-data.json` for redeploy.
#[derive(Parser, Debug)]
#[command(name = "folio", author, version, long_about = None)]
pub struct Cli {
    /// Config file (defaults to ./folio.toml when present).
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Bundled default document.
    #[arg(long, global = true, value_name = "FILE")]
    pub bundle: Option<PathBuf>,

    /// Local storage database holding the working copy.
    #[arg(long, global = true, value_name = "FILE")]
    pub storage: Option<PathBuf>,

    /// Admin password; required by commands that change or export content.
    #[arg(long, global = true)]
    pub password: Option<String>,

    /// Log at debug level.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show where content was loaded from and per-section counts.
    Status,
    /// Print the form fields of a section.
    Fields { section: String },
    /// List the records of a section with their keys.
    List { section: String },
    /// Print project cards with derived KPIs.
    Kpis {
        #[arg(long, default_value = "all")]
        category: CategoryFilter,
    },
    /// Add a record to a flat section.
    Add {
        section: String,
        #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
        sets: Vec<(String, String)>,
    },
    /// Edit the record identified by KEY (id, title, name or author).
    Edit {
        section: String,
        key: String,
        #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
        sets: Vec<(String, String)>,
    },
    /// Delete every record whose key matches KEY's record.
    Delete { section: String, key: String },
    /// Create or edit projects.
    #[command(subcommand)]
    Project(ProjectCommand),
    /// Write portfolio-data.json.
    Export {
        /// Output directory (defaults to the configured export dir).
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
    },
    /// Discard local changes and reload the bundled document.
    Reset {
        /// Confirm the reset.
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProjectCommand {
    Add(ProjectArgs),
    Edit {
        id: RecordId,
        #[command(flatten)]
        args: ProjectArgs,
    },
}

#[derive(Args, Debug, Default)]
pub struct ProjectArgs {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub category: Option<ProjectCategory>,
    #[arg(long)]
    pub image_url: Option<String>,
    #[arg(long)]
    pub year: Option<i32>,
    #[arg(long)]
    pub description: Option<String>,
    /// Comma-separated technologies.
    #[arg(long = "tech")]
    pub technologies: Option<String>,
    #[arg(long)]
    pub case_study_url: Option<String>,
    #[arg(long)]
    pub chart_title: Option<String>,
    #[arg(long, allow_negative_numbers = true, value_parser = parse_finite)]
    pub lat: Option<f64>,
    #[arg(long, allow_negative_numbers = true, value_parser = parse_finite)]
    pub lon: Option<f64>,
    /// Remove all existing chart points first.
    #[arg(long)]
    pub clear_points: bool,
    /// Remove the chart point at INDEX (applied highest index first).
    #[arg(long = "remove-point", value_name = "INDEX")]
    pub remove_points: Vec<usize>,
    /// Append a chart point.
    #[arg(long = "point", value_name = "NAME=VALUE[:UNIT]", value_parser = parse_point)]
    pub points: Vec<ChartPoint>,
}

fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(field, value)| (field.trim().to_string(), value.to_string()))
        .filter(|(field, _)| !field.is_empty())
        .ok_or_else(|| format!("expected FIELD=VALUE, got `{raw}`"))
}

fn parse_point(raw: &str) -> Result<ChartPoint, String> {
    let (name, rest) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE[:UNIT], got `{raw}`"))?;
    let (value, unit) = match rest.split_once(':') {
        Some((value, unit)) => (value, Some(unit)),
        None => (rest, None),
    };
    let value = parse_finite(value)?;
    let point = ChartPoint::new(name.trim(), value);
    Ok(match unit {
        Some(unit) => point.with_unit(unit),
        None => point,
    })
}

fn parse_finite(raw: &str) -> Result<f64, String> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| format!("expected a finite number, got `{raw}`"))
}

#[cfg(test)]
mod tests {
    use super::{parse_assignment, parse_finite, parse_point, Cli};
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn assignment_keeps_equals_in_value() {
        assert_eq!(
            parse_assignment("link=https://x.example/?a=b").unwrap(),
            ("link".to_string(), "https://x.example/?a=b".to_string())
        );
        assert!(parse_assignment("=x").is_err());
        assert!(parse_assignment("title").is_err());
    }

    #[test]
    fn point_parses_optional_unit() {
        let point = parse_point("Yr5=40:%").unwrap();
        assert_eq!(point.name, "Yr5");
        assert_eq!(point.value, 40.0);
        assert_eq!(point.unit.as_deref(), Some("%"));
        assert!(parse_point("Yr1=100").unwrap().unit.is_none());
        assert!(parse_point("Yr1=abc").is_err());
        assert!(parse_point("Yr1=NaN").is_err());
    }

    #[test]
    fn coordinates_must_be_finite() {
        assert_eq!(parse_finite("-95.3").unwrap(), -95.3);
        assert!(parse_finite("inf").is_err());
        assert!(parse_finite("NaN").is_err());
    }
}
