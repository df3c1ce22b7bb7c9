use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pezzottify_schema::bootstrap::{
    asset_source, install_shutdown_hook, open_connection, open_for_plan, sync_schema,
};
use pezzottify_schema::config::{AppConfig, CliConfig, FileConfig, DEFAULT_BUSY_TIMEOUT_MS};
use pezzottify_schema::evolution::{
    MigrationRunner, RunReport, RunState, SchemaIntrospector, StepOutcome,
};
use pezzottify_schema::schema_catalog::schema_catalog;

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

/// Brings a music server database up to the current schema.
#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to a TOML config file. Its values override the flags below.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Path to the SQLite database file. Created when missing.
    #[clap(long, value_parser = parse_path)]
    pub db_path: Option<PathBuf>,

    /// Directory holding the avatar images (`<name>.png`). Defaults to the
    /// images compiled into the binary.
    #[clap(long, value_parser = parse_path)]
    pub assets_dir: Option<PathBuf>,

    /// Path of the music folder registered in a new database.
    #[clap(long)]
    pub default_music_folder: Option<String>,

    /// How long a statement waits on a locked database, in milliseconds.
    #[clap(long, default_value_t = DEFAULT_BUSY_TIMEOUT_MS)]
    pub busy_timeout_ms: u64,

    /// Stop after the step with this id.
    #[clap(long)]
    pub up_to: Option<String>,

    /// Only evaluate guards and report what would run.
    #[clap(long)]
    pub dry_run: bool,

    /// Print the report as JSON.
    #[clap(long)]
    pub json: bool,

    /// Print the resulting schema snapshot as JSON.
    #[clap(long)]
    pub snapshot: bool,

    /// Exit with an error when some step failed. Has no effect with
    /// --dry-run, where guards on tables not created yet cannot be evaluated.
    #[clap(long)]
    pub strict: bool,
}

impl CliArgs {
    fn to_cli_config(&self) -> CliConfig {
        CliConfig {
            db_path: self.db_path.clone(),
            assets_dir: self.assets_dir.clone(),
            default_music_folder: self.default_music_folder.clone(),
            busy_timeout_ms: self.busy_timeout_ms,
            strict: self.strict,
        }
    }
}

fn print_report(report: &RunReport) {
    for step in &report.steps {
        match &step.outcome {
            StepOutcome::Applied => println!("  applied  {}", step.id),
            StepOutcome::Pending => println!("  pending  {}", step.id),
            StepOutcome::Failed(reason) => println!("  FAILED   {}: {}", step.id, reason),
            StepOutcome::Skipped => {}
        }
    }
    println!(
        "{:?}: {} applied, {} pending, {} up to date, {} failed",
        report.state,
        report.applied(),
        report.pending(),
        report.skipped(),
        report.failed()
    );
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading config from {:?}", path);
            Some(FileConfig::load(path)?)
        }
        None => None,
    };
    let config = AppConfig::resolve(&cli_args.to_cli_config(), file_config)?;

    let mut catalog = schema_catalog(&config.catalog).context("Invalid schema catalog")?;
    if let Some(id) = &cli_args.up_to {
        catalog = catalog.up_to(id)?;
    }

    let report = if cli_args.dry_run {
        info!("Opening SQLite database at {:?} (dry run)...", config.db_path);
        let conn = open_for_plan(&config.db_path, config.busy_timeout)?;
        let report = MigrationRunner::new(asset_source(config.assets_dir.as_deref()))
            .plan(&catalog, &conn);
        emit(&cli_args, &report, &conn)?;
        report
    } else {
        info!("Opening SQLite database at {:?}...", config.db_path);
        let conn = Arc::new(Mutex::new(open_connection(
            &config.db_path,
            config.busy_timeout,
        )?));
        install_shutdown_hook(conn.clone())?;

        let conn = conn
            .lock()
            .map_err(|_| anyhow::anyhow!("Database connection lock poisoned"))?;
        let report = sync_schema(&conn, &catalog, config.assets_dir.as_deref());
        emit(&cli_args, &report, &conn)?;
        report
    };

    check_strict(config.strict && !cli_args.dry_run, &report)
}

fn check_strict(strict: bool, report: &RunReport) -> Result<()> {
    if strict && report.state == RunState::PartiallyFailed {
        bail!("{} schema steps failed", report.failed());
    }
    Ok(())
}

fn emit(cli_args: &CliArgs, report: &RunReport, conn: &rusqlite::Connection) -> Result<()> {
    if cli_args.json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print_report(report);
    }
    if cli_args.snapshot {
        let snapshot = SchemaIntrospector::new(conn).snapshot()?;
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pezzottify_schema::evolution::StepReport;

    fn report(outcome: StepOutcome, state: RunState) -> RunReport {
        RunReport {
            state,
            steps: vec![StepReport {
                id: "table:user".to_string(),
                outcome,
            }],
        }
    }

    #[test]
    fn test_strict_fails_partially_failed_runs() {
        let failed = report(StepOutcome::Failed("boom".to_string()), RunState::PartiallyFailed);
        assert!(check_strict(true, &failed).is_err());
        assert!(check_strict(false, &failed).is_ok());
        let done = report(StepOutcome::Applied, RunState::Completed);
        assert!(check_strict(true, &done).is_ok());
    }

    #[test]
    fn test_dry_run_args_parse() {
        let args = CliArgs::parse_from(["schema-sync", "--db-path", "x.db", "--dry-run", "--strict"]);
        assert!(args.dry_run);
        assert!(args.strict);
        assert!(args.assets_dir.is_none());
    }
}
