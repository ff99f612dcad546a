//! Implementation of the 'encode' subcommand.
//!
//! Resolves the layered configuration, prepares the run context, installs the
//! run logger and hands the discovered files to the core batch coordinator.
//! Fatal run errors after the logger is installed are logged and reported as
//! [`RunStatus::Aborted`] rather than returned.

use crate::cli::EncodeArgs;
use crate::logging::{effective_level, log_run_header};

use bitshrink_core::config::utils::process_env;
use bitshrink_core::{
    ConfigFile, CoreConfig, CoreConfigBuilder, RunContext, find_processable_files,
    process_videos, setup_file_logging,
};

use anyhow::{Context, Result};
use log::{error, info};

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Every file was processed; `failed` of them ended in failure.
    Completed { failed: usize },
    /// A fatal error stopped the run before or during the batch.
    Aborted,
}

impl RunStatus {
    /// Process exit code. Without `strict` this is always 0.
    pub fn exit_code(self, strict: bool) -> i32 {
        match self {
            RunStatus::Completed { failed: 0 } => 0,
            _ if strict => 1,
            _ => 0,
        }
    }
}

/// Builds the run configuration: defaults, then the TOML file, then
/// BITSHRINK_* environment variables (through `lookup`), then flags.
pub fn resolve_config<F>(args: &EncodeArgs, lookup: F) -> Result<CoreConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = CoreConfig::default();

    if let Some(path) = &args.config {
        let file = ConfigFile::load(path)?;
        config.apply_file(&file)?;
    }
    config.apply_env(lookup);

    let mut builder = CoreConfigBuilder::from_config(config);
    if let Some(dir) = &args.input_dir {
        builder = builder.input_dir(dir.clone());
    }
    if let Some(dir) = &args.output_dir {
        builder = builder.output_dir(dir.clone());
    }
    if let Some(dir) = &args.log_dir {
        builder = builder.log_dir(dir.clone());
    }
    if let Some(dir) = &args.temp_dir {
        builder = builder.temp_dir(dir.clone());
    }
    if let Some(jobs) = args.jobs {
        builder = builder.max_concurrent_encodes(usize::from(jobs));
    }

    let mut config = builder.build();
    config.log_level = effective_level(config.log_level, args.verbose);

    config.validate()?;
    Ok(config)
}

/// Runs the encode command.
///
/// # Returns
///
/// * `Ok(RunStatus)` - Once the logger is installed, every outcome including
///   fatal errors is logged and reported through the status
/// * `Err(_)` - Configuration or start-up failures before logging exists
pub fn run_encode(args: EncodeArgs) -> Result<RunStatus> {
    let config = resolve_config(&args, process_env)?;
    let level = config.log_level;

    let mut ctx = RunContext::new(config)?;
    ctx.prepare().context("preparing output, log and temporary directories")?;

    let handle = setup_file_logging(ctx.log_file(), level, !args.quiet)?;
    ctx.set_log_handle(handle);

    log_run_header(&ctx);
    Ok(run_batch(&ctx))
}

fn run_batch(ctx: &RunContext) -> RunStatus {
    let files = match find_processable_files(ctx.input_root()) {
        Ok(files) => files,
        Err(e) => {
            error!("Aborting run: {}", e);
            return RunStatus::Aborted;
        }
    };

    info!("Found {} file(s) to process.", files.len());
    if files.is_empty() {
        info!("No video files found under {}", ctx.input_root().display());
        return RunStatus::Completed { failed: 0 };
    }

    if let Err(e) = ctx.check_dependencies() {
        error!("Aborting run: {}", e);
        return RunStatus::Aborted;
    }

    match process_videos(ctx, &files) {
        Ok(report) => {
            report.log_summary();
            RunStatus::Completed {
                failed: report.failed(),
            }
        }
        Err(e) => {
            error!("Aborting run: {}", e);
            RunStatus::Aborted
        }
    }
}
