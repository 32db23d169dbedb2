//! Application orchestrator.
//! Loads/merges config, initializes logging, plans the archive, reports the
//! naming details at higher verbosity, runs it and prints the summary.

use anyhow::{Result, anyhow};
use std::path::Path;
use tracing::debug;

use archive_file::cli::Args;
use archive_file::logging::init_tracing;
use archive_file::output as out;
use archive_file::{
    ArchiveError, ArchivePlan, Config, create_template_config, default_config_path, execute,
    load_config, plan,
};

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    // Config actions run before logging init and exit early.
    if args.print_config {
        return print_config_location();
    }
    if args.init_config {
        return init_config();
    }

    let mut cfg = load_config()
        .inspect_err(|e| out::print_error(&format!("Failed to load config: {e:#}")))?
        .unwrap_or_default();
    args.apply_overrides(&mut cfg);

    // Hold the guard until the end of run() so file logs are flushed.
    let _guard = init_tracing(cfg.log_level, cfg.log_file.as_deref(), args.json, args.dry_run)
        .inspect_err(|e| out::print_error(&format!("Failed to initialize logging: {e}")))?;

    debug!(?args, ?cfg, "Starting archive_file");

    let request = args
        .to_request(&cfg)
        .ok_or_else(|| anyhow!("no input file given"))?;
    if request.verbosity > 1 {
        print_request(&args, &cfg);
    }

    let planned = plan(&request).inspect_err(|e| log_failure(e, "Archive planning failed"))?;

    let drnote = if request.dry_run { " (dry-run)" } else { "" };
    if planned.creates_destination {
        out::print_user(&format!(
            "created directory : {}{}",
            request.destination_dir.display(),
            drnote
        ));
    }
    if request.verbosity > 0 {
        print_plan(&planned);
    }

    execute(&planned).inspect_err(|e| log_failure(e, "Archive failed"))?;

    out::print_user(&format!(
        "moved {} to {}{}",
        request.input_path.display(),
        planned.archive_path.display(),
        drnote
    ));
    if request.compress {
        out::print_user(&format!(
            "compressed {} to {}{}",
            planned.archive_path.display(),
            planned.final_path.display(),
            drnote
        ));
    }
    Ok(())
}

fn print_config_location() -> Result<()> {
    match default_config_path() {
        Some(p) => {
            out::print_info(&format!("archive_file config path:\n  {}\n", p.display()));
            if p.exists() {
                out::print_info("A config file exists at that location.");
            } else {
                out::print_info("No config file exists there yet. Run with --init-config to create a template.");
            }
            Ok(())
        }
        None => Err(anyhow!("Could not determine a config path; set ARCHIVE_FILE_CONFIG")),
    }
}

fn init_config() -> Result<()> {
    let path = default_config_path()
        .ok_or_else(|| anyhow!("Could not determine a config path; set ARCHIVE_FILE_CONFIG"))?;
    create_template_config(&path)?;
    out::print_info(&format!("A template archive_file config was written to: {}", path.display()));
    Ok(())
}

fn print_request(args: &Args, cfg: &Config) {
    let show = |p: Option<&Path>| p.map(|p| p.display().to_string()).unwrap_or_default();
    out::print_detail("input_file", &show(args.input_file.as_deref()));
    out::print_detail("da", &cfg.archive_dir.display());
    out::print_detail("verbose", &args.verbose);
    out::print_detail("dry_run", &args.dry_run);
    out::print_detail("gzip", &cfg.gzip);
    out::print_detail("level", &cfg.compression_level);
    out::print_detail("log_level", &cfg.log_level);
}

fn print_plan(plan: &ArchivePlan) {
    let name = &plan.name;
    let basename = plan
        .request
        .input_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    out::print_user(" ");
    out::print_detail("file_dir", &name.file_dir.display());
    out::print_detail("basename", &basename);
    out::print_detail("file_name", &name.base.to_string_lossy());
    out::print_detail("file_ext", &name.ext.to_string_lossy());
    out::print_user(" ");
    if plan.request.verbosity > 1 {
        out::print_detail("tstr", &name.timestamp);
    }
    out::print_detail("archive_name", &name.file_name.to_string_lossy());
    out::print_detail("archive_file", &plan.archive_path.display());
    if plan.request.compress {
        out::print_detail("final_file", &plan.final_path.display());
    }
}

/// Record a failure with structured fields when it is one of ours.
/// The message itself reaches stderr once, via the error returned from main.
fn log_failure(e: &anyhow::Error, msg: &str) {
    match e.downcast_ref::<ArchiveError>() {
        Some(ae) => debug!(code = ae.code(), kind = ae.kind(), error = %ae, "{msg}"),
        None => debug!(error = %format!("{e:#}"), "{msg}"),
    }
}
