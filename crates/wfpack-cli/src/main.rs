use anyhow::Context;
use clap::{value_parser, Arg, Command};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use wfpack_core::{BackupConfig, BackupMode, Language, LogProgress, WorkflowBackup};

fn cli() -> Command {
    Command::new("wfpack")
        .version(wfpack_core::VERSION)
        .about("Back up workflows together with every model file they reference")
        .arg(
            Arg::new("workflows")
                .value_name("WORKFLOWS_PATH")
                .required(true)
                .help("Folder with workflow documents, relative to the base dir or absolute"),
        )
        .arg(
            Arg::new("destination")
                .value_name("BACKUP_DESTINATION")
                .required(true)
                .help("Backup folder, relative to the base dir or absolute"),
        )
        .arg(
            Arg::new("mode")
                .long("mode")
                .default_value("ANALYSIS_ONLY")
                .help("ANALYSIS_ONLY or EXECUTE_BACKUP"),
        )
        .arg(
            Arg::new("language")
                .long("language")
                .default_value("English")
                .help("Report language: English or Spanish"),
        )
        .arg(
            Arg::new("base-dir")
                .long("base-dir")
                .value_parser(value_parser!(PathBuf))
                .help("Install directory (defaults to the current directory)"),
        )
        .arg(
            Arg::new("models-dir")
                .long("models-dir")
                .value_parser(value_parser!(PathBuf))
                .help("Models directory (defaults to <base-dir>/models)"),
        )
        .arg(
            Arg::new("extra-paths")
                .long("extra-paths")
                .value_parser(value_parser!(PathBuf))
                .help("Allow-list file (defaults to <base-dir>/extra_paths.json)"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .default_value("info")
                .help("Log filter when RUST_LOG is unset"),
        )
}

fn init_tracing(level: &str) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level).with_context(|| format!("invalid log level '{level}'"))?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();

    let level = matches
        .get_one::<String>("log-level")
        .map_or("info", String::as_str);
    init_tracing(level)?;

    let mode: BackupMode = matches
        .get_one::<String>("mode")
        .map_or(Ok(BackupMode::default()), |s| s.parse())?;
    let language: Language = matches
        .get_one::<String>("language")
        .map_or(Ok(Language::default()), |s| s.parse())?;

    let cwd = std::env::current_dir().context("cannot determine current directory")?;
    let base_dir = match matches.get_one::<PathBuf>("base-dir") {
        Some(dir) => cwd.join(dir),
        None => cwd,
    };

    let mut config = BackupConfig::new(&base_dir)
        .with_mode(mode)
        .with_language(language);
    if let Some(models) = matches.get_one::<PathBuf>("models-dir") {
        config = config.with_models_dir(base_dir.join(models));
    }
    if let Some(file) = matches.get_one::<PathBuf>("extra-paths") {
        config = config.with_extra_paths_file(Some(base_dir.join(file)));
    }

    tracing::debug!("Base directory: {}", base_dir.display());

    let workflows = matches
        .get_one::<String>("workflows")
        .context("missing WORKFLOWS_PATH")?;
    let destination = matches
        .get_one::<String>("destination")
        .context("missing BACKUP_DESTINATION")?;

    let report = WorkflowBackup::new(config).process_backup(
        workflows,
        destination,
        &mut LogProgress::new(),
    );
    println!("{report}");
    Ok(())
}
