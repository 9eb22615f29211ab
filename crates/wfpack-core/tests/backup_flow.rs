use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};
use wfpack_core::prelude::*;
use wfpack_core::{CountingProgress, NoopProgress};
use wfpack_test_utils::{api_workflow, editor_workflow, list_files, InstallFixture, WORKFLOWS_DIR};

const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

fn tool(fx: &InstallFixture, mode: BackupMode) -> WorkflowBackup {
    WorkflowBackup::new(BackupConfig::new(fx.base()).with_mode(mode))
}

#[allow(clippy::cast_precision_loss)]
fn size_line(bytes: usize) -> String {
    format!("📦 Estimated Total Size: {:.2} GB", bytes as f64 / GIB)
}

#[test]
fn analysis_reports_unique_models_and_size() {
    let fx = InstallFixture::new();
    fx.add_model("checkpoints/sd15.safetensors", 4096);
    fx.add_workflow("portrait.json", &editor_workflow(&["checkpoints/sd15.safetensors"]));

    let report = tool(&fx, BackupMode::AnalysisOnly).process_backup(
        WORKFLOWS_DIR,
        "output/workflow_backups",
        &mut NoopProgress,
    );

    let expected = [
        format!("🔍 Analyzing 1 workflows in: {}", fx.workflows().display()),
        "✅ Found 1 unique models required.".to_string(),
        size_line(4096),
        "ℹ️ ANALYSIS MODE: No files were copied. Switch mode to EXECUTE_BACKUP to perform the copy."
            .to_string(),
    ]
    .join("\n");
    assert_eq!(report, expected);
}

#[test]
fn analysis_never_touches_destination() {
    let fx = InstallFixture::new();
    fx.add_model("checkpoints/sd15.safetensors", 16);
    fx.add_workflow("a.json", &editor_workflow(&["sd15.safetensors"]));
    let destination = fx.base().join("output/workflow_backups");

    tool(&fx, BackupMode::AnalysisOnly).process_backup(
        WORKFLOWS_DIR,
        "output/workflow_backups",
        &mut NoopProgress,
    );

    assert!(!destination.exists());
    assert!(!fx.base().join("output").exists());
}

#[test]
fn execute_copies_workflow_and_model() {
    let fx = InstallFixture::new();
    fx.add_model("checkpoints/sd15.safetensors", 2048);
    fx.add_workflow("portrait.json", &editor_workflow(&["checkpoints/sd15.safetensors"]));
    let destination = fx.base().join("output/workflow_backups");

    let mut progress = CountingProgress::default();
    let report = tool(&fx, BackupMode::ExecuteBackup).run(
        WORKFLOWS_DIR,
        "output/workflow_backups",
        &mut progress,
    );

    assert_eq!(
        list_files(&destination),
        vec![
            PathBuf::from("models/checkpoints/sd15.safetensors"),
            PathBuf::from("workflows_backup/portrait.json"),
        ]
    );
    let lines = report.lines();
    assert_eq!(lines[1], "✅ Found 1 unique models required.");
    assert_eq!(lines[3], "🎉 BACKUP COMPLETED: 1 new models copied.");
    assert_eq!(lines[4], format!("📁 Location: {}", destination.display()));
    assert_eq!(progress, CountingProgress { total: 1, done: 1 });
}

#[test]
fn rerun_skips_existing_models_but_still_counts_them() {
    let fx = InstallFixture::new();
    fx.add_model("checkpoints/sd15.safetensors", 128);
    fx.add_model("loras/ink.pt", 64);
    fx.add_workflow(
        "flow.json",
        &editor_workflow(&["checkpoints/sd15.safetensors", "ink.pt"]),
    );
    let backup = tool(&fx, BackupMode::ExecuteBackup);

    let first = backup.run(WORKFLOWS_DIR, "output/b", &mut NoopProgress);
    assert!(first.lines().contains(&"🎉 BACKUP COMPLETED: 2 new models copied.".to_string()));

    let second = backup.run(WORKFLOWS_DIR, "output/b", &mut NoopProgress);
    assert_eq!(second.lines()[1], "✅ Found 2 unique models required.");
    assert_eq!(second.lines()[2], size_line(192));
    assert_eq!(second.lines()[3], "🎉 BACKUP COMPLETED: 0 new models copied.");
}

#[test]
fn same_model_across_workflows_counts_once() {
    let fx = InstallFixture::new();
    fx.add_model("checkpoints/sd15.safetensors", 100);
    fx.add_workflow("editor.json", &editor_workflow(&["checkpoints/sd15.safetensors"]));
    fx.add_workflow("nested/api.json", &api_workflow(&["sd15.safetensors", "checkpoints\\sd15.safetensors"]));

    let report = tool(&fx, BackupMode::AnalysisOnly).run(WORKFLOWS_DIR, "out", &mut NoopProgress);

    assert_eq!(report.lines()[0], format!("🔍 Analyzing 2 workflows in: {}", fx.workflows().display()));
    assert_eq!(report.lines()[1], "✅ Found 1 unique models required.");
    assert_eq!(report.lines()[2], size_line(100));
}

#[test]
fn unresolved_references_are_silent() {
    let fx = InstallFixture::new();
    fx.add_workflow("flow.json", &editor_workflow(&["nowhere.safetensors", "euler"]));

    let report = tool(&fx, BackupMode::AnalysisOnly).run(WORKFLOWS_DIR, "out", &mut NoopProgress);

    assert_eq!(report.lines().len(), 4);
    assert_eq!(report.lines()[1], "✅ Found 0 unique models required.");
}

#[test]
fn rejected_source_yields_single_line_and_no_writes() {
    let fx = InstallFixture::new();
    let outside = fx.outside();
    fs::write(outside.join("flow.json"), editor_workflow(&["x.ckpt"]).to_string()).unwrap();
    let before = list_files(fx.temp_root());

    let raw = outside.to_str().unwrap();
    let report = tool(&fx, BackupMode::ExecuteBackup).process_backup(raw, "output/b", &mut NoopProgress);

    assert_eq!(report.lines().count(), 1);
    assert!(report.starts_with("⛔ SECURITY ERROR: Path not allowed."));
    assert!(report.ends_with(&format!("Rejected: {raw}")));
    assert_eq!(list_files(fx.temp_root()), before);
}

#[test]
fn rejected_destination_yields_single_line_and_no_writes() {
    let fx = InstallFixture::new();
    fx.add_model("checkpoints/sd15.safetensors", 8);
    fx.add_workflow("flow.json", &editor_workflow(&["sd15.safetensors"]));
    let before = list_files(fx.temp_root());

    let report = tool(&fx, BackupMode::ExecuteBackup).run(
        WORKFLOWS_DIR,
        "../outside/backup",
        &mut NoopProgress,
    );

    assert_eq!(report.lines().len(), 1);
    assert!(report.lines()[0].ends_with("Rejected: ../outside/backup"));
    assert_eq!(list_files(fx.temp_root()), before);
}

#[cfg(unix)]
#[test]
fn parent_hop_through_symlink_cannot_escape() {
    let fx = InstallFixture::new();
    fx.add_model("checkpoints/sd15.safetensors", 8);
    fx.add_workflow("flow.json", &editor_workflow(&["sd15.safetensors"]));
    let target = fx.outside().join("deep");
    fs::create_dir_all(&target).unwrap();
    std::os::unix::fs::symlink(&target, fx.base().join("link")).unwrap();
    let before = list_files(fx.temp_root());

    let report = tool(&fx, BackupMode::ExecuteBackup).run(
        WORKFLOWS_DIR,
        "link/../escape",
        &mut NoopProgress,
    );

    assert_eq!(report.lines().len(), 1);
    assert!(report.lines()[0].ends_with("Rejected: link/../escape"));
    assert!(!fx.outside().join("escape").exists());
    assert!(!fx.base().join("escape").exists());
    assert_eq!(list_files(fx.temp_root()), before);
}

#[test]
fn extra_paths_file_allows_external_destination() {
    let fx = InstallFixture::new();
    fx.add_model("vae/kl.safetensors", 8);
    fx.add_workflow("flow.json", &editor_workflow(&["vae/kl.safetensors"]));
    let drive = fx.outside();
    let config = allow_list_json(&drive);
    fs::write(fx.base().join("extra_paths.json"), config).unwrap();

    let destination = drive.join("backups");
    let report = tool(&fx, BackupMode::ExecuteBackup).run(
        WORKFLOWS_DIR,
        destination.to_str().unwrap(),
        &mut NoopProgress,
    );

    assert!(report.lines().contains(&"🎉 BACKUP COMPLETED: 1 new models copied.".to_string()));
    assert!(destination.join("models/vae/kl.safetensors").is_file());
}

#[test]
fn broken_document_is_reported_and_scan_continues() {
    let fx = InstallFixture::new();
    fx.add_model("checkpoints/good.ckpt", 10);
    fx.add_raw_workflow("a_broken.json", "{ \"nodes\": [");
    fx.add_workflow("b_good.json", &editor_workflow(&["good.ckpt"]));

    let report = tool(&fx, BackupMode::AnalysisOnly).run(WORKFLOWS_DIR, "out", &mut NoopProgress);
    let lines = report.lines();

    assert_eq!(lines.len(), 5);
    assert!(lines[1].starts_with("⚠️ Error reading a_broken.json: "));
    assert_eq!(lines[2], "✅ Found 1 unique models required.");
}

#[test]
fn missing_and_empty_sources_are_terminal() {
    let fx = InstallFixture::new();
    let backup = tool(&fx, BackupMode::ExecuteBackup);

    let missing = backup.process_backup("user/nope", "output/b", &mut NoopProgress);
    assert_eq!(missing, "❌ ERROR: The workflows folder does not exist: user/nope");

    let empty = backup.process_backup(WORKFLOWS_DIR, "output/b", &mut NoopProgress);
    assert_eq!(empty, format!("⚠️ No .json files found in {WORKFLOWS_DIR}"));
    assert!(!fx.base().join("output").exists());
}

#[test]
fn destination_failure_keeps_analysis_lines() {
    let fx = InstallFixture::new();
    fx.add_model("checkpoints/a.ckpt", 10);
    fx.add_workflow("flow.json", &editor_workflow(&["a.ckpt"]));
    fs::write(fx.base().join("blocker"), b"file").unwrap();

    let report = tool(&fx, BackupMode::ExecuteBackup).run(WORKFLOWS_DIR, "blocker/dest", &mut NoopProgress);
    let lines = report.lines();

    assert_eq!(lines.len(), 4);
    assert_eq!(lines[1], "✅ Found 1 unique models required.");
    assert_eq!(
        lines[3],
        format!("❌ Error creating destination folder: {}", fx.base().join("blocker/dest").display())
    );
}

#[test]
fn spanish_report() {
    let fx = InstallFixture::new();
    fx.add_model("checkpoints/a.ckpt", 10);
    fx.add_workflow("flow.json", &api_workflow(&["a.ckpt"]));

    let report = process_backup(
        WORKFLOWS_DIR,
        "salida",
        BackupMode::AnalysisOnly,
        Language::Spanish,
        fx.base(),
    );

    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(lines[1], "✅ Se encontraron 1 modelos únicos necesarios.");
    assert!(lines[2].starts_with("📦 Tamaño total estimado: "));
    assert!(lines[3].starts_with("ℹ️ MODO ANÁLISIS"));
}

#[test]
fn quoted_paths_are_accepted() {
    let fx = InstallFixture::new();
    fx.add_model("checkpoints/a.ckpt", 10);
    fx.add_workflow("flow.json", &editor_workflow(&["a.ckpt"]));

    let quoted = format!("  \"{}\" ", fx.workflows().display());
    let report = tool(&fx, BackupMode::AnalysisOnly).run(&quoted, "'out'", &mut NoopProgress);

    assert_eq!(report.lines()[1], "✅ Found 1 unique models required.");
}

fn allow_list_json(root: &Path) -> String {
    let escaped = root.display().to_string().replace('\\', "\\\\");
    format!("{{\"allowed_paths\": [\"{escaped}\"]}}")
}
