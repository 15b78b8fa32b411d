use std::io::Cursor;

use audiogram::cli::Mode;
use audiogram::config::AppConfig;
use audiogram::session;
use audiogram::subjects::SubjectTable;

fn small_config(dir: &std::path::Path) -> AppConfig {
    let mut cfg = AppConfig::default();
    cfg.output.dir = dir.to_path_buf();
    cfg.figure.width_px = 640;
    cfg.figure.height_px = 520;
    cfg
}

fn run_session(mode: Mode, cfg: &AppConfig, script: &str) -> String {
    let table = SubjectTable::builtin();
    let mut input = Cursor::new(script.to_string());
    let mut output = Vec::new();
    session::run(mode, &table, cfg, &mut input, &mut output).expect("session runs");
    String::from_utf8(output).expect("utf8 transcript")
}

#[test]
fn table_lookup_exports_and_reports() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cfg = small_config(dir.path());

    let transcript = run_session(Mode::Table, &cfg, "ii-1\nq\n");
    assert!(transcript.contains("Available IDs:"));
    assert!(transcript.contains("[OK] Saved: audiogram_II-1_variantB (all formats)"));
    assert!(transcript.contains("Done. Figures saved to:"));

    for ext in ["png", "tiff", "pdf", "svg"] {
        let path = dir.path().join(format!("audiogram_II-1_variantB.{ext}"));
        assert!(path.exists(), "missing {}", path.display());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }
}

#[test]
fn unknown_id_warns_and_writes_nothing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cfg = small_config(dir.path());

    let transcript = run_session(Mode::Table, &cfg, "II-9\nq\n");
    assert!(transcript.contains("[WARN] Unknown ID: II-9. Skipped."));
    assert!(transcript.contains("Done. Figures saved to:"));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn batch_skips_unknown_and_keeps_going() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cfg = small_config(dir.path());

    let transcript = run_session(Mode::Table, &cfg, "II-1 II-9, ii-2\nq\n");
    assert!(transcript.contains("[OK] Saved: audiogram_II-1_variantB (all formats)"));
    assert!(transcript.contains("[WARN] Unknown ID: II-9. Skipped."));
    assert!(transcript.contains("[OK] Saved: audiogram_II-2_variantB (all formats)"));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 8);
}

#[test]
fn blank_line_reports_and_continues() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cfg = small_config(dir.path());

    let transcript = run_session(Mode::Table, &cfg, "\nq\n");
    assert!(transcript.contains("No valid input. Try again."));
    assert!(transcript.contains("Done. Figures saved to:"));
}

#[test]
fn end_of_input_acts_as_quit() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cfg = small_config(dir.path());

    let transcript = run_session(Mode::Table, &cfg, "");
    assert!(transcript.contains("Done. Figures saved to:"));
}

#[test]
fn entry_mode_reprompts_until_six_numbers() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cfg = small_config(dir.path());

    let script = "S-1\n40 45 50\na b c d e f\n40,45,50,55,55,40\n40 50 50 55 60 45\nq\n";
    let transcript = run_session(Mode::Entry, &cfg, script);

    assert!(transcript.contains("expected exactly 6 values, got 3"));
    assert!(transcript.contains("not a number: \"a\""));
    assert!(transcript.contains("[OK] Saved: audiogram_S-1_variantB (all formats)"));

    for ext in ["png", "tiff", "pdf", "svg"] {
        let path = dir.path().join(format!("audiogram_S-1_variantB.{ext}"));
        assert!(path.exists(), "missing {}", path.display());
    }
}

#[test]
fn entry_mode_sanitizes_stub_but_keeps_title_id() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cfg = small_config(dir.path());

    let script = "case 4/b\n40 45 50 55 55 40\n40 50 50 55 60 45\nq\n";
    let transcript = run_session(Mode::Entry, &cfg, script);
    assert!(transcript.contains("[OK] Saved: audiogram_case_4-b_variantB (all formats)"));
    assert!(dir
        .path()
        .join("audiogram_case_4-b_variantB.png")
        .exists());
}

#[test]
fn entry_mode_rejects_blank_id() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cfg = small_config(dir.path());

    let transcript = run_session(Mode::Entry, &cfg, "\nq\n");
    assert!(transcript.contains("Enter a subject ID."));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
