//! The interactive render/export loop.
//!
//! Reader and writer are injected so the loop runs against scripted input in
//! tests. Each cycle is stateless: lookup or entry, render, export, report.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, BufRead, Write};

use anyhow::Result;
use tracing::{info, warn};

use crate::chart::export::{export_all, filename_stub};
use crate::cli::Mode;
use crate::config::AppConfig;
use crate::input::{normalize_ids, parse_thresholds};
use crate::subjects::{SubjectRecord, SubjectTable};

const QUIT: &str = "q";

/// Drive render/export cycles until the operator quits or input ends.
pub fn run<R: BufRead, W: Write>(
    mode: Mode,
    table: &SubjectTable,
    cfg: &AppConfig,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    match mode {
        Mode::Table => run_table(table, cfg, input, output)?,
        Mode::Entry => run_entry(cfg, input, output)?,
    }

    let resolved = fs::canonicalize(&cfg.output.dir).unwrap_or_else(|_| cfg.output.dir.clone());
    writeln!(output, "\nDone. Figures saved to: {}", resolved.display())?;
    Ok(())
}

fn run_table<R: BufRead, W: Write>(
    table: &SubjectTable,
    cfg: &AppConfig,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    writeln!(output, "Available IDs:")?;
    for id in table.ids() {
        writeln!(output, "  - {id}")?;
    }

    loop {
        write!(
            output,
            "\nEnter IDs to plot (e.g., II-1 or II-2, II-3). Type q to quit: "
        )?;
        output.flush()?;
        let Some(line) = read_line(input)? else { break };
        let raw = line.trim();
        if raw.eq_ignore_ascii_case(QUIT) {
            break;
        }

        let ids = normalize_ids(raw);
        if ids.is_empty() {
            writeln!(output, "No valid input. Try again.")?;
            continue;
        }

        // Stub already claimed in this batch by a different id: skip rather
        // than silently overwrite.
        let mut claimed: BTreeMap<String, String> = BTreeMap::new();
        for id in ids {
            let Some(record) = table.get(&id) else {
                warn!(%id, "unknown subject id");
                writeln!(output, "[WARN] Unknown ID: {id}. Skipped.")?;
                continue;
            };

            let stub = filename_stub(&id);
            if let Some(owner) = claimed.get(&stub) {
                if owner != &id {
                    writeln!(
                        output,
                        "[WARN] ID {id} collides with {owner} after sanitization. Skipped."
                    )?;
                    continue;
                }
            }
            claimed.insert(stub.clone(), id.clone());

            export_all(&record, &stub, cfg)?;
            info!(subject = %id, "exported audiogram");
            writeln!(output, "[OK] Saved: {stub} (all formats)")?;
        }
    }
    Ok(())
}

fn run_entry<R: BufRead, W: Write>(
    cfg: &AppConfig,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    writeln!(output, "Interactive Audiogram Tool (type q to quit)")?;
    writeln!(output, "Order is always: 250 500 1000 2000 4000 8000 (dB HL)")?;

    loop {
        write!(output, "\nEnter subject ID (e.g., II-1). Type q to quit: ")?;
        output.flush()?;
        let Some(line) = read_line(input)? else { break };
        let id = line.trim().to_string();
        if id.eq_ignore_ascii_case(QUIT) {
            break;
        }
        if id.is_empty() {
            writeln!(output, "Enter a subject ID.")?;
            continue;
        }

        let Some(right) = prompt_thresholds(input, output, "Right ear thresholds (6 numbers): ")?
        else {
            break;
        };
        let Some(left) = prompt_thresholds(input, output, "Left  ear thresholds (6 numbers): ")?
        else {
            break;
        };

        let record = SubjectRecord { id, right, left };
        let stub = filename_stub(&record.id);
        export_all(&record, &stub, cfg)?;
        info!(subject = %record.id, "exported audiogram");
        writeln!(output, "[OK] Saved: {stub} (all formats)")?;
    }
    Ok(())
}

/// Ask for one threshold line until it parses. Re-prompts indefinitely on a
/// wrong count or a non-numeric token; `None` means end of input.
fn prompt_thresholds<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> Result<Option<crate::subjects::ThresholdSeries>> {
    loop {
        write!(output, "{prompt}")?;
        output.flush()?;
        let Some(line) = read_line(input)? else {
            return Ok(None);
        };
        match parse_thresholds(&line) {
            Ok(series) => return Ok(Some(series)),
            Err(err) => {
                writeln!(output, "[WARN] {err}. Example: 40 45 50 55 55 40")?;
            }
        }
    }
}

/// One line from the operator, `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut buf = String::new();
    if input.read_line(&mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(buf))
}
