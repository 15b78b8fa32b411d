//! Multi-format export: one file per configured format, shared filename stub.
//!
//! PNG and the TIFF pixel buffer come from the bitmap backend; SVG is
//! rendered to a string, which also feeds the PDF conversion. Existing files
//! are overwritten without confirmation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use plotters::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::render::draw_audiogram;
use crate::config::AppConfig;
use crate::subjects::SubjectRecord;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportFormat {
    Png,
    Tiff,
    Pdf,
    Svg,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 4] = [Self::Png, Self::Tiff, Self::Pdf, Self::Svg];

    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Tiff => "tiff",
            Self::Pdf => "pdf",
            Self::Svg => "svg",
        }
    }
}

/// Base filename (no extension) for a subject's chart files.
///
/// Path-unsafe characters are replaced in both input modes so an id like
/// "II/1" cannot escape the output directory. Distinct ids can still collide
/// after sanitization; the session layer rejects those per batch.
pub fn filename_stub(id: &str) -> String {
    let safe: String = id
        .chars()
        .map(|c| match c {
            ' ' => '_',
            '/' | '\\' => '-',
            c => c,
        })
        .collect();
    format!("audiogram_{safe}_variantB")
}

/// Render `record` once per configured format and write
/// `<stub>.<ext>` into the output directory. Returns the written paths in
/// format order. Any render or filesystem failure aborts the remaining
/// formats; files already written stay in place.
pub fn export_all(record: &SubjectRecord, stub: &str, cfg: &AppConfig) -> Result<Vec<PathBuf>> {
    let size = (cfg.figure.width_px, cfg.figure.height_px);
    let mut paths = Vec::with_capacity(cfg.output.formats.len());

    for &format in &cfg.output.formats {
        let path = cfg.output.dir.join(format!("{stub}.{}", format.extension()));
        match format {
            ExportFormat::Png => export_png(record, &path, size)?,
            ExportFormat::Tiff => export_tiff(record, &path, size)?,
            ExportFormat::Svg => {
                let doc = render_svg(record, size)?;
                fs::write(&path, doc).with_context(|| format!("write {}", path.display()))?;
            }
            ExportFormat::Pdf => export_pdf(record, &path, size)?,
        }
        debug!(path = %path.display(), "wrote audiogram");
        paths.push(path);
    }
    Ok(paths)
}

/// Render one audiogram as an SVG document string.
pub fn render_svg(record: &SubjectRecord, size: (u32, u32)) -> Result<String> {
    let mut doc = String::new();
    {
        let root = SVGBackend::with_string(&mut doc, size).into_drawing_area();
        draw_audiogram(&root, record).map_err(|e| anyhow!("render svg chart: {e}"))?;
        root.present().map_err(|e| anyhow!("finalize svg chart: {e}"))?;
    }
    Ok(doc)
}

fn export_png(record: &SubjectRecord, path: &Path, size: (u32, u32)) -> Result<()> {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    draw_audiogram(&root, record).map_err(|e| anyhow!("render {}: {e}", path.display()))?;
    root.present()
        .map_err(|e| anyhow!("write {}: {e}", path.display()))?;
    Ok(())
}

fn export_tiff(record: &SubjectRecord, path: &Path, size: (u32, u32)) -> Result<()> {
    let (w, h) = size;
    let mut buf = vec![0u8; w as usize * h as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buf, size).into_drawing_area();
        draw_audiogram(&root, record).map_err(|e| anyhow!("render {}: {e}", path.display()))?;
        root.present()
            .map_err(|e| anyhow!("finalize {}: {e}", path.display()))?;
    }
    let img = image::RgbImage::from_raw(w, h, buf)
        .ok_or_else(|| anyhow!("pixel buffer does not match {w}x{h}"))?;
    img.save_with_format(path, image::ImageFormat::Tiff)
        .with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

fn export_pdf(record: &SubjectRecord, path: &Path, size: (u32, u32)) -> Result<()> {
    let doc = render_svg(record, size)?;
    let mut options = svg2pdf::usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    let tree = svg2pdf::usvg::Tree::from_str(&doc, &options)
        .map_err(|e| anyhow!("parse rendered svg: {e}"))?;
    let pdf = svg2pdf::to_pdf(
        &tree,
        svg2pdf::ConversionOptions::default(),
        svg2pdf::PageOptions::default(),
    )
    .map_err(|e| anyhow!("convert {} to pdf: {e}", path.display()))?;
    fs::write(path, pdf).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
