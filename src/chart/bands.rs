//! Clinical severity bands: background shading plus right-margin labels.

use plotters::chart::ChartContext;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf32;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::render::{BAND_LABEL_X, X_MAX, X_MIN};

/// A named dB HL range, used for shading and labeling only.
#[derive(Clone, Copy, Debug)]
pub struct SeverityBand {
    pub label: &'static str,
    pub low_db: f32,
    pub high_db: f32,
}

impl SeverityBand {
    /// Vertical center of the band, where its label sits.
    #[inline]
    pub fn midpoint_db(&self) -> f32 {
        (self.low_db + self.high_db) / 2.0
    }
}

/// Contiguous, least to most severe.
pub const SEVERITY_BANDS: [SeverityBand; 5] = [
    SeverityBand { label: "Normal", low_db: -10.0, high_db: 20.0 },
    SeverityBand { label: "Mild", low_db: 21.0, high_db: 40.0 },
    SeverityBand { label: "Moderate", low_db: 41.0, high_db: 70.0 },
    SeverityBand { label: "Severe", low_db: 71.0, high_db: 95.0 },
    SeverityBand { label: "Profound", low_db: 96.0, high_db: 120.0 },
];

/// Draw the band rectangles and their labels. Call before any data series so
/// the shading stays underneath.
pub fn draw_severity_bands<'a, DB: DrawingBackend + 'a>(
    chart: &mut ChartContext<'a, DB, Cartesian2d<RangedCoordf32, RangedCoordf32>>,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let label_style = TextStyle::from(("sans-serif", 16).into_font())
        .color(&RGBColor(64, 64, 64))
        .pos(Pos::new(HPos::Left, VPos::Center));

    for (i, band) in SEVERITY_BANDS.iter().enumerate() {
        // Alternate two light grays so adjacent bands stay distinguishable.
        let shade = if i % 2 == 0 {
            RGBColor(235, 235, 235)
        } else {
            RGBColor(247, 247, 247)
        };
        // Span the whole plot width; the labels sit over the light fill.
        chart.draw_series(std::iter::once(Rectangle::new(
            [(X_MIN, band.low_db), (X_MAX, band.high_db)],
            shade.filled(),
        )))?;
        chart.draw_series(std::iter::once(Text::new(
            band.label,
            (BAND_LABEL_X, band.midpoint_db()),
            label_style.clone(),
        )))?;
    }
    Ok(())
}
