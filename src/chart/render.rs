//! Single-subject audiogram rendering, generic over the plotters backend so
//! every export format shares one draw path.

use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use plotters::style::FontStyle;

use super::bands::draw_severity_bands;
use crate::subjects::{SubjectRecord, ThresholdSeries, FREQUENCIES_HZ};

/// Vertical axis is inverted per audiogram convention: quiet thresholds at
/// the top of the page, loud (worse) at the bottom.
pub const DB_HL_TOP: f32 = -10.0;
pub const DB_HL_BOTTOM: f32 = 120.0;

// Horizontal layout in frequency-slot units. Data sits at slots 0..=5; the
// axis extends right so the severity labels fit inside the clip region.
pub(crate) const X_MIN: f32 = -0.4;
pub(crate) const X_MAX: f32 = 7.4;
pub(crate) const BAND_LABEL_X: f32 = 5.92;

const RIGHT_COLOR: RGBColor = RGBColor(198, 48, 50);
const LEFT_COLOR: RGBColor = RGBColor(38, 84, 168);

/// Draw one complete audiogram onto `root`: shaded severity bands, mesh,
/// right ear as solid line with circle markers, left ear as dashed line with
/// cross markers, legend, and the subject id as a bold title.
pub fn draw_audiogram<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    record: &SubjectRecord,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(root)
        .caption(
            record.id.as_str(),
            ("sans-serif", 28).into_font().style(FontStyle::Bold),
        )
        .margin(16)
        .x_label_area_size(48)
        .y_label_area_size(58)
        .build_cartesian_2d(X_MIN..X_MAX, DB_HL_BOTTOM..DB_HL_TOP)?;

    draw_severity_bands(&mut chart)?;

    chart
        .configure_mesh()
        .x_labels(9)
        .y_labels(14)
        .x_label_formatter(&frequency_slot_label)
        .y_label_formatter(&|db| format!("{db:.0}"))
        .x_desc("Frequency (Hz)")
        .y_desc("Hearing Level (dB HL)")
        .axis_desc_style(("sans-serif", 20))
        .label_style(("sans-serif", 16))
        .draw()?;

    let right_pts = slot_points(&record.right);
    let left_pts = slot_points(&record.left);

    chart
        .draw_series(LineSeries::new(
            right_pts.iter().copied(),
            RIGHT_COLOR.stroke_width(3),
        ))?
        .label("Right (O)")
        .legend(|(x, y)| {
            PathElement::new(vec![(x, y), (x + 20, y)], RIGHT_COLOR.stroke_width(3))
        });
    chart.draw_series(
        right_pts
            .iter()
            .map(|&pt| Circle::new(pt, 8, RIGHT_COLOR.stroke_width(3))),
    )?;

    chart
        .draw_series(DashedLineSeries::new(
            left_pts.iter().copied(),
            8,
            5,
            LEFT_COLOR.stroke_width(2),
        ))?
        .label("Left (X)")
        .legend(|(x, y)| {
            PathElement::new(vec![(x, y), (x + 20, y)], LEFT_COLOR.stroke_width(2))
        });
    chart.draw_series(
        left_pts
            .iter()
            .map(|&pt| Cross::new(pt, 9, LEFT_COLOR.stroke_width(3))),
    )?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font(("sans-serif", 16))
        .draw()?;

    Ok(())
}

/// Map one ear's thresholds onto the slot axis.
fn slot_points(series: &ThresholdSeries) -> Vec<(f32, f32)> {
    series
        .values()
        .iter()
        .enumerate()
        .map(|(i, &db)| (i as f32, db))
        .collect()
}

/// Tick label for the slot axis: the frequency in Hz at integer slots 0..=5,
/// blank elsewhere (the mesh also places ticks in the label margin).
fn frequency_slot_label(x: &f32) -> String {
    let slot = x.round();
    if (x - slot).abs() > 1e-3 {
        return String::new();
    }
    let slot = slot as i64;
    if (0..FREQUENCIES_HZ.len() as i64).contains(&slot) {
        FREQUENCIES_HZ[slot as usize].to_string()
    } else {
        String::new()
    }
}
