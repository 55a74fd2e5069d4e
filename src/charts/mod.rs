//! PNG charts for result sets and DP tables (plotters, bitmap backend).
//!
//! Text needs a TrueType font registered at runtime, see [`init_fonts`].
//! Without one the charts are still written, minus captions, axis labels
//! and legends.

pub mod stats;

use self::stats::{linear_fit, oracle_model_label, theoretical_curves, SpeedupSummary};
use crate::comparator::{Coord, DpTable, Variant};
use crate::error::{LcsError, LcsResult};
use crate::harness::TrialRecord;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontStyle;
use std::fmt::Display;
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, info, warn};

pub const RUNTIME_CHART: &str = "runtime_comparison.png";
pub const SPEEDUP_CHART: &str = "speedup.png";
pub const THEORETICAL_CHART: &str = "theoretical_vs_experimental.png";
pub const DP_TABLE_CHART: &str = "dp_table_example.png";

const CHART_SIZE: (u32, u32) = (1000, 600);
const FONT: &str = "sans-serif";

const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

static FONT_READY: OnceLock<bool> = OnceLock::new();

/// Registers the chart font, trying `explicit` first and then common system
/// locations. Only the first call does any work.
pub fn init_fonts(explicit: Option<&Path>) -> bool {
    *FONT_READY.get_or_init(|| {
        let candidates = explicit
            .map(Path::to_path_buf)
            .into_iter()
            .chain(FONT_CANDIDATES.iter().map(PathBuf::from));

        for path in candidates {
            let Ok(bytes) = fs::read(&path) else {
                continue;
            };
            // register_font wants 'static data; this happens once per process.
            let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
            match plotters::style::register_font(FONT, FontStyle::Normal, bytes) {
                Ok(()) => {
                    debug!("Chart font: {}", path.display());
                    return true;
                }
                Err(_) => warn!("'{}' is not a usable font", path.display()),
            }
        }
        warn!("No TrueType font found, charts will be drawn without text");
        false
    })
}

fn text_enabled() -> bool {
    init_fonts(None)
}

fn render_err<E: Display>(e: E) -> LcsError {
    LcsError::Render(e.to_string())
}

fn ensure_parent(out: &Path) -> LcsResult<()> {
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

fn padded(min: f64, max: f64) -> Range<f64> {
    if !(min.is_finite() && max.is_finite()) {
        return 0.0..1.0;
    }
    if max > min {
        let pad = (max - min) * 0.05;
        (min - pad)..(max + pad)
    } else {
        (min - 1.0)..(max + 1.0)
    }
}

fn up_to(max: f64) -> Range<f64> {
    if max.is_finite() && max > 0.0 {
        0.0..max * 1.1
    } else {
        0.0..1.0
    }
}

fn max_of(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(f64::NEG_INFINITY, f64::max)
}

fn min_of(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(f64::INFINITY, f64::min)
}

type Chart<'a, 'b> = ChartContext<'a, BitMapBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

struct Axes<'t> {
    title: &'t str,
    x_desc: &'t str,
    y_desc: &'t str,
    x: Range<f64>,
    y: Range<f64>,
}

fn build_chart<'a, 'b>(
    root: &'a DrawingArea<BitMapBackend<'b>, Shift>,
    axes: &Axes,
    text: bool,
) -> LcsResult<Chart<'a, 'b>> {
    let mut builder = ChartBuilder::on(root);
    builder.margin(20);
    if text {
        builder
            .caption(axes.title, (FONT, 24))
            .x_label_area_size(50)
            .y_label_area_size(80);
    }
    let mut chart = builder
        .build_cartesian_2d(axes.x.clone(), axes.y.clone())
        .map_err(render_err)?;

    if text {
        chart
            .configure_mesh()
            .x_desc(axes.x_desc)
            .y_desc(axes.y_desc)
            .draw()
            .map_err(render_err)?;
    } else {
        let (x, y) = (axes.x.clone(), axes.y.clone());
        chart
            .draw_series(std::iter::once(PathElement::new(
                vec![(x.start, y.end), (x.start, y.start), (x.end, y.start)],
                BLACK,
            )))
            .map_err(render_err)?;
    }
    Ok(chart)
}

fn draw_legend<'a, DB: DrawingBackend + 'a>(
    chart: &mut ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    text: bool,
) -> LcsResult<()>
where
    DB::ErrorType: 'static,
{
    if text {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(render_err)?;
    }
    Ok(())
}

fn draw_trend(chart: &mut Chart, points: &[(f64, f64)], x: &Range<f64>, color: RGBColor) -> LcsResult<()> {
    if let Some(fit) = linear_fit(points) {
        let ends = [x.start, x.end].map(|px| (px, fit.at(px).max(0.0)));
        chart
            .draw_series(LineSeries::new(ends, color.mix(0.6)))
            .map_err(render_err)?;
    }
    Ok(())
}

fn timing_points(records: &[&TrialRecord], pick: fn(&TrialRecord) -> Option<f64>) -> Vec<(f64, f64)> {
    records
        .iter()
        .filter_map(|r| Some((r.product_length as f64, pick(r)?)))
        .collect()
}

/// Runtime against length product, both algorithms with fitted lines.
/// Falls back to DP alone when no row has both timings.
pub fn runtime_comparison(records: &[TrialRecord], out: &Path) -> LcsResult<()> {
    let complete: Vec<&TrialRecord> = records.iter().filter(|r| r.is_complete()).collect();
    let (dp_rows, bf_points) = if complete.is_empty() {
        warn!("No rows with both timings, runtime chart shows DP only");
        (records.iter().collect::<Vec<_>>(), Vec::new())
    } else {
        let bf = timing_points(&complete, |r| r.brute_force_time);
        (complete, bf)
    };
    let dp_points = timing_points(&dp_rows, |r| r.dp_time);
    if dp_points.is_empty() && bf_points.is_empty() {
        return Err(LcsError::Validation("no timings to plot".to_string()));
    }

    let all = || dp_points.iter().chain(bf_points.iter());
    let axes = Axes {
        title: "Runtime Comparison: Brute Force vs Dynamic Programming",
        x_desc: "Product of lengths (len1 x len2)",
        y_desc: "Runtime (seconds)",
        x: padded(min_of(all().map(|p| p.0)), max_of(all().map(|p| p.0))),
        y: up_to(max_of(all().map(|p| p.1))),
    };

    let text = text_enabled();
    ensure_parent(out)?;
    let root = BitMapBackend::new(out, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;
    let mut chart = build_chart(&root, &axes, text)?;

    if !bf_points.is_empty() {
        let anno = chart
            .draw_series(bf_points.iter().map(|&p| Circle::new(p, 4, BLUE.filled())))
            .map_err(render_err)?;
        if text {
            anno.label("Brute Force")
                .legend(|(x, y)| Circle::new((x + 10, y), 4, BLUE.filled()));
        }
        draw_trend(&mut chart, &bf_points, &axes.x, BLUE)?;
    }

    let anno = chart
        .draw_series(dp_points.iter().map(|&p| Cross::new(p, 4, RED.stroke_width(2))))
        .map_err(render_err)?;
    if text {
        anno.label("Dynamic Programming")
            .legend(|(x, y)| Cross::new((x + 10, y), 4, RED.stroke_width(2)));
    }
    draw_trend(&mut chart, &dp_points, &axes.x, RED)?;

    draw_legend(&mut chart, text)?;
    root.present().map_err(render_err)?;
    info!("Wrote {}", out.display());
    Ok(())
}

/// One bar per complete row, ordered by product, with mean and median
/// lines. Returns `false` (nothing written) when there is no finite speedup.
pub fn speedup(records: &[TrialRecord], out: &Path) -> LcsResult<bool> {
    let mut rows: Vec<&TrialRecord> = records
        .iter()
        .filter(|r| r.speedup.is_some_and(f64::is_finite))
        .collect();
    let Some(summary) = SpeedupSummary::from_records(records) else {
        warn!("No finite speedups, skipping {}", out.display());
        return Ok(false);
    };
    rows.sort_by_key(|r| r.product_length);

    let bars: Vec<f64> = rows.iter().filter_map(|r| r.speedup).collect();
    let axes = Axes {
        title: "Speedup of Dynamic Programming over Brute Force",
        x_desc: "Trials, ordered by product of lengths",
        y_desc: "Speedup (brute force time / DP time)",
        x: -0.5..(bars.len() as f64 - 0.5),
        y: up_to(summary.max),
    };

    let text = text_enabled();
    ensure_parent(out)?;
    let root = BitMapBackend::new(out, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;
    let mut chart = build_chart(&root, &axes, text)?;

    chart
        .draw_series(bars.iter().enumerate().map(|(i, &s)| {
            let x = i as f64;
            Rectangle::new([(x - 0.4, 0.0), (x + 0.4, s)], BLUE.mix(0.7).filled())
        }))
        .map_err(render_err)?;

    for (value, color, label) in [
        (summary.mean, RED, "mean"),
        (summary.median, GREEN, "median"),
    ] {
        let anno = chart
            .draw_series(std::iter::once(PathElement::new(
                vec![(axes.x.start, value), (axes.x.end, value)],
                color.stroke_width(2),
            )))
            .map_err(render_err)?;
        if text {
            anno.label(format!("{} {:.1}x", label, value))
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        }
    }

    if text {
        let note = format!(
            "n={}  min={:.1}x  max={:.1}x",
            summary.count, summary.min, summary.max
        );
        chart
            .draw_series(std::iter::once(Text::new(
                note,
                (axes.x.start + 0.2, axes.y.end * 0.97),
                (FONT, 16),
            )))
            .map_err(render_err)?;
    }

    draw_legend(&mut chart, text)?;
    root.present().map_err(render_err)?;
    info!("Wrote {}", out.display());
    Ok(true)
}

/// Measured times against the operation-count models, each model scaled to
/// the mean of its measurements. Returns `false` when no row is complete.
pub fn theoretical_vs_experimental(
    records: &[TrialRecord],
    variant: Variant,
    out: &Path,
) -> LcsResult<bool> {
    let Some(curves) = theoretical_curves(variant, records) else {
        warn!("No rows with both timings, skipping {}", out.display());
        return Ok(false);
    };

    let all = || curves.oracle.iter().chain(curves.dp.iter());
    let axes = Axes {
        title: "Theoretical vs Experimental Complexity",
        x_desc: "Product of lengths",
        y_desc: "Runtime (seconds)",
        x: padded(min_of(all().map(|p| p.0)), max_of(all().map(|p| p.0))),
        y: up_to(max_of(all().flat_map(|p| [p.1, p.2]))),
    };

    let text = text_enabled();
    ensure_parent(out)?;
    let root = BitMapBackend::new(out, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;
    let mut chart = build_chart(&root, &axes, text)?;

    let bf_model = format!("BF theoretical {}", oracle_model_label(variant));
    let series: [(&[(f64, f64, f64)], RGBColor, RGBColor, String, &str); 2] = [
        (&curves.oracle, BLUE, CYAN, bf_model, "BF experimental"),
        (&curves.dp, RED, MAGENTA, "DP theoretical O(m*n)".to_string(), "DP experimental"),
    ];

    for (points, measured_color, model_color, model_label, measured_label) in series {
        let anno = chart
            .draw_series(
                points
                    .iter()
                    .map(|&(x, y, _)| Circle::new((x, y), 4, measured_color.filled())),
            )
            .map_err(render_err)?;
        if text {
            anno.label(measured_label)
                .legend(move |(x, y)| Circle::new((x + 10, y), 4, measured_color.filled()));
        }

        let anno = chart
            .draw_series(
                points
                    .iter()
                    .map(|&(x, _, model)| Cross::new((x, model), 5, model_color.stroke_width(2))),
            )
            .map_err(render_err)?;
        if text {
            anno.label(model_label)
                .legend(move |(x, y)| Cross::new((x + 10, y), 5, model_color.stroke_width(2)));
        }
    }

    draw_legend(&mut chart, text)?;
    root.present().map_err(render_err)?;
    info!("Wrote {}", out.display());
    Ok(true)
}

fn heat_color(value: u32, max: u32) -> RGBColor {
    let t = if max == 0 {
        0.0
    } else {
        value as f64 / max as f64
    };
    let lerp = |from: u8, to: u8| (from as f64 + (to as f64 - from as f64) * t).round() as u8;
    RGBColor(lerp(255, 34), lerp(255, 94), lerp(217, 168))
}

/// Heatmap of one subsequence table. Row 0 / column 0 of the image hold the
/// input symbols; `path` cells are outlined.
pub fn dp_table_heatmap(
    table: &DpTable,
    str1: &[char],
    str2: &[char],
    path: &[Coord],
    out: &Path,
) -> LcsResult<()> {
    if table.rows() != str1.len() + 1 || table.cols() != str2.len() + 1 {
        return Err(LcsError::Validation(format!(
            "table is {}x{} but inputs are {} and {} symbols",
            table.rows(),
            table.cols(),
            str1.len(),
            str2.len()
        )));
    }

    let grid_cols = table.cols() + 1;
    let grid_rows = table.rows() + 1;
    let cell_px = (1600 / grid_cols.max(grid_rows)).clamp(12, 48) as u32;
    let size = (
        grid_cols as u32 * cell_px + 40,
        grid_rows as u32 * cell_px + 80,
    );

    let text = text_enabled();
    ensure_parent(out)?;
    let root = BitMapBackend::new(out, size).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let mut builder = ChartBuilder::on(&root);
    builder.margin(20);
    if text {
        builder.caption("Dynamic Programming Table (longest common subsequence)", (FONT, 20));
    }
    let mut chart = builder
        .build_cartesian_2d(0.0..grid_cols as f64, 0.0..grid_rows as f64)
        .map_err(render_err)?;

    // Grid row r is drawn r cells down from the top.
    let cell = |r: usize, c: usize| {
        let top = (grid_rows - r) as f64;
        [(c as f64, top), (c as f64 + 1.0, top - 1.0)]
    };
    let center = |r: usize, c: usize| (c as f64 + 0.5, (grid_rows - r) as f64 - 0.5);

    let max = table.max_cell();
    chart
        .draw_series((0..table.rows()).flat_map(|i| {
            (0..table.cols()).map(move |j| {
                Rectangle::new(cell(i + 1, j + 1), heat_color(table.get(i, j), max).filled())
            })
        }))
        .map_err(render_err)?;
    chart
        .draw_series((0..table.rows()).flat_map(|i| {
            (0..table.cols()).map(move |j| Rectangle::new(cell(i + 1, j + 1), BLACK.mix(0.3)))
        }))
        .map_err(render_err)?;
    chart
        .draw_series(
            path.iter()
                .map(|&(i, j)| Rectangle::new(cell(i + 1, j + 1), RED.stroke_width(3))),
        )
        .map_err(render_err)?;

    if text {
        let style = TextStyle::from((FONT, (cell_px as f64 * 0.45).max(8.0)).into_font())
            .pos(Pos::new(HPos::Center, VPos::Center));

        let mut labels: Vec<(String, (f64, f64))> = Vec::new();
        for (j, sym) in str2.iter().enumerate() {
            labels.push((sym.to_string(), center(0, j + 2)));
        }
        for (i, sym) in str1.iter().enumerate() {
            labels.push((sym.to_string(), center(i + 2, 0)));
        }
        for i in 0..table.rows() {
            for j in 0..table.cols() {
                labels.push((table.get(i, j).to_string(), center(i + 1, j + 1)));
            }
        }
        chart
            .draw_series(
                labels
                    .into_iter()
                    .map(|(s, at)| Text::new(s, at, style.clone())),
            )
            .map_err(render_err)?;
    }

    root.present().map_err(render_err)?;
    info!("Wrote {}", out.display());
    Ok(())
}

/// Writes every result chart that has data into `dir`.
pub fn plot_all(records: &[TrialRecord], variant: Variant, dir: &Path) -> LcsResult<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;
    let mut written = Vec::new();

    let path = dir.join(RUNTIME_CHART);
    runtime_comparison(records, &path)?;
    written.push(path);

    let path = dir.join(SPEEDUP_CHART);
    if speedup(records, &path)? {
        written.push(path);
    }

    let path = dir.join(THEORETICAL_CHART);
    if theoretical_vs_experimental(records, variant, &path)? {
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranges() {
        assert_eq!(up_to(0.0), 0.0..1.0);
        assert_eq!(padded(5.0, 5.0), 4.0..6.0);
        let r = padded(0.0, 100.0);
        assert!(r.start < 0.0 && r.end > 100.0);
        assert_eq!(padded(f64::INFINITY, f64::NEG_INFINITY), 0.0..1.0);
    }

    #[test]
    fn test_heat_color_endpoints() {
        assert_eq!(heat_color(0, 4), RGBColor(255, 255, 217));
        assert_eq!(heat_color(4, 4), RGBColor(34, 94, 168));
        assert_eq!(heat_color(3, 0), RGBColor(255, 255, 217));
    }
}
