use plotters::prelude::*;
use time::Date;

use super::{ChartError, ChartRenderer, EncodedChart};
use crate::config::ChartConfig;

const SVG_MIME: &str = "image/svg+xml";
const MAX_X_LABELS: usize = 8;

/// Plotters-backed renderer producing an SVG document.
///
/// Dates are plotted as Julian day numbers and turned back into
/// `YYYY-MM-DD` tick labels.
#[derive(Debug, Clone)]
pub struct SvgChartRenderer {
    width: u32,
    height: u32,
    title: String,
}

impl SvgChartRenderer {
    pub fn new(config: &ChartConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            title: config.title.clone(),
        }
    }

    fn draw(&self, series: &[(f64, f64)], out: &mut String) -> Result<(), ChartError> {
        let (x_range, y_range) = axis_ranges(series);
        // Plotters never finishes laying out ticks on an unbounded axis.
        if ![x_range.start, x_range.end, y_range.start, y_range.end]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(ChartError::Render(format!(
                "axis range overflows: x {x_range:?}, y {y_range:?}"
            )));
        }
        let span_days = (x_range.end - x_range.start).round() as usize;

        let root = SVGBackend::with_string(out, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&self.title, ("sans-serif", 24).into_font())
            .margin(16)
            .x_label_area_size(48)
            .y_label_area_size(64)
            .build_cartesian_2d(x_range, y_range)
            .map_err(render_err)?;

        chart
            .configure_mesh()
            .x_desc("Date")
            .y_desc("Cost (£)")
            .x_labels((span_days + 1).min(MAX_X_LABELS))
            .x_label_formatter(&|x| format_day(*x))
            .draw()
            .map_err(render_err)?;

        chart
            .draw_series(LineSeries::new(series.iter().copied(), &BLUE))
            .map_err(render_err)?;
        chart
            .draw_series(series.iter().map(|&point| Circle::new(point, 4, BLUE.filled())))
            .map_err(render_err)?;

        root.present().map_err(render_err)?;
        Ok(())
    }
}

impl ChartRenderer for SvgChartRenderer {
    fn render(&self, points: &[(Date, f64)]) -> Result<EncodedChart, ChartError> {
        if points.is_empty() {
            return Err(ChartError::EmptySeries);
        }

        if let Some((date, cost)) = points.iter().find(|(_, cost)| !cost.is_finite()) {
            return Err(ChartError::Render(format!("cost on {date} is not finite: {cost}")));
        }

        let series: Vec<(f64, f64)> = points
            .iter()
            .map(|(date, cost)| (f64::from(date.to_julian_day()), *cost))
            .collect();

        let mut svg = String::new();
        self.draw(&series, &mut svg)?;

        Ok(EncodedChart::encode(SVG_MIME, svg.as_bytes()))
    }
}

fn render_err<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Render(e.to_string())
}

fn format_day(julian_day: f64) -> String {
    Date::from_julian_day(julian_day.round() as i32)
        .map(|d| d.to_string())
        .unwrap_or_default()
}

/// Bounds that always have a non-zero width, padded by a day either side and
/// by a tenth of the cost range above.
fn axis_ranges(series: &[(f64, f64)]) -> (std::ops::Range<f64>, std::ops::Range<f64>) {
    let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut y_min, mut y_max) = (0.0_f64, f64::NEG_INFINITY);

    for &(x, y) in series {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }

    let y_pad = ((y_max - y_min) * 0.1).max(1.0);
    ((x_min - 1.0)..(x_max + 1.0), y_min..(y_max + y_pad))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn renderer() -> SvgChartRenderer {
        SvgChartRenderer::new(&ChartConfig::default())
    }

    fn decoded_svg(chart: &EncodedChart) -> String {
        String::from_utf8(chart.decode().unwrap()).unwrap()
    }

    #[test]
    fn renders_labelled_svg_with_a_marker_per_point() {
        let points = [
            (date!(2024-01-01), 150.0),
            (date!(2024-01-05), 90.0),
            (date!(2024-01-09), 210.0),
        ];

        let chart = renderer().render(&points).unwrap();
        assert_eq!(chart.mime, "image/svg+xml");

        let svg = decoded_svg(&chart);
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Energy Cost Over Time"));
        assert!(svg.contains("Date"));
        assert!(svg.contains("Cost (£)"));
        assert!(svg.matches("<circle").count() >= points.len());
        assert!(svg.contains("<polyline"));
    }

    #[test]
    fn single_point_still_renders() {
        let chart = renderer().render(&[(date!(2024-01-01), 150.0)]).unwrap();
        assert!(decoded_svg(&chart).contains("<circle"));
    }

    #[test]
    fn empty_series_is_refused() {
        assert!(matches!(renderer().render(&[]), Err(ChartError::EmptySeries)));
    }

    #[test]
    fn overflowing_costs_are_refused() {
        for cost in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            let res = renderer().render(&[(date!(2024-01-01), 1.0), (date!(2024-01-02), cost)]);
            assert!(matches!(res, Err(ChartError::Render(_))), "{cost} should be refused");
        }
    }

    #[test]
    fn finite_costs_spanning_the_whole_f64_range_are_refused() {
        let res = renderer().render(&[
            (date!(2024-01-01), -f64::MAX),
            (date!(2024-01-02), f64::MAX),
        ]);
        assert!(matches!(res, Err(ChartError::Render(_))));
    }

    #[test]
    fn axis_ranges_are_never_degenerate() {
        let (x, y) = axis_ranges(&[(100.0, 0.0)]);
        assert_eq!(x, 99.0..101.0);
        assert_eq!(y, 0.0..1.0);

        let (_, y) = axis_ranges(&[(1.0, -20.0), (2.0, 80.0)]);
        assert_eq!(y, -20.0..90.0);
    }

    #[test]
    fn tick_labels_are_calendar_dates() {
        let jd = f64::from(date!(2024-02-01).to_julian_day());
        assert_eq!(format_day(jd), "2024-02-01");
        assert_eq!(format_day(jd + 0.4), "2024-02-01");
    }
}
