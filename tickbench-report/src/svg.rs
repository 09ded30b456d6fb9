//! Log-scale SVG bar chart.
//!
//! Rows are buffered; the document is emitted once on finish (or on drop as
//! a fallback). Geometry: 1920x1080 viewBox, bars on a logarithmic value
//! axis, one translucent band per bar spanning mean±stddev, min/max drawn
//! as I-shaped tips, the median printed above the bar and the row name
//! below it.

use crate::{ReportError, Reporter, Row};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const WIDTH: f64 = 1920.0;
const HEIGHT: f64 = 1080.0;

struct Bar {
    name: String,
    value: f64,
    height: f64,
    delta_up: f64,
    delta_down: f64,
    stddev_max: f64,
    stddev_min: f64,
}

/// Logarithmic value axis; non-positive values pass through unchanged.
fn axis_scale(x: f64) -> f64 {
    if x <= 0.0 {
        x
    } else {
        x.ln()
    }
}

/// Buffered SVG chart reporter.
pub struct SvgReporter<W: Write = BufWriter<File>> {
    out: W,
    bars: Vec<Bar>,
    finished: bool,
}

impl SvgReporter<BufWriter<File>> {
    /// Create (truncating) the output file. Rows accumulate in memory; the
    /// chart is written on finish. An open failure is fatal to the run.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, ReportError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| ReportError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::with_writer(BufWriter::new(file)))
    }
}

impl<W: Write> SvgReporter<W> {
    /// Chart reporter writing to an arbitrary sink.
    pub fn with_writer(out: W) -> Self {
        SvgReporter {
            out,
            bars: Vec::new(),
            finished: false,
        }
    }

    fn emit(&mut self) -> Result<(), ReportError> {
        let w = WIDTH;
        let h = HEIGHT;
        let out = &mut self.out;

        writeln!(
            out,
            "<svg viewBox=\"0 0 1920 1080\" xmlns=\"http://www.w3.org/2000/svg\">"
        )?;
        writeln!(
            out,
            "<style type=\"text/css\">\n\
             .bar {{\n  stroke: #000000;\n  fill: #779977;\n}}\n\
             .tip {{\n  stroke: #223344;\n  fill: none;\n}}\n\
             .stddev {{\n  stroke: none;\n  fill: #223344;\n  opacity: 0.25;\n}}\n\
             .label {{\n  font-family: monospace;\n  color: #000000;\n  dominant-baseline: central;\n  text-anchor: middle;\n}}\n\
             .value {{\n  font-family: monospace;\n  color: #000000;\n  dominant-baseline: central;\n  text-anchor: middle;\n}}\n\
             </style>"
        )?;
        writeln!(
            out,
            "<rect x=\"0\" y=\"0\" width=\"{}\" height=\"{}\" fill=\"lightgray\" />",
            w, h
        )?;

        // With a single bar there is no inter-bar pitch; pin the scale to
        // the full span instead of dividing by zero.
        let xscale = if self.bars.len() > 1 {
            (w - 200.0) / (self.bars.len() - 1) as f64
        } else {
            w - 200.0
        };
        let mut ymax: f64 = 0.0;
        for bar in &self.bars {
            ymax = ymax.max(bar.height + bar.delta_up);
        }
        let yscale = if ymax > 0.0 { (h - 120.0) / ymax } else { 0.0 };

        for (i, bar) in self.bars.iter().enumerate() {
            let x = 100.0 + i as f64 * xscale;
            let y = h - 60.0;
            let bar_width = 0.65 * xscale;
            let bar_height = bar.height * yscale;
            let avg_width = 0.35 * xscale;
            let tip_width = 0.15 * xscale;
            let tip_height_up = bar.delta_up * yscale;
            let tip_height_down = bar.delta_down * yscale;
            writeln!(
                out,
                "<rect class=\"bar\" x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" />",
                x - bar_width * 0.5,
                y - bar_height,
                bar_width,
                bar_height
            )?;
            writeln!(
                out,
                "<rect class=\"stddev\" x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" />",
                x - avg_width * 0.5,
                y - bar.stddev_max * yscale,
                avg_width,
                (bar.stddev_max - bar.stddev_min) * yscale
            )?;
            writeln!(
                out,
                "<line class=\"tip\" x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" />",
                x,
                y - bar_height - tip_height_up,
                x,
                y - bar_height - tip_height_down
            )?;
            writeln!(
                out,
                "<line class=\"tip\" x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" />",
                x - tip_width * 0.5,
                y - bar_height - tip_height_up,
                x + tip_width * 0.5,
                y - bar_height - tip_height_up
            )?;
            writeln!(
                out,
                "<line class=\"tip\" x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" />",
                x - tip_width * 0.5,
                y - bar_height - tip_height_down,
                x + tip_width * 0.5,
                y - bar_height - tip_height_down
            )?;
            writeln!(
                out,
                "<text class=\"value\" x=\"{}\" y=\"{}\">{:.0}</text>",
                x,
                y - bar_height - 20.0,
                bar.value
            )?;
            writeln!(
                out,
                "<text class=\"label\" x=\"{}\" y=\"{}\">{}</text>",
                x,
                h - 30.0,
                bar.name
            )?;
        }
        writeln!(out, "</svg>")?;
        out.flush()?;
        Ok(())
    }
}

impl<W: Write> Reporter for SvgReporter<W> {
    fn write_report(&mut self, name: &str, row: &Row) {
        let height = axis_scale(row.median as f64);
        let height_up = axis_scale(row.max as f64);
        let height_down = axis_scale(row.min as f64);
        self.bars.push(Bar {
            name: name.to_string(),
            value: row.median as f64,
            height,
            delta_up: height_up - height,
            delta_down: height_down - height,
            stddev_max: axis_scale(row.mean + row.stddev),
            stddev_min: axis_scale(row.mean - row.stddev),
        });
    }

    fn finish(&mut self) -> Result<(), ReportError> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.emit()
    }
}

impl<W: Write> Drop for SvgReporter<W> {
    fn drop(&mut self) {
        if !self.finished {
            self.finished = true;
            let _ = self.emit();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(median: i64, mean: f64, stddev: f64, min: i64, max: i64) -> Row {
        Row {
            median,
            mean,
            stddev,
            min,
            max,
            count: 100,
        }
    }

    fn render(rows: &[(&str, Row)]) -> String {
        let mut reporter = SvgReporter::with_writer(Vec::new());
        for (name, r) in rows {
            reporter.write_report(name, r);
        }
        reporter.finish().unwrap();
        let buffer = std::mem::take(&mut reporter.out);
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn document_frame() {
        let text = render(&[("a", row(10, 10.0, 1.0, 9, 12))]);
        assert!(text.starts_with("<svg viewBox=\"0 0 1920 1080\""));
        assert!(text.trim_end().ends_with("</svg>"));
        assert!(text.contains("fill=\"lightgray\""));
        assert!(text.contains(".bar {"));
        assert!(text.contains(".stddev {"));
        assert!(text.contains(".tip {"));
    }

    #[test]
    fn one_bar_one_stddev_band_three_tips_two_texts() {
        let text = render(&[
            ("a", row(10, 10.0, 1.0, 9, 12)),
            ("b", row(100, 105.0, 4.0, 90, 160)),
        ]);
        assert_eq!(text.matches("<rect class=\"bar\"").count(), 2);
        assert_eq!(text.matches("<rect class=\"stddev\"").count(), 2);
        assert_eq!(text.matches("<line class=\"tip\"").count(), 6);
        assert_eq!(text.matches("<text class=\"value\"").count(), 2);
        assert_eq!(text.matches("<text class=\"label\"").count(), 2);
        assert!(text.contains(">a</text>"));
        assert!(text.contains(">b</text>"));
        // The median is printed as the value label.
        assert!(text.contains(">10</text>"));
        assert!(text.contains(">100</text>"));
    }

    #[test]
    fn non_positive_median_does_not_log() {
        // axis_scale passes non-positive values through unchanged; the
        // document must still render.
        let text = render(&[("zero", row(0, 0.0, 0.0, 0, 0))]);
        assert_eq!(text.matches("<rect class=\"bar\"").count(), 1);
        assert!(!text.contains("NaN"));
    }

    #[test]
    fn empty_run_renders_empty_frame() {
        let text = render(&[]);
        assert!(text.contains("</svg>"));
        assert_eq!(text.matches("<rect class=\"bar\"").count(), 0);
    }
}
