//! SVG combination matrix
//!
//! Layout, for a figure split 1:2 horizontally and vertically:
//!
//! ```text
//!  +-----------+------------------------+
//!  |           |  combination bars      |
//!  +-----------+------------------------+
//!  | token bars|  membership dots/lines |
//!  +-----------+------------------------+
//! ```
//!
//! Token rows are drawn bottom-up in rank order; combination columns
//! left-to-right in rank order.

use crate::error::{CombiError, Result};
use crate::pipeline::Frequencies;
use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::Path;
use std::str::FromStr;

/// Pixels per inch of figure size
pub const DPI: u32 = 150;

const GRID_DOT: &str = "#cfcfcf";
const COMBINATION_BAR: &str = "#0000ff";
const SUBSTITUTE_BAR: &str = "#ff0000";

/// Figure dimensions in inches, parsed from `WIDTHxHEIGHT`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FigureSize {
    pub width: u32,
    pub height: u32,
}

impl Default for FigureSize {
    fn default() -> Self {
        Self {
            width: 20,
            height: 20,
        }
    }
}

impl FromStr for FigureSize {
    type Err = CombiError;

    /// Parses `"20x20"`; anything after a second `x` is ignored
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || CombiError::InvalidFigureSize(s.to_string());
        let mut parts = s.split('x');
        let mut next_dimension = || -> Result<u32> {
            let dimension: u32 = parts
                .next()
                .and_then(|part| part.trim().parse().ok())
                .ok_or_else(invalid)?;
            if dimension == 0 || dimension.checked_mul(DPI).is_none() {
                return Err(invalid());
            }
            Ok(dimension)
        };
        let width = next_dimension()?;
        let height = next_dimension()?;
        Ok(Self { width, height })
    }
}

/// Panel rectangle in pixels
#[derive(Debug, Clone, Copy)]
struct Panel {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

/// SVG renderer for ranked substitution/combination frequencies
#[derive(Debug, Clone)]
pub struct MatrixPlot {
    size: FigureSize,
    font_size: u32,
}

impl MatrixPlot {
    pub fn new(size: FigureSize, font_size: u32) -> Self {
        Self { size, font_size }
    }

    /// Escape XML special characters
    fn escape_xml(text: &str) -> String {
        text.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&#39;")
    }

    fn pixels(&self) -> (f64, f64) {
        (
            f64::from(self.size.width) * f64::from(DPI),
            f64::from(self.size.height) * f64::from(DPI),
        )
    }

    /// Split the canvas into (combination bars, token bars, matrix) panels
    fn layout(&self, label_width: f64) -> (Panel, Panel, Panel) {
        let (width, height) = self.pixels();
        let pad = 0.04 * width.min(height);
        let inner_w = width - 2.0 * pad;
        let inner_h = height - 2.0 * pad;
        let left_w = inner_w / 3.0;
        let top_h = inner_h / 3.0;

        let top = Panel {
            x: pad + left_w,
            y: pad,
            width: inner_w - left_w,
            height: top_h,
        };
        let left = Panel {
            x: pad,
            y: pad + top_h,
            width: (left_w - label_width).max(0.0),
            height: inner_h - top_h,
        };
        let matrix = Panel {
            x: pad + left_w,
            y: pad + top_h,
            width: inner_w - left_w,
            height: inner_h - top_h,
        };
        (top, left, matrix)
    }

    /// Render the complete SVG document
    pub fn render(&self, frequencies: &Frequencies) -> String {
        let subs = &frequencies.substitutes;
        let combis = &frequencies.combinations;
        let font = f64::from(self.font_size);

        let longest_label = subs.iter().map(|(sub, _)| sub.chars().count()).max();
        let label_width = longest_label.map_or(0.0, |len| len as f64 * font * 0.6 + font);
        let (top, left, matrix) = self.layout(label_width);

        let row_h = matrix.height / subs.len().max(1) as f64;
        let col_w = matrix.width / combis.len().max(1) as f64;
        let row_y = |j: usize| matrix.y + matrix.height - (j as f64 + 0.5) * row_h;
        let col_x = |i: usize| matrix.x + (i as f64 + 0.5) * col_w;
        let rank_of: HashMap<&str, usize> = subs
            .iter()
            .enumerate()
            .map(|(j, (sub, _))| (sub.as_str(), j))
            .collect();

        let (width, height) = self.pixels();
        let mut svg = String::new();
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
        );
        let _ = writeln!(
            svg,
            r#"  <rect width="100%" height="100%" fill="white"/>"#
        );
        let _ = writeln!(
            svg,
            r#"  <g font-family="sans-serif" font-size="{}">"#,
            self.font_size
        );

        // Grey membership grid
        let radius = (row_h.min(col_w) * 0.2).clamp(1.5, font.max(1.5));
        svg.push_str("    <g class=\"grid\">\n");
        for i in 0..combis.len() {
            for j in 0..subs.len() {
                let _ = writeln!(
                    svg,
                    r#"      <circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="{}"/>"#,
                    col_x(i),
                    row_y(j),
                    radius,
                    GRID_DOT
                );
            }
        }
        svg.push_str("    </g>\n");

        // Member dots joined by a line per combination
        svg.push_str("    <g class=\"members\">\n");
        for (i, (members, _)) in combis.iter().enumerate() {
            let mut rows: Vec<usize> = members
                .iter()
                .filter_map(|sub| rank_of.get(sub.as_str()).copied())
                .collect();
            rows.sort_unstable();
            if let (Some(&first), Some(&last)) = (rows.first(), rows.last()) {
                let _ = writeln!(
                    svg,
                    r#"      <line x1="{x:.1}" y1="{:.1}" x2="{x:.1}" y2="{:.1}" stroke="black" stroke-width="{:.1}"/>"#,
                    row_y(first),
                    row_y(last),
                    radius * 0.5,
                    x = col_x(i)
                );
            }
            for j in rows {
                let _ = writeln!(
                    svg,
                    r#"      <circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="black"/>"#,
                    col_x(i),
                    row_y(j),
                    radius
                );
            }
        }
        svg.push_str("    </g>\n");

        // Combination bars on top, scaled to the most frequent one
        let max_combi = combis.iter().map(|(_, f)| *f).fold(0.0, f64::max);
        let bar_room = (top.height - 2.0 * font).max(0.0);
        svg.push_str("    <g class=\"combinations\">\n");
        for (i, (_, freq)) in combis.iter().enumerate() {
            let bar_h = if max_combi > 0.0 {
                freq / max_combi * bar_room
            } else {
                0.0
            };
            let bar_w = col_w * 0.8;
            let base = top.y + top.height;
            let _ = writeln!(
                svg,
                r#"      <rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}"/>"#,
                col_x(i) - bar_w / 2.0,
                base - bar_h,
                bar_w,
                bar_h,
                COMBINATION_BAR
            );
            let _ = writeln!(
                svg,
                r#"      <text x="{:.1}" y="{:.1}" text-anchor="middle">{:.1}%</text>"#,
                col_x(i),
                base - bar_h - font * 0.3,
                freq * 100.0
            );
        }
        let _ = writeln!(
            svg,
            r#"      <line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="black"/>"#,
            top.x,
            top.y,
            top.x,
            top.y + top.height
        );
        svg.push_str("    </g>\n");

        // Substitute bars on the left, growing leftwards on a 0..100% axis
        let right_edge = left.x + left.width;
        svg.push_str("    <g class=\"substitutes\">\n");
        for (j, (sub, freq)) in subs.iter().enumerate() {
            let bar_w = freq.clamp(0.0, 1.0) * left.width;
            let bar_h = row_h * 0.8;
            let _ = writeln!(
                svg,
                r#"      <rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}"/>"#,
                right_edge - bar_w,
                row_y(j) - bar_h / 2.0,
                bar_w,
                bar_h,
                SUBSTITUTE_BAR
            );
            let _ = writeln!(
                svg,
                r#"      <text x="{:.1}" y="{:.1}" text-anchor="end" dominant-baseline="middle">{:.2}%</text>"#,
                right_edge - bar_w - 0.01 * left.width,
                row_y(j),
                freq * 100.0
            );
            let _ = writeln!(
                svg,
                r#"      <text x="{:.1}" y="{:.1}" dominant-baseline="middle">{}</text>"#,
                right_edge + font * 0.5,
                row_y(j),
                Self::escape_xml(sub)
            );
        }
        let axis_y = left.y + left.height;
        let _ = writeln!(
            svg,
            r#"      <line x1="{:.1}" y1="{axis_y:.1}" x2="{:.1}" y2="{axis_y:.1}" stroke="black"/>"#,
            left.x, right_edge
        );
        for step in 0..=4 {
            let share = f64::from(step) * 0.25;
            let _ = writeln!(
                svg,
                r#"      <text x="{:.1}" y="{:.1}" text-anchor="middle">{:.0}%</text>"#,
                right_edge - share * left.width,
                axis_y + font * 1.2,
                share * 100.0
            );
        }
        svg.push_str("    </g>\n");

        svg.push_str("  </g>\n");
        svg.push_str("</svg>\n");
        svg
    }

    pub fn write_to_path(&self, frequencies: &Frequencies, path: &Path) -> Result<()> {
        std::fs::write(path, self.render(frequencies))?;
        Ok(())
    }
}
