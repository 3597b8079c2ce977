/// Character-cell scatter plots for terminal rendering
use crossterm::{
    cursor::MoveTo,
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::Vector3;
use planeproj_core::{Axis, PointCloud, Projection};
use std::io::Write;

use crate::view::OrbitCamera;

/// Marker used for every scattered point
pub const MARKER: char = 'o';

/// Closed value range of one plotted axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    /// Range of the finite values, widened when all values coincide.
    ///
    /// Returns `None` when no finite value is present.
    pub fn from_values<'a, I: IntoIterator<Item = &'a f64>>(values: I) -> Option<Self> {
        let (min, max) = values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });

        if min > max {
            return None;
        }
        if min == max {
            return Some(Self {
                min: min - 0.5,
                max: max + 0.5,
            });
        }
        Some(Self { min, max })
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Map `value` into [0, 1]
    pub fn normalize(&self, value: f64) -> f64 {
        (value - self.min) / self.span()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    ch: char,
    color: Option<Color>,
    depth: f64,
}

impl Cell {
    const BLANK: Cell = Cell {
        ch: ' ',
        color: None,
        depth: f64::NEG_INFINITY,
    };
}

/// A rectangular grid of colored characters
pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::BLANK; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    pub fn char_at(&self, col: usize, row: usize) -> Option<char> {
        self.index(col, row).map(|idx| self.cells[idx].ch)
    }

    fn index(&self, col: usize, row: usize) -> Option<usize> {
        (col < self.width && row < self.height).then(|| row * self.width + col)
    }

    /// Write text starting at (col, row), clipped at the right edge
    pub fn put_str(&mut self, col: usize, row: usize, text: &str, color: Option<Color>) {
        for (offset, ch) in text.chars().enumerate() {
            if let Some(idx) = self.index(col + offset, row) {
                self.cells[idx] = Cell {
                    ch,
                    color,
                    depth: f64::INFINITY,
                };
            }
        }
    }

    /// Place a marker, keeping whichever marker is nearest the viewer
    pub fn plot(&mut self, col: usize, row: usize, ch: char, color: Color, depth: f64) {
        if let Some(idx) = self.index(col, row) {
            if depth >= self.cells[idx].depth {
                self.cells[idx] = Cell {
                    ch,
                    color: Some(color),
                    depth,
                };
            }
        }
    }

    pub fn draw<W: Write>(
        &self,
        writer: &mut W,
        origin_col: u16,
        origin_row: u16,
    ) -> std::io::Result<()> {
        let mut current = None;
        for row in 0..self.height {
            writer.queue(MoveTo(origin_col, origin_row + row as u16))?;
            for cell in &self.cells[row * self.width..(row + 1) * self.width] {
                let color = cell.color.unwrap_or(Color::Reset);
                if current != Some(color) {
                    writer.queue(SetForegroundColor(color))?;
                    current = Some(color);
                }
                writer.queue(Print(cell.ch))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Presentation of one panel of the plot grid
#[derive(Debug, Clone)]
pub struct PanelStyle {
    pub title: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub color: Color,
}

impl PanelStyle {
    pub fn new(
        title: impl Into<String>,
        x_label: &'static str,
        y_label: &'static str,
        color: Color,
    ) -> Self {
        Self {
            title: title.into(),
            x_label,
            y_label,
            color,
        }
    }
}

/// The drawable area of a panel after the title, labels and frame
#[derive(Debug, Clone, Copy, PartialEq)]
struct PlotArea {
    left: usize,
    top: usize,
    width: usize,
    height: usize,
}

impl PlotArea {
    /// Cell for normalized coordinates in [0, 1]; v grows upward
    fn cell(&self, u: f64, v: f64) -> Option<(usize, usize)> {
        if !(0.0..=1.0).contains(&u) || !(0.0..=1.0).contains(&v) {
            return None;
        }
        let col = (u * (self.width - 1) as f64).round() as usize;
        let row = ((1.0 - v) * (self.height - 1) as f64).round() as usize;
        Some((self.left + col, self.top + row))
    }
}

/// Width reserved left of the frame for the y label
const Y_GUTTER: usize = 2;

/// Draw title, axis labels and frame; returns the area left for points
fn draw_frame(
    canvas: &mut Canvas,
    style: &PanelStyle,
    ranges: Option<(Range, Range)>,
) -> Option<PlotArea> {
    let (w, h) = (canvas.width(), canvas.height());
    let title_col = w.saturating_sub(style.title.chars().count()) / 2;
    canvas.put_str(title_col, 0, &style.title, Some(Color::White));

    // Layout: title row, plot rows, x axis row, x label row
    if w < Y_GUTTER + 4 || h < 5 {
        return None;
    }
    let area = PlotArea {
        left: Y_GUTTER + 1,
        top: 1,
        width: w - Y_GUTTER - 1,
        height: h - 3,
    };
    let axis_row = area.top + area.height;

    for row in area.top..axis_row {
        canvas.put_str(Y_GUTTER, row, "|", Some(Color::DarkGrey));
    }
    canvas.put_str(Y_GUTTER, axis_row, "+", Some(Color::DarkGrey));
    canvas.put_str(area.left, axis_row, &"-".repeat(area.width), Some(Color::DarkGrey));

    canvas.put_str(0, area.top + area.height / 2, style.y_label, Some(Color::Grey));
    let label_col = area.left + area.width.saturating_sub(style.x_label.len()) / 2;
    canvas.put_str(label_col, axis_row + 1, style.x_label, Some(Color::Grey));

    if let Some((x_range, y_range)) = ranges {
        let x_min = format!("{:.2}", x_range.min);
        let x_max = format!("{:.2}", x_range.max);
        canvas.put_str(area.left, axis_row + 1, &x_min, Some(Color::DarkGrey));
        let x_max_col = (area.left + area.width).saturating_sub(x_max.len());
        canvas.put_str(x_max_col, axis_row + 1, &x_max, Some(Color::DarkGrey));
        canvas.put_str(area.left, area.top, &format!("{:.2}", y_range.max), Some(Color::DarkGrey));
    }

    (area.width >= 2 && area.height >= 2).then_some(area)
}

/// Scatter one projection, scaled to its own data range
pub fn draw_scatter_2d(canvas: &mut Canvas, projection: &Projection, style: &PanelStyle) {
    let ranges =
        Range::from_values(projection.horizontal()).zip(Range::from_values(projection.vertical()));
    let Some(area) = draw_frame(canvas, style, ranges) else {
        return;
    };
    let Some((x_range, y_range)) = ranges else {
        return;
    };

    for [u, v] in projection.iter_points() {
        if !u.is_finite() || !v.is_finite() {
            continue;
        }
        if let Some((col, row)) = area.cell(x_range.normalize(u), y_range.normalize(v)) {
            canvas.plot(col, row, MARKER, style.color, 0.0);
        }
    }
}

/// Scatter the full cloud through an orbiting orthographic camera.
///
/// Each axis is normalized to [-1, 1] before projection so the cloud fills
/// a cube regardless of the spread of its columns.
pub fn draw_scatter_3d(
    canvas: &mut Canvas,
    cloud: &PointCloud,
    camera: &OrbitCamera,
    style: &PanelStyle,
) {
    let Some(area) = draw_frame(canvas, style, None) else {
        return;
    };
    let ranges: Option<Vec<Range>> = Axis::ALL
        .iter()
        .map(|&axis| Range::from_values(cloud.column(axis)))
        .collect();
    let Some(ranges) = ranges else {
        return;
    };

    // A unit cube spans at most sqrt(3) in any screen direction
    let extent = 3f64.sqrt();
    let to_unit = |value: f64| (value / extent + 1.0) / 2.0;

    for point in cloud.iter_points() {
        if !point.iter().all(|v| v.is_finite()) {
            continue;
        }
        let cube = Vector3::from_fn(|i, _| ranges[i].normalize(point[i]) * 2.0 - 1.0);
        let (right, up, depth) = camera.project(&cube);
        if let Some((col, row)) = area.cell(to_unit(right), to_unit(up)) {
            canvas.plot(col, row, MARKER, style.color, depth);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planeproj_core::{project_to_planes, Plane};

    /// Plotted markers only; label text carries infinite depth
    fn markers(canvas: &Canvas) -> usize {
        canvas
            .cells
            .iter()
            .filter(|cell| cell.ch == MARKER && cell.depth.is_finite())
            .count()
    }

    fn fixture() -> PointCloud {
        PointCloud::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]).unwrap()
    }

    #[test]
    fn test_range_ignores_non_finite() {
        let range = Range::from_values(&[f64::NAN, -2.0, f64::INFINITY, 3.0]).unwrap();
        assert_eq!(range, Range { min: -2.0, max: 3.0 });
        assert_eq!(range.normalize(0.5), 0.5);
        assert_eq!(Range::from_values(&[f64::NAN]), None);
        assert_eq!(Range::from_values(&[] as &[f64]), None);
    }

    #[test]
    fn test_range_widens_degenerate() {
        let range = Range::from_values(&[2.0, 2.0]).unwrap();
        assert_eq!(range, Range { min: 1.5, max: 2.5 });
    }

    #[test]
    fn test_canvas_put_str_clips() {
        let mut canvas = Canvas::new(4, 1);
        canvas.put_str(2, 0, "abc", None);
        assert_eq!(canvas.char_at(2, 0), Some('a'));
        assert_eq!(canvas.char_at(3, 0), Some('b'));
        assert_eq!(canvas.char_at(4, 0), None);
    }

    #[test]
    fn test_plot_keeps_nearest() {
        let mut canvas = Canvas::new(1, 1);
        canvas.plot(0, 0, 'a', Color::Red, 1.0);
        canvas.plot(0, 0, 'b', Color::Red, -1.0);
        assert_eq!(canvas.char_at(0, 0), Some('a'));
        canvas.clear();
        assert_eq!(canvas.char_at(0, 0), Some(' '));
    }

    #[test]
    fn test_scatter_2d_places_extremes_in_corners() {
        let projections = project_to_planes(&fixture());
        let style = PanelStyle::new("XY Projection", "X", "Y", Color::Green);
        let mut canvas = Canvas::new(20, 10);
        draw_scatter_2d(&mut canvas, projections.get(Plane::XY), &style);

        let area = PlotArea {
            left: Y_GUTTER + 1,
            top: 1,
            width: 20 - Y_GUTTER - 1,
            height: 10 - 3,
        };
        // Minimum point lands bottom-left, maximum top-right
        assert_eq!(canvas.char_at(area.left, area.top + area.height - 1), Some(MARKER));
        assert_eq!(canvas.char_at(area.left + area.width - 1, area.top), Some(MARKER));
        assert_eq!(markers(&canvas), 3);
    }

    #[test]
    fn test_scatter_handles_empty_and_tiny_canvases() {
        let projections = project_to_planes(&PointCloud::empty());
        let style = PanelStyle::new("XZ Projection", "X", "Z", Color::Blue);

        let mut canvas = Canvas::new(20, 10);
        draw_scatter_2d(&mut canvas, &projections.xz, &style);
        assert_eq!(markers(&canvas), 0);

        let mut tiny = Canvas::new(3, 2);
        draw_scatter_2d(&mut tiny, &project_to_planes(&fixture()).xz, &style);
        assert_eq!(markers(&tiny), 0);
    }

    #[test]
    fn test_scatter_3d_draws_points() {
        let style = PanelStyle::new("Original Point Cloud", "X", "Y", Color::Red);
        let mut canvas = Canvas::new(40, 20);
        draw_scatter_3d(&mut canvas, &fixture(), &OrbitCamera::default(), &style);
        assert!(markers(&canvas) >= 1);

        canvas.clear();
        draw_scatter_3d(&mut canvas, &PointCloud::empty(), &OrbitCamera::default(), &style);
        assert_eq!(markers(&canvas), 0);
    }
}
