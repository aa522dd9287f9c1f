//! Price chart widget - normalized series as a braille line with news dots.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    symbols::Marker,
    widgets::{Axis, Block, Chart, Dataset, GraphType, Widget},
};
use spymaster_core::domain::timestamp::format_axis_label;
use spymaster_core::{MarkerAnnotation, PricePoint, NEWS_MARKER_COLOR};

use super::{hex_color, plot_area, time_bounds, Y_LABEL_WIDTH};

pub struct PriceChart<'a> {
    series: &'a [PricePoint],
    markers: &'a [MarkerAnnotation],
    title: &'a str,
    color: Color,
    show_price_line: bool,
}

impl<'a> PriceChart<'a> {
    pub fn new(series: &'a [PricePoint]) -> Self {
        Self {
            series,
            markers: &[],
            title: "",
            color: Color::Blue,
            show_price_line: false,
        }
    }

    pub fn markers(mut self, markers: &'a [MarkerAnnotation]) -> Self {
        self.markers = markers;
        self
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn price_line(mut self, show: bool) -> Self {
        self.show_price_line = show;
        self
    }

    /// Y bounds with padding; flat series get a 2% band around the price.
    fn value_bounds(&self) -> (f64, f64) {
        let min = self.series.iter().map(|p| p.value).fold(f64::INFINITY, f64::min);
        let max = self.series.iter().map(|p| p.value).fold(f64::NEG_INFINITY, f64::max);

        let mid = (min + max) / 2.0;
        let min_range = (mid.abs() * 0.02).max(0.02);
        let range = max - min;
        if range < min_range {
            (mid - min_range / 2.0, mid + min_range / 2.0)
        } else {
            let padding = range * 0.1;
            (min - padding, max + padding)
        }
    }

    /// Marker positions on the line; markers without a bucket are skipped.
    fn marker_points(&self) -> Vec<(f64, f64)> {
        self.markers
            .iter()
            .filter_map(|marker| {
                self.series
                    .binary_search_by_key(&marker.time, |point| point.time)
                    .ok()
                    .map(|idx| (marker.time as f64, self.series[idx].value))
            })
            .collect()
    }
}

impl Widget for PriceChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border = if self.series.is_empty() {
            Color::DarkGray
        } else {
            Color::White
        };
        Block::bordered()
            .title(self.title)
            .border_style(Style::default().fg(border))
            .render(area, buf);

        let (Some(plot), Some((x_lo, x_hi)), Some(last)) =
            (plot_area(area), time_bounds(self.series), self.series.last())
        else {
            return;
        };
        let (y_lo, y_hi) = self.value_bounds();

        let line: Vec<(f64, f64)> = self
            .series
            .iter()
            .map(|point| (point.time as f64, point.value))
            .collect();
        let dots = self.marker_points();
        let price_line = [(x_lo, last.value), (x_hi, last.value)];

        let mut datasets = Vec::with_capacity(3);
        if self.show_price_line {
            datasets.push(
                Dataset::default()
                    .marker(Marker::Dot)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(Color::DarkGray))
                    .data(&price_line),
            );
        }
        datasets.push(
            Dataset::default()
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(self.color))
                .data(&line),
        );
        datasets.push(
            Dataset::default()
                .marker(Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(hex_color(NEWS_MARKER_COLOR)))
                .data(&dots),
        );

        Chart::new(datasets)
            .x_axis(Axis::default().bounds([x_lo, x_hi]))
            .y_axis(Axis::default().bounds([y_lo, y_hi]))
            .render(plot, buf);

        let label_style = Style::default().fg(Color::Gray);
        let gutter_x = plot.x - Y_LABEL_WIDTH;
        let label_width = usize::from(Y_LABEL_WIDTH - 1);
        let bottom = plot.bottom() - 1;
        for (row, value) in [
            (plot.y, y_hi),
            (plot.y + (bottom - plot.y) / 2, (y_lo + y_hi) / 2.0),
            (bottom, y_lo),
        ] {
            let text = format!("{value:>label_width$.2}");
            buf.set_stringn(gutter_x, row, text, label_width, label_style);
        }

        let label_row = plot.bottom();
        let first = format_axis_label(self.series[0].time);
        let newest = format_axis_label(last.time);
        buf.set_stringn(plot.x, label_row, &first, usize::from(plot.width), label_style);
        let newest_width = newest.chars().count() as u16;
        if self.series.len() > 1 && newest_width + (first.chars().count() as u16) < plot.width {
            buf.set_stringn(
                plot.right() - newest_width,
                label_row,
                &newest,
                usize::from(newest_width),
                label_style,
            );
        }
    }
}
