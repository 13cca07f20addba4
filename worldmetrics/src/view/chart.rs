//! Multi-series line chart using Iced canvas.

use iced::mouse;
use iced::task;
use iced::widget::canvas::{self, Cache, Canvas, Frame, Geometry, Path, Stroke, Text};
use iced::widget::{Column, Row, column, container, row, text};
use iced::{Alignment, Element, Length, Point, Rectangle, Renderer, Size, Theme};

use worldmetrics_common::{ChartResult, DataQuery};

use crate::message::Message;
use crate::request::{RequestId, RequestState, RequestTracker};
use crate::snapshot::{ChartSnapshot, Trace};
use crate::view::formatting::{format_value, year_ticks};
use crate::view::theme::{self, series_color};

/// State of the chart area: the displayed snapshot and the latest request.
pub struct ChartPanel {
    /// Last successfully loaded chart.
    displayed: Option<ChartSnapshot>,
    /// Outcome of the most recent request.
    status: RequestState,
    tracker: RequestTracker,
    /// Aborts the outstanding request when replaced or dropped.
    in_flight: Option<task::Handle>,
    cache: Cache,
}

impl Default for ChartPanel {
    fn default() -> Self {
        Self {
            displayed: None,
            status: RequestState::Idle,
            tracker: RequestTracker::default(),
            in_flight: None,
            cache: Cache::new(),
        }
    }
}

impl ChartPanel {
    /// The chart currently on screen.
    pub fn displayed(&self) -> Option<&ChartSnapshot> {
        self.displayed.as_ref()
    }

    /// Outcome of the most recent request.
    pub fn status(&self) -> &RequestState {
        &self.status
    }

    /// Id of the outstanding request, if any.
    pub fn current_request(&self) -> Option<RequestId> {
        self.tracker.current()
    }

    /// Number of chart requests issued so far.
    pub fn requests_issued(&self) -> u64 {
        self.tracker.issued()
    }

    /// Start a new request, superseding the outstanding one.
    pub fn begin(&mut self) -> RequestId {
        self.status = RequestState::Pending;
        self.tracker.begin()
    }

    /// Attach the abort handle of the task serving the current request.
    ///
    /// Replacing the previous handle aborts the superseded task.
    pub fn track(&mut self, handle: task::Handle) {
        self.in_flight = Some(handle.abort_on_drop());
    }

    /// Apply a response. Returns `false` if it belongs to a superseded request.
    ///
    /// On failure the previously displayed chart stays on screen.
    pub fn settle(
        &mut self,
        id: RequestId,
        query: DataQuery,
        result: Result<ChartResult, String>,
    ) -> bool {
        if !self.tracker.finish(id) {
            return false;
        }
        self.in_flight = None;

        match result {
            Ok(result) => {
                self.displayed = Some(ChartSnapshot::new(query, result));
                self.status = RequestState::Succeeded(());
                self.cache.clear();
            }
            Err(reason) => {
                self.status = RequestState::Failed(reason);
            }
        }
        true
    }
}

/// Axis ranges of the plot area.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Bounds {
    year_min: f64,
    year_max: f64,
    value_min: f64,
    value_max: f64,
}

impl Bounds {
    /// Bounds covering the snapshot, padded so flat or single-year data still plots.
    fn of(snapshot: &ChartSnapshot) -> Option<Self> {
        let (year_min, year_max) = snapshot.year_extent()?;
        let (value_min, value_max) = snapshot.value_extent()?;

        let (year_min, year_max) = if year_min == year_max {
            (year_min as f64 - 1.0, year_max as f64 + 1.0)
        } else {
            (year_min as f64, year_max as f64)
        };

        let range = value_max - value_min;
        let (value_min, value_max) = if range.abs() < f64::EPSILON * value_max.abs().max(1.0) {
            let pad = value_max.abs().max(1.0) * 0.5;
            (value_min - pad, value_max + pad)
        } else {
            let pad = range * 0.1;
            (value_min - pad, value_max + pad)
        };

        Some(Self {
            year_min,
            year_max,
            value_min,
            value_max,
        })
    }

    fn x(&self, year: f64, left: f32, width: f32) -> f32 {
        left + ((year - self.year_min) / (self.year_max - self.year_min)) as f32 * width
    }

    fn y(&self, value: f64, top: f32, height: f32) -> f32 {
        top + height - ((value - self.value_min) / (self.value_max - self.value_min)) as f32 * height
    }
}

/// Chart widget that renders the displayed snapshot.
pub struct Chart<'a> {
    panel: &'a ChartPanel,
}

impl<'a> Chart<'a> {
    pub fn new(panel: &'a ChartPanel) -> Self {
        Self { panel }
    }
}

impl<'a> canvas::Program<Message> for Chart<'a> {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let geometry = self.panel.cache.draw(renderer, bounds.size(), |frame| {
            if let Some(snapshot) = &self.panel.displayed {
                draw_chart(frame, bounds.size(), theme, snapshot);
            }
        });

        vec![geometry]
    }
}

/// Draw the chart onto the frame.
fn draw_chart(frame: &mut Frame, size: Size, theme: &Theme, snapshot: &ChartSnapshot) {
    let colors = theme::colors(theme);
    let left = 70.0;
    let right = 20.0;
    let top = 40.0;
    let bottom = 45.0;
    let width = size.width - left - right;
    let height = size.height - top - bottom;

    if width <= 0.0 || height <= 0.0 {
        return;
    }

    frame.fill(
        &Path::rectangle(Point::ORIGIN, size),
        colors.chart_outer_background(),
    );
    frame.fill(
        &Path::rectangle(Point::new(left, top), Size::new(width, height)),
        colors.chart_background(),
    );

    frame.fill_text(Text {
        content: "Country Metrics".to_string(),
        position: Point::new(left, 12.0),
        color: colors.text(),
        size: 14.0.into(),
        ..Text::default()
    });

    let Some(bounds) = Bounds::of(snapshot) else {
        return;
    };

    draw_grid(frame, &bounds, theme, left, top, width, height);

    for (index, trace) in snapshot.traces().iter().enumerate() {
        draw_trace(frame, &bounds, trace, series_color(index), left, top, width, height);
    }

    // Axis titles
    frame.fill_text(Text {
        content: "Year".to_string(),
        position: Point::new(left + width / 2.0 - 12.0, size.height - 16.0),
        color: colors.chart_label(),
        size: 11.0.into(),
        ..Text::default()
    });
    frame.fill_text(Text {
        content: "Value".to_string(),
        position: Point::new(5.0, 12.0),
        color: colors.chart_label(),
        size: 11.0.into(),
        ..Text::default()
    });
}

/// Draw grid lines and axis labels.
fn draw_grid(
    frame: &mut Frame,
    bounds: &Bounds,
    theme: &Theme,
    left: f32,
    top: f32,
    width: f32,
    height: f32,
) {
    let colors = theme::colors(theme);
    let grid = || {
        Stroke::default()
            .with_color(colors.chart_grid())
            .with_width(1.0)
    };

    let num_h_lines = 5;
    for i in 0..=num_h_lines {
        let y = top + (i as f32 / num_h_lines as f32) * height;
        let value = bounds.value_max
            - (i as f64 / num_h_lines as f64) * (bounds.value_max - bounds.value_min);

        frame.stroke(
            &Path::line(Point::new(left, y), Point::new(left + width, y)),
            grid(),
        );
        frame.fill_text(Text {
            content: format_value(value),
            position: Point::new(5.0, y - 6.0),
            color: colors.chart_label(),
            size: 10.0.into(),
            ..Text::default()
        });
    }

    let first_year = bounds.year_min.ceil() as i32;
    let last_year = bounds.year_max.floor() as i32;
    for year in year_ticks(first_year, last_year, 8) {
        let x = bounds.x(year as f64, left, width);

        frame.stroke(
            &Path::line(Point::new(x, top), Point::new(x, top + height)),
            grid(),
        );
        frame.fill_text(Text {
            content: year.to_string(),
            position: Point::new(x - 14.0, top + height + 8.0),
            color: colors.chart_label(),
            size: 10.0.into(),
            ..Text::default()
        });
    }
}

/// Draw one trace as a line with point markers.
#[allow(clippy::too_many_arguments)]
fn draw_trace(
    frame: &mut Frame,
    bounds: &Bounds,
    trace: &Trace,
    color: iced::Color,
    left: f32,
    top: f32,
    width: f32,
    height: f32,
) {
    let points: Vec<Point> = trace
        .points
        .iter()
        .filter(|(_, value)| value.is_finite())
        .map(|(year, value)| {
            Point::new(
                bounds.x(*year as f64, left, width),
                bounds.y(*value, top, height),
            )
        })
        .collect();

    if points.len() >= 2 {
        let mut builder = canvas::path::Builder::new();
        builder.move_to(points[0]);
        for point in &points[1..] {
            builder.line_to(*point);
        }
        frame.stroke(
            &builder.build(),
            Stroke::default().with_color(color).with_width(2.0),
        );
    }

    for point in points {
        frame.fill(&Path::circle(point, 3.0), color);
    }
}

/// Legend listing every trace with its line color.
fn legend(snapshot: &ChartSnapshot) -> Element<'_, Message> {
    let entries: Vec<Element<'_, Message>> = snapshot
        .traces()
        .into_iter()
        .enumerate()
        .map(|(index, trace)| {
            let color = series_color(index);
            row![
                text("\u{25CF}")
                    .size(12)
                    .style(move |_theme: &Theme| text::Style { color: Some(color) }),
                text(trace.name).size(12),
            ]
            .spacing(4)
            .align_y(Alignment::Center)
            .into()
        })
        .collect();

    Row::with_children(entries).spacing(16).wrap().into()
}

/// Render the chart section: status line, canvas and legend.
pub fn chart_section(panel: &ChartPanel) -> Element<'_, Message> {
    let mut content = Column::new().spacing(10);

    match panel.status() {
        RequestState::Pending => {
            content = content.push(text("Loading chart\u{2026}").size(12));
        }
        RequestState::Failed(reason) => {
            content = content.push(
                text(format!("Chart request failed: {}", reason))
                    .size(12)
                    .style(|theme: &Theme| text::Style {
                        color: Some(theme::colors(theme).danger()),
                    }),
            );
        }
        RequestState::Idle | RequestState::Succeeded(()) => {}
    }

    let body: Element<'_, Message> = match panel.displayed() {
        None => placeholder("Select countries and metrics, then generate a chart"),
        Some(snapshot) if snapshot.is_empty() => {
            placeholder("No data for the selected countries and years")
        }
        Some(snapshot) => column![
            Canvas::new(Chart::new(panel))
                .width(Length::Fill)
                .height(Length::Fixed(480.0)),
            legend(snapshot),
        ]
        .spacing(10)
        .into(),
    };

    content = content.push(body);

    container(content)
        .padding(10)
        .width(Length::Fill)
        .style(|theme: &Theme| {
            let colors = theme::colors(theme);
            container::Style {
                background: Some(iced::Background::Color(colors.card_background())),
                border: iced::Border {
                    color: colors.border(),
                    width: 1.0,
                    radius: 6.0.into(),
                },
                ..Default::default()
            }
        })
        .into()
}

fn placeholder(message: &str) -> Element<'_, Message> {
    container(text(message).size(16))
        .width(Length::Fill)
        .height(Length::Fixed(480.0))
        .center_x(Length::Fill)
        .center_y(Length::Fixed(480.0))
        .into()
}
