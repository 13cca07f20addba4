//! Top-level dashboard layout: chart and exports on the left, controls on the right.

use std::path::PathBuf;

use iced::widget::{button, column, container, row, scrollable, text};
use iced::{Element, Length, Theme};
use indexmap::IndexMap;

use worldmetrics_common::Metadata;

use crate::message::Message;
use crate::request::RequestState;
use crate::selection::Selection;
use crate::view::chart::{ChartPanel, chart_section};
use crate::view::controls::controls_view;
use crate::view::downloads::downloads_view;
use crate::view::theme;

/// Everything the dashboard renders.
pub struct DashboardView<'a> {
    pub metadata: &'a RequestState<Metadata>,
    pub selection: &'a Selection,
    pub country_filter: &'a str,
    pub chart: &'a ChartPanel,
    pub exports: &'a IndexMap<String, RequestState<PathBuf>>,
    pub base_url: &'a str,
}

/// Render the dashboard, or the loading/error placeholder until metadata is available.
pub fn dashboard_view(view: DashboardView<'_>) -> Element<'_, Message> {
    let metadata = match view.metadata {
        RequestState::Idle | RequestState::Pending => return loading_view(),
        RequestState::Failed(reason) => return metadata_error_view(reason),
        RequestState::Succeeded(metadata) => metadata,
    };

    let main = column![
        chart_section(view.chart),
        downloads_view(view.chart.displayed(), view.exports, view.base_url),
    ]
    .spacing(20)
    .padding(20);

    row![
        container(scrollable(main))
            .width(Length::Fill)
            .height(Length::Fill),
        controls_view(metadata, view.selection, view.country_filter),
    ]
    .into()
}

fn loading_view<'a>() -> Element<'a, Message> {
    container(text("Loading\u{2026}").size(16))
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}

fn metadata_error_view(reason: &str) -> Element<'_, Message> {
    let message = text(format!("Failed to load metadata: {}", reason))
        .size(14)
        .style(|theme: &Theme| text::Style {
            color: Some(theme::colors(theme).danger()),
        });

    let retry = button(text("Retry").size(14))
        .on_press(Message::RetryMetadata)
        .style(iced::widget::button::primary);

    container(column![message, retry].spacing(12))
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}
