//! Per-metric CSV export buttons below the chart.

use std::path::PathBuf;

use iced::widget::{Column, button, column, row, text};
use iced::{Alignment, Element, Theme};
use indexmap::IndexMap;

use crate::message::Message;
use crate::request::RequestState;
use crate::snapshot::ChartSnapshot;
use crate::view::theme;

/// Render one export row per metric of the displayed chart.
///
/// Nothing is rendered until a chart is displayed.
pub fn downloads_view<'a>(
    snapshot: Option<&'a ChartSnapshot>,
    exports: &'a IndexMap<String, RequestState<PathBuf>>,
    base_url: &'a str,
) -> Element<'a, Message> {
    let Some(snapshot) = snapshot else {
        return Column::new().into();
    };

    let mut rows = Column::new().spacing(8);

    for link in snapshot.download_links() {
        let state = exports.get(&link.metric);
        let pending = state.is_some_and(RequestState::is_pending);

        let label = format!("Download {} CSV", link.label);
        let mut download = button(text(label).size(13)).style(iced::widget::button::secondary);
        if !pending {
            download = download.on_press(Message::DownloadCsv(link.metric.clone()));
        }

        let url = text(format!("{}{}", base_url, link.query.path_and_query()))
            .size(10)
            .style(|theme: &Theme| text::Style {
                color: Some(theme::colors(theme).text_muted()),
            });

        let status: Element<'_, Message> = match state {
            Some(RequestState::Pending) => text("Downloading\u{2026}").size(11).into(),
            Some(RequestState::Succeeded(path)) => text(format!("Saved to {}", path.display()))
                .size(11)
                .style(|theme: &Theme| text::Style {
                    color: Some(theme::colors(theme).success()),
                })
                .into(),
            Some(RequestState::Failed(reason)) => text(format!("Download failed: {}", reason))
                .size(11)
                .style(|theme: &Theme| text::Style {
                    color: Some(theme::colors(theme).danger()),
                })
                .into(),
            Some(RequestState::Idle) | None => text("").into(),
        };

        rows = rows.push(
            column![
                row![download, status].spacing(12).align_y(Alignment::Center),
                url
            ]
            .spacing(2),
        );
    }

    rows.into()
}
