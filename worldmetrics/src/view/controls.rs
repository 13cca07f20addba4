//! Sidebar with the selection controls.

use iced::widget::{
    Column, button, checkbox, column, container, row, rule, scrollable, slider, text, text_input,
};
use iced::{Alignment, Element, Length, Theme};

use worldmetrics_common::{CountryRef, Metadata};

use crate::message::Message;
use crate::selection::{MAX_COUNTRIES, MAX_METRICS, Selection};
use crate::view::formatting::format_year_range;
use crate::view::theme;

/// Width of the controls sidebar.
pub const SIDEBAR_WIDTH: f32 = 320.0;

/// Countries whose name or code contains `filter` (case-insensitive).
pub fn filter_countries<'a>(countries: &'a [CountryRef], filter: &str) -> Vec<&'a CountryRef> {
    let needle = filter.trim().to_lowercase();
    countries
        .iter()
        .filter(|c| {
            needle.is_empty()
                || c.name.to_lowercase().contains(&needle)
                || c.code.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Render the controls sidebar.
pub fn controls_view<'a>(
    metadata: &'a Metadata,
    selection: &'a Selection,
    country_filter: &'a str,
) -> Element<'a, Message> {
    let content = column![
        text("Controls").size(20),
        render_countries(metadata, selection, country_filter),
        rule::horizontal(1),
        render_years(metadata, selection),
        rule::horizontal(1),
        render_metrics(metadata, selection),
        button(text("Generate Chart").size(14).center())
            .on_press(Message::GenerateChart)
            .width(Length::Fill)
            .style(iced::widget::button::primary),
    ]
    .spacing(12)
    .padding(16);

    container(scrollable(content))
        .width(Length::Fixed(SIDEBAR_WIDTH))
        .height(Length::Fill)
        .style(|theme: &Theme| {
            let colors = theme::colors(theme);
            container::Style {
                background: Some(iced::Background::Color(colors.card_background())),
                border: iced::Border {
                    color: colors.border(),
                    width: 1.0,
                    radius: 0.0.into(),
                },
                ..Default::default()
            }
        })
        .into()
}

/// Country search, selected chips, matching list and the random pick button.
fn render_countries<'a>(
    metadata: &'a Metadata,
    selection: &'a Selection,
    country_filter: &'a str,
) -> Element<'a, Message> {
    let header = row![
        text("Countries").size(14),
        text(format!(
            "{}/{} selected",
            selection.countries().len(),
            MAX_COUNTRIES
        ))
        .size(11)
        .style(|theme: &Theme| text::Style {
            color: Some(theme::colors(theme).text_muted()),
        }),
    ]
    .spacing(10)
    .align_y(Alignment::Center);

    let search = text_input("Select countries", country_filter)
        .on_input(Message::CountryFilterChanged)
        .padding(8);

    // Selected countries, click to remove
    let mut chips = Column::new().spacing(4);
    for country in selection.countries() {
        let candidate = selection.country_candidate(country, false);
        chips = chips.push(
            button(text(format!("\u{2715} {}", country.name)).size(12))
                .on_press(Message::SetCountries(candidate))
                .style(iced::widget::button::secondary),
        );
    }

    let mut list = Column::new().spacing(2);
    for country in filter_countries(&metadata.countries, country_filter) {
        let selected = selection.is_country_selected(&country.code);
        let candidate = selection.country_candidate(country, !selected);
        list = list.push(
            button(text(&country.name).size(12))
                .on_press(Message::SetCountries(candidate))
                .width(Length::Fill)
                .style(if selected {
                    iced::widget::button::primary
                } else {
                    iced::widget::button::text
                }),
        );
    }

    let random = button(text("Random 5").size(12))
        .on_press(Message::PickRandomCountries)
        .style(iced::widget::button::text);

    column![
        header,
        search,
        chips,
        scrollable(list).height(Length::Fixed(200.0)),
        random,
    ]
    .spacing(8)
    .into()
}

/// Start/end year sliders bounded by the metadata years.
///
/// A single-year catalog has nothing to slide over and shows only the label.
fn render_years<'a>(metadata: &'a Metadata, selection: &'a Selection) -> Element<'a, Message> {
    let (start, end) = selection.year_range();
    if metadata.years.min >= metadata.years.max {
        return text(format_year_range((start, end))).size(14).into();
    }
    let bounds = metadata.years.min..=metadata.years.max;

    let start_slider = slider(bounds.clone(), start, move |year| {
        Message::SetYearRange(year, end.max(year))
    });
    let end_slider = slider(bounds, end, move |year| {
        Message::SetYearRange(start.min(year), year)
    });

    column![
        text(format_year_range((start, end))).size(14),
        row![text("From").size(11).width(Length::Fixed(36.0)), start_slider]
            .spacing(8)
            .align_y(Alignment::Center),
        row![text("To").size(11).width(Length::Fixed(36.0)), end_slider]
            .spacing(8)
            .align_y(Alignment::Center),
    ]
    .spacing(8)
    .into()
}

/// One checkbox per metric.
fn render_metrics<'a>(metadata: &'a Metadata, selection: &'a Selection) -> Element<'a, Message> {
    let mut boxes = Column::new().spacing(6);
    for (key, label) in &metadata.metrics {
        let key = key.clone();
        boxes = boxes.push(
            checkbox(selection.is_metric_selected(&key))
                .label(label.as_str())
                .text_size(13)
                .on_toggle(move |checked| Message::ToggleMetric(key.clone(), checked)),
        );
    }

    column![
        text(format!("Metrics (max {})", MAX_METRICS)).size(14),
        boxes,
    ]
    .spacing(8)
    .into()
}
