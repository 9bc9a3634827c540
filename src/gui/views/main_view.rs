//! Main view implementation - Light Theme

use crate::downloader::progress::DownloadJob;
use crate::downloader::DownloadedFile;
use crate::gui::app::Message;
use crate::gui::components::{progress_bar, quality_menu, url_input};
use crate::selector::MenuEntry;
use iced::widget::{button, column, container, row, text, Column, Space};
use iced::{Alignment, Element, Length};

/// Create the main view
#[allow(clippy::too_many_arguments)]
pub fn main_view(
    url_value: &str,
    error: Option<&str>,
    is_fetching: bool,
    video_title: Option<&str>,
    menu: &[MenuEntry],
    selected: Option<&MenuEntry>,
    job: Option<&DownloadJob>,
    finished: Option<&DownloadedFile>,
) -> Element<'static, Message> {
    use crate::gui::theme;

    let mut card = Column::new()
        .spacing(20)
        .push(
            text("Download Video")
                .size(30)
                .style(iced::theme::Text::Color(theme::GRAY_800)),
        )
        .push(url_input(url_value, error.is_some(), is_fetching))
        .push(
            row![
                Space::with_width(Length::Fill),
                button(
                    text(if is_fetching {
                        "Fetching formats..."
                    } else {
                        "Fetch formats"
                    })
                    .size(16)
                )
                .on_press_maybe(if !url_value.trim().is_empty() && !is_fetching {
                    Some(Message::FetchPressed)
                } else {
                    None
                })
                .padding([14, 28])
                .style(iced::theme::Button::Custom(Box::new(theme::PrimaryButton))),
            ]
            .align_items(Alignment::Center),
        );

    if let Some(message) = error {
        card = card.push(
            container(text(message.to_string()).size(14))
                .padding([10, 14])
                .width(Length::Fill)
                .style(iced::theme::Container::Custom(Box::new(
                    theme::ErrorBannerContainer,
                ))),
        );
    }

    if let Some(title) = video_title {
        card = card.push(
            text(title.to_string())
                .size(18)
                .style(iced::theme::Text::Color(theme::TEXT_PRIMARY)),
        );
    }

    if !menu.is_empty() {
        card = card.push(quality_menu(menu, selected)).push(
            row![
                Space::with_width(Length::Fill),
                button(text("Download").size(16))
                    .on_press_maybe(
                        if selected.is_some() && (job.is_none() || finished.is_some()) {
                            Some(Message::DownloadPressed)
                        } else {
                            None
                        },
                    )
                    .padding([14, 28])
                    .style(iced::theme::Button::Custom(Box::new(theme::PrimaryButton))),
            ]
            .align_items(Alignment::Center),
        );
    }

    if let Some(job) = job {
        card = card.push(progress_bar(job.percent, &job.status));
    }

    if let Some(file) = finished {
        card = card.push(
            column![
                text(format!("Saved {}", file.file_name()))
                    .size(14)
                    .style(iced::theme::Text::Color(theme::SUCCESS)),
                row![
                    button(text("Open file").size(14))
                        .on_press(Message::OpenFile)
                        .padding([10, 16])
                        .style(iced::theme::Button::Custom(Box::new(theme::PrimaryButton))),
                    button(text("Show in folder").size(14))
                        .on_press(Message::ShowInFolder)
                        .padding([10, 16])
                        .style(iced::theme::Button::Custom(Box::new(
                            theme::SecondaryButton
                        ))),
                ]
                .spacing(12),
            ]
            .spacing(12),
        );
    }

    let content = container(card)
        .padding(32)
        .width(Length::Fixed(640.0))
        .style(iced::theme::Container::Custom(Box::new(
            theme::GlassContainer,
        )));

    container(
        column![content]
            .width(Length::Fill)
            .align_items(Alignment::Center),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .center_y()
    .padding(24)
    .style(iced::theme::Container::Custom(Box::new(
        theme::MainGradientContainer,
    )))
    .into()
}
