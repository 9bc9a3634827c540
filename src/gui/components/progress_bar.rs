//! Progress bar component

use iced::widget::{column, progress_bar as iced_progress_bar, text};
use iced::Element;

/// Create a progress bar with the relayed status line underneath.
/// `percent` is already clamped to 0-100 upstream.
pub fn progress_bar(percent: f32, status: &str) -> Element<'static, crate::gui::app::Message> {
    let style = if percent >= 100.0 {
        iced::theme::ProgressBar::Custom(Box::new(crate::gui::theme::ProgressBarCompleted))
    } else {
        iced::theme::ProgressBar::Custom(Box::new(crate::gui::theme::ProgressBarStyle))
    };

    let bar = iced_progress_bar(0.0..=100.0, percent).style(style);

    column![
        bar,
        text(status.to_string())
            .size(12)
            .style(iced::theme::Text::Color(crate::gui::theme::TEXT_SECONDARY)),
    ]
    .spacing(6)
    .into()
}
