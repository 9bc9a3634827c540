//! URL input component

use crate::gui::app::Message;
use iced::widget::{button, row, text, text_input};
use iced::{Alignment, Element, Length};

/// Create a URL input field with a clear button. Submitting the field
/// triggers the fetch, same as the button next to it.
pub fn url_input(value: &str, has_error: bool, busy: bool) -> Element<'static, Message> {
    use crate::gui::theme;

    let mut input = text_input("Paste video URL here...", value)
        .padding(15)
        .width(Length::Fill)
        .style(if has_error {
            iced::theme::TextInput::Custom(Box::new(theme::InputErrorStyle))
        } else {
            iced::theme::TextInput::Custom(Box::new(theme::InputStyle))
        });

    if !busy {
        input = input
            .on_input(Message::UrlInputChanged)
            .on_submit(Message::FetchPressed);
    }

    row![
        input,
        button(text("Clear").size(14))
            .on_press(Message::ClearUrlInput)
            .padding([8, 12])
            .style(iced::theme::Button::Custom(Box::new(theme::SecondaryButton))),
    ]
    .spacing(12)
    .align_items(Alignment::Center)
    .into()
}
