//! Quality selection dropdown

use crate::gui::app::Message;
use crate::selector::MenuEntry;
use iced::widget::{column, pick_list, text};
use iced::{Element, Length};

/// Dropdown over the per-tier format menu, lowest resolution first
pub fn quality_menu(
    entries: &[MenuEntry],
    selected: Option<&MenuEntry>,
) -> Element<'static, Message> {
    use crate::gui::theme;

    column![
        text("Quality")
            .size(12)
            .style(iced::theme::Text::Color(theme::GRAY_500)),
        pick_list(entries.to_vec(), selected.cloned(), Message::QualityPicked)
            .placeholder("Select a quality...")
            .text_size(14)
            .padding([10, 14])
            .width(Length::Fill),
    ]
    .spacing(6)
    .into()
}
