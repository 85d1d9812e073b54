use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::location::Catalog;
use crate::types::Language;

/// One button per quick code; the callback data is the code itself so the
/// answer goes through the same path as a typed "1".."4".
pub fn create_quick_pick_keyboard(catalog: &Catalog, lang: Language) -> InlineKeyboardMarkup {
    let keyboard: Vec<Vec<InlineKeyboardButton>> = ["1", "2", "3", "4"]
        .iter()
        .filter_map(|code| {
            catalog.quick_pick(code).map(|entry| {
                vec![InlineKeyboardButton::callback(
                    format!("{}. {}", code, entry.display_name(lang)),
                    code.to_string(),
                )]
            })
        })
        .collect();

    InlineKeyboardMarkup::new(keyboard)
}
