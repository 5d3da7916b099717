//! UI Builder module for creating keyboards and formatting messages

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, ParseMode};

use crate::localization::{t_args_lang, t_lang};

use super::callback_handler::MenuAction;

/// Portfolio sites shown under the "cases" button
pub const CASES: &[&str] = &[
    "https://marinadevyatova.ru",
    "https://netievskiy.pro/",
    "https://gusinayalapka.ru",
    "https://cleanbox96.ru/",
    "https://grosko-realty.ru/",
    "https://svetron.pro/",
    "https://iqlabmoscow.ru/",
    "https://tkreka.ru/",
    "https://Katehunter.ru",
    "https://homecleaning.site/",
    "https://belka.team/",
    "https://semerukhinarealty.ru/",
    "https://elkamult.ru/",
    "https://mk-logic.ru",
    "https://usa-baby.us/",
    "https://gastromarketreka.ru/",
    "https://evabrick.ru",
    "https://rus-village.ru/",
    "https://vesnastom.ru/",
    "https://vbg-group.ru/",
    "https://yurchenko-vladimir.ru",
    "https://choosyrecruitment.com",
    "https://voskresenie.band",
    "https://comofissnab.ru",
];

pub const CONTACT_LINK: &str = "https://t.me/RA_PIRANIA";

/// Text and markup of one outgoing message
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub text: String,
    pub keyboard: Option<InlineKeyboardMarkup>,
    pub parse_mode: Option<ParseMode>,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: None,
            parse_mode: None,
        }
    }

    pub fn with_keyboard(mut self, keyboard: InlineKeyboardMarkup) -> Self {
        self.keyboard = Some(keyboard);
        self
    }

    pub fn markdown(mut self) -> Self {
        self.parse_mode = Some(ParseMode::MarkdownV2);
        self
    }
}

fn menu_button(action: MenuAction, language_code: Option<&str>) -> InlineKeyboardButton {
    let key = match action {
        MenuAction::Cases => "button-cases",
        MenuAction::Contact => "button-contact",
        MenuAction::Back => "button-back",
    };
    InlineKeyboardButton::callback(t_lang(key, language_code), action.callback_data())
}

/// "Cases" and "Contact" side by side
pub fn main_menu_keyboard(language_code: Option<&str>) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        menu_button(MenuAction::Cases, language_code),
        menu_button(MenuAction::Contact, language_code),
    ]])
}

pub fn back_keyboard(language_code: Option<&str>) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![menu_button(MenuAction::Back, language_code)]])
}

pub fn welcome_text(language_code: Option<&str>) -> String {
    t_lang("welcome", language_code)
}

pub fn cases_text(language_code: Option<&str>) -> String {
    let mut text = t_lang("cases-title", language_code);
    for url in CASES {
        text.push_str(&format!("\n– {url}"));
    }
    text
}

pub fn contact_text(language_code: Option<&str>) -> String {
    t_args_lang("contact-text", &[("link", CONTACT_LINK)], language_code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cases_text_lists_every_site() {
        let text = cases_text(None);
        assert!(text.starts_with("Список кейсов:\n"));
        assert_eq!(text.lines().count(), CASES.len() + 1);
        assert!(text.contains("\n– https://voskresenie.band"));
    }

    #[test]
    fn test_contact_text_contains_link() {
        assert_eq!(contact_text(None), format!("Связаться со мной: {CONTACT_LINK}"));
    }

    #[test]
    fn test_main_menu_has_one_row_with_two_buttons() {
        let keyboard = main_menu_keyboard(None);
        assert_eq!(keyboard.inline_keyboard.len(), 1);
        assert_eq!(keyboard.inline_keyboard[0].len(), 2);
        assert_eq!(keyboard.inline_keyboard[0][0].text, "Кейсы");
        assert_eq!(keyboard.inline_keyboard[0][1].text, "Связаться");
    }
}
