//! # Localization Tests
//!
//! This module contains unit tests for the localization functionality,
//! testing message retrieval and formatting with various edge cases.

use pirania_bot::localization::{t_args_lang, t_lang, LocalizationManager};
use std::collections::HashMap;

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_localization() -> LocalizationManager {
        LocalizationManager::new()
    }

    #[test]
    fn test_get_message_existing_key() {
        let manager = setup_localization();

        let message = manager.get_message_in_language("button-cases", "ru", None);
        assert_eq!(message, "Кейсы");

        let message = manager.get_message_in_language("button-cases", "en", None);
        assert_eq!(message, "Case studies");
    }

    #[test]
    fn test_get_message_nonexistent_key() {
        let manager = setup_localization();

        let message = manager.get_message_in_language("nonexistent-key", "ru", None);
        assert_eq!(message, "Missing translation: nonexistent-key");
    }

    #[test]
    fn test_get_message_unsupported_language() {
        let manager = setup_localization();

        let message = manager.get_message_in_language("button-back", "de", None);
        // Should fall back to Russian
        assert_eq!(message, "Назад");
    }

    #[test]
    fn test_get_message_with_args() {
        let manager = setup_localization();

        let mut args = HashMap::new();
        args.insert("link", "https://t.me/example");

        let message = manager.get_message_in_language("contact-text", "ru", Some(&args));
        assert_eq!(message, "Связаться со мной: https://t.me/example");
    }

    #[test]
    fn test_arguments_are_not_wrapped_in_isolation_marks() {
        let message = t_args_lang("contact-text", &[("link", "X")], None);
        assert!(!message.contains('\u{2068}'));
        assert!(!message.contains('\u{2069}'));
    }

    #[test]
    fn test_resolve_language() {
        assert_eq!(LocalizationManager::resolve_language(None), "ru");
        assert_eq!(LocalizationManager::resolve_language(Some("ru")), "ru");
        assert_eq!(LocalizationManager::resolve_language(Some("en")), "en");
        assert_eq!(LocalizationManager::resolve_language(Some("EN-gb")), "en");
        assert_eq!(LocalizationManager::resolve_language(Some("uk")), "ru");
    }

    #[test]
    fn test_welcome_keeps_paragraphs() {
        let welcome = t_lang("welcome", None);

        assert!(welcome.starts_with("👋 Добро пожаловать в PIRANIA!\n\n"));
        assert!(welcome.contains("🌐 https://ra-pirania.ru\n🌐 https://pirania-ra.ru"));
        assert!(welcome.ends_with("💬 Напишите, что Вам нужно — мы на связи!"));
    }

    #[test]
    fn test_every_russian_key_has_english_translation() {
        let manager = setup_localization();

        for key in [
            "welcome",
            "button-cases",
            "button-contact",
            "button-back",
            "cases-title",
            "contact-text",
            "getid-usage",
            "getid-result",
            "getid-failed",
        ] {
            let message = manager.get_message_in_language(key, "en", None);
            assert!(!message.starts_with("Missing translation"), "missing en key {key}");
        }
    }
}
