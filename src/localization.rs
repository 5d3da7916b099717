use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource, FluentValue};
use std::collections::HashMap;
use std::sync::LazyLock;
use unic_langid::LanguageIdentifier;

const RU_MESSAGES: &str = include_str!("../locales/ru/main.ftl");
const EN_MESSAGES: &str = include_str!("../locales/en/main.ftl");

/// Language used when the client reports nothing we have a bundle for
pub const DEFAULT_LANGUAGE: &str = "ru";

/// Localization manager for the bot
pub struct LocalizationManager {
    bundles: HashMap<&'static str, FluentBundle<FluentResource>>,
}

impl LocalizationManager {
    /// Create a localization manager with every bundled language loaded
    pub fn new() -> Self {
        let mut bundles = HashMap::new();
        bundles.insert("ru", Self::create_bundle("ru", RU_MESSAGES));
        bundles.insert("en", Self::create_bundle("en", EN_MESSAGES));
        Self { bundles }
    }

    fn create_bundle(locale: &str, source: &str) -> FluentBundle<FluentResource> {
        let langid: LanguageIdentifier = locale.parse().unwrap_or_default();
        let mut bundle = FluentBundle::new_concurrent(vec![langid]);
        // Telegram renders the isolation marks as visible garbage
        bundle.set_use_isolating(false);

        let resource = match FluentResource::try_new(source.to_string()) {
            Ok(resource) => resource,
            Err((resource, errors)) => {
                tracing::warn!(locale, errors = ?errors, "Fluent resource has syntax errors");
                resource
            }
        };
        if let Err(errors) = bundle.add_resource(resource) {
            tracing::warn!(locale, errors = ?errors, "Failed to add Fluent resource");
        }

        bundle
    }

    /// Map a Telegram language code onto one of the bundled languages
    pub fn resolve_language(language_code: Option<&str>) -> &'static str {
        match language_code {
            Some(code) if code.to_ascii_lowercase().starts_with("en") => "en",
            _ => DEFAULT_LANGUAGE,
        }
    }

    /// Get a localized message in a specific language
    pub fn get_message_in_language(
        &self,
        key: &str,
        language: &str,
        args: Option<&HashMap<&str, &str>>,
    ) -> String {
        let bundle = match self
            .bundles
            .get(language)
            .or_else(|| self.bundles.get(DEFAULT_LANGUAGE))
        {
            Some(bundle) => bundle,
            None => return format!("Missing translation: {key}"),
        };

        let pattern = match bundle.get_message(key).and_then(|msg| msg.value()) {
            Some(pattern) => pattern,
            None => return format!("Missing translation: {key}"),
        };

        let fluent_args = args.map(|args| {
            let mut fluent_args = FluentArgs::new();
            for (name, value) in args {
                fluent_args.set(*name, FluentValue::from(*value));
            }
            fluent_args
        });

        let mut errors = vec![];
        let value = bundle.format_pattern(pattern, fluent_args.as_ref(), &mut errors);
        if !errors.is_empty() {
            tracing::debug!(key, errors = ?errors, "Fluent formatting reported errors");
        }

        value.into_owned()
    }
}

impl Default for LocalizationManager {
    fn default() -> Self {
        Self::new()
    }
}

static LOCALIZATION_MANAGER: LazyLock<LocalizationManager> = LazyLock::new(LocalizationManager::new);

/// Get a localized message for the client's language code
pub fn t_lang(key: &str, language_code: Option<&str>) -> String {
    LOCALIZATION_MANAGER.get_message_in_language(
        key,
        LocalizationManager::resolve_language(language_code),
        None,
    )
}

/// Get a localized message with arguments for the client's language code
pub fn t_args_lang(key: &str, args: &[(&str, &str)], language_code: Option<&str>) -> String {
    let args: HashMap<&str, &str> = args.iter().cloned().collect();
    LOCALIZATION_MANAGER.get_message_in_language(
        key,
        LocalizationManager::resolve_language(language_code),
        Some(&args),
    )
}
