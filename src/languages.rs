//! Target languages offered to users.
//!
//! The list only drives menus and `doctranslate languages`; requests with
//! codes outside it are passed to the provider unchanged.

use serde::Serialize;

/// Target language used when none is chosen.
pub const DEFAULT_TARGET: &str = "te";

/// A selectable language: provider code plus English name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
}

const fn lang(code: &'static str, name: &'static str) -> Language {
    Language { code, name }
}

/// All offered languages, in menu order.
pub static LANGUAGES: [Language; 34] = [
    lang("en", "English"),
    lang("es", "Spanish"),
    lang("fr", "French"),
    lang("de", "German"),
    lang("it", "Italian"),
    lang("pt", "Portuguese"),
    lang("ru", "Russian"),
    lang("ja", "Japanese"),
    lang("ko", "Korean"),
    lang("zh", "Chinese"),
    lang("ar", "Arabic"),
    lang("hi", "Hindi"),
    lang("te", "Telugu"),
    lang("ta", "Tamil"),
    lang("kn", "Kannada"),
    lang("ml", "Malayalam"),
    lang("bn", "Bengali"),
    lang("gu", "Gujarati"),
    lang("mr", "Marathi"),
    lang("pa", "Punjabi"),
    lang("ur", "Urdu"),
    lang("nl", "Dutch"),
    lang("pl", "Polish"),
    lang("tr", "Turkish"),
    lang("vi", "Vietnamese"),
    lang("th", "Thai"),
    lang("id", "Indonesian"),
    lang("cs", "Czech"),
    lang("sv", "Swedish"),
    lang("da", "Danish"),
    lang("fi", "Finnish"),
    lang("no", "Norwegian"),
    lang("he", "Hebrew"),
    lang("uk", "Ukrainian"),
];

/// Look up a language by code, case-insensitively.
pub fn find(code: &str) -> Option<&'static Language> {
    LANGUAGES
        .iter()
        .find(|l| l.code.eq_ignore_ascii_case(code.trim()))
}
