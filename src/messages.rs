//! User-facing messages
//!
//! Localized text shown when a request fails. Italian is the default, matching
//! the language of the model the service usually runs.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::client::ClientError;

/// Language of user-facing messages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    It,
    En,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "it" | "ita" | "italian" => Ok(Locale::It),
            "en" | "eng" | "english" => Ok(Locale::En),
            other => Err(format!("Unknown locale: {}. Use: it, en", other)),
        }
    }
}

/// Message shown when the input text lacks the mask marker
pub fn missing_mask(locale: Locale) -> &'static str {
    match locale {
        Locale::It => "Il testo deve contenere la maschera [MASK]",
        Locale::En => "The text must contain the [MASK] marker",
    }
}

/// Message shown for any other failure
pub fn unknown_error(locale: Locale, error: &dyn std::fmt::Display) -> String {
    match locale {
        Locale::It => format!("Errore sconosciuto {}", error),
        Locale::En => format!("Unknown error {}", error),
    }
}

/// Message for a failed request, as presented to the user
pub fn for_error(locale: Locale, error: &ClientError) -> String {
    match error {
        ClientError::MissingMask => missing_mask(locale).to_string(),
        other => unknown_error(locale, other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_mask_message() {
        assert_eq!(
            for_error(Locale::It, &ClientError::MissingMask),
            "Il testo deve contenere la maschera [MASK]"
        );
        assert_eq!(
            for_error(Locale::En, &ClientError::MissingMask),
            "The text must contain the [MASK] marker"
        );
    }

    #[test]
    fn test_generic_message() {
        let err = ClientError::Api {
            status: 500,
            message: "Internal Server Error".to_string(),
        };
        let msg = for_error(Locale::It, &err);
        assert!(msg.starts_with("Errore sconosciuto "));
        assert!(msg.contains("500"));
        assert!(!msg.contains("[MASK]"));
    }

    #[test]
    fn test_locale_parse() {
        assert_eq!("IT".parse::<Locale>(), Ok(Locale::It));
        assert_eq!("english".parse::<Locale>(), Ok(Locale::En));
        assert!("fr".parse::<Locale>().is_err());
    }
}
