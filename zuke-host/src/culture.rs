//! Feature culture resolution
//!
//! Runners bind steps against a region-specific culture. Features usually declare only a language
//! ("en", "de"), so a neutral tag is replaced by a fixed fallback culture.

use crate::error::Error;
use unic_langid::LanguageIdentifier;

/// Resolve the culture for a feature's declared language. A tag without a region is neutral and
/// yields `fallback`; a region-specific tag is used as is.
pub fn feature_culture(
    language: &str,
    fallback: &LanguageIdentifier,
) -> Result<LanguageIdentifier, Error> {
    let culture: LanguageIdentifier = language.parse().map_err(|e| Error::Language {
        language: language.to_string(),
        reason: format!("{}", e),
    })?;

    if culture.region.is_none() {
        Ok(fallback.clone())
    } else {
        Ok(culture)
    }
}
