//! Bridge configuration
use crate::error::Error;
use anyhow::Context as _;
use unic_langid::LanguageIdentifier;

/// Settings shared by every test case a [`crate::ScenarioBridge`] runs
#[derive(Debug, Clone)]
pub struct BridgeOptions {
    /// Scenarios tagged with this (on the scenario, its rule, or its feature) are skipped. Compared
    /// exactly, without the leading '@'.
    pub ignore_tag: String,
    /// Culture used when a feature declares a language without a region
    pub fallback_culture: LanguageIdentifier,
}

impl BridgeOptions {
    /// Creates a [`BridgeOptionsBuilder`]
    pub fn builder() -> BridgeOptionsBuilder {
        BridgeOptionsBuilder::new()
    }
}

impl Default for BridgeOptions {
    fn default() -> Self {
        Self {
            ignore_tag: String::from("ignore"),
            fallback_culture: unic_langid::langid!("en-US"),
        }
    }
}

/// Builder for [`BridgeOptions`]
pub struct BridgeOptionsBuilder {
    ignore_tag: String,
    fallback_culture: String,
}

impl Default for BridgeOptionsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BridgeOptionsBuilder {
    /// Create a new [`BridgeOptionsBuilder`]
    pub fn new() -> Self {
        Self {
            ignore_tag: String::from("ignore"),
            fallback_culture: String::from("en-US"),
        }
    }

    /// Set the ignore tag. A leading '@' is stripped.
    pub fn ignore_tag<T: Into<String>>(&mut self, tag: T) -> &mut Self {
        let tag = tag.into();
        self.ignore_tag = tag.strip_prefix('@').map(str::to_string).unwrap_or(tag);
        self
    }

    /// Set the fallback culture. Must be region specific, e.g. "en-GB".
    pub fn fallback_culture<T: Into<String>>(&mut self, culture: T) -> &mut Self {
        self.fallback_culture = culture.into();
        self
    }

    /// Create the options
    pub fn build(&self) -> anyhow::Result<BridgeOptions> {
        let fallback_culture: LanguageIdentifier = self
            .fallback_culture
            .parse()
            .map_err(|e| Error::Language {
                language: self.fallback_culture.clone(),
                reason: format!("{}", e),
            })
            .with_context(|| "Bad fallback culture")?;

        if fallback_culture.region.is_none() {
            anyhow::bail!(
                "Fallback culture {:?} must name a region",
                self.fallback_culture
            );
        }

        Ok(BridgeOptions {
            ignore_tag: self.ignore_tag.clone(),
            fallback_culture,
        })
    }
}
