//! Extraction strategy registry
//!
//! Picks how entries are pulled out of a listing page. The choice is made
//! once per job: a college registry entry's own strategy wins, then the first
//! `[[site]]` rule whose domain pattern matches the listing URL, then `Auto`.

use crate::config::{parse_selector, SelectorRules, Settings, StrategyKind};
use crate::url::url_matches;
use crate::ConfigError;
use scraper::Selector;
use url::Url;

/// Site-specific CSS selectors, compiled once
#[derive(Debug, Clone)]
pub struct CompiledSelectors {
    pub entry: Selector,
    pub name: Selector,
    pub title: Option<Selector>,
    pub email: Option<Selector>,
    pub profile: Option<Selector>,
    pub next: Option<Selector>,
}

impl CompiledSelectors {
    pub fn compile(rules: &SelectorRules) -> Result<Self, ConfigError> {
        let optional = |s: &Option<String>| s.as_deref().map(parse_selector).transpose();

        Ok(Self {
            entry: parse_selector(&rules.entry)?,
            name: parse_selector(&rules.name)?,
            title: optional(&rules.title)?,
            email: optional(&rules.email)?,
            profile: optional(&rules.profile)?,
            next: optional(&rules.next)?,
        })
    }
}

/// How entries are extracted from a listing page
#[derive(Debug, Clone, Default)]
pub enum ExtractionStrategy {
    /// Table rows and profile-like blocks, in document order
    #[default]
    Auto,
    /// Table rows only
    Table,
    /// Profile-like blocks only
    ProfileBlocks,
    /// Caller-configured selectors
    Selectors(CompiledSelectors),
}

impl ExtractionStrategy {
    /// Builds a strategy from its settings form
    pub fn from_config(
        kind: StrategyKind,
        selectors: Option<&SelectorRules>,
    ) -> Result<Self, ConfigError> {
        match kind {
            StrategyKind::Auto => Ok(Self::Auto),
            StrategyKind::Table => Ok(Self::Table),
            StrategyKind::ProfileBlocks => Ok(Self::ProfileBlocks),
            StrategyKind::Selectors => {
                let rules = selectors.ok_or_else(|| {
                    ConfigError::Validation(
                        "selectors strategy requires a selectors table".to_string(),
                    )
                })?;
                Ok(Self::Selectors(CompiledSelectors::compile(rules)?))
            }
        }
    }

    /// Human-readable strategy name for tracing
    pub fn name(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Table => "table",
            Self::ProfileBlocks => "profile-blocks",
            Self::Selectors(_) => "selectors",
        }
    }
}

#[derive(Debug, Clone)]
struct SiteRule {
    pattern: String,
    strategy: ExtractionStrategy,
}

/// Domain-keyed extraction strategies from `[[site]]` settings
#[derive(Debug, Clone, Default)]
pub struct SiteRegistry {
    rules: Vec<SiteRule>,
}

impl SiteRegistry {
    /// Compiles every `[[site]]` entry, in file order
    pub fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
        let rules = settings
            .sites
            .iter()
            .map(|site| {
                Ok(SiteRule {
                    pattern: site.domain.clone(),
                    strategy: ExtractionStrategy::from_config(
                        site.strategy,
                        site.selectors.as_ref(),
                    )?,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(Self { rules })
    }

    /// Strategy for a listing URL; the first matching rule wins
    pub fn strategy_for(&self, url: &Url) -> ExtractionStrategy {
        self.rules
            .iter()
            .find(|rule| url_matches(&rule.pattern, url))
            .map(|rule| rule.strategy.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
