//! Read-only mock content the screens display.
//!
//! The catalog is parsed and validated once at load. Downstream code reads
//! typed records and never inspects raw JSON.

use std::num::NonZeroUsize;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::effect::Notice;
use crate::error::ContentError;

const BUILTIN_CATALOG: &str = include_str!("../content/catalog.json");

/// One page of the first-run introduction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OnboardingSlide {
    pub title: String,
    pub description: String,
    /// Hero image URL (loading and fallback are the display layer's job).
    pub image: String,
    /// Small print under the description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<String>,
}

/// An item shown in the assistant's suggestion carousel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StyleSuggestion {
    pub brand: String,
    pub item: String,
    pub price: String,
}

/// Texts for [`Notice`] acknowledgements.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NoticeTexts {
    pub upload_shared: String,
    pub insight_tapped: String,
}

/// Everything the prototype displays that is not navigation state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Catalog {
    pub brand: String,
    pub tagline: String,
    pub slides: Vec<OnboardingSlide>,
    pub continue_label: String,
    pub finish_label: String,
    pub skip_label: String,
    /// Seed message of every fresh assistant transcript.
    pub greeting: String,
    /// The scripted assistant acknowledgement.
    pub canned_reply: String,
    #[serde(default)]
    pub quick_prompts: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<StyleSuggestion>,
    /// Chips above the Explore post grid.
    #[serde(default)]
    pub hashtags: Vec<String>,
    pub notices: NoticeTexts,
}

impl Catalog {
    /// The catalog compiled into the binary.
    pub fn builtin() -> Result<Self, ContentError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Parse and validate a catalog from JSON text.
    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Read, parse and validate a catalog file.
    pub async fn load(path: &Path) -> Result<Self, ContentError> {
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ContentError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        let catalog = Self::from_json(&json)?;
        tracing::info!(path = %path.display(), slides = catalog.slides.len(), "Loaded catalog");
        Ok(catalog)
    }

    fn validate(&self) -> Result<(), ContentError> {
        if self.slides.is_empty() {
            return Err(ContentError::NoSlides);
        }
        for (i, slide) in self.slides.iter().enumerate() {
            require(&slide.title, || format!("slides[{i}].title"))?;
        }
        for (i, tag) in self.hashtags.iter().enumerate() {
            require(tag, || format!("hashtags[{i}]"))?;
        }
        require(&self.greeting, || "greeting".to_string())?;
        require(&self.canned_reply, || "canned_reply".to_string())?;
        require(&self.notices.upload_shared, || "notices.upload_shared".to_string())?;
        require(&self.notices.insight_tapped, || "notices.insight_tapped".to_string())?;
        Ok(())
    }

    /// Number of onboarding steps. Never zero for a validated catalog.
    pub fn slide_count(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.slides.len()).unwrap_or(NonZeroUsize::MIN)
    }

    /// Text shown for a notice.
    pub fn notice_text(&self, notice: Notice) -> &str {
        match notice {
            Notice::UploadShared => &self.notices.upload_shared,
            Notice::InsightTapped => &self.notices.insight_tapped,
        }
    }
}

fn require(value: &str, field: impl FnOnce() -> String) -> Result<(), ContentError> {
    if value.trim().is_empty() {
        Err(ContentError::EmptyField { field: field() })
    } else {
        Ok(())
    }
}
