//! Template message payloads.
//!
//! A template is embedded in [`MessageContent::Template`](crate::MessageContent::Template)
//! together with an `altText` shown on clients that cannot render it.

use serde::{Deserialize, Serialize};

use crate::action::Action;

/// A template object, discriminated by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "snake_case",
    rename_all_fields = "camelCase"
)]
pub enum Template {
    /// Image, title, text and up to 4 action buttons.
    Buttons {
        /// Max 160 characters, or 60 with an image or title.
        text: String,
        actions: Vec<Action>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default_action: Option<Action>,
        /// Max 40 characters.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        /// RGB, e.g. "#FFFFFF".
        #[serde(default, skip_serializing_if = "Option::is_none")]
        image_background_color: Option<String>,
        /// "cover" or "contain".
        #[serde(default, skip_serializing_if = "Option::is_none")]
        image_size: Option<String>,
        /// "rectangle" or "square".
        #[serde(default, skip_serializing_if = "Option::is_none")]
        image_aspect_ratio: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        thumbnail_image_url: Option<String>,
    },
    /// Text and exactly two action buttons.
    Confirm {
        /// Max 240 characters.
        text: String,
        actions: Vec<Action>,
    },
    /// Horizontally scrollable columns (max 10).
    Carousel {
        columns: Vec<CarouselColumn>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        image_aspect_ratio: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        image_size: Option<String>,
    },
    /// Horizontally scrollable images (max 10).
    ImageCarousel { columns: Vec<ImageCarouselColumn> },
}

impl Template {
    /// Creates a buttons template with only the required fields.
    pub fn buttons(text: impl Into<String>, actions: Vec<Action>) -> Self {
        Template::Buttons {
            text: text.into(),
            actions,
            default_action: None,
            title: None,
            image_background_color: None,
            image_size: None,
            image_aspect_ratio: None,
            thumbnail_image_url: None,
        }
    }

    /// Creates a confirm template.
    pub fn confirm(text: impl Into<String>, yes: Action, no: Action) -> Self {
        Template::Confirm {
            text: text.into(),
            actions: vec![yes, no],
        }
    }

    /// Creates a carousel template.
    pub fn carousel(columns: Vec<CarouselColumn>) -> Self {
        Template::Carousel {
            columns,
            image_aspect_ratio: None,
            image_size: None,
        }
    }
}

/// A column of a carousel template.
///
/// All columns should have the same number of actions and the same
/// presence of image and title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselColumn {
    /// Max 120 characters, or 60 with an image or title.
    pub text: String,
    /// Max 3.
    pub actions: Vec<Action>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_action: Option<Action>,
}

impl CarouselColumn {
    pub fn new(text: impl Into<String>, actions: Vec<Action>) -> Self {
        Self {
            text: text.into(),
            actions,
            title: None,
            thumbnail_image_url: None,
            image_background_color: None,
            default_action: None,
        }
    }
}

/// A column of an image carousel template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageCarouselColumn {
    pub image_url: String,
    pub action: Action,
}
