//! Action objects: what the bot does when a user taps a button, image,
//! or quick reply.
//!
//! # Example
//!
//! ```rust
//! use linebot_model::Action;
//!
//! let yes = Action::postback("Yes", "answer=yes");
//! let json = serde_json::to_value(&yes).unwrap();
//! assert_eq!(json["type"], "postback");
//! assert_eq!(json["data"], "answer=yes");
//! ```

use serde::{Deserialize, Serialize};
use time::format_description::BorrowedFormatItem;
use time::macros::{format_description, offset};
use time::{OffsetDateTime, UtcOffset};

/// An action attached to an interactive element.
///
/// `label` is shown on buttons and quick replies (max 20 characters).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum Action {
    /// Returns a postback event carrying `data` through the webhook.
    Postback {
        label: String,
        /// Max 300 characters.
        data: String,
        /// Shown in the chat as the user's message.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        display_text: Option<String>,
    },
    /// Sends `text` as a message from the user.
    Message { label: String, text: String },
    /// Opens `uri`.
    Uri { label: String, uri: String },
    /// Opens a date/time picker and returns the choice in a postback event.
    #[serde(rename = "datetimepicker")]
    DatetimePicker {
        label: String,
        data: String,
        mode: DatetimePickerMode,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        initial: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<String>,
    },
    /// Opens the camera. Quick replies only.
    Camera { label: String },
    /// Opens the camera roll. Quick replies only.
    CameraRoll { label: String },
    /// Opens the location screen. Quick replies only.
    Location { label: String },
}

impl Action {
    pub fn postback(label: impl Into<String>, data: impl Into<String>) -> Self {
        Action::Postback {
            label: label.into(),
            data: data.into(),
            display_text: None,
        }
    }

    pub fn message(label: impl Into<String>, text: impl Into<String>) -> Self {
        Action::Message {
            label: label.into(),
            text: text.into(),
        }
    }

    pub fn uri(label: impl Into<String>, uri: impl Into<String>) -> Self {
        Action::Uri {
            label: label.into(),
            uri: uri.into(),
        }
    }

    pub fn datetime_picker(
        label: impl Into<String>,
        data: impl Into<String>,
        mode: DatetimePickerMode,
    ) -> Self {
        Action::DatetimePicker {
            label: label.into(),
            data: data.into(),
            mode,
            initial: None,
            max: None,
            min: None,
        }
    }

    /// Returns the action's label.
    pub fn label(&self) -> &str {
        match self {
            Action::Postback { label, .. }
            | Action::Message { label, .. }
            | Action::Uri { label, .. }
            | Action::DatetimePicker { label, .. }
            | Action::Camera { label }
            | Action::CameraRoll { label }
            | Action::Location { label } => label,
        }
    }
}

/// What a date/time picker lets the user choose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatetimePickerMode {
    Date,
    Time,
    Datetime,
}

/// Offset used for picker values. Japan has no daylight saving time.
const JST: UtcOffset = offset!(+9);

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const TIME_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[hour]:[minute]");
const DATETIME_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]");

impl DatetimePickerMode {
    /// Formats `at` in Japan Standard Time for use as `initial`, `max` or `min`.
    ///
    /// Accepted ranges are 1900-01-01 to 2100-12-31 for dates and 00:00 to
    /// 23:59 for times; the platform rejects values outside them.
    pub fn format(self, at: OffsetDateTime) -> String {
        let local = at.to_offset(JST);
        let format = match self {
            DatetimePickerMode::Date => DATE_FORMAT,
            DatetimePickerMode::Time => TIME_FORMAT,
            DatetimePickerMode::Datetime => DATETIME_FORMAT,
        };
        // Only fails for components missing from the value, which a full
        // OffsetDateTime always has.
        local.format(format).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use time::macros::datetime;

    #[test]
    fn test_action_wire_names() {
        let cases = [
            (Action::postback("a", "d"), "postback"),
            (Action::message("a", "t"), "message"),
            (Action::uri("a", "https://example.com"), "uri"),
            (
                Action::datetime_picker("a", "d", DatetimePickerMode::Date),
                "datetimepicker",
            ),
            (Action::Camera { label: "a".into() }, "camera"),
            (Action::CameraRoll { label: "a".into() }, "cameraRoll"),
            (Action::Location { label: "a".into() }, "location"),
        ];
        for (action, expected) in cases {
            assert_eq!(serde_json::to_value(&action).unwrap()["type"], expected);
            assert_eq!(action.label(), "a");
        }
    }

    #[test]
    fn test_postback_display_text() {
        let mut action = Action::postback("Buy", "action=buy&itemid=111");
        assert_eq!(
            serde_json::to_value(&action).unwrap(),
            json!({"type": "postback", "label": "Buy", "data": "action=buy&itemid=111"})
        );

        if let Action::Postback { display_text, .. } = &mut action {
            *display_text = Some("Buy".into());
        }
        assert_eq!(serde_json::to_value(&action).unwrap()["displayText"], "Buy");
    }

    #[test]
    fn test_datetime_picker_serialization() {
        let at = datetime!(2024-03-01 15:30 UTC);
        let mut action = Action::datetime_picker("When", "pick", DatetimePickerMode::Datetime);
        if let Action::DatetimePicker { initial, .. } = &mut action {
            *initial = Some(DatetimePickerMode::Datetime.format(at));
        }

        assert_eq!(
            serde_json::to_value(&action).unwrap(),
            json!({
                "type": "datetimepicker",
                "label": "When",
                "data": "pick",
                "mode": "datetime",
                "initial": "2024-03-02T00:30"
            })
        );
    }

    #[test]
    fn test_picker_formats_in_jst() {
        let at = datetime!(2023-12-31 20:05 UTC);
        assert_eq!(DatetimePickerMode::Date.format(at), "2024-01-01");
        assert_eq!(DatetimePickerMode::Time.format(at), "05:05");
        assert_eq!(DatetimePickerMode::Datetime.format(at), "2024-01-01T05:05");
    }

    #[test]
    fn test_action_deserialize() {
        let action: Action =
            serde_json::from_value(json!({"type": "uri", "label": "Go", "uri": "https://line.me"}))
                .unwrap();
        assert_eq!(action, Action::uri("Go", "https://line.me"));
    }
}
