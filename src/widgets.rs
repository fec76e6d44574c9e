//! Declarative form widgets for a host notebook.
//!
//! Nothing here draws anything. Each constructor returns a [`Widget`]
//! descriptor that serialises to the ipywidgets-style JSON state a notebook
//! front end renders (`HTMLModel`, `TextareaModel`, `ButtonModel`). Event
//! wiring is the host's business.

use crate::proposal::ProposalSection;
use serde::{Deserialize, Serialize};

/// Default text-area width.
pub const DEFAULT_TEXT_AREA_WIDTH: &str = "80%";
/// Default text-area height.
pub const DEFAULT_TEXT_AREA_HEIGHT: &str = "100px";

/// Size of a widget as CSS lengths. `None` leaves it to the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
}

/// Predefined button colour scheme. The default style is the empty string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonStyle {
    Primary,
    Success,
    Info,
    Warning,
    Danger,
}

impl ButtonStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            ButtonStyle::Primary => "primary",
            ButtonStyle::Success => "success",
            ButtonStyle::Info => "info",
            ButtonStyle::Warning => "warning",
            ButtonStyle::Danger => "danger",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "primary" => Some(ButtonStyle::Primary),
            "success" => Some(ButtonStyle::Success),
            "info" => Some(ButtonStyle::Info),
            "warning" => Some(ButtonStyle::Warning),
            "danger" => Some(ButtonStyle::Danger),
            _ => None,
        }
    }
}

/// A widget descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "_model_name")]
pub enum Widget {
    /// Raw HTML output.
    #[serde(rename = "HTMLModel")]
    Html { value: String },

    /// Editable multi-line text input.
    #[serde(rename = "TextareaModel")]
    Textarea {
        description: String,
        placeholder: String,
        #[serde(default)]
        value: String,
        layout: Layout,
    },

    /// Clickable control.
    #[serde(rename = "ButtonModel")]
    Button {
        description: String,
        #[serde(with = "button_style_serde")]
        button_style: Option<ButtonStyle>,
    },
}

/// ipywidgets encodes "no style" as `""`.
mod button_style_serde {
    use super::ButtonStyle;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(style: &Option<ButtonStyle>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(style.map(ButtonStyle::as_str).unwrap_or(""))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<ButtonStyle>, D::Error> {
        let raw = String::deserialize(d)?;
        if raw.is_empty() {
            return Ok(None);
        }
        ButtonStyle::parse(&raw)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown button style '{raw}'")))
    }
}

/// Optional text-area dimensions; unset fields take the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextAreaOptions {
    pub width: Option<String>,
    pub height: Option<String>,
}

impl TextAreaOptions {
    pub fn width(mut self, width: impl Into<String>) -> Self {
        self.width = Some(width.into());
        self
    }

    pub fn height(mut self, height: impl Into<String>) -> Self {
        self.height = Some(height.into());
        self
    }
}

/// `<h2>` heading for a form section.
pub fn create_section_heading(title: &str) -> Widget {
    Widget::Html {
        value: format!("<h2>{title}</h2>"),
    }
}

/// Text area at the default 80% × 100px size.
pub fn create_text_area(description: &str, placeholder: &str) -> Widget {
    create_text_area_with(description, placeholder, TextAreaOptions::default())
}

/// Text area with explicit dimensions.
pub fn create_text_area_with(
    description: &str,
    placeholder: &str,
    options: TextAreaOptions,
) -> Widget {
    Widget::Textarea {
        description: description.to_string(),
        placeholder: placeholder.to_string(),
        value: String::new(),
        layout: Layout {
            width: Some(
                options
                    .width
                    .unwrap_or_else(|| DEFAULT_TEXT_AREA_WIDTH.to_string()),
            ),
            height: Some(
                options
                    .height
                    .unwrap_or_else(|| DEFAULT_TEXT_AREA_HEIGHT.to_string()),
            ),
        },
    }
}

pub fn create_button(description: &str, button_style: Option<ButtonStyle>) -> Widget {
    Widget::Button {
        description: description.to_string(),
        button_style,
    }
}

/// The full linear form, top to bottom: header inputs, then per section a
/// heading, a notes area and a "Generate" button, then the final
/// "Create Proposal" button.
pub fn proposal_form() -> Vec<Widget> {
    let mut form = vec![
        create_section_heading("Proposal Details"),
        create_text_area_with(
            "Title:",
            "Enter the proposal title",
            TextAreaOptions::default().height("40px"),
        ),
        create_text_area_with(
            "Customer:",
            "Enter the customer name",
            TextAreaOptions::default().height("40px"),
        ),
        create_text_area_with(
            "Salesperson:",
            "Enter your name",
            TextAreaOptions::default().height("40px"),
        ),
        create_text_area_with(
            "Date:",
            "e.g. March 3, 2024",
            TextAreaOptions::default().height("40px"),
        ),
    ];

    for section in ProposalSection::ALL {
        form.push(create_section_heading(section.heading()));
        form.push(create_text_area(
            "Notes:",
            &format!("Key points for the {} section", section.heading().to_lowercase()),
        ));
        form.push(create_button(
            &format!("Generate {}", section.heading()),
            Some(ButtonStyle::Info),
        ));
    }

    form.push(create_button("Create Proposal", Some(ButtonStyle::Success)));
    form
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn heading_wraps_title_in_h2() {
        assert_eq!(
            create_section_heading("Benefits"),
            Widget::Html {
                value: "<h2>Benefits</h2>".into()
            }
        );
    }

    #[test]
    fn text_area_defaults() {
        match create_text_area("Summary:", "Type here") {
            Widget::Textarea {
                description,
                placeholder,
                layout,
                ..
            } => {
                assert_eq!(description, "Summary:");
                assert_eq!(placeholder, "Type here");
                assert_eq!(layout.width.as_deref(), Some("80%"));
                assert_eq!(layout.height.as_deref(), Some("100px"));
            }
            other => panic!("expected Textarea, got {other:?}"),
        }
    }

    #[test]
    fn text_area_partial_override_keeps_other_default() {
        match create_text_area_with("A", "B", TextAreaOptions::default().height("200px")) {
            Widget::Textarea { layout, .. } => {
                assert_eq!(layout.width.as_deref(), Some("80%"));
                assert_eq!(layout.height.as_deref(), Some("200px"));
            }
            other => panic!("expected Textarea, got {other:?}"),
        }
    }

    #[test]
    fn button_without_style_serialises_empty() {
        let value = serde_json::to_value(create_button("Go", None)).unwrap();
        assert_eq!(
            value,
            json!({"_model_name": "ButtonModel", "description": "Go", "button_style": ""})
        );
    }

    #[test]
    fn button_style_round_trips_through_json() {
        let button = create_button("Save", Some(ButtonStyle::Success));
        let text = serde_json::to_string(&button).unwrap();
        assert!(text.contains("\"button_style\":\"success\""));
        assert_eq!(serde_json::from_str::<Widget>(&text).unwrap(), button);
    }

    #[test]
    fn unknown_button_style_is_rejected() {
        let raw = r#"{"_model_name":"ButtonModel","description":"x","button_style":"neon"}"#;
        assert!(serde_json::from_str::<Widget>(raw).is_err());
    }

    #[test]
    fn form_has_one_generate_button_per_section() {
        let form = proposal_form();
        let generate = form
            .iter()
            .filter(|w| matches!(w, Widget::Button { description, .. } if description.starts_with("Generate ")))
            .count();
        assert_eq!(generate, ProposalSection::ALL.len());
        assert_eq!(
            form.last(),
            Some(&create_button("Create Proposal", Some(ButtonStyle::Success)))
        );
    }
}
