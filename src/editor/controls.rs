//! Control descriptors: what the input surface should show right now.
//!
//! Editors rebuild the list from current state on every call, so a control
//! that does not apply (a skill card's hp, the add-attack button at the
//! cap) is simply absent.

use serde::{Deserialize, Serialize};

use crate::core::{EnergyType, SliderRange};

/// One `value`/`label` pair of a selector.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub value: String,
    pub label: String,
}

impl Choice {
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Widget kind plus its constraints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ControlKind {
    Text {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_chars: Option<usize>,
    },
    TextArea,
    /// Free text expected to hold a number.
    Number,
    Slider(SliderRange),
    Toggle,
    Select { choices: Vec<Choice> },
    Tabs { choices: Vec<Choice> },
    Color,
    File { accept: String },
    Button,
}

/// One visible control.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Control {
    /// Stable dotted path, e.g. `attack.7.name` or `layer.art.scale`.
    pub id: String,
    pub label: String,
    #[serde(flatten)]
    pub kind: ControlKind,
}

impl Control {
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>, kind: ControlKind) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
        }
    }

    #[must_use]
    pub fn text(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, label, ControlKind::Text { max_chars: None })
    }

    #[must_use]
    pub fn slider(id: impl Into<String>, label: impl Into<String>, range: SliderRange) -> Self {
        Self::new(id, label, ControlKind::Slider(range))
    }

    #[must_use]
    pub fn button(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, label, ControlKind::Button)
    }

    #[must_use]
    pub fn image_upload(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(
            id,
            label,
            ControlKind::File {
                accept: "image/*".to_string(),
            },
        )
    }
}

/// Selector over the energy table, in table order.
#[must_use]
pub fn energy_choices() -> Vec<Choice> {
    EnergyType::ALL
        .iter()
        .map(|e| Choice::new(e.key(), e.label()))
        .collect()
}

/// Look up a control by id.
#[must_use]
pub fn find<'a>(controls: &'a [Control], id: &str) -> Option<&'a Control> {
    controls.iter().find(|c| c.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_energy_choices_follow_table() {
        let choices = energy_choices();
        assert_eq!(choices.len(), 9);
        assert_eq!(choices[0], Choice::new("GRASS", "草"));
        assert_eq!(choices[8], Choice::new("COLORLESS", "無"));
    }

    #[test]
    fn test_control_serializes_flat() {
        let control = Control::slider("layer.art.scale", "拡大", SliderRange::new(10.0, 800.0, 1.0));
        let json = serde_json::to_value(&control).unwrap();
        assert_eq!(json["kind"], "slider");
        assert_eq!(json["max"], 800.0);
        assert_eq!(json["id"], "layer.art.scale");
    }

    #[test]
    fn test_find() {
        let controls = vec![Control::text("name", "名前"), Control::button("print", "保存")];
        assert!(find(&controls, "print").is_some());
        assert!(find(&controls, "hp").is_none());
    }
}
