//! Variant B editor.
//!
//! Both layer slots are always editable; there is no active tab. Reset
//! clears the images and transforms and restores the tribe, keeping every
//! other field.

use crate::cards::{BattleCard, BattleField, BattleKind, FieldValue, DEFAULT_TRIBE};
use crate::core::{DecodeError, EditorConfig, InputError};
use crate::decode::{DecodeCompletion, DecodeScheduler, ImageSource};
use crate::export::{ExportOutcome, ExportTrigger, PrintSettings, PrintSurface};
use crate::layers::{Axis, BattleLayer, LayerKey, LayerModel, LayerTransform, PixelTransform};
use crate::render::{render_battle, BattleLayers, RenderTree};
use crate::store::CardStore;

use super::controls::{Choice, Control, ControlKind};

/// One user action on a battle card.
#[derive(Clone, Debug, PartialEq)]
pub enum BattleInput {
    Field(BattleField, FieldValue),
    Position(BattleLayer, Axis, f64),
    Scale(BattleLayer, f64),
    Upload(BattleLayer, ImageSource),
    ClearImage(BattleLayer),
    Reset,
}

/// Editor for a battle card.
#[derive(Debug)]
pub struct BattleEditor {
    store: CardStore<BattleCard>,
    layers: BattleLayers,
    decoder: DecodeScheduler<BattleLayer>,
    export: ExportTrigger,
}

impl Default for BattleEditor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl BattleEditor {
    #[must_use]
    pub fn new(config: EditorConfig) -> Self {
        Self {
            layers: LayerModel::new(&config),
            store: CardStore::new(BattleCard::default(), config),
            decoder: DecodeScheduler::new(),
            export: ExportTrigger::new(PrintSettings::battle()),
        }
    }

    #[must_use]
    pub fn with_print_settings(mut self, settings: PrintSettings) -> Self {
        self.export = ExportTrigger::new(settings);
        self
    }

    #[must_use]
    pub fn card(&self) -> &BattleCard {
        self.store.state()
    }

    #[must_use]
    pub fn store(&self) -> &CardStore<BattleCard> {
        &self.store
    }

    #[must_use]
    pub fn layers(&self) -> &BattleLayers {
        &self.layers
    }

    pub fn apply(&mut self, input: BattleInput) -> Result<(), InputError> {
        match input {
            BattleInput::Field(field, value) => self.store.update_field(field, value)?,
            BattleInput::Position(layer, axis, value) => self.layers.set_position(layer, axis, value)?,
            BattleInput::Scale(layer, value) => self.layers.set_scale(layer, value)?,
            BattleInput::Upload(layer, source) => {
                self.upload(layer, source)?;
            }
            BattleInput::ClearImage(layer) => {
                self.decoder.cancel(layer);
                if self.layers.clear_image(layer).is_some() {
                    log::debug!("{}: image released", layer.name());
                }
            }
            BattleInput::Reset => self.reset(),
        }
        Ok(())
    }

    /// Clear both layers (images, offsets, scales) and restore the tribe.
    ///
    /// Pending decodes are cancelled so they cannot repopulate a slot.
    pub fn reset(&mut self) {
        self.decoder.cancel_all();
        let released = self.layers.reset_all();
        log::debug!("reset: {} image(s) released", released.len());
        // a default tribe always coerces
        if let Err(err) = self.store.update_field(BattleField::Tribe, DEFAULT_TRIBE) {
            log::warn!("reset could not restore tribe: {err}");
        }
    }

    pub fn upload(&mut self, slot: BattleLayer, source: impl Into<ImageSource>) -> Result<u64, DecodeError> {
        self.decoder.start(slot, source)
    }

    /// Attach a finished decode if it is still the latest for its slot.
    ///
    /// `Ok(false)` means the completion was stale. On `Err` the slot keeps
    /// its previous image.
    pub fn apply_completion(&mut self, completion: DecodeCompletion<BattleLayer>) -> Result<bool, DecodeError> {
        let slot = completion.slot;
        match self.decoder.accept(completion) {
            None => Ok(false),
            Some(Ok(image)) => {
                if self.layers.set_image(slot, image).is_some() {
                    log::debug!("{}: previous image released", slot.name());
                }
                Ok(true)
            }
            Some(Err(err)) => {
                log::warn!("{}: decode failed, keeping previous image: {err}", slot.name());
                Err(err)
            }
        }
    }

    pub fn poll(&mut self) -> Vec<DecodeError> {
        let mut errors = Vec::new();
        while let Some(completion) = self.decoder.try_next_completion() {
            if let Err(err) = self.apply_completion(completion) {
                errors.push(err);
            }
        }
        errors
    }

    pub async fn settle(&mut self) -> Vec<DecodeError> {
        let mut errors = Vec::new();
        while let Some(completion) = self.decoder.next_completion().await {
            if let Err(err) = self.apply_completion(completion) {
                errors.push(err);
            }
        }
        errors
    }

    #[must_use]
    pub fn pending_decodes(&self) -> usize {
        self.decoder.pending()
    }

    #[must_use]
    pub fn render(&self) -> RenderTree {
        render_battle(self.store.state(), &self.layers)
    }

    pub fn print(&self, surface: &mut dyn PrintSurface) -> ExportOutcome {
        self.export.trigger(&self.render(), surface)
    }

    /// Controls visible for the current state. Skill cards have no tribe,
    /// attack or hp inputs.
    #[must_use]
    pub fn controls(&self) -> Vec<Control> {
        let card = self.store.state();
        let config = self.store.config();
        let unit = card.kind.is_unit();
        let mut controls = Vec::new();

        controls.push(Control::new(
            "kind",
            "カード種別",
            ControlKind::Tabs {
                choices: BattleKind::ALL
                    .iter()
                    .map(|k| Choice::new(k.key(), k.label()))
                    .collect(),
            },
        ));
        controls.push(Control::text("name", "カード名"));
        if unit {
            controls.push(Control::new(
                "tribe",
                "系統 (最大5文字)",
                ControlKind::Text {
                    max_chars: Some(config.tribe_max_chars),
                },
            ));
        }
        controls.push(Control::new("cost", "コスト", ControlKind::Number));
        if unit {
            controls.push(Control::new("attack", "攻撃力", ControlKind::Number));
            controls.push(Control::new("hp", "HP", ControlKind::Number));
        }
        controls.push(Control::new("description", "テキスト", ControlKind::TextArea));
        controls.push(Control::slider("font_size", "フォントサイズ", config.font_size));

        let position = PixelTransform::position_range(config);
        let scale = PixelTransform::scale_range(config);
        for layer in BattleLayer::ALL {
            let name = layer.name();
            controls.push(Control::image_upload(format!("layer.{name}.image"), layer.label()));
            controls.push(Control::slider(format!("layer.{name}.x"), "X", position));
            controls.push(Control::slider(format!("layer.{name}.y"), "Y", position));
            controls.push(Control::slider(format!("layer.{name}.scale"), "Scale", scale));
        }

        controls.push(Control::button("reset", "リセット"));
        controls.push(Control::button("print", "保存"));
        controls
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::controls::find;
    use crate::layers::ImageHandle;

    #[test]
    fn test_skill_hides_unit_controls() {
        let mut editor = BattleEditor::default();
        assert!(find(&editor.controls(), "tribe").is_some());

        editor
            .apply(BattleInput::Field(BattleField::Kind, BattleKind::Skill.into()))
            .unwrap();
        let controls = editor.controls();
        for hidden in ["tribe", "attack", "hp"] {
            assert!(find(&controls, hidden).is_none(), "{hidden} should be hidden");
        }
        assert!(find(&controls, "cost").is_some());
        assert!(find(&controls, "description").is_some());
    }

    #[test]
    fn test_kind_switch_keeps_values() {
        let mut editor = BattleEditor::default();
        editor.apply(BattleInput::Field(BattleField::Hp, "9".into())).unwrap();
        editor.apply(BattleInput::Field(BattleField::Kind, "skill".into())).unwrap();
        editor.apply(BattleInput::Field(BattleField::Kind, "unit".into())).unwrap();
        assert_eq!(editor.card().hp.as_str(), "9");
    }

    #[test]
    fn test_tribe_control_carries_limit() {
        let editor = BattleEditor::default();
        let tribe = find(&editor.controls(), "tribe").cloned().unwrap();
        assert_eq!(tribe.kind, ControlKind::Text { max_chars: Some(5) });
    }

    #[test]
    fn test_reset_restores_layers_and_tribe_only() {
        let mut editor = BattleEditor::default();
        editor.apply(BattleInput::Field(BattleField::Tribe, "魔法使い".into())).unwrap();
        editor.apply(BattleInput::Field(BattleField::Name, "勇者".into())).unwrap();
        editor.apply(BattleInput::Position(BattleLayer::Art, Axis::X, 120.0)).unwrap();
        editor.apply(BattleInput::Scale(BattleLayer::Background, 3.0)).unwrap();
        editor.layers.set_image(BattleLayer::Art, ImageHandle::from_url("blob:art"));

        editor.apply(BattleInput::Reset).unwrap();

        assert_eq!(editor.card().tribe, DEFAULT_TRIBE);
        assert_eq!(editor.card().name, "勇者");
        for (_, slot) in editor.layers().iter() {
            assert!(slot.is_default());
        }
    }

    #[test]
    fn test_clear_image_keeps_transform() {
        let mut editor = BattleEditor::default();
        editor.layers.set_image(BattleLayer::Background, ImageHandle::from_url("blob:bg"));
        editor.apply(BattleInput::Position(BattleLayer::Background, Axis::X, -40.0)).unwrap();
        editor.apply(BattleInput::ClearImage(BattleLayer::Background)).unwrap();
        assert!(editor.layers().image(BattleLayer::Background).is_none());
        assert_eq!(editor.layers().transform(BattleLayer::Background).x, -40.0);
    }

    #[test]
    fn test_scale_clamped_to_range() {
        let mut editor = BattleEditor::default();
        editor.apply(BattleInput::Scale(BattleLayer::Art, 9.0)).unwrap();
        assert_eq!(editor.layers().transform(BattleLayer::Art).scale, 5.0);
        assert!(editor.apply(BattleInput::Position(BattleLayer::Art, Axis::Y, f64::INFINITY)).is_err());
    }
}
