//! Variant A editor.
//!
//! Owns the card store, the three layer slots and the active layer tab.
//! Slider and upload inputs target the active tab. Uploads decode in the
//! background; call [`CollectibleEditor::settle`] (or drain completions
//! with [`CollectibleEditor::poll`]) to attach the results.

use crate::cards::{AttackPatch, CollectibleCard, CollectibleField, FieldValue, Stage};
use crate::core::{AttackId, DecodeError, EditorConfig, EnergyType, InputError};
use crate::decode::{DecodeCompletion, DecodeScheduler, ImageSource};
use crate::export::{ExportOutcome, ExportTrigger, PrintSettings, PrintSurface};
use crate::layers::{Axis, CollectibleLayer, LayerKey, LayerModel, LayerTransform, PercentTransform};
use crate::render::{render_collectible, CollectibleLayers, RenderTree};
use crate::store::CardStore;

use super::controls::{energy_choices, Choice, Control, ControlKind};

/// One user action on a collectible card.
#[derive(Clone, Debug, PartialEq)]
pub enum CollectibleInput {
    Field(CollectibleField, FieldValue),
    UpdateAttack(AttackId, AttackPatch),
    AddAttack,
    RemoveAttack(AttackId),
    AddEnergy(AttackId, EnergyType),
    RemoveEnergyAt(AttackId, usize),
    SelectLayer(CollectibleLayer),
    /// Move the active layer.
    Position(Axis, f64),
    /// Scale the active layer.
    Scale(f64),
    /// Decode an image into the active layer.
    Upload(ImageSource),
    /// Detach the active layer's image.
    ClearImage,
}

/// Editor for a collectible card.
#[derive(Debug)]
pub struct CollectibleEditor {
    store: CardStore<CollectibleCard>,
    layers: CollectibleLayers,
    active: CollectibleLayer,
    decoder: DecodeScheduler<CollectibleLayer>,
    export: ExportTrigger,
}

impl Default for CollectibleEditor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl CollectibleEditor {
    /// Mount state: the default card, every layer centred, art tab active.
    #[must_use]
    pub fn new(config: EditorConfig) -> Self {
        Self {
            layers: LayerModel::new(&config),
            store: CardStore::new(CollectibleCard::default(), config),
            active: CollectibleLayer::Art,
            decoder: DecodeScheduler::new(),
            export: ExportTrigger::new(PrintSettings::collectible()),
        }
    }

    #[must_use]
    pub fn with_print_settings(mut self, settings: PrintSettings) -> Self {
        self.export = ExportTrigger::new(settings);
        self
    }

    #[must_use]
    pub fn card(&self) -> &CollectibleCard {
        self.store.state()
    }

    #[must_use]
    pub fn store(&self) -> &CardStore<CollectibleCard> {
        &self.store
    }

    #[must_use]
    pub fn layers(&self) -> &CollectibleLayers {
        &self.layers
    }

    #[must_use]
    pub fn active_layer(&self) -> CollectibleLayer {
        self.active
    }

    /// Apply one input. On `Err` nothing changed.
    pub fn apply(&mut self, input: CollectibleInput) -> Result<(), InputError> {
        match input {
            CollectibleInput::Field(field, value) => self.store.update_field(field, value)?,
            CollectibleInput::UpdateAttack(id, patch) => {
                self.store.update_attack(id, &patch);
            }
            CollectibleInput::AddAttack => {
                self.store.add_attack();
            }
            CollectibleInput::RemoveAttack(id) => {
                self.store.remove_attack(id);
            }
            CollectibleInput::AddEnergy(id, energy) => {
                self.store.add_energy(id, energy);
            }
            CollectibleInput::RemoveEnergyAt(id, index) => {
                self.store.remove_energy_at(id, index);
            }
            CollectibleInput::SelectLayer(layer) => {
                log::debug!("active layer: {}", layer.name());
                self.active = layer;
            }
            CollectibleInput::Position(axis, value) => {
                self.layers.set_position(self.active, axis, value)?;
            }
            CollectibleInput::Scale(value) => self.layers.set_scale(self.active, value)?,
            CollectibleInput::Upload(source) => {
                self.upload(self.active, source)?;
            }
            CollectibleInput::ClearImage => {
                self.decoder.cancel(self.active);
                if self.layers.clear_image(self.active).is_some() {
                    log::debug!("{}: image released", self.active.name());
                }
            }
        }
        Ok(())
    }

    /// Start decoding an image for `slot`, superseding any pending one.
    pub fn upload(&mut self, slot: CollectibleLayer, source: impl Into<ImageSource>) -> Result<u64, DecodeError> {
        self.decoder.start(slot, source)
    }

    /// Attach a finished decode if it is still the latest for its slot.
    ///
    /// `Ok(false)` means the completion was stale. On `Err` the slot keeps
    /// its previous image.
    pub fn apply_completion(&mut self, completion: DecodeCompletion<CollectibleLayer>) -> Result<bool, DecodeError> {
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

    /// Apply every completion already delivered, without waiting.
    pub fn poll(&mut self) -> Vec<DecodeError> {
        let mut errors = Vec::new();
        while let Some(completion) = self.decoder.try_next_completion() {
            if let Err(err) = self.apply_completion(completion) {
                errors.push(err);
            }
        }
        errors
    }

    /// Wait for every pending decode and apply the results.
    pub async fn settle(&mut self) -> Vec<DecodeError> {
        let mut errors = Vec::new();
        while let Some(completion) = self.decoder.next_completion().await {
            if let Err(err) = self.apply_completion(completion) {
                errors.push(err);
            }
        }
        errors
    }

    /// Number of slots still decoding.
    #[must_use]
    pub fn pending_decodes(&self) -> usize {
        self.decoder.pending()
    }

    #[must_use]
    pub fn render(&self) -> RenderTree {
        render_collectible(self.store.state(), &self.layers)
    }

    /// Send the current render to the host's print facility.
    pub fn print(&self, surface: &mut dyn PrintSurface) -> ExportOutcome {
        self.export.trigger(&self.render(), surface)
    }

    /// Controls visible for the current state.
    #[must_use]
    pub fn controls(&self) -> Vec<Control> {
        let card = self.store.state();
        let config = self.store.config();
        let mut controls = Vec::new();

        controls.push(Control::new(
            "layer.active",
            "画像レイヤー",
            ControlKind::Tabs {
                choices: CollectibleLayer::ALL
                    .iter()
                    .map(|l| Choice::new(l.name(), l.label()))
                    .collect(),
            },
        ));
        controls.push(Control::new("is_rare", "レア枠", ControlKind::Toggle));

        let layer = self.active.name();
        controls.push(Control::image_upload(format!("layer.{layer}.image"), "画像"));
        // the pre-evolution image is cover-fitted; no sliders
        if self.active != CollectibleLayer::PreEvolution {
            let position = PercentTransform::position_range(config);
            controls.push(Control::slider(
                format!("layer.{layer}.scale"),
                "拡大",
                PercentTransform::scale_range(config),
            ));
            controls.push(Control::slider(format!("layer.{layer}.x"), "X 位置", position));
            controls.push(Control::slider(format!("layer.{layer}.y"), "Y 位置", position));
        }

        controls.push(Control::new("is_ex", "ex化", ControlKind::Toggle));
        controls.push(Control::text("name", "ポケモン名"));
        controls.push(Control::new("hp", "HP", ControlKind::Number));
        controls.push(Control::new(
            "primary_type",
            "タイプ",
            ControlKind::Select {
                choices: energy_choices(),
            },
        ));
        controls.push(Control::new(
            "stage",
            "進化段階",
            ControlKind::Select {
                choices: Stage::ALL
                    .iter()
                    .map(|s| Choice::new(s.label(), s.label()))
                    .collect(),
            },
        ));
        controls.push(Control::slider("rarity", "レアリティ (ダイヤ数)", config.rarity));
        controls.push(Control::new("card_background_color", "地の色 (背景色)", ControlKind::Color));
        controls.push(Control::new("base_text_color", "文字色", ControlKind::Color));
        controls.push(Control::new("sub_text_color", "サブ文字色", ControlKind::Color));

        controls.push(Control::new(
            "weakness",
            "じゃくてん",
            ControlKind::Select {
                choices: energy_choices(),
            },
        ));
        controls.push(Control::slider("retreat_cost", "にげるエネルギー", config.retreat));

        controls.push(Control::new("has_ability", "特性", ControlKind::Toggle));
        if card.has_ability {
            controls.push(Control::text("ability_name", "特性の名前"));
            controls.push(Control::new("ability_description", "説明文", ControlKind::TextArea));
        }

        for attack in &card.attacks {
            let id = attack.id.raw();
            controls.push(Control::button(format!("attack.{id}.remove"), "削除"));
            controls.push(Control::text(format!("attack.{id}.name"), "わざ名"));
            controls.push(Control::text(format!("attack.{id}.damage"), "ダメージ"));
            for (index, energy) in attack.energy.iter().enumerate() {
                controls.push(Control::button(format!("attack.{id}.energy.{index}"), energy.label()));
            }
            for energy in EnergyType::ALL {
                controls.push(Control::button(format!("attack.{id}.add.{}", energy.key()), energy.label()));
            }
            controls.push(Control::new(format!("attack.{id}.description"), "わざの効果", ControlKind::TextArea));
        }
        if card.attacks.len() < config.max_attacks {
            controls.push(Control::button("add_attack", "わざを追加"));
        }

        controls.push(Control::button("print", "カードを保存"));
        controls
    }
}
