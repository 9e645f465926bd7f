//! Export Trigger: hand the current render to the host's print facility.
//!
//! There is no encoder here. Output fidelity comes from the print-only
//! stylesheet: editing controls carry a hidden class, the card root is
//! pinned to a physical size and colours are printed exactly.
//!
//! Export never fails loudly. Unavailable, cancelled and failed prints all
//! come back as an [`ExportOutcome`], are logged, and leave the editor
//! untouched so the user can simply try again.

use serde::{Deserialize, Serialize};

use crate::core::ExportError;
use crate::render::{RenderTree, Size};

const PX_PER_CM: f64 = 96.0 / 2.54;

/// Unit of a printed length.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    Cm,
    Px,
}

impl LengthUnit {
    fn suffix(self) -> &'static str {
        match self {
            LengthUnit::Cm => "cm",
            LengthUnit::Px => "px",
        }
    }
}

/// Printed surface size.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhysicalSize {
    pub width: f64,
    pub height: f64,
    pub unit: LengthUnit,
}

impl PhysicalSize {
    #[must_use]
    pub const fn cm(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            unit: LengthUnit::Cm,
        }
    }

    #[must_use]
    pub const fn px(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            unit: LengthUnit::Px,
        }
    }

    /// Size in CSS pixels (96 per inch).
    #[must_use]
    pub fn css_px(&self) -> Size {
        match self.unit {
            LengthUnit::Cm => Size::new(self.width * PX_PER_CM, self.height * PX_PER_CM),
            LengthUnit::Px => Size::new(self.width, self.height),
        }
    }

    fn css(&self) -> String {
        let unit = self.unit.suffix();
        format!("{}{unit} {}{unit}", self.width, self.height)
    }
}

/// Print-only presentation rules.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PrintSettings {
    pub size: PhysicalSize,
    /// Selector of the card root.
    pub root_selector: String,
    /// Class carried by every element hidden from print.
    pub hidden_class: String,
    /// Print backgrounds and colours exactly as shown.
    pub exact_color: bool,
}

impl PrintSettings {
    /// Collectible card: 8.8cm × 12.3cm.
    #[must_use]
    pub fn collectible() -> Self {
        Self {
            size: PhysicalSize::cm(8.8, 12.3),
            root_selector: "#card-preview".to_string(),
            hidden_class: "no-print".to_string(),
            exact_color: true,
        }
    }

    /// Battle card at its on-screen pixel size.
    #[must_use]
    pub fn battle() -> Self {
        Self {
            size: PhysicalSize::px(380.0, 475.0),
            root_selector: "#card-preview".to_string(),
            hidden_class: "no-print".to_string(),
            exact_color: true,
        }
    }

    /// The print-only CSS scope.
    #[must_use]
    pub fn print_stylesheet(&self) -> String {
        let size = self.size.css();
        let unit = self.size.unit.suffix();
        let mut css = String::from("@media print {\n");
        css.push_str(&format!("  @page {{ size: {size}; margin: 0; }}\n"));
        css.push_str("  html, body { margin: 0; padding: 0; background: none; }\n");
        if self.exact_color {
            css.push_str(
                "  * { -webkit-print-color-adjust: exact; print-color-adjust: exact; }\n",
            );
        }
        css.push_str(&format!(
            "  .{} {{ display: none !important; }}\n",
            self.hidden_class
        ));
        css.push_str(&format!(
            "  {} {{ width: {}{unit} !important; height: {}{unit} !important; \
             box-shadow: none !important; border-radius: 0 !important; }}\n",
            self.root_selector, self.size.width, self.size.height
        ));
        css.push('}');
        css
    }

    /// Factor from the preview size to the printed size.
    ///
    /// Uses the tighter axis so the whole card fits on the page.
    #[must_use]
    pub fn scale_for(&self, tree: &RenderTree) -> f64 {
        let page = self.size.css_px();
        if tree.size.width <= 0.0 || tree.size.height <= 0.0 {
            return 1.0;
        }
        (page.width / tree.size.width).min(page.height / tree.size.height)
    }
}

/// Everything the host needs to print one card.
#[derive(Clone, Debug)]
pub struct PrintJob<'a> {
    pub tree: &'a RenderTree,
    pub settings: &'a PrintSettings,
    pub stylesheet: String,
    pub scale: f64,
}

/// The host's print facility.
pub trait PrintSurface {
    /// Whether printing is possible at all right now.
    fn is_available(&self) -> bool {
        true
    }

    /// Show the print dialog for `job`. Blocks until the dialog closes.
    fn print(&mut self, job: &PrintJob<'_>) -> Result<(), ExportError>;
}

/// How an export attempt ended.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "reason", rename_all = "snake_case")]
pub enum ExportOutcome {
    Printed,
    Unavailable,
    Cancelled,
    Failed(String),
}

impl ExportOutcome {
    #[must_use]
    pub fn is_printed(&self) -> bool {
        matches!(self, ExportOutcome::Printed)
    }
}

/// Invokes a [`PrintSurface`] with the current render.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportTrigger {
    settings: PrintSettings,
}

impl ExportTrigger {
    #[must_use]
    pub fn new(settings: PrintSettings) -> Self {
        Self { settings }
    }

    #[must_use]
    pub fn settings(&self) -> &PrintSettings {
        &self.settings
    }

    /// Print `tree` on `surface`. Never fails; see [`ExportOutcome`].
    pub fn trigger(&self, tree: &RenderTree, surface: &mut dyn PrintSurface) -> ExportOutcome {
        if !surface.is_available() {
            log::warn!("print requested but no print facility is available");
            return ExportOutcome::Unavailable;
        }

        let job = PrintJob {
            tree,
            settings: &self.settings,
            stylesheet: self.settings.print_stylesheet(),
            scale: self.settings.scale_for(tree),
        };

        match surface.print(&job) {
            Ok(()) => {
                log::debug!("printed card at scale {:.3}", job.scale);
                ExportOutcome::Printed
            }
            Err(ExportError::Cancelled) => {
                log::debug!("print cancelled");
                ExportOutcome::Cancelled
            }
            Err(ExportError::Unavailable) => {
                log::warn!("print facility became unavailable");
                ExportOutcome::Unavailable
            }
            Err(ExportError::Failed(reason)) => {
                log::warn!("print failed: {reason}");
                ExportOutcome::Failed(reason)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::tree::RenderLayer;

    struct Scripted {
        available: bool,
        result: Result<(), ExportError>,
        jobs: Vec<(String, f64)>,
    }

    impl PrintSurface for Scripted {
        fn is_available(&self) -> bool {
            self.available
        }

        fn print(&mut self, job: &PrintJob<'_>) -> Result<(), ExportError> {
            self.jobs.push((job.stylesheet.clone(), job.scale));
            self.result.clone()
        }
    }

    fn tree(width: f64, height: f64) -> RenderTree {
        RenderTree {
            size: Size::new(width, height),
            background: "#fff".into(),
            layers: Vec::<RenderLayer>::new(),
        }
    }

    #[test]
    fn test_collectible_stylesheet() {
        let css = PrintSettings::collectible().print_stylesheet();
        assert!(css.starts_with("@media print {"));
        assert!(css.contains("@page { size: 8.8cm 12.3cm; margin: 0; }"));
        assert!(css.contains(".no-print { display: none !important; }"));
        assert!(css.contains("print-color-adjust: exact"));
        assert!(css.contains("#card-preview { width: 8.8cm !important; height: 12.3cm !important;"));
    }

    #[test]
    fn test_battle_stylesheet_uses_px() {
        let css = PrintSettings::battle().print_stylesheet();
        assert!(css.contains("size: 380px 475px"));
    }

    #[test]
    fn test_scale_for() {
        let settings = PrintSettings::collectible();
        let scale = settings.scale_for(&tree(380.0, 532.0));
        // 8.8cm is about 332.6 css px
        assert!((scale - 8.8 * PX_PER_CM / 380.0).abs() < 1e-9);
        assert_eq!(PrintSettings::battle().scale_for(&tree(380.0, 475.0)), 1.0);
        assert_eq!(settings.scale_for(&tree(0.0, 0.0)), 1.0);
    }

    #[test]
    fn test_trigger_outcomes() {
        let trigger = ExportTrigger::new(PrintSettings::battle());
        let card = tree(380.0, 475.0);

        let mut ok = Scripted { available: true, result: Ok(()), jobs: vec![] };
        assert!(trigger.trigger(&card, &mut ok).is_printed());
        assert_eq!(ok.jobs.len(), 1);

        let mut cancelled = Scripted { available: true, result: Err(ExportError::Cancelled), jobs: vec![] };
        assert_eq!(trigger.trigger(&card, &mut cancelled), ExportOutcome::Cancelled);

        let mut broken = Scripted {
            available: true,
            result: Err(ExportError::Failed("spooler offline".into())),
            jobs: vec![],
        };
        assert_eq!(
            trigger.trigger(&card, &mut broken),
            ExportOutcome::Failed("spooler offline".into())
        );
    }

    #[test]
    fn test_unavailable_surface_not_called() {
        let trigger = ExportTrigger::new(PrintSettings::collectible());
        let mut none = Scripted { available: false, result: Ok(()), jobs: vec![] };
        assert_eq!(trigger.trigger(&tree(380.0, 532.0), &mut none), ExportOutcome::Unavailable);
        assert!(none.jobs.is_empty());
    }

    #[test]
    fn test_settings_serde() {
        let settings = PrintSettings::collectible();
        let json = serde_json::to_string(&settings).unwrap();
        let back: PrintSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
    }
}
