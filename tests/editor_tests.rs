//! Editor integration tests: background decoding and print hand-off.
//!
//! Decode tests run on a tokio runtime since uploads decode on the
//! blocking pool.

use std::io::Cursor;

use image::{DynamicImage, ImageOutputFormat, RgbaImage};

use rust_cardsmith::core::{DecodeError, ExportError};
use rust_cardsmith::decode::ImageSource;
use rust_cardsmith::editor::{BattleEditor, BattleInput, CollectibleEditor, CollectibleInput};
use rust_cardsmith::export::{ExportOutcome, PrintJob, PrintSurface};
use rust_cardsmith::layers::{BattleLayer, CollectibleLayer};
use rust_cardsmith::render::{Content, NodeRole};

fn png(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = Vec::new();
    DynamicImage::ImageRgba8(RgbaImage::new(width, height))
        .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
        .unwrap();
    bytes
}

// =============================================================================
// Decode Tests
// =============================================================================

/// Test that an upload attaches once the editor settles.
#[tokio::test]
async fn test_upload_attaches_after_settle() {
    let mut editor = CollectibleEditor::default();
    editor.apply(CollectibleInput::Upload(ImageSource::from(png(40, 20)))).unwrap();
    assert_eq!(editor.pending_decodes(), 1);

    let errors = editor.settle().await;
    assert!(errors.is_empty());
    assert_eq!(editor.pending_decodes(), 0);

    let image = editor.layers().image(CollectibleLayer::Art).unwrap();
    assert_eq!(image.dimensions(), Some((40, 20)));

    let tree = editor.render();
    match &tree.find(NodeRole::Art).unwrap().content {
        Content::Image { url, .. } => assert!(url.starts_with("data:image/png;base64,")),
        other => panic!("unexpected {other:?}"),
    }
}

/// Test that a failed decode keeps whatever image was there before.
#[tokio::test]
async fn test_failed_upload_keeps_previous_image() {
    let mut editor = CollectibleEditor::default();
    editor.upload(CollectibleLayer::Background, png(8, 8)).unwrap();
    assert!(editor.settle().await.is_empty());

    editor.upload(CollectibleLayer::Background, b"not an image".to_vec()).unwrap();
    let errors = editor.settle().await;
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0], DecodeError::UnknownFormat));

    let image = editor.layers().image(CollectibleLayer::Background).unwrap();
    assert_eq!(image.dimensions(), Some((8, 8)));
}

/// Test that the last upload for a slot wins even if an older one is
/// still decoding.
#[tokio::test]
async fn test_latest_upload_wins() {
    let mut editor = BattleEditor::default();
    editor.apply(BattleInput::Upload(BattleLayer::Art, ImageSource::from(png(64, 64)))).unwrap();
    editor.apply(BattleInput::Upload(BattleLayer::Art, ImageSource::from(png(3, 5)))).unwrap();
    assert_eq!(editor.pending_decodes(), 1);

    editor.settle().await;
    let image = editor.layers().image(BattleLayer::Art).unwrap();
    assert_eq!(image.dimensions(), Some((3, 5)));
}

/// Test that reset cancels pending decodes so they cannot land afterwards.
#[tokio::test]
async fn test_reset_cancels_pending_decode() {
    let mut editor = BattleEditor::default();
    editor.upload(BattleLayer::Background, png(16, 16)).unwrap();
    editor.apply(BattleInput::Reset).unwrap();
    assert_eq!(editor.pending_decodes(), 0);

    editor.settle().await;
    tokio::task::yield_now().await;
    editor.poll();
    assert!(editor.layers().image(BattleLayer::Background).is_none());
}

/// Test that clearing the active layer drops its image and pending decode.
#[tokio::test]
async fn test_clear_image() {
    let mut editor = CollectibleEditor::default();
    editor.apply(CollectibleInput::Upload(ImageSource::from(png(2, 2)))).unwrap();
    editor.settle().await;
    assert!(editor.layers().image(CollectibleLayer::Art).is_some());

    editor.apply(CollectibleInput::ClearImage).unwrap();
    assert!(editor.layers().image(CollectibleLayer::Art).is_none());
    assert!(!editor.render().contains(NodeRole::Art));
}

/// Test decoding straight from a file on disk.
#[tokio::test]
async fn test_upload_from_file() {
    let path = std::env::temp_dir().join(format!("cardsmith-{}.png", std::process::id()));
    std::fs::write(&path, png(6, 4)).unwrap();

    let mut editor = BattleEditor::default();
    editor.upload(BattleLayer::Art, path.clone()).unwrap();
    let errors = editor.settle().await;
    std::fs::remove_file(&path).unwrap();

    assert!(errors.is_empty());
    assert_eq!(editor.layers().image(BattleLayer::Art).unwrap().dimensions(), Some((6, 4)));
}

// =============================================================================
// Export Tests
// =============================================================================

#[derive(Default)]
struct RecordingSurface {
    cancel: bool,
    stylesheets: Vec<String>,
}

impl PrintSurface for RecordingSurface {
    fn print(&mut self, job: &PrintJob<'_>) -> Result<(), ExportError> {
        self.stylesheets.push(job.stylesheet.clone());
        if self.cancel {
            Err(ExportError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Test that printing hands the surface the physical page size.
#[test]
fn test_print_collectible() {
    let editor = CollectibleEditor::default();
    let mut surface = RecordingSurface::default();
    assert_eq!(editor.print(&mut surface), ExportOutcome::Printed);
    assert!(surface.stylesheets[0].contains("size: 8.8cm 12.3cm"));
}

/// Test that a cancelled print leaves the editor as it was.
#[test]
fn test_cancelled_print_changes_nothing() {
    let editor = BattleEditor::default();
    let before = editor.render();
    let mut surface = RecordingSurface {
        cancel: true,
        ..RecordingSurface::default()
    };
    assert_eq!(editor.print(&mut surface), ExportOutcome::Cancelled);
    assert_eq!(editor.render(), before);
    assert_eq!(editor.store().revision(), 0);
}
