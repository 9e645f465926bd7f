//! Layer Transform Model.
//!
//! One [`LayerState`] per slot key: a transform and an optional image
//! handle. The two are independent; a slot may be transformed with no
//! image attached. Replacing or clearing a handle returns the old one so
//! the caller can release it.

use std::marker::PhantomData;
use std::ops::Index;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::{EditError, EditorConfig, SliderRange};

use super::keys::LayerKey;
use super::transform::{validate, Axis, LayerTransform};

/// Opaque reference to a decoded image (a data URL or host object URL).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageHandle {
    url: Arc<str>,
    dimensions: Option<(u32, u32)>,
}

impl ImageHandle {
    /// Handle for a decoded image of known size.
    #[must_use]
    pub fn new(url: impl Into<Arc<str>>, width: u32, height: u32) -> Self {
        Self {
            url: url.into(),
            dimensions: Some((width, height)),
        }
    }

    /// Handle for a host-provided URL whose size is not known.
    #[must_use]
    pub fn from_url(url: impl Into<Arc<str>>) -> Self {
        Self {
            url: url.into(),
            dimensions: None,
        }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Shared URL, cheap to clone into render output.
    #[must_use]
    pub fn shared_url(&self) -> Arc<str> {
        Arc::clone(&self.url)
    }

    /// Natural pixel size, if known.
    #[must_use]
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.dimensions
    }
}

/// Transform and image of one slot.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LayerState<T> {
    pub transform: T,
    pub image: Option<ImageHandle>,
}

impl<T: LayerTransform> LayerState<T> {
    /// True when the slot is back at its mount state.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.image.is_none() && self.transform == T::default()
    }
}

/// All layer slots of one editor.
#[derive(Clone, Debug)]
pub struct LayerModel<K: LayerKey, T: LayerTransform> {
    slots: Vec<LayerState<T>>,
    position_range: SliderRange,
    scale_range: SliderRange,
    _keys: PhantomData<K>,
}

impl<K: LayerKey, T: LayerTransform> LayerModel<K, T> {
    /// Every slot centred, natural size, no image.
    #[must_use]
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            slots: K::ALL.iter().map(|_| LayerState::default()).collect(),
            position_range: T::position_range(config),
            scale_range: T::scale_range(config),
            _keys: PhantomData,
        }
    }

    #[must_use]
    pub fn get(&self, key: K) -> &LayerState<T> {
        &self.slots[key.index()]
    }

    #[must_use]
    pub fn transform(&self, key: K) -> T {
        self.get(key).transform
    }

    #[must_use]
    pub fn image(&self, key: K) -> Option<&ImageHandle> {
        self.get(key).image.as_ref()
    }

    /// Set one axis. Non-finite values are refused; others are clamped.
    pub fn set_position(&mut self, key: K, axis: Axis, value: f64) -> Result<(), EditError> {
        let what = match axis {
            Axis::X => "x position",
            Axis::Y => "y position",
        };
        let value = validate(what, value, &self.position_range)?;
        self.slots[key.index()].transform.put_position(axis, value);
        log::debug!("{} {axis:?} = {value}", key.name());
        Ok(())
    }

    /// Set the scale. Non-finite values are refused; others are clamped.
    pub fn set_scale(&mut self, key: K, value: f64) -> Result<(), EditError> {
        let value = validate("scale", value, &self.scale_range)?;
        self.slots[key.index()].transform.put_scale(value);
        log::debug!("{} scale = {value}", key.name());
        Ok(())
    }

    /// Attach an image, returning the handle it replaces.
    pub fn set_image(&mut self, key: K, image: ImageHandle) -> Option<ImageHandle> {
        log::debug!("{} image attached", key.name());
        self.slots[key.index()].image.replace(image)
    }

    /// Detach the image, returning it.
    pub fn clear_image(&mut self, key: K) -> Option<ImageHandle> {
        self.slots[key.index()].image.take()
    }

    /// Restore one slot to its mount state, returning any detached image.
    pub fn reset(&mut self, key: K) -> Option<ImageHandle> {
        std::mem::take(&mut self.slots[key.index()]).image
    }

    /// Restore every slot, returning all detached images.
    pub fn reset_all(&mut self) -> Vec<ImageHandle> {
        K::ALL.iter().filter_map(|key| self.reset(*key)).collect()
    }

    /// Iterate slots in key order.
    pub fn iter(&self) -> impl Iterator<Item = (K, &LayerState<T>)> {
        K::ALL.iter().copied().zip(self.slots.iter())
    }
}

impl<K: LayerKey, T: LayerTransform> Index<K> for LayerModel<K, T> {
    type Output = LayerState<T>;

    fn index(&self, key: K) -> &Self::Output {
        self.get(key)
    }
}
