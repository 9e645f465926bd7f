//! Card State Store: one controlled record per editor instance.

pub mod card_store;

pub use card_store::CardStore;
