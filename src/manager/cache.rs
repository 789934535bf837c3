//! String-keyed texture cache. No eviction; cleared wholesale on close.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::gpu::FontTexture;

/// Owns every texture a manager has produced, keyed by the exact string.
pub struct TextureCache<T> {
    entries: HashMap<String, FontTexture<T>>,
}

impl<T> TextureCache<T> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn get(&self, text: &str) -> Option<&FontTexture<T>> {
        self.entries.get(text)
    }

    pub fn contains(&self, text: &str) -> bool {
        self.entries.contains_key(text)
    }

    /// Store `texture` under `text`, replacing any previous entry, and
    /// return a reference to the stored texture.
    pub fn insert(&mut self, text: &str, texture: FontTexture<T>) -> &FontTexture<T> {
        match self.entries.entry(text.to_owned()) {
            Entry::Occupied(mut slot) => {
                slot.insert(texture);
                slot.into_mut()
            }
            Entry::Vacant(slot) => slot.insert(texture),
        }
    }

    /// Texture for `text`, building it with `make` on a miss.
    ///
    /// A failed build leaves the cache untouched.
    pub fn get_or_try_insert_with<E>(
        &mut self,
        text: &str,
        make: impl FnOnce() -> Result<FontTexture<T>, E>,
    ) -> Result<&FontTexture<T>, E> {
        if !self.entries.contains_key(text) {
            let texture = make()?;
            self.entries.insert(text.to_owned(), texture);
        }
        Ok(&self.entries[text])
    }

    /// Drop every texture.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for TextureCache<T> {
    fn default() -> Self {
        Self::new()
    }
}
