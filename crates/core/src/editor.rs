//! Menu admin editor.
//!
//! The editor works on a draft copy of the catalog. Edits touch only the
//! draft; [`MenuEditor::save`] writes the whole draft as the menu override
//! in one step.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::menu::{LineError, LineField, MenuCatalog, MenuCategory, MenuLine};
use crate::storage::{KeyValueStore, StoreError, snapshots};

/// Errors from editor operations.
#[derive(thiserror::Error, Debug)]
pub enum EditorError {
    #[error(transparent)]
    Line(#[from] LineError),

    #[error("could not persist menu: {0}")]
    Store(#[from] StoreError),
}

/// A draft menu under edit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MenuEditor {
    draft: MenuCatalog,
}

impl MenuEditor {
    #[must_use]
    pub const fn new(draft: MenuCatalog) -> Self {
        Self { draft }
    }

    /// Start from whatever menu is currently persisted.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Store`] if the store fails.
    pub fn load(store: &impl KeyValueStore) -> Result<Self, EditorError> {
        Ok(Self::new(
            snapshots::load_menu_override(store)?.unwrap_or_default(),
        ))
    }

    #[must_use]
    pub const fn draft(&self) -> &MenuCatalog {
        &self.draft
    }

    /// Replace the whole draft, e.g. with a menu pulled from the remote
    /// endpoint.
    pub fn replace_draft(&mut self, draft: MenuCatalog) {
        self.draft = draft;
    }

    /// Append a placeholder line shaped for `category` and return its index.
    ///
    /// # Errors
    ///
    /// Never fails for a well-formed category; the `Result` mirrors the
    /// catalog API.
    pub fn add_line(&mut self, category: MenuCategory) -> Result<usize, EditorError> {
        let line = MenuLine::placeholder(category.arity());
        Ok(self.draft.push_line(category, line)?)
    }

    /// Change one field of the line at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`LineError::NotFound`] for a bad index and
    /// [`LineError::FieldMismatch`] if the category's lines have no such
    /// field.
    pub fn update_line(
        &mut self,
        category: MenuCategory,
        index: usize,
        change: LineField,
    ) -> Result<MenuLine, EditorError> {
        let mut line = self
            .draft
            .line(category, index)
            .ok_or(LineError::NotFound { category, index })?;
        line.apply(change)
            .map_err(|field| LineError::FieldMismatch { category, field })?;
        self.draft.replace_line(category, index, line.clone())?;
        Ok(line)
    }

    /// Remove the line at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`LineError::NotFound`] for a bad index.
    pub fn delete_line(
        &mut self,
        category: MenuCategory,
        index: usize,
    ) -> Result<MenuLine, EditorError> {
        Ok(self.draft.remove_line(category, index)?)
    }

    /// Persist the draft as the menu override.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Store`] if the write fails.
    pub fn save(&self, store: &impl KeyValueStore) -> Result<(), EditorError> {
        snapshots::save_menu(store, &self.draft)?;
        info!("Saved menu override");
        Ok(())
    }

    /// Erase the override and revert the draft to the default catalog.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Store`] if the delete fails. The draft is left
    /// unchanged in that case.
    pub fn reset(&mut self, store: &impl KeyValueStore) -> Result<(), EditorError> {
        snapshots::reset_menu(store)?;
        self.draft = MenuCatalog::default();
        info!("Reset menu to default");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::menu::{PLACEHOLDER_NAME, PriceTier, TripleLine};
    use crate::storage::MemoryStore;
    use crate::types::Price;

    #[test]
    fn test_add_line_on_pizzas_is_zeroed_placeholder() {
        let mut editor = MenuEditor::default();
        let index = editor.add_line(MenuCategory::Pizzas).unwrap();
        assert_eq!(
            editor.draft().line(MenuCategory::Pizzas, index),
            Some(MenuLine::Triple(TripleLine::new(PLACEHOLDER_NAME, 0, 0, 0)))
        );
    }

    #[test]
    fn test_update_line_changes_one_field() {
        let mut editor = MenuEditor::default();
        let before = editor.draft().line(MenuCategory::Sandwiches, 0).unwrap();
        let after = editor
            .update_line(MenuCategory::Sandwiches, 0, LineField::Jumbo(Price::new(9999)))
            .unwrap();
        assert_eq!(after.name(), before.name());
        assert_eq!(after.prices()[1], (PriceTier::Jumbo, Price::new(9999)));
        assert_eq!(after.prices()[0], before.prices()[0]);
    }

    #[test]
    fn test_update_line_rejects_foreign_field() {
        let mut editor = MenuEditor::default();
        let err = editor
            .update_line(MenuCategory::Juices, 0, LineField::Small(Price::new(1)))
            .unwrap_err();
        assert!(matches!(
            err,
            EditorError::Line(LineError::FieldMismatch { field: "small", .. })
        ));
        assert_eq!(editor.draft(), &MenuCatalog::default());
    }

    #[test]
    fn test_update_and_delete_out_of_range() {
        let mut editor = MenuEditor::default();
        assert!(
            editor
                .update_line(MenuCategory::Broast, 500, LineField::Name("x".into()))
                .is_err()
        );
        assert!(editor.delete_line(MenuCategory::Broast, 500).is_err());
    }

    #[test]
    fn test_save_then_load() {
        let store = MemoryStore::new();
        let mut editor = MenuEditor::default();
        editor.delete_line(MenuCategory::Juices, 0).unwrap();
        editor.save(&store).unwrap();

        let reloaded = MenuEditor::load(&store).unwrap();
        assert_eq!(reloaded, editor);
    }

    #[test]
    fn test_reset_reverts_draft_and_store() {
        let store = MemoryStore::new();
        let mut editor = MenuEditor::default();
        editor.add_line(MenuCategory::Broast).unwrap();
        editor.save(&store).unwrap();

        editor.reset(&store).unwrap();
        assert_eq!(editor.draft(), &MenuCatalog::default());
        assert_eq!(MenuEditor::load(&store).unwrap(), MenuEditor::default());
    }

    #[test]
    fn test_replace_draft_does_not_touch_store() {
        let store = MemoryStore::new();
        let mut editor = MenuEditor::default();
        let pulled =
            MenuCatalog::from_override(serde_json::json!({ "juices": [] })).unwrap();

        editor.replace_draft(pulled.clone());
        assert_eq!(editor.draft(), &pulled);
        assert!(editor.draft().lines(MenuCategory::Juices).is_empty());
        assert_eq!(MenuEditor::load(&store).unwrap(), MenuEditor::default());
    }
}
