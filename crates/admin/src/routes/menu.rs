//! Draft menu editing.
//!
//! Every handler works on the session's draft. Nothing reaches the persisted
//! override until `save`, and nothing reaches the storefront until
//! `publish`.

use axum::{
    Json,
    extract::{Path, State},
};
use pizzeti_core::{LineField, MenuCatalog, MenuCategory, MenuLine};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{info, instrument};

use crate::error::{AppError, Result};
use crate::middleware::RequireUnlocked;
use crate::state::AppState;

/// One editor section.
#[derive(Debug, Serialize)]
pub struct SectionView {
    pub key: MenuCategory,
    pub label: &'static str,
    pub lines: Vec<MenuLine>,
}

/// The draft as shown in the editor.
#[derive(Debug, Serialize)]
pub struct DraftView {
    pub sections: Vec<SectionView>,
}

impl From<&MenuCatalog> for DraftView {
    fn from(catalog: &MenuCatalog) -> Self {
        Self {
            sections: MenuCategory::ALL
                .into_iter()
                .map(|key| SectionView {
                    key,
                    label: key.label(),
                    lines: catalog.lines(key),
                })
                .collect(),
        }
    }
}

/// Response to a single-line edit.
#[derive(Debug, Serialize)]
pub struct LineView {
    pub index: usize,
    pub line: MenuLine,
}

/// Show the draft.
#[instrument(skip_all)]
pub async fn show(State(state): State<AppState>, unlocked: RequireUnlocked) -> Result<Json<DraftView>> {
    let editor = unlocked.draft(state.store()).await?;
    Ok(Json(DraftView::from(editor.draft())))
}

/// Append a placeholder line to a section.
#[instrument(skip(state, unlocked))]
pub async fn add_line(
    State(state): State<AppState>,
    unlocked: RequireUnlocked,
    Path(category): Path<MenuCategory>,
) -> Result<Json<LineView>> {
    let mut editor = unlocked.draft(state.store()).await?;
    let index = editor.add_line(category)?;
    unlocked.keep_draft(&editor).await?;

    let line = editor
        .draft()
        .line(category, index)
        .ok_or_else(|| AppError::Internal(format!("line {index} missing after add")))?;
    Ok(Json(LineView { index, line }))
}

/// Change one field of a line.
#[instrument(skip(state, unlocked))]
pub async fn update_line(
    State(state): State<AppState>,
    unlocked: RequireUnlocked,
    Path((category, index)): Path<(MenuCategory, usize)>,
    Json(change): Json<LineField>,
) -> Result<Json<LineView>> {
    let mut editor = unlocked.draft(state.store()).await?;
    let line = editor.update_line(category, index, change)?;
    unlocked.keep_draft(&editor).await?;
    Ok(Json(LineView { index, line }))
}

/// Remove a line.
#[instrument(skip(state, unlocked))]
pub async fn delete_line(
    State(state): State<AppState>,
    unlocked: RequireUnlocked,
    Path((category, index)): Path<(MenuCategory, usize)>,
) -> Result<Json<DraftView>> {
    let mut editor = unlocked.draft(state.store()).await?;
    editor.delete_line(category, index)?;
    unlocked.keep_draft(&editor).await?;
    Ok(Json(DraftView::from(editor.draft())))
}

/// Persist the draft as the local menu override.
#[instrument(skip_all)]
pub async fn save(State(state): State<AppState>, unlocked: RequireUnlocked) -> Result<Json<Value>> {
    let editor = unlocked.draft(state.store()).await?;
    editor.save(state.store())?;
    Ok(Json(json!({ "saved": true })))
}

/// Erase the local override and start over from the default menu.
#[instrument(skip_all)]
pub async fn reset(
    State(state): State<AppState>,
    unlocked: RequireUnlocked,
) -> Result<Json<DraftView>> {
    let mut editor = unlocked.draft(state.store()).await?;
    editor.reset(state.store())?;
    unlocked.keep_draft(&editor).await?;
    Ok(Json(DraftView::from(editor.draft())))
}

/// Send the draft to the storefront.
#[instrument(skip_all)]
pub async fn publish(
    State(state): State<AppState>,
    unlocked: RequireUnlocked,
) -> Result<Json<Value>> {
    let editor = unlocked.draft(state.store()).await?;
    if !state.sync().publish(editor.draft()).await {
        return Err(AppError::Sync);
    }
    info!("Draft published to storefront");
    Ok(Json(json!({ "published": true })))
}

/// Replace the draft with the storefront's published menu.
///
/// The draft is left untouched when the pull fails or nothing is published.
#[instrument(skip_all)]
pub async fn pull(State(state): State<AppState>, unlocked: RequireUnlocked) -> Result<Json<DraftView>> {
    let menu = state.sync().pull().await.ok_or(AppError::Sync)?;
    let mut editor = unlocked.draft(state.store()).await?;
    editor.replace_draft(menu);
    unlocked.keep_draft(&editor).await?;
    info!("Draft replaced with published menu");
    Ok(Json(DraftView::from(editor.draft())))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pizzeti_core::MenuEditor;
    use pizzeti_core::menu::PLACEHOLDER_NAME;

    use super::*;

    #[test]
    fn test_draft_view_has_every_section() {
        let view = DraftView::from(&MenuCatalog::default());
        let keys: Vec<_> = view.sections.iter().map(|s| s.key).collect();
        assert_eq!(keys, MenuCategory::ALL.to_vec());
        assert!(view.sections.iter().all(|s| !s.lines.is_empty()));
    }

    #[test]
    fn test_draft_view_reflects_added_line() {
        let mut editor = MenuEditor::default();
        editor.add_line(MenuCategory::Juices).unwrap();
        let view = DraftView::from(editor.draft());
        let juices = view
            .sections
            .iter()
            .find(|s| s.key == MenuCategory::Juices)
            .and_then(|s| s.lines.last())
            .map(|line| line.name().to_string());
        assert_eq!(juices.as_deref(), Some(PLACEHOLDER_NAME));
    }
}
