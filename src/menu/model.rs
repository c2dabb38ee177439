use std::path::PathBuf;

use serde::Serialize;

/// Horizontal alignment of a menu text row.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RowAlignment {
    Left,
    Right,
}

/// One text row of the rendered menu.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct MenuRow {
    pub text: String,
    pub alignment: RowAlignment,
}

impl MenuRow {
    pub fn new(text: impl Into<String>, alignment: RowAlignment) -> Self {
        Self {
            text: text.into(),
            alignment,
        }
    }
}

/// Structured menu produced from one script run.
///
/// Rebuilt from scratch on every refresh and handed to the presenter
/// as a whole; never mutated incrementally.
#[derive(Debug, Serialize, Clone, Default, PartialEq, Eq)]
pub struct MenuModel {
    /// Status-bar title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Image shown next to the title (the first image emitted before
    /// the separator).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_image: Option<PathBuf>,
    /// Chart images appended below the rows, in encounter order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub chart_images: Vec<PathBuf>,
    pub rows: Vec<MenuRow>,
}

impl MenuModel {
    /// Row index that anchors the manual-refresh affordance: the first
    /// left-aligned row, matching where the status bar places its
    /// reload control.
    pub fn refresh_anchor(&self) -> Option<usize> {
        self.rows
            .iter()
            .position(|row| row.alignment == RowAlignment::Left)
    }

    /// True when a run produced nothing to display.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.primary_image.is_none()
            && self.chart_images.is_empty()
            && self.rows.is_empty()
    }
}
