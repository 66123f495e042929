// Loupe - Interactive Object Inspector
// Copyright (C) 2026 The Loupe Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Type-specific inspector views and their dispatcher
//!
//! Each view is a strategy with an applicability predicate over the latest
//! [`ObjectInfo`]. The registry evaluates the strategies in a fixed priority
//! order and hands the data page to the first match. Predicates are not
//! mutually exclusive, so the order is part of the contract: the generic
//! repr view matches everything and must stay last.

use std::fmt::Debug;

use loupe_common::{ObjectId, ObjectInfo};
use ratatui::{layout::Rect, Frame};

use crate::data::DataManager;

pub mod data_frame;
pub mod elements;
pub mod entries;
pub mod file_handle;
pub mod function;
pub mod image;
pub mod repr;
pub mod string;

pub use data_frame::DataFrameInspector;
pub use elements::ElementsInspector;
pub use entries::EntriesInspector;
pub use file_handle::FileHandleInspector;
pub use function::FunctionInspector;
pub use image::ImageInspector;
pub use repr::ReprInspector;
pub use string::StringInspector;

/// Identity of an inspector view, mostly for status lines and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InspectorKind {
    /// Open file handle with read progress
    FileHandle,
    /// Callable with source code
    Function,
    /// String content
    Str,
    /// Ordered sequence of elements
    Elements,
    /// Mapping entries
    Entries,
    /// DataFrame-style table
    DataFrame,
    /// Encoded image
    Image,
    /// Generic repr fallback
    Repr,
}

impl InspectorKind {
    /// Display name for the view
    pub fn name(&self) -> &'static str {
        match self {
            Self::FileHandle => "File",
            Self::Function => "Code",
            Self::Str => "String",
            Self::Elements => "Elements",
            Self::Entries => "Entries",
            Self::DataFrame => "Table",
            Self::Image => "Image",
            Self::Repr => "Repr",
        }
    }
}

/// One type-specific view strategy.
pub trait Inspector: Debug {
    /// Which view this is
    fn kind(&self) -> InspectorKind;

    /// Whether this view can render the given object
    fn applies_to(&self, info: &ObjectInfo) -> bool;

    /// Take fresh object info, rebuilding cached rows/derived data
    fn set_object_info(&mut self, info: &ObjectInfo, dm: &DataManager);

    /// Short summary line shown above the rendered view
    fn label(&self) -> String;

    /// Render into the data-page area (the surrounding border is the
    /// panel's responsibility)
    fn render(&mut self, frame: &mut Frame<'_>, area: Rect, dm: &DataManager);

    /// Drop per-view state (selection, scroll) when the view is torn down
    fn reset(&mut self) {}

    /// Move the row selection, for views with selectable children
    fn move_selection(&mut self, delta: i32) {
        let _ = delta;
    }

    /// Id of the currently selected child value, if any
    fn selected_object(&self) -> Option<ObjectId> {
        None
    }
}

/// Ordered strategy list with first-match dispatch.
///
/// Re-dispatch tears the old view down only when the winning strategy
/// actually changes; an info refresh that keeps the same winner just feeds
/// it fresh data and preserves its scroll/selection state.
#[derive(Debug)]
pub struct InspectorRegistry {
    views: Vec<Box<dyn Inspector>>,
    active: Option<usize>,
}

impl Default for InspectorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl InspectorRegistry {
    /// Create the registry with the standard priority order
    pub fn new() -> Self {
        Self {
            views: vec![
                Box::new(FileHandleInspector::new()),
                Box::new(FunctionInspector::new()),
                Box::new(StringInspector::new()),
                Box::new(ElementsInspector::new()),
                Box::new(EntriesInspector::new()),
                Box::new(DataFrameInspector::new()),
                Box::new(ImageInspector::new()),
                Box::new(ReprInspector::new()),
            ],
            active: None,
        }
    }

    /// Re-evaluate the strategies against fresh info and feed the winner
    pub fn update(&mut self, info: &ObjectInfo, dm: &DataManager) {
        // the fallback strategy matches everything, so a winner always exists
        let Some(winner) = self.views.iter().position(|view| view.applies_to(info)) else {
            return;
        };

        if self.active != Some(winner) {
            if let Some(old) = self.active {
                self.views[old].reset();
            }
            tracing::debug!("Inspector view changed to {:?}", self.views[winner].kind());
            self.active = Some(winner);
        }

        self.views[winner].set_object_info(info, dm);
    }

    /// Tear down the active view (the inspected object went away)
    pub fn clear(&mut self) {
        if let Some(old) = self.active.take() {
            self.views[old].reset();
        }
    }

    /// Kind of the active view, if any
    pub fn active_kind(&self) -> Option<InspectorKind> {
        self.active.map(|idx| self.views[idx].kind())
    }

    /// Active view for rendering/selection
    pub fn active_view(&mut self) -> Option<&mut Box<dyn Inspector>> {
        self.active.map(|idx| &mut self.views[idx])
    }

    /// Label of the active view
    pub fn label(&self) -> Option<String> {
        self.active.map(|idx| self.views[idx].label())
    }
}

/// Row selection and scroll window shared by the grid views
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct GridState {
    pub selected: usize,
    pub scroll: usize,
}

impl GridState {
    pub fn move_selection(&mut self, delta: i32, len: usize) {
        if len == 0 {
            self.selected = 0;
            return;
        }
        let max = len as i32 - 1;
        self.selected = (self.selected as i32 + delta).clamp(0, max) as usize;
    }

    /// Clamp the selection to the row count and slide the scroll window so
    /// the selected row stays visible. Returns the window as a range.
    pub fn window(&mut self, len: usize, visible: usize) -> std::ops::Range<usize> {
        if len == 0 || visible == 0 {
            return 0..0;
        }
        self.selected = self.selected.min(len - 1);
        if self.selected < self.scroll {
            self.scroll = self.selected;
        } else if self.selected >= self.scroll + visible {
            self.scroll = self.selected + 1 - visible;
        }
        self.scroll..(self.scroll + visible).min(len)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Count terminated lines: a trailing newline does not start another
/// line, an empty string has zero lines.
pub(crate) fn line_count_terminated(content: &str) -> usize {
    content.lines().count()
}

/// Singular/plural helper for labels
pub(crate) fn pluralize(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::backend::BackendHandle;
    use crate::config::Config;
    use loupe_common::ValueSummary;
    use tokio::sync::mpsc;

    pub(crate) fn test_dm() -> DataManager {
        let (backend, _commands) = BackendHandle::channel();
        let (bus, _events) = mpsc::unbounded_channel();
        DataManager::new(&Config::default(), backend, bus)
    }

    fn bare_info() -> ObjectInfo {
        ObjectInfo::new(ObjectId(1), "<object>", "object", ObjectId(2))
    }

    #[test]
    fn bare_info_matches_only_the_fallback() {
        let registry = InspectorRegistry::new();
        let info = bare_info();

        let matching: Vec<InspectorKind> = registry
            .views
            .iter()
            .filter(|view| view.applies_to(&info))
            .map(|view| view.kind())
            .collect();
        assert_eq!(matching, vec![InspectorKind::Repr]);
    }

    #[test]
    fn elements_win_over_the_fallback() {
        let mut registry = InspectorRegistry::new();
        let dm = test_dm();

        let mut info = bare_info();
        info.elements = Some(vec![ValueSummary::new(ObjectId(10), "1")]);
        registry.update(&info, &dm);

        assert_eq!(registry.active_kind(), Some(InspectorKind::Elements));
    }

    #[test]
    fn file_content_wins_over_elements() {
        let mut registry = InspectorRegistry::new();
        let dm = test_dm();

        let mut info = bare_info();
        info.elements = Some(vec![]);
        info.file_content = Some("line".into());
        registry.update(&info, &dm);

        assert_eq!(registry.active_kind(), Some(InspectorKind::FileHandle));
    }

    #[test]
    fn string_type_beats_elements_in_priority() {
        // a predicate conflict is resolved purely by order
        let mut registry = InspectorRegistry::new();
        let dm = test_dm();

        let mut info = bare_info();
        info.type_name = "str".into();
        info.string_content = Some("x".into());
        info.elements = Some(vec![]);
        registry.update(&info, &dm);

        assert_eq!(registry.active_kind(), Some(InspectorKind::Str));
    }

    #[test]
    fn same_winner_keeps_selection_state() {
        let mut registry = InspectorRegistry::new();
        let dm = test_dm();

        let mut info = bare_info();
        info.elements = Some(vec![
            ValueSummary::new(ObjectId(10), "1"),
            ValueSummary::new(ObjectId(11), "2"),
        ]);
        registry.update(&info, &dm);
        registry.active_view().unwrap().move_selection(1);
        assert_eq!(registry.active_view().unwrap().selected_object(), Some(ObjectId(11)));

        // refresh with the same shape: selection survives
        registry.update(&info, &dm);
        assert_eq!(registry.active_view().unwrap().selected_object(), Some(ObjectId(11)));
    }

    #[test]
    fn winner_change_resets_the_outgoing_view() {
        let mut registry = InspectorRegistry::new();
        let dm = test_dm();

        let mut list_info = bare_info();
        list_info.elements = Some(vec![
            ValueSummary::new(ObjectId(10), "1"),
            ValueSummary::new(ObjectId(11), "2"),
        ]);
        registry.update(&list_info, &dm);
        registry.active_view().unwrap().move_selection(1);

        registry.update(&bare_info(), &dm);
        assert_eq!(registry.active_kind(), Some(InspectorKind::Repr));

        // back to the list: selection starts over
        registry.update(&list_info, &dm);
        assert_eq!(registry.active_view().unwrap().selected_object(), Some(ObjectId(10)));
    }

    #[test]
    fn clear_tears_down_the_active_view() {
        let mut registry = InspectorRegistry::new();
        let dm = test_dm();

        registry.update(&bare_info(), &dm);
        assert!(registry.active_kind().is_some());

        registry.clear();
        assert_eq!(registry.active_kind(), None);
        assert_eq!(registry.label(), None);
    }

    #[test]
    fn grid_window_follows_the_selection() {
        let mut grid = GridState::default();
        assert_eq!(grid.window(10, 3), 0..3);

        grid.move_selection(5, 10);
        assert_eq!(grid.window(10, 3), 3..6);

        grid.move_selection(-5, 10);
        assert_eq!(grid.window(10, 3), 0..3);

        // selection clamps at the edges
        grid.move_selection(100, 10);
        assert_eq!(grid.selected, 9);
        grid.move_selection(-100, 10);
        assert_eq!(grid.selected, 0);

        // shrinking data pulls the selection back in range
        grid.move_selection(9, 10);
        grid.window(10, 3);
        assert_eq!(grid.window(2, 3), 0..2);
        assert_eq!(grid.selected, 1);
    }

    #[test]
    fn line_counting_matches_label_semantics() {
        assert_eq!(line_count_terminated("hi"), 1);
        assert_eq!(line_count_terminated("hi\n"), 1);
        assert_eq!(line_count_terminated("a\nb"), 2);
        assert_eq!(line_count_terminated(""), 0);
    }
}
