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

//! Back/forward navigation history over inspected object ids.

use loupe_common::ObjectId;

/// Two stacks of previously inspected object ids plus the current one.
///
/// Direct selections push the old current id onto `back` and clear
/// `forward`; `go_back`/`go_forward` move between the stacks without
/// touching the other invariants. Neither stack ever holds the id equal to
/// `current`, and within one traversal step an id appears at most once in
/// `back`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NavigationHistory {
    current: Option<ObjectId>,
    back: Vec<ObjectId>,
    forward: Vec<ObjectId>,
}

impl NavigationHistory {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// The id currently being inspected, if any
    pub fn current(&self) -> Option<ObjectId> {
        self.current
    }

    /// Whether `go_back` would do anything
    pub fn can_go_back(&self) -> bool {
        !self.back.is_empty()
    }

    /// Whether `go_forward` would do anything
    pub fn can_go_forward(&self) -> bool {
        !self.forward.is_empty()
    }

    /// Record a direct (non-history) selection.
    ///
    /// Selecting the already-current id is a no-op. Returns whether the
    /// current id actually changed.
    pub fn select(&mut self, id: ObjectId) -> bool {
        if self.current == Some(id) {
            return false;
        }
        // neither stack may hold the id that is about to become current
        self.back.retain(|&old| old != id);
        if let Some(prev) = self.current {
            self.back.retain(|&old| old != prev);
            self.back.push(prev);
        }
        self.forward.clear();
        self.current = Some(id);
        true
    }

    /// Navigate to the previously inspected object. No-op on an empty
    /// back stack. Returns the new current id when a move happened.
    pub fn go_back(&mut self) -> Option<ObjectId> {
        let target = self.back.pop()?;
        if let Some(prev) = self.current {
            self.forward.push(prev);
        }
        self.current = Some(target);
        Some(target)
    }

    /// Forget the current id without touching either stack. Used when the
    /// inspected object no longer exists, so that selecting the same id
    /// again counts as a fresh selection.
    pub fn clear_current(&mut self) {
        self.current = None;
    }

    /// Mirror of [`Self::go_back`]
    pub fn go_forward(&mut self) -> Option<ObjectId> {
        let target = self.forward.pop()?;
        if let Some(prev) = self.current {
            self.back.push(prev);
        }
        self.current = Some(target);
        Some(target)
    }
}
