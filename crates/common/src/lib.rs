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

//! Loupe Common - Shared functionality for Loupe components
//!
//! This crate provides the data model spoken between the inspector frontend
//! and an execution backend, plus shared formatting and logging utilities.

/// Wire types: object metadata, backend commands, and workbench events
pub mod types;

/// Display formatting helpers for object ids and reprs
pub mod format;
/// Logging setup and utilities for consistent logging across Loupe components
pub mod logging;

pub use format::*;
pub use types::*;
