// SPDX-License-Identifier: MPL-2.0
//! Loop state snapshot.

use super::range::LoopRange;

/// Looping configuration of one controller: the enabled flag and the
/// optional range.
///
/// The range is absent until the user sets a start or end point at least
/// once. Looping only has an effect while both `enabled` is true and a range
/// is present.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LoopState {
    pub enabled: bool,
    pub range: Option<LoopRange>,
}

impl LoopState {
    /// Returns the range when looping is enabled and a range exists.
    #[must_use]
    pub fn active_range(&self) -> Option<LoopRange> {
        if self.enabled {
            self.range
        } else {
            None
        }
    }

    /// Returns true if looping currently affects playback.
    #[must_use]
    pub fn is_looping(&self) -> bool {
        self.active_range().is_some()
    }

    /// Returns true if a range has been set.
    #[must_use]
    pub fn has_range(&self) -> bool {
        self.range.is_some()
    }
}
