// SPDX-License-Identifier: MPL-2.0
//! Centralized styles for the player and the loop panel.

pub mod button;
pub mod container;
