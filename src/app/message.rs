// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::ui::loop_panel;
use crate::ui::player;
use std::path::PathBuf;
use std::time::Instant;

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Player(player::Message),
    LoopPanel(loop_panel::Message),
    /// Host event-loop tick driving the simulated page.
    Tick(Instant),
    WindowCloseRequested(iced::window::Id),
}

/// Runtime flags passed from the command line.
#[derive(Debug, Clone, Default)]
pub struct Flags {
    /// Optional locale override (`--lang`).
    pub lang: Option<String>,
    /// Optional config directory (`--config-dir`).
    pub config_dir: Option<PathBuf>,
}
