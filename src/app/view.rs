// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! The player fills the window; the loop panel floats above it at its
//! dragged offset once a video surface has been acquired.

use super::Message;
use crate::i18n::I18n;
use crate::ui::design_tokens::{spacing, typography};
use crate::ui::loop_panel;
use crate::ui::player;
use crate::ui::styles;
use iced::widget::{text, Column, Container, Stack};
use iced::{Element, Length, Padding};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub player: &'a player::State,
    pub playback: Option<player::PlaybackState>,
    /// `None` until the loop controller exists.
    pub loop_panel: Option<&'a loop_panel::State>,
    pub offer_loop_panel: bool,
    pub config_warning: Option<&'a str>,
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let player = player::view(player::ViewContext {
        i18n: ctx.i18n,
        state: ctx.player,
        playback: ctx.playback,
        offer_loop_panel: ctx.offer_loop_panel,
    })
    .map(Message::Player);

    let mut base = Column::new().width(Length::Fill).height(Length::Fill).push(player);
    if let Some(warning) = ctx.config_warning {
        base = base.push(
            Container::new(
                text(format!("{}: {warning}", ctx.i18n.tr("error-config")))
                    .size(typography::CAPTION)
                    .style(styles::container::status_text(true)),
            )
            .padding(spacing::XS),
        );
    }

    let Some(panel_state) = ctx.loop_panel else {
        return base.into();
    };

    let offset = panel_state.offset();
    let panel = loop_panel::view(loop_panel::ViewContext {
        i18n: ctx.i18n,
        state: panel_state,
    })
    .map(Message::LoopPanel);

    let positioned = Container::new(panel).padding(Padding {
        top: offset.y,
        left: offset.x,
        ..Padding::ZERO
    });

    Stack::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .push(base)
        .push(positioned)
        .into()
}
