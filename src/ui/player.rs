// SPDX-License-Identifier: MPL-2.0
//! Simulated host player.
//!
//! Renders the stand-in video frame with play/pause, a timeline scrubber and
//! a time readout. Before the page inserts its video, only a waiting notice
//! is shown.

use crate::domain::playback::format_time_code;
use crate::i18n::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use iced::alignment::{Horizontal, Vertical};
use iced::widget::{button, slider, text, Column, Container, Row};
use iced::{Element, Length};

/// Slider step in seconds.
const SLIDER_STEP_SECS: f64 = 0.1;

/// Messages emitted by the player widgets.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    TogglePlayback,
    /// Slider is being dragged; preview only.
    SeekPreview(f64),
    /// Slider released; seek to the previewed position.
    SeekCommit,
    NextReplay,
    ShowLoopPanel,
}

/// Events propagated to the parent application.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    None,
    TogglePlayback,
    Seek(f64),
    /// The page should replace its video with the next replay.
    NextReplay,
    ShowLoopPanel,
}

/// Scrubber state.
#[derive(Debug, Clone, Default)]
pub struct State {
    seek_preview_position: Option<f64>,
}

impl State {
    pub fn update(&mut self, message: Message) -> Event {
        match message {
            Message::TogglePlayback => Event::TogglePlayback,
            Message::SeekPreview(position) => {
                self.seek_preview_position = Some(position);
                Event::None
            }
            Message::SeekCommit => self
                .seek_preview_position
                .take()
                .map_or(Event::None, Event::Seek),
            Message::NextReplay => {
                self.seek_preview_position = None;
                Event::NextReplay
            }
            Message::ShowLoopPanel => Event::ShowLoopPanel,
        }
    }

    #[must_use]
    pub fn seek_preview_position(&self) -> Option<f64> {
        self.seek_preview_position
    }
}

/// What the player shows this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackState {
    pub is_playing: bool,
    pub position_secs: f64,
    /// `None` until the media's metadata is loaded.
    pub duration_secs: Option<f64>,
}

/// View context for rendering the player.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub state: &'a State,
    /// `None` while the page has no video.
    pub playback: Option<PlaybackState>,
    /// Offer to reopen the loop panel after it was closed.
    pub offer_loop_panel: bool,
}

pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let Some(playback) = ctx.playback else {
        return screen(text(ctx.i18n.tr("player-waiting")).size(typography::BODY).into());
    };

    let position = ctx
        .state
        .seek_preview_position()
        .unwrap_or(playback.position_secs);

    let frame = screen(
        text(format_time_code(position))
            .size(typography::TITLE_SM * 3.0)
            .into(),
    );

    let play_label = if playback.is_playing {
        ctx.i18n.tr("player-pause")
    } else {
        ctx.i18n.tr("player-play")
    };
    let play = button(text(play_label).size(typography::BODY))
        .on_press(Message::TogglePlayback)
        .height(Length::Fixed(sizing::BUTTON_HEIGHT))
        .style(styles::button::secondary);

    let duration_label = playback
        .duration_secs
        .map_or_else(|| ctx.i18n.tr("player-duration-unknown"), format_time_code);
    let readout = text(ctx.i18n.tr_with_args(
        "player-time",
        &[
            ("position", &format_time_code(position)),
            ("duration", &duration_label),
        ],
    ))
    .size(typography::CAPTION)
    .width(Length::Fixed(sizing::TIME_READOUT_WIDTH))
    .align_x(Horizontal::Right);

    let next = button(text(ctx.i18n.tr("player-next-replay")).size(typography::BODY))
        .on_press(Message::NextReplay)
        .height(Length::Fixed(sizing::BUTTON_HEIGHT))
        .style(styles::button::secondary);

    let mut controls = Row::new()
        .spacing(spacing::SM)
        .padding(spacing::XS)
        .align_y(Vertical::Center)
        .push(play)
        .push(next);

    if ctx.offer_loop_panel {
        controls = controls.push(
            button(text(ctx.i18n.tr("player-show-loop-panel")).size(typography::BODY))
                .on_press(Message::ShowLoopPanel)
                .height(Length::Fixed(sizing::BUTTON_HEIGHT))
                .style(styles::button::secondary),
        );
    }

    // The scrubber needs a known duration for its range.
    if let Some(duration) = playback.duration_secs {
        controls = controls.push(
            slider(0.0..=duration, position.min(duration), Message::SeekPreview)
                .on_release(Message::SeekCommit)
                .width(Length::Fill)
                .step(SLIDER_STEP_SECS),
        );
    } else {
        controls = controls.push(Container::new(text("")).width(Length::Fill));
    }

    Column::new().push(frame).push(controls.push(readout)).into()
}

fn screen(content: Element<'_, Message>) -> Element<'_, Message> {
    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(Horizontal::Center)
        .align_y(Vertical::Center)
        .style(styles::container::screen)
        .into()
}
