// SPDX-License-Identifier: MPL-2.0
//! Loop panel rendering.

use super::{Feedback, Message, State};
use crate::domain::playback::format_time_code;
use crate::i18n::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use iced::alignment::Vertical;
use iced::widget::{button, container, mouse_area, text, text_input, Column, Container, Row};
use iced::{mouse, Element, Length};

/// Contextual data needed to render the panel.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub state: &'a State,
}

/// Render the floating panel (header only while minimized).
pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let mut content = Column::new()
        .width(Length::Fixed(sizing::PANEL_WIDTH))
        .push(build_header(&ctx));

    if !ctx.state.is_minimized() {
        content = content.push(build_body(&ctx));
    }

    Container::new(content).style(styles::container::panel).into()
}

fn build_header<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let title = text(ctx.i18n.tr("loop-panel-title")).size(typography::TITLE_SM);

    let toggle_label = if ctx.state.is_minimized() {
        ctx.i18n.tr("loop-panel-restore")
    } else {
        ctx.i18n.tr("loop-panel-minimize")
    };
    let minimize = button(text(toggle_label).size(typography::CAPTION))
        .on_press(Message::ToggleMinimized)
        .style(styles::button::header);
    let close = button(text(ctx.i18n.tr("loop-panel-close")).size(typography::CAPTION))
        .on_press(Message::ClosePressed)
        .style(styles::button::header);

    // Only the title area starts a drag; the button keeps its own clicks.
    let handle = mouse_area(
        Container::new(title)
            .width(Length::Fill)
            .height(Length::Fixed(sizing::PANEL_HEADER_HEIGHT))
            .align_y(Vertical::Center),
    )
    .on_press(Message::HeaderPressed)
    .on_release(Message::DragReleased)
    .interaction(if ctx.state.is_dragging() {
        mouse::Interaction::Grabbing
    } else {
        mouse::Interaction::Grab
    });

    let row = Row::new()
        .spacing(spacing::XS)
        .align_y(Vertical::Center)
        .push(handle)
        .push(minimize)
        .push(close);

    Container::new(row)
        .padding([spacing::XXS, spacing::XS])
        .width(Length::Fill)
        .style(styles::container::panel_header)
        .into()
}

fn build_body<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let i18n = ctx.i18n;
    let state = ctx.state;

    let marks = Row::new()
        .spacing(spacing::XS)
        .push(
            button(text(i18n.tr("loop-set-start")).size(typography::BODY))
                .on_press(Message::SetStartPressed)
                .style(styles::button::secondary),
        )
        .push(
            button(text(i18n.tr("loop-set-end")).size(typography::BODY))
                .on_press(Message::SetEndPressed)
                .style(styles::button::secondary),
        );

    let placeholder = i18n.tr("loop-time-placeholder");
    let inputs = Row::new()
        .spacing(spacing::XS)
        .align_y(Vertical::Center)
        .push(text(i18n.tr("loop-start-label")).size(typography::CAPTION))
        .push(
            text_input(&placeholder, state.start_input())
                .on_input(Message::StartInputChanged)
                .on_submit(Message::ApplyPressed)
                .size(typography::BODY)
                .width(Length::Fixed(sizing::INPUT_WIDTH)),
        )
        .push(text(i18n.tr("loop-end-label")).size(typography::CAPTION))
        .push(
            text_input(&placeholder, state.end_input())
                .on_input(Message::EndInputChanged)
                .on_submit(Message::ApplyPressed)
                .size(typography::BODY)
                .width(Length::Fixed(sizing::INPUT_WIDTH)),
        );

    let loop_state = state.loop_state();
    let toggle_label = if loop_state.enabled {
        i18n.tr("loop-toggle-on")
    } else {
        i18n.tr("loop-toggle-off")
    };
    let toggle = button(text(toggle_label).size(typography::BODY))
        .on_press_maybe(
            loop_state
                .has_range()
                .then_some(Message::ToggleLoopPressed),
        )
        .style(if loop_state.is_looping() {
            styles::button::primary
        } else {
            styles::button::secondary
        });

    let actions = Row::new()
        .spacing(spacing::XS)
        .push(
            button(text(i18n.tr("loop-apply")).size(typography::BODY))
                .on_press(Message::ApplyPressed)
                .style(styles::button::primary),
        )
        .push(toggle);

    let (status, is_error) = status_line(i18n, state);
    let status = text(status)
        .size(typography::CAPTION)
        .style(styles::container::status_text(is_error));

    container(
        Column::new()
            .spacing(spacing::XS)
            .push(marks)
            .push(inputs)
            .push(actions)
            .push(status),
    )
    .padding(spacing::SM)
    .into()
}

/// Text for the status line and whether it reports an error.
pub(crate) fn status_line(i18n: &I18n, state: &State) -> (String, bool) {
    match state.feedback() {
        Feedback::Error(key) => return (i18n.tr(key), true),
        Feedback::Info(key) => return (i18n.tr(key), false),
        Feedback::None => {}
    }

    let loop_state = state.loop_state();
    match loop_state.range {
        None => (i18n.tr("loop-status-no-range"), false),
        Some(range) => {
            let start = format_time_code(range.start());
            let end = format_time_code(range.end());
            let key = if loop_state.enabled {
                "loop-status-looping"
            } else {
                "loop-status-range"
            };
            (
                i18n.tr_with_args(key, &[("start", &start), ("end", &end)]),
                false,
            )
        }
    }
}
