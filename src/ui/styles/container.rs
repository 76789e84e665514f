// SPDX-License-Identifier: MPL-2.0
//! Container styles.

use crate::ui::design_tokens::{
    opacity,
    palette::{self, BLACK, WHITE},
    radius, shadow,
};
use iced::widget::container;
use iced::{Background, Border, Color, Theme};

/// Floating loop panel body.
///
/// The color is derived from the active Iced `Theme` background, with a slight
/// opacity, so the panel stays readable in both light and dark modes.
pub fn panel(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();
    let base = palette.background.base.color;

    container::Style {
        background: Some(Background::Color(Color::from_rgba(
            base.r,
            base.g,
            base.b,
            opacity::SURFACE,
        ))),
        border: Border {
            color: Color {
                a: opacity::OVERLAY_SUBTLE,
                ..WHITE
            },
            width: 1.0,
            radius: radius::MD.into(),
        },
        shadow: shadow::LG,
        ..Default::default()
    }
}

/// Panel header strip; doubles as the drag handle.
pub fn panel_header(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color {
            a: opacity::OVERLAY_STRONG,
            ..BLACK
        })),
        text_color: Some(WHITE),
        border: Border {
            radius: radius::MD.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Area standing in for the video frame.
pub fn screen(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(palette::SCREEN)),
        text_color: Some(palette::GRAY_200),
        ..Default::default()
    }
}

/// Text style for the status line; errors are tinted.
pub fn status_text(is_error: bool) -> impl Fn(&Theme) -> iced::widget::text::Style {
    move |_theme: &Theme| iced::widget::text::Style {
        color: is_error.then_some(palette::ERROR_500),
    }
}
