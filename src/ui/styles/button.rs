// SPDX-License-Identifier: MPL-2.0
//! Centralized button styles.

use crate::ui::design_tokens::{
    opacity,
    palette::{self, BLACK, WHITE},
    radius, shadow,
};
use iced::widget::button;
use iced::{Background, Border, Color, Theme};

/// Primary action (Apply, loop toggle while looping).
pub fn primary(_theme: &Theme, status: button::Status) -> button::Style {
    let (background, border_color, shadow) = match status {
        button::Status::Hovered => (palette::ACCENT_400, palette::ACCENT_500, shadow::SM),
        button::Status::Disabled => return disabled(status),
        _ => (palette::ACCENT_500, palette::ACCENT_600, shadow::NONE),
    };

    button::Style {
        background: Some(Background::Color(background)),
        text_color: BLACK,
        border: Border {
            color: border_color,
            width: 1.0,
            radius: radius::SM.into(),
        },
        shadow,
        snap: true,
    }
}

/// Secondary action (Set start/Set end, loop toggle while idle).
/// Adapts to light/dark theme.
pub fn secondary(theme: &Theme, status: button::Status) -> button::Style {
    let is_light = matches!(theme, Theme::Light);

    let (bg_color, text_color) = if is_light {
        (palette::GRAY_100, palette::GRAY_900)
    } else {
        (palette::GRAY_700, WHITE)
    };

    match status {
        button::Status::Hovered => button::Style {
            background: Some(Background::Color(bg_color)),
            text_color,
            border: Border {
                color: palette::ACCENT_500,
                width: 1.0,
                radius: radius::SM.into(),
            },
            shadow: shadow::SM,
            snap: true,
        },
        button::Status::Disabled => disabled(status),
        _ => button::Style {
            background: Some(Background::Color(bg_color)),
            text_color,
            border: Border {
                color: palette::GRAY_400,
                width: 1.0,
                radius: radius::SM.into(),
            },
            shadow: shadow::NONE,
            snap: true,
        },
    }
}

/// Grayed out, non-interactive.
pub fn disabled(_status: button::Status) -> button::Style {
    button::Style {
        background: Some(Background::Color(palette::GRAY_200)),
        text_color: palette::GRAY_400,
        border: Border {
            color: palette::GRAY_400,
            width: 1.0,
            radius: radius::SM.into(),
        },
        shadow: shadow::NONE,
        snap: true,
    }
}

/// Flat button inside the panel header (minimize/restore).
pub fn header(_theme: &Theme, status: button::Status) -> button::Style {
    let alpha = match status {
        button::Status::Hovered => opacity::OVERLAY_MEDIUM,
        button::Status::Pressed => opacity::OVERLAY_STRONG,
        _ => opacity::TRANSPARENT,
    };

    button::Style {
        background: Some(Background::Color(Color { a: alpha, ..BLACK })),
        text_color: WHITE,
        border: Border {
            radius: radius::SM.into(),
            ..Default::default()
        },
        shadow: shadow::NONE,
        snap: true,
    }
}
