use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeKind {
    Dark,
    Light,
}

impl ThemeKind {
    pub fn from_config_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "light" => ThemeKind::Light,
            _ => ThemeKind::Dark,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub kind: ThemeKind,
    pub surface_bg: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub overlay_border: Color,
    pub accent: Color,
    pub header_accent_fg: Color,
    pub header_accent_bg: Color,
    pub row_highlight_bg: Color,
    pub gauge_filled: Color,
    pub gauge_unfilled: Color,
    pub sparkline_color: Color,
    pub statusbar_bg: Color,
    pub pill_key_fg: Color,
    pub pill_key_bg: Color,
    pub pill_desc_fg: Color,
    pub status_ok: Color,
    pub status_warn: Color,
    pub status_err: Color,
}

impl Theme {
    pub fn from_config(name: &str) -> Self {
        match ThemeKind::from_config_str(name) {
            ThemeKind::Dark => Self::dark(),
            ThemeKind::Light => Self::light(),
        }
    }

    pub fn dark() -> Self {
        Theme {
            kind: ThemeKind::Dark,
            surface_bg: Color::Rgb(0x1f, 0x1f, 0x23),
            text_primary: Color::Rgb(0xee, 0xee, 0xf0),
            text_secondary: Color::Rgb(0x9a, 0x9a, 0xa6),
            overlay_border: Color::Rgb(0x4a, 0x4a, 0x55),
            accent: Color::Rgb(0xc6, 0xa0, 0xf6),
            header_accent_fg: Color::Rgb(0x1f, 0x1f, 0x23),
            header_accent_bg: Color::Rgb(0x4c, 0xaf, 0x50),
            row_highlight_bg: Color::Rgb(0x33, 0x33, 0x3d),
            gauge_filled: Color::Rgb(0x4c, 0xaf, 0x50),
            gauge_unfilled: Color::Rgb(0x2a, 0x2a, 0x30),
            sparkline_color: Color::Rgb(0x89, 0xb4, 0xfa),
            statusbar_bg: Color::Rgb(0x18, 0x18, 0x1b),
            pill_key_fg: Color::Rgb(0x1f, 0x1f, 0x23),
            pill_key_bg: Color::Rgb(0x89, 0xb4, 0xfa),
            pill_desc_fg: Color::Rgb(0xcd, 0xd6, 0xf4),
            status_ok: Color::Rgb(0x4c, 0xaf, 0x50),
            status_warn: Color::Rgb(0xf9, 0xe2, 0xaf),
            status_err: Color::Rgb(0xf3, 0x8b, 0xa8),
        }
    }

    pub fn light() -> Self {
        Theme {
            kind: ThemeKind::Light,
            surface_bg: Color::Rgb(0xf5, 0xf5, 0xf7),
            text_primary: Color::Rgb(0x1f, 0x1f, 0x23),
            text_secondary: Color::Rgb(0x5c, 0x5f, 0x77),
            overlay_border: Color::Rgb(0xac, 0xb0, 0xbe),
            accent: Color::Rgb(0x88, 0x39, 0xef),
            header_accent_fg: Color::Rgb(0xff, 0xff, 0xff),
            header_accent_bg: Color::Rgb(0x2e, 0x7d, 0x32),
            row_highlight_bg: Color::Rgb(0xdc, 0xe0, 0xe8),
            gauge_filled: Color::Rgb(0x2e, 0x7d, 0x32),
            gauge_unfilled: Color::Rgb(0xe6, 0xe9, 0xef),
            sparkline_color: Color::Rgb(0x1e, 0x66, 0xf5),
            statusbar_bg: Color::Rgb(0xe6, 0xe9, 0xef),
            pill_key_fg: Color::Rgb(0xff, 0xff, 0xff),
            pill_key_bg: Color::Rgb(0x1e, 0x66, 0xf5),
            pill_desc_fg: Color::Rgb(0x4c, 0x4f, 0x69),
            status_ok: Color::Rgb(0x2e, 0x7d, 0x32),
            status_warn: Color::Rgb(0xdf, 0x8e, 0x1d),
            status_err: Color::Rgb(0xd2, 0x0f, 0x39),
        }
    }
}
