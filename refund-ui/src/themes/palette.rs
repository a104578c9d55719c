use std::fmt;
use std::str::FromStr;

use crossterm::style::{Color, ContentStyle};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
    /// Fixed dark scheme with a teal highlight.
    Teal,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::Teal => "teal",
        }
    }

    /// The mode the theme toggle switches to.
    pub fn toggled(&self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark | Self::Teal => Self::Light,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "teal" => Ok(Self::Teal),
            other => Err(format!(
                "unknown theme '{other}' (expected light, dark or teal)"
            )),
        }
    }
}

const fn rgb(
    r: u8,
    g: u8,
    b: u8,
) -> Color {
    Color::Rgb { r, g, b }
}

const fn gray(level: u8) -> Color {
    rgb(level, level, level)
}

/// Label color on the filled action tags (clear, theme, instructions).
const ACTION_TEXT: Color = rgb(0xff, 0xff, 0xff);

/// Colors for every element of the calculator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    /// Calculate action and prompt labels.
    pub accent: Color,
    /// Clear and theme-toggle actions.
    pub secondary: Color,
    /// Result block and input fields.
    pub result_background: Color,
    /// Instructions action.
    pub info: Color,
}

impl Palette {
    pub const LIGHT: Palette = Palette {
        background: gray(0xf0),
        text: gray(0x00),
        accent: rgb(0x4c, 0xaf, 0x50),
        secondary: gray(0x6b),
        result_background: gray(0xf0),
        info: gray(0x6b),
    };

    pub const DARK: Palette = Palette {
        background: gray(0x2d),
        text: gray(0xe0),
        accent: rgb(0x45, 0xa0, 0x49),
        secondary: gray(0x55),
        result_background: gray(0x2d),
        info: gray(0x55),
    };

    pub const TEAL: Palette = Palette {
        background: gray(0x2e),
        text: gray(0xff),
        accent: rgb(0x00, 0xc4, 0xb4),
        secondary: gray(0x33),
        result_background: gray(0x3e),
        info: gray(0x33),
    };

    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::LIGHT,
            ThemeMode::Dark => Self::DARK,
            ThemeMode::Teal => Self::TEAL,
        }
    }
}

fn style(
    foreground: Color,
    background: Option<Color>,
) -> ContentStyle {
    ContentStyle {
        foreground_color: Some(foreground),
        background_color: background,
        ..ContentStyle::default()
    }
}

/// Presentation settings handed to whatever draws the calculator.
///
/// When `color` is off every paint method returns its input unchanged, which
/// is what piped output and tests want.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    mode: ThemeMode,
    palette: Palette,
    color: bool,
}

impl Theme {
    pub fn new(
        mode: ThemeMode,
        color: bool,
    ) -> Self {
        Self {
            mode,
            palette: Palette::for_mode(mode),
            color,
        }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    /// Switches between light and dark, returning the new mode.
    pub fn toggle(&mut self) -> ThemeMode {
        self.mode = self.mode.toggled();
        self.palette = Palette::for_mode(self.mode);
        debug!(mode = %self.mode, "theme toggled");
        self.mode
    }

    /// Label for the toggle action, naming the mode it switches to.
    pub fn toggle_label(&self) -> &'static str {
        match self.mode.toggled() {
            ThemeMode::Dark => "Dark Mode",
            _ => "Light Mode",
        }
    }

    /// Paints a block of body text, line by line so each line keeps its background.
    pub fn paint_text(
        &self,
        text: &str,
    ) -> String {
        self.paint(
            text,
            style(self.palette.text, Some(self.palette.background)),
        )
    }

    /// Paints the result block.
    pub fn paint_result(
        &self,
        text: &str,
    ) -> String {
        self.paint(
            text,
            style(self.palette.text, Some(self.palette.result_background)),
        )
    }

    /// Paints a prompt label or title in the accent color.
    pub fn paint_accent(
        &self,
        text: &str,
    ) -> String {
        self.paint(text, style(self.palette.accent, None))
    }

    /// Paints feedback from the clear and theme actions.
    pub fn paint_secondary(
        &self,
        text: &str,
    ) -> String {
        self.paint(text, style(ACTION_TEXT, Some(self.palette.secondary)))
    }

    /// Paints the instructions heading.
    pub fn paint_info(
        &self,
        text: &str,
    ) -> String {
        self.paint(text, style(ACTION_TEXT, Some(self.palette.info)))
    }

    fn paint(
        &self,
        text: &str,
        style: ContentStyle,
    ) -> String {
        if !self.color {
            return text.to_string();
        }
        text.lines()
            .map(|line| style.apply(line).to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
