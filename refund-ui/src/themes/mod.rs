mod palette;

pub use palette::{Palette, Theme, ThemeMode};
