use std::{fs, path::Path};

use anyhow::Context as _;
use serde::Deserialize;

use contextual::{Buttons, PointerInput, Point, Size, Window};

use crate::menu::Page;

/// Opens the left menu, picks a color, opens a row menu, scrolls the list
/// underneath it, dismisses it and finally opens a menu close enough to the
/// bottom right corner that it has to flip.
pub const BUILTIN: &str = r#"
[[step]]
action = "click"
x = 100.0
y = 150.0
button = "secondary"

[[step]]
action = "click"
x = 150.0
y = 343.0

[[step]]
action = "frame"

[[step]]
action = "click"
x = 600.0
y = 140.0
button = "secondary"

[[step]]
action = "scroll"
dy = 30.0

[[step]]
action = "click"
x = 100.0
y = 500.0

[[step]]
action = "click"
x = 780.0
y = 580.0
button = "secondary"

[[step]]
action = "press"
x = 20.0
y = 20.0

[[step]]
action = "release"
x = 20.0
y = 20.0
"#;

#[derive(Deserialize, Default, Debug)]
pub struct Script {
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>
}

#[derive(Deserialize, Clone, Copy, PartialEq, Debug)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    Press {
        x: f32,
        y: f32,
        #[serde(default)]
        button: Button
    },
    Release {
        x: f32,
        y: f32
    },
    /// A press and a release delivered in the same frame.
    Click {
        x: f32,
        y: f32,
        #[serde(default)]
        button: Button
    },
    Scroll {
        dy: f32
    },
    Resize {
        width: f32,
        height: f32
    },
    /// Runs a frame without any input.
    Frame
}

#[derive(Deserialize, Clone, Copy, Default, PartialEq, Eq, Debug)]
#[serde(rename_all = "snake_case")]
pub enum Button {
    #[default]
    Primary,
    Secondary,
    Tertiary
}

impl Script {
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        toml::from_str(text).context("invalid script")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display()))?;

        Self::parse(&text)
            .with_context(|| format!("failed to parse script {}", path.display()))
    }

    #[inline]
    pub fn builtin() -> anyhow::Result<Self> {
        Self::parse(BUILTIN)
    }
}

impl Step {
    /// Feeds the step's input to `window` and `page`. The caller runs the frame.
    pub fn apply(&self, window: &mut Window, page: &mut Page) {
        match *self {
            Step::Press { x, y, button } =>
                window.pointer(PointerInput::press(Point::new(x, y), button.into())),
            Step::Release { x, y } =>
                window.pointer(PointerInput::release(Point::new(x, y))),
            Step::Click { x, y, button } => {
                window.pointer(PointerInput::press(Point::new(x, y), button.into()));
                window.pointer(PointerInput::release(Point::new(x, y)));
            }
            Step::Scroll { dy } => page.scroll_by(dy, window.size()),
            Step::Resize { width, height } => window.resize(Size::new(width, height)),
            Step::Frame => { }
        }
    }
}

impl From<Button> for Buttons {
    #[inline]
    fn from(button: Button) -> Self {
        match button {
            Button::Primary => Buttons::PRIMARY,
            Button::Secondary => Buttons::SECONDARY,
            Button::Tertiary => Buttons::TERTIARY
        }
    }
}
