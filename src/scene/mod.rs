//! Scene files: a canvas size, a background and an ordered list of shapes,
//! saved and loaded as JSON.

mod demos;

pub use demos::{demo, DEMO_NAMES};

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::canvas::Canvas;
use crate::color::Color;
use crate::error::{Error, Result};
use crate::gradient::{GradientDirection, LinearGradient};
use crate::shapes::{Shape, Style};

/// What the canvas is cleared to before any shape is drawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Background {
    Solid(Color),
    Gradient {
        stops: LinearGradient,
        #[serde(default)]
        direction: GradientDirection,
    },
}

/// One shape and how to paint it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneItem {
    pub shape: Shape,
    pub style: Style,
}

/// A complete drawing that can be rendered to a [`Canvas`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub name: String,
    pub width: usize,
    pub height: usize,
    /// White when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Background>,
    /// Seed for ellipse outlines; entropy when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(default)]
    pub items: Vec<SceneItem>,
}

impl Scene {
    pub fn new(name: impl Into<String>, width: usize, height: usize) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            background: None,
            seed: None,
            items: Vec::new(),
        }
    }

    pub fn with_background(mut self, background: Background) -> Self {
        self.background = Some(background);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Append a shape; later items paint over earlier ones
    pub fn push(&mut self, shape: impl Into<Shape>, style: Style) -> &mut Self {
        self.items.push(SceneItem {
            shape: shape.into(),
            style,
        });
        self
    }

    /// Draw every item, in order, onto a fresh canvas
    pub fn render(&self) -> Result<Canvas> {
        tracing::debug!(
            scene = %self.name,
            width = self.width,
            height = self.height,
            items = self.items.len(),
            "rendering scene"
        );

        let mut builder = Canvas::builder(self.width, self.height);
        if let Some(seed) = self.seed {
            builder = builder.seed(seed);
        }
        let mut canvas = builder.try_build()?;

        match &self.background {
            Some(Background::Solid(color)) => {
                canvas.fill(*color);
            },
            Some(Background::Gradient { stops, direction }) => {
                canvas.fill_gradient(stops, *direction);
            },
            None => {},
        }

        for (index, item) in self.items.iter().enumerate() {
            canvas.draw(&item.shape, &item.style).map_err(|e| match e {
                Error::Validation(msg) => Error::Validation(format!("item {}: {}", index, msg)),
                other => other,
            })?;
        }
        Ok(canvas)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Save scene to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?).map_err(|e| Error::open(path, e))?;
        tracing::debug!(scene = %self.name, path = %path.display(), "saved scene");
        Ok(())
    }

    /// Load scene from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| Error::open(path, e))?;
        let scene = Self::from_json(&json)?;
        tracing::debug!(scene = %scene.name, path = %path.display(), items = scene.items.len(), "loaded scene");
        Ok(scene)
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new("untitled", 640, 480)
    }
}
