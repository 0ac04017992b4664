use serde_json::{Map, Value};

use crate::foundation::core::Point;

/// A live, on-screen idea bubble.
///
/// The idea list is owned by the host; the player only writes `x`, `y` and, when
/// recorded, `vx`, `vy` and `radius`. Display fields such as `title` ride along in
/// [`Idea::extra`] and are never interpreted.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Idea {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
    /// Horizontal velocity, if the idea drifts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vx: Option<f64>,
    /// Vertical velocity, if the idea drifts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vy: Option<f64>,
    /// Bubble radius.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    /// Uninterpreted display fields (`title`, colors, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Idea {
    /// A bare idea at `(x, y)` with no velocity, radius or display fields.
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }

    /// Builder-style title, stored as a display field.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.extra
            .insert("title".to_owned(), Value::String(title.into()));
        self
    }

    /// Current position as a point.
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// A deep copy of one idea's attributes at capture time.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EntitySnapshot {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
    /// Horizontal velocity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vx: Option<f64>,
    /// Vertical velocity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vy: Option<f64>,
    /// Bubble radius.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    /// Display fields copied verbatim; not interpolated.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EntitySnapshot {
    /// Captured position as a point.
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

impl From<&Idea> for EntitySnapshot {
    fn from(idea: &Idea) -> Self {
        Self {
            x: idea.x,
            y: idea.y,
            vx: idea.vx,
            vy: idea.vy,
            radius: idea.radius,
            extra: idea.extra.clone(),
        }
    }
}

impl From<&EntitySnapshot> for Idea {
    fn from(snap: &EntitySnapshot) -> Self {
        Self {
            x: snap.x,
            y: snap.y,
            vx: snap.vx,
            vy: snap.vy,
            radius: snap.radius,
            extra: snap.extra.clone(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/entity.rs"]
mod tests;
