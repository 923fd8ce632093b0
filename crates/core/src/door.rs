//! Room door placement and its edit form.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;

/// Wall of the room the door sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Wall {
    North,
    South,
    East,
    West,
}

impl Wall {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::North => "north",
            Self::South => "south",
            Self::East => "east",
            Self::West => "west",
        }
    }
}

impl std::str::FromStr for Wall {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "north" => Ok(Self::North),
            "south" => Ok(Self::South),
            "east" => Ok(Self::East),
            "west" => Ok(Self::West),
            other => Err(CoreError::Validation(format!("Unknown wall '{other}'"))),
        }
    }
}

/// Door placement as stored by the backend. Any field may be unset.
///
/// Also the body of `PUT /rooms/{id}/door`: unset fields serialize as
/// explicit `null` so the server clears them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct Door {
    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub x: Option<f64>,
    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub y: Option<f64>,
    #[validate(range(exclusive_min = 0.0))]
    #[serde(default)]
    pub width: Option<f64>,
    #[validate(range(exclusive_min = 0.0))]
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub wall: Option<Wall>,
}

impl Door {
    pub fn is_empty(&self) -> bool {
        self.x.is_none()
            && self.y.is_none()
            && self.width.is_none()
            && self.height.is_none()
            && self.wall.is_none()
    }
}

/// Text inputs of the door form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DoorForm {
    pub x: String,
    pub y: String,
    pub width: String,
    pub height: String,
    pub wall: Option<Wall>,
}

impl DoorForm {
    /// Pre-fill the form from a stored door.
    pub fn from_door(door: &Door) -> Self {
        let show = |v: Option<f64>| v.map(|n| n.to_string()).unwrap_or_default();
        Self {
            x: show(door.x),
            y: show(door.y),
            width: show(door.width),
            height: show(door.height),
            wall: door.wall,
        }
    }

    /// Parse and check the inputs. Blank fields become `None`.
    pub fn to_door(&self) -> Result<Door, CoreError> {
        let door = Door {
            x: parse_field("x", &self.x)?,
            y: parse_field("y", &self.y)?,
            width: parse_field("width", &self.width)?,
            height: parse_field("height", &self.height)?,
            wall: self.wall,
        };
        door.validate()?;
        Ok(door)
    }
}

fn parse_field(name: &str, raw: &str) -> Result<Option<f64>, CoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(CoreError::Validation(format!(
            "{name} must be a number, got '{trimmed}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    #[test]
    fn blank_fields_serialize_as_null() {
        let form = DoorForm {
            x: "".into(),
            y: "2".into(),
            width: " 1.5 ".into(),
            height: "".into(),
            wall: Some(Wall::East),
        };
        let door = form.to_door().unwrap();
        assert_eq!(
            serde_json::to_value(&door).unwrap(),
            json!({"x": null, "y": 2.0, "width": 1.5, "height": null, "wall": "east"})
        );
    }

    #[test]
    fn negative_position_is_rejected() {
        let form = DoorForm {
            x: "-1".into(),
            ..Default::default()
        };
        assert_matches!(form.to_door(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn zero_size_is_rejected() {
        let form = DoorForm {
            width: "0".into(),
            ..Default::default()
        };
        assert_matches!(form.to_door(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn non_numeric_input_is_rejected() {
        let form = DoorForm {
            height: "tall".into(),
            ..Default::default()
        };
        let err = form.to_door().unwrap_err();
        assert!(err.to_string().contains("height must be a number"));
    }

    #[test]
    fn nan_and_infinity_are_rejected() {
        for raw in ["NaN", "inf", "-infinity"] {
            let form = DoorForm {
                width: raw.into(),
                ..Default::default()
            };
            assert_matches!(form.to_door(), Err(CoreError::Validation(_)), "{raw}");
        }
        let form = DoorForm {
            x: "nan".into(),
            ..Default::default()
        };
        assert!(form.to_door().unwrap_err().to_string().contains("x must be a number"));
    }

    #[test]
    fn form_round_trips_stored_door() {
        let door = Door {
            x: Some(0.0),
            y: Some(3.0),
            width: Some(1.2),
            height: Some(2.1),
            wall: Some(Wall::North),
        };
        assert_eq!(DoorForm::from_door(&door).to_door().unwrap(), door);
        assert!(Door::default().is_empty());
    }

    #[test]
    fn wall_parses_case_insensitively() {
        assert_eq!("West".parse::<Wall>().unwrap(), Wall::West);
        assert!("up".parse::<Wall>().is_err());
    }
}
