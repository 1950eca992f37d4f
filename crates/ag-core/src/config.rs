//! Generator configuration
//!
//! Loaded from JSON; every field is optional and falls back to the default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigLoadError};
use crate::{DEFAULT_AREA_HEIGHT, DEFAULT_AREA_WIDTH, MAX_AREA_SIDE};

/// Parameters of the room generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Tile grid width in cells
    pub width: usize,
    /// Tile grid height in cells
    pub height: usize,
    /// Rooms below this count are logged as a degenerate layout
    pub min_rooms: usize,
    /// Placement stops once this many rooms are accepted
    pub target_rooms: usize,
    /// Placement attempts before giving up on `target_rooms`
    pub max_attempts: usize,
    /// Smallest room side length
    pub room_min_size: usize,
    /// Largest room side length
    pub room_max_size: usize,
    /// Empty cells kept between any two rooms
    pub room_spacing: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_AREA_WIDTH,
            height: DEFAULT_AREA_HEIGHT,
            min_rooms: 4,
            target_rooms: 8,
            max_attempts: 200,
            room_min_size: 3,
            room_max_size: 8,
            room_spacing: 1,
        }
    }
}

impl GeneratorConfig {
    /// Check that the largest room fits inside the grid with a one-cell wall
    /// margin on every side. A valid config always places at least one room,
    /// and every size in it converts to `i32` grid coordinates without loss.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::InvalidGenerator(msg));

        if self.width > MAX_AREA_SIDE || self.height > MAX_AREA_SIDE {
            return invalid(format!(
                "grid {}x{} exceeds the {}-cell side limit",
                self.width, self.height, MAX_AREA_SIDE
            ));
        }
        if self.room_min_size == 0 {
            return invalid("room_min_size must be at least 1".to_string());
        }
        if self.room_min_size > self.room_max_size {
            return invalid(format!(
                "room_min_size {} exceeds room_max_size {}",
                self.room_min_size, self.room_max_size
            ));
        }
        let fits = self
            .room_max_size
            .checked_add(2)
            .is_some_and(|needed| needed <= self.width && needed <= self.height);
        if !fits {
            return invalid(format!(
                "rooms up to {} cells do not fit a {}x{} grid with wall margins",
                self.room_max_size, self.width, self.height
            ));
        }
        let spacing = i32::try_from(self.room_spacing).ok();
        if spacing.is_none_or(|s| s as usize > self.width.max(self.height)) {
            return invalid(format!(
                "room_spacing {} is wider than the {}x{} grid",
                self.room_spacing, self.width, self.height
            ));
        }
        if self.target_rooms == 0 {
            return invalid("target_rooms must be at least 1".to_string());
        }
        if self.target_rooms > self.width * self.height {
            return invalid(format!(
                "target_rooms {} exceeds the {} cells of the grid",
                self.target_rooms,
                self.width * self.height
            ));
        }
        if self.min_rooms > self.target_rooms {
            return invalid(format!(
                "min_rooms {} exceeds target_rooms {}",
                self.min_rooms, self.target_rooms
            ));
        }
        if self.max_attempts == 0 {
            return invalid("max_attempts must be at least 1".to_string());
        }
        Ok(())
    }

    /// Parse and validate a JSON config
    pub fn from_json_str(contents: &str) -> Result<Self, ConfigLoadError> {
        let config: GeneratorConfig = serde_json::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(GeneratorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = GeneratorConfig::from_json_str(r#"{ "min_rooms": 2, "width": 24 }"#).unwrap();
        assert_eq!(config.min_rooms, 2);
        assert_eq!(config.width, 24);
        assert_eq!(config.height, DEFAULT_AREA_HEIGHT);
        assert_eq!(config.target_rooms, 8);
    }

    #[test]
    fn test_rooms_must_fit_grid() {
        let config = GeneratorConfig {
            width: 9,
            room_max_size: 8,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidGenerator(_))
        ));
    }

    #[test]
    fn test_min_above_max_rejected() {
        let config = GeneratorConfig {
            room_min_size: 6,
            room_max_size: 4,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = GeneratorConfig {
            min_rooms: 9,
            target_rooms: 3,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_room_spacing_must_fit_i32_and_grid() {
        let err = GeneratorConfig::from_json_str(
            r#"{"room_spacing":4294967295,"target_rooms":40,"max_attempts":2000}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigLoadError::Invalid(ConfigError::InvalidGenerator(_))));

        let config = GeneratorConfig {
            room_spacing: 41,
            ..Default::default()
        };
        assert!(config.validate().is_err());
        let config = GeneratorConfig {
            room_spacing: 40,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_huge_sizes_are_rejected_without_overflow() {
        for json in [
            r#"{"room_max_size":18446744073709551615}"#,
            r#"{"target_rooms":18446744073709551615}"#,
            r#"{"width":18446744073709551615,"height":18446744073709551615}"#,
        ] {
            let err = GeneratorConfig::from_json_str(json).unwrap_err();
            assert!(
                matches!(err, ConfigLoadError::Invalid(ConfigError::InvalidGenerator(_))),
                "{} was accepted",
                json
            );
        }
    }

    #[test]
    fn test_target_rooms_capped_by_grid_area() {
        let config = GeneratorConfig {
            width: 10,
            height: 10,
            target_rooms: 100,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        let config = GeneratorConfig {
            target_rooms: 101,
            ..config
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_json_reports_parse_error() {
        let err = GeneratorConfig::from_json_str("{ width: }").unwrap_err();
        assert!(matches!(err, ConfigLoadError::Parse(_)));
    }

    #[test]
    fn test_invalid_values_report_config_error() {
        let err = GeneratorConfig::from_json_str(r#"{ "room_min_size": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigLoadError::Invalid(ConfigError::InvalidGenerator(_))));
    }

    #[test]
    fn test_missing_file() {
        let err = GeneratorConfig::load_from_file(Path::new("/nonexistent/areagen.json")).unwrap_err();
        assert!(matches!(err, ConfigLoadError::Io(_)));
    }
}
