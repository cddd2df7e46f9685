//! Model value object representing a generative model

use super::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Generative models the dua pipeline can target (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    Gemini15Flash,
    Gemini15Pro,
    Gemini20Flash,
    Gemini25Flash,
    Gemini25Pro,
    // Custom
    Custom(String),
}

impl Model {
    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::Gemini15Flash => "gemini-1.5-flash",
            Model::Gemini15Pro => "gemini-1.5-pro",
            Model::Gemini20Flash => "gemini-2.0-flash",
            Model::Gemini25Flash => "gemini-2.5-flash",
            Model::Gemini25Pro => "gemini-2.5-pro",
            Model::Custom(s) => s,
        }
    }
}

impl Default for Model {
    /// Returns the default model (gemini-1.5-flash)
    fn default() -> Self {
        Model::Gemini15Flash
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = DomainError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        Ok(match s {
            "" => {
                return Err(DomainError::InvalidModel(
                    "model name cannot be empty".to_string(),
                ));
            }
            "gemini-1.5-flash" => Model::Gemini15Flash,
            "gemini-1.5-pro" => Model::Gemini15Pro,
            "gemini-2.0-flash" => Model::Gemini20Flash,
            "gemini-2.5-flash" => Model::Gemini25Flash,
            "gemini-2.5-pro" => Model::Gemini25Pro,
            other => Model::Custom(other.to_string()),
        })
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_roundtrip() {
        for model in [
            Model::Gemini15Flash,
            Model::Gemini15Pro,
            Model::Gemini20Flash,
            Model::Gemini25Flash,
            Model::Gemini25Pro,
        ] {
            let s = model.to_string();
            let parsed: Model = s.parse().unwrap();
            assert_eq!(model, parsed);
        }
    }

    #[test]
    fn test_custom_model() {
        let model: Model = "gemini-exp-1206".parse().unwrap();
        assert_eq!(model, Model::Custom("gemini-exp-1206".to_string()));
        assert_eq!(model.to_string(), "gemini-exp-1206");
    }

    #[test]
    fn test_empty_model_is_rejected() {
        assert!("".parse::<Model>().is_err());
        assert!("   ".parse::<Model>().is_err());
    }

    #[test]
    fn test_model_default() {
        let model = Model::default();
        assert_eq!(model, Model::Gemini15Flash);
    }

    #[test]
    fn test_model_deserialize() {
        let model: Model = serde_json::from_str("\"gemini-2.0-flash\"").unwrap();
        assert_eq!(model, Model::Gemini20Flash);
        assert!(serde_json::from_str::<Model>("\"\"").is_err());
    }
}
