//! Dua query value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// The topic a caller wants a supplication for (Value Object)
///
/// Free text with no constraint beyond being non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct DuaQuery {
    content: String,
}

impl DuaQuery {
    /// Try to create a new query, rejecting empty or whitespace-only input
    pub fn try_new(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            Err(DomainError::EmptyQuery)
        } else {
            Ok(Self { content })
        }
    }

    /// Get the query content
    pub fn content(&self) -> &str {
        &self.content
    }
}

impl std::fmt::Display for DuaQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl From<DuaQuery> for String {
    fn from(query: DuaQuery) -> Self {
        query.content
    }
}

impl TryFrom<&str> for DuaQuery {
    type Error = DomainError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        DuaQuery::try_new(s)
    }
}

impl TryFrom<String> for DuaQuery {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        DuaQuery::try_new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_creation() {
        let q = DuaQuery::try_new("dua for travel").unwrap();
        assert_eq!(q.content(), "dua for travel");
        assert_eq!(q.to_string(), "dua for travel");
    }

    #[test]
    fn test_try_new_empty() {
        assert_eq!(DuaQuery::try_new(""), Err(DomainError::EmptyQuery));
        assert_eq!(DuaQuery::try_new("  \n "), Err(DomainError::EmptyQuery));
    }

    #[test]
    fn test_try_from_str() {
        let q: DuaQuery = "dua before eating".try_into().unwrap();
        assert_eq!(String::from(q), "dua before eating");
    }

    #[test]
    fn test_deserialize_goes_through_validation() {
        let q: DuaQuery = serde_json::from_str("\"dua for rain\"").unwrap();
        assert_eq!(q.content(), "dua for rain");
        assert_eq!(serde_json::to_string(&q).unwrap(), "\"dua for rain\"");

        assert!(serde_json::from_str::<DuaQuery>("\"   \"").is_err());
        assert!(serde_json::from_str::<DuaQuery>(r#"{"content": ""}"#).is_err());
    }
}
