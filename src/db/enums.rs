use serde::{Deserialize, Serialize};

/// The two listable entity kinds that carry shows and genres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Venue,
    Artist,
}

impl EntityKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Venue => "venue",
            Self::Artist => "artist",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_kind_as_str() {
        assert_eq!(EntityKind::Venue.as_str(), "venue");
        assert_eq!(EntityKind::Artist.as_str(), "artist");
    }
}
