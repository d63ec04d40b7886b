use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Catalog identifier for a movie.
///
/// The catalog uses numeric ids for its own records and legacy alphanumeric
/// ids (e.g. "tt0068646") for imported ones. There is no normalization layer
/// between the two encodings, so all comparisons go through the string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MovieId(String);

impl MovieId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for MovieId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for MovieId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<u64> for MovieId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

impl Serialize for MovieId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Round-trip numeric ids as numbers so the persisted layout matches
        // what the catalog returned.
        if let Ok(n) = self.0.parse::<u64>() {
            serializer.serialize_u64(n)
        } else {
            serializer.serialize_str(&self.0)
        }
    }
}

impl<'de> Deserialize<'de> for MovieId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IdVisitor;

        impl<'de> Visitor<'de> for IdVisitor {
            type Value = MovieId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a movie id as a number or string")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<MovieId, E> {
                Ok(MovieId(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<MovieId, E> {
                Ok(MovieId(v.to_string()))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<MovieId, E> {
                Ok(MovieId(v.to_string()))
            }
        }

        deserializer.deserialize_any(IdVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_and_string_encodings_compare_equal() {
        let from_number: MovieId = serde_json::from_str("603").unwrap();
        let from_string: MovieId = serde_json::from_str("\"603\"").unwrap();
        assert_eq!(from_number, from_string);
    }

    #[test]
    fn legacy_alphanumeric_ids_survive() {
        let id: MovieId = serde_json::from_str("\"tt0068646\"").unwrap();
        assert_eq!(id.as_str(), "tt0068646");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"tt0068646\"");
    }

    #[test]
    fn numeric_ids_serialize_as_numbers() {
        let id = MovieId::from(603u64);
        assert_eq!(serde_json::to_string(&id).unwrap(), "603");
    }
}
