// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Payload codec.
//!
//! Category payloads are stored as JSONB next to the activity row. JSON is
//! keyed by field name and every payload struct is `#[serde(default)]`, so
//! records written before or after a field was added still decode.

use crate::models::{ActivityDetails, Category};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("failed to encode {category} payload: {source}")]
    Encode {
        category: Category,
        #[source]
        source: serde_json::Error,
    },

    #[error("malformed {category} payload: {source}")]
    Decode {
        category: Category,
        #[source]
        source: serde_json::Error,
    },
}

impl From<CodecError> for crate::error::AppError {
    fn from(err: CodecError) -> Self {
        crate::error::AppError::Internal(err.into())
    }
}

/// Column values for the two payload columns of an activity row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PayloadColumns {
    pub mahjong_data: Option<Value>,
    pub golf_data: Option<Value>,
}

/// Encode a single payload. An absent payload stays absent (SQL NULL)
/// rather than becoming an empty object.
pub fn encode<T: Serialize>(
    category: Category,
    payload: Option<&T>,
) -> Result<Option<Value>, CodecError> {
    payload
        .map(|p| serde_json::to_value(p).map_err(|source| CodecError::Encode { category, source }))
        .transpose()
}

/// Decode a single payload column. NULL decodes to `None`.
pub fn decode<T: DeserializeOwned>(
    category: Category,
    raw: Option<Value>,
) -> Result<Option<T>, CodecError> {
    raw.map(|v| serde_json::from_value(v).map_err(|source| CodecError::Decode { category, source }))
        .transpose()
}

/// Decode a payload column, treating malformed content as absent.
///
/// Used on list reads, where one bad record must not fail the whole page.
pub fn decode_lenient<T: DeserializeOwned>(
    category: Category,
    activity_id: i32,
    raw: Option<Value>,
) -> Option<T> {
    match decode(category, raw) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::warn!(
                activity_id,
                category = %category,
                error = %e,
                "Dropping malformed activity payload"
            );
            None
        }
    }
}

/// Encode the payload carried by `details` into the matching column.
pub fn encode_details(details: &ActivityDetails) -> Result<PayloadColumns, CodecError> {
    let columns = match details {
        ActivityDetails::Mahjong { data } => PayloadColumns {
            mahjong_data: encode(Category::Mahjong, data.as_ref())?,
            golf_data: None,
        },
        ActivityDetails::Golf { data } => PayloadColumns {
            mahjong_data: None,
            golf_data: encode(Category::Golf, data.as_ref())?,
        },
    };
    Ok(columns)
}

/// Rebuild [`ActivityDetails`] from a stored row, leniently.
///
/// Only the column belonging to `category` is consulted.
pub fn decode_details(
    category: Category,
    activity_id: i32,
    columns: PayloadColumns,
) -> ActivityDetails {
    match category {
        Category::Mahjong => ActivityDetails::Mahjong {
            data: decode_lenient(category, activity_id, columns.mahjong_data),
        },
        Category::Golf => ActivityDetails::Golf {
            data: decode_lenient(category, activity_id, columns.golf_data),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GolfData, MahjongData, MahjongRound};
    use serde_json::json;

    #[test]
    fn test_absent_payload_encodes_to_null() {
        let columns = encode_details(&ActivityDetails::Golf { data: None }).unwrap();
        assert_eq!(columns, PayloadColumns::default());
    }

    #[test]
    fn test_only_matching_column_is_written() {
        let details = ActivityDetails::Mahjong {
            data: Some(MahjongData {
                player_count: 3,
                rounds: vec![MahjongRound {
                    round_number: 1,
                    scores: vec![10, -5, -5],
                }],
                ..Default::default()
            }),
        };

        let columns = encode_details(&details).unwrap();

        assert!(columns.golf_data.is_none());
        let stored = columns.mahjong_data.expect("mahjong column");
        assert_eq!(stored["player_count"], 3);
        assert_eq!(stored["rounds"][0]["scores"], json!([10, -5, -5]));
    }

    #[test]
    fn test_decode_tolerates_unknown_and_missing_fields() {
        let stored = json!({ "weather": "rain", "caddie": "none" });

        let golf: GolfData = decode(Category::Golf, Some(stored)).unwrap().unwrap();

        assert_eq!(golf.weather, "rain");
        assert!(golf.scores.is_empty());
        assert!(golf.wind.is_empty());
    }

    #[test]
    fn test_decode_reports_malformed_payload() {
        let stored = json!({ "scores": "eighteen holes" });
        let result: Result<Option<GolfData>, _> = decode(Category::Golf, Some(stored));
        assert!(matches!(result, Err(CodecError::Decode { .. })));
    }

    #[test]
    fn test_lenient_decode_leaves_payload_absent() {
        let columns = PayloadColumns {
            mahjong_data: Some(json!({ "rounds": 42 })),
            golf_data: None,
        };

        let details = decode_details(Category::Mahjong, 9, columns);

        assert_eq!(details, ActivityDetails::Mahjong { data: None });
    }

    #[test]
    fn test_decode_details_ignores_other_column() {
        let columns = PayloadColumns {
            mahjong_data: Some(json!({ "player_count": 4 })),
            golf_data: Some(json!({ "wind": "strong" })),
        };

        let details = decode_details(Category::Golf, 1, columns);

        assert!(details.mahjong().is_none());
        assert_eq!(details.golf().unwrap().wind, "strong");
    }
}
