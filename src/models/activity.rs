// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Activity model for storage and API.
//!
//! An activity is one logged session. Its category is carried by
//! [`ActivityDetails`], so the category tag and the payload that goes with it
//! can never disagree.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Kind of leisure activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Mahjong,
    Golf,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Mahjong => "mahjong",
            Category::Golf => "golf",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mahjong" => Ok(Category::Mahjong),
            "golf" => Ok(Category::Golf),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown category: {0:?}")]
pub struct UnknownCategory(pub String);

/// Category tag plus the payload that belongs to it.
///
/// Serialized inline into the activity object as `category` and either
/// `mahjong_data` or `golf_data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "lowercase")]
pub enum ActivityDetails {
    Mahjong {
        #[serde(
            rename = "mahjong_data",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        data: Option<MahjongData>,
    },
    Golf {
        #[serde(rename = "golf_data", default, skip_serializing_if = "Option::is_none")]
        data: Option<GolfData>,
    },
}

impl ActivityDetails {
    pub fn category(&self) -> Category {
        match self {
            ActivityDetails::Mahjong { .. } => Category::Mahjong,
            ActivityDetails::Golf { .. } => Category::Golf,
        }
    }

    pub fn mahjong(&self) -> Option<&MahjongData> {
        match self {
            ActivityDetails::Mahjong { data } => data.as_ref(),
            _ => None,
        }
    }

    pub fn golf(&self) -> Option<&GolfData> {
        match self {
            ActivityDetails::Golf { data } => data.as_ref(),
            _ => None,
        }
    }
}

/// Stored activity record, as returned by create and list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: i32,
    pub user_id: String,
    #[serde(flatten)]
    pub details: ActivityDetails,
    pub played_at: DateTime<Utc>,
    pub place_name: String,
    pub summary_text: String,
    /// Net points for mahjong, strokes for golf
    pub primary_score: i32,
    pub image_urls: Vec<String>,
}

impl Activity {
    pub fn category(&self) -> Category {
        self.details.category()
    }
}

/// Request body for creating an activity.
///
/// Identity and owner are assigned by the server; any `id` or `user_id` in
/// the body is ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewActivity {
    #[serde(flatten)]
    pub details: ActivityDetails,
    /// Defaults to the creation time when absent
    #[serde(default)]
    pub played_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub place_name: String,
    #[serde(default)]
    pub summary_text: String,
    #[serde(default)]
    pub primary_score: i32,
    #[serde(default)]
    pub image_urls: Vec<String>,
}

impl NewActivity {
    /// Attach server-assigned identity, owner and timestamp.
    pub fn into_activity(self, id: i32, user_id: String, played_at: DateTime<Utc>) -> Activity {
        Activity {
            id,
            user_id,
            details: self.details,
            played_at,
            place_name: self.place_name,
            summary_text: self.summary_text,
            primary_score: self.primary_score,
            image_urls: self.image_urls,
        }
    }
}

/// Single-activity lookup projection.
///
/// Deliberately narrower than [`Activity`]: no owner, summary, images or
/// mahjong payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ActivityView {
    pub id: i32,
    pub category: Category,
    pub played_at: DateTime<Utc>,
    pub place_name: String,
    pub primary_score: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub golf_data: Option<GolfData>,
}

// ─── Mahjong ─────────────────────────────────────────────────

/// Mahjong game payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(default)]
pub struct MahjongData {
    pub player_count: i32,
    pub player_names: Vec<String>,
    /// Non-zero when chips were in play
    pub has_chip: i32,
    pub chips: Vec<i32>,
    pub rounds: Vec<MahjongRound>,
    pub yakumans: Vec<Yakuman>,
}

/// Per-player scores for one hanchan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(default)]
pub struct MahjongRound {
    pub round_number: i32,
    pub scores: Vec<i32>,
}

/// A yakuman (limit hand) won during the game.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(default)]
pub struct Yakuman {
    pub round_number: i32,
    /// Zero-based seat of the winning player
    pub player_index: i32,
    pub yakuman_name: String,
    /// Empty when no photo was attached
    pub image_path: String,
}

// ─── Golf ────────────────────────────────────────────────────

/// Golf round payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(default)]
pub struct GolfData {
    pub member_names: Vec<String>,
    /// Strokes indexed `[hole][player]`
    pub scores: Vec<Vec<i32>>,
    /// Own per-hole stats
    pub my_stats: Vec<HoleStats>,
    pub weather: String,
    pub wind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(default)]
pub struct HoleStats {
    pub putt: i32,
    pub ob: i32,
    pub bunker: i32,
}
