// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Normalized mahjong detail rows.
//!
//! Besides the JSONB copy on the activity row, a mahjong game is broken out
//! into `mahjong_sessions`, `mahjong_rounds` and `mahjong_yakumans` so it can
//! be queried relationally. The tables have four fixed seats: names, chips and
//! scores past the fourth are dropped, missing seats are stored as `""` / `0`.

use crate::models::MahjongData;
use sqlx::PgConnection;

/// Number of seat columns in the detail tables.
pub const SEATS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRow {
    pub player_count: i32,
    pub player_names: [String; SEATS],
    pub has_chip: i32,
    pub chips: [i32; SEATS],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundRow {
    pub round_number: i32,
    pub scores: [i32; SEATS],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YakumanRow {
    pub round_number: i32,
    pub player_index: i32,
    pub yakuman_name: String,
    pub image_path: String,
}

/// All detail rows for one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MahjongDetail {
    pub session: SessionRow,
    /// In payload order; round numbers are not deduplicated
    pub rounds: Vec<RoundRow>,
    pub yakumans: Vec<YakumanRow>,
}

impl MahjongDetail {
    pub fn project(data: &MahjongData) -> Self {
        Self {
            session: SessionRow {
                player_count: data.player_count,
                player_names: seats(&data.player_names),
                has_chip: data.has_chip,
                chips: seats(&data.chips),
            },
            rounds: data
                .rounds
                .iter()
                .map(|r| RoundRow {
                    round_number: r.round_number,
                    scores: seats(&r.scores),
                })
                .collect(),
            yakumans: data
                .yakumans
                .iter()
                .map(|y| YakumanRow {
                    round_number: y.round_number,
                    player_index: y.player_index,
                    yakuman_name: y.yakuman_name.clone(),
                    image_path: y.image_path.clone(),
                })
                .collect(),
        }
    }
}

/// First `SEATS` values, padded with the default.
fn seats<T: Clone + Default>(values: &[T]) -> [T; SEATS] {
    std::array::from_fn(|i| values.get(i).cloned().unwrap_or_default())
}

/// Insert the detail rows for `activity_id`.
///
/// Runs on the caller's connection so it shares the activity insert's
/// transaction; any error leaves the transaction to be rolled back.
pub async fn insert_detail(
    conn: &mut PgConnection,
    activity_id: i32,
    detail: &MahjongDetail,
) -> Result<(), sqlx::Error> {
    let s = &detail.session;
    sqlx::query(
        "INSERT INTO mahjong_sessions (activity_id, player_count, player1_name, player2_name, player3_name, player4_name, has_chip, chip_p1, chip_p2, chip_p3, chip_p4)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
    )
    .bind(activity_id)
    .bind(s.player_count)
    .bind(&s.player_names[0])
    .bind(&s.player_names[1])
    .bind(&s.player_names[2])
    .bind(&s.player_names[3])
    .bind(s.has_chip)
    .bind(s.chips[0])
    .bind(s.chips[1])
    .bind(s.chips[2])
    .bind(s.chips[3])
    .execute(&mut *conn)
    .await?;

    for round in &detail.rounds {
        sqlx::query(
            "INSERT INTO mahjong_rounds (activity_id, round_number, score_p1, score_p2, score_p3, score_p4)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(activity_id)
        .bind(round.round_number)
        .bind(round.scores[0])
        .bind(round.scores[1])
        .bind(round.scores[2])
        .bind(round.scores[3])
        .execute(&mut *conn)
        .await?;
    }

    for yakuman in &detail.yakumans {
        sqlx::query(
            "INSERT INTO mahjong_yakumans (activity_id, round_number, player_index, yakuman_name, image_path)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(activity_id)
        .bind(yakuman.round_number)
        .bind(yakuman.player_index)
        .bind(&yakuman.yakuman_name)
        .bind(&yakuman.image_path)
        .execute(&mut *conn)
        .await?;
    }

    tracing::debug!(
        activity_id,
        rounds = detail.rounds.len(),
        yakumans = detail.yakumans.len(),
        "Inserted mahjong detail rows"
    );

    Ok(())
}
