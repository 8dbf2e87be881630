//! Records for entities whose routes exist but which have no storage yet.
//! They document the wire shape the placeholder endpoints will grow into.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Season {
    pub id: Uuid,
    pub year: i32,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Race {
    pub id: Uuid,
    pub season_id: Uuid,
    pub circuit_id: Uuid,
    pub round: i32,
    pub name: String,
    pub date: NaiveDate,
    pub url: String,
}

/// One driver's classification in one race.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceResult {
    pub id: Uuid,
    pub race_id: Uuid,
    pub driver_id: Uuid,
    pub constructor_id: Uuid,
    pub number: i32,
    pub grid: i32,
    /// `None` when the driver was not classified.
    pub position: Option<i32>,
    /// "1", "R" (retired), "D" (disqualified), ...
    pub position_text: String,
    pub points: Decimal,
    pub laps: i32,
    pub time: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverStanding {
    pub id: Uuid,
    pub season_id: Uuid,
    pub driver_id: Uuid,
    pub position: i32,
    pub points: Decimal,
    pub wins: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructorStanding {
    pub id: Uuid,
    pub season_id: Uuid,
    pub constructor_id: Uuid,
    pub position: i32,
    pub points: Decimal,
    pub wins: i32,
}
