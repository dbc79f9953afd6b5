use chrono::{DateTime, NaiveDateTime, TimeDelta, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::model::TimeZone;

const WORK_HOURS: std::ops::RangeInclusive<u32> = 9..=18;

/// Offsets in use worldwide run from UTC-12 to UTC+14.
pub const OFFSET_RANGE: std::ops::RangeInclusive<f64> = -12.0..=14.0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneTime {
    pub id: String,
    pub name: String,
    pub time: String,
    pub date: String,
    pub work_time: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionClock {
    pub region: String,
    pub zones: Vec<ZoneTime>,
}

/// Shifts `now` by a fractional hour offset. `None` when the offset cannot
/// be represented.
pub fn local_time(now: DateTime<Utc>, offset_hours: f64) -> Option<NaiveDateTime> {
    let offset_secs = offset_hours * 3600.0;
    if !offset_secs.is_finite() || offset_secs.abs() > i64::MAX as f64 {
        return None;
    }
    let delta = TimeDelta::try_seconds(offset_secs.round() as i64)?;
    now.naive_utc().checked_add_signed(delta)
}

pub fn zone_time(now: DateTime<Utc>, zone: &TimeZone) -> Result<ZoneTime, String> {
    let local = local_time(now, zone.offset)
        .ok_or_else(|| format!("time zone '{}' has unusable offset {}", zone.id, zone.offset))?;
    Ok(ZoneTime {
        id: zone.id.clone(),
        name: zone.name.clone(),
        time: local.format("%H:%M:%S").to_string(),
        date: local.format("%b %-d, %Y").to_string(),
        work_time: WORK_HOURS.contains(&local.hour()),
    })
}

/// Groups zones by region, regions in first-seen order.
pub fn world_clock(now: DateTime<Utc>, zones: &[TimeZone]) -> Result<Vec<RegionClock>, String> {
    let mut regions: Vec<RegionClock> = Vec::new();
    for zone in zones {
        let entry = zone_time(now, zone)?;
        match regions.iter_mut().find(|r| r.region == zone.region) {
            Some(region) => region.zones.push(entry),
            None => regions.push(RegionClock {
                region: zone.region.clone(),
                zones: vec![entry],
            }),
        }
    }
    Ok(regions)
}
