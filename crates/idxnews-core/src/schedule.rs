//! Daily trigger times per tier, in WIB (UTC+7).
//!
//! Pure data: the daemon converts these wall-clock times into cron
//! expressions. Core run operations carry no scheduling logic of their own.

use crate::tiers::Tier;

/// WIB is UTC+7, with no daylight saving.
pub const WIB_UTC_OFFSET_HOURS: u32 = 7;

static HOT_TIMES: &[&str] = &[
    "07:00", "09:00", "11:00", "13:00", "15:00", "17:00", "21:00",
];
static ACTIVE_TIMES: &[&str] = &["07:00", "13:00", "19:00"];
static COLD_TIMES: &[&str] = &["17:00"];

/// Daily trigger times (WIB, `HH:MM`) for a tier.
///
/// `Tier::All` is a manual-run convenience and has no schedule.
#[must_use]
pub fn trigger_times(tier: Tier) -> &'static [&'static str] {
    match tier {
        Tier::Hot => HOT_TIMES,
        Tier::Active => ACTIVE_TIMES,
        Tier::Cold => COLD_TIMES,
        Tier::All => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hot_runs_most_often() {
        assert!(trigger_times(Tier::Hot).len() > trigger_times(Tier::Active).len());
        assert_eq!(trigger_times(Tier::Cold).len(), 1);
        assert!(trigger_times(Tier::All).is_empty());
    }

    #[test]
    fn times_are_well_formed() {
        for tier in [Tier::Hot, Tier::Active, Tier::Cold] {
            for time in trigger_times(tier) {
                let (h, m) = time.split_once(':').unwrap();
                assert!(h.parse::<u32>().unwrap() < 24);
                assert!(m.parse::<u32>().unwrap() < 60);
            }
        }
    }
}
