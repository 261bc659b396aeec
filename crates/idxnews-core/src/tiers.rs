//! Scraping cadence tiers and their static symbol sets.
//!
//! Hot = LQ45 (most liquid), active = IDX80 minus LQ45. The two static
//! sets are disjoint by construction; cold is everything else in the
//! symbol universe and is resolved at run time against the datastore.

use std::fmt;
use std::str::FromStr;

/// LQ45, scraped most frequently.
pub static HOT_SYMBOLS: &[&str] = &[
    "AADI", "ACES", "ADMR", "ADRO", "AKRA", "AMMN", "AMRT", "ANTM", "ASII",
    "BBCA", "BBNI", "BBRI", "BBTN", "BMRI", "BRPT", "BUMI", "CPIN", "CTRA",
    "DSSA", "EMTK", "EXCL", "GOTO", "HEAL", "ICBP", "INCO", "INDF", "INKP",
    "ISAT", "ITMG", "JPFA", "KLBF", "MAPI", "MBMA", "MDKA", "MEDC", "NCKL",
    "PGAS", "PGEO", "PTBA", "SCMA", "SMGR", "TLKM", "TOWR", "UNTR", "UNVR",
];

/// IDX80 minus LQ45, scraped a few times a day.
pub static ACTIVE_SYMBOLS: &[&str] = &[
    "ARTO", "AVIA", "BRMS", "BSDE", "BTPS", "BUKA", "CMRY", "DSNG", "ELSA",
    "ENRG", "ERAA", "ESSA", "INDY", "KIJA", "KPIG", "LSIP", "MAPA", "MARK",
    "MTEL", "MYOR", "PANI", "RATU", "SIDO", "SMRA", "SRTG", "SSIA", "TAPG",
    "TCPI", "TKIM", "TPIA", "BRIS", "PWON", "MIKA", "JSMR",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Hot,
    Active,
    Cold,
    All,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Hot => write!(f, "hot"),
            Tier::Active => write!(f, "active"),
            Tier::Cold => write!(f, "cold"),
            Tier::All => write!(f, "all"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown tier {0:?} (expected hot, active, cold or all)")]
pub struct ParseTierError(String);

impl FromStr for Tier {
    type Err = ParseTierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hot" => Ok(Tier::Hot),
            "active" => Ok(Tier::Active),
            "cold" => Ok(Tier::Cold),
            "all" => Ok(Tier::All),
            other => Err(ParseTierError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn hot_and_active_are_disjoint() {
        let hot: HashSet<&str> = HOT_SYMBOLS.iter().copied().collect();
        let active: HashSet<&str> = ACTIVE_SYMBOLS.iter().copied().collect();
        assert!(hot.is_disjoint(&active));
    }

    #[test]
    fn static_sets_have_no_duplicates() {
        let hot: HashSet<&str> = HOT_SYMBOLS.iter().copied().collect();
        assert_eq!(hot.len(), HOT_SYMBOLS.len());
        let active: HashSet<&str> = ACTIVE_SYMBOLS.iter().copied().collect();
        assert_eq!(active.len(), ACTIVE_SYMBOLS.len());
    }

    #[test]
    fn tier_round_trips_through_strings() {
        for tier in [Tier::Hot, Tier::Active, Tier::Cold, Tier::All] {
            assert_eq!(tier.to_string().parse::<Tier>().unwrap(), tier);
        }
        assert!("warm".parse::<Tier>().is_err());
    }
}
