/// A dashboard watershed and the Water Resource Inventory Areas that make it up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Watershed {
    pub name: &'static str,
    pub wrias: &'static [u32],
}

// Skagit is the only watershed spanning two WRIAs: Lower Skagit-Samish (3) and Upper Skagit (4).
pub const WATERSHEDS: &[Watershed] = &[
    Watershed {
        name: "Skagit River",
        wrias: &[3, 4],
    },
    Watershed {
        name: "Stillaguamish River",
        wrias: &[5],
    },
    Watershed {
        name: "Snohomish River",
        wrias: &[7],
    },
    Watershed {
        name: "Cedar-Sammamish River",
        wrias: &[8],
    },
    Watershed {
        name: "Duwamish River",
        wrias: &[9],
    },
    Watershed {
        name: "Puyallup-White River",
        wrias: &[10],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_watershed_has_a_wria() {
        for watershed in WATERSHEDS {
            assert!(!watershed.wrias.is_empty(), "{} has no WRIA", watershed.name);
        }
    }

    #[test]
    fn names_are_unique() {
        let names: HashSet<_> = WATERSHEDS.iter().map(|w| w.name).collect();
        assert_eq!(names.len(), WATERSHEDS.len());
    }

    #[test]
    fn table_order_starts_with_skagit() {
        assert_eq!(WATERSHEDS[0].name, "Skagit River");
        assert_eq!(WATERSHEDS[0].wrias, &[3, 4]);
        assert_eq!(WATERSHEDS.len(), 6);
    }
}
