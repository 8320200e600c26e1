// Region -> subregion map
// The single source of truth for which subregions belong to which region.
// Region keys are listed in their fixed declared order.

use super::{Region, Subregion};

/// Every region paired with its ordered list of valid subregions
pub const REGION_SUBREGIONS: [(Region, &[Subregion]); 6] = [
    (
        Region::Americas,
        &[
            Subregion::Caribbean,
            Subregion::CentralAmerica,
            Subregion::SouthAmerica,
            Subregion::NorthernAmerica,
        ],
    ),
    (
        Region::Africa,
        &[
            Subregion::NorthernAfrica,
            Subregion::WesternAfrica,
            Subregion::MiddleAfrica,
            Subregion::EasternAfrica,
            Subregion::SouthernAfrica,
        ],
    ),
    (
        Region::Asia,
        &[
            Subregion::CentralAsia,
            Subregion::EasternAsia,
            Subregion::SouthEasternAsia,
            Subregion::SouthernAsia,
            Subregion::WesternAsia,
        ],
    ),
    (
        Region::Europe,
        &[
            Subregion::NorthernEurope,
            Subregion::WesternEurope,
            Subregion::EasternEurope,
            Subregion::SouthernEurope,
        ],
    ),
    (
        Region::Oceania,
        &[
            Subregion::AustraliaAndNewZealand,
            Subregion::Melanesia,
            Subregion::Micronesia,
            Subregion::Polynesia,
        ],
    ),
    (Region::Antarctica, &[Subregion::Antarctica]),
];

/// All regions in declared order
pub fn regions() -> Vec<Region> {
    REGION_SUBREGIONS.iter().map(|(region, _)| *region).collect()
}

/// The subregions registered for a region, in declared order
pub fn subregions_of(region: Region) -> &'static [Subregion] {
    REGION_SUBREGIONS
        .iter()
        .find(|(r, _)| *r == region)
        .map(|(_, subregions)| *subregions)
        .unwrap_or(&[])
}

/// Whether a (region, subregion) pair appears in the map
pub fn is_valid_pair(region: Region, subregion: Subregion) -> bool {
    subregions_of(region).contains(&subregion)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_regions_in_declared_order() {
        assert_eq!(
            regions(),
            vec![
                Region::Americas,
                Region::Africa,
                Region::Asia,
                Region::Europe,
                Region::Oceania,
                Region::Antarctica,
            ]
        );
    }

    #[test]
    fn test_every_subregion_has_exactly_one_region() {
        let mut seen = Vec::new();
        for (_, subregions) in REGION_SUBREGIONS {
            for subregion in subregions {
                assert!(!seen.contains(subregion), "{subregion} listed twice");
                seen.push(*subregion);
            }
        }
        assert_eq!(seen.len(), 23);
    }

    #[rstest]
    #[case::europe_north(Region::Europe, Subregion::NorthernEurope, true)]
    #[case::caribbean(Region::Americas, Subregion::Caribbean, true)]
    #[case::antarctica(Region::Antarctica, Subregion::Antarctica, true)]
    #[case::europe_antarctica(Region::Europe, Subregion::Antarctica, false)]
    #[case::asia_polynesia(Region::Asia, Subregion::Polynesia, false)]
    fn test_is_valid_pair(
        #[case] region: Region,
        #[case] subregion: Subregion,
        #[case] expected: bool,
    ) {
        assert_eq!(is_valid_pair(region, subregion), expected);
    }
}
