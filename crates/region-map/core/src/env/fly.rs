use crate::types::SectionId;

/// Fly table entry for one section.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlyDestination {
    pub map_group: u8,
    pub map_num: u8,
    /// Heal location id; 0 means the destination has none.
    pub heal_location: u8,
}

/// Warp handed to the overworld when a fly destination is chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WarpRequest {
    HealLocation(u8),
    Map { group: u8, num: u8, warp: i8 },
}

/// Static table of fly-eligible sections.
pub trait FlyOracle: Send + Sync {
    fn destination(&self, section: SectionId) -> Option<FlyDestination>;
}

/// Resolves the warp for a chosen fly section; sections without an entry yield `None`.
pub fn resolve_fly_destination(fly: &dyn FlyOracle, section: SectionId) -> Option<WarpRequest> {
    let Some(destination) = fly.destination(section) else {
        tracing::warn!("no fly destination registered for {}", section);
        return None;
    };

    Some(if destination.heal_location != 0 {
        WarpRequest::HealLocation(destination.heal_location)
    } else {
        WarpRequest::Map {
            group: destination.map_group,
            num: destination.map_num,
            warp: -1,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Table;

    impl FlyOracle for Table {
        fn destination(&self, section: SectionId) -> Option<FlyDestination> {
            match section.raw() {
                0x01 => Some(FlyDestination {
                    map_group: 3,
                    map_num: 0,
                    heal_location: 1,
                }),
                0x02 => Some(FlyDestination {
                    map_group: 3,
                    map_num: 1,
                    heal_location: 0,
                }),
                _ => None,
            }
        }
    }

    #[test]
    fn heal_location_wins_over_map_warp() {
        assert_eq!(
            resolve_fly_destination(&Table, SectionId(0x01)),
            Some(WarpRequest::HealLocation(1))
        );
    }

    #[test]
    fn destinations_without_heal_location_warp_to_the_map() {
        assert_eq!(
            resolve_fly_destination(&Table, SectionId(0x02)),
            Some(WarpRequest::Map {
                group: 3,
                num: 1,
                warp: -1
            })
        );
    }

    #[test]
    fn unregistered_sections_resolve_to_nothing() {
        assert_eq!(resolve_fly_destination(&Table, SectionId(0x4D)), None);
        assert_eq!(resolve_fly_destination(&Table, SectionId::NONE), None);
    }
}
