use std::fmt;

/// Geographic regions used by the APSA to group states, plus an explicit
/// marker for states the lookup does not know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApsaRegion {
    Northeast,
    MidAtlantic,
    South,
    Midwest,
    West,
    Unmapped,
}

impl ApsaRegion {
    pub fn label(self) -> &'static str {
        match self {
            ApsaRegion::Northeast => "Northeast",
            ApsaRegion::MidAtlantic => "Mid-Atlantic",
            ApsaRegion::South => "South",
            ApsaRegion::Midwest => "Midwest",
            ApsaRegion::West => "West",
            ApsaRegion::Unmapped => "Unmapped",
        }
    }

    pub fn is_mapped(self) -> bool {
        self != ApsaRegion::Unmapped
    }
}

impl fmt::Display for ApsaRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// State (and territory) name → APSA region.
pub const STATE_REGIONS: &[(&str, ApsaRegion)] = &[
    ("Alabama", ApsaRegion::South),
    ("Alaska", ApsaRegion::West),
    ("Arizona", ApsaRegion::South),
    ("Arkansas", ApsaRegion::West),
    ("California", ApsaRegion::West),
    ("Colorado", ApsaRegion::West),
    ("Connecticut", ApsaRegion::Northeast),
    ("District of Columbia", ApsaRegion::MidAtlantic),
    ("Delaware", ApsaRegion::MidAtlantic),
    ("Florida", ApsaRegion::South),
    ("Georgia", ApsaRegion::South),
    ("Hawaii", ApsaRegion::West),
    ("Idaho", ApsaRegion::West),
    ("Iowa", ApsaRegion::Midwest),
    ("Illinois", ApsaRegion::Midwest),
    ("Indiana", ApsaRegion::Midwest),
    ("Kansas", ApsaRegion::Midwest),
    ("Kentucky", ApsaRegion::South),
    ("Louisiana", ApsaRegion::South),
    ("Maine", ApsaRegion::Northeast),
    ("Massachusetts", ApsaRegion::Northeast),
    ("Maryland", ApsaRegion::MidAtlantic),
    ("Michigan", ApsaRegion::Midwest),
    ("Minnesota", ApsaRegion::Midwest),
    ("Missouri", ApsaRegion::Midwest),
    ("Mississippi", ApsaRegion::South),
    ("Montana", ApsaRegion::West),
    ("North Carolina", ApsaRegion::South),
    ("North Dakota", ApsaRegion::Midwest),
    ("Nebraska", ApsaRegion::Midwest),
    ("New Hampshire", ApsaRegion::Northeast),
    ("New Jersey", ApsaRegion::MidAtlantic),
    ("New Mexico", ApsaRegion::West),
    ("Nevada", ApsaRegion::West),
    ("New York", ApsaRegion::Northeast),
    ("Ohio", ApsaRegion::Midwest),
    ("Oklahoma", ApsaRegion::South),
    ("Oregon", ApsaRegion::West),
    ("Pennsylvania", ApsaRegion::MidAtlantic),
    ("Puerto Rico", ApsaRegion::South),
    ("Rhode Island", ApsaRegion::Northeast),
    ("South Carolina", ApsaRegion::South),
    ("South Dakota", ApsaRegion::Midwest),
    ("Tennessee", ApsaRegion::South),
    ("Texas", ApsaRegion::South),
    ("Utah", ApsaRegion::West),
    ("Virginia", ApsaRegion::MidAtlantic),
    ("Vermont", ApsaRegion::Northeast),
    ("Washington", ApsaRegion::West),
    ("Wisconsin", ApsaRegion::Midwest),
    ("West Virginia", ApsaRegion::MidAtlantic),
    ("Wyoming", ApsaRegion::West),
];

/// Looks up the APSA region of a state. Unknown names yield
/// [`ApsaRegion::Unmapped`].
pub fn region_for_state(state: &str) -> ApsaRegion {
    let state = state.trim();
    STATE_REGIONS
        .iter()
        .find(|(name, _)| *name == state)
        .map(|(_, region)| *region)
        .unwrap_or(ApsaRegion::Unmapped)
}
