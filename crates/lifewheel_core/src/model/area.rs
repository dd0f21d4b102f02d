//! Life area catalog.
//!
//! # Responsibility
//! - Define the fixed set of life areas tracked on the wheel.
//! - Provide display metadata (name, icon, wheel angle) in a stable order.
//!
//! # Invariants
//! - Exactly `TOTAL_AREAS` areas exist; the catalog is not user-extensible.
//! - Catalog order never changes; it drives chart layout and list ordering.
//! - Storage and wire forms use the display name (`"Personal Growth"`).

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};

/// Number of areas in the catalog.
pub const TOTAL_AREAS: usize = 8;

/// One tracked life dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LifeArea {
    Career,
    Health,
    Relationships,
    PersonalGrowth,
    Family,
    Recreation,
    Money,
    Emotions,
}

/// Display metadata for one catalog slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AreaDescriptor {
    pub area: LifeArea,
    pub name: &'static str,
    pub icon: &'static str,
    /// Clockwise position on the wheel, in degrees from the top.
    pub angle: u16,
}

static CATALOG: [AreaDescriptor; TOTAL_AREAS] = [
    AreaDescriptor {
        area: LifeArea::Career,
        name: "Career",
        icon: "💼",
        angle: 0,
    },
    AreaDescriptor {
        area: LifeArea::Health,
        name: "Health",
        icon: "🏃‍♀️",
        angle: 45,
    },
    AreaDescriptor {
        area: LifeArea::Relationships,
        name: "Relationships",
        icon: "💕",
        angle: 90,
    },
    AreaDescriptor {
        area: LifeArea::PersonalGrowth,
        name: "Personal Growth",
        icon: "🌱",
        angle: 135,
    },
    AreaDescriptor {
        area: LifeArea::Family,
        name: "Family",
        icon: "👨‍👩‍👧‍👦",
        angle: 180,
    },
    AreaDescriptor {
        area: LifeArea::Recreation,
        name: "Recreation",
        icon: "🎨",
        angle: 225,
    },
    AreaDescriptor {
        area: LifeArea::Money,
        name: "Money",
        icon: "💰",
        angle: 270,
    },
    AreaDescriptor {
        area: LifeArea::Emotions,
        name: "Emotions",
        icon: "😊",
        angle: 315,
    },
];

/// Returns the fixed area catalog in display order.
pub fn areas() -> &'static [AreaDescriptor; TOTAL_AREAS] {
    &CATALOG
}

impl LifeArea {
    /// All areas in catalog order.
    pub const ALL: [LifeArea; TOTAL_AREAS] = [
        LifeArea::Career,
        LifeArea::Health,
        LifeArea::Relationships,
        LifeArea::PersonalGrowth,
        LifeArea::Family,
        LifeArea::Recreation,
        LifeArea::Money,
        LifeArea::Emotions,
    ];

    /// Zero-based position in the catalog.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn descriptor(self) -> &'static AreaDescriptor {
        &CATALOG[self.index()]
    }

    /// Display name, also used as the storage key.
    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    pub fn icon(self) -> &'static str {
        self.descriptor().icon
    }

    /// Parses a display name. Matching is exact after trimming.
    pub fn from_name(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        CATALOG
            .iter()
            .find(|descriptor| descriptor.name == trimmed)
            .map(|descriptor| descriptor.area)
    }
}

impl Display for LifeArea {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for LifeArea {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for LifeArea {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        LifeArea::from_name(&value)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown life area `{value}`")))
    }
}
