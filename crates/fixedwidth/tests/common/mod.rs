//! Record types and data shared by the integration tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use fixedwidth::{FixedWidth, FixedWidthSerializer, SerializerConfig};

#[derive(Debug, Clone, Default, PartialEq, FixedWidth)]
pub struct ChemicalElement {
    #[fixed(width = 20)]
    pub name: String,
    #[fixed(width = 5)]
    pub symbol: String,
    #[fixed(width = 5, pad = "left", pad_char = '0')]
    pub atomic_number: u32,
    #[fixed(width = 20, date_format = "yyyyMMdd")]
    pub discovered: NaiveDate,
}

#[derive(Debug, Clone, Default, PartialEq, FixedWidth)]
pub struct Planet {
    #[fixed(width = 20)]
    pub record_type: String,
    #[fixed(width = 15)]
    pub name: String,
    #[fixed(width = 3)]
    pub order_from_sun: u8,
    #[fixed(width = 20)]
    pub distance_from_sun: f64,
}

#[derive(Debug, Clone, Default, PartialEq, FixedWidth)]
pub struct StellarSystem {
    #[fixed(width = 20)]
    pub record_type: String,
    #[fixed(width = 20)]
    pub star_type: String,
    #[fixed(width = 10)]
    pub is_binary_system: bool,
    #[fixed(width = 10)]
    #[fixed(width = 15, pad = "left", pad_char = '*')]
    pub name: String,
    #[fixed(width = 10)]
    pub radius: f64,
}

#[derive(Debug, Clone, PartialEq, FixedWidth)]
pub struct Galaxy {
    #[fixed(width = 20)]
    pub record_type: String,
    #[fixed(width = 20)]
    pub name: String,
    #[fixed(width = 20)]
    pub shape: String,
    #[fixed(width = 20)]
    pub group: String,
}

impl Default for Galaxy {
    fn default() -> Self {
        Galaxy {
            record_type: "GALAXY".into(),
            name: "Milky Way".into(),
            shape: "Spiral".into(),
            group: "Local Group".into(),
        }
    }
}

/// Probe that reads only the leading record type column.
#[derive(Debug, Default, FixedWidth)]
pub struct RecordKind {
    #[fixed(width = 20)]
    pub record_type: String,
}

/// Probe sharing the leading columns of [`Planet`].
#[derive(Debug, Default, FixedWidth)]
pub struct PlanetProbe {
    #[fixed(width = 20)]
    pub record_type: String,
    #[fixed(width = 15)]
    pub name: String,
    #[fixed(width = 3)]
    pub order_from_sun: u8,
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn elements() -> Vec<ChemicalElement> {
    vec![
        ChemicalElement {
            name: "Hydrogen".into(),
            symbol: "H".into(),
            atomic_number: 1,
            discovered: date(1766, 5, 16),
        },
        ChemicalElement {
            name: "Phosporous".into(),
            symbol: "P".into(),
            atomic_number: 15,
            discovered: date(1669, 7, 17),
        },
        ChemicalElement {
            name: "Cobalt".into(),
            symbol: "Co".into(),
            atomic_number: 27,
            discovered: date(1732, 10, 11),
        },
    ]
}

pub fn planet(name: &str, order: u8, distance: f64) -> Planet {
    Planet {
        record_type: "PLANET".into(),
        name: name.into(),
        order_from_sun: order,
        distance_from_sun: distance,
    }
}

pub fn planets() -> Vec<Planet> {
    vec![
        planet("Mercury", 1, 57.91),
        planet("Venus", 2, 108.2),
        planet("Earth", 3, 149.6),
        planet("Mars", 4, 227.9),
        planet("Jupiter", 5, 778.5),
        planet("Saturn", 6, 1429.0),
        planet("Uranus", 7, 2877.0),
        planet("Neptune", 8, 4498.0),
    ]
}

pub fn sol() -> StellarSystem {
    StellarSystem {
        record_type: "STELLARSYSTEM".into(),
        star_type: "Yellow Dwarf".into(),
        is_binary_system: false,
        name: "Sol".into(),
        radius: 695.7,
    }
}

/// Serializer that trims space-padded numeric columns before parsing.
pub fn scalar_trimming() -> FixedWidthSerializer {
    FixedWidthSerializer::with_config(SerializerConfig::new().trim_scalar_fields(true)).unwrap()
}
