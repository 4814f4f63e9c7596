//! Core type definitions used throughout the codebase

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::SejmError;

/// Index of a player in seating order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub usize);

impl PlayerId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Round number, starting at 1
pub type Round = u32;

/// The five provinces of the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProvinceId {
    Prusy,
    Litwa,
    Ukraina,
    Wielkopolska,
    Malopolska,
}

impl ProvinceId {
    /// Map order, used whenever provinces are processed one after another
    pub const ALL: [ProvinceId; 5] = [
        ProvinceId::Prusy,
        ProvinceId::Litwa,
        ProvinceId::Ukraina,
        ProvinceId::Wielkopolska,
        ProvinceId::Malopolska,
    ];

    /// Provinces on the realm's border (everything except Wielkopolska)
    pub const BORDER: [ProvinceId; 4] = [
        ProvinceId::Prusy,
        ProvinceId::Litwa,
        ProvinceId::Ukraina,
        ProvinceId::Malopolska,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            ProvinceId::Prusy => "Prusy",
            ProvinceId::Litwa => "Litwa",
            ProvinceId::Ukraina => "Ukraina",
            ProvinceId::Wielkopolska => "Wielkopolska",
            ProvinceId::Malopolska => "Małopolska",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            ProvinceId::Prusy => &["prusy", "prussia"],
            ProvinceId::Litwa => &["litwa", "lithuania"],
            ProvinceId::Ukraina => &["ukraina", "ukraine"],
            ProvinceId::Wielkopolska => &["wielkopolska", "wkp", "greater poland"],
            ProvinceId::Malopolska => &["malopolska", "mlp", "lesser poland"],
        }
    }
}

impl fmt::Display for ProvinceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProvinceId {
    type Err = SejmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize(s);
        ProvinceId::ALL
            .into_iter()
            .find(|p| p.aliases().contains(&key.as_str()))
            .ok_or_else(|| SejmError::parse(format!("unknown province '{}'", s.trim())))
    }
}

/// The three invader tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RaidTrackId {
    /// Sweden, from the north
    Szwecja,
    /// The Tatars, from the south
    Tatarzy,
    /// Muscovy, from the east
    Moskwa,
}

impl RaidTrackId {
    /// Fixed order for reinforcement and devastation
    pub const ALL: [RaidTrackId; 3] = [RaidTrackId::Szwecja, RaidTrackId::Tatarzy, RaidTrackId::Moskwa];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            RaidTrackId::Szwecja => "Szwecja",
            RaidTrackId::Tatarzy => "Tatarzy",
            RaidTrackId::Moskwa => "Moskwa",
        }
    }

    /// Provinces whose troops may attack this track
    pub fn attack_sources(self) -> [ProvinceId; 2] {
        match self {
            RaidTrackId::Szwecja => [ProvinceId::Prusy, ProvinceId::Litwa],
            RaidTrackId::Moskwa => [ProvinceId::Litwa, ProvinceId::Ukraina],
            RaidTrackId::Tatarzy => [ProvinceId::Malopolska, ProvinceId::Ukraina],
        }
    }

    /// Provinces plundered on devastation: first on a 1-3, second on a 4-6
    pub fn threatened(self) -> [ProvinceId; 2] {
        match self {
            RaidTrackId::Szwecja => [ProvinceId::Prusy, ProvinceId::Litwa],
            RaidTrackId::Moskwa => [ProvinceId::Litwa, ProvinceId::Ukraina],
            RaidTrackId::Tatarzy => [ProvinceId::Ukraina, ProvinceId::Malopolska],
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            RaidTrackId::Szwecja => &["szwecja", "sweden", "n", "north"],
            RaidTrackId::Tatarzy => &["tatarzy", "tatars", "s", "south"],
            RaidTrackId::Moskwa => &["moskwa", "muscovy", "e", "east"],
        }
    }
}

impl fmt::Display for RaidTrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RaidTrackId {
    type Err = SejmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize(s);
        RaidTrackId::ALL
            .into_iter()
            .find(|t| t.aliases().contains(&key.as_str()))
            .ok_or_else(|| SejmError::parse(format!("unknown raid track '{}'", s.trim())))
    }
}

/// Sub-variant of a law
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LawVariant {
    A,
    B,
}

impl fmt::Display for LawVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LawVariant::A => f.write_str("A"),
            LawVariant::B => f.write_str("B"),
        }
    }
}

impl FromStr for LawVariant {
    type Err = SejmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "a" => Ok(LawVariant::A),
            "b" => Ok(LawVariant::B),
            other => Err(SejmError::parse(format!("expected A or B, got '{}'", other))),
        }
    }
}

/// Lowercase, trim and strip Polish diacritics so "Małopolska" == "malopolska"
pub fn normalize(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'ą' => 'a',
            'ć' => 'c',
            'ę' => 'e',
            'ł' => 'l',
            'ń' => 'n',
            'ó' => 'o',
            'ś' => 's',
            'ź' | 'ż' => 'z',
            other => other,
        })
        .collect()
}
