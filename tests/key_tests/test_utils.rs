//! Shared helpers for key tests

use shardkey::{CompoundKey, KeyEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Pending,
    Active,
    Closed,
}

impl KeyEnum for Status {
    type Repr = i32;

    fn to_repr(self) -> i32 {
        self as i32
    }

    fn from_repr(repr: i32) -> Option<Self> {
        match repr {
            0 => Some(Status::Pending),
            1 => Some(Status::Active),
            2 => Some(Status::Closed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tier {
    #[default]
    Free,
    Paid,
}

impl KeyEnum for Tier {
    type Repr = u8;

    fn to_repr(self) -> u8 {
        self as u8
    }

    fn from_repr(repr: u8) -> Option<Self> {
        match repr {
            0 => Some(Tier::Free),
            1 => Some(Tier::Paid),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(i16)]
pub enum Priority {
    Low = -1,
    #[default]
    Normal = 0,
    Urgent = 300,
}

impl KeyEnum for Priority {
    type Repr = i16;

    fn to_repr(self) -> i16 {
        self as i16
    }

    fn from_repr(repr: i16) -> Option<Self> {
        match repr {
            -1 => Some(Priority::Low),
            0 => Some(Priority::Normal),
            300 => Some(Priority::Urgent),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(i64)]
pub enum Ledger {
    #[default]
    Unset = 0,
    Archive = 5_000_000_000,
}

impl KeyEnum for Ledger {
    type Repr = i64;

    fn to_repr(self) -> i64 {
        self as i64
    }

    fn from_repr(repr: i64) -> Option<Self> {
        match repr {
            0 => Some(Ledger::Unset),
            5_000_000_000 => Some(Ledger::Archive),
            _ => None,
        }
    }
}

/// Assert the key survives the raw, external and UTF8 forms
pub fn assert_all_forms<K: CompoundKey>(key: &K) {
    let bytes = key.to_bytes().unwrap();
    assert_eq!(&K::from_bytes(&bytes).unwrap(), key, "raw form");

    let external = key.to_external_string().unwrap();
    assert_eq!(&K::from_external_string(&external).unwrap(), key, "external form");

    let utf8 = key.to_utf8().unwrap();
    assert!(std::str::from_utf8(&utf8).is_ok());
    assert_eq!(&K::from_utf8(&utf8).unwrap(), key, "utf8 form");
}
