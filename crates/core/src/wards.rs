//! Ward bed pools keyed by ward name.
//!
//! Enumeration order follows the underlying hash map and is not insertion order.
//! Names are stored trimmed and lookups trim the requested name.

use std::collections::HashMap;

use serde::Serialize;
use utoipa::ToSchema;

use crate::constants::NO_WARDS_MESSAGE;
use crate::models::Ward;
use crate::validation::NewWard;

#[derive(Debug, Clone, Default)]
pub struct Wards {
    wards: HashMap<String, Ward>,
}

/// Bed totals across every ward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct WardSummary {
    pub wards: usize,
    pub total_beds: u64,
    pub occupied_beds: u64,
    pub free_beds: u64,
}

impl Wards {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a ward with no occupied beds. Returns `false` without change if the name is taken.
    pub fn add(&mut self, request: NewWard) -> bool {
        let key = request.name.as_str().to_string();
        if self.wards.contains_key(&key) {
            return false;
        }
        self.wards.insert(
            key,
            Ward {
                name: request.name,
                total_beds: request.total_beds,
                occupied_beds: 0,
            },
        );
        true
    }

    /// Occupies one bed. Returns `false` without change if the ward is missing or full.
    pub fn assign_bed(&mut self, name: &str) -> bool {
        match self.wards.get_mut(name.trim()) {
            Some(ward) if !ward.is_full() => {
                ward.occupied_beds += 1;
                true
            }
            _ => false,
        }
    }

    pub fn get(&self, name: &str) -> Option<&Ward> {
        self.wards.get(name.trim())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ward> {
        self.wards.values()
    }

    /// One line per ward, or a placeholder line when there are none.
    pub fn statistics(&self) -> String {
        if self.wards.is_empty() {
            return NO_WARDS_MESSAGE.to_string();
        }
        self.iter()
            .map(|ward| ward.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn summary(&self) -> WardSummary {
        self.iter().fold(
            WardSummary {
                wards: self.wards.len(),
                ..WardSummary::default()
            },
            |mut acc, ward| {
                acc.total_beds += u64::from(ward.total_beds);
                acc.occupied_beds += u64::from(ward.occupied_beds);
                acc.free_beds += u64::from(ward.free_beds());
                acc
            },
        )
    }
}
