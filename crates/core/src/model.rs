use std::ffi::{OsStr, OsString};
use std::num::NonZeroU32;
use std::str::FromStr;

use crate::classify::extract_order_number;
use crate::error::SortError;

pub const DEFAULT_CUTOFF: u32 = 50;
pub const SKIP_PREFIX: &[u8] = b"skip.";
pub const ORDERED_PREFIX: &[u8] = b"ordered.";

/// A scanned directory entry. The order number is derived once from the name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    name: OsString,
    order: Option<u32>,
}

impl Entry {
    pub fn new(name: impl Into<OsString>) -> Self {
        let name = name.into();
        let order = extract_order_number(&name);
        Self { name, order }
    }

    pub fn name(&self) -> &OsStr {
        &self.name
    }

    pub fn name_bytes(&self) -> &[u8] {
        self.name.as_encoded_bytes()
    }

    pub fn order(&self) -> Option<u32> {
        self.order
    }

    pub fn len(&self) -> usize {
        self.name_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BucketKind {
    Lower,
    Unordered,
    Upper,
}

impl BucketKind {
    /// Emission order of the buckets in every output mode.
    pub const ALL: [BucketKind; 3] = [BucketKind::Lower, BucketKind::Unordered, BucketKind::Upper];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cutoff(NonZeroU32);

const DEFAULT_CUTOFF_NZ: NonZeroU32 = match NonZeroU32::new(DEFAULT_CUTOFF) {
    Some(value) => value,
    None => panic!("default cutoff must be positive"),
};

impl Cutoff {
    pub fn new(value: u32) -> Result<Self, SortError> {
        NonZeroU32::new(value)
            .map(Self)
            .ok_or_else(|| SortError::argument(cutoff_guidance()))
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }

    pub fn bucket_for(self, order: Option<u32>) -> BucketKind {
        match order {
            Some(number) if number < self.get() => BucketKind::Lower,
            Some(_) => BucketKind::Upper,
            None => BucketKind::Unordered,
        }
    }
}

impl Default for Cutoff {
    fn default() -> Self {
        Self(DEFAULT_CUTOFF_NZ)
    }
}

impl FromStr for Cutoff {
    type Err = SortError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.is_empty() || !value.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(SortError::argument(cutoff_guidance()));
        }
        let parsed = value
            .parse::<u32>()
            .map_err(|_| SortError::argument(cutoff_guidance()))?;
        Self::new(parsed)
    }
}

fn cutoff_guidance() -> String {
    format!(
        "The cutoff number defaults to {DEFAULT_CUTOFF}, but must be a number that is greater than 0."
    )
}
