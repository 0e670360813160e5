use std::ffi::OsStr;

use crate::model::{BucketKind, Cutoff, Entry, ORDERED_PREFIX};

/// Parses `ordered.<digits>...` names. The digit run may be any length as
/// long as it fits in a `u32`.
pub fn extract_order_number(name: impl AsRef<OsStr>) -> Option<u32> {
    let rest = name.as_ref().as_encoded_bytes().strip_prefix(ORDERED_PREFIX)?;
    let digits = rest.iter().take_while(|byte| byte.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }

    rest[..digits].iter().try_fold(0_u32, |acc, byte| {
        acc.checked_mul(10)?.checked_add(u32::from(byte - b'0'))
    })
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Buckets {
    pub lower: Vec<Entry>,
    pub unordered: Vec<Entry>,
    pub upper: Vec<Entry>,
}

impl Buckets {
    pub fn partition<I>(entries: I, cutoff: Cutoff) -> Self
    where
        I: IntoIterator<Item = Entry>,
    {
        let mut buckets = Self::default();
        for entry in entries {
            match cutoff.bucket_for(entry.order()) {
                BucketKind::Lower => buckets.lower.push(entry),
                BucketKind::Unordered => buckets.unordered.push(entry),
                BucketKind::Upper => buckets.upper.push(entry),
            }
        }
        buckets
    }

    pub fn get(&self, kind: BucketKind) -> &[Entry] {
        match kind {
            BucketKind::Lower => &self.lower,
            BucketKind::Unordered => &self.unordered,
            BucketKind::Upper => &self.upper,
        }
    }

    pub(crate) fn get_mut(&mut self, kind: BucketKind) -> &mut Vec<Entry> {
        match kind {
            BucketKind::Lower => &mut self.lower,
            BucketKind::Unordered => &mut self.unordered,
            BucketKind::Upper => &mut self.upper,
        }
    }

    pub fn len(&self) -> usize {
        self.lower.len() + self.unordered.len() + self.upper.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entries in emission order: lower, unordered, upper.
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        BucketKind::ALL.into_iter().flat_map(|kind| self.get(kind))
    }
}
