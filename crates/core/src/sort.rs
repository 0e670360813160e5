use std::cmp::Ordering;

use crate::classify::Buckets;
use crate::model::{BucketKind, Entry};

/// Order number first (absent sorts together), then raw name bytes.
pub fn compare_entries(a: &Entry, b: &Entry) -> Ordering {
    a.order()
        .cmp(&b.order())
        .then_with(|| a.name_bytes().cmp(b.name_bytes()))
}

pub fn sort_bucket(entries: &mut [Entry]) {
    entries.sort_unstable_by(compare_entries);
}

/// Sorted buckets, ready for assembly. Only constructible by sorting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    buckets: Buckets,
}

impl Plan {
    pub fn from_buckets(mut buckets: Buckets) -> Self {
        for kind in BucketKind::ALL {
            sort_bucket(buckets.get_mut(kind));
        }
        Self { buckets }
    }

    pub fn bucket(&self, kind: BucketKind) -> &[Entry] {
        self.buckets.get(kind)
    }

    pub fn lower(&self) -> &[Entry] {
        &self.buckets.lower
    }

    pub fn unordered(&self) -> &[Entry] {
        &self.buckets.unordered
    }

    pub fn upper(&self) -> &[Entry] {
        &self.buckets.upper
    }

    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.buckets.iter()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn total_name_bytes(&self) -> usize {
        self.entries().map(Entry::len).sum()
    }
}
