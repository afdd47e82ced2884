//! Grouping of content records by tag.

use std::collections::{HashMap, HashSet};

use super::entities::{ContentRecord, TagGroup};

/// Group `records` by tag.
///
/// Each group lists the records carrying its tag in source order. Groups are
/// returned largest first; groups of equal size keep the order in which their
/// tag was first encountered while scanning `records`.
pub fn aggregate_by_tag(records: &[ContentRecord]) -> Vec<TagGroup> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<TagGroup> = Vec::new();

    for record in records {
        // A tag repeated within one record still contributes the record once.
        let mut listed: HashSet<&str> = HashSet::with_capacity(record.tags().len());
        for tag in record.tags() {
            if !listed.insert(tag.as_str()) {
                continue;
            }
            let index = *positions.entry(tag.as_str()).or_insert_with(|| {
                groups.push(TagGroup::new(tag.as_str()));
                groups.len() - 1
            });
            groups[index].contents.push(record.clone());
        }
    }

    sort_by_count(&mut groups);
    groups
}

/// Order groups by descending content count. The sort is stable, so equal
/// counts keep their incoming order.
pub fn sort_by_count(groups: &mut [TagGroup]) {
    groups.sort_by(|left, right| right.len().cmp(&left.len()));
}
