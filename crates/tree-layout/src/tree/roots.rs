use super::RecordIndex;
use kintree_data::PersonRecord;
use std::collections::HashSet;
use tracing::trace;

/// Whether `record` is the secondary half of its marriage to `spouse`.
///
/// The partner with the smaller id is primary, so exactly one of two married
/// records is secondary.
pub(crate) fn is_secondary_spouse(record: &PersonRecord, spouse: &PersonRecord) -> bool {
    record.id > spouse.id
}

/// Select the records that start a printed tree, in collection order.
///
/// A record is a root when it has no resolvable parent, unless it is the
/// secondary spouse of another parentless record: that one is laid out next
/// to its partner instead.
pub(crate) fn select_roots<'a>(index: &RecordIndex<'a>) -> Vec<&'a PersonRecord> {
    let mut processed: HashSet<&str> = HashSet::new();
    let mut roots = Vec::new();

    for record in index.records() {
        if index.has_parent(record) || processed.contains(record.id.as_str()) {
            continue;
        }

        let spouse = index.spouse_of(record);
        if let Some(spouse) = spouse {
            if !index.has_parent(spouse) && is_secondary_spouse(record, spouse) {
                trace!("{} is laid out next to {}", record.id, spouse.id);
                continue;
            }
        }

        roots.push(record);
        processed.insert(record.id.as_str());
        if let Some(spouse) = spouse {
            processed.insert(spouse.id.as_str());
        }
    }

    roots
}
