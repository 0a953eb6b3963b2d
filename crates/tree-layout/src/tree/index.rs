use kintree_data::PersonRecord;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tracing::warn;

/// Constant time lookups over one snapshot of person records.
///
/// Ids must be unique. This is a precondition owed by the caller: when it is
/// violated the first record with a given id wins and the others are ignored.
#[derive(Debug, Clone)]
pub struct RecordIndex<'a> {
    /// Records in collection order, duplicates removed
    records: Vec<&'a PersonRecord>,

    by_id: HashMap<&'a str, &'a PersonRecord>,

    /// Children keyed by the id their `parent_id` names, in collection order.
    /// Children of a parent that doesn't exist are kept too, they simply never
    /// get looked up.
    children: HashMap<&'a str, Vec<&'a PersonRecord>>,
}

impl<'a> RecordIndex<'a> {
    pub fn new(records: &'a [PersonRecord]) -> Self {
        let mut by_id = HashMap::with_capacity(records.len());
        let mut unique = Vec::with_capacity(records.len());

        for record in records {
            match by_id.entry(record.id.as_str()) {
                Entry::Occupied(_) => {
                    warn!("Duplicate person id {}, ignoring the later record", record.id);
                }
                Entry::Vacant(entry) => {
                    entry.insert(record);
                    unique.push(record);
                }
            }
        }

        let mut children: HashMap<&str, Vec<&PersonRecord>> = HashMap::new();
        for &record in &unique {
            if let Some(parent_id) = &record.parent_id {
                children.entry(parent_id.as_str()).or_default().push(record);
            }
        }

        Self {
            records: unique,
            by_id,
            children,
        }
    }

    pub fn get(&self, id: &str) -> Option<&'a PersonRecord> {
        self.by_id.get(id).copied()
    }

    /// Resolved parent of a record, `None` when absent or dangling
    pub fn parent_of(&self, record: &PersonRecord) -> Option<&'a PersonRecord> {
        record.parent_id.as_ref().and_then(|id| self.get(id.as_str()))
    }

    pub fn has_parent(&self, record: &PersonRecord) -> bool {
        self.parent_of(record).is_some()
    }

    /// Resolved spouse of a record.
    ///
    /// Marriages are only honoured when both sides agree: a partner that
    /// doesn't point back, a dangling id or a record married to itself all
    /// leave the record spouseless.
    pub fn spouse_of(&self, record: &PersonRecord) -> Option<&'a PersonRecord> {
        let spouse_id = record.spouse_id.as_ref()?;
        if *spouse_id == record.id {
            return None;
        }
        let spouse = self.get(spouse_id.as_str())?;
        (spouse.spouse_id.as_ref() == Some(&record.id)).then_some(spouse)
    }

    /// Records whose `parent_id` is the given id, in collection order
    pub fn children_of(&self, id: &str) -> &[&'a PersonRecord] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All records, in collection order
    pub fn records(&self) -> impl Iterator<Item = &'a PersonRecord> + '_ {
        self.records.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn ids(records: &[&PersonRecord]) -> Vec<String> {
        records.iter().map(|r| r.id.to_string()).collect()
    }

    #[test]
    fn test_lookup_and_children() {
        let records = vec![
            PersonRecord::new("root", "Root"),
            PersonRecord::new("c2", "C2").with_parent("root"),
            PersonRecord::new("c1", "C1").with_parent("root"),
            PersonRecord::new("lost", "Lost").with_parent("ghost"),
        ];
        let index = RecordIndex::new(&records);

        assert_eq!(index.len(), 4);
        assert_eq!(index.get("c1").map(|r| r.name.as_str()), Some("C1"));
        assert!(index.get("ghost").is_none());
        assert_eq!(ids(index.children_of("root")), vec!["c2", "c1"]);
        assert!(index.children_of("c1").is_empty());
        assert!(index.has_parent(&records[1]));
        assert!(!index.has_parent(&records[3]));
    }

    #[test]
    fn test_spouse_requires_back_reference() {
        let records = vec![
            PersonRecord::new("a", "A").with_spouse("b"),
            PersonRecord::new("b", "B").with_spouse("a"),
            PersonRecord::new("c", "C").with_spouse("a"),
            PersonRecord::new("d", "D").with_spouse("nobody"),
            PersonRecord::new("e", "E").with_spouse("e"),
        ];
        let index = RecordIndex::new(&records);

        assert_eq!(index.spouse_of(&records[0]).map(|s| s.id.as_str()), Some("b"));
        assert_eq!(index.spouse_of(&records[1]).map(|s| s.id.as_str()), Some("a"));
        assert!(index.spouse_of(&records[2]).is_none());
        assert!(index.spouse_of(&records[3]).is_none());
        assert!(index.spouse_of(&records[4]).is_none());
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let records = vec![
            PersonRecord::new("a", "First"),
            PersonRecord::new("a", "Second").with_parent("x"),
        ];
        let index = RecordIndex::new(&records);
        assert_eq!(index.len(), 1);
        assert_eq!(index.get("a").map(|r| r.name.as_str()), Some("First"));
        assert!(index.children_of("x").is_empty());
    }
}
