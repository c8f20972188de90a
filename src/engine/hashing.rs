//! Hash table steppers
//!
//! Every probe highlights the key's bucket first and unhighlights it last, so
//! a renderer always sees which chain the operation is looking at.

use crate::engine::errors::EngineError;
use crate::step::{Outcome, Step, Target};
use crate::structures::hash_table::{hash, HashTable};

fn require(field: &'static str, text: &str) -> Result<(), EngineError> {
    if text.trim().is_empty() {
        Err(EngineError::EmptyInput { field })
    } else {
        Ok(())
    }
}

pub fn insert(table: &HashTable, key: &str, value: &str) -> Result<Vec<Step>, EngineError> {
    require("Key", key)?;
    require("Value", value)?;
    let bucket = hash(key, table.size());
    Ok(vec![
        Step::Highlight(Target::Bucket(bucket)),
        Step::BucketWrite {
            bucket,
            key: key.to_string(),
            value: value.to_string(),
        },
        Step::Report(Outcome::Stored {
            bucket,
            write: table.classify_write(bucket, key),
        }),
        Step::Unhighlight(Target::Bucket(bucket)),
    ])
}

pub fn search(table: &HashTable, key: &str) -> Result<Vec<Step>, EngineError> {
    require("Key", key)?;
    let bucket = hash(key, table.size());
    let outcome = match table.get(key) {
        Some(value) => Outcome::Found {
            value: value.to_string(),
        },
        None => Outcome::NotFound,
    };
    Ok(vec![
        Step::Highlight(Target::Bucket(bucket)),
        Step::Report(outcome),
        Step::Unhighlight(Target::Bucket(bucket)),
    ])
}

pub fn delete(table: &HashTable, key: &str) -> Result<Vec<Step>, EngineError> {
    require("Key", key)?;
    let bucket = hash(key, table.size());
    let mut steps = vec![Step::Highlight(Target::Bucket(bucket))];
    match table.get(key) {
        Some(value) => {
            steps.push(Step::BucketRemove {
                bucket,
                key: key.to_string(),
            });
            steps.push(Step::Report(Outcome::Removed {
                value: value.to_string(),
            }));
        }
        None => steps.push(Step::Report(Outcome::NotFound)),
    }
    steps.push(Step::Unhighlight(Target::Bucket(bucket)));
    Ok(steps)
}

/// Full rehash into `size` buckets, entries replayed in old bucket order
pub fn resize(table: &HashTable, size: usize) -> Result<Vec<Step>, EngineError> {
    let mut scratch = HashTable::new(size)?;
    let mut steps = vec![Step::Rehash { size }];
    let mut entries = 0;
    for entry in table.entries() {
        let bucket = hash(&entry.key, size);
        scratch.write(bucket, &entry.key, &entry.value);
        steps.push(Step::BucketWrite {
            bucket,
            key: entry.key.clone(),
            value: entry.value.clone(),
        });
        entries += 1;
    }
    steps.push(Step::Report(Outcome::Rehashed {
        entries,
        collisions: scratch.collisions(),
    }));
    Ok(steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structures::hash_table::WriteKind;

    #[test]
    fn test_insert_reports_chaining() {
        let mut table = HashTable::new(1).unwrap();
        table.write(0, "a", "1");
        let steps = insert(&table, "b", "2").unwrap();
        assert_eq!(
            steps[2],
            Step::Report(Outcome::Stored {
                bucket: 0,
                write: WriteKind::Chained
            })
        );
    }

    #[test]
    fn test_empty_key_rejected() {
        let table = HashTable::new(5).unwrap();
        assert_eq!(
            insert(&table, "", "x"),
            Err(EngineError::EmptyInput { field: "Key" })
        );
        assert_eq!(
            insert(&table, "k", "  "),
            Err(EngineError::EmptyInput { field: "Value" })
        );
    }

    #[test]
    fn test_delete_missing_has_no_remove() {
        let table = HashTable::sample(10).unwrap();
        let steps = delete(&table, "zebra").unwrap();
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[1], Step::Report(Outcome::NotFound));
    }

    #[test]
    fn test_resize_zero_rejected() {
        let table = HashTable::sample(10).unwrap();
        assert_eq!(
            resize(&table, 0),
            Err(EngineError::InvalidTableSize { size: 0 })
        );
    }

    #[test]
    fn test_resize_writes_every_entry() {
        let table = HashTable::sample(10).unwrap();
        let steps = resize(&table, 7).unwrap();
        assert_eq!(steps[0], Step::Rehash { size: 7 });
        let writes = steps
            .iter()
            .filter(|s| matches!(s, Step::BucketWrite { .. }))
            .count();
        assert_eq!(writes, table.len());
    }
}
