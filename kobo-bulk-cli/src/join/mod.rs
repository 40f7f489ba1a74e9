//! Attach child rows to their parent rows by id column.
//!
//! One joined record per parent row, in parent-file order. Children
//! attach in file-then-row order across all child tables. A parent with
//! a null id gets no children (a null key matches nothing), but is still
//! emitted. Children whose id matches no parent never appear anywhere.

use std::collections::HashMap;

use crate::error::IngestError;
use crate::excel::{Row, Table};

/// A parent row plus its matching child rows.
#[derive(Debug, Clone)]
pub struct JoinedRecord<'a> {
    pub parent: Row<'a>,
    pub children: Vec<Row<'a>>,
}

/// Per-table index from normalized join key to row numbers.
struct ChildIndex<'a> {
    table: &'a Table,
    by_key: HashMap<String, Vec<usize>>,
}

impl<'a> ChildIndex<'a> {
    fn build(table: &'a Table, id_column: &str) -> Result<Self, IngestError> {
        let id_idx = table.column_index(id_column)?;
        let mut by_key: HashMap<String, Vec<usize>> = HashMap::new();
        for (row_idx, row) in table.rows().enumerate() {
            if let Some(key) = row.cell(id_idx).join_key() {
                by_key.entry(key).or_default().push(row_idx);
            }
        }
        Ok(ChildIndex { table, by_key })
    }

    fn matching(&self, key: &str) -> impl Iterator<Item = Row<'a>> {
        self.by_key
            .get(key)
            .map(|rows| rows.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(|&idx| self.table.row(idx))
    }
}

/// Join every parent row against all child tables.
///
/// All id columns are resolved up front, so a misconfigured column name
/// fails the whole run before anything is encoded or uploaded.
pub fn join_records<'a>(
    parent: &'a Table,
    children: &'a [Table],
    parent_id_column: &str,
    child_id_column: &str,
) -> Result<Vec<JoinedRecord<'a>>, IngestError> {
    let parent_id_idx = parent.column_index(parent_id_column)?;
    let indexes: Vec<ChildIndex<'a>> = children
        .iter()
        .map(|table| ChildIndex::build(table, child_id_column))
        .collect::<Result<_, _>>()?;

    let mut joined = Vec::with_capacity(parent.len());
    for row in parent.rows() {
        let mut matched: Vec<Row<'a>> = Vec::new();
        if let Some(key) = row.cell(parent_id_idx).join_key() {
            for index in &indexes {
                matched.extend(index.matching(&key));
            }
        }
        joined.push(JoinedRecord {
            parent: row,
            children: matched,
        });
    }

    Ok(joined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::excel::Value;

    fn parent_table() -> Table {
        let mut table = Table::new("parent", vec!["FID".to_string(), "HName".to_string()]);
        table.push_row(vec![Value::String("A1".into()), Value::String("Amina".into())]);
        table.push_row(vec![Value::String("A2".into()), Value::String("Brahim".into())]);
        table.push_row(vec![Value::Null, Value::String("Unregistered".into())]);
        table
    }

    fn child_table(name: &str, rows: &[(&str, &str)]) -> Table {
        let mut table = Table::new(
            name,
            vec!["FID".to_string(), "Individual_FullName".to_string()],
        );
        for (fid, full_name) in rows {
            table.push_row(vec![
                Value::String((*fid).to_string()),
                Value::String((*full_name).to_string()),
            ]);
        }
        table
    }

    #[test]
    fn test_one_to_many_join_in_file_then_row_order() {
        let parent = parent_table();
        let children = vec![
            child_table("members", &[("A1", "Fatima"), ("A2", "Karim"), ("A1", "Omar")]),
            child_table("extra", &[("A1", "Leila")]),
        ];

        let joined =
            join_records(&parent, &children, "FID", "FID").unwrap();
        assert_eq!(joined.len(), 3);

        let names: Vec<String> = joined[0]
            .children
            .iter()
            .map(|c| c.get("Individual_FullName").unwrap().to_string())
            .collect();
        // first file's rows first, in row order, then the second file's
        assert_eq!(names, vec!["Fatima", "Omar", "Leila"]);

        assert_eq!(joined[1].children.len(), 1);
        assert_eq!(
            joined[1].children[0].get("Individual_FullName").unwrap(),
            &Value::String("Karim".into())
        );
    }

    #[test]
    fn test_childless_parent_still_produced() {
        let parent = parent_table();
        let children = vec![child_table("members", &[("A9", "Nobody")])];

        let joined = join_records(&parent, &children, "FID", "FID").unwrap();
        assert_eq!(joined.len(), 3);
        assert!(joined.iter().all(|j| j.children.is_empty()));
    }

    #[test]
    fn test_null_parent_id_matches_nothing() {
        let mut child = child_table("members", &[]);
        child.push_row(vec![Value::Null, Value::String("Ghost".into())]);

        let parent = parent_table();
        let children = [child];
        let joined = join_records(&parent, &children, "FID", "FID").unwrap();
        // the null-id parent must not pick up the null-id child
        assert!(joined[2].children.is_empty());
    }

    #[test]
    fn test_numeric_ids_join_across_representations() {
        let mut parent = Table::new("parent", vec!["FID".to_string()]);
        parent.push_row(vec![Value::Int(7)]);

        let mut child = Table::new("members", vec!["FID".to_string()]);
        child.push_row(vec![Value::Float(7.0)]);
        child.push_row(vec![Value::String("7".into())]);

        let children = [child];
        let joined = join_records(&parent, &children, "FID", "FID").unwrap();
        assert_eq!(joined[0].children.len(), 2);
    }

    #[test]
    fn test_missing_id_column_fails_before_any_join() {
        let parent = parent_table();
        let children = vec![child_table("members", &[("A1", "Fatima")])];

        let err = join_records(&parent, &children, "HouseholdID", "FID").unwrap_err();
        assert!(matches!(err, IngestError::MissingColumn { .. }));

        let err = join_records(&parent, &children, "FID", "ParentRef").unwrap_err();
        assert!(matches!(err, IngestError::MissingColumn { .. }));
    }
}
