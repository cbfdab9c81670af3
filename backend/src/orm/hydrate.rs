//! Row hydration for joined queries
//!
//! The root table and every join contribute one contiguous block of columns to
//! the select list. Each row is split back into per-node records, which are
//! de-duplicated by the chain of ids leading to them and finally nested under
//! their parents as objects (to-one) or arrays (to-many).

use std::collections::HashMap;

use serde_json::{Map, Value};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use super::builder::Join;
use super::traits::{ColumnType, EntitySchema, quote_ident};

struct Node {
    alias: String,
    parent: Option<usize>,
    /// Field on the parent record this node hydrates into
    field: &'static str,
    many: bool,
    schema: &'static EntitySchema,
    /// Index of this node's first column in the select list
    offset: usize,
    children: Vec<usize>,
}

/// Select list layout plus the nesting needed to rebuild records.
pub(crate) struct Plan {
    nodes: Vec<Node>,
}

type Record = Map<String, Value>;

impl Plan {
    pub(crate) fn new(root: &'static EntitySchema, joins: &[Join]) -> Self {
        let mut nodes = vec![Node {
            alias: root.alias.to_string(),
            parent: None,
            field: "",
            many: false,
            schema: root,
            offset: 0,
            children: Vec::new(),
        }];
        let mut offset = root.columns.len();

        for join in joins {
            let parent = nodes
                .iter()
                .position(|n| n.alias == join.parent_alias)
                .unwrap_or(0);
            let index = nodes.len();
            nodes[parent].children.push(index);

            let schema = join.target();
            nodes.push(Node {
                alias: join.alias.clone(),
                parent: Some(parent),
                field: join.relation.name,
                many: join.relation.is_many(),
                schema,
                offset,
                children: Vec::new(),
            });
            offset += schema.columns.len();
        }

        Self { nodes }
    }

    pub(crate) fn select_list(&self) -> Vec<String> {
        self.nodes
            .iter()
            .flat_map(|node| {
                node.schema
                    .columns
                    .iter()
                    .map(move |c| format!("{}.{}", quote_ident(&node.alias), quote_ident(c.name)))
            })
            .collect()
    }

    /// Root id first, then every join's id, so children come out in id order.
    pub(crate) fn order_list(&self) -> Vec<String> {
        self.nodes
            .iter()
            .map(|node| {
                format!(
                    "{}.{} ASC",
                    quote_ident(&node.alias),
                    quote_ident(node.schema.primary_key)
                )
            })
            .collect()
    }

    fn primary_key_index(node: &Node) -> usize {
        let position = node
            .schema
            .columns
            .iter()
            .position(|c| c.name == node.schema.primary_key)
            .unwrap_or(0);
        node.offset + position
    }

    fn decode_record(&self, node: &Node, row: &SqliteRow) -> Result<Record, sqlx::Error> {
        let mut record = Record::new();

        for (i, column) in node.schema.columns.iter().enumerate() {
            let index = node.offset + i;
            let value = match column.column_type {
                ColumnType::Integer => row.try_get::<Option<i64>, _>(index)?.map(Value::from),
                ColumnType::Real => row.try_get::<Option<f64>, _>(index)?.map(Value::from),
                ColumnType::Text => row.try_get::<Option<String>, _>(index)?.map(Value::from),
                ColumnType::Boolean => row
                    .try_get::<Option<i64>, _>(index)?
                    .map(|v| Value::Bool(v != 0)),
            };
            record.insert(column.name.to_string(), value.unwrap_or(Value::Null));
        }

        for &child in &node.children {
            let child = &self.nodes[child];
            let empty = if child.many {
                Value::Array(Vec::new())
            } else {
                Value::Null
            };
            record.insert(child.field.to_string(), empty);
        }

        Ok(record)
    }

    /// Rebuild root records, in first-seen order, from joined rows.
    pub(crate) fn hydrate(&self, rows: &[SqliteRow]) -> Result<Vec<Value>, sqlx::Error> {
        let count = self.nodes.len();
        let mut instances: Vec<Vec<(Vec<i64>, Record)>> = (0..count).map(|_| Vec::new()).collect();
        let mut seen: Vec<HashMap<Vec<i64>, usize>> = (0..count).map(|_| HashMap::new()).collect();

        for row in rows {
            let mut keys: Vec<Option<Vec<i64>>> = vec![None; count];

            for (i, node) in self.nodes.iter().enumerate() {
                let mut key = match node.parent {
                    None => Vec::new(),
                    Some(parent) => match &keys[parent] {
                        Some(parent_key) => parent_key.clone(),
                        // Parent missing on this row, so are its descendants
                        None => continue,
                    },
                };

                let Some(id) = row.try_get::<Option<i64>, _>(Self::primary_key_index(node))? else {
                    continue;
                };
                key.push(id);

                if !seen[i].contains_key(&key) {
                    let record = self.decode_record(node, row)?;
                    seen[i].insert(key.clone(), instances[i].len());
                    instances[i].push((key.clone(), record));
                }
                keys[i] = Some(key);
            }
        }

        // Children always come after their parent, so attach deepest first
        for i in (1..count).rev() {
            let node = &self.nodes[i];
            let Some(parent) = node.parent else { continue };

            for (key, record) in std::mem::take(&mut instances[i]) {
                let parent_key = &key[..key.len() - 1];
                let Some(&position) = seen[parent].get(parent_key) else {
                    continue;
                };
                let parent_record = &mut instances[parent][position].1;

                if node.many {
                    if let Some(Value::Array(items)) = parent_record.get_mut(node.field) {
                        items.push(Value::Object(record));
                    }
                } else {
                    parent_record.insert(node.field.to_string(), Value::Object(record));
                }
            }
        }

        Ok(instances
            .swap_remove(0)
            .into_iter()
            .map(|(_, record)| Value::Object(record))
            .collect())
    }
}
