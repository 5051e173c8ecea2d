//! Component read and write paths
//!
//! A component is a row in `component` plus exactly one row, under the same
//! id, in the attribute table of its kind. The pair is written in a single
//! immediate transaction, and the kind is recovered by probing which
//! attribute table holds the id.

use std::collections::HashMap;

use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row, TransactionBehavior};

use super::{now_text, parse_datetime, CatalogStore, ComponentFilter, Result, StoreError};
use crate::core::identity::ComponentKind;
use crate::entities::{Component, ComponentDraft, TypeAttributes};

/// Base columns in the order `BaseRecord::from_row` reads them
const BASE_COLUMNS: &str = "c.id, c.mpn, c.manufacturer, c.value, c.package, c.description, \
     c.comment_kicad, c.comment_altium, c.is_through_hole, \
     c.operating_temperature_min, c.operating_temperature_max, c.created_on, c.updated_on";

impl CatalogStore {
    /// Create a component together with its type-specific attributes
    pub fn create_component(&mut self, draft: &ComponentDraft) -> Result<Component> {
        let values = draft.attributes.values()?;
        let tx = self
            .conn_mut()
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        if find_id(&tx, &draft.mpn, &draft.manufacturer)?.is_some() {
            return Err(StoreError::DuplicateComponent {
                mpn: draft.mpn.clone(),
                manufacturer: draft.manufacturer.clone(),
            });
        }

        let now = now_text();
        tx.execute(
            "INSERT INTO component (
                mpn, manufacturer, created_on, updated_on, value, package, description,
                comment_altium, comment_kicad, is_through_hole,
                operating_temperature_min, operating_temperature_max
            ) VALUES (?1, ?2, ?3, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                draft.mpn,
                draft.manufacturer,
                now,
                draft.value,
                draft.package,
                draft.description,
                draft.comment_altium,
                draft.comment_kicad,
                draft.is_through_hole,
                draft.operating_temperature_min,
                draft.operating_temperature_max,
            ],
        )?;
        let id = tx.last_insert_rowid();

        insert_attributes(&tx, id, draft.kind(), values)?;
        tx.commit()?;

        tracing::debug!(id, kind = %draft.kind(), mpn = %draft.mpn, "created component");
        self.get_component(id)
    }

    /// Replace the common and type-specific attributes of a component.
    ///
    /// The kind and the (mpn, manufacturer) identity of a component are fixed
    /// at creation. A draft that changes either is rejected before anything
    /// is written.
    pub fn update_component(&mut self, id: i64, draft: &ComponentDraft) -> Result<Component> {
        let values = draft.attributes.values()?;
        let tx = self
            .conn_mut()
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let existing = kind_of(&tx, id)?.ok_or(StoreError::ComponentNotFound(id))?;
        if existing != draft.kind() {
            return Err(StoreError::KindMismatch {
                id,
                existing,
                requested: draft.kind(),
            });
        }

        let (mpn, manufacturer): (String, String) = tx.query_row(
            "SELECT mpn, manufacturer FROM component WHERE id = ?1",
            params![id],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        if mpn != draft.mpn || manufacturer != draft.manufacturer {
            return Err(StoreError::IdentityChange {
                id,
                mpn,
                manufacturer,
            });
        }

        tx.execute(
            "UPDATE component SET
                updated_on = ?2, value = ?3, package = ?4,
                description = ?5, comment_altium = ?6, comment_kicad = ?7,
                is_through_hole = ?8, operating_temperature_min = ?9,
                operating_temperature_max = ?10
             WHERE id = ?1",
            params![
                id,
                now_text(),
                draft.value,
                draft.package,
                draft.description,
                draft.comment_altium,
                draft.comment_kicad,
                draft.is_through_hole,
                draft.operating_temperature_min,
                draft.operating_temperature_max,
            ],
        )?;

        let columns = existing.attribute_columns();
        let assignments: Vec<String> = columns
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{} = ?{}", c.column, i + 2))
            .collect();
        let sql = format!(
            "UPDATE {} SET {} WHERE id = ?1",
            existing.table(),
            assignments.join(", ")
        );
        tx.execute(&sql, params_from_iter(bind_values(id, values).iter()))?;

        tx.commit()?;
        tracing::debug!(id, "updated component");
        self.get_component(id)
    }

    /// Get a component by id
    pub fn get_component(&self, id: i64) -> Result<Component> {
        load_component(self.conn(), id)?.ok_or(StoreError::ComponentNotFound(id))
    }

    /// Look up a component by its (mpn, manufacturer) identity
    pub fn find_component(&self, mpn: &str, manufacturer: &str) -> Result<Option<Component>> {
        match find_id(self.conn(), mpn, manufacturer)? {
            Some(id) => load_component(self.conn(), id),
            None => Ok(None),
        }
    }

    /// Kind of a component, `None` if it does not exist
    pub fn component_kind(&self, id: i64) -> Result<Option<ComponentKind>> {
        kind_of(self.conn(), id)
    }

    /// List components, newest first
    pub fn list_components(&self, filter: &ComponentFilter) -> Result<Vec<Component>> {
        let conn = self.conn();
        let mut sql = format!("SELECT {} FROM component c", BASE_COLUMNS);
        if let Some(kind) = filter.kind {
            sql.push_str(&format!(" JOIN {} t ON t.id = c.id", kind.table()));
        }

        let mut conditions = Vec::new();
        let mut bound: Vec<Value> = Vec::new();
        if let Some(package) = &filter.package {
            bound.push(Value::Text(package.clone()));
            conditions.push(format!("c.package = ?{}", bound.len()));
        }
        if let Some(search) = &filter.search {
            bound.push(Value::Text(format!("%{}%", escape_like(search))));
            let n = bound.len();
            conditions.push(format!(
                "(c.mpn LIKE ?{n} ESCAPE '\\' OR c.manufacturer LIKE ?{n} ESCAPE '\\' \
                 OR c.description LIKE ?{n} ESCAPE '\\')"
            ));
        }
        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }
        sql.push_str(" ORDER BY c.id DESC");
        if let Some(limit) = filter.limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }

        let mut stmt = conn.prepare(&sql)?;
        let records = stmt
            .query_map(params_from_iter(bound.iter()), BaseRecord::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let kinds = kind_index(conn)?;
        let mut components = Vec::with_capacity(records.len());
        for record in records {
            let Some(kind) = filter.kind.or_else(|| kinds.get(&record.id).copied()) else {
                tracing::warn!(id = record.id, "component has no attribute row, skipping");
                continue;
            };
            let attributes = load_attributes(conn, record.id, kind)?;
            components.push(record.into_component(attributes));
        }
        Ok(components)
    }

    /// Delete a component; its attribute row and associations go with it
    pub fn delete_component(&mut self, id: i64) -> Result<()> {
        let deleted = self
            .conn()
            .execute("DELETE FROM component WHERE id = ?1", params![id])?;
        if deleted == 0 {
            return Err(StoreError::ComponentNotFound(id));
        }
        tracing::debug!(id, "deleted component");
        Ok(())
    }
}

/// Escape `LIKE` wildcards so search text matches literally
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Load a component through any connection or transaction
pub(crate) fn load_component(conn: &Connection, id: i64) -> Result<Option<Component>> {
    let record = conn
        .query_row(
            &format!("SELECT {} FROM component c WHERE c.id = ?1", BASE_COLUMNS),
            params![id],
            BaseRecord::from_row,
        )
        .optional()?;

    let Some(record) = record else {
        return Ok(None);
    };
    let Some(kind) = kind_of(conn, id)? else {
        tracing::warn!(id, "component has no attribute row");
        return Ok(None);
    };

    let attributes = load_attributes(conn, id, kind)?;
    Ok(Some(record.into_component(attributes)))
}

/// Search the attribute tables for the kind of a component
pub(crate) fn kind_of(conn: &Connection, id: i64) -> Result<Option<ComponentKind>> {
    for kind in ComponentKind::all() {
        let found = conn
            .query_row(
                &format!("SELECT 1 FROM {} WHERE id = ?1", kind.table()),
                params![id],
                |_| Ok(()),
            )
            .optional()?;
        if found.is_some() {
            return Ok(Some(*kind));
        }
    }
    Ok(None)
}

/// Kind of every component that has an attribute row
fn kind_index(conn: &Connection) -> Result<HashMap<i64, ComponentKind>> {
    let mut index = HashMap::new();
    for kind in ComponentKind::all() {
        let mut stmt = conn.prepare(&format!("SELECT id FROM {}", kind.table()))?;
        let ids = stmt.query_map([], |row| row.get::<_, i64>(0))?;
        for id in ids {
            index.entry(id?).or_insert(*kind);
        }
    }
    Ok(index)
}

fn find_id(conn: &Connection, mpn: &str, manufacturer: &str) -> Result<Option<i64>> {
    Ok(conn
        .query_row(
            "SELECT id FROM component WHERE mpn = ?1 AND manufacturer = ?2",
            params![mpn, manufacturer],
            |row| row.get(0),
        )
        .optional()?)
}

fn load_attributes(conn: &Connection, id: i64, kind: ComponentKind) -> Result<TypeAttributes> {
    let columns: Vec<&str> = kind.attribute_columns().iter().map(|c| c.column).collect();
    let sql = format!(
        "SELECT {} FROM {} WHERE id = ?1",
        columns.join(", "),
        kind.table()
    );

    let values = conn.query_row(&sql, params![id], |row| {
        (0..columns.len())
            .map(|i| row.get::<_, Option<String>>(i))
            .collect::<rusqlite::Result<Vec<_>>>()
    })?;

    Ok(TypeAttributes::from_values(kind, values)?)
}

fn insert_attributes(
    conn: &Connection,
    id: i64,
    kind: ComponentKind,
    values: Vec<Option<String>>,
) -> Result<()> {
    let columns = kind.attribute_columns();
    let names: Vec<&str> = columns.iter().map(|c| c.column).collect();
    let placeholders: Vec<String> = (1..=columns.len() + 1).map(|i| format!("?{}", i)).collect();
    let sql = format!(
        "INSERT INTO {} (id, {}) VALUES ({})",
        kind.table(),
        names.join(", "),
        placeholders.join(", ")
    );

    conn.execute(&sql, params_from_iter(bind_values(id, values).iter()))?;
    Ok(())
}

/// Id followed by attribute values, ready to bind
fn bind_values(id: i64, values: Vec<Option<String>>) -> Vec<Value> {
    std::iter::once(Value::Integer(id))
        .chain(values.into_iter().map(|v| v.map_or(Value::Null, Value::Text)))
        .collect()
}

/// The `component` row before its attributes are attached
struct BaseRecord {
    id: i64,
    mpn: String,
    manufacturer: String,
    value: Option<String>,
    package: Option<String>,
    description: Option<String>,
    comment_kicad: Option<String>,
    comment_altium: Option<String>,
    is_through_hole: Option<bool>,
    operating_temperature_min: Option<String>,
    operating_temperature_max: Option<String>,
    created_on: String,
    updated_on: String,
}

impl BaseRecord {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            mpn: row.get(1)?,
            manufacturer: row.get(2)?,
            value: row.get(3)?,
            package: row.get(4)?,
            description: row.get(5)?,
            comment_kicad: row.get(6)?,
            comment_altium: row.get(7)?,
            is_through_hole: row.get(8)?,
            operating_temperature_min: row.get(9)?,
            operating_temperature_max: row.get(10)?,
            created_on: row.get(11)?,
            updated_on: row.get(12)?,
        })
    }

    fn into_component(self, attributes: TypeAttributes) -> Component {
        Component {
            id: self.id,
            mpn: self.mpn,
            manufacturer: self.manufacturer,
            value: self.value,
            package: self.package,
            description: self.description,
            comment_kicad: self.comment_kicad,
            comment_altium: self.comment_altium,
            is_through_hole: self.is_through_hole,
            operating_temperature_min: self.operating_temperature_min,
            operating_temperature_max: self.operating_temperature_max,
            created_on: parse_datetime(&self.created_on),
            updated_on: parse_datetime(&self.updated_on),
            attributes,
        }
    }
}
