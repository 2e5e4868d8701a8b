//! Resolved record schemas and the per-type schema registry.
//!
//! A [`RecordSchema`] is the validated, wire-ordered form of a record type's
//! [`FieldDecl`]s. Schemas are built the first time a type is used and
//! cached for the life of the process.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy;

use crate::date_format::DateFormat;
use crate::descriptor::{FieldDescriptor, ResolvedWidths};
use crate::error::{FixedWidthError, Result};
use crate::traits::{FieldDecl, FixedWidthRecord};
use crate::value::ValueKind;

static REGISTRY: Lazy<RwLock<HashMap<TypeId, Arc<RecordSchema>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// One wire field of a resolved schema.
#[derive(Debug, Clone)]
pub struct SchemaField {
    /// Index into the record's field declarations.
    pub index: usize,
    /// Field name.
    pub name: &'static str,
    /// Value kind.
    pub kind: ValueKind,
    /// Whether a blank segment decodes to null.
    pub nullable: bool,
    /// Inner and outer descriptors.
    pub widths: ResolvedWidths,
    /// Field-level date format.
    pub date_format: Option<DateFormat>,
}

impl SchemaField {
    /// The descriptor the value is formatted with.
    pub fn inner(&self) -> &FieldDescriptor {
        &self.widths.inner
    }

    /// The containing descriptor of a composite field.
    pub fn outer(&self) -> Option<&FieldDescriptor> {
        self.widths.outer.as_ref()
    }

    /// Returns `true` for two-descriptor fields.
    pub fn is_composite(&self) -> bool {
        self.widths.outer.is_some()
    }
}

/// The resolved wire layout of a record type.
#[derive(Debug, Clone)]
pub struct RecordSchema {
    record: &'static str,
    fields: Vec<SchemaField>,
}

impl RecordSchema {
    /// Returns the cached schema for `T`, resolving it on first use.
    ///
    /// Resolution failures are returned every time and never cached.
    pub fn of<T: FixedWidthRecord>() -> Result<Arc<RecordSchema>> {
        let key = TypeId::of::<T>();

        if let Some(schema) = REGISTRY
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(&key)
        {
            return Ok(Arc::clone(schema));
        }

        let schema = Arc::new(RecordSchema::build(
            std::any::type_name::<T>(),
            T::field_decls(),
        )?);
        tracing::debug!(
            record = schema.record,
            fields = schema.fields.len(),
            width = schema.line_width(),
            "resolved fixed-width schema"
        );

        let mut registry = REGISTRY
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(Arc::clone(registry.entry(key).or_insert(schema)))
    }

    /// Validates and resolves a list of declarations.
    pub fn build(record: &'static str, decls: Vec<FieldDecl>) -> Result<Self> {
        let mut fields = Vec::with_capacity(decls.len());

        for (index, decl) in decls.into_iter().enumerate() {
            let configuration = |reason: String| FixedWidthError::Configuration {
                record,
                field: decl.name,
                reason,
            };

            let widths = match ResolvedWidths::resolve(&decl.descriptors) {
                Ok(Some(widths)) => widths,
                Ok(None) => continue,
                Err(e) => return Err(configuration(e.to_string())),
            };

            let date_format = match decl.date_format {
                Some(_) if decl.kind != ValueKind::Date => {
                    return Err(configuration(format!(
                        "date format declared on a {} field",
                        decl.kind
                    )))
                }
                Some(pattern) => Some(DateFormat::compile(pattern).map_err(configuration)?),
                None => None,
            };

            fields.push(SchemaField {
                index,
                name: decl.name,
                kind: decl.kind,
                nullable: decl.nullable,
                widths,
                date_format,
            });
        }

        Ok(RecordSchema { record, fields })
    }

    /// The record type name.
    pub fn record(&self) -> &'static str {
        self.record
    }

    /// Wire fields in order.
    pub fn fields(&self) -> &[SchemaField] {
        &self.fields
    }

    /// Width of an encoded line without delimiters, assuming every value fits.
    pub fn line_width(&self) -> usize {
        self.fields
            .iter()
            .map(|f| f.outer().map_or(f.inner().width, |o| o.width))
            .sum()
    }
}
