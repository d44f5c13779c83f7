// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Catalog-native entity descriptors
//!
//! Descriptors are snapshots owned by the catalog service. The bridge reads
//! them and hands translated copies to the engine; it never edits them in
//! place. Changes go through `CatalogMetadataService::alter_table`.

use super::identifier::CatalogIdentifier;
use super::types::DataType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Who created or last changed an entity, and when
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditInfo {
    pub creator: Option<String>,
    pub create_time: DateTime<Utc>,
    pub last_modifier: Option<String>,
    pub last_modified_time: Option<DateTime<Utc>>,
}

impl AuditInfo {
    pub fn created_by(creator: Option<String>) -> Self {
        Self {
            creator,
            create_time: Utc::now(),
            last_modifier: None,
            last_modified_time: None,
        }
    }

    pub fn touch(&mut self, modifier: Option<String>) {
        self.last_modifier = modifier;
        self.last_modified_time = Some(Utc::now());
    }
}

impl Default for AuditInfo {
    fn default() -> Self {
        Self::created_by(None)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaDescriptor {
    pub name: String,
    pub comment: Option<String>,
    pub properties: HashMap<String, String>,
    pub audit: AuditInfo,
}

impl SchemaDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            comment: None,
            properties: HashMap::new(),
            audit: AuditInfo::default(),
        }
    }

    pub fn with_properties(mut self, properties: HashMap<String, String>) -> Self {
        self.properties = properties;
        self
    }

    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.audit.creator = Some(creator.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub name: String,
    pub data_type: DataType,
    pub nullable: bool,
    pub auto_increment: bool,
    /// Default value expression as the backend stores it
    pub default_value: Option<String>,
    pub comment: Option<String>,
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>, data_type: DataType, nullable: bool) -> Self {
        Self {
            name: name.into(),
            data_type,
            nullable,
            auto_increment: false,
            default_value: None,
            comment: None,
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn with_default(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = Some(default_value.into());
        self
    }
}

/// Partition transform applied to table columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transform {
    Identity(String),
    Bucket { num_buckets: u32, columns: Vec<String> },
    Truncate { width: u32, column: String },
    Year(String),
    Month(String),
    Day(String),
    Hour(String),
}

impl Transform {
    /// Columns the transform reads
    pub fn columns(&self) -> Vec<&str> {
        match self {
            Transform::Identity(c)
            | Transform::Year(c)
            | Transform::Month(c)
            | Transform::Day(c)
            | Transform::Hour(c) => vec![c.as_str()],
            Transform::Truncate { column, .. } => vec![column.as_str()],
            Transform::Bucket { columns, .. } => columns.iter().map(String::as_str).collect(),
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform::Identity(c) => write!(f, "{}", c),
            Transform::Bucket {
                num_buckets,
                columns,
            } => write!(f, "bucket({}, {})", columns.join(", "), num_buckets),
            Transform::Truncate { width, column } => write!(f, "truncate({}, {})", column, width),
            Transform::Year(c) => write!(f, "year({})", c),
            Transform::Month(c) => write!(f, "month({})", c),
            Transform::Day(c) => write!(f, "day({})", c),
            Transform::Hour(c) => write!(f, "hour({})", c),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDescriptor {
    pub schema_name: String,
    pub name: String,
    pub comment: Option<String>,
    pub columns: Vec<ColumnDescriptor>,
    pub properties: HashMap<String, String>,
    pub partitioning: Vec<Transform>,
    pub audit: AuditInfo,
}

impl TableDescriptor {
    pub fn new(
        schema_name: impl Into<String>,
        name: impl Into<String>,
        columns: Vec<ColumnDescriptor>,
    ) -> Self {
        Self {
            schema_name: schema_name.into(),
            name: name.into(),
            comment: None,
            columns,
            properties: HashMap::new(),
            partitioning: Vec::new(),
            audit: AuditInfo::default(),
        }
    }

    pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_mut(&mut self, name: &str) -> Option<&mut ColumnDescriptor> {
        self.columns.iter_mut().find(|c| c.name == name)
    }

    /// Identity of this table, if its names are addressable
    pub fn identifier(&self) -> super::error::CatalogResult<CatalogIdentifier> {
        CatalogIdentifier::new(self.schema_name.clone(), self.name.clone())
    }
}

/// One change applied by `alter_table`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TableChange {
    RenameTable(String),
    UpdateComment(Option<String>),
    SetProperty { key: String, value: String },
    RemoveProperty(String),
    AddColumn(ColumnDescriptor),
    DeleteColumn { name: String, if_exists: bool },
    RenameColumn { name: String, new_name: String },
    UpdateColumnComment { name: String, comment: Option<String> },
    UpdateColumnType { name: String, data_type: DataType },
}
