// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Partition transform expressions
//!
//! Engines spell partitioning as strings such as `dt`, `bucket(id, 4)` or
//! `day(ts)`. This module parses them into catalog `Transform`s.

use crate::catalog::error::{CatalogError, CatalogResult};
use crate::catalog::identifier::validate_name;
use crate::catalog::metadata::Transform;
use once_cell::sync::Lazy;
use regex::Regex;

static FUNCTION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?P<func>[A-Za-z]+)\s*\((?P<args>[^()]*)\)\s*$")
        .expect("function pattern is a valid regex")
});

fn invalid(expr: &str) -> CatalogError {
    CatalogError::InvalidArgument(format!("Invalid partition expression: {}", expr))
}

/// Column argument, held to the same rules as column names
fn column_arg(arg: &str) -> CatalogResult<String> {
    validate_name("Partition column", arg)?;
    Ok(arg.to_string())
}

fn number_arg(arg: &str, expr: &str) -> CatalogResult<u32> {
    arg.parse::<u32>()
        .map_err(|_| CatalogError::InvalidArgument(format!("Invalid argument in: {}", expr)))
}

/// Parse `col`, `bucket(col, ..., n)`, `truncate(col, w)` or
/// `year|month|day|hour(col)`
pub fn parse_transform(expr: &str) -> CatalogResult<Transform> {
    let Some(caps) = FUNCTION_PATTERN.captures(expr) else {
        let column = expr.trim();
        if column.is_empty() || validate_name("Partition column", column).is_err() {
            return Err(invalid(expr));
        }
        return Ok(Transform::Identity(column.to_string()));
    };

    let args: Vec<&str> = caps["args"].split(',').map(str::trim).collect();
    let transform = match (caps["func"].to_lowercase().as_str(), args.as_slice()) {
        ("bucket", [columns @ .., count]) if !columns.is_empty() => Transform::Bucket {
            num_buckets: number_arg(count, expr)?,
            columns: columns
                .iter()
                .map(|c| column_arg(c))
                .collect::<CatalogResult<Vec<_>>>()?,
        },
        ("truncate", [column, width]) => Transform::Truncate {
            width: number_arg(width, expr)?,
            column: column_arg(column)?,
        },
        ("year", [column]) => Transform::Year(column_arg(column)?),
        ("month", [column]) => Transform::Month(column_arg(column)?),
        ("day", [column]) => Transform::Day(column_arg(column)?),
        ("hour", [column]) => Transform::Hour(column_arg(column)?),
        _ => {
            return Err(CatalogError::InvalidArgument(format!(
                "Unsupported partition expression: {}",
                expr
            )))
        }
    };
    Ok(transform)
}

/// Identity column names, failing on any other transform
pub fn identity_columns(transforms: &[Transform], provider: &str) -> CatalogResult<Vec<String>> {
    transforms
        .iter()
        .map(|t| match t {
            Transform::Identity(column) => Ok(column.clone()),
            other => Err(CatalogError::UnsupportedOperation(format!(
                "Partition transform '{}' is not supported by provider {}",
                other, provider
            ))),
        })
        .collect()
}
