// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Structural type mapping shared by all adapters
//!
//! Each adapter rejects what its backend cannot store and then delegates
//! here. Nested element types are routed back through the adapter so its
//! restrictions apply at every depth.

use super::MetadataAdapter;
use crate::catalog::error::{CatalogError, CatalogResult};
use crate::catalog::provider::CatalogProvider;
use crate::catalog::types::{DataType, StructField};
use crate::connector::spi::{EngineType, RowField};

/// Engine precision used for time and timestamp types when the backend
/// does not say otherwise
pub const DEFAULT_TIME_PRECISION: u8 = 3;

pub fn unsupported_catalog_type(provider: CatalogProvider, data_type: &DataType) -> CatalogError {
    CatalogError::UnsupportedType(format!(
        "Catalog type '{}' is not supported by provider {}",
        data_type, provider
    ))
}

/// Nested shape the engine's types cannot express
fn unsupported_nesting(provider: CatalogProvider, data_type: &DataType, detail: &str) -> CatalogError {
    CatalogError::UnsupportedType(format!(
        "Catalog type '{}' is not supported by provider {}: {}",
        data_type, provider, detail
    ))
}

pub fn unsupported_engine_type(provider: CatalogProvider, engine_type: &EngineType) -> CatalogError {
    CatalogError::UnsupportedType(format!(
        "Engine type '{}' is not supported by provider {}",
        engine_type, provider
    ))
}

/// Catalog type to engine type
pub fn to_engine_type(
    adapter: &dyn MetadataAdapter,
    data_type: &DataType,
    time_precision: u8,
) -> CatalogResult<EngineType> {
    let engine_type = match data_type {
        DataType::Boolean => EngineType::Boolean,
        DataType::Byte => EngineType::TinyInt,
        DataType::Short => EngineType::SmallInt,
        DataType::Integer => EngineType::Integer,
        DataType::Long => EngineType::BigInt,
        DataType::Float => EngineType::Real,
        DataType::Double => EngineType::Double,
        DataType::Decimal { precision, scale } => EngineType::Decimal {
            precision: *precision,
            scale: *scale,
        },
        DataType::Date => EngineType::Date,
        DataType::Time => EngineType::Time(time_precision),
        DataType::Timestamp {
            with_time_zone: false,
        } => EngineType::Timestamp(time_precision),
        DataType::Timestamp {
            with_time_zone: true,
        } => EngineType::TimestampWithTimeZone(time_precision),
        DataType::String => EngineType::Varchar(None),
        DataType::VarChar(len) => EngineType::Varchar(Some(*len)),
        DataType::FixedChar(len) => EngineType::Char(*len),
        DataType::Binary => EngineType::Varbinary,
        DataType::Uuid => EngineType::Uuid,
        DataType::List {
            element_type,
            element_nullable,
        } => {
            if !element_nullable {
                return Err(unsupported_nesting(
                    adapter.provider(),
                    data_type,
                    "list elements must be nullable",
                ));
            }
            EngineType::Array(Box::new(adapter.to_engine_type(element_type)?))
        }
        DataType::Map {
            key_type,
            value_type,
            value_nullable,
        } => {
            if !value_nullable {
                return Err(unsupported_nesting(
                    adapter.provider(),
                    data_type,
                    "map values must be nullable",
                ));
            }
            EngineType::Map(
                Box::new(adapter.to_engine_type(key_type)?),
                Box::new(adapter.to_engine_type(value_type)?),
            )
        }
        DataType::Struct(fields) => {
            let mut row = Vec::with_capacity(fields.len());
            for field in fields {
                if !field.nullable || field.comment.is_some() {
                    return Err(unsupported_nesting(
                        adapter.provider(),
                        data_type,
                        &format!("field '{}' must be nullable and uncommented", field.name),
                    ));
                }
                row.push(RowField::new(field.name.clone(), adapter.to_engine_type(&field.data_type)?));
            }
            EngineType::Row(row)
        }
        DataType::Fixed(_)
        | DataType::IntervalYear
        | DataType::IntervalDay
        | DataType::Unparsed(_) => {
            return Err(unsupported_catalog_type(adapter.provider(), data_type))
        }
    };
    Ok(engine_type)
}

/// Engine type to catalog type
///
/// The catalog does not record time precision, so only `time_precision`
/// (the precision reads report) is accepted.
pub fn to_catalog_type(
    adapter: &dyn MetadataAdapter,
    engine_type: &EngineType,
    time_precision: u8,
) -> CatalogResult<DataType> {
    let data_type = match engine_type {
        EngineType::Time(p) | EngineType::Timestamp(p) | EngineType::TimestampWithTimeZone(p)
            if *p != time_precision =>
        {
            return Err(CatalogError::UnsupportedType(format!(
                "Engine type '{}' is not supported by provider {}: only precision {} is stored",
                engine_type,
                adapter.provider(),
                time_precision
            )))
        }
        EngineType::Boolean => DataType::Boolean,
        EngineType::TinyInt => DataType::Byte,
        EngineType::SmallInt => DataType::Short,
        EngineType::Integer => DataType::Integer,
        EngineType::BigInt => DataType::Long,
        EngineType::Real => DataType::Float,
        EngineType::Double => DataType::Double,
        EngineType::Decimal { precision, scale } => DataType::Decimal {
            precision: *precision,
            scale: *scale,
        },
        EngineType::Date => DataType::Date,
        EngineType::Time(_) => DataType::Time,
        EngineType::Timestamp(_) => DataType::Timestamp {
            with_time_zone: false,
        },
        EngineType::TimestampWithTimeZone(_) => DataType::Timestamp {
            with_time_zone: true,
        },
        EngineType::Varchar(None) => DataType::String,
        EngineType::Varchar(Some(len)) => DataType::VarChar(*len),
        EngineType::Char(len) => DataType::FixedChar(*len),
        EngineType::Varbinary => DataType::Binary,
        EngineType::Uuid => DataType::Uuid,
        EngineType::Array(element) => DataType::list(adapter.to_catalog_type(element)?, true),
        EngineType::Map(key, value) => DataType::map(
            adapter.to_catalog_type(key)?,
            adapter.to_catalog_type(value)?,
            true,
        ),
        EngineType::Row(fields) => DataType::Struct(
            fields
                .iter()
                .map(|f| {
                    Ok(StructField::new(
                        f.name.clone(),
                        adapter.to_catalog_type(&f.field_type)?,
                        true,
                    ))
                })
                .collect::<CatalogResult<Vec<_>>>()?,
        ),
        EngineType::Json => return Err(unsupported_engine_type(adapter.provider(), engine_type)),
    };
    Ok(data_type)
}

#[cfg(test)]
mod tests {
    use crate::adapter::create_adapter;
    use crate::catalog::error::CatalogError;
    use crate::catalog::provider::CatalogProvider;
    use crate::catalog::types::{DataType, StructField};

    fn nested_types() -> Vec<DataType> {
        vec![
            DataType::list(DataType::Long, true),
            DataType::map(DataType::String, DataType::list(DataType::Double, true), true),
            DataType::Struct(vec![
                StructField::new("id", DataType::Long, true),
                StructField::new("tags", DataType::list(DataType::String, true), true),
            ]),
        ]
    }

    #[test]
    fn test_nested_types_round_trip() {
        for provider in [CatalogProvider::LakehouseIceberg, CatalogProvider::LakehousePaimon] {
            let adapter = create_adapter(provider);
            for data_type in nested_types() {
                let engine = adapter.to_engine_type(&data_type).unwrap();
                assert_eq!(adapter.to_catalog_type(&engine).unwrap(), data_type);
            }
        }
    }

    #[test]
    fn test_non_null_nesting_rejected() {
        let adapter = create_adapter(CatalogProvider::LakehouseIceberg);
        let mut commented = StructField::new("id", DataType::Long, true);
        commented.comment = Some("key".to_string());
        let lossy = [
            DataType::list(DataType::Long, false),
            DataType::map(DataType::String, DataType::Long, false),
            DataType::Struct(vec![StructField::new("id", DataType::Long, false)]),
            DataType::Struct(vec![commented]),
            DataType::list(DataType::list(DataType::Long, false), true),
        ];
        for data_type in lossy {
            assert!(
                matches!(
                    adapter.to_engine_type(&data_type),
                    Err(CatalogError::UnsupportedType(_))
                ),
                "{} should be rejected",
                data_type
            );
        }
    }
}
