//! Catalog connector registration

#[path = "testutils/mod.rs"]
mod testutils;

use std::collections::HashMap;
use std::sync::Arc;
use testutils::test_engine::RecordingEngine;
use testutils::test_fixture::init_logging;
use unicat::adapter::properties::AUTH_TYPE_KEY;
use unicat::connector::config::{METALAKE_KEY, SIMPLIFY_CATALOG_NAMES_KEY};
use unicat::{
    CatalogConfig, CatalogConnectorManager, CatalogError, CatalogProvider, ConnectorConfig,
    InMemoryCatalogService,
};

fn manager(simplify: bool) -> CatalogConnectorManager<RecordingEngine> {
    init_logging();
    let mut props = HashMap::new();
    props.insert(METALAKE_KEY.to_string(), "lake".to_string());
    props.insert(SIMPLIFY_CATALOG_NAMES_KEY.to_string(), simplify.to_string());
    CatalogConnectorManager::new(ConnectorConfig::from_properties(&props).unwrap())
}

fn collaborators() -> (Arc<InMemoryCatalogService>, Arc<RecordingEngine>) {
    let service = Arc::new(InMemoryCatalogService::new());
    let engine = Arc::new(RecordingEngine::new(service.clone()));
    (service, engine)
}

fn hive_config(name: &str) -> CatalogConfig {
    CatalogConfig::new(name, CatalogProvider::Hive)
        .with_property("metastore.uris", "thrift://localhost:9083")
}

fn mysql_config(name: &str) -> CatalogConfig {
    CatalogConfig::new(name, CatalogProvider::JdbcMysql)
        .with_property("jdbc-url", "jdbc:mysql://localhost:3306")
        .with_property("jdbc-driver", "com.mysql.cj.jdbc.Driver")
        .with_property("jdbc-user", "root")
        .with_property("jdbc-password", "secret")
}

#[test]
fn test_register_fills_defaults() {
    let manager = manager(true);
    let (service, engine) = collaborators();
    let connector = manager
        .register(hive_config("hive_prod"), service, engine)
        .unwrap();

    assert_eq!(connector.engine_name(), "hive_prod");
    assert_eq!(connector.bridge().adapter().provider(), CatalogProvider::Hive);
    let props = &connector.config().properties;
    assert_eq!(props.get(AUTH_TYPE_KEY).map(String::as_str), Some("simple"));
    assert_eq!(props.get("client.pool-size").map(String::as_str), Some("1"));
}

#[test]
fn test_register_validates_properties() {
    let manager = manager(true);

    let (service, engine) = collaborators();
    let missing = CatalogConfig::new("hive_prod", CatalogProvider::Hive);
    assert!(matches!(
        manager.register(missing, service, engine),
        Err(CatalogError::InvalidArgument(_))
    ));

    let (service, engine) = collaborators();
    let bad_auth = hive_config("hive_prod").with_property(AUTH_TYPE_KEY, "ldap");
    assert!(manager.register(bad_auth, service, engine).is_err());

    let (service, engine) = collaborators();
    let paimon = CatalogConfig::new("paimon", CatalogProvider::LakehousePaimon)
        .with_property("catalog-backend", "jdbc")
        .with_property("warehouse", "/tmp/paimon");
    assert!(manager.register(paimon, service, engine).is_err());

    let (service, engine) = collaborators();
    assert!(manager
        .register(hive_config("bad name"), service, engine)
        .is_err());
    assert_eq!(manager.catalog_count(), 0);
}

#[test]
fn test_duplicate_registration() {
    let manager = manager(true);
    let (service, engine) = collaborators();
    manager
        .register(mysql_config("orders_db"), service, engine)
        .unwrap();

    let (service, engine) = collaborators();
    assert!(manager
        .register(mysql_config("orders_db"), service, engine)
        .unwrap_err()
        .is_already_exists());
    assert_eq!(manager.catalog_count(), 1);
}

#[test]
fn test_registry_operations() {
    let manager = manager(false);
    for name in ["zeta", "alpha"] {
        let (service, engine) = collaborators();
        manager.register(hive_config(name), service, engine).unwrap();
    }

    assert_eq!(manager.list_catalog_names(), vec!["alpha", "zeta"]);
    assert!(manager.has_catalog("zeta"));
    assert_eq!(
        manager.get("alpha").map(|c| c.engine_name().to_string()),
        Some("lake.alpha".to_string())
    );
    assert!(manager.get_by_engine_name("lake.zeta").is_some());
    assert!(manager.get_by_engine_name("zeta").is_none());

    assert!(manager.unregister("zeta"));
    assert!(!manager.unregister("zeta"));
    assert!(!manager.has_catalog("zeta"));
    assert_eq!(manager.catalog_count(), 1);
}

#[test]
fn test_catalogs_are_isolated() {
    let manager = manager(true);
    let (first_service, first_engine) = collaborators();
    let (second_service, second_engine) = collaborators();
    let first = manager
        .register(hive_config("first"), first_service, first_engine)
        .unwrap();
    let second = manager
        .register(hive_config("second"), second_service, second_engine)
        .unwrap();

    first
        .bridge()
        .create_schema("only_here", &HashMap::new(), None)
        .unwrap();
    assert_eq!(first.bridge().list_schema_names().unwrap(), vec!["only_here"]);
    assert!(second.bridge().list_schema_names().unwrap().is_empty());
}
