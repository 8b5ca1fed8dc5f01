//! Checks for database connections: PostgreSQL and MariaDB/MySQL
//!
//! A database target is configured either with one specifier for every
//! connection of that vendor, or with a table of alias → specifier.
//! Only connections in the checked set, of the matching vendor and with a
//! specifier are compared.

use crate::checks::{parse_for, EXPECTED_STR_OR_MAPPING};
use crate::domain::{Diagnostic, Target, VersionSpecifier};
use crate::error::ProbeError;
use crate::extract::extract_version;
use crate::probe::ConnectionRegistry;
use crate::settings::Settings;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Parsed specifiers of a database target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSpecifiers {
    /// One specifier for every connection of the vendor
    All(VersionSpecifier),
    /// Specifiers for individual aliases
    PerAlias(BTreeMap<String, VersionSpecifier>),
}

impl TargetSpecifiers {
    /// Validate and parse the configured value for `target`
    ///
    /// Reports E001 when the value is not a string or a table of strings,
    /// and E002 for the first specifier (in the order written) that fails to parse.
    pub fn from_config(target: Target, value: &Value) -> Result<Self, Diagnostic> {
        match value {
            Value::String(text) => parse_for(target, text).map(TargetSpecifiers::All),
            Value::Object(map) => {
                if !map.values().all(Value::is_string) {
                    return Err(bad_type(target, value));
                }

                let mut specifiers = BTreeMap::new();
                for (alias, text) in map {
                    let text = text.as_str().unwrap_or_default();
                    specifiers.insert(alias.clone(), parse_for(target, text)?);
                }
                Ok(TargetSpecifiers::PerAlias(specifiers))
            }
            _ => Err(bad_type(target, value)),
        }
    }

    /// The specifier that applies to `alias`, if any
    pub fn for_alias(&self, alias: &str) -> Option<&VersionSpecifier> {
        match self {
            TargetSpecifiers::All(specifier) => Some(specifier),
            TargetSpecifiers::PerAlias(map) => map.get(alias),
        }
    }
}

/// Check PostgreSQL connections against `version_checks.postgresql` (E004)
///
/// `databases` is the set of aliases to check; `None` checks every
/// connection in the registry.
pub fn check_postgresql_version(
    settings: &Settings,
    registry: &ConnectionRegistry,
    databases: Option<&[String]>,
) -> Result<Vec<Diagnostic>, ProbeError> {
    check_connections(settings, Target::Postgresql, registry, databases)
}

/// Check MariaDB/MySQL connections against `version_checks.mysql` (E005)
///
/// `databases` is the set of aliases to check; `None` checks every
/// connection in the registry.
pub fn check_mysql_version(
    settings: &Settings,
    registry: &ConnectionRegistry,
    databases: Option<&[String]>,
) -> Result<Vec<Diagnostic>, ProbeError> {
    check_connections(settings, Target::Mysql, registry, databases)
}

fn check_connections(
    settings: &Settings,
    target: Target,
    registry: &ConnectionRegistry,
    databases: Option<&[String]>,
) -> Result<Vec<Diagnostic>, ProbeError> {
    let (Some(vendor), Some(value)) = (target.vendor(), settings.target_config(target)) else {
        return Ok(Vec::new());
    };

    let specifiers = match TargetSpecifiers::from_config(target, &value) {
        Ok(specifiers) => specifiers,
        Err(diagnostic) => return Ok(vec![diagnostic]),
    };

    let mut errors = Vec::new();
    for connection in registry.iter() {
        let alias = connection.alias();

        if !is_checked(databases, alias) {
            trace!(check = target.key(), alias, "connection not in checked set");
            continue;
        }
        if connection.vendor() != &vendor {
            continue;
        }
        let Some(range) = specifiers.for_alias(alias) else {
            trace!(check = target.key(), alias, "no range configured for connection");
            continue;
        };

        let version = extract_version(target, &connection.server_version()?)?;
        debug!(check = target.key(), alias, %version, %range, "checking connection version");

        if !range.contains(&version) {
            errors.push(Diagnostic::connection_mismatch(target, alias, &version, range));
        }
    }

    Ok(errors)
}

fn is_checked(databases: Option<&[String]>, alias: &str) -> bool {
    databases.map_or(true, |aliases| aliases.iter().any(|a| a == alias))
}

fn bad_type(target: Target, value: &Value) -> Diagnostic {
    Diagnostic::bad_type(Some(target), EXPECTED_STR_OR_MAPPING, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DiagnosticCode, RawVersion, Vendor};
    use crate::probe::DeclaredConnection;
    use serde_json::json;

    fn settings(value: Value) -> Settings {
        Settings::overridden(value)
    }

    fn fake_postgresql(pg_version: u64) -> ConnectionRegistry {
        ConnectionRegistry::new().with(DeclaredConnection::new(
            "default",
            Vendor::Postgresql,
            Some(RawVersion::Encoded(pg_version)),
        ))
    }

    fn fake_mysql(version: [u64; 3]) -> ConnectionRegistry {
        ConnectionRegistry::new().with(DeclaredConnection::new(
            "default",
            Vendor::Mysql,
            Some(RawVersion::Tuple(version.to_vec())),
        ))
    }

    fn fake_sqlite() -> ConnectionRegistry {
        ConnectionRegistry::new().with(DeclaredConnection::new("default", Vendor::Sqlite, None))
    }

    fn default_only() -> Vec<String> {
        vec!["default".to_string()]
    }

    #[test]
    fn test_postgresql_fail_bad_type() {
        let errors = check_postgresql_version(
            &settings(json!({"postgresql": 13})),
            &fake_sqlite(),
            Some(&default_only()),
        )
        .unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, DiagnosticCode::BadType);
        assert_eq!(
            errors[0].message,
            "settings.VERSION_CHECKS['postgresql'] is misconfigured. Expected a str or dict[str, str] but got 13."
        );
    }

    #[test]
    fn test_postgresql_fail_bad_type_in_dict() {
        let errors = check_postgresql_version(
            &settings(json!({"postgresql": {"default": 13}})),
            &fake_postgresql(130000),
            Some(&default_only()),
        )
        .unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].message,
            "settings.VERSION_CHECKS['postgresql'] is misconfigured. Expected a str or dict[str, str] but got {'default': 13}."
        );
    }

    #[test]
    fn test_postgresql_bad_type_keeps_written_key_order() {
        let errors = check_postgresql_version(
            &settings(json!({"postgresql": {"replica": ">=1", "default": 13}})),
            &fake_postgresql(130000),
            None,
        )
        .unwrap();
        assert_eq!(
            errors[0].message,
            "settings.VERSION_CHECKS['postgresql'] is misconfigured. Expected a str or dict[str, str] but got {'replica': '>=1', 'default': 13}."
        );
    }

    #[test]
    fn test_postgresql_reports_first_written_bad_specifier() {
        let errors = check_postgresql_version(
            &settings(json!({"postgresql": {"zeta": "nope", "alpha": "bad"}})),
            &fake_postgresql(130000),
            None,
        )
        .unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].message,
            "settings.VERSION_CHECKS['postgresql'] is misconfigured. 'nope' is not a valid PEP440 specifier."
        );
    }

    #[test]
    fn test_postgresql_fail_bad_specifier() {
        let errors = check_postgresql_version(
            &settings(json!({"postgresql": "13.1"})),
            &fake_sqlite(),
            Some(&default_only()),
        )
        .unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, DiagnosticCode::BadSpecifier);
        assert_eq!(
            errors[0].message,
            "settings.VERSION_CHECKS['postgresql'] is misconfigured. '13.1' is not a valid PEP440 specifier."
        );
    }

    #[test]
    fn test_postgresql_fail_bad_specifier_in_dict() {
        let errors = check_postgresql_version(
            &settings(json!({"postgresql": {"default": "13.1"}})),
            &fake_sqlite(),
            Some(&default_only()),
        )
        .unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].message,
            "settings.VERSION_CHECKS['postgresql'] is misconfigured. '13.1' is not a valid PEP440 specifier."
        );
    }

    #[test]
    fn test_postgresql_bad_specifier_stops_before_probing() {
        // A connection without a version would error if it were asked
        let registry = ConnectionRegistry::new().with(DeclaredConnection::new(
            "default",
            Vendor::Postgresql,
            None,
        ));
        let errors = check_postgresql_version(
            &settings(json!({"postgresql": {"default": ">=13", "other": "nope"}})),
            &registry,
            None,
        )
        .unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, DiagnosticCode::BadSpecifier);
        assert!(errors[0].message.contains("'nope'"));
    }

    #[test]
    fn test_postgresql_old_version_out_of_range() {
        let errors = check_postgresql_version(
            &settings(json!({"postgresql": "~=13.1"})),
            &fake_postgresql(90105),
            Some(&default_only()),
        )
        .unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, DiagnosticCode::PostgresqlMismatch);
        assert_eq!(
            errors[0].message,
            "The current version of PostgreSQL (9.1.5) for the default database connection does not match the specified range (~=13.1)."
        );
    }

    #[test]
    fn test_postgresql_fail_out_of_range() {
        let errors = check_postgresql_version(
            &settings(json!({"postgresql": "~=13.1"})),
            &fake_postgresql(130000),
            Some(&default_only()),
        )
        .unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].message,
            "The current version of PostgreSQL (13.0) for the default database connection does not match the specified range (~=13.1)."
        );
    }

    #[test]
    fn test_postgresql_success_no_postgresql_connections() {
        let errors = check_postgresql_version(
            &settings(json!({"postgresql": "~=13.1"})),
            &fake_sqlite(),
            Some(&default_only()),
        )
        .unwrap();
        assert!(errors.is_empty());
    }

    #[test]
    fn test_postgresql_success_in_range() {
        let errors = check_postgresql_version(
            &settings(json!({"postgresql": "~=13.1"})),
            &fake_postgresql(130200),
            Some(&default_only()),
        )
        .unwrap();
        assert!(errors.is_empty());
    }

    #[test]
    fn test_postgresql_success_not_asked_about() {
        let errors = check_postgresql_version(
            &settings(json!({"postgresql": "~=13.1"})),
            &fake_postgresql(130000),
            Some(&["other".to_string()]),
        )
        .unwrap();
        assert!(errors.is_empty());
    }

    #[test]
    fn test_postgresql_databases_none_checks_everything() {
        let errors = check_postgresql_version(
            &settings(json!({"postgresql": "~=13.1"})),
            &fake_postgresql(130200),
            None,
        )
        .unwrap();
        assert!(errors.is_empty());

        let errors = check_postgresql_version(
            &settings(json!({"postgresql": "~=13.1"})),
            &fake_postgresql(130000),
            None,
        )
        .unwrap();
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_postgresql_success_in_range_specific_alias() {
        let errors = check_postgresql_version(
            &settings(json!({"postgresql": {"default": "~=13.1"}})),
            &fake_postgresql(130200),
            Some(&default_only()),
        )
        .unwrap();
        assert!(errors.is_empty());
    }

    #[test]
    fn test_postgresql_success_specified_other_alias() {
        let errors = check_postgresql_version(
            &settings(json!({"postgresql": {"other": "~=13.1"}})),
            &fake_postgresql(130000),
            Some(&default_only()),
        )
        .unwrap();
        assert!(errors.is_empty());
    }

    #[test]
    fn test_postgresql_success_unspecified() {
        let errors =
            check_postgresql_version(&settings(json!({})), &fake_postgresql(90105), None).unwrap();
        assert!(errors.is_empty());
    }

    #[test]
    fn test_postgresql_reports_each_failing_connection() {
        let registry = ConnectionRegistry::new()
            .with(DeclaredConnection::new(
                "default",
                Vendor::Postgresql,
                Some(RawVersion::Encoded(120005)),
            ))
            .with(DeclaredConnection::new(
                "replica",
                Vendor::Postgresql,
                Some(RawVersion::Encoded(110010)),
            ))
            .with(DeclaredConnection::new(
                "analytics",
                Vendor::Postgresql,
                Some(RawVersion::Encoded(150002)),
            ));

        let errors =
            check_postgresql_version(&settings(json!({"postgresql": ">=13"})), &registry, None)
                .unwrap();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].message.contains("for the default database"));
        assert!(errors[1].message.contains("for the replica database"));
    }

    #[test]
    fn test_postgresql_probe_error_propagates() {
        let registry = ConnectionRegistry::new().with(DeclaredConnection::new(
            "default",
            Vendor::Postgresql,
            None,
        ));
        let result = check_postgresql_version(
            &settings(json!({"postgresql": ">=13"})),
            &registry,
            Some(&default_only()),
        );
        assert!(matches!(result, Err(ProbeError::MissingVersion { .. })));
    }

    #[test]
    fn test_mysql_fail_bad_type() {
        let errors = check_mysql_version(
            &settings(json!({"mysql": 10})),
            &fake_sqlite(),
            Some(&default_only()),
        )
        .unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].message,
            "settings.VERSION_CHECKS['mysql'] is misconfigured. Expected a str or dict[str, str] but got 10."
        );
    }

    #[test]
    fn test_mysql_fail_bad_specifier() {
        let errors = check_mysql_version(
            &settings(json!({"mysql": "10.5.8"})),
            &fake_sqlite(),
            Some(&default_only()),
        )
        .unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].message,
            "settings.VERSION_CHECKS['mysql'] is misconfigured. '10.5.8' is not a valid PEP440 specifier."
        );
    }

    #[test]
    fn test_mysql_fail_bad_specifier_in_dict() {
        let errors = check_mysql_version(
            &settings(json!({"mysql": {"default": "10.5.8"}})),
            &fake_sqlite(),
            Some(&default_only()),
        )
        .unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, DiagnosticCode::BadSpecifier);
    }

    #[test]
    fn test_mysql_fail_out_of_range() {
        let errors = check_mysql_version(
            &settings(json!({"mysql": "~=10.5.8"})),
            &fake_mysql([10, 5, 7]),
            Some(&default_only()),
        )
        .unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, DiagnosticCode::MysqlMismatch);
        assert_eq!(
            errors[0].message,
            "The current version of MariaDB/MySQL (10.5.7) for the default database connection does not match the specified range (~=10.5.8)."
        );
    }

    #[test]
    fn test_mysql_success_no_mysql_connections() {
        let errors = check_mysql_version(
            &settings(json!({"mysql": "~=10.5.8"})),
            &fake_postgresql(130000),
            Some(&default_only()),
        )
        .unwrap();
        assert!(errors.is_empty());
    }

    #[test]
    fn test_mysql_success_in_range() {
        let errors = check_mysql_version(
            &settings(json!({"mysql": "~=10.5.8"})),
            &fake_mysql([10, 5, 9]),
            Some(&default_only()),
        )
        .unwrap();
        assert!(errors.is_empty());
    }

    #[test]
    fn test_mysql_success_not_asked_about() {
        let errors = check_mysql_version(
            &settings(json!({"mysql": "~=10.5.8"})),
            &fake_mysql([10, 5, 7]),
            Some(&["other".to_string()]),
        )
        .unwrap();
        assert!(errors.is_empty());
    }

    #[test]
    fn test_mysql_success_in_range_specific_alias() {
        let errors = check_mysql_version(
            &settings(json!({"mysql": {"default": "~=10.5.8"}})),
            &fake_mysql([10, 5, 8]),
            Some(&default_only()),
        )
        .unwrap();
        assert!(errors.is_empty());
    }

    #[test]
    fn test_mysql_success_specified_other_alias() {
        let errors = check_mysql_version(
            &settings(json!({"mysql": {"other": "~=10.5.8"}})),
            &fake_mysql([10, 5, 7]),
            Some(&default_only()),
        )
        .unwrap();
        assert!(errors.is_empty());
    }

    #[test]
    fn test_mysql_success_unspecified() {
        let errors =
            check_mysql_version(&settings(json!({})), &fake_mysql([10, 5, 7]), None).unwrap();
        assert!(errors.is_empty());
    }

    #[test]
    fn test_for_alias() {
        let all = TargetSpecifiers::from_config(Target::Mysql, &json!(">=8")).unwrap();
        assert!(all.for_alias("anything").is_some());

        let per_alias =
            TargetSpecifiers::from_config(Target::Mysql, &json!({"primary": ">=8"})).unwrap();
        assert!(per_alias.for_alias("primary").is_some());
        assert!(per_alias.for_alias("replica").is_none());
    }

    #[test]
    fn test_from_config_rejects_lists() {
        let err = TargetSpecifiers::from_config(Target::Postgresql, &json!([">=13"])).unwrap_err();
        assert_eq!(err.code, DiagnosticCode::BadType);
        assert!(err.message.ends_with("but got ['>=13']."));
    }
}
