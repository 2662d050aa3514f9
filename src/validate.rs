//! Config validation: check a raw tree against a [`Compose`] schema.
//!
//! Structural levels are checked in order and each must be clean before the
//! next one is looked at:
//!
//! 1. the document is a mapping,
//! 2. it contains the compose table `compose<sep><variant>`,
//! 3. the compose table is a mapping,
//! 4. every declared slot is listed there with a string label, and the
//!    section `<slot><sep><label>` exists,
//! 5. every selected section is a mapping holding every declared key, with a
//!    value of the declared type.
//!
//! Within a level problems accumulate: all slots are checked even when an
//! earlier one failed, and so are all keys of a section.

use tracing::debug;

use crate::checker;
use crate::error::{Context, Violation};
use crate::schema::{Compose, Section};
use crate::types::TypeDescriptor;
use crate::value::Value;

/// Name of the compose table for `variant`.
pub fn compose_key(variant: &str, sep: &str) -> String {
    format!("compose{sep}{variant}")
}

/// Validate `data` against `schema` for `variant`. An empty result means valid.
pub fn validate(schema: &Compose, data: &Value, variant: &str, sep: &str) -> Vec<Violation> {
    let mut violations = Vec::new();
    validate_config(schema, data, variant, sep, &mut violations);
    debug!(variant = %variant, violations = violations.len(), "validated configuration");
    violations
}

fn validate_config(
    schema: &Compose,
    data: &Value,
    variant: &str,
    sep: &str,
    violations: &mut Vec<Violation>,
) {
    let Value::Mapping(root) = data else {
        checker::check_into(&Context::root(), data, &TypeDescriptor::any_mapping(), violations);
        return;
    };

    let key = compose_key(variant, sep);
    let Some(compose_value) = root.get(&key) else {
        violations.push(Violation::new(Context::section(&key), "missing section"));
        return;
    };

    let Value::Mapping(compose_table) = compose_value else {
        checker::check_into(
            &Context::section(&key),
            compose_value,
            &TypeDescriptor::any_mapping(),
            violations,
        );
        return;
    };

    for (_, section) in schema.sections() {
        let slot = section.name();
        let ctx = Context::key(&key, slot);

        let Some(label_value) = compose_table.get(slot) else {
            violations.push(Violation::new(ctx, "missing key"));
            continue;
        };

        let Value::String(label) = label_value else {
            checker::check_into(&ctx, label_value, &TypeDescriptor::string(), violations);
            continue;
        };

        let full_name = format!("{slot}{sep}{label}");
        match root.get(&full_name) {
            Some(section_value) => validate_section(section, section_value, &full_name, violations),
            None => violations.push(Violation::new(ctx, format!("\"{full_name}\" not found"))),
        }
    }
}

/// Validate one concrete section, reporting under `full_name`.
pub fn validate_section(
    section: &Section,
    value: &Value,
    full_name: &str,
    violations: &mut Vec<Violation>,
) {
    let Value::Mapping(entries) = value else {
        checker::check_into(
            &Context::section(full_name),
            value,
            &TypeDescriptor::any_mapping(),
            violations,
        );
        return;
    };

    for (_, key) in section.keys() {
        let ctx = Context::key(full_name, key.name());
        match entries.get(key.name()) {
            Some(key_value) => checker::check_into(&ctx, key_value, key.ty(), violations),
            None => violations.push(Violation::new(ctx, "missing key")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::{data, parma_schema, service_schema};

    fn check_config(json: &str, expected: &[(Option<&str>, Option<&str>, &str)]) {
        let found = validate(&parma_schema(), &data(json), "bestill", ".");
        let expected: Vec<Violation> = expected
            .iter()
            .map(|(section, key, msg)| Violation {
                context: Context {
                    section: section.map(str::to_string),
                    key: key.map(str::to_string),
                },
                message: msg.to_string(),
            })
            .collect();
        assert_eq!(found, expected);
    }

    #[test]
    fn root_must_be_mapping() {
        check_config("[]", &[(None, None, "\"sequence\" instead of \"mapping\"")]);
    }

    #[test]
    fn missing_compose_section() {
        check_config("{}", &[(Some("compose.bestill"), None, "missing section")]);
    }

    #[test]
    fn compose_section_must_be_mapping() {
        check_config(
            r#"{"compose.bestill": 5}"#,
            &[(Some("compose.bestill"), None, "\"integer\" instead of \"mapping\"")],
        );
    }

    #[test]
    fn missing_compose_key() {
        check_config(
            r#"{"compose.bestill": {}}"#,
            &[(Some("compose.bestill"), Some("parma"), "missing key")],
        );
    }

    #[test]
    fn compose_label_must_be_string() {
        check_config(
            r#"{"compose.bestill": {"parma": 5}}"#,
            &[(Some("compose.bestill"), Some("parma"), "\"integer\" instead of \"string\"")],
        );
    }

    #[test]
    fn dangling_compose_reference() {
        check_config(
            r#"{"compose.bestill": {"parma": "invalid"}}"#,
            &[(Some("compose.bestill"), Some("parma"), "\"parma.invalid\" not found")],
        );
    }

    #[test]
    fn section_must_be_mapping() {
        check_config(
            r#"{"parma.syst": 5, "compose.bestill": {"parma": "syst"}}"#,
            &[(Some("parma.syst"), None, "\"integer\" instead of \"mapping\"")],
        );
    }

    #[test]
    fn missing_section_key() {
        check_config(
            r#"{"parma.syst": {}, "compose.bestill": {"parma": "syst"}}"#,
            &[(Some("parma.syst"), Some("chatty"), "missing key")],
        );
    }

    #[test]
    fn invalid_section_key() {
        check_config(
            r#"{"parma.syst": {"chatty": "5"}, "compose.bestill": {"parma": "syst"}}"#,
            &[(Some("parma.syst"), Some("chatty"), "\"string\" instead of \"integer\"")],
        );
    }

    #[test]
    fn valid_config() {
        check_config(
            r#"{"parma.syst": {"chatty": 5}, "compose.bestill": {"parma": "syst"}}"#,
            &[],
        );
    }

    #[test]
    fn other_variants_are_ignored() {
        check_config(
            r#"{
                "parma.syst": {"chatty": 5},
                "parma.broken": {"chatty": "nope"},
                "compose.bestill": {"parma": "syst"},
                "compose.other": {"parma": "broken"}
            }"#,
            &[],
        );
    }

    #[test]
    fn every_missing_key_in_a_section_is_reported() {
        let raw = data(r#"{"compose.prod": {"server": "main", "db": "primary"},
                          "server.main": {},
                          "db.primary": {"url": "pg://", "pool_size": null, "replicas": []}}"#);
        let found = validate(&service_schema(), &raw, "prod", ".");
        assert_eq!(
            found,
            vec![
                Violation::new(Context::key("server.main", "host"), "missing key"),
                Violation::new(Context::key("server.main", "port"), "missing key"),
            ]
        );
    }

    #[test]
    fn slots_fail_independently() {
        let raw = data(r#"{"compose.prod": {"server": 1, "db": "gone"}}"#);
        let found = validate(&service_schema(), &raw, "prod", ".");
        assert_eq!(
            found,
            vec![
                Violation::new(
                    Context::key("compose.prod", "server"),
                    "\"integer\" instead of \"string\""
                ),
                Violation::new(Context::key("compose.prod", "db"), "\"db.gone\" not found"),
            ]
        );
    }

    #[test]
    fn errors_in_one_slot_do_not_hide_the_next() {
        let raw = data(r#"{"compose.prod": {"server": "main", "db": "primary"},
                          "server.main": {"host": 1, "port": 80},
                          "db.primary": {"url": "pg://", "pool_size": "big", "replicas": ["a", 2]}}"#);
        let found = validate(&service_schema(), &raw, "prod", ".");
        let rendered: Vec<String> = found.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            [
                "server.main[host] => \"integer\" instead of \"string\"",
                "db.primary[pool_size] => \"string\" instead of \"Optional[integer]\"",
                "db.primary[replicas] => [1] - \"integer\" instead of \"string\"",
            ]
        );
    }

    #[test]
    fn custom_separator() {
        let raw = data(r#"{"compose_bestill": {"parma": "syst"}, "parma_syst": {"chatty": 5}}"#);
        assert!(validate(&parma_schema(), &raw, "bestill", "_").is_empty());

        let found = validate(&parma_schema(), &raw, "bestill", ".");
        assert_eq!(
            found,
            vec![Violation::new(Context::section("compose.bestill"), "missing section")]
        );
    }

    #[test]
    fn validation_does_not_mutate_input() {
        let raw = data(r#"{"compose.bestill": {"parma": "syst"}, "parma.syst": {"chatty": "x"}}"#);
        let before = raw.clone();
        let _ = validate(&parma_schema(), &raw, "bestill", ".");
        assert_eq!(raw, before);
    }

    #[test]
    fn compose_key_joins_with_separator() {
        assert_eq!(compose_key("prod", "_"), "compose_prod");
        assert_eq!(compose_key("prod", "."), "compose.prod");
    }
}
