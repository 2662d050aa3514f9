//! Recursive structural type checker.
//!
//! Walks a [`Value`] against a [`TypeDescriptor`] depth-first and records a
//! [`Violation`] for every mismatch instead of stopping at the first one.
//! Siblings are always checked: every element of a sequence and every entry
//! of a mapping. Below a mismatch nothing more is reported.
//!
//! Each violation carries the path from the checked value down to the
//! offending node, one bracketed segment per level:
//!
//! ```text
//! ['vera'][1] - "string" instead of "integer"
//! ```

use crate::error::{Context, Violation};
use crate::types::TypeDescriptor;
use crate::value::Value;

/// Check `value` against `ty`, returning every violation found.
pub fn check(context: &Context, value: &Value, ty: &TypeDescriptor) -> Vec<Violation> {
    let mut violations = Vec::new();
    check_into(context, value, ty, &mut violations);
    violations
}

/// Like [`check`] but appends to an existing list.
pub fn check_into(
    context: &Context,
    value: &Value,
    ty: &TypeDescriptor,
    violations: &mut Vec<Violation>,
) {
    let mut checker = TypeChecker {
        context,
        path: Vec::new(),
        violations,
    };
    checker.visit(value, ty, ty);
}

struct TypeChecker<'a> {
    context: &'a Context,
    path: Vec<String>,
    violations: &'a mut Vec<Violation>,
}

impl TypeChecker<'_> {
    /// `shown` is what a mismatch at this node reports as expected. It differs
    /// from `ty` only below an `Optional`, which is transparent for checking
    /// but keeps its own name in diagnostics.
    fn visit(&mut self, value: &Value, ty: &TypeDescriptor, shown: &TypeDescriptor) {
        match ty {
            TypeDescriptor::Scalar(scalar) => {
                if !scalar.accepts(value) {
                    self.fail(value, shown);
                }
            }
            TypeDescriptor::Optional(inner) => {
                if !value.is_null() {
                    self.visit(value, inner, shown);
                }
            }
            TypeDescriptor::Sequence(item_ty) => match value {
                Value::Sequence(items) => {
                    for (i, item) in items.iter().enumerate() {
                        self.descend(format!("[{i}]"), |c| c.visit(item, item_ty, item_ty));
                    }
                }
                _ => self.fail(value, shown),
            },
            TypeDescriptor::Mapping(key_ty, val_ty) => match value {
                Value::Mapping(mapping) => {
                    for (key, val) in mapping.iter() {
                        let segment = format!("[{}]", key.repr());
                        self.descend(segment.clone(), |c| c.visit(key, key_ty, key_ty));
                        self.descend(segment, |c| c.visit(val, val_ty, val_ty));
                    }
                }
                _ => self.fail(value, shown),
            },
        }
    }

    fn descend(&mut self, segment: String, f: impl FnOnce(&mut Self)) {
        self.path.push(segment);
        f(self);
        self.path.pop();
    }

    fn fail(&mut self, value: &Value, expected: &TypeDescriptor) {
        let mut message = format!("\"{}\" instead of \"{}\"", value.type_name(), expected);
        if !self.path.is_empty() {
            message = format!("{} - {message}", self.path.concat());
        }
        self.violations
            .push(Violation::new(self.context.clone(), message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TypeDescriptor as T;

    fn value(json: &str) -> Value {
        serde_json::from_str(json).unwrap()
    }

    /// Check under a fixed context and return just the messages.
    fn messages(ty: &T, v: &Value) -> Vec<String> {
        let ctx = Context::key("stipend.leaping", "manets");
        check(&ctx, v, ty)
            .into_iter()
            .map(|violation| {
                assert_eq!(violation.context, ctx);
                violation.message
            })
            .collect()
    }

    #[test]
    fn scalar_match() {
        assert!(messages(&T::integer(), &value("5")).is_empty());
        assert!(messages(&T::string(), &value("\"5\"")).is_empty());
        assert!(messages(&T::boolean(), &value("true")).is_empty());
        assert!(messages(&T::float(), &value("1.5")).is_empty());
    }

    #[test]
    fn scalar_mismatch() {
        assert_eq!(
            messages(&T::integer(), &value("\"5\"")),
            ["\"string\" instead of \"integer\""]
        );
    }

    #[test]
    fn optional_accepts_null_and_inner() {
        assert!(messages(&T::optional(T::integer()), &Value::Null).is_empty());
        assert!(messages(&T::optional(T::integer()), &value("1")).is_empty());
        let list = T::optional(T::sequence(T::integer()));
        assert!(messages(&list, &Value::Null).is_empty());
        assert!(messages(&list, &value("[1, 2, 3]")).is_empty());
    }

    #[test]
    fn optional_mismatch_names_the_optional() {
        assert_eq!(
            messages(&T::optional(T::integer()), &value("\"5\"")),
            ["\"string\" instead of \"Optional[integer]\""]
        );
        assert_eq!(
            messages(&T::optional(T::sequence(T::integer())), &value("5")),
            ["\"integer\" instead of \"Optional[Sequence[integer]]\""]
        );
    }

    #[test]
    fn optional_adds_no_path_segment() {
        assert_eq!(
            messages(&T::optional(T::sequence(T::integer())), &value("[1, 2, \"3\"]")),
            ["[2] - \"string\" instead of \"integer\""]
        );
    }

    #[test]
    fn sequence_not_a_sequence() {
        assert_eq!(
            messages(&T::sequence(T::integer()), &value("5")),
            ["\"integer\" instead of \"Sequence[integer]\""]
        );
    }

    #[test]
    fn sequence_bad_item_reports_index() {
        assert_eq!(
            messages(&T::sequence(T::integer()), &value("[1, \"2\", 3]")),
            ["[1] - \"string\" instead of \"integer\""]
        );
    }

    #[test]
    fn sequence_reports_every_bad_item() {
        assert_eq!(
            messages(&T::sequence(T::integer()), &value("[\"a\", 2, null]")),
            [
                "[0] - \"string\" instead of \"integer\"",
                "[2] - \"null\" instead of \"integer\"",
            ]
        );
    }

    #[test]
    fn mapping_valid() {
        assert!(messages(&T::mapping(T::string(), T::integer()), &value(r#"{"teaware": 5}"#)).is_empty());
    }

    #[test]
    fn mapping_not_a_mapping() {
        assert_eq!(
            messages(&T::mapping(T::string(), T::integer()), &value("5")),
            ["\"integer\" instead of \"Mapping[string, integer]\""]
        );
    }

    #[test]
    fn mapping_bad_value() {
        assert_eq!(
            messages(&T::mapping(T::string(), T::integer()), &value(r#"{"sangsue": "5"}"#)),
            ["['sangsue'] - \"string\" instead of \"integer\""]
        );
    }

    #[test]
    fn mapping_bad_key() {
        let v: Value = serde_yaml::from_str("5: 7\n").unwrap();
        assert_eq!(
            messages(&T::mapping(T::string(), T::integer()), &v),
            ["[5] - \"integer\" instead of \"string\""]
        );
    }

    #[test]
    fn mapping_bad_key_and_value_both_reported() {
        let v: Value = serde_yaml::from_str("5: seven\n").unwrap();
        assert_eq!(
            messages(&T::mapping(T::string(), T::integer()), &v),
            [
                "[5] - \"integer\" instead of \"string\"",
                "[5] - \"string\" instead of \"integer\"",
            ]
        );
    }

    #[test]
    fn nested_dict_in_list() {
        let ty = T::sequence(T::mapping(T::string(), T::integer()));
        assert!(messages(&ty, &value(r#"[{"burls": 5}]"#)).is_empty());
        assert_eq!(
            messages(&ty, &value(r#"[{"naira": 5}, {"lugged": "6"}]"#)),
            ["[1]['lugged'] - \"string\" instead of \"integer\""]
        );
    }

    #[test]
    fn nested_list_in_dict() {
        let ty = T::mapping(T::string(), T::sequence(T::integer()));
        assert_eq!(
            messages(&ty, &value(r#"{"k": [1, "2", 3]}"#)),
            ["['k'][1] - \"string\" instead of \"integer\""]
        );
    }

    #[test]
    fn no_errors_below_a_mismatch() {
        let ty = T::sequence(T::sequence(T::integer()));
        assert_eq!(
            messages(&ty, &value(r#"[[1], "x", [2, "y"]]"#)),
            [
                "[1] - \"string\" instead of \"Sequence[integer]\"",
                "[2][1] - \"string\" instead of \"integer\"",
            ]
        );
    }

    #[test]
    fn check_into_appends() {
        let ctx = Context::root();
        let mut out = vec![Violation::new(ctx.clone(), "earlier")];
        check_into(&ctx, &value("\"x\""), &T::integer(), &mut out);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].message, "earlier");
    }
}
