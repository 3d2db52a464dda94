//! C identifier synthesis from dotted schema names.

use std::collections::HashSet;

use lazy_static::lazy_static;
use protoc_c_schema::{FileModel, SchemaField};

use crate::utils::{camel_to_lower, camel_to_upper, split_set, to_camel, to_lower};

/// Joins the segments of a dotted name. Segments may already contain single
/// underscores after camel-case splitting, so a double underscore keeps the
/// boundary unambiguous.
pub const SEGMENT_SEPARATOR: &str = "__";

pub const DEPRECATED_ANNOTATION: &str = " PROTOBUF_C__DEPRECATED";

const KEYWORD_LIST: &[&str] = &[
    "and", "and_eq", "asm", "auto", "bitand", "bitor", "bool", "break", "case",
    "catch", "char", "class", "compl", "const", "const_cast", "continue",
    "default", "delete", "do", "double", "dynamic_cast", "else", "enum",
    "explicit", "extern", "false", "float", "for", "friend", "goto", "if",
    "inline", "int", "long", "mutable", "namespace", "new", "not", "not_eq",
    "operator", "or", "or_eq", "private", "protected", "public", "register",
    "reinterpret_cast", "return", "short", "signed", "sizeof", "static",
    "static_cast", "struct", "switch", "template", "this", "throw", "true", "try",
    "typedef", "typeid", "typename", "union", "unsigned", "using", "virtual",
    "void", "volatile", "wchar_t", "while", "xor", "xor_eq",
];

lazy_static! {
    static ref KEYWORDS: HashSet<&'static str> = KEYWORD_LIST.iter().copied().collect();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameCase {
    /// `foo__foo_bar`
    Lower,
    /// `FOO__FOO_BAR`
    Upper,
    /// `Foo__FooBar`
    Camel,
}

pub fn is_keyword(name: &str) -> bool {
    KEYWORDS.contains(name)
}

/// Swaps the leading `package` of `full_name` for `package_override`.
pub fn override_full_name(full_name: &str, package: &str, package_override: Option<&str>) -> String {
    let Some(new_package) = package_override.filter(|p| !p.is_empty()) else {
        return full_name.to_string();
    };

    let mut new_name = new_package.to_string();
    if package.is_empty() {
        new_name.push('.');
    }
    new_name.push_str(full_name.strip_prefix(package).unwrap_or(full_name));
    new_name
}

/// Flattens a dotted name into a single C identifier in the requested case.
pub fn synthesize(full_name: &str, package: &str, package_override: Option<&str>, case: NameCase) -> String {
    let overridden = override_full_name(full_name, package, package_override);
    split_set(&overridden, ".")
        .map(|segment| match case {
            NameCase::Lower => camel_to_lower(segment),
            NameCase::Upper => camel_to_upper(segment),
            NameCase::Camel => to_camel(segment),
        })
        .collect::<Vec<_>>()
        .join(SEGMENT_SEPARATOR)
}

pub fn full_name_to_lower(full_name: &str, file: &FileModel) -> String {
    synthesize(full_name, &file.package, file.package_override(), NameCase::Lower)
}

pub fn full_name_to_upper(full_name: &str, file: &FileModel) -> String {
    synthesize(full_name, &file.package, file.package_override(), NameCase::Upper)
}

pub fn full_name_to_c(full_name: &str, file: &FileModel) -> String {
    synthesize(full_name, &file.package, file.package_override(), NameCase::Camel)
}

/// Member name of a field inside its struct: lowercased, with a trailing
/// underscore when it would collide with a C or C++ keyword.
pub fn field_name(field: &SchemaField) -> String {
    let mut result = to_lower(&field.name);
    if is_keyword(&result) {
        result.push('_');
    }
    result
}

pub fn field_deprecated(field: &SchemaField) -> &'static str {
    if field.deprecated {
        DEPRECATED_ANNOTATION
    } else {
        ""
    }
}
