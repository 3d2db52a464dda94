#![cfg(test)]

use protoc_c_codegen::utils::{
    blankify, camel_to_lower, camel_to_upper, dots_to_underscores, filename_identifier, hex, quote,
    replace, simple_dtoa, simple_ftoa, split_set, strip_proto, to_camel, to_lower, to_upper,
};

#[test]
fn test_replace() {
    assert_eq!(replace("aaa", "a", "b", true), "bbb");
    assert_eq!(replace("aaa", "a", "b", false), "baa");
    assert_eq!(replace("aaa", "", "x", true), "aaa");
    assert_eq!(replace("aaa", "", "x", false), "aaa");
    assert_eq!(replace("no match", "z", "y", true), "no match");

    // The replacement is never rescanned.
    assert_eq!(replace("abab", "ab", "abab", true), "abababab");
    assert_eq!(replace("aaaa", "aa", "a", true), "aa");

    assert_eq!(dots_to_underscores("foo.bar.Baz"), "foo_bar_Baz");
}

#[test]
fn test_split_set() {
    let pieces: Vec<&str> = split_set("a.b..c", ".").collect();
    assert_eq!(pieces, vec!["a", "b", "c"]);

    let pieces: Vec<&str> = split_set("..a.", ".").collect();
    assert_eq!(pieces, vec!["a"]);

    // Each delimiter character separates on its own.
    let pieces: Vec<&str> = split_set("one\r\ntwo\nthree\r", "\r\n").collect();
    assert_eq!(pieces, vec!["one", "two", "three"]);

    assert_eq!(split_set("", ".").count(), 0);
    assert_eq!(split_set("whole", "").collect::<Vec<_>>(), vec!["whole"]);
}

#[test]
fn test_case_conversion() {
    assert_eq!(to_upper("fooBar_1"), "FOOBAR_1");
    assert_eq!(to_lower("FooBAR_1"), "foobar_1");

    assert_eq!(camel_to_lower("FooBar"), "foo_bar");
    assert_eq!(camel_to_lower("fooBar"), "foo_bar");
    assert_eq!(camel_to_lower("foo_bar"), "foo_bar");
    assert_eq!(camel_to_lower("foo1Bar"), "foo1_bar");
    assert_eq!(camel_to_lower("HTTPServer"), "httpserver");

    assert_eq!(camel_to_upper("FooBar"), "FOO_BAR");
    assert_eq!(camel_to_upper("fooBarBaz"), "FOO_BAR_BAZ");
    assert_eq!(camel_to_upper("X"), "X");

    assert_eq!(to_camel("foo_bar"), "FooBar");
    assert_eq!(to_camel("FooBar"), "FooBar");
    assert_eq!(to_camel("foo__bar_"), "FooBar");
}

#[test]
fn test_blankify_and_hex() {
    assert_eq!(blankify("abc"), "   ");
    assert_eq!(blankify(""), "");
    assert_eq!(blankify("size_t x("), " ".repeat(9));

    assert_eq!(hex(0), "0");
    assert_eq!(hex(10), "a");
    assert_eq!(hex(0x2f), "2f");
    assert_eq!(hex(255), "ff");
}

#[test]
fn test_file_names() {
    assert_eq!(filename_identifier("foo/bar.proto"), "foo_2fbar_2eproto");
    assert_eq!(filename_identifier("a-b"), "a_2db");

    assert_eq!(strip_proto("foo/bar.proto"), "foo/bar");
    assert_eq!(strip_proto("foo.protodevel"), "foo");
    assert_eq!(strip_proto("foo.txt"), "foo.txt");
}

#[test]
fn test_float_literals() {
    assert_eq!(simple_ftoa(1.5), "1.5");
    assert_eq!(simple_ftoa(0.1), "0.1");
    assert_eq!(simple_ftoa(-2.0), "-2");
    assert_eq!(simple_ftoa(f32::INFINITY), "INFINITY");
    assert_eq!(simple_ftoa(f32::NEG_INFINITY), "-INFINITY");
    assert_eq!(simple_ftoa(f32::NAN), "NAN");

    assert_eq!(simple_dtoa(0.1), "0.1");
    assert_eq!(simple_dtoa(100.0), "100");
    assert_eq!(simple_dtoa(1e20), "1e+20");
    assert_eq!(simple_dtoa(0.00001), "1e-05");
    assert_eq!(simple_dtoa(0.0), "0");
}

#[test]
fn test_quote() {
    assert_eq!(quote("plain"), "\"plain\"");
    assert_eq!(quote("a\"b"), "\"a\\\"b\"");
}
