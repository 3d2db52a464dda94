#![cfg(test)]

use protoc_c_codegen::error::CodegenError;
use protoc_c_codegen::{generate_file, verify_file, GeneratorOptions};
use protoc_c_schema::{
    Cardinality, FieldKind, FileModel, MessageModel, ScalarDefault, ScalarType, SchemaField, SchemaModel,
};

fn field(name: &str, number: i32, kind: FieldKind, cardinality: Cardinality) -> SchemaField {
    SchemaField {
        name: name.to_string(),
        full_name: format!("foo.Person.{}", name),
        number,
        kind,
        cardinality,
        oneof: None,
        deprecated: false,
        packed: None,
    }
}

fn in_oneof(mut field: SchemaField, oneof: &str) -> SchemaField {
    field.oneof = Some(oneof.to_string());
    field
}

fn person_file() -> FileModel {
    let person = MessageModel {
        name:      "Person".to_string(),
        full_name: "foo.Person".to_string(),
        comment:   Some("A person.".to_string()),
        fields:    vec![
            field("avatar", 1, FieldKind::Bytes { default: Some(b"ab".to_vec()) }, Cardinality::Required),
            field(
                "age",
                2,
                FieldKind::Scalar { scalar: ScalarType::Int32, default: None },
                Cardinality::Optional,
            ),
            field("tags", 5, FieldKind::String { default: None }, Cardinality::Repeated),
            in_oneof(field("email", 6, FieldKind::String { default: None }, Cardinality::Optional), "contact"),
            in_oneof(
                field("phone", 7, FieldKind::Scalar { scalar: ScalarType::Int32, default: None }, Cardinality::Optional),
                "contact",
            ),
        ],
        nested:    Vec::new(),
    };
    FileModel {
        name: "foo/person.proto".to_string(),
        package: "foo".to_string(),
        messages: vec![person],
        ..FileModel::default()
    }
}

fn empty_file() -> FileModel {
    FileModel {
        name: "empty.proto".to_string(),
        package: "foo".to_string(),
        messages: vec![MessageModel {
            name: "Empty".to_string(),
            full_name: "foo.Empty".to_string(),
            ..MessageModel::default()
        }],
        ..FileModel::default()
    }
}

#[test]
fn test_file_names_and_guard() {
    let generated = generate_file(&person_file(), &GeneratorOptions::default()).unwrap();
    assert_eq!(generated.header_name, "foo/person.pb-c.h");
    assert_eq!(generated.source_name, "foo/person.pb-c.c");

    let header = &generated.header;
    assert!(header.starts_with("/* Generated by protoc-c-rs.  DO NOT EDIT! */\n/* Generated from: foo/person.proto */\n"));
    assert!(header.contains("#ifndef PROTOBUF_C_foo_2fperson_2eproto__INCLUDED\n"));
    assert!(header.contains("#include <protobuf-c/protobuf-c.h>\n"));
    assert!(header.ends_with("#endif  /* PROTOBUF_C_foo_2fperson_2eproto__INCLUDED */\n"));

    assert!(generated.source.contains("#include \"foo/person.pb-c.h\"\n"));
}

#[test]
fn test_header_struct_and_init() {
    let header = generate_file(&person_file(), &GeneratorOptions::default()).unwrap().header;

    assert!(header.contains("typedef struct Foo__Person Foo__Person;\n"));
    assert!(header.contains(concat!(
        "typedef enum {\n",
        "  FOO__PERSON__CONTACT__NOT_SET = 0,\n",
        "  FOO__PERSON__CONTACT_EMAIL = 6,\n",
        "  FOO__PERSON__CONTACT_PHONE = 7,\n",
        "    PROTOBUF_C__FORCE_ENUM_TO_BE_INT_SIZE(FOO__PERSON__CONTACT__CASE)\n",
        "} Foo__Person__ContactCase;\n",
    )));
    assert!(header.contains(concat!(
        "/*\n",
        " *A person.\n",
        " */\n",
        "struct  Foo__Person\n",
        "{\n",
        "  ProtobufCMessage base;\n",
        "  ProtobufCBinaryData avatar;\n",
        "  protobuf_c_boolean has_age;\n",
        "  int32_t age;\n",
        "  size_t n_tags;\n",
        "  char **tags;\n",
        "  Foo__Person__ContactCase contact_case;\n",
        "  union {\n",
        "    char *email;\n",
        "    int32_t phone;\n",
        "  };\n",
        "};\n",
    )));
    assert!(header.contains(concat!(
        "#define FOO__PERSON__INIT \\\n",
        " { PROTOBUF_C_MESSAGE_INIT (&foo__person__descriptor) \\\n",
        "    , { 2, foo__person__avatar__default_value_data }, 0, 0, 0,NULL, FOO__PERSON__CONTACT__NOT_SET, {0} }\n",
    )));
    assert!(header.contains("extern uint8_t foo__person__avatar__default_value_data[];\n"));
    assert!(header.contains(&format!(
        "size_t foo__person__pack(const Foo__Person *message,\n{}uint8_t *out);\n",
        " ".repeat(25)
    )));
    assert!(header.contains("extern const ProtobufCMessageDescriptor foo__person__descriptor;\n"));
}

#[test]
fn test_comments_can_be_disabled() {
    let options = GeneratorOptions { emit_comments: false, ..GeneratorOptions::default() };
    let header = generate_file(&person_file(), &options).unwrap().header;
    assert!(!header.contains("A person."));
}

#[test]
fn test_source_descriptor() {
    let source = generate_file(&person_file(), &GeneratorOptions::default()).unwrap().source;

    assert!(source.contains("uint8_t foo__person__avatar__default_value_data[] = \"ab\";\n"));
    assert!(source.contains("static const ProtobufCFieldDescriptor foo__person__field_descriptors[5] =\n{\n  {\n    \"avatar\",\n"));
    assert!(source.contains("    offsetof(Foo__Person, contact_case),\n"));
    assert!(source.contains(concat!(
        "static const unsigned foo__person__field_indices_by_name[] = {\n",
        "  1,   /* field[1] = age */\n",
        "  0,   /* field[0] = avatar */\n",
        "  3,   /* field[3] = email */\n",
        "  4,   /* field[4] = phone */\n",
        "  2,   /* field[2] = tags */\n",
        "};\n",
    )));
    assert!(source.contains(concat!(
        "static const ProtobufCIntRange foo__person__number_ranges[2 + 1] =\n",
        "{\n",
        "  { 1, 0 },\n",
        "  { 5, 2 },\n",
        "  { 0, 5 }\n",
        "};\n",
    )));
    assert!(source.contains(concat!(
        "const ProtobufCMessageDescriptor foo__person__descriptor =\n",
        "{\n",
        "  PROTOBUF_C__MESSAGE_DESCRIPTOR_MAGIC,\n",
        "  \"foo.Person\",\n",
        "  \"Person\",\n",
        "  \"Foo__Person\",\n",
        "  \"foo\",\n",
        "  sizeof(Foo__Person),\n",
        "  5,\n",
        "  foo__person__field_descriptors,\n",
        "  foo__person__field_indices_by_name,\n",
        "  2,  foo__person__number_ranges,\n",
        "  (ProtobufCMessageInit) foo__person__init,\n",
        "  NULL,NULL,NULL    /* reserved[123] */\n",
        "};\n",
    )));
    assert!(source.contains("  static const Foo__Person init_value = FOO__PERSON__INIT;\n"));
}

#[test]
fn test_descriptors_follow_field_numbers() {
    let mut file = person_file();
    file.messages[0].fields.reverse();
    let source = generate_file(&file, &GeneratorOptions::default()).unwrap().source;

    let avatar = source.find("    \"avatar\",\n").unwrap();
    let phone = source.find("    \"phone\",\n").unwrap();
    assert!(avatar < phone);
}

#[test]
fn test_empty_message() {
    let generated = generate_file(&empty_file(), &GeneratorOptions::default()).unwrap();

    assert!(generated.header.contains("struct  Foo__Empty\n{\n  ProtobufCMessage base;\n};\n"));
    assert!(generated.header.contains(
        "#define FOO__EMPTY__INIT \\\n { PROTOBUF_C_MESSAGE_INIT (&foo__empty__descriptor) \\\n     }\n"
    ));
    assert!(generated.source.contains(concat!(
        "#define foo__empty__field_descriptors NULL\n",
        "#define foo__empty__field_indices_by_name NULL\n",
        "#define foo__empty__number_ranges NULL\n",
    )));
    assert!(generated.source.contains("  0,\n  foo__empty__field_descriptors,\n"));
    assert!(generated.source.contains("  0,  foo__empty__number_ranges,\n"));
}

#[test]
fn test_nested_messages() {
    let mut file = person_file();
    let address = MessageModel {
        name: "Address".to_string(),
        full_name: "foo.Person.Address".to_string(),
        fields: vec![SchemaField {
            full_name: "foo.Person.Address.street".to_string(),
            ..field("street", 1, FieldKind::String { default: None }, Cardinality::Optional)
        }],
        ..MessageModel::default()
    };
    file.messages[0].nested.push(address);

    let generated = generate_file(&file, &GeneratorOptions::default()).unwrap();
    assert!(generated.header.contains("typedef struct Foo__Person Foo__Person;\ntypedef struct Foo__Person__Address Foo__Person__Address;\n"));
    let nested = generated.header.find("struct  Foo__Person__Address\n").unwrap();
    let outer = generated.header.find("struct  Foo__Person\n").unwrap();
    assert!(nested < outer);
    assert!(generated.source.contains("    offsetof(Foo__Person__Address, street),\n"));
    assert!(generated.source.contains("const ProtobufCMessageDescriptor foo__person__address__descriptor =\n"));
}

#[test]
fn test_generation_is_deterministic() {
    let file = person_file();
    let first = generate_file(&file, &GeneratorOptions::default()).unwrap();
    let second = generate_file(&file, &GeneratorOptions::default()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_unsupported_kind_fails_generation() {
    let mut file = person_file();
    file.messages[0].fields.push(field(
        "home",
        9,
        FieldKind::Message { type_name: "foo.Address".to_string() },
        Cardinality::Optional,
    ));
    match generate_file(&file, &GeneratorOptions::default()) {
        Err(CodegenError::UnsupportedKind { kind, .. }) => assert_eq!(kind, "message"),
        other => panic!("expected an unsupported kind error, got {:?}", other.map(|g| g.header_name)),
    }
}

#[test]
fn test_verifier() {
    assert!(verify_file(&person_file()).is_ok());
    assert!(verify_file(&empty_file()).is_ok());

    let broken = |edit: fn(&mut Vec<SchemaField>)| {
        let mut file = person_file();
        edit(&mut file.messages[0].fields);
        verify_file(&file)
    };

    let cases: [(fn(&mut Vec<SchemaField>), &str); 6] = [
        (|fields| fields[1].name = "avatar".to_string(), "used twice"),
        (|fields| fields[1].number = 1, "used twice"),
        (|fields| fields[1].number = 0, "between 1 and"),
        (
            |fields| fields[2].kind = FieldKind::String { default: Some("x".to_string()) },
            "cannot have a default",
        ),
        (|fields| fields[3].cardinality = Cardinality::Required, "must be optional"),
        (
            |fields| {
                fields[1].kind = FieldKind::Scalar {
                    scalar:  ScalarType::Int32,
                    default: Some(ScalarDefault::Int(i64::from(i32::MAX) + 1)),
                }
            },
            "does not fit",
        ),
    ];

    for (edit, expected) in cases {
        match broken(edit) {
            Err(CodegenError::VerifierError(msg)) => assert!(msg.contains(expected), "{}", msg),
            other => panic!("expected a verifier error containing {:?}, got {:?}", expected, other),
        }
    }
}

#[test]
fn test_load_model_from_json() {
    let json = r#"{
        "files": [{
            "name": "foo/person.proto",
            "package": "foo",
            "syntax": "proto2",
            "messages": [{
                "name": "Person",
                "full_name": "foo.Person",
                "fields": [
                    { "name": "avatar", "full_name": "foo.Person.avatar", "number": 1,
                      "kind": "bytes", "default": [97, 98], "cardinality": "required" },
                    { "name": "age", "full_name": "foo.Person.age", "number": 2,
                      "kind": "scalar", "scalar": "int32", "default": { "int": -5 },
                      "cardinality": "optional" }
                ]
            }]
        }]
    }"#;

    let model = SchemaModel::from_json(json).unwrap();
    let file = &model.files[0];
    assert_eq!(file.messages[0].fields[0].kind, FieldKind::Bytes { default: Some(b"ab".to_vec()) });
    assert_eq!(
        file.messages[0].fields[1].kind,
        FieldKind::Scalar { scalar: ScalarType::Int32, default: Some(ScalarDefault::Int(-5)) }
    );

    let generated = generate_file(file, &GeneratorOptions::default()).unwrap();
    assert!(generated.header.contains(
        "    , { 2, foo__person__avatar__default_value_data }, 0, -5 }\n"
    ));
}
