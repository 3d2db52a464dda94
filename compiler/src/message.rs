//! Aggregate-level generation for one message: the struct, its `INIT` macro,
//! helper functions and the `ProtobufCMessageDescriptor`.

use protoc_c_schema::{FileModel, MessageModel};
use tracing::debug;

use crate::{
    error::CodegenError,
    field::{make_field_generator, FieldGenerator, GeneratorOptions},
    names::{full_name_to_c, full_name_to_lower, full_name_to_upper},
    printer::{print_comment, Printer, Variables},
    ranges::write_int_ranges,
    utils::{blankify, camel_to_lower, camel_to_upper, to_camel},
};

/// A oneof and the positions of its members in the message's field list.
struct OneofGroup {
    name:    String,
    members: Vec<usize>,
}

pub struct MessageGenerator<'a> {
    file:        &'a FileModel,
    message:     &'a MessageModel,
    options:     GeneratorOptions,
    classname:   String,
    lcclassname: String,
    ucclassname: String,
    fields:      Vec<Box<dyn FieldGenerator + 'a>>,
    oneofs:      Vec<OneofGroup>,
    nested:      Vec<MessageGenerator<'a>>,
}

impl<'a> MessageGenerator<'a> {
    pub fn new(
        file: &'a FileModel,
        message: &'a MessageModel,
        options: &GeneratorOptions,
    ) -> Result<Self, CodegenError> {
        debug!(message = %message.full_name, fields = message.fields.len(), "preparing message");

        let fields = message
            .fields
            .iter()
            .map(|field| make_field_generator(file, field, options))
            .collect::<Result<Vec<_>, _>>()?;

        let mut oneofs: Vec<OneofGroup> = Vec::new();
        for (i, field) in message.fields.iter().enumerate() {
            let Some(name) = &field.oneof else { continue };
            match oneofs.iter_mut().find(|group| &group.name == name) {
                Some(group) => group.members.push(i),
                None => oneofs.push(OneofGroup { name: name.clone(), members: vec![i] }),
            }
        }

        let nested = message
            .nested
            .iter()
            .map(|nested| MessageGenerator::new(file, nested, options))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(MessageGenerator {
            file,
            message,
            options: options.clone(),
            classname: full_name_to_c(&message.full_name, file),
            lcclassname: full_name_to_lower(&message.full_name, file),
            ucclassname: full_name_to_upper(&message.full_name, file),
            fields,
            oneofs,
            nested,
        })
    }

    pub fn classname(&self) -> &str {
        &self.classname
    }

    fn variables(&self) -> Variables {
        let mut vars = Variables::new();
        vars.insert("classname".to_string(), self.classname.clone());
        vars.insert("lcclassname".to_string(), self.lcclassname.clone());
        vars.insert("ucclassname".to_string(), self.ucclassname.clone());
        vars.insert("fullname".to_string(), self.message.full_name.clone());
        vars.insert("shortname".to_string(), self.message.name.clone());
        vars.insert("packagename".to_string(), self.file.package.clone());
        vars
    }

    fn oneof_variables(&self, oneof: &OneofGroup) -> Variables {
        let mut vars = self.variables();
        vars.insert("oneofname".to_string(), camel_to_lower(&oneof.name));
        vars.insert("uconeofname".to_string(), camel_to_upper(&oneof.name));
        vars.insert("oneofcase".to_string(), format!("{}__{}Case", self.classname, to_camel(&oneof.name)));
        vars
    }

    pub fn generate_struct_typedefs(&self, printer: &mut Printer) -> Result<(), CodegenError> {
        printer.print(&self.variables(), "typedef struct $classname$ $classname$;\n")?;
        for nested in &self.nested {
            nested.generate_struct_typedefs(printer)?;
        }
        Ok(())
    }

    /// Case enums of the message's oneofs.
    pub fn generate_enum_definitions(&self, printer: &mut Printer) -> Result<(), CodegenError> {
        for nested in &self.nested {
            nested.generate_enum_definitions(printer)?;
        }

        for oneof in &self.oneofs {
            let mut vars = self.oneof_variables(oneof);
            printer.print(&vars, "typedef enum {\n")?;
            printer.print(&vars, "  $ucclassname$__$uconeofname$__NOT_SET = 0,\n")?;
            for &i in &oneof.members {
                let field = self.fields[i].field();
                vars.insert("fieldname".to_string(), camel_to_upper(&field.name));
                vars.insert("fieldnum".to_string(), field.number.to_string());
                printer.print(&vars, "  $ucclassname$__$uconeofname$_$fieldname$ = $fieldnum$,\n")?;
            }
            printer.print(
                &vars,
                "    PROTOBUF_C__FORCE_ENUM_TO_BE_INT_SIZE($ucclassname$__$uconeofname$__CASE)\n",
            )?;
            printer.print(&vars, "} $oneofcase$;\n\n")?;
        }
        Ok(())
    }

    /// The struct itself followed by its `INIT` macro.
    pub fn generate_struct_definition(&self, printer: &mut Printer) -> Result<(), CodegenError> {
        for nested in &self.nested {
            nested.generate_struct_definition(printer)?;
        }

        let vars = self.variables();
        if self.options.emit_comments {
            if let Some(comment) = &self.message.comment {
                print_comment(printer, comment)?;
            }
        }
        printer.print(&vars, "struct  $classname$\n{\n")?;
        printer.indent();
        printer.print_raw("ProtobufCMessage base;\n");
        for field in self.fields.iter().filter(|f| !f.field().in_oneof()) {
            field.generate_struct_members(printer)?;
        }
        for oneof in &self.oneofs {
            printer.print(&self.oneof_variables(oneof), "$oneofcase$ $oneofname$_case;\n")?;
            printer.print_raw("union {\n");
            printer.indent();
            for &i in &oneof.members {
                self.fields[i].generate_struct_members(printer)?;
            }
            printer.outdent();
            printer.print_raw("};\n");
        }
        printer.outdent();
        printer.print_raw("};\n");

        printer.print(
            &vars,
            "#define $ucclassname$__INIT \\\n { PROTOBUF_C_MESSAGE_INIT (&$lcclassname$__descriptor) \\\n    ",
        )?;
        for field in self.fields.iter().filter(|f| !f.field().in_oneof()) {
            printer.print_raw(", ");
            field.generate_static_init(printer)?;
        }
        for oneof in &self.oneofs {
            printer.print(&self.oneof_variables(oneof), ", $ucclassname$__$uconeofname$__NOT_SET, {0}")?;
        }
        printer.print_raw(" }\n\n\n");
        Ok(())
    }

    pub fn generate_default_value_declarations(&self, printer: &mut Printer) -> Result<(), CodegenError> {
        for nested in &self.nested {
            nested.generate_default_value_declarations(printer)?;
        }
        for field in &self.fields {
            field.generate_default_value_declarations(printer)?;
        }
        Ok(())
    }

    pub fn generate_default_value_implementations(&self, printer: &mut Printer) -> Result<(), CodegenError> {
        for nested in &self.nested {
            nested.generate_default_value_implementations(printer)?;
        }
        for field in &self.fields {
            field.generate_default_value_implementations(printer)?;
        }
        Ok(())
    }

    fn prototypes(&self) -> Vec<(String, Vec<String>)> {
        let lc = &self.lcclassname;
        let class = &self.classname;
        vec![
            (format!("void   {}__init", lc), vec![format!("{} *message", class)]),
            (format!("size_t {}__get_packed_size", lc), vec![format!("const {} *message", class)]),
            (
                format!("size_t {}__pack", lc),
                vec![format!("const {} *message", class), "uint8_t *out".to_string()],
            ),
            (
                format!("size_t {}__pack_to_buffer", lc),
                vec![format!("const {} *message", class), "ProtobufCBuffer *buffer".to_string()],
            ),
            (
                format!("{} *\n       {}__unpack", class, lc),
                vec![
                    "ProtobufCAllocator *allocator".to_string(),
                    "size_t len".to_string(),
                    "const uint8_t *data".to_string(),
                ],
            ),
            (
                format!("void   {}__free_unpacked", lc),
                vec![format!("{} *message", class), "ProtobufCAllocator *allocator".to_string()],
            ),
        ]
    }

    pub fn generate_helper_function_declarations(&self, printer: &mut Printer) -> Result<(), CodegenError> {
        printer.print(&self.variables(), "/* $classname$ methods */\n")?;
        for (head, params) in self.prototypes() {
            print_prototype(printer, &head, &params)?;
            printer.print_raw(";\n");
        }
        for nested in &self.nested {
            nested.generate_helper_function_declarations(printer)?;
        }
        Ok(())
    }

    pub fn generate_helper_function_definitions(&self, printer: &mut Printer) -> Result<(), CodegenError> {
        let vars = self.variables();
        let bodies = [
            "{\n  static const $classname$ init_value = $ucclassname$__INIT;\n  *message = init_value;\n}\n",
            "{\n  assert(message->base.descriptor == &$lcclassname$__descriptor);\n  return protobuf_c_message_get_packed_size ((const ProtobufCMessage*)(message));\n}\n",
            "{\n  assert(message->base.descriptor == &$lcclassname$__descriptor);\n  return protobuf_c_message_pack ((const ProtobufCMessage*)message, out);\n}\n",
            "{\n  assert(message->base.descriptor == &$lcclassname$__descriptor);\n  return protobuf_c_message_pack_to_buffer ((const ProtobufCMessage*)message, buffer);\n}\n",
            "{\n  return ($classname$ *)\n     protobuf_c_message_unpack (&$lcclassname$__descriptor,\n                                allocator, len, data);\n}\n",
            "{\n  if(!message)\n    return;\n  assert(message->base.descriptor == &$lcclassname$__descriptor);\n  protobuf_c_message_free_unpacked ((ProtobufCMessage*)message, allocator);\n}\n",
        ];

        for ((head, params), body) in self.prototypes().into_iter().zip(bodies) {
            print_prototype(printer, &head, &params)?;
            printer.print_raw("\n");
            printer.print(&vars, body)?;
        }
        for nested in &self.nested {
            nested.generate_helper_function_definitions(printer)?;
        }
        Ok(())
    }

    pub fn generate_descriptor_declarations(&self, printer: &mut Printer) -> Result<(), CodegenError> {
        printer.print(&self.variables(), "extern const ProtobufCMessageDescriptor $lcclassname$__descriptor;\n")?;
        for nested in &self.nested {
            nested.generate_descriptor_declarations(printer)?;
        }
        Ok(())
    }

    /// Field descriptor table, name index, number ranges and the message
    /// descriptor record.
    pub fn generate_message_descriptor(&self, printer: &mut Printer) -> Result<(), CodegenError> {
        for nested in &self.nested {
            nested.generate_message_descriptor(printer)?;
        }

        let mut by_number: Vec<&dyn FieldGenerator> = self.fields.iter().map(|f| f.as_ref()).collect();
        by_number.sort_by_key(|f| f.field().number);

        let mut vars = self.variables();
        vars.insert("n_fields".to_string(), by_number.len().to_string());

        if by_number.is_empty() {
            printer.print(&vars, "#define $lcclassname$__field_descriptors NULL\n")?;
            printer.print(&vars, "#define $lcclassname$__field_indices_by_name NULL\n")?;
        } else {
            printer.print(
                &vars,
                "static const ProtobufCFieldDescriptor $lcclassname$__field_descriptors[$n_fields$] =\n{\n",
            )?;
            printer.indent();
            for field in &by_number {
                field.generate_descriptor_initializer(printer)?;
            }
            printer.outdent();
            printer.print_raw("};\n");

            let mut by_name: Vec<(usize, &str)> = by_number
                .iter()
                .enumerate()
                .map(|(i, f)| (i, f.field().name.as_str()))
                .collect();
            by_name.sort_by(|a, b| a.1.cmp(b.1));

            printer.print(&vars, "static const unsigned $lcclassname$__field_indices_by_name[] = {\n")?;
            for (index, name) in by_name {
                let mut entry = Variables::new();
                entry.insert("index".to_string(), index.to_string());
                entry.insert("name".to_string(), name.to_string());
                printer.print(&entry, "  $index$,   /* field[$index$] = $name$ */\n")?;
            }
            printer.print_raw("};\n");
        }

        let numbers: Vec<i32> = by_number.iter().map(|f| f.field().number).collect();
        let ranges_name = format!("{}__number_ranges", self.lcclassname);
        let n_ranges = write_int_ranges(printer, &numbers, &ranges_name)?;
        vars.insert("n_ranges".to_string(), n_ranges.to_string());

        printer.print(
            &vars,
            concat!(
                "const ProtobufCMessageDescriptor $lcclassname$__descriptor =\n",
                "{\n",
                "  PROTOBUF_C__MESSAGE_DESCRIPTOR_MAGIC,\n",
                "  \"$fullname$\",\n",
                "  \"$shortname$\",\n",
                "  \"$classname$\",\n",
                "  \"$packagename$\",\n",
                "  sizeof($classname$),\n",
                "  $n_fields$,\n",
                "  $lcclassname$__field_descriptors,\n",
                "  $lcclassname$__field_indices_by_name,\n",
                "  $n_ranges$,",
                "  $lcclassname$__number_ranges,\n",
                "  (ProtobufCMessageInit) $lcclassname$__init,\n",
                "  NULL,NULL,NULL    /* reserved[123] */\n",
                "};\n",
            ),
        )
    }
}

/// Prints `head(` and the parameters, one per line, lined up under the first.
fn print_prototype(printer: &mut Printer, head: &str, params: &[String]) -> Result<(), CodegenError> {
    let last_line = head.rsplit('\n').next().unwrap_or(head);
    let continuation = format!(",\n{} ", blankify(last_line));

    let mut vars = Variables::new();
    vars.insert("head".to_string(), head.to_string());
    vars.insert("params".to_string(), params.join(continuation.as_str()));
    printer.print(&vars, "$head$($params$)")
}
