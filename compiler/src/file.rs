//! Whole-file generation: the `.pb-c.h` header and `.pb-c.c` source for one
//! schema file.

use protoc_c_schema::FileModel;
use serde::Serialize;
use tracing::debug;

use crate::{
    error::CodegenError,
    field::GeneratorOptions,
    message::MessageGenerator,
    printer::{Printer, Variables},
    utils::{filename_identifier, strip_proto},
};

const GENERATOR_NAME: &str = "protoc-c-rs";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedFile {
    pub header_name: String,
    pub header:      String,
    pub source_name: String,
    pub source:      String,
}

pub struct FileGenerator<'a> {
    file:     &'a FileModel,
    messages: Vec<MessageGenerator<'a>>,
}

impl<'a> FileGenerator<'a> {
    pub fn new(file: &'a FileModel, options: &GeneratorOptions) -> Result<Self, CodegenError> {
        let messages = file
            .messages
            .iter()
            .map(|message| MessageGenerator::new(file, message, options))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(FileGenerator { file, messages })
    }

    pub fn header_name(&self) -> String {
        format!("{}.pb-c.h", strip_proto(&self.file.name))
    }

    pub fn source_name(&self) -> String {
        format!("{}.pb-c.c", strip_proto(&self.file.name))
    }

    fn variables(&self) -> Variables {
        let mut vars = Variables::new();
        vars.insert("generator".to_string(), GENERATOR_NAME.to_string());
        vars.insert("filename".to_string(), self.file.name.clone());
        vars.insert("filename_identifier".to_string(), filename_identifier(&self.file.name));
        vars.insert("header_name".to_string(), self.header_name());
        vars
    }

    pub fn generate_header(&self) -> Result<String, CodegenError> {
        let vars = self.variables();
        let mut printer = Printer::new();

        printer.print(
            &vars,
            concat!(
                "/* Generated by $generator$.  DO NOT EDIT! */\n",
                "/* Generated from: $filename$ */\n",
                "\n",
                "#ifndef PROTOBUF_C_$filename_identifier$__INCLUDED\n",
                "#define PROTOBUF_C_$filename_identifier$__INCLUDED\n",
                "\n",
                "#include <protobuf-c/protobuf-c.h>\n",
                "\n",
                "PROTOBUF_C__BEGIN_DECLS\n",
                "\n",
            ),
        )?;

        for message in &self.messages {
            message.generate_struct_typedefs(&mut printer)?;
        }

        printer.print_raw("\n\n/* --- enums --- */\n\n");
        for message in &self.messages {
            message.generate_enum_definitions(&mut printer)?;
        }

        printer.print_raw("\n/* --- messages --- */\n\n");
        for message in &self.messages {
            message.generate_struct_definition(&mut printer)?;
        }

        for message in &self.messages {
            message.generate_default_value_declarations(&mut printer)?;
        }

        for message in &self.messages {
            message.generate_helper_function_declarations(&mut printer)?;
        }

        printer.print_raw("\n/* --- descriptors --- */\n\n");
        for message in &self.messages {
            message.generate_descriptor_declarations(&mut printer)?;
        }

        printer.print(
            &vars,
            "\nPROTOBUF_C__END_DECLS\n\n\n#endif  /* PROTOBUF_C_$filename_identifier$__INCLUDED */\n",
        )?;
        Ok(printer.into_output())
    }

    pub fn generate_source(&self) -> Result<String, CodegenError> {
        let vars = self.variables();
        let mut printer = Printer::new();

        printer.print(
            &vars,
            concat!(
                "/* Generated by $generator$.  DO NOT EDIT! */\n",
                "/* Generated from: $filename$ */\n",
                "\n",
                "/* Do not generate deprecated warnings for self */\n",
                "#ifndef PROTOBUF_C__NO_DEPRECATED\n",
                "#define PROTOBUF_C__NO_DEPRECATED\n",
                "#endif\n",
                "\n",
                "#include \"$header_name$\"\n",
            ),
        )?;

        for message in &self.messages {
            message.generate_helper_function_definitions(&mut printer)?;
        }
        for message in &self.messages {
            message.generate_default_value_implementations(&mut printer)?;
        }
        for message in &self.messages {
            message.generate_message_descriptor(&mut printer)?;
        }
        Ok(printer.into_output())
    }

    pub fn generate(&self) -> Result<GeneratedFile, CodegenError> {
        debug!(file = %self.file.name, messages = self.messages.len(), "generating file");
        Ok(GeneratedFile {
            header_name: self.header_name(),
            header:      self.generate_header()?,
            source_name: self.source_name(),
            source:      self.generate_source()?,
        })
    }
}

/// Generates the header and source for `file`.
pub fn generate_file(file: &FileModel, options: &GeneratorOptions) -> Result<GeneratedFile, CodegenError> {
    FileGenerator::new(file, options)?.generate()
}
