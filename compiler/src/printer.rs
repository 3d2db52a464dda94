//! Template printer that every generator writes through.
//!
//! Templates name their variables between dollar signs, `$name$`, and `$$`
//! prints a single `$`. Substitution is verbatim: values are not escaped and
//! are never scanned for further variables.

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{error::CodegenError, utils::split_set};

lazy_static! {
    static ref VARIABLE: Regex = Regex::new(r"\$([A-Za-z0-9_]*)\$").unwrap();
}

pub type Variables = HashMap<String, String>;

const INDENT: &str = "  ";

#[derive(Debug)]
pub struct Printer {
    output:        String,
    indent:        String,
    at_line_start: bool,
}

impl Printer {
    pub fn new() -> Self {
        Printer { output: String::new(), indent: String::new(), at_line_start: true }
    }

    /// Prints `template`, substituting each `$name$` from `variables`.
    pub fn print(&mut self, variables: &Variables, template: &str) -> Result<(), CodegenError> {
        let mut last_end = 0;
        for caps in VARIABLE.captures_iter(template) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            self.write_literal(&template[last_end..whole.start()], template)?;

            let name = name.as_str();
            if name.is_empty() {
                self.write("$");
            } else {
                match variables.get(name) {
                    Some(value) => self.write(value),
                    None => {
                        return Err(CodegenError::Template(format!(
                            "undefined variable ${}$ in template {:?}",
                            name, template
                        )))
                    }
                }
            }
            last_end = whole.end();
        }
        self.write_literal(&template[last_end..], template)
    }

    /// Prints `template` with a single variable bound.
    pub fn print_one(&mut self, template: &str, name: &str, value: &str) -> Result<(), CodegenError> {
        let mut variables = Variables::new();
        variables.insert(name.to_string(), value.to_string());
        self.print(&variables, template)
    }

    /// Prints `text` as-is, without looking for variables.
    pub fn print_raw(&mut self, text: &str) {
        self.write(text);
    }

    pub fn indent(&mut self) {
        self.indent.push_str(INDENT);
    }

    pub fn outdent(&mut self) {
        let len = self.indent.len().saturating_sub(INDENT.len());
        self.indent.truncate(len);
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn into_output(self) -> String {
        self.output
    }

    fn write_literal(&mut self, text: &str, template: &str) -> Result<(), CodegenError> {
        if text.contains('$') {
            return Err(CodegenError::Template(format!(
                "unterminated variable in template {:?}",
                template
            )));
        }
        self.write(text);
        Ok(())
    }

    fn write(&mut self, text: &str) {
        for line in text.split_inclusive('\n') {
            if self.at_line_start && line != "\n" {
                self.output.push_str(&self.indent);
            }
            self.output.push_str(line);
            self.at_line_start = line.ends_with('\n');
        }
    }
}

impl Default for Printer {
    fn default() -> Self {
        Printer::new()
    }
}

/// Prints `comment` as a C block comment, one ` *` line per non-empty source
/// line. Sequences that would open or close the block are broken up.
pub fn print_comment(printer: &mut Printer, comment: &str) -> Result<(), CodegenError> {
    if comment.is_empty() {
        return Ok(());
    }

    printer.print_raw("/*\n");
    for line in split_set(comment, "\r\n") {
        let mut line = line.to_string();
        if line.starts_with('/') {
            line.insert(0, ' ');
        }
        while let Some(pos) = line.find("/*") {
            line.replace_range(pos..pos + 1, " ");
        }
        while let Some(pos) = line.find("*/") {
            line.replace_range(pos + 1..pos + 2, " ");
        }
        printer.print_one(" *$line$\n", "line", &line)?;
    }
    printer.print_raw(" */\n");
    Ok(())
}
