// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.
use std::sync::Arc;

use arrow::datatypes::{DataType, Field, TimeUnit};

use crate::lower::error::LowerError;

/// Convert a coordinator type signature to an Arrow DataType.
///
/// The signature language covers scalars (`bigint`, `varchar(32)`,
/// `decimal(18,4)`, `timestamp with time zone`, ...) and the structured
/// constructors `array(T)`, `map(K,V)` and `row(name T, ...)`. Base names
/// match case-insensitively and whitespace between tokens is ignored.
///
/// Resolution is a single pass over the string with no shared state, so the
/// same signature always produces the same type.
pub fn arrow_type_from_signature(signature: &str) -> Result<DataType, LowerError> {
    let mut parser = SignatureParser {
        input: signature,
        pos: 0,
    };
    let mapping_error = |detail: String| LowerError::TypeMapping {
        signature: signature.to_string(),
        detail,
    };
    let data_type = parser.parse_type().map_err(mapping_error)?;
    parser.skip_ws();
    if !parser.at_end() {
        return Err(mapping_error(format!(
            "trailing input at offset {}",
            parser.pos
        )));
    }
    Ok(data_type)
}

struct SignatureParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> SignatureParser<'a> {
    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_ws(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), String> {
        self.skip_ws();
        match self.peek() {
            Some(c) if c == expected => {
                self.bump();
                Ok(())
            }
            Some(c) => Err(format!("expected '{expected}', found '{c}'")),
            None => Err(format!("expected '{expected}', found end of input")),
        }
    }

    /// Scan an identifier (`[A-Za-z_][A-Za-z0-9_]*`), preserving its case.
    fn parse_word(&mut self) -> Result<&'a str, String> {
        self.skip_ws();
        let start = self.pos;
        match self.peek() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                self.bump();
            }
            Some(c) => return Err(format!("expected a type name, found '{c}'")),
            None => return Err("expected a type name, found end of input".to_string()),
        }
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                self.bump();
            } else {
                break;
            }
        }
        Ok(&self.input[start..self.pos])
    }

    fn parse_integer(&mut self) -> Result<u64, String> {
        self.skip_ws();
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                self.bump();
            } else {
                break;
            }
        }
        if self.pos == start {
            return Err("expected an integer".to_string());
        }
        self.input[start..self.pos]
            .parse::<u64>()
            .map_err(|_| format!("integer out of range: {}", &self.input[start..self.pos]))
    }

    fn parse_type(&mut self) -> Result<DataType, String> {
        let base = self.parse_word()?.to_ascii_lowercase();
        match base.as_str() {
            "unknown" => Ok(DataType::Null),
            "boolean" => Ok(DataType::Boolean),
            "tinyint" => Ok(DataType::Int8),
            "smallint" => Ok(DataType::Int16),
            "integer" => Ok(DataType::Int32),
            "bigint" => Ok(DataType::Int64),
            "real" => Ok(DataType::Float32),
            "double" => Ok(DataType::Float64),
            "date" => Ok(DataType::Date32),
            "varbinary" => Ok(DataType::Binary),
            // The declared length bound is not represented in Arrow; both
            // bounded and unbounded strings lower to Utf8.
            "varchar" | "char" => {
                self.skip_length_parameter()?;
                Ok(DataType::Utf8)
            }
            "timestamp" => self.parse_timestamp(),
            "decimal" => self.parse_decimal(),
            "array" => self.parse_array(),
            "map" => self.parse_map(),
            "row" => self.parse_row(),
            _ => Err(format!("unknown type: {base}")),
        }
    }

    fn skip_length_parameter(&mut self) -> Result<(), String> {
        self.skip_ws();
        if self.peek() != Some('(') {
            return Ok(());
        }
        self.bump();
        self.parse_integer()?;
        self.expect(')')
    }

    /// `timestamp` may continue as the multi-word `timestamp with time zone`.
    fn parse_timestamp(&mut self) -> Result<DataType, String> {
        let saved = self.pos;
        match self.parse_word() {
            Ok(word) if word.eq_ignore_ascii_case("with") => {
                for expected in ["time", "zone"] {
                    let word = self.parse_word()?;
                    if !word.eq_ignore_ascii_case(expected) {
                        return Err(format!(
                            "expected '{expected}' in 'timestamp with time zone', found '{word}'"
                        ));
                    }
                }
                Ok(DataType::Timestamp(TimeUnit::Microsecond, Some("UTC".into())))
            }
            _ => {
                self.pos = saved;
                Ok(DataType::Timestamp(TimeUnit::Microsecond, None))
            }
        }
    }

    fn parse_decimal(&mut self) -> Result<DataType, String> {
        self.skip_ws();
        if self.peek() != Some('(') {
            return Err("decimal requires precision and scale".to_string());
        }
        self.bump();
        let precision = self.parse_integer()?;
        self.expect(',')?;
        let scale = self.parse_integer()?;
        self.expect(')')?;
        if precision == 0 || precision > 76 {
            return Err(format!("decimal precision out of range: {precision}"));
        }
        if scale > precision {
            return Err(format!(
                "decimal scale {scale} exceeds precision {precision}"
            ));
        }
        // Precision above 38 does not fit the 128-bit representation.
        if precision > 38 {
            Ok(DataType::Decimal256(precision as u8, scale as i8))
        } else {
            Ok(DataType::Decimal128(precision as u8, scale as i8))
        }
    }

    fn parse_array(&mut self) -> Result<DataType, String> {
        self.expect('(')?;
        let item = self.parse_type()?;
        self.expect(')')?;
        Ok(DataType::List(Arc::new(Field::new("item", item, true))))
    }

    fn parse_map(&mut self) -> Result<DataType, String> {
        self.expect('(')?;
        let key = self.parse_type()?;
        self.expect(',')?;
        let value = self.parse_type()?;
        self.expect(')')?;
        let entries = Arc::new(Field::new(
            "entries",
            DataType::Struct(
                vec![Field::new("key", key, true), Field::new("value", value, true)].into(),
            ),
            false,
        ));
        Ok(DataType::Map(entries, false))
    }

    fn parse_row(&mut self) -> Result<DataType, String> {
        self.expect('(')?;
        self.skip_ws();
        if self.peek() == Some(')') {
            return Err("row requires at least one field".to_string());
        }
        let mut fields = Vec::new();
        loop {
            fields.push(self.parse_row_field()?);
            self.skip_ws();
            match self.bump() {
                Some(',') => continue,
                Some(')') => break,
                Some(c) => return Err(format!("expected ',' or ')' in row, found '{c}'")),
                None => return Err("unterminated row".to_string()),
            }
        }
        Ok(DataType::Struct(fields.into()))
    }

    /// A row field is `"quoted name" T`, `name T`, or a bare `T`. A bare type
    /// is only accepted when the next token closes the field, so that
    /// `row(timestamp bigint)` still reads as a field named `timestamp`.
    fn parse_row_field(&mut self) -> Result<Field, String> {
        self.skip_ws();
        if self.peek() == Some('"') {
            let name = self.parse_quoted_name()?;
            let data_type = self.parse_type()?;
            return Ok(Field::new(name, data_type, true));
        }

        let saved = self.pos;
        if let Ok(data_type) = self.parse_type() {
            self.skip_ws();
            if matches!(self.peek(), Some(',') | Some(')')) {
                return Ok(Field::new("", data_type, true));
            }
        }
        self.pos = saved;

        let name = self.parse_word()?.to_string();
        let data_type = self.parse_type()?;
        Ok(Field::new(name, data_type, true))
    }

    /// Double-quoted field name with `""` as the escape for a literal quote.
    fn parse_quoted_name(&mut self) -> Result<String, String> {
        self.bump();
        let mut name = String::new();
        loop {
            match self.bump() {
                Some('"') => {
                    if self.peek() == Some('"') {
                        self.bump();
                        name.push('"');
                    } else {
                        return Ok(name);
                    }
                }
                Some(c) => name.push(c),
                None => return Err("unterminated quoted field name".to_string()),
            }
        }
    }
}
