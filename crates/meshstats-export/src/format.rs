//! Delimited-text formatting strategy.

use std::borrow::Cow;

/// A decimal separator that would make numeric cells ambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("'{}' cannot be used as decimal separator", decimal_point.escape_debug())]
pub struct InvalidDecimalPointError {
    pub decimal_point: char,
}

/// Delimiter and decimal separator of exported files.
///
/// Only numeric cells are affected by the decimal separator; names are
/// written verbatim and quoted when needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvFormat {
    delimiter: char,
    decimal_point: char,
}

impl Default for CsvFormat {
    fn default() -> Self {
        Self {
            delimiter: ',',
            decimal_point: '.',
        }
    }
}

impl CsvFormat {
    /// Returns the format for a locale using `decimal_point`.
    ///
    /// Locales whose decimal separator is not `.` use `;` as delimiter, so that
    /// a `,` decimal separator never clashes with the delimiter.
    ///
    /// # Errors
    ///
    /// Returns an error if `decimal_point` is the delimiter, a quote, a line
    /// break, a digit or a sign, since numeric cells could not be read back.
    ///
    /// # Examples
    ///
    /// ```
    /// use meshstats_export::CsvFormat;
    ///
    /// assert_eq!(CsvFormat::for_decimal_point('.').unwrap(), CsvFormat::default());
    ///
    /// let format = CsvFormat::for_decimal_point(',').unwrap();
    /// assert_eq!(format.delimiter(), ';');
    /// assert_eq!(format.format_number(-0.478), "-0,478");
    ///
    /// assert!(CsvFormat::for_decimal_point(';').is_err());
    /// ```
    pub fn for_decimal_point(decimal_point: char) -> Result<Self, InvalidDecimalPointError> {
        let delimiter = if decimal_point == '.' { ',' } else { ';' };
        if decimal_point == delimiter
            || matches!(decimal_point, '"' | '\n' | '\r' | '-' | '+')
            || decimal_point.is_ascii_digit()
        {
            return Err(InvalidDecimalPointError { decimal_point });
        }
        Ok(Self {
            delimiter,
            decimal_point,
        })
    }

    #[must_use]
    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    #[must_use]
    pub fn decimal_point(&self) -> char {
        self.decimal_point
    }

    /// Formats `value` in its shortest round-trip form with at least one
    /// fractional digit (`1.0`, `288.675`). Exponent notation is never used.
    #[must_use]
    pub fn format_number(&self, value: f64) -> String {
        let mut text = format!("{value}");
        if value.is_finite() && !text.contains('.') {
            text.push_str(".0");
        }
        if self.decimal_point == '.' {
            text
        } else {
            text.replace('.', self.decimal_point.encode_utf8(&mut [0; 4]))
        }
    }

    /// Parses a numeric cell written by [`format_number`](Self::format_number).
    #[must_use]
    pub fn parse_number(&self, cell: &str) -> Option<f64> {
        let cell = cell.trim();
        if self.decimal_point == '.' {
            cell.parse().ok()
        } else {
            cell.replace(self.decimal_point, ".").parse().ok()
        }
    }

    /// Quotes `text` if it contains the delimiter, a quote or a line break.
    #[must_use]
    pub fn escape<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if text.contains([self.delimiter, '"', '\n', '\r']) {
            Cow::Owned(format!("\"{}\"", text.replace('"', "\"\"")))
        } else {
            Cow::Borrowed(text)
        }
    }

    /// Joins already-escaped cells with the delimiter.
    #[must_use]
    pub fn join<I, S>(&self, cells: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut line = String::new();
        for (i, cell) in cells.into_iter().enumerate() {
            if i > 0 {
                line.push(self.delimiter);
            }
            line.push_str(cell.as_ref());
        }
        line
    }

    /// Splits one line into unescaped cells.
    ///
    /// Quoted cells may contain the delimiter and doubled quotes; line breaks
    /// inside quotes are not supported.
    #[must_use]
    pub fn split(&self, line: &str) -> Vec<String> {
        let mut cells = vec![];
        let mut cell = String::new();
        let mut in_quotes = false;
        let mut chars = line.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '"' if in_quotes && chars.peek() == Some(&'"') => {
                    cell.push('"');
                    chars.next();
                }
                '"' => in_quotes = !in_quotes,
                c if c == self.delimiter && !in_quotes => cells.push(std::mem::take(&mut cell)),
                c => cell.push(c),
            }
        }
        cells.push(cell);
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        let format = CsvFormat::default();
        assert_eq!(format.format_number(1.0), "1.0");
        assert_eq!(format.format_number(1000.0), "1000.0");
        assert_eq!(format.format_number(288.675), "288.675");
        assert_eq!(format.format_number(-0.037), "-0.037");
        assert_eq!(format.format_number(-0.0), "-0.0");
    }

    #[test]
    fn test_format_number_without_exponent() {
        let format = CsvFormat::default();
        assert_eq!(format.format_number(1e16), "10000000000000000.0");
        assert_eq!(format.format_number(1e-7), "0.0000001");
        assert_eq!(
            format.format_number(12_345_678_901_234_567.0),
            "12345678901234568.0"
        );
        assert_eq!(format.format_number(-3e-6), "-0.000003");
        for v in [1e16, 1e-7, -3e-6, 6.02e23] {
            let cell = format.format_number(v);
            assert!(cell.contains('.') && !cell.contains('e'), "{cell}");
            assert_eq!(format.parse_number(&cell), Some(v));
        }
    }

    #[test]
    fn test_rejected_decimal_points() {
        for c in [';', '"', '\n', '\r', '-', '+', '0', '7'] {
            assert_eq!(
                CsvFormat::for_decimal_point(c),
                Err(InvalidDecimalPointError { decimal_point: c })
            );
        }
        let format = CsvFormat::for_decimal_point('\'').unwrap();
        assert_eq!(format.delimiter(), ';');
        assert_eq!(format.decimal_point(), '\'');
    }

    #[test]
    fn test_numeric_cells_keep_their_shape() {
        for c in ['.', ',', '\'', ' '] {
            let format = CsvFormat::for_decimal_point(c).unwrap();
            let line = format.join([
                "m".to_owned(),
                format.format_number(0.5),
                format.format_number(1.25),
            ]);
            let cells = format.split(&line);
            assert_eq!(cells.len(), 3, "{line}");
            assert_eq!(format.parse_number(&cells[1]), Some(0.5));
            assert_eq!(format.parse_number(&cells[2]), Some(1.25));
        }
    }

    #[test]
    fn test_parse_number_roundtrip_with_comma() {
        let format = CsvFormat::for_decimal_point(',').unwrap();
        for v in [0.0, -5.62, 950.05, 1e-7, 123_456.789] {
            let cell = format.format_number(v);
            assert!(!cell.contains('.'), "{cell}");
            assert_eq!(format.parse_number(&cell), Some(v));
        }
        assert_eq!(format.parse_number("abc"), None);
    }

    #[test]
    fn test_escape() {
        let format = CsvFormat::default();
        assert_eq!(format.escape("simple"), "simple");
        assert_eq!(format.escape("with,comma"), "\"with,comma\"");
        assert_eq!(format.escape("with\"quote"), "\"with\"\"quote\"");
        assert_eq!(format.escape("with\nnewline"), "\"with\nnewline\"");
        // Commas are harmless when the delimiter is a semicolon
        assert_eq!(CsvFormat::for_decimal_point(',').unwrap().escape("a,b"), "a,b");
    }

    #[test]
    fn test_join_and_split() {
        let format = CsvFormat::for_decimal_point(',').unwrap();
        let line = format.join([format.escape("T1;T2"), format.escape("say \"hi\""), "1,5".into()]);
        assert_eq!(line, "\"T1;T2\";\"say \"\"hi\"\"\";1,5");
        assert_eq!(format.split(&line), ["T1;T2", "say \"hi\"", "1,5"]);
    }

    #[test]
    fn test_split_empty_cells() {
        let format = CsvFormat::default();
        assert_eq!(format.split(""), [""]);
        assert_eq!(format.split("a,,b"), ["a", "", "b"]);
    }
}
