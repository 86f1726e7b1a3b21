//! Text output for iotas.

use std::fmt::Write;

use hexcast_handlers::format_decimal;
use hexcast_registry::PatternRegistry;

use crate::iota::{Iota, Matrix, PatternIota};

const DEFAULT_INDENT: usize = 4;

/// Renders iotas inline (`[a, b]`) or pretty (one item per line).
///
/// Pretty output parses back to the same iotas.
#[derive(Debug, Clone, Copy)]
pub struct IotaPrinter<'a> {
    registry: Option<&'a PatternRegistry>,
    indent: usize,
}

impl Default for IotaPrinter<'_> {
    fn default() -> Self {
        Self {
            registry: None,
            indent: DEFAULT_INDENT,
        }
    }
}

impl<'a> IotaPrinter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry for naming patterns that were built without a label.
    #[must_use]
    pub fn with_registry(mut self, registry: &'a PatternRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Single line, comma separated.
    pub fn inline(&self, iota: &Iota) -> String {
        let mut out = String::new();
        self.write_inline(&mut out, iota);
        out
    }

    /// Multi-line, one list item per line, nested lists indented.
    pub fn pretty(&self, iota: &Iota) -> String {
        let mut out = String::new();
        self.write_pretty(&mut out, iota, 0);
        out
    }

    fn pattern(&self, iota: &PatternIota) -> String {
        if let Some(label) = &iota.label {
            return label.clone();
        }
        self.registry
            .and_then(|registry| registry.identify(&iota.pattern).label())
            .unwrap_or_else(|| format!("HexPattern({})", iota.pattern))
    }

    fn write_inline(&self, out: &mut String, iota: &Iota) {
        match iota {
            Iota::List(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.write_inline(out, item);
                }
                out.push(']');
            }
            Iota::Matrix(matrix) => {
                write_matrix_header(out, matrix);
                let rows: Vec<String> = matrix
                    .row_slices()
                    .map(|row| {
                        row.iter()
                            .map(|n| format_decimal(*n))
                            .collect::<Vec<_>>()
                            .join(", ")
                    })
                    .collect();
                if !rows.is_empty() {
                    out.push(' ');
                    out.push_str(&rows.join("; "));
                }
                out.push(']');
            }
            other => self.write_scalar(out, other),
        }
    }

    fn write_pretty(&self, out: &mut String, iota: &Iota, depth: usize) {
        match iota {
            Iota::List(items) if !items.is_empty() => {
                out.push_str("[\n");
                for item in items {
                    self.pad(out, depth + 1);
                    self.write_pretty(out, item, depth + 1);
                    out.push('\n');
                }
                self.pad(out, depth);
                out.push(']');
            }
            Iota::Matrix(matrix) if matrix.rows() > 0 && matrix.cols() > 0 => {
                write_matrix_header(out, matrix);
                out.push('\n');

                let cells: Vec<Vec<String>> = matrix
                    .row_slices()
                    .map(|row| row.iter().map(|n| format_decimal(*n)).collect())
                    .collect();
                let widths: Vec<usize> = (0..matrix.cols())
                    .map(|c| cells.iter().map(|row| row[c].len()).max().unwrap_or(0))
                    .collect();

                for row in &cells {
                    self.pad(out, depth + 1);
                    for (c, cell) in row.iter().enumerate() {
                        if c > 0 {
                            out.push_str(", ");
                        }
                        let _ = write!(out, "{cell:>width$}", width = widths[c]);
                    }
                    out.push('\n');
                }
                self.pad(out, depth);
                out.push(']');
            }
            other => self.write_inline(out, other),
        }
    }

    fn write_scalar(&self, out: &mut String, iota: &Iota) {
        match iota {
            Iota::Pattern(pattern) => out.push_str(&self.pattern(pattern)),
            Iota::Number(n) => out.push_str(&format_decimal(*n)),
            Iota::Vector([x, y, z]) => {
                let _ = write!(
                    out,
                    "({}, {}, {})",
                    format_decimal(*x),
                    format_decimal(*y),
                    format_decimal(*z)
                );
            }
            Iota::Boolean(true) => out.push_str("True"),
            Iota::Boolean(false) => out.push_str("False"),
            Iota::Null => out.push_str("NULL"),
            Iota::String(text) => write_string(out, text),
            Iota::Continuation { kind, labels } => {
                out.push('[');
                out.push_str(kind.keyword());
                if !labels.is_empty() {
                    let _ = write!(out, " -> ({})", labels.join(", "));
                }
                out.push(']');
            }
            Iota::Unknown(text) => out.push_str(text),
            Iota::List(_) | Iota::Matrix(_) => self.write_inline(out, iota),
        }
    }

    fn pad(&self, out: &mut String, depth: usize) {
        out.extend(std::iter::repeat(' ').take(depth * self.indent));
    }
}

fn write_matrix_header(out: &mut String, matrix: &Matrix) {
    let _ = write!(out, "[({}, {}) |", matrix.rows(), matrix.cols());
}

fn write_string(out: &mut String, text: &str) {
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iota::ContinuationKind;
    use hexcast_geometry::{Direction, Pattern};
    use hexcast_registry::RegistryBuilder;

    fn pattern(start: Direction, signature: &'static str) -> Iota {
        Iota::pattern(Pattern::from_static(start, signature))
    }

    #[test]
    fn pretty_prints_the_basic_dump() {
        let iota = Iota::List(vec![
            pattern(Direction::East, ""),
            pattern(Direction::SouthWest, "w"),
            Iota::Number(0.0),
        ]);
        let registry = PatternRegistry::empty();
        let printer = IotaPrinter::new().with_registry(&registry);
        assert_eq!(
            printer.pretty(&iota),
            "[\n    HexPattern(EAST)\n    HexPattern(SOUTH_WEST w)\n    0\n]"
        );
        assert_eq!(
            printer.inline(&iota),
            "[HexPattern(EAST), HexPattern(SOUTH_WEST w), 0]"
        );
    }

    #[test]
    fn nested_lists_indent() {
        let iota = Iota::List(vec![
            Iota::List(vec![Iota::Number(1.5), Iota::List(Vec::new())]),
            Iota::Boolean(false),
        ]);
        assert_eq!(
            IotaPrinter::new().with_indent(2).pretty(&iota),
            "[\n  [\n    1.5\n    []\n  ]\n  False\n]"
        );
    }

    #[test]
    fn matrices_align_columns() {
        let m = Matrix::new(2, 3, vec![1.0, -20.5, 3.0, 400.0, 5.0, 0.25]).unwrap();
        let iota = Iota::Matrix(m);
        let printer = IotaPrinter::new();
        assert_eq!(printer.inline(&iota), "[(2, 3) | 1, -20.5, 3; 400, 5, 0.25]");
        assert_eq!(
            printer.pretty(&iota),
            "[(2, 3) |\n      1, -20.5,    3\n    400,     5, 0.25\n]"
        );

        let empty = Iota::Matrix(Matrix::new(0, 0, Vec::new()).unwrap());
        assert_eq!(printer.pretty(&empty), "[(0, 0) |]");
    }

    #[test]
    fn scalars() {
        let printer = IotaPrinter::new();
        assert_eq!(printer.inline(&Iota::Vector([1.0, 0.123456, -0.0])), "(1, 0.1235, 0)");
        assert_eq!(printer.inline(&Iota::Null), "NULL");
        assert_eq!(printer.inline(&Iota::String("a \"b\"".into())), r#""a \"b\"""#);
        assert_eq!(
            printer.inline(&Iota::Continuation {
                kind: ContinuationKind::Call,
                labels: vec!["x".into(), "y".into()],
            }),
            "[Call -> (x, y)]"
        );
        assert_eq!(printer.inline(&Iota::Unknown("Steve".into())), "Steve");
    }

    #[test]
    fn patterns_use_labels_then_registry() {
        let registry = RegistryBuilder::with_builtins().build().unwrap();
        let printer = IotaPrinter::new().with_registry(&registry);
        assert_eq!(
            printer.inline(&pattern(Direction::NorthEast, "qaq")),
            "Mind's Reflection"
        );
        assert_eq!(
            printer.inline(&pattern(Direction::SouthEast, "aqaaq")),
            "Numerical Reflection: 5"
        );
        let labelled = Iota::Pattern(
            PatternIota::new(Pattern::from_static(Direction::East, "")).with_label("Custom"),
        );
        assert_eq!(printer.inline(&labelled), "Custom");
        assert_eq!(
            IotaPrinter::new().inline(&pattern(Direction::NorthEast, "qaq")),
            "HexPattern(NORTH_EAST qaq)"
        );
    }
}
