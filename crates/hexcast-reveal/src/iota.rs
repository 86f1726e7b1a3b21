//! Values found in a dumped iota list.

use hexcast_geometry::Pattern;

/// A pattern together with what the registry knew about it.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternIota {
    pub pattern: Pattern,
    /// Display label such as `Mind's Reflection` or
    /// `Numerical Reflection: 5`; `None` when nothing matched.
    pub label: Option<String>,
}

impl PatternIota {
    pub fn new(pattern: Pattern) -> Self {
        Self {
            pattern,
            label: None,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Row-major matrix of numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// `None` unless `data` has exactly `rows * cols` entries.
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Option<Self> {
        (rows.checked_mul(cols)? == data.len()).then_some(Self { rows, cols, data })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.data.get(row * self.cols + col).copied()
    }

    /// Rows in order; empty when the matrix has no columns.
    pub fn row_slices(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks(self.cols.max(1)).take(self.rows)
    }
}

/// Which continuation frame a marker stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContinuationKind {
    Jump,
    Call,
}

impl ContinuationKind {
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Jump => "Jump",
            Self::Call => "Call",
        }
    }

    pub(crate) fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "Jump" => Some(Self::Jump),
            "Call" => Some(Self::Call),
            _ => None,
        }
    }
}

/// One value on the casting stack.
#[derive(Debug, Clone, PartialEq)]
pub enum Iota {
    Pattern(PatternIota),
    Number(f64),
    Vector([f64; 3]),
    Boolean(bool),
    Null,
    String(String),
    Matrix(Matrix),
    List(Vec<Iota>),
    Continuation {
        kind: ContinuationKind,
        labels: Vec<String>,
    },
    /// Text that could not be decoded, kept verbatim.
    Unknown(String),
}

impl Iota {
    /// Unlabelled pattern.
    pub fn pattern(pattern: Pattern) -> Self {
        Self::Pattern(PatternIota::new(pattern))
    }

    pub fn as_list(&self) -> Option<&[Iota]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Patterns anywhere inside this iota, depth first.
    pub fn patterns(&self) -> Vec<&PatternIota> {
        let mut found = Vec::new();
        self.collect_patterns(&mut found);
        found
    }

    fn collect_patterns<'a>(&'a self, found: &mut Vec<&'a PatternIota>) {
        match self {
            Self::Pattern(pattern) => found.push(pattern),
            Self::List(items) => {
                for item in items {
                    item.collect_patterns(found);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexcast_geometry::Direction;

    #[test]
    fn matrix_shape_is_checked() {
        assert!(Matrix::new(2, 2, vec![1.0, 2.0, 3.0]).is_none());
        let m = Matrix::new(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(m.get(1, 0), Some(4.0));
        assert_eq!(m.get(2, 0), None);
        assert_eq!(m.row_slices().count(), 2);

        let empty = Matrix::new(0, 0, Vec::new()).unwrap();
        assert_eq!(empty.row_slices().count(), 0);
    }

    #[test]
    fn collects_nested_patterns() {
        let inner = Iota::List(vec![Iota::pattern(Pattern::from_static(Direction::East, "qaq"))]);
        let outer = Iota::List(vec![
            Iota::Number(1.0),
            Iota::pattern(Pattern::from_static(Direction::West, "")),
            inner,
        ]);
        let signatures: Vec<_> = outer.patterns().iter().map(|p| p.pattern.signature()).collect();
        assert_eq!(signatures, vec!["", "qaq"]);
    }
}
