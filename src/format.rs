//! Plain-text matrix, sparse-matrix and vector files.
//!
//! ```text
//! Matrix: 2 by 3
//! row 0: 0 1 1
//! row 1: 0 0 1
//!
//! SparseMatrix: 3 by 3
//! row 0: 1 2 -1
//! row 1: 2 -1
//! row 2: -1
//!
//! Vector: 3
//! 0.33333 0.33333 0.33333
//! ```
//!
//! Readers are token based: line breaks inside a row are ignored. Numbers are written in
//! a C `%1.5g` style (five significant digits, trailing zeros dropped). Sparse rows are
//! written as integer column indices so they read back exactly.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::dense::DenseMatrix;
use crate::sparse::SparseGraph;
use crate::{Error, Result};

/// Numbers per line for dense rows; the `row <i>: ` prefix takes the first two slots.
const DENSE_LINE_SLOTS: usize = 9;
const ROW_END: &str = "-1";

struct Tokens<'a> {
    items: Vec<(usize, &'a str)>,
    pos: usize,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        let items = text
            .lines()
            .enumerate()
            .flat_map(|(i, line)| line.split_whitespace().map(move |t| (i + 1, t)))
            .collect();
        Self { items, pos: 0 }
    }

    fn next(&mut self, context: &str) -> Result<(usize, &'a str)> {
        match self.items.get(self.pos) {
            Some(&tok) => {
                self.pos += 1;
                Ok(tok)
            }
            None => Err(parse_error(context, None, "unexpected end of input")),
        }
    }

    fn expect(&mut self, word: &str, context: &str) -> Result<()> {
        let (line, tok) = self.next(context)?;
        if tok != word {
            return Err(parse_error(context, Some(line), &format!("expected `{word}`, found `{tok}`")));
        }
        Ok(())
    }

    fn next_usize(&mut self, context: &str) -> Result<usize> {
        let (line, tok) = self.next(context)?;
        tok.parse()
            .map_err(|_| parse_error(context, Some(line), &format!("expected an unsigned integer, found `{tok}`")))
    }

    fn next_f64(&mut self, context: &str) -> Result<f64> {
        let (line, tok) = self.next(context)?;
        tok.parse()
            .map_err(|_| parse_error(context, Some(line), &format!("expected a number, found `{tok}`")))
    }

    /// `<m> by <n>` after a header keyword.
    fn dims(&mut self, keyword: &str) -> Result<(usize, usize)> {
        let ctx = "dimension header";
        self.expect(keyword, ctx)?;
        let m = self.next_usize(ctx)?;
        self.expect("by", ctx)?;
        let n = self.next_usize(ctx)?;
        Ok((m, n))
    }

    fn remaining(&self) -> usize {
        self.items.len() - self.pos
    }

    /// Reject a header that promises more rows (or entries) than the input holds, before
    /// anything is sized from it.
    fn ensure_available(&self, count: usize, tokens_each: usize, what: &str) -> Result<()> {
        let left = self.remaining();
        match count.checked_mul(tokens_each) {
            Some(needed) if needed <= left => Ok(()),
            _ => Err(parse_error(
                "dimension header",
                None,
                &format!("header claims {count} {what} but only {left} tokens follow"),
            )),
        }
    }

    /// `row <i>:` (the colon may be its own token).
    fn row_label(&mut self, expected: usize) -> Result<()> {
        let ctx = format!("row {expected}");
        self.expect("row", &ctx)?;
        let (line, tok) = self.next(&ctx)?;
        let digits = match tok.strip_suffix(':') {
            Some(d) => d,
            None => {
                self.expect(":", &ctx)?;
                tok
            }
        };
        match digits.parse::<usize>() {
            Ok(i) if i == expected => Ok(()),
            Ok(i) => Err(parse_error(&ctx, Some(line), &format!("row label {i} out of sequence"))),
            Err(_) => Err(parse_error(&ctx, Some(line), &format!("bad row label `{tok}`"))),
        }
    }
}

fn parse_error(context: &str, line: Option<usize>, message: &str) -> Error {
    let context = match line {
        Some(l) => format!("{context} (line {l})"),
        None => context.to_string(),
    };
    Error::Parse { context, message: message.to_string() }
}

fn read_text<R: Read>(mut reader: R) -> Result<String> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    Ok(text)
}

/// Format like C's `%1.5g`.
pub fn format_g(x: f64) -> String {
    const PRECISION: i32 = 5;
    if x == 0.0 || !x.is_finite() {
        return format!("{x}");
    }
    let sci = format!("{:.*e}", (PRECISION - 1) as usize, x);
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return format!("{x}");
    };
    let Ok(exp) = exp.parse::<i32>() else {
        return format!("{x}");
    };
    if exp < -4 || exp >= PRECISION {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exp.abs())
    } else {
        let decimals = (PRECISION - 1 - exp) as usize;
        trim_fraction(&format!("{x:.decimals$}")).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

pub fn read_dense_matrix<R: Read>(reader: R) -> Result<DenseMatrix> {
    let text = read_text(reader)?;
    let mut toks = Tokens::new(&text);
    let (m, n) = toks.dims("Matrix:")?;
    toks.ensure_available(m, 2, "rows")?;
    if m > 0 {
        toks.ensure_available(n, 1, "columns")?;
    }
    let mut rows = Vec::new();
    for i in 0..m {
        toks.row_label(i)?;
        let mut row = Vec::new();
        for j in 0..n {
            row.push(toks.next_f64(&format!("row {i} col {j}"))?);
        }
        rows.push(row);
    }
    if m == 0 {
        return Ok(DenseMatrix::zeros(0, n));
    }
    DenseMatrix::from_rows(rows)
}

pub fn write_dense_matrix<W: Write>(mut w: W, m: &DenseMatrix) -> Result<()> {
    writeln!(w, "Matrix: {} by {}", m.rows(), m.cols())?;
    for i in 0..m.rows() {
        write!(w, "row {i}: ")?;
        let mut slot = 2usize;
        for &x in m.row(i) {
            write!(w, "{} ", format_g(x))?;
            if slot % DENSE_LINE_SLOTS == 0 {
                writeln!(w)?;
            }
            slot += 1;
        }
        if slot % DENSE_LINE_SLOTS != 1 {
            writeln!(w)?;
        }
    }
    Ok(())
}

/// Each listed column becomes an entry with raw weight `1.0`.
pub fn read_sparse_matrix<R: Read>(reader: R) -> Result<SparseGraph> {
    let text = read_text(reader)?;
    let mut toks = Tokens::new(&text);
    let (m, n) = toks.dims("SparseMatrix:")?;
    // `row <i>:` plus the `-1` terminator per row.
    toks.ensure_available(m, 3, "rows")?;
    let mut g = SparseGraph::new(m, n);
    for i in 0..m {
        toks.row_label(i)?;
        for j in 0.. {
            let ctx = format!("row {i} col {j}");
            let (line, tok) = toks.next(&ctx)?;
            let value: f64 = tok
                .parse()
                .map_err(|_| parse_error(&ctx, Some(line), &format!("expected a column index, found `{tok}`")))?;
            if value < 0.0 {
                break;
            }
            if value.fract() != 0.0 || value >= n as f64 {
                return Err(parse_error(&ctx, Some(line), &format!("invalid column index `{tok}`")));
            }
            g.append_entry(i, value as usize, 1.0)
                .map_err(|e| parse_error(&ctx, Some(line), &e.to_string()))?;
        }
    }
    Ok(g)
}

pub fn write_sparse_matrix<W: Write>(mut w: W, g: &SparseGraph) -> Result<()> {
    writeln!(w, "SparseMatrix: {} by {}", g.rows(), g.cols())?;
    for i in 0..g.rows() {
        write!(w, "row {i}: ")?;
        for e in g.entries(i) {
            write!(w, "{} ", e.col)?;
        }
        writeln!(w, "{ROW_END}")?;
    }
    Ok(())
}

pub fn read_vector<R: Read>(reader: R) -> Result<Vec<f64>> {
    let text = read_text(reader)?;
    let mut toks = Tokens::new(&text);
    toks.expect("Vector:", "dimension header")?;
    let dim = toks.next_usize("dimension header")?;
    toks.ensure_available(dim, 1, "entries")?;
    (0..dim).map(|i| toks.next_f64(&format!("entry {i}"))).collect()
}

pub fn write_vector<W: Write>(mut w: W, v: &[f64]) -> Result<()> {
    writeln!(w, "Vector: {}", v.len())?;
    for &x in v {
        write!(w, "{} ", format_g(x))?;
    }
    writeln!(w)?;
    Ok(())
}

pub fn load_sparse_matrix<P: AsRef<Path>>(path: P) -> Result<SparseGraph> {
    read_sparse_matrix(BufReader::new(File::open(path)?))
}

pub fn save_sparse_matrix<P: AsRef<Path>>(path: P, g: &SparseGraph) -> Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    write_sparse_matrix(&mut w, g)?;
    w.flush()?;
    Ok(())
}

pub fn load_dense_matrix<P: AsRef<Path>>(path: P) -> Result<DenseMatrix> {
    read_dense_matrix(BufReader::new(File::open(path)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_g_matches_c() {
        assert_eq!(format_g(0.0), "0");
        assert_eq!(format_g(1.0), "1");
        assert_eq!(format_g(0.5), "0.5");
        assert_eq!(format_g(1.0 / 3.0), "0.33333");
        assert_eq!(format_g(267.0), "267");
        assert_eq!(format_g(123456.0), "1.2346e+05");
        assert_eq!(format_g(0.0001), "0.0001");
        assert_eq!(format_g(0.00001234), "1.234e-05");
        assert_eq!(format_g(-2.5), "-2.5");
    }

    #[test]
    fn reads_sparse_rows_in_order() {
        let text = "SparseMatrix: 3 by 3\nrow 0: 2 1 -1\nrow 1: -1\nrow 2:\n 0\n -1\n";
        let g = read_sparse_matrix(text.as_bytes()).unwrap();
        assert_eq!(g.entries(0).map(|e| e.col).collect::<Vec<_>>(), vec![2, 1]);
        assert!(g.row_is_empty(1));
        assert_eq!(g.entries(2).map(|e| e.col).collect::<Vec<_>>(), vec![0]);
        assert!(!g.is_normalized());
    }

    #[test]
    fn sparse_errors_name_the_row() {
        let missing_end = "SparseMatrix: 2 by 2\nrow 0: 1 -1\nrow 1: 0";
        let err = read_sparse_matrix(missing_end.as_bytes()).unwrap_err();
        assert!(matches!(&err, Error::Parse { context, .. } if context.starts_with("row 1 col 1")));

        let bad_col = "SparseMatrix: 2 by 2\nrow 0: 5 -1\nrow 1: -1";
        let err = read_sparse_matrix(bad_col.as_bytes()).unwrap_err();
        assert!(format!("{err}").contains("row 0 col 0"));

        let bad_header = "Sparse: 2 by 2";
        let err = read_sparse_matrix(bad_header.as_bytes()).unwrap_err();
        assert!(format!("{err}").contains("dimension header"));

        let dup = "SparseMatrix: 2 by 2\nrow 0: 1 1 -1\nrow 1: -1";
        assert!(read_sparse_matrix(dup.as_bytes()).is_err());

        let skipped = "SparseMatrix: 2 by 2\nrow 1: -1\nrow 0: -1";
        let err = read_sparse_matrix(skipped.as_bytes()).unwrap_err();
        assert!(format!("{err}").contains("out of sequence"));
    }

    #[test]
    fn oversized_headers_are_parse_errors() {
        let huge_rows = "SparseMatrix: 18446744073709551615 by 3\nrow 0: -1\n";
        let err = read_sparse_matrix(huge_rows.as_bytes()).unwrap_err();
        assert!(matches!(&err, Error::Parse { context, .. } if context == "dimension header"));

        let huge_cols = "Matrix: 1 by 18446744073709551615\nrow 0: 1\n";
        let err = read_dense_matrix(huge_cols.as_bytes()).unwrap_err();
        assert!(matches!(&err, Error::Parse { context, .. } if context == "dimension header"));

        let huge_dense_rows = "Matrix: 18446744073709551615 by 2\nrow 0: 1 0\n";
        assert!(matches!(read_dense_matrix(huge_dense_rows.as_bytes()), Err(Error::Parse { .. })));

        let empty_wide = "Matrix: 0 by 18446744073709551615\n";
        let m = read_dense_matrix(empty_wide.as_bytes()).unwrap();
        assert_eq!(m.rows(), 0);

        let huge_vec = "Vector: 18446744073709551615\n0.5\n";
        assert!(matches!(read_vector(huge_vec.as_bytes()), Err(Error::Parse { .. })));
    }

    #[test]
    fn short_file_fails_before_row_parsing() {
        let text = "SparseMatrix: 4 by 4\nrow 0: 1 -1\n";
        let err = read_sparse_matrix(text.as_bytes()).unwrap_err();
        assert!(format!("{err}").contains("header claims 4 rows"));
    }

    #[test]
    fn writes_sparse_with_row_terminator() {
        let mut g = SparseGraph::square(2);
        g.append_entry(0, 1, 1.0).unwrap();
        let mut out = Vec::new();
        write_sparse_matrix(&mut out, &g).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "SparseMatrix: 2 by 2\nrow 0: 1 -1\nrow 1: -1\n");
    }

    #[test]
    fn dense_read_ignores_wrapping() {
        let text = "Matrix: 2 by 3\nrow 0: 0 1\n 1\nrow 1:\n0 0 0.5\n";
        let m = read_dense_matrix(text.as_bytes()).unwrap();
        assert_eq!(m.row(0), &[0.0, 1.0, 1.0]);
        assert_eq!(m.row(1), &[0.0, 0.0, 0.5]);

        let short = "Matrix: 1 by 3\nrow 0: 1 2";
        let err = read_dense_matrix(short.as_bytes()).unwrap_err();
        assert!(format!("{err}").contains("row 0 col 2"));
    }

    #[test]
    fn dense_write_wraps_long_rows() {
        let m = DenseMatrix::from_rows(vec![vec![1.0; 10]]).unwrap();
        let mut out = Vec::new();
        write_dense_matrix(&mut out, &m).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Matrix: 1 by 10");
        assert_eq!(lines[1], "row 0: 1 1 1 1 1 1 1 1 ");
        assert_eq!(lines[2], "1 1 ");
        assert_eq!(lines.len(), 3);
        assert_eq!(read_dense_matrix(text.as_bytes()).unwrap(), m);
    }

    #[test]
    fn vector_roundtrips_at_five_digits() {
        let v = vec![0.25, 0.5, 0.25];
        let mut out = Vec::new();
        write_vector(&mut out, &v).unwrap();
        assert_eq!(String::from_utf8(out.clone()).unwrap(), "Vector: 3\n0.25 0.5 0.25 \n");
        assert_eq!(read_vector(out.as_slice()).unwrap(), v);
        assert!(read_vector("Vector: 2\n1".as_bytes()).is_err());
    }
}
