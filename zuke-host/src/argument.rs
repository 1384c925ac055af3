//! Step arguments: doc strings and tables

/// The multi-line argument attached to a step, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepArgument {
    /// A doc string block
    DocString(String),
    /// A table block, exactly as written
    Table(Table),
}

impl StepArgument {
    /// The doc string content, if this is a doc string
    pub fn doc_string(&self) -> Option<&str> {
        match self {
            StepArgument::DocString(s) => Some(s),
            StepArgument::Table(_) => None,
        }
    }

    /// The table, if this is a table
    pub fn table(&self) -> Option<&Table> {
        match self {
            StepArgument::Table(t) => Some(t),
            StepArgument::DocString(_) => None,
        }
    }
}

/// A table argument as it appears in the feature file: rows of cells, nothing more.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    /// Rows of cell values, in file order
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Create a table from rows of cells
    pub fn new<R, C, S>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|r| r.into_iter().map(Into::into).collect())
                .collect(),
        }
    }
}

/// The table handed to a runner: a header row plus data rows.
///
/// Row widths are not checked against the header. A ragged table is the parser's problem.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataTable {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl DataTable {
    /// Create an empty data table with the given header
    pub fn with_header(header: Vec<String>) -> Self {
        Self {
            header,
            rows: vec![],
        }
    }

    /// Build from a step's table argument. The first row becomes the header and every later row a
    /// data row, in order. A table with no rows yields `None`.
    pub fn from_table(table: &Table) -> Option<Self> {
        let (header, rows) = table.rows.split_first()?;
        let mut data = Self::with_header(header.clone());
        for row in rows {
            data.add_row(row.clone());
        }
        Some(data)
    }

    /// Append a data row
    pub fn add_row(&mut self, row: Vec<String>) -> &mut Self {
        self.rows.push(row);
        self
    }

    /// Column names
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Data rows, excluding the header
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Look up a cell by data row index and column name
    pub fn get(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.header.iter().position(|h| h == column)?;
        self.rows.get(row)?.get(idx).map(String::as_str)
    }
}
