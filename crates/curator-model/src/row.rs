/// One data line of the source, decoded into column name / cell pairs.
///
/// Pairs keep header order and are stored exactly as read; trimming and
/// empty-key removal happen during normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// 1-based data row number (the header line is not counted).
    pub number: usize,
    fields: Vec<(String, String)>,
}

impl Row {
    pub fn new(number: usize) -> Self {
        Self {
            number,
            fields: Vec::new(),
        }
    }

    /// Builds a row from parallel header and cell slices.
    ///
    /// Missing trailing cells leave their columns out of the row; cells past
    /// the last header have no name and are dropped.
    pub fn from_record<H, C>(number: usize, headers: &[H], cells: &[C]) -> Self
    where
        H: AsRef<str>,
        C: AsRef<str>,
    {
        let fields = headers
            .iter()
            .zip(cells)
            .map(|(header, cell)| (header.as_ref().to_string(), cell.as_ref().to_string()))
            .collect();
        Self { number, fields }
    }

    pub fn push(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.fields.push((column.into(), value.into()));
    }

    pub fn with_field(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(column, value);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(column, value)| (column.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
