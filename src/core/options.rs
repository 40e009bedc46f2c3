//! Engine options

/// Options shared by the structural operations
#[derive(Debug, Clone, PartialEq)]
pub struct GridOptions {
    /// Fraction digits used when writing width percentages
    pub precision: usize,
    /// Separator placed between the contents of merged cells
    pub line_separator: String,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            precision: 10,
            line_separator: "<br/>".to_string(),
        }
    }
}

impl GridOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_precision(precision: usize) -> Self {
        Self {
            precision,
            ..Default::default()
        }
    }

    pub fn line_separator(mut self, separator: impl Into<String>) -> Self {
        self.line_separator = separator.into();
        self
    }

    /// Format a percentage value, e.g. `50.00%`
    pub fn format_percent(&self, value: f64) -> String {
        format!("{:.*}%", self.precision, value)
    }
}
