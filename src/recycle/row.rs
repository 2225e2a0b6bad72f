// src/recycle/row.rs
//! Per-query structures recycled across result sets.

use zeroize::Zeroize;

/// Column metadata of one result-set field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Zeroize)]
pub struct FieldDescriptor {
    /// Table (or alias) the column belongs to
    pub table: String,
    /// Column name (or alias)
    pub name: String,
    /// Declared maximum display length
    pub length: u32,
    /// Column flag bits (NOT NULL, UNSIGNED, ...)
    pub flags: u16,
    /// Protocol column type code
    pub column_type: u8,
    /// Number of decimals for numeric types
    pub decimals: u8,
    /// Character set id
    pub charset: u8,
}

/// Scratch storage for the values of one result-set row.
///
/// Values are copied out of the stream buffer's aliased slices, so a row
/// stays valid after the next buffer call. All columns share one byte
/// vector; its capacity is reused across rows and, through the row pool,
/// across queries.
///
/// # Examples
///
/// ```
/// use duplexbuf::RowBuffer;
///
/// let mut row = RowBuffer::default();
/// row.push_value(b"1");
/// row.push_null();
/// row.push_value(b"alice");
///
/// assert_eq!(row.len(), 3);
/// assert_eq!(row.value(0), Some(&b"1"[..]));
/// assert!(row.is_null(1));
/// assert_eq!(row.value(2), Some(&b"alice"[..]));
/// ```
#[derive(Debug, Clone, Default, Zeroize)]
pub struct RowBuffer {
    /// Concatenated column bytes
    data: Vec<u8>,
    /// End offset of each column in `data`
    ends: Vec<usize>,
    /// NULL marker per column
    nulls: Vec<bool>,
    /// Set once the result set's end marker has been read
    exhausted: bool,
}

impl RowBuffer {
    /// Appends a column value.
    pub fn push_value(&mut self, value: &[u8]) {
        self.data.extend_from_slice(value);
        self.ends.push(self.data.len());
        self.nulls.push(false);
    }

    /// Appends a NULL column.
    pub fn push_null(&mut self) {
        self.ends.push(self.data.len());
        self.nulls.push(true);
    }

    /// Number of columns in the current row.
    #[inline]
    pub fn len(&self) -> usize {
        self.ends.len()
    }

    /// Returns `true` if the row holds no columns.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ends.is_empty()
    }

    /// Returns the bytes of column `index`, or `None` for NULL or an index
    /// out of range.
    pub fn value(&self, index: usize) -> Option<&[u8]> {
        if *self.nulls.get(index)? {
            return None;
        }
        let start = if index == 0 { 0 } else { self.ends[index - 1] };
        Some(&self.data[start..self.ends[index]])
    }

    /// Returns `true` if column `index` is NULL.
    pub fn is_null(&self, index: usize) -> bool {
        self.nulls.get(index).copied().unwrap_or(false)
    }

    /// Drops the current row's columns, keeping allocated capacity.
    pub fn clear_row(&mut self) {
        self.data.clear();
        self.ends.clear();
        self.nulls.clear();
    }

    /// Marks the result set as fully read.
    pub fn mark_exhausted(&mut self) {
        self.exhausted = true;
    }

    /// Returns `true` once the result set's end marker has been read.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_and_nulls() {
        let mut row = RowBuffer::default();
        row.push_null();
        row.push_value(b"");
        row.push_value(b"xyz");

        assert_eq!(row.value(0), None);
        assert!(row.is_null(0));
        assert_eq!(row.value(1), Some(&b""[..]));
        assert_eq!(row.value(2), Some(&b"xyz"[..]));
        assert_eq!(row.value(3), None);
        assert!(!row.is_null(3));
    }

    #[test]
    fn test_clear_row_keeps_exhausted_flag() {
        let mut row = RowBuffer::default();
        row.push_value(b"abc");
        row.mark_exhausted();
        row.clear_row();
        assert!(row.is_empty());
        assert!(row.is_exhausted());
    }

    #[test]
    fn test_zeroize_resets_everything() {
        let mut row = RowBuffer::default();
        row.push_value(b"secret");
        row.mark_exhausted();
        row.zeroize();
        assert!(row.is_empty());
        assert!(!row.is_exhausted());
        assert!(row.data.is_empty());
    }

    #[test]
    fn test_field_descriptor_zeroize() {
        let mut field = FieldDescriptor {
            table: "users".into(),
            name: "id".into(),
            length: 11,
            flags: 0x0003,
            column_type: 3,
            decimals: 0,
            charset: 63,
        };
        field.zeroize();
        assert_eq!(field, FieldDescriptor::default());
    }
}
