use std::fmt;

/// Memory order of a dense matrix.
///
/// Hosts hand over buffers in either order, and element-wise kernels require
/// both operands to agree, so the layout travels with every matrix argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layout {
    /// C order: elements of a row are contiguous.
    RowMajor,
    /// Fortran order: elements of a column are contiguous.
    ColMajor,
}

impl Layout {
    /// Converts a layout ID (as used across the C boundary) to a `Layout`.
    ///
    /// Layout IDs: 0 => RowMajor, 1 => ColMajor.
    pub fn from_type_id(id: u32) -> Option<Layout> {
        match id {
            0 => Some(Layout::RowMajor),
            1 => Some(Layout::ColMajor),
            _ => None,
        }
    }

    /// Returns the layout ID for this `Layout`.
    pub fn to_type_id(&self) -> u32 {
        match self {
            Layout::RowMajor => 0,
            Layout::ColMajor => 1,
        }
    }

    /// Linear offset of element (`row`, `col`) in a `rows` x `cols` matrix
    /// stored in this layout.
    pub fn offset(&self, rows: usize, cols: usize, row: usize, col: usize) -> usize {
        match self {
            Layout::RowMajor => row * cols + col,
            Layout::ColMajor => col * rows + row,
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layout::RowMajor => write!(f, "row-major"),
            Layout::ColMajor => write!(f, "col-major"),
        }
    }
}
