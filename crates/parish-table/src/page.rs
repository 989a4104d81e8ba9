//! Page sizes.

use std::fmt;

use crate::error::InvalidPageSize;

/// Rows per page. Only these three sizes are offered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PageSize {
    #[default]
    Ten,
    Fifteen,
    Twenty,
}

impl PageSize {
    pub const ALL: [PageSize; 3] = [PageSize::Ten, PageSize::Fifteen, PageSize::Twenty];

    pub fn get(&self) -> usize {
        match self {
            PageSize::Ten => 10,
            PageSize::Fifteen => 15,
            PageSize::Twenty => 20,
        }
    }
}

impl TryFrom<usize> for PageSize {
    type Error = InvalidPageSize;

    fn try_from(size: usize) -> Result<Self, Self::Error> {
        PageSize::ALL
            .into_iter()
            .find(|p| p.get() == size)
            .ok_or(InvalidPageSize(size))
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// Number of pages needed for `rows` rows, never less than one.
pub fn page_count(rows: usize, size: PageSize) -> usize {
    rows.div_ceil(size.get()).max(1)
}
