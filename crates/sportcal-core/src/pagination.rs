//! Page/offset arithmetic for event listings.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Fallback page and page size, fixed at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationDefaults {
  page:  u64,
  limit: u64,
}

impl PaginationDefaults {
  /// Both values must be positive.
  pub fn new(page: i64, limit: i64) -> Result<Self> {
    match (u64::try_from(page), u64::try_from(limit)) {
      (Ok(page), Ok(limit)) if page > 0 && limit > 0 => Ok(Self { page, limit }),
      _ => Err(Error::validation(format!(
        "pagination defaults must be positive (page={page}, limit={limit})"
      ))),
    }
  }

  pub fn page(&self) -> u64 { self.page }

  pub fn limit(&self) -> u64 { self.limit }
}

impl Default for PaginationDefaults {
  fn default() -> Self { Self { page: 1, limit: 10 } }
}

/// A normalised page request. `page` and `limit` are always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
  pub page:   u64,
  pub limit:  u64,
  pub offset: u64,
}

impl PageWindow {
  /// Replace absent or non-positive values with the defaults and derive the
  /// row offset.
  pub fn resolve(
    requested_page:  Option<i64>,
    requested_limit: Option<i64>,
    defaults:        PaginationDefaults,
  ) -> Self {
    let page = positive(requested_page).unwrap_or(defaults.page);
    let limit = positive(requested_limit).unwrap_or(defaults.limit);
    Self { page, limit, offset: (page - 1).saturating_mul(limit) }
  }
}

fn positive(value: Option<i64>) -> Option<u64> {
  value.and_then(|v| u64::try_from(v).ok()).filter(|v| *v > 0)
}

/// Listing metadata returned alongside a page of items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
  pub total_items:  u64,
  pub total_pages:  u64,
  pub current_page: u64,
  pub page_size:    u64,
}

impl Pagination {
  pub fn new(total_items: u64, window: PageWindow) -> Self {
    Self {
      total_items,
      total_pages: total_items.div_ceil(window.limit),
      current_page: window.page,
      page_size: window.limit,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn defaults() -> PaginationDefaults { PaginationDefaults::new(1, 10).unwrap() }

  #[test]
  fn unset_values_fall_back_to_defaults() {
    let w = PageWindow::resolve(None, None, defaults());
    assert_eq!(w, PageWindow { page: 1, limit: 10, offset: 0 });

    let w = PageWindow::resolve(Some(0), Some(0), defaults());
    assert_eq!(w, PageWindow { page: 1, limit: 10, offset: 0 });

    let w = PageWindow::resolve(Some(-3), Some(-1), defaults());
    assert_eq!(w, PageWindow { page: 1, limit: 10, offset: 0 });
  }

  #[test]
  fn offset_skips_previous_pages() {
    let w = PageWindow::resolve(Some(2), Some(10), defaults());
    assert_eq!(w.offset, 10);

    let w = PageWindow::resolve(Some(4), Some(7), defaults());
    assert_eq!(w.offset, 21);
  }

  #[test]
  fn total_pages_rounds_up() {
    let w = PageWindow::resolve(Some(1), Some(10), defaults());
    assert_eq!(Pagination::new(25, w).total_pages, 3);
    assert_eq!(Pagination::new(20, w).total_pages, 2);
    assert_eq!(Pagination::new(1, w).total_pages, 1);
  }

  #[test]
  fn empty_listing_has_zero_pages() {
    for (page, limit) in [(None, None), (Some(5), Some(3)), (Some(1), Some(100))] {
      let w = PageWindow::resolve(page, limit, defaults());
      let p = Pagination::new(0, w);
      assert_eq!(p.total_items, 0);
      assert_eq!(p.total_pages, 0);
      assert_eq!(p.current_page, w.page);
      assert_eq!(p.page_size, w.limit);
    }
  }

  #[test]
  fn defaults_must_be_positive() {
    assert!(PaginationDefaults::new(0, 10).is_err());
    assert!(PaginationDefaults::new(1, -5).is_err());
    assert_eq!(PaginationDefaults::new(2, 25).unwrap().limit(), 25);
  }
}
