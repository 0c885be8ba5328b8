//! Paging: what a caller asks for ([`PageRequest`]) and what it gets back
//! ([`Page`]).

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};

use crate::{Error, Result};

/// Page size used when the caller does not pass one.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Larger requested sizes are clamped to this.
pub const MAX_PAGE_SIZE: u32 = 2000;

// ─── Sort ────────────────────────────────────────────────────────────────────

/// Employee properties a listing may be ordered by, spelled as on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr)]
#[strum(serialize_all = "camelCase")]
pub enum SortField {
  Id,
  FirstName,
  LastName,
  Email,
  DepartmentId,
  Position,
  Salary,
  HireDate,
  CreatedAt,
  UpdatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Direction {
  #[default]
  Asc,
  Desc,
}

/// A single ordering key. Stores always break ties by `id` ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
  pub field:     SortField,
  pub direction: Direction,
}

impl FromStr for Sort {
  type Err = Error;

  /// Parses `field` or `field,direction`, e.g. `lastName,desc`.
  fn from_str(s: &str) -> Result<Self> {
    let (field, direction) = match s.split_once(',') {
      Some((f, d)) => (f.trim(), Some(d.trim())),
      None => (s.trim(), None),
    };
    let field = SortField::from_str(field)
      .map_err(|_| Error::invalid("sort", format!("unknown sort property {field:?}")))?;
    let direction = match direction {
      Some(d) => Direction::from_str(d)
        .map_err(|_| Error::invalid("sort", format!("unknown sort direction {d:?}")))?,
      None => Direction::default(),
    };
    Ok(Sort { field, direction })
  }
}

// ─── PageRequest ─────────────────────────────────────────────────────────────

/// A zero-based page window plus an optional ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
  pub page: u32,
  /// Always in `1..=MAX_PAGE_SIZE`.
  pub size: u32,
  pub sort: Option<Sort>,
}

impl Default for PageRequest {
  fn default() -> Self {
    Self { page: 0, size: DEFAULT_PAGE_SIZE, sort: None }
  }
}

impl PageRequest {
  pub fn new(page: u32, size: u32) -> Self {
    Self { page, size: size.clamp(1, MAX_PAGE_SIZE), sort: None }
  }

  pub fn sorted(mut self, sort: Sort) -> Self {
    self.sort = Some(sort);
    self
  }

  /// Build a request from raw query-string values, applying defaults.
  pub fn from_query(
    page: Option<i64>,
    size: Option<i64>,
    sort: Option<&str>,
  ) -> Result<Self> {
    let page = match page {
      None => 0,
      Some(p) if p < 0 => {
        return Err(Error::invalid("page", "must be greater than or equal to 0"));
      }
      Some(p) => u32::try_from(p)
        .map_err(|_| Error::invalid("page", "is too large"))?,
    };
    let size = match size {
      None => DEFAULT_PAGE_SIZE,
      Some(s) if s < 1 => {
        return Err(Error::invalid("size", "must be greater than or equal to 1"));
      }
      Some(s) => s.min(i64::from(MAX_PAGE_SIZE)) as u32,
    };
    let request = Self { page, size, sort: None };
    match sort.filter(|s| !s.trim().is_empty()) {
      Some(s) => Ok(request.sorted(s.parse()?)),
      None => Ok(request),
    }
  }

  /// Number of records preceding this page.
  pub fn offset(&self) -> u64 { u64::from(self.page) * u64::from(self.size) }
}

// ─── Page ────────────────────────────────────────────────────────────────────

/// One window of an ordered result set plus navigation metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
  pub content:        Vec<T>,
  pub total_elements: u64,
  pub total_pages:    u64,
  pub page_number:    u32,
  pub page_size:      u32,
}

impl<T> Page<T> {
  pub fn new(content: Vec<T>, total_elements: u64, request: &PageRequest) -> Self {
    Self {
      content,
      total_elements,
      total_pages: total_elements.div_ceil(u64::from(request.size)),
      page_number: request.page,
      page_size: request.size,
    }
  }
}
