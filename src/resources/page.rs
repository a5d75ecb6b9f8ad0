/// One page of a paginated collection.
///
/// Paginated routes are asked for one item more than the page size; the
/// extra item only signals that another page exists and is never exposed.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
  pub items: Vec<T>,
  pub has_more: bool,
}

impl<T> Default for Page<T> {
  fn default() -> Self {
    Self {
      items: Vec::new(),
      has_more: false,
    }
  }
}

impl<T> Page<T> {
  /// Build a page from a response fetched with [`request_limit`].
  ///
  /// Also correct when the server already truncated: a response with at
  /// most `limit` items simply reports no further page.
  pub fn from_overfetch(mut items: Vec<T>, limit: Option<u32>) -> Self {
    let Some(limit) = limit else {
      return Self {
        items,
        has_more: false,
      };
    };
    let limit = limit as usize;
    let has_more = items.len() > limit;
    items.truncate(limit);
    Self { items, has_more }
  }

  pub fn len(&self) -> usize {
    self.items.len()
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }
}

/// The `limit` to put on the wire for a caller-requested page size.
pub fn request_limit(limit: Option<u32>) -> Option<u32> {
  limit.map(|n| n.saturating_add(1))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_request_limit_adds_one() {
    assert_eq!(request_limit(Some(3)), Some(4));
    assert_eq!(request_limit(None), None);
  }

  #[test]
  fn test_overfetched_page_is_truncated() {
    let page = Page::from_overfetch(vec![1, 2, 3, 4], Some(3));
    assert_eq!(page.items, vec![1, 2, 3]);
    assert!(page.has_more);
  }

  #[test]
  fn test_exact_page_has_no_more() {
    let page = Page::from_overfetch(vec![1, 2, 3], Some(3));
    assert_eq!(page.items, vec![1, 2, 3]);
    assert!(!page.has_more);
  }

  #[test]
  fn test_unlimited_page_keeps_everything() {
    let page = Page::from_overfetch(vec![1, 2, 3, 4, 5], None);
    assert_eq!(page.len(), 5);
    assert!(!page.has_more);
  }
}
