//! Endpoint descriptors, query parameter values and cache keys.
//!
//! A descriptor names a resource path plus a set of filter parameters. It
//! resolves to a wire request (params in insertion order) and to a
//! [`CacheKey`] (params sorted by name), so two descriptors that ask for the
//! same data share one cache entry no matter how they were built.

use std::collections::BTreeMap;
use std::fmt;

use url::form_urlencoded;

/// A scalar query parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
  Str(String),
  Int(i64),
  Float(f64),
  Bool(bool),
  /// Not set. Never serialized and never part of a cache key.
  Undefined,
}

impl ParamValue {
  /// Wire rendering of the value, or `None` for `Undefined`.
  ///
  /// Booleans become the literal strings `"true"` / `"false"`.
  pub fn render(&self) -> Option<String> {
    match self {
      Self::Str(s) => Some(s.clone()),
      Self::Int(n) => Some(n.to_string()),
      Self::Float(f) => Some(f.to_string()),
      Self::Bool(b) => Some(b.to_string()),
      Self::Undefined => None,
    }
  }

  pub fn is_defined(&self) -> bool {
    !matches!(self, Self::Undefined)
  }
}

impl From<&str> for ParamValue {
  fn from(value: &str) -> Self {
    Self::Str(value.to_string())
  }
}

impl From<String> for ParamValue {
  fn from(value: String) -> Self {
    Self::Str(value)
  }
}

impl From<bool> for ParamValue {
  fn from(value: bool) -> Self {
    Self::Bool(value)
  }
}

impl From<i32> for ParamValue {
  fn from(value: i32) -> Self {
    Self::Int(value.into())
  }
}

impl From<i64> for ParamValue {
  fn from(value: i64) -> Self {
    Self::Int(value)
  }
}

impl From<u32> for ParamValue {
  fn from(value: u32) -> Self {
    Self::Int(value.into())
  }
}

impl From<u64> for ParamValue {
  fn from(value: u64) -> Self {
    i64::try_from(value)
      .map(Self::Int)
      .unwrap_or_else(|_| Self::Str(value.to_string()))
  }
}

impl From<f64> for ParamValue {
  fn from(value: f64) -> Self {
    Self::Float(value)
  }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
  fn from(value: Option<T>) -> Self {
    value.map(Into::into).unwrap_or(Self::Undefined)
  }
}

/// HTTP method of a resolved request. Reads are all this layer issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
  #[default]
  Get,
}

impl From<Method> for reqwest::Method {
  fn from(method: Method) -> Self {
    match method {
      Method::Get => reqwest::Method::GET,
    }
  }
}

/// A request ready for the fetch executor: only defined params, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRequest {
  pub method: Method,
  pub path: String,
  pub query: Vec<(String, String)>,
}

impl ResolvedRequest {
  /// Path plus form-urlencoded query string, e.g. `/api/habits?activeOnly=true`.
  pub fn target(&self) -> String {
    if self.query.is_empty() {
      return self.path.clone();
    }
    let query = form_urlencoded::Serializer::new(String::new())
      .extend_pairs(self.query.iter())
      .finish();
    format!("{}?{}", self.path, query)
  }
}

/// A resource path plus its filter parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointDescriptor {
  path: String,
  params: Vec<(String, ParamValue)>,
}

impl EndpointDescriptor {
  pub fn new(path: impl Into<String>) -> Self {
    Self {
      path: path.into(),
      params: Vec::new(),
    }
  }

  /// Set a parameter. Setting a name twice replaces the earlier value in place.
  pub fn param(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
    let name = name.into();
    let value = value.into();
    match self.params.iter_mut().find(|(n, _)| *n == name) {
      Some((_, existing)) => *existing = value,
      None => self.params.push((name, value)),
    }
    self
  }

  pub fn path(&self) -> &str {
    &self.path
  }

  pub fn params(&self) -> &[(String, ParamValue)] {
    &self.params
  }

  /// Defined params in insertion order, rendered for the wire.
  fn defined(&self) -> impl Iterator<Item = (&str, String)> {
    self
      .params
      .iter()
      .filter_map(|(name, value)| value.render().map(|v| (name.as_str(), v)))
  }

  pub fn resolve(&self) -> ResolvedRequest {
    ResolvedRequest {
      method: Method::Get,
      path: self.path.clone(),
      query: self
        .defined()
        .map(|(name, value)| (name.to_string(), value))
        .collect(),
    }
  }

  pub fn request_target(&self) -> String {
    self.resolve().target()
  }

  pub fn cache_key(&self) -> CacheKey {
    let sorted: BTreeMap<&str, String> = self.defined().collect();
    let query = form_urlencoded::Serializer::new(String::new())
      .extend_pairs(sorted.iter().map(|(k, v)| (*k, v.as_str())))
      .finish();
    CacheKey(format!("{}?{}", self.path, query))
  }
}

/// Stable identity of a descriptor: path plus its defined params sorted by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for CacheKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_key_ignores_param_order() {
    let a = EndpointDescriptor::new("/api/habits")
      .param("frequency", "daily")
      .param("activeOnly", true);
    let b = EndpointDescriptor::new("/api/habits")
      .param("activeOnly", true)
      .param("frequency", "daily");
    assert_eq!(a.cache_key(), b.cache_key());
  }

  #[test]
  fn test_key_ignores_undefined_placement() {
    let a = EndpointDescriptor::new("/api/tasks/deleted")
      .param("page", None::<u32>)
      .param("limit", 5u32);
    let b = EndpointDescriptor::new("/api/tasks/deleted")
      .param("limit", 5u32)
      .param("frequency", ParamValue::Undefined);
    let c = EndpointDescriptor::new("/api/tasks/deleted").param("limit", 5u32);
    assert_eq!(a.cache_key(), b.cache_key());
    assert_eq!(b.cache_key(), c.cache_key());
  }

  #[test]
  fn test_key_differs_on_value() {
    let daily = EndpointDescriptor::new("/api/habits").param("frequency", "daily");
    let weekly = EndpointDescriptor::new("/api/habits").param("frequency", "weekly");
    assert_ne!(daily.cache_key(), weekly.cache_key());
  }

  #[test]
  fn test_undefined_does_not_collide_with_literal() {
    let unset = EndpointDescriptor::new("/api/habits").param("frequency", ParamValue::Undefined);
    let literal = EndpointDescriptor::new("/api/habits").param("frequency", "undefined");
    assert_ne!(unset.cache_key(), literal.cache_key());
    assert_eq!(unset.request_target(), "/api/habits");
  }

  #[test]
  fn test_separators_in_values_do_not_collide() {
    let a = EndpointDescriptor::new("/api/habits").param("frequency", "daily&activeOnly=true");
    let b = EndpointDescriptor::new("/api/habits")
      .param("frequency", "daily")
      .param("activeOnly", true);
    assert_ne!(a.cache_key(), b.cache_key());
  }

  #[test]
  fn test_key_differs_on_path() {
    let tasks = EndpointDescriptor::new("/api/tasks/deleted").param("limit", 3u32);
    let notes = EndpointDescriptor::new("/api/notes/deleted").param("limit", 3u32);
    assert_ne!(tasks.cache_key(), notes.cache_key());
  }

  #[test]
  fn test_request_keeps_insertion_order() {
    let d = EndpointDescriptor::new("/api/habits")
      .param("frequency", "daily")
      .param("activeOnly", true);
    assert_eq!(
      d.request_target(),
      "/api/habits?frequency=daily&activeOnly=true"
    );
  }

  #[test]
  fn test_param_replaces_in_place() {
    let d = EndpointDescriptor::new("/api/notes/deleted")
      .param("limit", 3u32)
      .param("page", 2u32)
      .param("limit", 4u32);
    assert_eq!(d.request_target(), "/api/notes/deleted?limit=4&page=2");
  }

  #[test]
  fn test_render_scalars() {
    assert_eq!(ParamValue::from(false).render().as_deref(), Some("false"));
    assert_eq!(ParamValue::from(42i64).render().as_deref(), Some("42"));
    assert_eq!(ParamValue::from(1.5).render().as_deref(), Some("1.5"));
    assert_eq!(ParamValue::from(None::<bool>).render(), None);
  }
}
