use serde::Deserialize;
use serde_json::Value;

use super::page::{request_limit, Page};
use super::{Resource, ResourceQuery};
use crate::api::api_types::NotificationsResponse;
use crate::api::types::Notification;
use crate::api::EndpointDescriptor;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationsParams {
  pub limit: Option<u32>,
  pub include_read: Option<bool>,
  pub include_dismissed: Option<bool>,
  pub skip_fetch: bool,
}

/// `GET /api/notifications` → `{ notifications: [...] }`
pub struct Notifications;

impl Resource for Notifications {
  type Params = NotificationsParams;
  type Output = Page<Notification>;

  const NAME: &'static str = "notifications";

  fn descriptor(params: &NotificationsParams) -> EndpointDescriptor {
    EndpointDescriptor::new("/api/notifications")
      .param("limit", request_limit(params.limit))
      .param("includeRead", params.include_read)
      .param("includeDismissed", params.include_dismissed)
  }

  fn skip_fetch(params: &NotificationsParams) -> bool {
    params.skip_fetch
  }

  fn adapt(
    params: &NotificationsParams,
    payload: &Value,
  ) -> Result<Page<Notification>, serde_json::Error> {
    let resp = NotificationsResponse::deserialize(payload)?;
    Ok(Page::from_overfetch(resp.notifications, params.limit))
  }
}

pub type NotificationsQuery = ResourceQuery<Notifications>;
