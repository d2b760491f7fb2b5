//! Notifications resource client.

use std::sync::Arc;

use crate::client::RequestExecutor;
use crate::error::ApiError;
use crate::method::RestMethod;
use crate::middleware::{ContextTag, MiddlewareStack};
use crate::models::{MarkAllReadReceipt, Notification, NotificationListParams, Page};
use crate::request::RequestConfig;
use crate::response::ClientResponse;
use crate::schema::{JsonOf, NoContent, Validate};

/// Client for the notifications resource.
#[derive(Debug)]
pub struct NotificationsClient {
    exec: Arc<RequestExecutor>,
    middleware: MiddlewareStack,
}

impl NotificationsClient {
    pub(crate) fn new(exec: Arc<RequestExecutor>) -> Self {
        let middleware = MiddlewareStack::builder()
            .with(ContextTag::new("notifications"))
            .build();
        Self { exec, middleware }
    }

    fn config(&self) -> RequestConfig {
        RequestConfig::new().middleware(self.middleware.clone())
    }

    /// Lists notifications, paginated, newest first.
    pub async fn list(
        &self,
        params: &NotificationListParams,
    ) -> Result<ClientResponse<Page<Notification>>, ApiError> {
        params.check()?;
        let config = self
            .config()
            .query_opt("page", params.page)
            .query_opt("page_size", params.page_size)
            .query_opt("unread_only", params.unread_only);
        self.exec
            .execute(
                RestMethod::Get,
                "/notifications/",
                config,
                &JsonOf::<Page<Notification>>::new(),
            )
            .await
    }

    /// Reads a single notification.
    pub async fn read(&self, id: &str) -> Result<ClientResponse<Notification>, ApiError> {
        let config = self.config().path_param("id", id);
        self.exec
            .execute(
                RestMethod::Get,
                "/notifications/{id}/",
                config,
                &JsonOf::<Notification>::new(),
            )
            .await
    }

    /// Deletes a notification.
    pub async fn delete(&self, id: &str) -> Result<ClientResponse<()>, ApiError> {
        let config = self.config().path_param("id", id);
        self.exec
            .execute(
                RestMethod::Delete,
                "/notifications/{id}/",
                config,
                &NoContent,
            )
            .await
    }

    /// Marks one notification as read.
    pub async fn mark_read(&self, id: &str) -> Result<ClientResponse<Notification>, ApiError> {
        let config = self.config().path_param("id", id);
        self.exec
            .execute(
                RestMethod::Post,
                "/notifications/{id}/mark-read/",
                config,
                &JsonOf::<Notification>::new(),
            )
            .await
    }

    /// Marks every unread notification as read.
    pub async fn mark_all_read(&self) -> Result<ClientResponse<MarkAllReadReceipt>, ApiError> {
        self.exec
            .execute(
                RestMethod::Post,
                "/notifications/mark-all-read/",
                self.config(),
                &JsonOf::<MarkAllReadReceipt>::new(),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    #[tokio::test]
    async fn test_list_rejects_oversized_page_before_network() {
        let base_url = Url::parse("http://127.0.0.1:9").unwrap();
        let client = NotificationsClient::new(Arc::new(RequestExecutor::new(base_url).unwrap()));
        let params = NotificationListParams {
            page_size: Some(500),
            ..Default::default()
        };
        let err = client.list(&params).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }
}
