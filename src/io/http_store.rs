use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::Serialize;

use crate::io::store::{ItemStore, TransportError};
use crate::model::{Item, ItemId, NewItem, OwnerId, ServerConfig};

/// `ItemStore` over the REST/JSON contract:
///
/// - `GET    {base}/todos?userId={owner}`
/// - `POST   {base}/todos`        body `{title, userId, completed}`
/// - `PATCH  {base}/todos/{id}`   body `{id, title, userId, completed}`
/// - `DELETE {base}/todos/{id}`
pub struct HttpItemStore {
    client: Client,
    base_url: String,
    owner_id: OwnerId,
}

impl HttpItemStore {
    pub fn new(
        base_url: &str,
        owner_id: OwnerId,
        timeout: Option<Duration>,
    ) -> Result<Self, TransportError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(HttpItemStore {
            client: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            owner_id,
        })
    }

    pub fn from_config(server: &ServerConfig, owner_id: OwnerId) -> Result<Self, TransportError> {
        Self::new(&server.base_url, owner_id, server.timeout())
    }

    fn collection_url(&self) -> String {
        format!("{}/todos", self.base_url)
    }

    fn item_url(&self, id: ItemId) -> String {
        format!("{}/todos/{}", self.base_url, id)
    }

    fn send(
        &self,
        method: &'static str,
        url: &str,
        request: RequestBuilder,
    ) -> Result<Response, TransportError> {
        tracing::debug!(method, url, "sending request");
        let response = request.send()?;
        let status = response.status();
        tracing::debug!(method, url, status = status.as_u16(), "response received");
        if !status.is_success() {
            return Err(TransportError::Status {
                method,
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }

    fn send_json<B: Serialize>(
        &self,
        method: &'static str,
        url: &str,
        request: RequestBuilder,
        body: &B,
    ) -> Result<Response, TransportError> {
        let bytes = serde_json::to_vec(body)?;
        let request = request
            .header(reqwest::header::CONTENT_TYPE, "application/json; charset=UTF-8")
            .body(bytes);
        self.send(method, url, request)
    }
}

impl ItemStore for HttpItemStore {
    fn owner_id(&self) -> OwnerId {
        self.owner_id
    }

    fn list(&self) -> Result<Vec<Item>, TransportError> {
        let url = self.collection_url();
        let request = self
            .client
            .get(&url)
            .query(&[("userId", self.owner_id.0)]);
        let body = self.send("GET", &url, request)?.bytes()?;
        Ok(serde_json::from_slice(&body)?)
    }

    fn create(&self, title: &str, completed: bool) -> Result<Item, TransportError> {
        let url = self.collection_url();
        let payload = NewItem {
            title: title.to_string(),
            owner_id: self.owner_id,
            completed,
        };
        let body = self
            .send_json("POST", &url, self.client.post(&url), &payload)?
            .bytes()?;
        Ok(serde_json::from_slice(&body)?)
    }

    fn update(&self, item: &Item) -> Result<Option<Item>, TransportError> {
        let url = self.item_url(item.id);
        let body = self
            .send_json("PATCH", &url, self.client.patch(&url), item)?
            .bytes()?;
        // Stores may acknowledge with an empty body or a partial object.
        Ok(serde_json::from_slice(&body).ok())
    }

    fn delete(&self, id: ItemId) -> Result<(), TransportError> {
        let url = self.item_url(id);
        self.send("DELETE", &url, self.client.delete(&url))?;
        Ok(())
    }
}
