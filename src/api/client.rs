//! HTTP client for the chat server's REST API.
//!
//! Every request authenticates with HTTP basic auth (email + API key) and
//! goes to `{realm}/api/v1/{path}`. Bodies are form-encoded; list and object
//! parameters are JSON strings inside the form, as the server expects.

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;

use super::service::{ApiError, MessageApi};
use super::types::{
    ApiResponse, MessagesQuery, MessagesResponse, RawContentResponse, SubscriptionProperty, op,
};
use crate::core::message::{Auth, Message};

pub struct ZulipClient {
    client: reqwest::Client,
}

impl Default for ZulipClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ZulipClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    fn request(&self, method: Method, auth: &Auth, path: &str) -> RequestBuilder {
        let url = format!("{}/api/v1/{}", auth.realm.trim_end_matches('/'), path);
        debug!("{} {}", method, url);
        self.client
            .request(method, url)
            .basic_auth(&auth.email, Some(&auth.api_key))
    }

    /// Sends a request and decodes the body, mapping every failure mode to
    /// an `ApiError`.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let envelope = serde_json::from_str::<ApiResponse>(&body);
        if !status.is_success() {
            let message = envelope.map(|env| env.msg).unwrap_or(body);
            warn!("API error: {} - {}", status, message);
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }
        if let Ok(env) = &envelope
            && env.is_error()
        {
            warn!("API returned error result: {}", env.msg);
            return Err(ApiError::Api {
                status: status.as_u16(),
                message: env.msg.clone(),
            });
        }

        serde_json::from_str(&body).map_err(|e| ApiError::Parse(e.to_string()))
    }

    async fn send_ok(&self, request: RequestBuilder) -> Result<(), ApiError> {
        self.send::<ApiResponse>(request).await.map(|_| ())
    }

    async fn set_topic_muted(&self, auth: &Auth, stream: &str, topic: &str, muted: bool) -> Result<(), ApiError> {
        info!("Setting topic {}/{} muted={}", stream, topic, muted);
        let request = self
            .request(Method::PATCH, auth, "users/me/subscriptions/muted_topics")
            .form(&[("stream", stream), ("topic", topic), ("op", op(muted))]);
        self.send_ok(request).await
    }
}

#[async_trait]
impl MessageApi for ZulipClient {
    async fn get_message_content(&self, auth: &Auth, message_id: u64) -> Result<String, ApiError> {
        let request = self.request(Method::GET, auth, &format!("messages/{message_id}"));
        let response: RawContentResponse = self.send(request).await?;
        Ok(response.raw_content)
    }

    async fn delete_message(&self, auth: &Auth, message_id: u64) -> Result<(), ApiError> {
        info!("Deleting message {}", message_id);
        let request = self.request(Method::DELETE, auth, &format!("messages/{message_id}"));
        self.send_ok(request).await
    }

    async fn mute_topic(&self, auth: &Auth, stream: &str, topic: &str) -> Result<(), ApiError> {
        self.set_topic_muted(auth, stream, topic, true).await
    }

    async fn unmute_topic(&self, auth: &Auth, stream: &str, topic: &str) -> Result<(), ApiError> {
        self.set_topic_muted(auth, stream, topic, false).await
    }

    async fn toggle_mute_stream(&self, auth: &Auth, stream_id: u64, muted: bool) -> Result<(), ApiError> {
        info!("Setting stream {} muted={}", stream_id, muted);
        let data = serde_json::to_string(&[SubscriptionProperty {
            stream_id,
            property: "is_muted",
            value: muted,
        }])
        .map_err(|e| ApiError::Parse(e.to_string()))?;
        let request = self
            .request(Method::POST, auth, "users/me/subscriptions/properties")
            .form(&[("subscription_data", data)]);
        self.send_ok(request).await
    }

    async fn toggle_message_starred(
        &self,
        auth: &Auth,
        message_ids: &[u64],
        starred: bool,
    ) -> Result<(), ApiError> {
        info!("Setting starred={} on {:?}", starred, message_ids);
        let messages = serde_json::to_string(message_ids).map_err(|e| ApiError::Parse(e.to_string()))?;
        let request = self.request(Method::POST, auth, "messages/flags").form(&[
            ("messages", messages.as_str()),
            ("op", op(starred)),
            ("flag", "starred"),
        ]);
        self.send_ok(request).await
    }

    async fn get_messages(&self, auth: &Auth, query: &MessagesQuery) -> Result<Vec<Message>, ApiError> {
        let narrow = serde_json::to_string(&query.narrow.to_terms())
            .map_err(|e| ApiError::Parse(e.to_string()))?;
        let request = self.request(Method::GET, auth, "messages").query(&[
            ("narrow", narrow),
            ("anchor", query.anchor.to_string()),
            ("num_before", query.num_before.to_string()),
            ("num_after", query.num_after.to_string()),
            ("apply_markdown", "true".to_string()),
            ("use_first_unread_anchor", query.use_first_unread_anchor.to_string()),
        ]);
        let response: MessagesResponse = self.send(request).await?;
        info!("Fetched {} messages", response.messages.len());
        Ok(response.messages)
    }
}
