use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::app::{HeraldError, Result};
use crate::domain::{Attachment, Post};
use crate::publisher::Publisher;

/// AT Protocol client speaking the three XRPC calls posting needs:
/// `createSession`, `uploadBlob`, and `createRecord`.
pub struct BlueskyPublisher {
    client: Client,
    service: String,
    session: Option<Session>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Session {
    access_jwt: String,
    did: String,
}

impl BlueskyPublisher {
    pub fn new(service: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("herald/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            service,
            session: None,
        })
    }

    fn xrpc(&self, method: &str) -> String {
        format!("{}/xrpc/{}", self.service.trim_end_matches('/'), method)
    }

    fn session(&self) -> Result<&Session> {
        self.session
            .as_ref()
            .ok_or_else(|| HeraldError::Auth("publish before login".into()))
    }

    /// Upload image bytes, returning the blob descriptor `createRecord`
    /// embeds by reference.
    async fn upload_blob(&self, bytes: &[u8]) -> Result<Value> {
        let session = self.session()?;

        let response = self
            .client
            .post(self.xrpc("com.atproto.repo.uploadBlob"))
            .bearer_auth(&session.access_jwt)
            .header(reqwest::header::CONTENT_TYPE, "image/jpeg")
            .body(bytes.to_vec())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(HeraldError::Publish(format!(
                "uploadBlob failed: {}",
                error_detail(response).await
            )));
        }

        let mut body: Value = response.json().await?;
        body.get_mut("blob")
            .map(Value::take)
            .ok_or_else(|| HeraldError::Publish("uploadBlob response missing blob".into()))
    }

    async fn build_embed(&self, attachment: &Attachment) -> Result<Option<Value>> {
        match attachment {
            Attachment::None => Ok(None),
            Attachment::Image { bytes, alt } => {
                let blob = self.upload_blob(bytes).await?;
                Ok(Some(json!({
                    "$type": "app.bsky.embed.images",
                    "images": [{ "alt": alt, "image": blob }],
                })))
            }
            Attachment::External {
                uri,
                title,
                description,
            } => Ok(Some(json!({
                "$type": "app.bsky.embed.external",
                "external": {
                    "uri": uri,
                    "title": title,
                    "description": description,
                },
            }))),
        }
    }
}

#[async_trait]
impl Publisher for BlueskyPublisher {
    async fn login(&mut self, handle: &str, password: &str) -> Result<()> {
        let response = self
            .client
            .post(self.xrpc("com.atproto.server.createSession"))
            .json(&json!({ "identifier": handle, "password": password }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(HeraldError::Auth(format!(
                "createSession failed for {}: {}",
                handle,
                error_detail(response).await
            )));
        }

        let session: Session = response.json().await?;
        tracing::debug!("Authenticated as {}", session.did);
        self.session = Some(session);
        Ok(())
    }

    async fn publish(&self, post: &Post) -> Result<()> {
        let embed = self.build_embed(&post.attachment).await?;
        let session = self.session()?;

        let mut record = json!({
            "$type": "app.bsky.feed.post",
            "text": post.text,
            "createdAt": Utc::now().to_rfc3339(),
        });
        if let Some(embed) = embed {
            record["embed"] = embed;
        }

        let response = self
            .client
            .post(self.xrpc("com.atproto.repo.createRecord"))
            .bearer_auth(&session.access_jwt)
            .json(&json!({
                "repo": session.did,
                "collection": "app.bsky.feed.post",
                "record": record,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(HeraldError::Publish(format!(
                "createRecord failed: {}",
                error_detail(response).await
            )));
        }

        Ok(())
    }
}

async fn error_detail(response: reqwest::Response) -> String {
    let status = response.status();
    match response.json::<Value>().await {
        Ok(body) => {
            let message = body
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown error");
            format!("{} ({})", message, status)
        }
        Err(_) => status.to_string(),
    }
}
