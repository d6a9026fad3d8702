//! Outbound notifications: DMs to every owner, plus the optional status channel.

use std::sync::Arc;

use async_trait::async_trait;
use serenity::builder::{CreateAttachment, CreateMessage};
use serenity::http::Http;
use serenity::model::id::{ChannelId, UserId};
use tracing::{info, warn};

/// A PNG (or any file) attached to a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub bytes: Vec<u8>,
    pub filename: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub content: String,
    pub attachment: Option<Attachment>,
    /// Guild channel that receives a copy, taken from the `channel_id` setting.
    pub channel: Option<u64>,
}

impl Notification {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            attachment: None,
            channel: None,
        }
    }

    pub fn with_attachment(mut self, bytes: Vec<u8>, filename: impl Into<String>) -> Self {
        self.attachment = Some(Attachment {
            bytes,
            filename: filename.into(),
        });
        self
    }

    pub fn with_channel(mut self, channel: Option<u64>) -> Self {
        self.channel = channel;
        self
    }

    fn to_message(&self) -> CreateMessage {
        let message = CreateMessage::new().content(&self.content);
        match &self.attachment {
            Some(a) => message.add_file(CreateAttachment::bytes(a.bytes.clone(), a.filename.clone())),
            None => message,
        }
    }
}

#[async_trait]
pub trait OwnerNotifier: Send + Sync {
    /// Delivers to every recipient. Per-recipient failures are logged, never returned.
    async fn notify(&self, notification: Notification);
}

pub struct DiscordNotifier {
    http: Arc<Http>,
    owners: Vec<UserId>,
}

impl DiscordNotifier {
    pub fn new(http: Arc<Http>, owners: Vec<UserId>) -> Self {
        Self { http, owners }
    }
}

#[async_trait]
impl OwnerNotifier for DiscordNotifier {
    async fn notify(&self, notification: Notification) {
        let mut delivered = 0usize;
        for owner in &self.owners {
            let sent = match owner.create_dm_channel(&self.http).await {
                Ok(dm) => dm
                    .send_message(&self.http, notification.to_message())
                    .await
                    .map(|_| ()),
                Err(e) => Err(e),
            };
            match sent {
                Ok(()) => delivered += 1,
                Err(e) => {
                    warn!(target = "notify.dm", owner = owner.get(), error = %e, "failed to DM owner")
                }
            }
        }
        if let Some(channel) = notification.channel.map(ChannelId::new)
            && let Err(e) = channel
                .send_message(&self.http, notification.to_message())
                .await
        {
            warn!(target = "notify.channel", channel = channel.get(), error = %e, "failed to post to status channel");
        }
        info!(target = "notify", delivered, owners = self.owners.len(), "owners notified");
    }
}
