use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_sns::Client;

use super::{Notification, NotificationClient, NotificationError, NotificationTemplate};
use crate::types::params::NotificationArgs;

/// One SNS topic, addressed by ARN or by bare name. Name lookups go
/// through `list_topics` once and are cached for the process lifetime.
struct TopicHandle {
    identifier: String,
    cached_arn: OnceLock<String>,
}

impl TopicHandle {
    fn new(identifier: String) -> Self {
        Self { identifier, cached_arn: OnceLock::new() }
    }

    async fn arn(&self, client: &Client) -> Result<String, NotificationError> {
        if let Some(arn) = self.cached_arn.get() {
            return Ok(arn.clone());
        }

        let arn = if self.identifier.starts_with("arn:") {
            self.identifier.clone()
        } else {
            let resp = client
                .list_topics()
                .send()
                .await
                .map_err(|e| NotificationError::ListTopicsError(e.to_string()))?;
            resp.topics()
                .iter()
                .filter_map(|t| t.topic_arn())
                .find(|arn| arn.rsplit(':').next() == Some(self.identifier.as_str()))
                .map(str::to_string)
                .ok_or_else(|| NotificationError::TopicNotFound(self.identifier.clone()))?
        };

        let _ = self.cached_arn.set(arn.clone());
        Ok(arn)
    }
}

/// AWS SNS implementation of the notification gateway. The engine
/// publishes one JSON message per notification; the actual push/SMS/email
/// fan-out to individual workers is owned by downstream subscribers.
pub struct SNS {
    client: Arc<Client>,
    offer_topic: TopicHandle,
    admin_topic: TopicHandle,
}

impl SNS {
    pub(crate) fn new(aws_config: &SdkConfig, args: &NotificationArgs) -> Self {
        Self {
            client: Arc::new(Client::new(aws_config)),
            offer_topic: TopicHandle::new(args.offer_topic.clone()),
            admin_topic: TopicHandle::new(args.admin_topic.clone()),
        }
    }

    fn topic_for(&self, template: NotificationTemplate) -> &TopicHandle {
        match template {
            NotificationTemplate::OfferAvailable => &self.offer_topic,
            NotificationTemplate::EscalationExhausted => &self.admin_topic,
        }
    }
}

#[async_trait]
impl NotificationClient for SNS {
    async fn send(&self, notification: Notification) -> Result<(), NotificationError> {
        let topic_arn = self.topic_for(notification.template).arn(&self.client).await?;
        let message_body = serde_json::to_string(&notification)?;

        self.client
            .publish()
            .topic_arn(topic_arn)
            .message(message_body)
            .send()
            .await
            .map_err(|e| NotificationError::SendFailure(e.to_string()))?;
        Ok(())
    }
}
