//! Webhook request types

use crate::responder::InboundMessage;
use serde::Deserialize;

/// Form fields posted by the messaging provider. Everything else is ignored.
#[derive(Debug, Default, Deserialize)]
pub struct InboundForm {
    #[serde(rename = "Body", default)]
    pub body: String,
    #[serde(rename = "From", default)]
    pub from: String,
}

impl From<InboundForm> for InboundMessage {
    fn from(form: InboundForm) -> Self {
        Self {
            from: form.from,
            body: form.body,
        }
    }
}
