//! Reply rendering for inbound messages
//!
//! Replies are composed in the operator's own mail client: the portal
//! renders the configured subject/body template against a message and
//! builds a `mailto:` URL. `[Name]` and `[Service]` placeholders are
//! substituted once each, matching the template contract.

use hubgate_domain::{ContactMessage, ReplyTemplate};
use serde::Serialize;

/// A rendered reply ready to hand to the mail client
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedReply {
    pub subject: String,
    pub body: String,
    /// Percent-encoded `mailto:` URL carrying subject and body
    pub mailto: String,
}

/// Render the reply template against one message.
///
/// The `[Service]` placeholder receives the message's services joined
/// with ", ", or a generic fallback when the sender named none.
#[must_use]
pub fn render_reply(template: &ReplyTemplate, message: &ContactMessage) -> RenderedReply {
    let service = if message.service_interest.is_empty() {
        "our services".to_string()
    } else {
        message.service_interest.join(", ")
    };

    let name = if message.name.is_empty() { "Client" } else { message.name.as_str() };

    let body = template.body.replacen("[Name]", name, 1).replacen("[Service]", &service, 1);
    let subject = template.subject.clone();

    let mailto = format!(
        "mailto:{}?subject={}&body={}",
        message.email,
        urlencoding::encode(&subject),
        urlencoding::encode(&body)
    );

    RenderedReply { subject, body, mailto }
}
