use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

use crate::domain::ports::{AttachmentData, Notifier};
use crate::utils::error::{OpsError, Result};

/// Notifier backed by a blocking SMTP relay session.
pub struct SmtpNotifier {
    transport: SmtpTransport,
    sender: Mailbox,
}

impl SmtpNotifier {
    pub fn new(
        relay: &str,
        port: u16,
        sender: &str,
        username: &str,
        password: &str,
    ) -> Result<Self> {
        let credentials = Credentials::new(username.to_string(), password.to_string());
        let transport = SmtpTransport::relay(relay)?
            .port(port)
            .credentials(credentials)
            .build();

        Ok(Self {
            transport,
            sender: sender.parse()?,
        })
    }
}

impl Notifier for SmtpNotifier {
    fn send(
        &mut self,
        recipient: &str,
        subject: &str,
        body: &str,
        attachment: Option<AttachmentData>,
    ) -> Result<()> {
        let builder = Message::builder()
            .from(self.sender.clone())
            .to(recipient.parse()?)
            .subject(subject);

        let message = match attachment {
            Some(data) => {
                let content_type = ContentType::parse("application/octet-stream")
                    .map_err(|e| OpsError::ProcessingError {
                        message: format!("attachment content type: {}", e),
                    })?;
                builder.multipart(
                    MultiPart::mixed()
                        .singlepart(SinglePart::plain(body.to_string()))
                        .singlepart(Attachment::new(data.filename).body(data.content, content_type)),
                )?
            }
            None => builder
                .header(ContentType::TEXT_PLAIN)
                .body(body.to_string())?,
        };

        self.transport.send(&message)?;
        tracing::debug!("Delivered message to {}", recipient);
        Ok(())
    }
}
