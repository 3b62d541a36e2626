use chrono::Local;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Hard cap on the encoded wire payload. The relay drops anything larger
/// instead of truncating it.
pub const MAX_DATAGRAM_LEN: usize = 1024;

/// Format of the `date` field on persisted documents.
pub const STORED_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// A missing field deserializes as empty and is rejected by `validated`,
/// the same as a present-but-blank one.
#[derive(Serialize, Deserialize)]
pub struct MessageForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub message: String,
}

impl MessageForm {
    /// Both fields must be non-empty after trimming. No length cap.
    pub fn validated(self) -> Option<(String, String)> {
        let username = self.username.trim();
        let message = self.message.trim();
        if username.is_empty() || message.is_empty() {
            return None;
        }
        Some((username.to_owned(), message.to_owned()))
    }
}

/// Wire payload, one UDP datagram per message. `timestamp` is stamped by the
/// sender and carried for reference only; the relay uses its own clock for
/// the persisted record.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct MessageDatagram {
    pub username: String,
    pub message: String,
    pub timestamp: String,
}

impl MessageDatagram {
    pub fn new(username: String, message: String) -> Self {
        Self {
            username,
            message,
            timestamp: Local::now().to_rfc3339(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct StoredMessage {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub date: String,
    pub username: String,
    pub message: String,
}

impl StoredMessage {
    /// `date` comes from the relay's clock at receipt time, never from the
    /// datagram, so a skewed or lying sender cannot forge it.
    pub fn from_datagram(datagram: MessageDatagram) -> Self {
        Self {
            id: None,
            date: Local::now().format(STORED_DATE_FORMAT).to_string(),
            username: datagram.username,
            message: datagram.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    #[test]
    fn form_trims_and_accepts_non_empty_fields() {
        let form = MessageForm {
            username: "  Ann ".to_string(),
            message: "Hello".to_string(),
        };
        let (username, message) = form.validated().unwrap();
        assert_eq!(username, "Ann");
        assert_eq!(message, "Hello");
    }

    #[test]
    fn form_rejects_blank_fields() {
        let form = MessageForm {
            username: "   ".to_string(),
            message: "Hi".to_string(),
        };
        assert!(form.validated().is_none());

        let form = MessageForm {
            username: "Ann".to_string(),
            message: String::new(),
        };
        assert!(form.validated().is_none());
    }

    #[test]
    fn form_decodes_with_fields_missing() {
        let form: MessageForm = serde_json::from_str(r#"{"message":"Hi"}"#).unwrap();
        assert_eq!(form.username, "");
        assert_eq!(form.message, "Hi");
        assert!(form.validated().is_none());
    }

    #[test]
    fn datagram_encodes_expected_fields() {
        let datagram = MessageDatagram::new("Ann".to_string(), "Hello".to_string());
        let value: serde_json::Value = serde_json::to_value(&datagram).unwrap();
        assert_eq!(value["username"], "Ann");
        assert_eq!(value["message"], "Hello");
        assert!(chrono::DateTime::parse_from_rfc3339(value["timestamp"].as_str().unwrap()).is_ok());
    }

    #[test]
    fn stored_message_keeps_fields_verbatim() {
        let datagram = MessageDatagram::new("Ann".to_string(), "Hello".to_string());
        let record = StoredMessage::from_datagram(datagram.clone());
        assert_eq!(record.username, datagram.username);
        assert_eq!(record.message, datagram.message);
        assert!(NaiveDateTime::parse_from_str(&record.date, STORED_DATE_FORMAT).is_ok());
    }

    #[test]
    fn unassigned_id_is_not_serialized() {
        let datagram = MessageDatagram::new("Ann".to_string(), "Hello".to_string());
        let record = StoredMessage::from_datagram(datagram);
        let value = serde_json::to_value(&record).unwrap();
        assert!(value.get("_id").is_none());
    }
}
