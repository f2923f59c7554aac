use actix_web::cookie::Cookie;
use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, HttpResponseBuilder};
use percent_encoding::{NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use strum::{Display, EnumString};

/// Cookie carrying the one-shot message across a redirect.
pub const FLASH_COOKIE: &str = "_flash";

/// Longest user text quoted in a message; keeps the cookie well under 4 KB
/// even when every character is percent-encoded.
pub const MAX_QUOTED_CHARS: usize = 100;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Error,
    Warning,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FlashMessage {
    pub level: FlashLevel,
    pub message: String,
}

impl FlashMessage {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Error,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Warning,
            message: message.into(),
        }
    }
}

/// `level:message`, percent-encoded so the cookie value stays plain ASCII.
pub fn encode(flash: &FlashMessage) -> String {
    let raw = format!("{}:{}", flash.level, flash.message);
    utf8_percent_encode(&raw, NON_ALPHANUMERIC).to_string()
}

pub fn decode(value: &str) -> Option<FlashMessage> {
    let raw = percent_decode_str(value).decode_utf8().ok()?;
    let (level, message) = raw.split_once(':')?;

    Some(FlashMessage {
        level: level.parse().ok()?,
        message: message.to_string(),
    })
}

/// Pending message from the previous response, if any.
pub fn take(req: &HttpRequest) -> Option<FlashMessage> {
    req.cookie(FLASH_COOKIE)
        .and_then(|cookie| decode(cookie.value()))
}

/// Whether the request carries a flash cookie, readable or not.
pub fn is_pending(req: &HttpRequest) -> bool {
    req.cookie(FLASH_COOKIE).is_some()
}

/// Cut user text down to `MAX_QUOTED_CHARS` characters for use in a message.
pub fn quote(text: &str) -> String {
    match text.char_indices().nth(MAX_QUOTED_CHARS) {
        Some((end, _)) => format!("{}…", &text[..end]),
        None => text.to_string(),
    }
}

/// Expire the flash cookie once its message has been shown.
pub fn clear(builder: &mut HttpResponseBuilder) -> &mut HttpResponseBuilder {
    let mut cookie = Cookie::new(FLASH_COOKIE, "");
    cookie.set_path("/");
    cookie.make_removal();
    builder.cookie(cookie)
}

/// 303 redirect that carries `flash` to the next page.
pub fn redirect(location: &str, flash: FlashMessage) -> HttpResponse {
    let mut cookie = Cookie::new(FLASH_COOKIE, encode(&flash));
    cookie.set_path("/");
    cookie.set_http_only(true);

    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .cookie(cookie)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_is_cookie_safe() {
        let flash = FlashMessage::success("Attendance marked for Bob, Jr.; welcome!");
        let encoded = encode(&flash);

        assert!(encoded.chars().all(|c| c.is_ascii_alphanumeric() || c == '%'));
        assert_eq!(decode(&encoded), Some(flash));
    }

    #[test]
    fn test_decode_keeps_colons_in_message() {
        let flash = FlashMessage::error("Error marking attendance: disk full");
        assert_eq!(decode(&encode(&flash)), Some(flash));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert_eq!(decode("no-separator"), None);
        assert_eq!(decode("shout%3Ahello"), None);
    }

    #[test]
    fn test_quote_truncates_long_text() {
        assert_eq!(quote("Alice"), "Alice");

        let long = "é".repeat(MAX_QUOTED_CHARS + 50);
        let quoted = quote(&long);
        assert_eq!(quoted.chars().count(), MAX_QUOTED_CHARS + 1);
        assert!(quoted.ends_with('…'));

        let flash = FlashMessage::success(format!("Attendance marked for {quoted}!"));
        assert!(encode(&flash).len() < 4096);
    }

    #[test]
    fn test_level_names() {
        assert_eq!(FlashLevel::Warning.to_string(), "warning");
        assert_eq!("error".parse::<FlashLevel>().unwrap(), FlashLevel::Error);
    }
}
