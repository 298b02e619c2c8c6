//! TwiML response envelope

use crate::responder::Reply;
use axum::{
    http::header,
    response::{IntoResponse, Response},
};
use quick_xml::escape::partial_escape;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Render a reply as a TwiML document.
///
/// Message text is escaped for `<`, `>` and `&` only; quotes are legal in
/// element content.
pub fn render(reply: &Reply) -> String {
    match reply {
        Reply::Message(text) => format!(
            "{XML_DECLARATION}<Response><Message>{}</Message></Response>",
            partial_escape(text.as_str())
        ),
        Reply::Silent => format!("{XML_DECLARATION}<Response/>"),
    }
}

/// `application/xml` response wrapping a rendered reply
pub struct Twiml(pub Reply);

impl IntoResponse for Twiml {
    fn into_response(self) -> Response {
        ([(header::CONTENT_TYPE, "application/xml")], render(&self.0)).into_response()
    }
}
