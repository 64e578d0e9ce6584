//! Serializes an `OutgoingRequest` into HTTP/1.1 request bytes.

use serde::Serialize;
use tracing::{trace, warn};

use crate::config::FormEncodingPolicy;
use crate::error::ClientError;
use crate::http::OutgoingRequest;

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

#[derive(Debug, Clone)]
pub struct RequestEncoder {
    user_agent: String,
    form_encoding: FormEncodingPolicy,
}

impl RequestEncoder {
    pub fn new(user_agent: impl Into<String>, form_encoding: FormEncodingPolicy) -> Self {
        Self {
            user_agent: user_agent.into(),
            form_encoding,
        }
    }

    /// Produce the request line, the fixed headers, optional form headers,
    /// the blank line and the body, in that order.
    ///
    /// A form that encodes to nothing (no fields) sends no body and no
    /// content headers. A form that fails to encode is handled by the
    /// configured `FormEncodingPolicy`.
    pub fn encode<F>(&self, request: &OutgoingRequest<'_, F>) -> Result<Vec<u8>, ClientError>
    where
        F: Serialize + ?Sized,
    {
        let target = request.target;
        let mut head = format!("{} {} HTTP/1.1\r\n", request.method, target.path);
        head.push_str(&format!("Host: {}\r\n", target.host));
        head.push_str(&format!("User-Agent: {}\r\n", self.user_agent));
        head.push_str("Accept: */*\r\n");
        head.push_str("Connection: close\r\n");

        let body = match request.form {
            Some(form) => self.encode_form(form)?,
            None => None,
        };
        if let Some(body) = &body {
            head.push_str(&format!("Content-Type: {FORM_CONTENT_TYPE}\r\n"));
            head.push_str(&format!("Content-Length: {}\r\n", body.len()));
        }
        head.push_str("\r\n");

        let mut bytes = head.into_bytes();
        if let Some(body) = body {
            bytes.extend_from_slice(body.as_bytes());
        }
        trace!(method = %request.method, len = bytes.len(), "encoded request");
        Ok(bytes)
    }

    /// `Ok(None)` when there is nothing to send.
    fn encode_form<F>(&self, form: &F) -> Result<Option<String>, ClientError>
    where
        F: Serialize + ?Sized,
    {
        match serde_urlencoded::to_string(form) {
            Ok(body) if body.is_empty() => Ok(None),
            Ok(body) => Ok(Some(body)),
            Err(e) => match self.form_encoding {
                FormEncodingPolicy::Lenient => {
                    warn!(cause = %e, "form encoding failed, sending empty body");
                    Ok(Some(String::new()))
                }
                FormEncodingPolicy::Strict => Err(ClientError::FormEncoding { reason: e.to_string() }),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpMethod;
    use crate::url::ConnectionTarget;

    fn encoder() -> RequestEncoder {
        RequestEncoder::new("test-agent/1.0", FormEncodingPolicy::Lenient)
    }

    fn target() -> ConnectionTarget {
        ConnectionTarget::parse("http://example.com/submit").unwrap()
    }

    fn text(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn get_without_form_has_fixed_headers_only() {
        let target = target();
        let req: OutgoingRequest<'_> = OutgoingRequest { method: HttpMethod::Get, target: &target, form: None };
        assert_eq!(
            text(encoder().encode(&req).unwrap()),
            "GET /submit HTTP/1.1\r\n\
             Host: example.com\r\n\
             User-Agent: test-agent/1.0\r\n\
             Accept: */*\r\n\
             Connection: close\r\n\
             \r\n"
        );
    }

    #[test]
    fn post_with_form_adds_content_headers_and_body() {
        let target = target();
        let fields = vec![("a".to_string(), "1".to_string()), ("b".to_string(), "2".to_string())];
        let req = OutgoingRequest { method: HttpMethod::Post, target: &target, form: Some(fields.as_slice()) };
        let encoded = text(encoder().encode(&req).unwrap());

        assert!(encoded.starts_with("POST /submit HTTP/1.1\r\n"));
        assert!(encoded.contains("Content-Type: application/x-www-form-urlencoded\r\n"));
        assert!(encoded.contains("Content-Length: 7\r\n"));
        assert!(encoded.ends_with("\r\n\r\na=1&b=2"));
    }

    #[test]
    fn form_values_are_percent_encoded() {
        let target = target();
        let fields = vec![
            ("name".to_string(), "Jane Doe".to_string()),
            ("q".to_string(), "a&b=c/é".to_string()),
        ];
        let req = OutgoingRequest { method: HttpMethod::Post, target: &target, form: Some(fields.as_slice()) };
        let encoded = text(encoder().encode(&req).unwrap());
        let body = "name=Jane+Doe&q=a%26b%3Dc%2F%C3%A9";

        assert!(encoded.ends_with(body));
        assert!(encoded.contains(&format!("Content-Length: {}\r\n", body.len())));
    }

    #[test]
    fn empty_form_is_treated_as_no_body() {
        let target = target();
        let fields: Vec<(String, String)> = Vec::new();
        let req = OutgoingRequest { method: HttpMethod::Post, target: &target, form: Some(fields.as_slice()) };
        let encoded = text(encoder().encode(&req).unwrap());

        assert!(!encoded.contains("Content-Length"));
        assert!(encoded.ends_with("Connection: close\r\n\r\n"));
    }

    #[test]
    fn get_may_carry_a_form_body() {
        let target = target();
        let fields = vec![("k".to_string(), "v".to_string())];
        let req = OutgoingRequest { method: HttpMethod::Get, target: &target, form: Some(fields.as_slice()) };
        let encoded = text(encoder().encode(&req).unwrap());

        assert!(encoded.starts_with("GET /submit HTTP/1.1\r\n"));
        assert!(encoded.ends_with("Content-Length: 3\r\n\r\nk=v"));
    }

    #[test]
    fn struct_forms_are_encoded_in_field_order() {
        #[derive(Serialize)]
        struct Signup<'a> {
            name: &'a str,
            age: u32,
        }

        let target = target();
        let form = Signup { name: "Jane Doe", age: 42 };
        let req = OutgoingRequest { method: HttpMethod::Post, target: &target, form: Some(&form) };
        let encoded = text(encoder().encode(&req).unwrap());

        assert!(encoded.ends_with("Content-Length: 20\r\n\r\nname=Jane+Doe&age=42"));
    }

    #[test]
    fn lenient_policy_sends_empty_body_when_form_cannot_be_encoded() {
        let target = target();
        // nested sequences have no form-urlencoded representation
        let form = [("tags", vec!["a", "b"])];
        let req = OutgoingRequest { method: HttpMethod::Post, target: &target, form: Some(&form) };
        let encoded = text(encoder().encode(&req).unwrap());

        assert!(encoded.contains("Content-Type: application/x-www-form-urlencoded\r\n"));
        assert!(encoded.ends_with("Content-Length: 0\r\n\r\n"));
    }

    #[test]
    fn strict_policy_rejects_form_that_cannot_be_encoded() {
        let target = target();
        let form = [("tags", vec!["a", "b"])];
        let req = OutgoingRequest { method: HttpMethod::Post, target: &target, form: Some(&form) };
        let strict = RequestEncoder::new("test-agent/1.0", FormEncodingPolicy::Strict);

        let err = strict.encode(&req).unwrap_err();
        assert!(matches!(err, ClientError::FormEncoding { .. }));
    }

    #[test]
    fn top_level_scalar_is_not_a_form() {
        let target = target();
        let req = OutgoingRequest { method: HttpMethod::Post, target: &target, form: Some(&7u32) };
        let strict = RequestEncoder::new("test-agent/1.0", FormEncodingPolicy::Strict);

        assert!(matches!(strict.encode(&req).unwrap_err(), ClientError::FormEncoding { .. }));
        assert!(text(encoder().encode(&req).unwrap()).ends_with("Content-Length: 0\r\n\r\n"));
    }
}
