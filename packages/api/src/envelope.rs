//! The `{success, message, <payload>}` reply shape.
//!
//! The server answers refusals with `success: false` and a Korean `message`,
//! often with a 200 status, so the HTTP status is not consulted.
//! `/api/check-session` is the exception: it answers `{logged_in, user?}`.

use market::{MarketError, MarketResult, UserInfo};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct Envelope(Value);

impl Envelope {
    pub fn new(body: Value) -> Self {
        Self(body)
    }

    pub fn parse(text: &str) -> MarketResult<Self> {
        serde_json::from_str(text)
            .map(Self)
            .map_err(|e| MarketError::Transport(format!("response is not JSON: {e}")))
    }

    /// The body as an object, or the server's refusal.
    fn accepted(self) -> MarketResult<Map<String, Value>> {
        let Value::Object(map) = self.0 else {
            return Err(MarketError::Transport(format!("unexpected response: {}", self.0)));
        };
        if map.get("success").and_then(Value::as_bool) == Some(true) {
            return Ok(map);
        }
        let message = map.get("message").and_then(Value::as_str).map(str::to_string);
        Err(MarketError::rejected(message))
    }

    /// Decode the payload stored under `name`.
    pub fn field<T: DeserializeOwned>(self, name: &str) -> MarketResult<T> {
        let mut map = self.accepted()?;
        let value = map
            .remove(name)
            .ok_or_else(|| MarketError::Transport(format!("response has no `{name}` field")))?;
        serde_json::from_value(value).map_err(|e| MarketError::Transport(format!("bad `{name}` field: {e}")))
    }

    /// Success without a payload.
    pub fn done(self) -> MarketResult<()> {
        self.accepted().map(|_| ())
    }

    /// Success carrying only a confirmation message.
    pub fn message(self) -> MarketResult<Option<String>> {
        let map = self.accepted()?;
        Ok(map.get("message").and_then(Value::as_str).map(str::to_string))
    }

    /// Reply of `/api/check-session`.
    pub fn session(self) -> MarketResult<Option<UserInfo>> {
        #[derive(Deserialize)]
        struct SessionReply {
            #[serde(default)]
            logged_in: bool,
            #[serde(default)]
            user: Option<UserInfo>,
        }

        let reply: SessionReply = serde_json::from_value(self.0)
            .map_err(|e| MarketError::Transport(format!("bad session reply: {e}")))?;
        Ok(reply.user.filter(|_| reply.logged_in))
    }
}
