//! Request vocabulary shared by the fallback engine, the prompt builder and
//! the HTTP layer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The style of answer a caller asks Dobby for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseType {
    /// A simple explanation of the topic.
    #[default]
    Explain,
    /// A clean joke about the topic.
    Joke,
    /// A riddle with its answer.
    Riddle,
    /// A step-by-step walk through a problem.
    Solve,
}

impl ResponseType {
    /// Every response type, in declaration order.
    pub const ALL: [ResponseType; 4] = [
        ResponseType::Explain,
        ResponseType::Joke,
        ResponseType::Riddle,
        ResponseType::Solve,
    ];

    /// Wire name of the type (`"explain"`, `"joke"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            ResponseType::Explain => "explain",
            ResponseType::Joke => "joke",
            ResponseType::Riddle => "riddle",
            ResponseType::Solve => "solve",
        }
    }

    /// Lenient conversion used by the fallback engine: anything that is not
    /// an exact type name becomes [`ResponseType::Explain`].
    pub fn from_request(raw: &str) -> Self {
        raw.parse().unwrap_or_default()
    }
}

impl fmt::Display for ResponseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned by the strict parser when a type name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown response type '{0}'")]
pub struct UnknownResponseType(pub String);

impl FromStr for ResponseType {
    type Err = UnknownResponseType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "explain" => Ok(ResponseType::Explain),
            "joke" => Ok(ResponseType::Joke),
            "riddle" => Ok(ResponseType::Riddle),
            "solve" => Ok(ResponseType::Solve),
            other => Err(UnknownResponseType(other.to_string())),
        }
    }
}

/// Body of a successful `POST /api/chat` reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_parse_accepts_exact_names() {
        for kind in ResponseType::ALL {
            assert_eq!(kind.as_str().parse::<ResponseType>(), Ok(kind));
        }
    }

    #[test]
    fn test_strict_parse_rejects_unknown() {
        let err = "Joke".parse::<ResponseType>().unwrap_err();
        assert_eq!(err, UnknownResponseType("Joke".to_string()));
        assert!(err.to_string().contains("Joke"));
    }

    #[test]
    fn test_from_request_defaults_to_explain() {
        assert_eq!(ResponseType::from_request("bogus-type"), ResponseType::Explain);
        assert_eq!(ResponseType::from_request(""), ResponseType::Explain);
        assert_eq!(ResponseType::from_request("riddle"), ResponseType::Riddle);
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&ResponseType::Solve).unwrap();
        assert_eq!(json, "\"solve\"");
        let back: ResponseType = serde_json::from_str("\"joke\"").unwrap();
        assert_eq!(back, ResponseType::Joke);
    }
}
