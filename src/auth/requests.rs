//! Request payloads
//!
//! Clients send loosely typed JSON. A string is used as-is and a number is
//! taken as serde_json renders it (`123456`, `1.5`, `1e21`); any other value
//! counts as absent.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Body of `POST /register`.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RegisterRequest {
    #[serde(default, deserialize_with = "loose_text")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub password: Option<String>,
    #[serde(default, rename = "deviceId", deserialize_with = "loose_text")]
    pub device_id: Option<String>,
}

/// Body of `POST /login`.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct LoginRequest {
    #[serde(default, deserialize_with = "loose_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub password: Option<String>,
    #[serde(default, rename = "deviceId", deserialize_with = "loose_text")]
    pub device_id: Option<String>,
}

fn loose_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_id_uses_camel_case_key() {
        let req: LoginRequest =
            serde_json::from_str(r#"{"email":"a@x.com","password":"secret1","deviceId":"dev-A"}"#)
                .unwrap();
        assert_eq!(req.device_id.as_deref(), Some("dev-A"));
    }

    #[test]
    fn numbers_become_text_and_other_values_are_absent() {
        let req: RegisterRequest = serde_json::from_str(
            r#"{"username":"alice","email":null,"password":123456,"deviceId":true}"#,
        )
        .unwrap();
        assert_eq!(req.username.as_deref(), Some("alice"));
        assert_eq!(req.email, None);
        assert_eq!(req.password.as_deref(), Some("123456"));
        assert_eq!(req.device_id, None);
    }

    #[test]
    fn number_text_follows_serde_json_rendering() {
        let req: LoginRequest =
            serde_json::from_str(r#"{"email":1.5,"password":1e21,"deviceId":-7}"#).unwrap();
        assert_eq!(req.email.as_deref(), Some("1.5"));
        assert_eq!(req.password.as_deref(), Some("1e21"));
        assert_eq!(req.device_id.as_deref(), Some("-7"));
    }

    #[test]
    fn missing_keys_default_to_none() {
        let req: RegisterRequest = serde_json::from_str("{}").unwrap();
        assert!(req.username.is_none() && req.device_id.is_none());
    }
}
