//! User profile as returned by the portal API

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::options::Messages;

/// Server-defined record. Nothing is required; unknown fields are kept.
///
/// A known field holding a value of another type is left in `extra`
/// under its own key instead of failing the whole record.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl<'de> Deserialize<'de> for UserProfile {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut extra = serde_json::Map::deserialize(deserializer)?;
        Ok(Self {
            id: take_field(&mut extra, "id"),
            username: take_field(&mut extra, "username"),
            role: take_field(&mut extra, "role"),
            email: take_field(&mut extra, "email"),
            last_login: take_field(&mut extra, "last_login"),
            extra,
        })
    }
}

fn take_field<T: DeserializeOwned>(
    fields: &mut serde_json::Map<String, serde_json::Value>,
    key: &str,
) -> Option<T> {
    let value = fields.remove(key)?;
    if value.is_null() {
        return None;
    }
    match T::deserialize(&value) {
        Ok(typed) => Some(typed),
        Err(_) => {
            fields.insert(key.to_string(), value);
            None
        }
    }
}

/// What the UI shows for the signed-in user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayIdentity {
    pub name: String,
    pub role: String,
    pub avatar: String,
}

impl DisplayIdentity {
    pub fn from_user(user: Option<&UserProfile>, messages: &Messages) -> Self {
        let name = non_empty(user.and_then(|u| u.username.as_deref()))
            .unwrap_or(messages.default_username.as_str())
            .to_string();
        let role = non_empty(user.and_then(|u| u.role.as_deref()))
            .unwrap_or(messages.default_role.as_str())
            .to_string();
        let avatar = name
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect::<String>())
            .unwrap_or_else(|| messages.default_avatar.clone());

        Self { name, role, avatar }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_profile_with_extra_fields() {
        let profile: UserProfile = serde_json::from_str(
            r#"{"id": 7, "username": "ali", "role": "manager", "email": null, "groups": [1, 2]}"#,
        )
        .unwrap();

        assert_eq!(profile.id, Some(7));
        assert_eq!(profile.username.as_deref(), Some("ali"));
        assert_eq!(profile.email, None);
        assert_eq!(profile.extra["groups"], serde_json::json!([1, 2]));
    }

    #[test]
    fn test_mistyped_fields_are_kept_as_extra() {
        let profile: UserProfile =
            serde_json::from_str(r#"{"id": "u-7", "username": "ali", "role": 3}"#).unwrap();

        assert_eq!(profile.id, None);
        assert_eq!(profile.username.as_deref(), Some("ali"));
        assert_eq!(profile.role, None);
        assert_eq!(profile.extra["id"], serde_json::json!("u-7"));
        assert_eq!(profile.extra["role"], serde_json::json!(3));

        let written = serde_json::to_value(&profile).unwrap();
        assert_eq!(
            written,
            serde_json::json!({"id": "u-7", "username": "ali", "role": 3})
        );
    }

    #[test]
    fn test_identity_from_user() {
        let messages = Messages::default();
        let user = UserProfile {
            username: Some("ali".to_string()),
            role: Some("admin".to_string()),
            ..Default::default()
        };

        let identity = DisplayIdentity::from_user(Some(&user), &messages);
        assert_eq!(identity.name, "ali");
        assert_eq!(identity.role, "admin");
        assert_eq!(identity.avatar, "A");
    }

    #[test]
    fn test_identity_defaults() {
        let messages = Messages::default();
        let identity = DisplayIdentity::from_user(None, &messages);
        assert_eq!(identity.name, "User");
        assert_eq!(identity.role, "—");
        assert_eq!(identity.avatar, "U");

        let blank = UserProfile {
            username: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(
            DisplayIdentity::from_user(Some(&blank), &messages).name,
            "User"
        );
    }

    #[test]
    fn test_avatar_uppercases_non_ascii() {
        let messages = Messages::default();
        let user = UserProfile {
            username: Some("émile".to_string()),
            ..Default::default()
        };
        assert_eq!(DisplayIdentity::from_user(Some(&user), &messages).avatar, "É");
    }
}
