//! Signed-in user's profile as served by `/user/profile`.

use serde::{Deserialize, Serialize};

use super::ids::UserId;

/// Profile of the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Account identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
}

/// Partial profile update; only the fields present are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    /// New display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New contact email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl ProfileUpdate {
    /// Name the first problem that makes this update unsendable.
    ///
    /// An update must change at least one field, and no supplied field may
    /// be blank.
    pub fn problem(&self) -> Option<&'static str> {
        let fields = [self.name.as_deref(), self.email.as_deref()];
        if fields.iter().all(Option::is_none) {
            return Some("profile update must change at least one field");
        }
        if fields
            .iter()
            .flatten()
            .any(|value| value.trim().is_empty())
        {
            return Some("profile fields must not be blank");
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case::nothing(ProfileUpdate::default(), Some("profile update must change at least one field"))]
    #[case::blank(ProfileUpdate { name: Some("  ".to_owned()), email: None }, Some("profile fields must not be blank"))]
    #[case::name_only(ProfileUpdate { name: Some("Ada".to_owned()), email: None }, None)]
    fn validates_updates(#[case] update: ProfileUpdate, #[case] expected: Option<&str>) {
        assert_eq!(update.problem(), expected);
    }

    #[test]
    fn omits_absent_fields_on_the_wire() {
        let update = ProfileUpdate {
            name: None,
            email: Some("ada@example.com".to_owned()),
        };
        assert_eq!(
            serde_json::to_value(update).expect("serialise"),
            json!({ "email": "ada@example.com" })
        );
    }
}
