//! User reference resolution
//!
//! Projects and tasks point at users either through a nested reference
//! (`owner`, `assignee`, `creator`) or through a bare foreign key
//! (`ownerId`, `assigneeId`, `creatorId`). The directory resolves both
//! against the fetched user list.

use ahash::AHashMap as HashMap;
use taskdash_domain::constants::UNKNOWN_USERNAME;
use taskdash_domain::{present_id, ActivityUser, RecordId, UserRecord, UserRef};

/// Lookup table of users keyed by stringified id
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    users: HashMap<String, ActivityUser>,
}

impl UserDirectory {
    /// Build the directory. Users without a usable id are skipped; when an id
    /// repeats, the first record wins.
    pub fn new(users: &[UserRecord]) -> Self {
        let mut map = HashMap::with_capacity(users.len());

        for user in users {
            let Some(id) = present_id(user.id.as_ref()) else {
                continue;
            };
            let key = id.to_string();
            map.entry(key.clone()).or_insert_with(|| ActivityUser {
                id: key,
                username: non_blank(user.username.as_deref())
                    .unwrap_or(UNKNOWN_USERNAME)
                    .to_string(),
                email: user.email.clone().unwrap_or_default(),
                avatar: user.avatar.clone(),
            });
        }

        Self { users: map }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Look up a user by id. `"7"` and `7` address the same user.
    pub fn lookup(&self, id: Option<&RecordId>) -> Option<&ActivityUser> {
        present_id(id).and_then(|id| self.users.get(&id.to_string()))
    }

    /// Resolve a reference that may be carried nested, as a foreign key, or
    /// both.
    ///
    /// Order:
    /// 1. a nested reference that carries a display name
    /// 2. the directory entry for the foreign key, then for the nested id
    ///
    /// A nested reference with an id but no display name resolves to `None`
    /// here so callers can try their next candidate; see [`Self::placeholder`].
    pub fn resolve(&self, nested: Option<&UserRef>, id: Option<&RecordId>) -> Option<ActivityUser> {
        let nested_id = nested.and_then(|r| present_id(r.id.as_ref()));
        let key = present_id(id).or(nested_id);

        if let Some(user) = nested.and_then(|r| named_ref(r, key)) {
            return Some(user);
        }

        self.lookup(id).or_else(|| self.lookup(nested_id)).cloned()
    }

    /// `Unknown User` stand-in for a nested reference that names an id the
    /// directory does not know.
    pub fn placeholder(nested: Option<&UserRef>, id: Option<&RecordId>) -> Option<ActivityUser> {
        let nested = nested?;
        let key = present_id(id).or_else(|| present_id(nested.id.as_ref()))?;

        Some(ActivityUser {
            id: key.to_string(),
            username: UNKNOWN_USERNAME.to_string(),
            email: nested.email.clone().unwrap_or_default(),
            avatar: None,
        })
    }
}

fn named_ref(reference: &UserRef, key: Option<&RecordId>) -> Option<ActivityUser> {
    let username = non_blank(reference.username.as_deref())
        .or_else(|| non_blank(reference.name.as_deref()))?;
    let key = key?;

    Some(ActivityUser {
        id: key.to_string(),
        username: username.to_string(),
        email: reference.email.clone().unwrap_or_default(),
        avatar: None,
    })
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64, username: Option<&str>, email: Option<&str>) -> UserRecord {
        UserRecord {
            id: Some(RecordId::Number(id)),
            username: username.map(str::to_string),
            email: email.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn lookup_matches_numeric_and_text_ids() {
        let directory = UserDirectory::new(&[user(7, Some("alice"), Some("a@x.com"))]);

        assert_eq!(directory.lookup(Some(&RecordId::Number(7))).unwrap().username, "alice");
        assert_eq!(directory.lookup(Some(&RecordId::from("7"))).unwrap().email, "a@x.com");
        assert!(directory.lookup(Some(&RecordId::Number(8))).is_none());
        assert!(directory.lookup(None).is_none());
    }

    #[test]
    fn missing_fields_get_placeholders() {
        let directory = UserDirectory::new(&[user(1, None, None), user(2, Some("  "), None)]);

        let first = directory.lookup(Some(&RecordId::Number(1))).unwrap();
        assert_eq!(first.username, "Unknown User");
        assert_eq!(first.email, "");
        assert_eq!(directory.lookup(Some(&RecordId::Number(2))).unwrap().username, "Unknown User");
    }

    #[test]
    fn users_without_ids_are_skipped_and_first_duplicate_wins() {
        let anonymous = UserRecord { username: Some("ghost".into()), ..Default::default() };
        let directory = UserDirectory::new(&[
            anonymous,
            user(3, Some("first"), None),
            user(3, Some("second"), None),
        ]);

        assert_eq!(directory.len(), 1);
        assert_eq!(directory.lookup(Some(&RecordId::Number(3))).unwrap().username, "first");
    }

    #[test]
    fn named_nested_reference_wins_over_directory() {
        let directory = UserDirectory::new(&[user(4, Some("from-directory"), None)]);
        let nested = UserRef {
            id: Some(RecordId::Number(4)),
            username: Some("from-payload".into()),
            ..Default::default()
        };

        let resolved = directory.resolve(Some(&nested), Some(&RecordId::Number(4))).unwrap();
        assert_eq!(resolved.username, "from-payload");
    }

    #[test]
    fn nameless_nested_reference_defers_to_directory() {
        let directory = UserDirectory::new(&[user(4, Some("dana"), Some("d@x.com"))]);
        let nested = UserRef { id: Some(RecordId::Number(4)), ..Default::default() };

        let resolved = directory.resolve(Some(&nested), None).unwrap();
        assert_eq!(resolved.username, "dana");
    }

    #[test]
    fn nested_name_alias_is_used() {
        let directory = UserDirectory::default();
        let nested = UserRef {
            id: Some(RecordId::Number(9)),
            name: Some("Nia".into()),
            email: Some("n@x.com".into()),
            ..Default::default()
        };

        let resolved = directory.resolve(Some(&nested), None).unwrap();
        assert_eq!(resolved.id, "9");
        assert_eq!(resolved.username, "Nia");
        assert_eq!(resolved.email, "n@x.com");
    }

    #[test]
    fn id_only_reference_without_directory_match_is_unresolved() {
        let directory = UserDirectory::new(&[user(2, Some("bob"), None)]);
        let nested = UserRef {
            id: Some(RecordId::Number(99)),
            email: Some("ghost@x.com".into()),
            ..Default::default()
        };

        assert!(directory.resolve(Some(&nested), None).is_none());

        let stand_in = UserDirectory::placeholder(Some(&nested), None).unwrap();
        assert_eq!(stand_in.id, "99");
        assert_eq!(stand_in.username, "Unknown User");
        assert_eq!(stand_in.email, "ghost@x.com");
        assert!(UserDirectory::placeholder(None, Some(&RecordId::Number(99))).is_none());
    }

    #[test]
    fn unresolvable_reference_is_none() {
        let directory = UserDirectory::default();
        assert!(directory.resolve(None, Some(&RecordId::Number(1))).is_none());
        assert!(directory.resolve(Some(&UserRef::default()), None).is_none());
    }
}
