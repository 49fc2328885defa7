use uuid::Uuid;

/// What `Client::login` needs to authenticate. Spec.md §1 scopes real
/// authentication (talking to the account service for a token) out of the
/// core: this type carries the "opaque access token and profile UUID" the
/// core consumes, not how they were obtained.
#[derive(Debug, Clone)]
pub enum Credentials {
    /// Online-mode login: the core will perform the encryption/session-join
    /// handshake (§4.6 step 3) if the server sends an `EncryptionRequest`.
    Online {
        username: String,
        uuid: Uuid,
        access_token: String,
    },
    /// Offline-mode login: valid only against a server that never sends an
    /// `EncryptionRequest` (§4.6 "An encryption-less Login is valid when no
    /// EncryptionRequest arrives").
    Offline { username: String },
}

impl Credentials {
    pub fn online(username: impl Into<String>, uuid: Uuid, access_token: impl Into<String>) -> Self {
        Credentials::Online {
            username: username.into(),
            uuid,
            access_token: access_token.into(),
        }
    }

    pub fn offline(username: impl Into<String>) -> Self {
        Credentials::Offline {
            username: username.into(),
        }
    }

    pub fn username(&self) -> &str {
        match self {
            Credentials::Online { username, .. } => username,
            Credentials::Offline { username } => username,
        }
    }

    /// `(access_token, profile_uuid)` if this is an online-mode credential;
    /// `None` for offline, in which case an inbound `EncryptionRequest`
    /// cannot be answered and login fails.
    pub(crate) fn online_parts(&self) -> Option<(&str, Uuid)> {
        match self {
            Credentials::Online {
                access_token, uuid, ..
            } => Some((access_token.as_str(), *uuid)),
            Credentials::Offline { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offline_has_no_online_parts() {
        let creds = Credentials::offline("tester");
        assert_eq!(creds.username(), "tester");
        assert!(creds.online_parts().is_none());
    }

    #[test]
    fn test_online_exposes_token_and_uuid() {
        let uuid = Uuid::nil();
        let creds = Credentials::online("tester", uuid, "token123");
        let (token, id) = creds.online_parts().unwrap();
        assert_eq!(token, "token123");
        assert_eq!(id, uuid);
    }
}
