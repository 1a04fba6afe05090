//! Resolving commit author emails to a username on the hosting platform.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;

/// Something that can map an email address to a platform username.
///
/// Implementors return `Ok(None)` when the email is unknown. Errors are
/// treated the same way by the renderer; they never fail a render.
#[async_trait]
pub trait IdentityLookup: Send + Sync {
    async fn find_username(&self, email: &str) -> Result<Option<String>>;
}

/// A lookup that never resolves anything, for offline rendering
#[derive(Debug, Default, Clone, Copy)]
pub struct NoLookup;

#[async_trait]
impl IdentityLookup for NoLookup {
    async fn find_username(&self, _email: &str) -> Result<Option<String>> {
        Ok(None)
    }
}

#[async_trait]
impl<T: IdentityLookup + ?Sized> IdentityLookup for &T {
    async fn find_username(&self, email: &str) -> Result<Option<String>> {
        (**self).find_username(email).await
    }
}

#[async_trait]
impl<T: IdentityLookup + ?Sized> IdentityLookup for Box<T> {
    async fn find_username(&self, email: &str) -> Result<Option<String>> {
        (**self).find_username(email).await
    }
}

#[async_trait]
impl<T: IdentityLookup + ?Sized> IdentityLookup for Arc<T> {
    async fn find_username(&self, email: &str) -> Result<Option<String>> {
        (**self).find_username(email).await
    }
}

/// Resolves from a fixed email -> username table
#[cfg(test)]
pub(crate) struct TableLookup(std::collections::HashMap<String, String>);

#[cfg(test)]
impl TableLookup {
    pub(crate) fn new(users: &[(&str, &str)]) -> Self {
        TableLookup(
            users
                .iter()
                .map(|(e, u)| (e.to_string(), u.to_string()))
                .collect(),
        )
    }
}

#[cfg(test)]
#[async_trait]
impl IdentityLookup for TableLookup {
    async fn find_username(&self, email: &str) -> Result<Option<String>> {
        Ok(self.0.get(email).cloned())
    }
}

#[cfg(feature = "ungh")]
pub use self::ungh::UnghLookup;

#[cfg(feature = "ungh")]
mod ungh {
    use async_trait::async_trait;
    use log::debug;
    use serde::Deserialize;

    use super::IdentityLookup;
    use crate::error::{Error, Result};

    const UNGH_URL: &str = "https://ungh.cc/users/find";

    #[derive(Debug, Deserialize)]
    struct FindResponse {
        user: Option<User>,
    }

    #[derive(Debug, Deserialize)]
    struct User {
        username: String,
    }

    /// Looks emails up through the public ungh.cc GitHub proxy
    #[derive(Debug, Clone, Default)]
    pub struct UnghLookup {
        client: reqwest::Client,
    }

    impl UnghLookup {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_client(client: reqwest::Client) -> Self {
            UnghLookup { client }
        }
    }

    #[async_trait]
    impl IdentityLookup for UnghLookup {
        async fn find_username(&self, email: &str) -> Result<Option<String>> {
            let url = format!("{UNGH_URL}/{email}");
            debug!("GET {url}");
            let res = self
                .client
                .get(&url)
                .send()
                .await
                .and_then(reqwest::Response::error_for_status)
                .map_err(|e| Error::Lookup(e.to_string()))?;
            let body: FindResponse = res
                .json()
                .await
                .map_err(|e| Error::Lookup(e.to_string()))?;
            Ok(body.into_username())
        }
    }

    impl FindResponse {
        fn into_username(self) -> Option<String> {
            self.user.map(|u| u.username)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn username(body: &str) -> Option<String> {
            serde_json::from_str::<FindResponse>(body)
                .unwrap()
                .into_username()
        }

        #[test]
        fn decodes_found_user() {
            assert_eq!(
                username(r#"{"user":{"username":"octocat","name":"The Octocat"}}"#),
                Some("octocat".to_owned())
            );
        }

        #[test]
        fn decodes_unknown_email() {
            assert_eq!(username(r#"{"user":null}"#), None);
        }
    }
}
