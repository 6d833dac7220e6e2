//! Profile loader for the signed-in user.

use std::sync::Arc;

use crate::domain::ports::{ApiClient, ApiError};
use crate::domain::{Envelope, ProfileUpdate, UserProfile};

const PROFILE_PATH: &str = "/user/profile";

/// Reads and updates the signed-in user's profile.
#[derive(Clone)]
pub struct ProfileService<C> {
    client: Arc<C>,
}

impl<C> ProfileService<C> {
    /// Create a new profile service over the API client.
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }
}

impl<C> ProfileService<C>
where
    C: ApiClient,
{
    /// Fetch the current profile.
    pub async fn get_profile(&self) -> Envelope<UserProfile> {
        self.client.get(PROFILE_PATH).await.decode()
    }

    /// Send a partial update and return the profile the API echoes back.
    ///
    /// Updates that change nothing or blank a field are rejected locally.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Envelope<UserProfile> {
        if let Some(problem) = update.problem() {
            return Envelope::failure(ApiError::validation(problem).to_string());
        }
        let body = match serde_json::to_value(update) {
            Ok(body) => body,
            Err(error) => {
                return Envelope::failure(ApiError::validation(error.to_string()).to_string());
            }
        };
        self.client.put(PROFILE_PATH, &body).await.decode()
    }
}

#[cfg(test)]
#[path = "profile_service_tests.rs"]
mod tests;
