//! Sign Up Use Case
//!
//! Creates an account with an Argon2id password hash.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::domain::entities::{NewUser, UserProfile};
use crate::domain::repository::UserRepository;
use crate::domain::value_objects::{UserId, UserName};
use crate::error::{InterviewError, InterviewResult};

/// Input for sign up
#[derive(Debug)]
pub struct SignUpInput {
    pub user_name: String,
    pub password: String,
    pub profile: UserProfile,
}

/// Output of sign up
#[derive(Debug, Clone)]
pub struct SignUpOutput {
    pub user_id: UserId,
    pub user_name: UserName,
}

/// Sign up use case
pub struct SignUpUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> SignUpUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, input: SignUpInput) -> InterviewResult<SignUpOutput> {
        let user_name = UserName::new(&input.user_name).map_err(InterviewError::Validation)?;
        let password = ClearTextPassword::new(input.password)
            .map_err(|e| InterviewError::Validation(e.to_string()))?;

        if self
            .user_repo
            .find_by_user_name(&user_name)
            .await?
            .is_some()
        {
            return Err(InterviewError::UserNameTaken);
        }

        let password_hash = password
            .hash()
            .map_err(|e| InterviewError::Internal(e.to_string()))?;

        // The store still rejects a name taken concurrently
        let account = self
            .user_repo
            .create(&NewUser {
                user_name,
                password_hash: password_hash.as_phc_string().to_string(),
                profile: input.profile,
            })
            .await?;

        tracing::info!(
            user_id = %account.id,
            user_name = %account.user_name,
            "User signed up"
        );

        Ok(SignUpOutput {
            user_id: account.id,
            user_name: account.user_name,
        })
    }
}
