//! `ValidJson` extractor: deserializes a JSON body and runs its `validator` rules.

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use servicehub_core::error::AppError;

use crate::error::ApiError;

/// A JSON body that passed its field validation.
#[derive(Debug, Clone)]
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::bad_request(rejection.body_text()))?;

        value
            .validate()
            .map_err(|errors| AppError::bad_request(first_message(&errors)))?;

        Ok(ValidJson(value))
    }
}

/// The first field error's message, or the field name if it has none.
fn first_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .find_map(|(field, errs)| {
            errs.first().map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{field} is invalid"))
            })
        })
        .unwrap_or_else(|| "invalid request body".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::request::RegisterRequest;

    #[test]
    fn test_first_message_uses_rule_message() {
        let req = RegisterRequest {
            name: "x".repeat(101),
            email: "a@example.com".to_string(),
            password: String::new(),
            confirm_password: String::new(),
            role: "client".to_string(),
            subcategory_id: None,
            avatar_url: None,
        };
        let errors = req.validate().unwrap_err();
        assert_eq!(first_message(&errors), "name is too long");
    }

    #[test]
    fn test_avatar_must_be_url() {
        let req = RegisterRequest {
            name: "Ada".to_string(),
            email: "a@example.com".to_string(),
            password: String::new(),
            confirm_password: String::new(),
            role: "client".to_string(),
            subcategory_id: None,
            avatar_url: Some("not a url".to_string()),
        };
        let errors = req.validate().unwrap_err();
        assert_eq!(first_message(&errors), "avatar_url must be a valid URL");
    }
}
