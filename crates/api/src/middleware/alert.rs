//! Notification headers for client-side toasts.
//!
//! Handlers and [`AppError`](crate::error::AppError) do not know the
//! configured application name, so they attach an [`Alert`] to the response
//! extensions instead. [`alert_headers`] runs after them and turns it into:
//!
//! ```text
//! X-<app>-alert:  <app>.<entity>.<action>     (success)
//! X-<app>-error:  error.<errorKey>            (rejected identity)
//! X-<app>-params: <id> | <entity>
//! ```

use axum::extract::{Request, State};
use axum::http::{HeaderMap, HeaderName, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;
use easytask_core::error::ErrorKey;

use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertAction {
    Created,
    Updated,
    Deleted,
}

impl AlertAction {
    pub fn as_str(self) -> &'static str {
        match self {
            AlertAction::Created => "created",
            AlertAction::Updated => "updated",
            AlertAction::Deleted => "deleted",
        }
    }
}

/// Outcome of a mutation, carried in response extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alert {
    Success {
        entity: &'static str,
        action: AlertAction,
        param: String,
    },
    Failure {
        entity: &'static str,
        error_key: ErrorKey,
    },
}

impl Alert {
    pub fn created(entity: &'static str, id: impl ToString) -> Self {
        Self::success(entity, AlertAction::Created, id)
    }

    pub fn updated(entity: &'static str, id: impl ToString) -> Self {
        Self::success(entity, AlertAction::Updated, id)
    }

    pub fn deleted(entity: &'static str, id: impl ToString) -> Self {
        Self::success(entity, AlertAction::Deleted, id)
    }

    fn success(entity: &'static str, action: AlertAction, id: impl ToString) -> Self {
        Alert::Success {
            entity,
            action,
            param: id.to_string(),
        }
    }

    /// Write this alert's headers for the given application name.
    pub fn write_headers(&self, application: &str, headers: &mut HeaderMap) {
        match self {
            Alert::Success {
                entity,
                action,
                param,
            } => {
                insert(
                    headers,
                    format!("x-{application}-alert"),
                    format!("{application}.{entity}.{}", action.as_str()),
                );
                insert(headers, format!("x-{application}-params"), param.clone());
            }
            Alert::Failure { entity, error_key } => {
                insert(
                    headers,
                    format!("x-{application}-error"),
                    format!("error.{error_key}"),
                );
                insert(headers, format!("x-{application}-params"), entity.to_string());
            }
        }
    }
}

fn insert(headers: &mut HeaderMap, name: String, value: String) {
    match (HeaderName::try_from(name), HeaderValue::try_from(value)) {
        (Ok(name), Ok(value)) => {
            headers.insert(name, value);
        }
        _ => tracing::warn!("Skipping alert header that is not a valid HTTP header"),
    }
}

/// Move the response's [`Alert`], if any, into headers.
pub async fn alert_headers(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;
    if let Some(alert) = response.extensions_mut().remove::<Alert>() {
        alert.write_headers(&state.config.application_name, response.headers_mut());
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
        headers.get(name).and_then(|v| v.to_str().ok())
    }

    #[test]
    fn success_alert_names_entity_action_and_id() {
        let mut headers = HeaderMap::new();
        Alert::created("maintenance", "6f1c").write_headers("easyTaskApp", &mut headers);

        assert_eq!(
            header(&headers, "x-easytaskapp-alert"),
            Some("easyTaskApp.maintenance.created")
        );
        assert_eq!(header(&headers, "x-easytaskapp-params"), Some("6f1c"));
        assert!(headers.get("x-easytaskapp-error").is_none());
    }

    #[test]
    fn failure_alert_carries_error_key_and_entity() {
        let mut headers = HeaderMap::new();
        let alert = Alert::Failure {
            entity: "projet",
            error_key: ErrorKey::IdInvalid,
        };
        alert.write_headers("easyTaskApp", &mut headers);

        assert_eq!(header(&headers, "x-easytaskapp-error"), Some("error.idinvalid"));
        assert_eq!(header(&headers, "x-easytaskapp-params"), Some("projet"));
    }

    #[test]
    fn unrepresentable_application_name_writes_nothing() {
        let mut headers = HeaderMap::new();
        Alert::deleted("client", 3).write_headers("easy task", &mut headers);
        assert!(headers.is_empty());
    }
}
