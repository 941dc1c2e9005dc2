use crate::error::Error;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

pub(crate) struct APIError(anyhow::Error);

impl IntoResponse for APIError {
    fn into_response(self) -> Response {
        let any_err = self.0;
        let status = match any_err.downcast_ref::<Error>() {
            Some(Error::ConfigDecode(_)) => StatusCode::BAD_REQUEST,
            Some(Error::DomainNotFound { .. }) => StatusCode::NOT_FOUND,
            Some(
                Error::ProviderApi(_) | Error::Resolve(_) | Error::ZoneResolution(_),
            ) => StatusCode::BAD_GATEWAY,
            Some(Error::JsonExtractorRejection(err)) => match err {
                JsonRejection::JsonDataError(_) => StatusCode::UNPROCESSABLE_ENTITY,
                JsonRejection::JsonSyntaxError(_) => StatusCode::BAD_REQUEST,
                JsonRejection::MissingJsonContentType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(json!({
            "error": format!("{any_err}"),
        }));
        (status, body).into_response()
    }
}

impl<E> From<E> for APIError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: Error) -> StatusCode {
        APIError::from(err).into_response().status()
    }

    #[test]
    fn decode_failures_are_client_errors() {
        let decode_err = serde_json::from_str::<i32>("x").unwrap_err();
        assert_eq!(
            status_of(Error::ConfigDecode(decode_err)),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn provider_failures_are_bad_gateway() {
        let err = Error::ProviderApi(crate::dnspod::ProviderApiError::Status {
            code: "-1".to_string(),
            message: "Login failed".to_string(),
        });
        assert_eq!(status_of(err), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn unknown_domains_are_not_found() {
        let err = Error::DomainNotFound {
            auth_zone: "example.com.".to_string(),
            zone: "example.com.".to_string(),
        };
        assert_eq!(status_of(err), StatusCode::NOT_FOUND);
    }

    #[test]
    fn everything_else_is_internal() {
        assert_eq!(
            status_of(Error::NotInitialized),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
