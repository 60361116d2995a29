//! Payloads for `POST /login`. The request carries the plain password and the
//! response carries the session token, so neither type may be logged.

use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::{LoginRequest, LoginResponse};
    use serde_json::json;

    #[test]
    fn request_serializes_both_fields() {
        let request = LoginRequest {
            email: "eve.holt@reqres.in",
            password: "cityslicka",
        };

        let value = serde_json::to_value(&request).expect("serialize");
        assert_eq!(
            value,
            json!({ "email": "eve.holt@reqres.in", "password": "cityslicka" })
        );
    }

    #[test]
    fn response_requires_token() {
        let ok: LoginResponse =
            serde_json::from_value(json!({ "token": "QpwL5tke4Pnpja7X4" })).expect("decode");
        assert_eq!(ok.token, "QpwL5tke4Pnpja7X4");

        assert!(serde_json::from_value::<LoginResponse>(json!({ "error": "nope" })).is_err());
    }
}
