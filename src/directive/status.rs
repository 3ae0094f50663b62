//! Status code resolution.
//!
//! # Responsibilities
//! - Map a status token (canonical name or numeric string) to a status code
//! - Fall back to 200 OK for anything outside the table
//!
//! # Design Decisions
//! - The table is closed: codes not listed resolve to 200 even if numeric
//! - Tokens are case-sensitive (`NotFound`, not `notfound`)

use axum::http::StatusCode;

/// Resolve a status token to the status the response will carry.
///
/// Both forms of every entry resolve identically, e.g. `"TemporaryRedirect"`
/// and `"307"`. Unknown and empty tokens resolve to `200 OK`.
pub fn resolve_status(token: &str) -> StatusCode {
    match token {
        // 3xx
        "MultipleChoices" | "300" => StatusCode::MULTIPLE_CHOICES,
        "MovedPermanently" | "301" => StatusCode::MOVED_PERMANENTLY,
        "Found" | "302" => StatusCode::FOUND,
        "SeeOther" | "303" => StatusCode::SEE_OTHER,
        "UseProxy" | "305" => StatusCode::USE_PROXY,
        "TemporaryRedirect" | "307" => StatusCode::TEMPORARY_REDIRECT,
        "PermanentRedirect" | "308" => StatusCode::PERMANENT_REDIRECT,

        // 4xx
        "BadRequest" | "400" => StatusCode::BAD_REQUEST,
        "Unauthorized" | "401" => StatusCode::UNAUTHORIZED,
        "PaymentRequired" | "402" => StatusCode::PAYMENT_REQUIRED,
        "Forbidden" | "403" => StatusCode::FORBIDDEN,
        "NotFound" | "404" => StatusCode::NOT_FOUND,
        "MethodNotAllowed" | "405" => StatusCode::METHOD_NOT_ALLOWED,
        "RequestTimeout" | "408" => StatusCode::REQUEST_TIMEOUT,
        "Conflict" | "409" => StatusCode::CONFLICT,
        "Gone" | "410" => StatusCode::GONE,
        "Teapot" | "418" => StatusCode::IM_A_TEAPOT,
        "TooManyRequests" | "429" => StatusCode::TOO_MANY_REQUESTS,

        // 5xx
        "InternalServerError" | "500" => StatusCode::INTERNAL_SERVER_ERROR,
        "NotImplemented" | "501" => StatusCode::NOT_IMPLEMENTED,
        "BadGateway" | "502" => StatusCode::BAD_GATEWAY,
        "ServiceUnavailable" | "503" => StatusCode::SERVICE_UNAVAILABLE,
        "GatewayTimeout" | "504" => StatusCode::GATEWAY_TIMEOUT,
        "HTTPVersionNotSupported" | "505" => StatusCode::HTTP_VERSION_NOT_SUPPORTED,
        "InsufficientStorage" | "507" => StatusCode::INSUFFICIENT_STORAGE,
        "LoopDetected" | "508" => StatusCode::LOOP_DETECTED,
        "NotExtended" | "510" => StatusCode::NOT_EXTENDED,
        "NetworkAuthenticationRequired" | "511" => StatusCode::NETWORK_AUTHENTICATION_REQUIRED,

        _ => StatusCode::OK,
    }
}

/// Returns true for the statuses that carry a `Location` header: [300, 310).
pub fn is_redirect_class(status: StatusCode) -> bool {
    (300..310).contains(&status.as_u16())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAIRS: &[(&str, &str)] = &[
        ("MultipleChoices", "300"),
        ("MovedPermanently", "301"),
        ("Found", "302"),
        ("SeeOther", "303"),
        ("UseProxy", "305"),
        ("TemporaryRedirect", "307"),
        ("PermanentRedirect", "308"),
        ("BadRequest", "400"),
        ("Unauthorized", "401"),
        ("PaymentRequired", "402"),
        ("Forbidden", "403"),
        ("NotFound", "404"),
        ("MethodNotAllowed", "405"),
        ("RequestTimeout", "408"),
        ("Conflict", "409"),
        ("Gone", "410"),
        ("Teapot", "418"),
        ("TooManyRequests", "429"),
        ("InternalServerError", "500"),
        ("NotImplemented", "501"),
        ("BadGateway", "502"),
        ("ServiceUnavailable", "503"),
        ("GatewayTimeout", "504"),
        ("HTTPVersionNotSupported", "505"),
        ("InsufficientStorage", "507"),
        ("LoopDetected", "508"),
        ("NotExtended", "510"),
        ("NetworkAuthenticationRequired", "511"),
    ];

    #[test]
    fn test_name_and_number_agree() {
        for (name, number) in PAIRS {
            let by_name = resolve_status(name);
            let by_number = resolve_status(number);
            assert_eq!(by_name, by_number, "{} vs {}", name, number);
            assert_eq!(by_number.as_u16().to_string(), *number);
        }
    }

    #[test]
    fn test_unknown_tokens_fall_back_to_ok() {
        for token in ["", "200", "201", "306", "999", "notfound", "NOTFOUND", " 404", "abc"] {
            assert_eq!(resolve_status(token), StatusCode::OK, "token {:?}", token);
        }
    }

    #[test]
    fn test_redirect_class_bounds() {
        assert!(!is_redirect_class(StatusCode::OK));
        assert!(is_redirect_class(StatusCode::MULTIPLE_CHOICES));
        assert!(is_redirect_class(StatusCode::PERMANENT_REDIRECT));
        assert!(!is_redirect_class(StatusCode::from_u16(310).unwrap()));
        assert!(!is_redirect_class(StatusCode::BAD_REQUEST));
    }
}
