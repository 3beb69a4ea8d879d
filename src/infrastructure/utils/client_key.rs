use actix_web::{http::header::HeaderMap, HttpRequest};

use crate::constants::UNKNOWN_CLIENT_KEY;

const FORWARDED_FOR: &str = "x-forwarded-for";
const CONNECTING_IP: &str = "cf-connecting-ip";

/// Key used to rate limit the caller.
///
/// Uses the first hop of X-Forwarded-For, then CF-Connecting-IP. Callers with
/// neither header share the `"unknown"` key and therefore one quota.
pub fn get_client_key(req: &HttpRequest) -> String {
    client_key_from_headers(req.headers())
}

pub fn client_key_from_headers(headers: &HeaderMap) -> String {
    let header_value = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
    };

    if let Some(first_hop) = header_value(FORWARDED_FOR)
        .and_then(|forwarded| forwarded.split(',').next())
        .map(str::trim)
        .filter(|hop| !hop.is_empty())
    {
        return first_hop.to_string();
    }

    header_value(CONNECTING_IP)
        .map(str::to_string)
        .unwrap_or_else(|| UNKNOWN_CLIENT_KEY.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn prefers_first_forwarded_hop() {
        let req = TestRequest::default()
            .insert_header(("X-Forwarded-For", " 203.0.113.7 , 10.0.0.1"))
            .insert_header(("CF-Connecting-IP", "198.51.100.2"))
            .to_http_request();

        assert_eq!(get_client_key(&req), "203.0.113.7");
    }

    #[test]
    fn falls_back_to_connecting_ip() {
        let req = TestRequest::default()
            .insert_header(("CF-Connecting-IP", "198.51.100.2"))
            .to_http_request();

        assert_eq!(get_client_key(&req), "198.51.100.2");
    }

    #[test]
    fn empty_forwarded_header_is_ignored() {
        let req = TestRequest::default()
            .insert_header(("X-Forwarded-For", " , 10.0.0.1"))
            .insert_header(("CF-Connecting-IP", "198.51.100.2"))
            .to_http_request();

        assert_eq!(get_client_key(&req), "198.51.100.2");
    }

    #[test]
    fn unattributable_clients_share_unknown() {
        let req = TestRequest::default().to_http_request();
        assert_eq!(get_client_key(&req), UNKNOWN_CLIENT_KEY);
    }
}
