use crate::error::ApiError;
use crate::model::attendance::UNKNOWN_IP;
use actix_governor::KeyExtractor;
use actix_web::dev::{Payload, ServiceRequest};
use actix_web::{FromRequest, HttpRequest, http::header::HeaderMap};
use futures::future::{Ready, ready};
use std::convert::Infallible;

/// Submitter address as reported by the proxy headers.
///
/// `x-forwarded-for` wins (first hop of the chain), then `x-real-ip`,
/// then the `"unknown"` sentinel. The socket peer is not consulted:
/// behind a proxy it is always the proxy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIp(pub String);

impl ClientIp {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let ip = forwarded_for(headers)
            .or_else(|| real_ip(headers))
            .unwrap_or_else(|| UNKNOWN_IP.to_string());
        ClientIp(ip)
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

fn forwarded_for(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get("x-forwarded-for")?.to_str().ok()?;
    let first = raw.split(',').next()?.trim();
    (!first.is_empty()).then(|| first.to_string())
}

fn real_ip(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get("x-real-ip")?.to_str().ok()?.trim();
    (!raw.is_empty()).then(|| raw.to_string())
}

impl FromRequest for ClientIp {
    type Error = Infallible;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Ok(ClientIp::from_headers(req.headers())))
    }
}

/// Rate-limit key matching the address stored on the record, so attendees
/// sharing one proxy or NAT get separate budgets. Requests without proxy
/// headers fall back to the socket peer.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClientIpKeyExtractor;

impl KeyExtractor for ClientIpKeyExtractor {
    type Key = String;
    type KeyExtractionError = ApiError;

    fn extract(&self, req: &ServiceRequest) -> Result<Self::Key, Self::KeyExtractionError> {
        let ClientIp(ip) = ClientIp::from_headers(req.headers());
        if ip != UNKNOWN_IP {
            return Ok(ip);
        }
        Ok(req
            .peer_addr()
            .map(|addr| addr.ip().to_string())
            .unwrap_or(ip))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    fn ip_for(headers: &[(&str, &str)]) -> String {
        let mut req = TestRequest::default();
        for (name, value) in headers {
            req = req.insert_header((*name, *value));
        }
        ClientIp::from_headers(req.to_http_request().headers()).into_inner()
    }

    #[test]
    fn first_forwarded_hop_wins() {
        assert_eq!(ip_for(&[("x-forwarded-for", "1.2.3.4, 5.6.7.8")]), "1.2.3.4");
    }

    #[test]
    fn forwarded_for_is_trimmed() {
        assert_eq!(ip_for(&[("x-forwarded-for", "  9.9.9.9  ")]), "9.9.9.9");
    }

    #[test]
    fn forwarded_for_beats_real_ip() {
        assert_eq!(
            ip_for(&[("x-real-ip", "10.0.0.1"), ("x-forwarded-for", "1.2.3.4")]),
            "1.2.3.4"
        );
    }

    #[test]
    fn falls_back_to_real_ip() {
        assert_eq!(ip_for(&[("x-real-ip", "10.0.0.1")]), "10.0.0.1");
        assert_eq!(
            ip_for(&[("x-forwarded-for", " , 5.6.7.8"), ("x-real-ip", "10.0.0.1")]),
            "10.0.0.1"
        );
    }

    #[test]
    fn no_headers_is_unknown() {
        assert_eq!(ip_for(&[]), "unknown");
    }

    #[test]
    fn limiter_key_follows_forwarded_address_then_peer() {
        let peer: std::net::SocketAddr = "192.0.2.1:5000".parse().unwrap();

        let req = TestRequest::default()
            .peer_addr(peer)
            .insert_header(("x-forwarded-for", "1.1.1.1, 192.0.2.1"))
            .to_srv_request();
        assert_eq!(ClientIpKeyExtractor.extract(&req).unwrap(), "1.1.1.1");

        let req = TestRequest::default().peer_addr(peer).to_srv_request();
        assert_eq!(ClientIpKeyExtractor.extract(&req).unwrap(), "192.0.2.1");

        let req = TestRequest::default().to_srv_request();
        assert_eq!(ClientIpKeyExtractor.extract(&req).unwrap(), "unknown");
    }

    #[actix_web::test]
    async fn extractor_reads_headers() {
        let req = TestRequest::default()
            .insert_header(("x-forwarded-for", "203.0.113.7"))
            .to_http_request();
        let ip = ClientIp::extract(&req).await.unwrap();
        assert_eq!(ip, ClientIp("203.0.113.7".to_string()));
    }
}
