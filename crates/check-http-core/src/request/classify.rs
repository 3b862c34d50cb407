//! Classify curl errors into transport failure kinds.

use std::fmt;

/// Coarse cause of a transport failure, carried into the UNKNOWN message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// Deadline exceeded (connect, headers or body).
    Timeout,
    /// Host or proxy name did not resolve.
    Dns,
    /// Connection refused, reset, or closed with nothing sent.
    Connection,
    /// TLS handshake or certificate verification failed.
    Tls,
    /// Body arrived short or could not be read.
    BodyRead,
    /// Redirect chain exceeded the limit.
    TooManyRedirects,
    /// URL rejected before any connection was attempted.
    InvalidUrl,
    Other,
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TransportKind::Timeout => "timeout",
            TransportKind::Dns => "dns",
            TransportKind::Connection => "connection",
            TransportKind::Tls => "tls",
            TransportKind::BodyRead => "body read",
            TransportKind::TooManyRedirects => "too many redirects",
            TransportKind::InvalidUrl => "invalid url",
            TransportKind::Other => "transport",
        };
        f.write_str(s)
    }
}

/// Classify a curl error.
pub fn classify_curl_error(e: &curl::Error) -> TransportKind {
    if e.is_operation_timedout() {
        return TransportKind::Timeout;
    }
    if e.is_couldnt_resolve_host() || e.is_couldnt_resolve_proxy() {
        return TransportKind::Dns;
    }
    if e.is_couldnt_connect() || e.is_got_nothing() || e.is_send_error() {
        return TransportKind::Connection;
    }
    if e.is_ssl_connect_error()
        || e.is_peer_failed_verification()
        || e.is_ssl_certproblem()
        || e.is_ssl_cipher()
        || e.is_ssl_cacert_badfile()
    {
        return TransportKind::Tls;
    }
    if e.is_partial_file()
        || e.is_recv_error()
        || e.is_read_error()
        || e.is_bad_content_encoding()
    {
        return TransportKind::BodyRead;
    }
    if e.is_too_many_redirects() {
        return TransportKind::TooManyRedirects;
    }
    if e.is_url_malformed() || e.is_unsupported_protocol() {
        return TransportKind::InvalidUrl;
    }
    TransportKind::Other
}
