//! Classify HTTP status, curl and step errors into retry policy error kinds.

use super::error::StepError;
use super::policy::ErrorKind;

/// Classify an HTTP status code for retry decisions.
pub fn classify_http_status(code: u32) -> ErrorKind {
    match code {
        401 | 403 => ErrorKind::Auth,
        429 | 503 => ErrorKind::Throttled,
        _ => ErrorKind::HttpStatus(code as u16),
    }
}

/// Classify a curl error for retry decisions.
pub fn classify_curl_error(e: &curl::Error) -> ErrorKind {
    if e.is_operation_timedout() {
        return ErrorKind::Timeout;
    }
    if e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
    {
        return ErrorKind::Connection;
    }
    if e.is_url_malformed() || e.is_unsupported_protocol() {
        return ErrorKind::Config;
    }
    ErrorKind::Transport
}

/// Classify a step error into an ErrorKind.
pub fn classify(e: &StepError) -> ErrorKind {
    match e {
        StepError::Curl(ce) => classify_curl_error(ce),
        StepError::Http(code) => classify_http_status(*code),
        StepError::Storage(_) | StepError::Transcode(_) => ErrorKind::Service,
        StepError::Config(_) => ErrorKind::Config,
        StepError::Data(_) => ErrorKind::MalformedData,
    }
}
