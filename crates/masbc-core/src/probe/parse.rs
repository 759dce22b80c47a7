//! Parse HTTP response header lines into ProbeResponse.

use super::ProbeResponse;

/// Parse collected header lines. With redirects curl hands us every hop's
/// headers; a new status line resets what was collected so far.
pub(crate) fn parse_headers(status: u32, lines: &[String]) -> ProbeResponse {
    let mut content_length = None;
    let mut last_modified = None;

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("HTTP/") {
            content_length = None;
            last_modified = None;
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            let value = value.trim();
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.parse::<u64>().ok();
            }
            if name.eq_ignore_ascii_case("last-modified") {
                last_modified = Some(value.to_string());
            }
        }
    }

    ProbeResponse {
        status,
        content_length,
        last_modified,
    }
}
