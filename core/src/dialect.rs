//! Backend conventions, selected once per adapter instance.
//!
//! # Design
//! The two REST conventions differ only in how a response reports its total,
//! where a record's id comes from, and which input identifiers are accepted.
//! Those capabilities live here as one strategy value instead of two
//! near-duplicate translators. A deployment picks exactly one dialect; the
//! identity conventions must never be mixed within a single adapter.

/// Header carrying the pagination total in the header-count convention.
pub const DEFAULT_COUNT_HEADER: &str = "content-range";

/// The backend response/pagination/identity convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialect {
    /// List responses are `{results, count}` envelopes (or bare arrays) and
    /// each record's id is its self-referential `url` field.
    ///
    /// With `reduce_url_ids` set, `GET_MANY` accepts full resource URLs as
    /// input identifiers and reduces them to their primary key before
    /// building URLs — upstream records may store either form as their id.
    Enveloped { reduce_url_ids: bool },

    /// List responses are bare arrays and the pagination total is the last
    /// `/`-delimited segment of the named response header. Records keep the
    /// server-assigned `id` field as-is, and a free-text filter is sent as a
    /// `search` query parameter.
    CountHeader { header: String },
}

impl Dialect {
    pub fn enveloped() -> Self {
        Dialect::Enveloped { reduce_url_ids: true }
    }

    pub fn count_header() -> Self {
        Dialect::CountHeader {
            header: DEFAULT_COUNT_HEADER.to_string(),
        }
    }

    /// The identifier to interpolate into an outgoing `GET_MANY` URL.
    ///
    /// Only the enveloped dialect (with `reduce_url_ids`) tolerates
    /// URL-shaped input ids; everywhere else the id is used verbatim.
    pub(crate) fn request_id<'a>(&self, id: &'a str) -> &'a str {
        match self {
            Dialect::Enveloped { reduce_url_ids: true } if id.contains("http") => {
                extract_primary_key(id)
            }
            _ => id,
        }
    }
}

/// The path segment immediately preceding the trailing slash of a resource
/// URL, e.g. `http://api/users/42/` -> `42`.
pub fn extract_primary_key(url: &str) -> &str {
    url.trim_end_matches('/').rsplit('/').next().unwrap_or(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_key_is_last_segment_before_trailing_slash() {
        assert_eq!(extract_primary_key("http://test.com/api/v1/users/42/"), "42");
        assert_eq!(extract_primary_key("http://test.com/api/v1/users/42"), "42");
        assert_eq!(extract_primary_key("42"), "42");
    }

    #[test]
    fn enveloped_dialect_reduces_url_shaped_ids() {
        let dialect = Dialect::enveloped();
        assert_eq!(dialect.request_id("http://test.com/api/v1/users/7/"), "7");
        assert_eq!(dialect.request_id("7"), "7");
    }

    #[test]
    fn reduction_is_off_unless_configured() {
        let dialect = Dialect::Enveloped { reduce_url_ids: false };
        let url = "http://test.com/api/v1/users/7/";
        assert_eq!(dialect.request_id(url), url);

        let dialect = Dialect::count_header();
        assert_eq!(dialect.request_id(url), url);
    }
}
