//! Status policy: what a `(status, body)` pair means for a given verb.
//!
//! The rules apply in order:
//! 1. `204` or a blank body is "no content" for `get` (no value) and
//!    `get_list` (empty list). Other verbs skip this rule.
//! 2. `200..300` is success: decode the body, except for `delete`.
//! 3. Anything else is a server-status failure; nothing is decoded.

/// What the calling verb template expects back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expectation {
    /// `get`: a single record, possibly absent.
    Optional,
    /// `get_list`: a sequence, possibly empty.
    Collection,
    /// `post` / `put`: a record is required.
    Required,
    /// `delete`: nothing is read from the body.
    Nothing,
}

/// The policy's decision for one response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// No content: `None` for `get`, an empty list for `get_list`.
    Absent,
    /// 2xx with a body to decode into the requested shape.
    Decode,
    /// 2xx where no value is expected.
    Accept,
    /// Status outside 200..300.
    Reject,
}

pub fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

pub fn interpret(expectation: Expectation, status: u16, body: &str) -> Disposition {
    let no_content = status == 204 || body.trim().is_empty();
    match expectation {
        Expectation::Optional | Expectation::Collection if no_content => Disposition::Absent,
        _ if !is_success(status) => Disposition::Reject,
        Expectation::Nothing => Disposition::Accept,
        _ => Disposition::Decode,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_content_is_absent_for_reads() {
        for expectation in [Expectation::Optional, Expectation::Collection] {
            assert_eq!(interpret(expectation, 204, ""), Disposition::Absent);
            assert_eq!(interpret(expectation, 200, "   \n"), Disposition::Absent);
        }
    }

    #[test]
    fn blank_body_wins_over_status_for_reads() {
        // A bodiless 404 (what the backend sends for a missing id) reads as absent.
        assert_eq!(interpret(Expectation::Optional, 404, ""), Disposition::Absent);
        assert_eq!(interpret(Expectation::Optional, 404, "not found"), Disposition::Reject);
    }

    #[test]
    fn writes_never_treat_empty_as_absent() {
        assert_eq!(interpret(Expectation::Required, 200, ""), Disposition::Decode);
        assert_eq!(interpret(Expectation::Required, 204, ""), Disposition::Decode);
        assert_eq!(interpret(Expectation::Required, 400, ""), Disposition::Reject);
    }

    #[test]
    fn delete_accepts_any_success_without_decoding() {
        assert_eq!(interpret(Expectation::Nothing, 200, "{}"), Disposition::Accept);
        assert_eq!(interpret(Expectation::Nothing, 204, ""), Disposition::Accept);
        assert_eq!(interpret(Expectation::Nothing, 404, ""), Disposition::Reject);
    }

    #[test]
    fn success_range_boundaries() {
        assert_eq!(interpret(Expectation::Required, 199, "{}"), Disposition::Reject);
        assert_eq!(interpret(Expectation::Required, 200, "{}"), Disposition::Decode);
        assert_eq!(interpret(Expectation::Required, 299, "{}"), Disposition::Decode);
        assert_eq!(interpret(Expectation::Required, 300, "{}"), Disposition::Reject);
    }
}
