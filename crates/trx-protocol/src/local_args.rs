//! Local-args decoder - command-line invocation into a [`Request`]
//!
//! Local transforms receive `value [properties]` where `properties` is
//! `name=value#name=value`. A literal `#`, `=` or `\` is written `\#`,
//! `\=` or `\\`.

use crate::error::ProtocolError;
use crate::request::Request;
use tracing::warn;
use uuid::Uuid;

/// Entity type given to locally invoked requests
pub const LOCAL_ENTITY_TYPE: &str = "local.Unknown";

/// Weight and slider of locally invoked requests
const LOCAL_DEFAULT: i32 = 100;

/// Decode local-invocation arguments.
///
/// `args[0]` is the entity value; the optional `args[1]` holds the
/// properties. Further arguments are ignored.
///
/// # Errors
///
/// [`ProtocolError::MissingValue`] if `args` is empty.
///
/// # Examples
///
/// ```
/// use trx_protocol::decode_local;
///
/// let request = decode_local(&["paterva.com", r"a=1#b=x\#y"]).unwrap();
/// assert_eq!(request.entity_type, "local.Unknown");
/// assert_eq!(request.property("a"), Some("1"));
/// assert_eq!(request.property("b"), Some("x#y"));
/// ```
pub fn decode_local<S: AsRef<str>>(args: &[S]) -> Result<Request, ProtocolError> {
    let value = args.first().ok_or(ProtocolError::MissingValue)?;

    let mut request = Request::new(value.as_ref(), LOCAL_ENTITY_TYPE);
    request.weight = LOCAL_DEFAULT;
    request.slider = LOCAL_DEFAULT;

    if let Some(raw) = args.get(1) {
        for (name, value) in parse_local_properties(raw.as_ref()) {
            request.properties.insert(name, value);
        }
    }

    Ok(request)
}

/// Placeholder tokens for the three escape sequences
struct Placeholders {
    backslash: String,
    hash: String,
    equals: String,
}

impl Placeholders {
    /// Draw three distinct tokens, none of which occurs in `input`
    fn for_input(input: &str) -> Self {
        let mut taken: Vec<String> = Vec::with_capacity(3);
        while taken.len() < 3 {
            let token = format!("%{}%", Uuid::new_v4().simple());
            if !input.contains(&token) && !taken.contains(&token) {
                taken.push(token);
            }
        }
        let equals = taken.pop().unwrap_or_default();
        let hash = taken.pop().unwrap_or_default();
        let backslash = taken.pop().unwrap_or_default();
        Self {
            backslash,
            hash,
            equals,
        }
    }

    fn protect(&self, input: &str) -> String {
        input
            .replace(r"\\", &self.backslash)
            .replace(r"\#", &self.hash)
            .replace(r"\=", &self.equals)
    }

    fn restore(&self, input: &str) -> String {
        input
            .replace(&self.hash, "#")
            .replace(&self.equals, "=")
            .replace(&self.backslash, r"\")
    }
}

/// Split a `name=value#name=value` string into unescaped pairs.
///
/// Empty segments are skipped; a segment without `=` is logged and skipped.
pub fn parse_local_properties(raw: &str) -> Vec<(String, String)> {
    let placeholders = Placeholders::for_input(raw);
    let protected = placeholders.protect(raw);

    let mut pairs = Vec::new();
    for segment in protected.split('#') {
        if segment.is_empty() {
            continue;
        }
        match segment.split_once('=') {
            Some((name, value)) => {
                pairs.push((placeholders.restore(name), placeholders.restore(value)));
            }
            None => {
                warn!(
                    segment = %placeholders.restore(segment),
                    "Ignoring local property without '='"
                );
            }
        }
    }
    pairs
}
