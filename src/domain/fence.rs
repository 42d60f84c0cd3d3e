//! Payload extraction from free-form model replies.
//!
//! Models wrap JSON in markdown code fences and surround it with prose. Rules, in
//! priority order:
//! 1. the first fenced block tagged `json`
//! 2. the first fenced block of any kind
//! 3. the whole reply, untouched
//!
//! A fence only counts once its closing ``` is found.

const FENCE: &str = "```";

/// Text picked out of a reply, tagged with the rule that matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FencedPayload<'a> {
    JsonFence(&'a str),
    AnyFence(&'a str),
    /// No complete fence; carries the reply verbatim.
    NoFence(&'a str),
}

impl<'a> FencedPayload<'a> {
    pub fn text(&self) -> &'a str {
        match *self {
            FencedPayload::JsonFence(s) | FencedPayload::AnyFence(s) | FencedPayload::NoFence(s) => s,
        }
    }

    pub fn is_fenced(&self) -> bool {
        !matches!(self, FencedPayload::NoFence(_))
    }
}

/// Pick the JSON payload out of a model reply. Never fails.
pub fn extract_payload(reply: &str) -> FencedPayload<'_> {
    if let Some(body) = first_json_block(reply) {
        return FencedPayload::JsonFence(body);
    }
    if let Some(body) = first_block(reply) {
        return FencedPayload::AnyFence(body);
    }
    FencedPayload::NoFence(reply)
}

/// Body of the first `json`-tagged block. Every ``` is tried as an opener, so a
/// stray fence in the prose cannot hide a later block.
fn first_json_block(reply: &str) -> Option<&str> {
    let mut from = 0;
    while let Some(rel) = reply[from..].find(FENCE) {
        let open = from + rel + FENCE.len();
        if let Some(body) = json_body(&reply[open..]) {
            return Some(body);
        }
        from = open;
    }
    None
}

/// `rest` starts right after an opening fence.
fn json_body(rest: &str) -> Option<&str> {
    let inner = &rest[..rest.find(FENCE)?];
    match inner.find('\n') {
        Some(nl) => inner[..nl]
            .trim()
            .eq_ignore_ascii_case("json")
            .then(|| inner[nl + 1..].trim()),
        None => strip_json_tag(inner),
    }
}

/// Single-line form: "```json {...}```".
fn strip_json_tag(inner: &str) -> Option<&str> {
    let tag = inner.get(..4)?;
    let rest = &inner[4..];
    let separated = rest
        .chars()
        .next()
        .is_some_and(|c| c.is_whitespace() || c == '{' || c == '[');
    (tag.eq_ignore_ascii_case("json") && separated).then(|| rest.trim())
}

/// Body of the first complete fenced block, whatever its tag.
///
/// The info string runs from the opening fence to the end of its line. A block
/// closed on its opening line has no info string.
fn first_block(reply: &str) -> Option<&str> {
    let open = reply.find(FENCE)? + FENCE.len();
    let rest = &reply[open..];
    let inner = &rest[..rest.find(FENCE)?];
    let body = match inner.find('\n') {
        Some(nl) => &inner[nl + 1..],
        None => inner,
    };
    Some(body.trim())
}
