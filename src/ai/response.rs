use serde_json::Value;

/// Which response shape yielded the generated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// `candidates[0].content.parts[0].text`
    CandidateContent,
    /// `candidates[0].text`
    CandidateText,
    /// `output[0].content[0].text`
    Output,
    /// The body itself is a JSON string.
    RawString,
}

type Extractor = fn(&Value) -> Option<&str>;

/// Extractors tried in order; the first one that yields non-empty text wins.
const EXTRACTORS: [(ResponseShape, Extractor); 4] = [
    (ResponseShape::CandidateContent, candidate_content),
    (ResponseShape::CandidateText, candidate_text),
    (ResponseShape::Output, output_content),
    (ResponseShape::RawString, raw_string),
];

/// Pull the generated text out of a generateContent response body.
///
/// Returns `None` if no known shape carries non-empty text.
pub fn extract_text(body: &Value) -> Option<(ResponseShape, String)> {
    EXTRACTORS.iter().find_map(|(shape, extract)| {
        extract(body)
            .filter(|text| !text.is_empty())
            .map(|text| (*shape, text.to_string()))
    })
}

fn candidate_content(body: &Value) -> Option<&str> {
    body.get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .get(0)?
        .get("text")?
        .as_str()
}

fn candidate_text(body: &Value) -> Option<&str> {
    body.get("candidates")?.get(0)?.get("text")?.as_str()
}

fn output_content(body: &Value) -> Option<&str> {
    body.get("output")?
        .get(0)?
        .get("content")?
        .get(0)?
        .get("text")?
        .as_str()
}

fn raw_string(body: &Value) -> Option<&str> {
    body.as_str()
}
