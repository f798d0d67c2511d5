/*!
 * In-memory representation of a parsed STJ document.
 *
 * The model is built once per validation call from a generic JSON tree and is
 * read-only afterwards. Construction only fails when the tree does not have
 * the STJ root shape; a field holding the wrong JSON type is kept as absent
 * here and reported by the structural validator instead.
 *
 * Array order (segments, words, speakers, styles, language lists) is
 * preserved and every item remembers its index in the input array, so the
 * semantic rules can name exact field paths.
 */

use serde_json::{Map, Value};

use crate::errors::MalformedInputError;

/// Key of the wrapper object that holds the STJ root
pub const STJ_ROOT_KEY: &str = "stj";

/// A value together with its position in the input array
#[derive(Debug, Clone, PartialEq)]
pub struct Indexed<T> {
    pub index: usize,
    pub value: T,
}

/// Namespaced extension data (`namespace -> arbitrary JSON`)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extensions {
    namespaces: Map<String, Value>,
}

impl Extensions {
    fn from_value(value: Option<&Value>) -> Option<Self> {
        value.and_then(Value::as_object).map(|namespaces| Self {
            namespaces: namespaces.clone(),
        })
    }

    /// Iterate over the top-level namespaces
    pub fn namespaces(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.namespaces.iter()
    }

    /// Data stored under one namespace
    pub fn get(&self, namespace: &str) -> Option<&Value> {
        self.namespaces.get(namespace)
    }

    pub fn contains(&self, namespace: &str) -> bool {
        self.namespaces.contains_key(namespace)
    }

    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
    }
}

/// Tool that produced the transcription
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transcriber {
    pub name: Option<String>,
    pub version: Option<String>,
}

/// Origin media of the transcription
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Source {
    pub uri: Option<String>,
    /// Duration in seconds
    pub duration: Option<f64>,
    /// Languages spoken in the source media
    pub languages: Option<Vec<Indexed<String>>>,
    pub extensions: Option<Extensions>,
}

/// Document-level metadata
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    pub transcriber: Option<Transcriber>,
    /// RFC 3339 creation timestamp, unparsed
    pub created_at: Option<String>,
    pub source: Option<Source>,
    /// Transcription target languages, in declared order
    pub languages: Option<Vec<Indexed<String>>>,
    pub confidence_threshold: Option<f64>,
    pub extensions: Option<Extensions>,
}

/// A declared speaker
#[derive(Debug, Clone, PartialEq)]
pub struct Speaker {
    pub index: usize,
    pub id: Option<String>,
    pub name: Option<String>,
    /// Free-form attributes other than `id`, `name` and `extensions`
    pub attributes: Map<String, Value>,
    pub extensions: Option<Extensions>,
}

/// A declared style
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub index: usize,
    pub id: Option<String>,
    /// Text formatting block (`color`, `bold`, `size`, ...)
    pub text: Option<Map<String, Value>>,
    /// Display block (`align`, `vertical`, `position`, ...)
    pub display: Option<Map<String, Value>>,
    /// Free-form attributes other than the blocks above
    pub attributes: Map<String, Value>,
    pub extensions: Option<Extensions>,
}

/// How completely a segment's words cover its text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordTimingMode {
    /// Every word of the segment text is timed
    Complete,
    /// Only some words are timed
    Partial,
}

impl WordTimingMode {
    /// Accepted spellings, in schema order
    pub const NAMES: &'static [&'static str] = &["complete", "partial"];

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "complete" => Some(Self::Complete),
            "partial" => Some(Self::Partial),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Complete => "complete",
            Self::Partial => "partial",
        }
    }
}

/// A timed sub-unit of a segment's text
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    pub index: usize,
    pub start: Option<f64>,
    pub end: Option<f64>,
    pub text: Option<String>,
    pub confidence: Option<f64>,
    pub is_zero_duration: bool,
    pub extensions: Option<Extensions>,
}

impl Word {
    /// True when both timestamps are present and equal
    pub fn has_zero_duration(&self) -> bool {
        matches!((self.start, self.end), (Some(start), Some(end)) if start == end)
    }
}

/// A timed unit of transcribed text
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub index: usize,
    pub start: Option<f64>,
    pub end: Option<f64>,
    pub text: Option<String>,
    pub speaker_id: Option<String>,
    pub style_id: Option<String>,
    pub language: Option<String>,
    pub confidence: Option<f64>,
    /// Mode as written in the document
    pub word_timing_mode: Option<WordTimingMode>,
    pub words: Option<Vec<Word>>,
    pub is_zero_duration: bool,
    pub extensions: Option<Extensions>,
}

impl Segment {
    /// `(start, end)` when the segment carries both timestamps
    pub fn timing(&self) -> Option<(f64, f64)> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }

    /// Words of the segment, empty when none were given
    pub fn words(&self) -> &[Word] {
        self.words.as_deref().unwrap_or(&[])
    }

    /// Mode the word checks apply: explicit mode, or `Complete` when words exist
    pub fn effective_word_timing_mode(&self) -> Option<WordTimingMode> {
        match self.word_timing_mode {
            Some(mode) => Some(mode),
            None if !self.words().is_empty() => Some(WordTimingMode::Complete),
            None => None,
        }
    }
}

/// Transcript body
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transcript {
    pub speakers: Option<Vec<Speaker>>,
    pub styles: Option<Vec<Style>>,
    pub segments: Vec<Segment>,
}

/// Root of a parsed STJ document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub version: Option<String>,
    pub metadata: Option<Metadata>,
    pub transcript: Transcript,
}

impl Document {
    /// Build a document from an already-decoded JSON tree.
    ///
    /// Fails only when the tree is not an object with an `stj` object member.
    pub fn from_value(value: &Value) -> Result<Self, MalformedInputError> {
        let root = stj_root(value)?;

        Ok(Self {
            version: string_field(root, "version"),
            metadata: object_field(root, "metadata").map(parse_metadata),
            transcript: object_field(root, "transcript")
                .map(parse_transcript)
                .unwrap_or_default(),
        })
    }

    /// Decode and build a document from JSON text
    pub fn from_json_str(input: &str) -> Result<Self, MalformedInputError> {
        let value = decode_json(input)?;
        Self::from_value(&value)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.transcript.segments
    }

    /// Declared speakers, empty when the list is absent
    pub fn speakers(&self) -> &[Speaker] {
        self.transcript.speakers.as_deref().unwrap_or(&[])
    }

    /// Declared styles, empty when the list is absent
    pub fn styles(&self) -> &[Style] {
        self.transcript.styles.as_deref().unwrap_or(&[])
    }

    /// Look up a speaker by id
    pub fn speaker(&self, id: &str) -> Option<&Speaker> {
        self.speakers().iter().find(|s| s.id.as_deref() == Some(id))
    }

    /// Look up a style by id
    pub fn style(&self, id: &str) -> Option<&Style> {
        self.styles().iter().find(|s| s.id.as_deref() == Some(id))
    }

    /// Transcription target languages from metadata
    pub fn declared_languages(&self) -> Vec<&str> {
        self.metadata
            .as_ref()
            .and_then(|m| m.languages.as_ref())
            .map(|langs| langs.iter().map(|l| l.value.as_str()).collect())
            .unwrap_or_default()
    }

    pub fn confidence_threshold(&self) -> Option<f64> {
        self.metadata.as_ref().and_then(|m| m.confidence_threshold)
    }
}

/// Decode JSON text into a generic tree
pub fn decode_json(input: &str) -> Result<Value, MalformedInputError> {
    serde_json::from_str(input).map_err(|e| MalformedInputError::Decode(e.to_string()))
}

/// Locate the `stj` root object inside the wrapper object
pub fn stj_root(value: &Value) -> Result<&Map<String, Value>, MalformedInputError> {
    let wrapper = value.as_object().ok_or(MalformedInputError::RootNotObject {
        found: json_type_name(value),
    })?;

    let root = wrapper
        .get(STJ_ROOT_KEY)
        .ok_or(MalformedInputError::MissingStjRoot)?;

    root.as_object().ok_or(MalformedInputError::StjRootNotObject {
        found: json_type_name(root),
    })
}

/// JSON type name used in messages
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn string_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(str::to_string)
}

fn number_field(map: &Map<String, Value>, key: &str) -> Option<f64> {
    map.get(key).and_then(Value::as_f64)
}

fn bool_field(map: &Map<String, Value>, key: &str) -> bool {
    map.get(key).and_then(Value::as_bool).unwrap_or(false)
}

fn object_field<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Map<String, Value>> {
    map.get(key).and_then(Value::as_object)
}

/// Object items of an array field, each with its original index
fn object_items<'a>(
    map: &'a Map<String, Value>,
    key: &str,
) -> Option<impl Iterator<Item = (usize, &'a Map<String, Value>)>> {
    map.get(key).and_then(Value::as_array).map(|items| {
        items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| item.as_object().map(|obj| (index, obj)))
    })
}

fn string_items(map: &Map<String, Value>, key: &str) -> Option<Vec<Indexed<String>>> {
    map.get(key).and_then(Value::as_array).map(|items| {
        items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| {
                item.as_str().map(|s| Indexed {
                    index,
                    value: s.to_string(),
                })
            })
            .collect()
    })
}

/// Members of `map` other than the listed keys
fn remaining_attributes(map: &Map<String, Value>, known: &[&str]) -> Map<String, Value> {
    map.iter()
        .filter(|(key, _)| !known.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

fn parse_metadata(map: &Map<String, Value>) -> Metadata {
    Metadata {
        transcriber: object_field(map, "transcriber").map(|t| Transcriber {
            name: string_field(t, "name"),
            version: string_field(t, "version"),
        }),
        created_at: string_field(map, "created_at"),
        source: object_field(map, "source").map(|s| Source {
            uri: string_field(s, "uri"),
            duration: number_field(s, "duration"),
            languages: string_items(s, "languages"),
            extensions: Extensions::from_value(s.get("extensions")),
        }),
        languages: string_items(map, "languages"),
        confidence_threshold: number_field(map, "confidence_threshold"),
        extensions: Extensions::from_value(map.get("extensions")),
    }
}

fn parse_transcript(map: &Map<String, Value>) -> Transcript {
    Transcript {
        speakers: object_items(map, "speakers")
            .map(|items| items.map(|(index, obj)| parse_speaker(index, obj)).collect()),
        styles: object_items(map, "styles")
            .map(|items| items.map(|(index, obj)| parse_style(index, obj)).collect()),
        segments: object_items(map, "segments")
            .map(|items| items.map(|(index, obj)| parse_segment(index, obj)).collect())
            .unwrap_or_default(),
    }
}

fn parse_speaker(index: usize, map: &Map<String, Value>) -> Speaker {
    Speaker {
        index,
        id: string_field(map, "id"),
        name: string_field(map, "name"),
        attributes: remaining_attributes(map, &["id", "name", "extensions"]),
        extensions: Extensions::from_value(map.get("extensions")),
    }
}

fn parse_style(index: usize, map: &Map<String, Value>) -> Style {
    Style {
        index,
        id: string_field(map, "id"),
        text: object_field(map, "text").cloned(),
        display: object_field(map, "display").cloned(),
        attributes: remaining_attributes(map, &["id", "text", "display", "extensions"]),
        extensions: Extensions::from_value(map.get("extensions")),
    }
}

fn parse_segment(index: usize, map: &Map<String, Value>) -> Segment {
    Segment {
        index,
        start: number_field(map, "start"),
        end: number_field(map, "end"),
        text: string_field(map, "text"),
        speaker_id: string_field(map, "speaker_id"),
        style_id: string_field(map, "style_id"),
        language: string_field(map, "language"),
        confidence: number_field(map, "confidence"),
        word_timing_mode: map
            .get("word_timing_mode")
            .and_then(Value::as_str)
            .and_then(WordTimingMode::parse),
        words: object_items(map, "words")
            .map(|items| items.map(|(index, obj)| parse_word(index, obj)).collect()),
        is_zero_duration: bool_field(map, "is_zero_duration"),
        extensions: Extensions::from_value(map.get("extensions")),
    }
}

fn parse_word(index: usize, map: &Map<String, Value>) -> Word {
    Word {
        index,
        start: number_field(map, "start"),
        end: number_field(map, "end"),
        text: string_field(map, "text"),
        confidence: number_field(map, "confidence"),
        is_zero_duration: bool_field(map, "is_zero_duration"),
        extensions: Extensions::from_value(map.get("extensions")),
    }
}
