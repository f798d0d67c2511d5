/*!
 * Document model for STJ transcriptions.
 *
 * - `model`: read-only tree built from a decoded JSON value
 */

pub mod model;

pub use model::{
    decode_json, json_type_name, stj_root, Document, Extensions, Indexed, Metadata, Segment,
    Source, Speaker, Style, Transcriber, Transcript, Word, WordTimingMode, STJ_ROOT_KEY,
};
