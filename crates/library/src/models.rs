//! Read-facing video model.

use devbyte_cache::VideoRecord;

/// Length, in characters, that [`DomainVideo::short_description`] aims for.
pub const SHORT_DESCRIPTION_LENGTH: usize = 200;
/// Separators stripped from the end of a truncated description.
const TRAILING_SEPARATORS: [&str; 4] = [", ", "; ", ": ", " "];

/// A video as presented to readers of the cache.
///
/// Decoupled from the storage representation; the mapping from
/// [`VideoRecord`] is lossless and one-directional.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DomainVideo {
    pub id: String,
    pub title: String,
    pub description: String,
    pub url: String,
    pub thumbnail_url: String,
}
impl From<VideoRecord> for DomainVideo {
    fn from(record: VideoRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            description: record.description,
            url: record.url,
            thumbnail_url: record.thumbnail_url,
        }
    }
}
impl DomainVideo {
    /// Description cut down to roughly [`SHORT_DESCRIPTION_LENGTH`] characters
    /// for list views.
    pub fn short_description(&self) -> String {
        smart_truncate(&self.description, SHORT_DESCRIPTION_LENGTH)
    }
}

/// Truncates `text` on a word boundary once it grows past `length` characters.
///
/// Whole space-separated words are kept until the output is longer than
/// `length`, so the result may overshoot by up to one word. A trailing
/// separator left behind by the cut is removed, and `"..."` is appended when
/// any words were dropped.
pub fn smart_truncate(text: &str, length: usize) -> String {
    let mut output = String::with_capacity(text.len().min(length + 32));
    let mut kept_chars = 0;
    let mut truncated = false;
    for word in text.split(' ') {
        if kept_chars > length {
            truncated = true;
            break;
        }
        output.push_str(word);
        output.push(' ');
        kept_chars += word.chars().count() + 1;
    }
    for separator in TRAILING_SEPARATORS {
        if output.ends_with(separator) {
            output.truncate(output.len() - separator.len());
        }
    }
    if truncated {
        output.push_str("...");
    }
    output
}
