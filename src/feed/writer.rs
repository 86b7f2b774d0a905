use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use thiserror::Error;

use crate::feed::transform::OutputFeed;
use crate::util::clean_path;

/// Errors that can occur while serializing or persisting the output feed.
#[derive(Debug, Error)]
pub enum WriteError {
    /// The XML writer rejected an event.
    #[error("Failed to render RSS: {0}")]
    Render(String),
    /// The destination could not be created, written or replaced.
    #[error("Failed to write feed to '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl WriteError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        WriteError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

/// Renders the feed as an RSS 2.0 document.
///
/// Channel carries title, link, description, copyright and the generation
/// time as both `pubDate` and `lastBuildDate`. Each item carries title, link,
/// description and `pubDate`. Dates use RFC 2822.
pub fn render_rss(feed: &OutputFeed) -> Result<String, WriteError> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

    emit(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
    )?;

    let mut rss = BytesStart::new("rss");
    rss.push_attribute(("version", "2.0"));
    emit(&mut writer, Event::Start(rss))?;
    emit(&mut writer, Event::Start(BytesStart::new("channel")))?;

    let generated = rfc2822(&feed.generated_at);
    text_element(&mut writer, "title", &feed.title)?;
    text_element(&mut writer, "link", &feed.link)?;
    text_element(&mut writer, "description", &feed.description)?;
    text_element(&mut writer, "copyright", &feed.copyright)?;
    text_element(&mut writer, "pubDate", &generated)?;
    text_element(&mut writer, "lastBuildDate", &generated)?;

    for item in &feed.items {
        emit(&mut writer, Event::Start(BytesStart::new("item")))?;
        text_element(&mut writer, "title", &item.title)?;
        text_element(&mut writer, "link", &item.comment_link)?;
        text_element(&mut writer, "description", &item.body)?;
        text_element(&mut writer, "pubDate", &rfc2822(&item.created_at))?;
        emit(&mut writer, Event::End(BytesEnd::new("item")))?;
    }

    emit(&mut writer, Event::End(BytesEnd::new("channel")))?;
    emit(&mut writer, Event::End(BytesEnd::new("rss")))?;

    let bytes = writer.into_inner().into_inner();
    String::from_utf8(bytes).map_err(|e| WriteError::Render(e.to_string()))
}

/// Writes the rendered feed to an arbitrary stream.
pub fn write_feed<W: Write>(feed: &OutputFeed, mut out: W) -> Result<(), WriteError> {
    let content = render_rss(feed)?;
    out.write_all(content.as_bytes())
        .and_then(|()| out.flush())
        .map_err(|e| WriteError::io(Path::new("<stream>"), e))
}

/// Writes the rendered feed to `path`, replacing any existing file.
///
/// The path is cleaned lexically first. If it names an existing symlink, the
/// link target is replaced and the link itself is kept. Content goes to a
/// temporary file in the same directory, is synced, then renamed over the
/// destination, so the destination is never left half-written.
pub fn write_feed_to_path(feed: &OutputFeed, path: &Path) -> Result<(), WriteError> {
    use std::time::{SystemTime, UNIX_EPOCH};

    let path = resolve_destination(&clean_path(path))?;
    tracing::debug!(path = %path.display(), items = feed.items.len(), "Writing feed");

    let content = render_rss(feed)?;

    // Unpredictable temp name so nothing can be planted at it ahead of time
    let random_suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let temp_path = path.with_extension(format!("tmp.{:016x}", random_suffix));

    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&temp_path)
        .map_err(|e| WriteError::io(&temp_path, e))?;

    if let Err(e) = file.write_all(content.as_bytes()).and_then(|()| file.sync_all()) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(WriteError::io(&temp_path, e));
    }

    drop(file);

    #[cfg(windows)]
    if path.exists() {
        if let Err(e) = std::fs::remove_file(&path) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(WriteError::io(&path, e));
        }
    }

    if let Err(e) = std::fs::rename(&temp_path, &path) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(WriteError::io(&path, e));
    }

    Ok(())
}

/// Follows a symlink at `path` so the rename lands on its target.
fn resolve_destination(path: &Path) -> Result<PathBuf, WriteError> {
    match std::fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => {
            let target = std::fs::canonicalize(path).map_err(|e| WriteError::io(path, e))?;
            tracing::debug!(
                link = %path.display(),
                target = %target.display(),
                "Writing through symlink"
            );
            Ok(target)
        }
        _ => Ok(path.to_path_buf()),
    }
}

fn rfc2822(time: &DateTime<Utc>) -> String {
    time.to_rfc2822()
}

fn emit<W: Write>(writer: &mut Writer<W>, event: Event<'_>) -> Result<(), WriteError> {
    writer
        .write_event(event)
        .map_err(|e| WriteError::Render(e.to_string()))
}

fn text_element<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    text: &str,
) -> Result<(), WriteError> {
    emit(writer, Event::Start(BytesStart::new(name)))?;
    emit(writer, Event::Text(BytesText::new(text)))?;
    emit(writer, Event::End(BytesEnd::new(name)))
}
