//! RSS feed extraction.
//!
//! The feed is walked as a stream of XML events. Every `item` element at any
//! depth becomes one [`Article`], in start-tag order. Only the first direct
//! child named `title`, `link`, `description` or `pubDate` is read for each
//! field, and only its leading text (text before its first child element).
//!
//! Names are matched literally, so namespaced feeds such as Atom (`entry`,
//! `atom:link`) produce no items rather than an error.
//!
//! Text is decoded with the encoding named in the XML declaration (UTF-8 when
//! there is none). General entities declared in the internal DTD subset are
//! expanded as plain text.

use crate::error::{Error, Result};
use crate::fetch::FetchPage;
use crate::models::Article;
use quick_xml::encoding::Decoder;
use quick_xml::escape::{resolve_predefined_entity, unescape_with};
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use std::borrow::Cow;
use std::collections::HashMap;
use tracing::{debug, info, instrument};

/// Fetch an RSS feed and extract its items.
///
/// The request carries no custom `User-Agent`.
///
/// # Arguments
///
/// * `fetcher` - Page source used for the single GET request
/// * `url` - The feed URL
///
/// # Returns
///
/// One [`Article`] per `item` element, or an error if the request fails or
/// the body is not well-formed XML ([`Error::MalformedXml`]).
///
/// # Examples
///
/// ```ignore
/// let fetcher = HttpFetcher::new(&Settings::default())?;
/// let articles = rss::extract(&fetcher, "https://example.com/feed.xml").await?;
/// ```
#[instrument(level = "info", skip(fetcher))]
pub async fn extract(fetcher: &impl FetchPage, url: &str) -> Result<Vec<Article>> {
    let body = fetcher.fetch(url, None).await?;
    let articles = parse_rss_feed(&body)?;
    info!(count = articles.len(), "Parsed RSS items");
    Ok(articles)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Link,
    Description,
    Published,
}

impl Field {
    fn from_name(name: &[u8]) -> Option<Self> {
        match name {
            b"title" => Some(Field::Title),
            b"link" => Some(Field::Link),
            b"description" => Some(Field::Description),
            b"pubDate" => Some(Field::Published),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
struct ItemFields {
    title: Option<String>,
    link: Option<String>,
    description: Option<String>,
    published: Option<String>,
}

impl ItemFields {
    fn slot(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Title => &mut self.title,
            Field::Link => &mut self.link,
            Field::Description => &mut self.description,
            Field::Published => &mut self.published,
        }
    }

    fn into_article(self) -> Article {
        Article {
            title: Article::or_not_available(self.title),
            link: Article::or_not_available(self.link),
            description: Article::or_not_available(self.description),
            published: Article::or_not_available(self.published),
        }
    }
}

/// Text being collected for one item field.
#[derive(Debug)]
struct Capture {
    item: usize,
    field: Field,
    depth: usize,
    text: String,
    /// Set once a child element opens; later text belongs to that child.
    closed: bool,
}

/// Items currently open, as `(depth, index into items)`.
type OpenItems = Vec<(usize, usize)>;

/// Entities declared in the internal DTD subset, by name.
type Entities = HashMap<String, String>;

/// If an element at `depth` named `name` is an unread field of the innermost
/// open item, return that field and the item index.
fn item_field(
    name: &[u8],
    depth: usize,
    open: &OpenItems,
    items: &mut [ItemFields],
) -> Option<(Field, usize)> {
    let &(item_depth, idx) = open.last()?;
    if depth != item_depth + 1 {
        return None;
    }
    let field = Field::from_name(name)?;
    items[idx].slot(field).is_none().then_some((field, idx))
}

fn malformed(reason: &str) -> Error {
    Error::MalformedXml(reason.to_string())
}

fn decode<'b>(decoder: Decoder, bytes: &'b [u8]) -> Result<Cow<'b, str>> {
    decoder
        .decode(bytes)
        .map_err(|e| Error::MalformedXml(e.to_string()))
}

fn lookup<'a>(entities: &'a Entities, name: &str) -> Option<&'a str> {
    entities
        .get(name)
        .map(String::as_str)
        .or_else(|| resolve_predefined_entity(name))
}

/// Expand character and entity references in `raw`.
fn resolve(raw: &str, entities: &Entities) -> Result<String> {
    unescape_with(raw, |name| lookup(entities, name))
        .map(Cow::into_owned)
        .map_err(|e| Error::MalformedXml(e.to_string()))
}

fn is_xml_whitespace(text: &str) -> bool {
    text.chars().all(|c| matches!(c, ' ' | '\t' | '\r' | '\n'))
}

/// Collect `<!ENTITY name "value">` declarations from a DOCTYPE body.
///
/// Parameter and external entities are ignored. The first declaration of a
/// name wins, and values may refer to entities declared before them.
fn internal_entities(doctype: &str) -> Entities {
    const DECL: &str = "<!ENTITY";
    let mut entities = Entities::new();
    let mut rest = doctype;

    while let Some(pos) = rest.find(DECL) {
        rest = rest[pos + DECL.len()..].trim_start();
        if rest.starts_with('%') {
            continue;
        }
        let name_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let (name, after) = rest.split_at(name_end);
        let after = after.trim_start();
        let Some(quote) = after.chars().next().filter(|c| matches!(*c, '"' | '\'')) else {
            rest = after;
            continue;
        };
        let body = &after[1..];
        let Some(end) = body.find(quote) else {
            break;
        };
        let raw = &body[..end];
        let value = resolve(raw, &entities).unwrap_or_else(|_| raw.to_string());
        entities.entry(name.to_string()).or_insert(value);
        rest = &body[end + 1..];
    }

    entities
}

/// Parse an RSS document into articles.
///
/// # Arguments
///
/// * `xml` - Raw response body
///
/// # Returns
///
/// One [`Article`] per `item` element in document order. Absent sub-elements
/// are `"N/A"`; present but empty ones are `""`.
///
/// # Errors
///
/// Returns [`Error::MalformedXml`] when the body is not a well-formed XML
/// document: syntax errors, mismatched or unclosed tags, unknown entities,
/// bytes invalid in the declared encoding, no root element at all, or
/// content (elements or non-whitespace text) outside the root element.
///
/// # Examples
///
/// ```ignore
/// let xml = b"<rss><channel><item><title>Hello</title></item></channel></rss>";
/// let articles = parse_rss_feed(xml)?;
/// assert_eq!(articles[0].title, "Hello");
/// assert_eq!(articles[0].link, "N/A");
/// ```
pub fn parse_rss_feed(xml: &[u8]) -> Result<Vec<Article>> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();

    let mut items: Vec<ItemFields> = Vec::new();
    let mut open: OpenItems = Vec::new();
    let mut capture: Option<Capture> = None;
    let mut entities = Entities::new();
    let mut depth = 0usize;
    let mut seen_root = false;
    let mut root_closed = false;

    loop {
        let event = reader.read_event_into(&mut buf)?;
        let decoder = reader.decoder();
        match event {
            Event::Start(e) => {
                if root_closed {
                    return Err(malformed("junk after document element"));
                }
                depth += 1;
                seen_root = true;
                if let Some(c) = capture.as_mut() {
                    c.closed = true;
                }
                let name = e.name();
                if name.as_ref() == b"item" {
                    items.push(ItemFields::default());
                    open.push((depth, items.len() - 1));
                } else if let Some((field, item)) =
                    item_field(name.as_ref(), depth, &open, &mut items)
                {
                    capture = Some(Capture {
                        item,
                        field,
                        depth,
                        text: String::new(),
                        closed: false,
                    });
                }
            }
            Event::Empty(e) => {
                if root_closed {
                    return Err(malformed("junk after document element"));
                }
                seen_root = true;
                if depth == 0 {
                    root_closed = true;
                }
                if let Some(c) = capture.as_mut() {
                    c.closed = true;
                }
                let name = e.name();
                if name.as_ref() == b"item" {
                    items.push(ItemFields::default());
                } else if let Some((field, item)) =
                    item_field(name.as_ref(), depth + 1, &open, &mut items)
                {
                    *items[item].slot(field) = Some(String::new());
                }
            }
            Event::End(_) => {
                if let Some(c) = capture.take_if(|c| c.depth == depth) {
                    *items[c.item].slot(c.field) = Some(c.text);
                }
                if open.last().is_some_and(|&(d, _)| d == depth) {
                    open.pop();
                }
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| malformed("unmatched end tag"))?;
                if depth == 0 {
                    root_closed = true;
                }
            }
            Event::Text(e) => {
                let text = decode(decoder, &e)?;
                if depth == 0 {
                    if !is_xml_whitespace(&text) {
                        return Err(malformed("text outside the document element"));
                    }
                } else if let Some(c) = capture.as_mut().filter(|c| !c.closed && c.depth == depth) {
                    c.text.push_str(&resolve(&text, &entities)?);
                }
            }
            Event::CData(e) => {
                if depth == 0 {
                    return Err(malformed("CDATA outside the document element"));
                }
                let text = decode(decoder, &e)?;
                if let Some(c) = capture.as_mut().filter(|c| !c.closed && c.depth == depth) {
                    c.text.push_str(&text);
                }
            }
            Event::GeneralRef(e) => {
                if depth == 0 {
                    return Err(malformed("reference outside the document element"));
                }
                let name = decode(decoder, &e)?;
                let resolved = resolve(&format!("&{name};"), &entities)?;
                if let Some(c) = capture.as_mut().filter(|c| !c.closed && c.depth == depth) {
                    c.text.push_str(&resolved);
                }
            }
            Event::DocType(e) => {
                entities = internal_entities(&decode(decoder, &e)?);
                debug!(count = entities.len(), "Read internal DTD entities");
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if !seen_root {
        return Err(malformed("no element found"));
    }
    if depth != 0 {
        return Err(malformed("unclosed element"));
    }

    Ok(items.into_iter().map(ItemFields::into_article).collect())
}
