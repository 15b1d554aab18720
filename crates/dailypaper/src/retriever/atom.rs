//! Streaming parser for arXiv's Atom listing feed.

use quick_xml::{
  events::{BytesStart, Event},
  Reader,
};

use super::*;

/// Fields collected for one `<entry>` while its children stream past.
#[derive(Debug, Default)]
struct EntryBuilder {
  /// `<id>`, the abstract URL
  id:               String,
  /// `<title>`
  title:            String,
  /// `<summary>`
  summary:          String,
  /// `<author><name>` values in order
  authors:          Vec<String>,
  /// `<published>`, RFC 3339
  published:        String,
  /// `<updated>`, RFC 3339
  updated:          String,
  /// `term` of every `<category>`
  categories:       Vec<String>,
  /// `term` of `<arxiv:primary_category>`
  primary_category: Option<String>,
  /// `<link rel="related" type="application/pdf">`
  pdf_url:          Option<String>,
  /// `<link rel="alternate">`
  abs_url:          Option<String>,
  /// `<arxiv:comment>`
  comment:          Option<String>,
  /// `<arxiv:journal_ref>`
  journal_ref:      Option<String>,
}

impl EntryBuilder {
  /// Records what an entry child carries in its attributes.
  fn attributes(&mut self, element: &BytesStart) -> Result<()> {
    match element.local_name().as_ref() {
      b"category" =>
        if let Some(term) = attribute(element, b"term")? {
          self.categories.push(term);
        },
      b"primary_category" => self.primary_category = attribute(element, b"term")?,
      b"link" => {
        let href = attribute(element, b"href")?;
        let rel = attribute(element, b"rel")?;
        let kind = attribute(element, b"type")?;
        match (rel.as_deref(), kind.as_deref()) {
          (Some("related"), Some("application/pdf")) => self.pdf_url = self.pdf_url.take().or(href),
          (Some("alternate"), _) => self.abs_url = self.abs_url.take().or(href),
          _ => {},
        }
      },
      _ => {},
    }
    Ok(())
  }

  /// Stores the text content of a closed entry child.
  fn text(&mut self, element: &[u8], parent: Option<&[u8]>, text: String) {
    match (element, parent) {
      (b"id", _) => self.id = text,
      (b"title", _) => self.title = text,
      (b"summary", _) => self.summary = text,
      (b"name", Some(b"author")) => self.authors.push(text),
      (b"published", _) => self.published = text,
      (b"updated", _) => self.updated = text,
      (b"comment", _) => self.comment = Some(text).filter(|t| !t.is_empty()),
      (b"journal_ref", _) => self.journal_ref = Some(text).filter(|t| !t.is_empty()),
      _ => {},
    }
  }

  /// Turns the collected fields into a record.
  fn build(self, listing_category: &str) -> Result<PaperRecord> {
    let id = self.id.trim().trim_end_matches('/').rsplit('/').next().unwrap_or_default().to_string();
    if id.is_empty() {
      return Err(DailyPaperError::ApiError("feed entry without an id".to_string()));
    }
    let published = parse_date(&self.published)?;
    let updated = if self.updated.is_empty() { published } else { parse_date(&self.updated)? };

    let mut paper = PaperRecord::new(id, normalize(&self.title), normalize(&self.summary), published);
    paper.updated = updated;
    paper.authors = self.authors.iter().map(|name| normalize(name)).collect();
    paper.primary_category = self
      .primary_category
      .or_else(|| self.categories.first().cloned())
      .unwrap_or_else(|| listing_category.to_string());
    paper.categories = self.categories;
    if let Some(pdf_url) = self.pdf_url {
      paper.pdf_url = pdf_url;
    }
    if let Some(abs_url) = self.abs_url {
      paper.arxiv_url = abs_url;
    }
    paper.comment = self.comment.map(|c| normalize(&c));
    paper.journal_ref = self.journal_ref.map(|j| normalize(&j));
    paper.listing_category = Some(listing_category.to_string());
    Ok(paper)
  }
}

/// Parses an arXiv Atom feed into records.
///
/// `listing_category` is the category that was queried; it is recorded on every record and
/// stands in for the primary category when the feed omits one. Entries that cannot be turned
/// into a record (no id, unparseable dates) are logged and skipped.
pub fn parse_feed(xml: &str, listing_category: &str) -> Result<Vec<PaperRecord>> {
  let mut reader = Reader::from_str(xml);
  reader.config_mut().trim_text(true);

  let mut papers = Vec::new();
  let mut entry: Option<EntryBuilder> = None;
  let mut path: Vec<Vec<u8>> = Vec::new();
  let mut text = String::new();
  let mut buf = Vec::new();

  loop {
    match reader.read_event_into(&mut buf)? {
      Event::Start(e) => {
        let name = e.local_name().as_ref().to_vec();
        if name == b"entry" {
          entry = Some(EntryBuilder::default());
        } else if let Some(entry) = entry.as_mut() {
          entry.attributes(&e)?;
        }
        path.push(name);
        text.clear();
      },
      Event::Empty(e) =>
        if let Some(entry) = entry.as_mut() {
          entry.attributes(&e)?;
        },
      Event::Text(e) => text.push_str(&e.unescape()?),
      Event::CData(e) => text.push_str(&String::from_utf8_lossy(&e.into_inner())),
      Event::End(_) => {
        let name = path.pop().unwrap_or_default();
        if name == b"entry" {
          if let Some(builder) = entry.take() {
            match builder.build(listing_category) {
              Ok(paper) => papers.push(paper),
              Err(e) => warn!("Skipping malformed entry in {listing_category} feed: {e}"),
            }
          }
        } else if let Some(entry) = entry.as_mut() {
          let parent = path.last().map(Vec::as_slice);
          entry.text(&name, parent, std::mem::take(&mut text));
        }
        text.clear();
      },
      Event::Eof => break,
      _ => {},
    }
    buf.clear();
  }

  debug!("Parsed {} entries from {listing_category} feed", papers.len());
  Ok(papers)
}

/// Reads an attribute by local name.
fn attribute(element: &BytesStart, key: &[u8]) -> Result<Option<String>> {
  for attr in element.attributes() {
    let attr = attr.map_err(quick_xml::Error::from)?;
    if attr.key.local_name().as_ref() == key {
      return Ok(Some(attr.unescape_value()?.into_owned()));
    }
  }
  Ok(None)
}

/// Collapses runs of whitespace, including the line breaks arXiv inserts into titles.
fn normalize(text: &str) -> String { text.split_whitespace().collect::<Vec<_>>().join(" ") }

/// The calendar date of an RFC 3339 timestamp.
fn parse_date(timestamp: &str) -> Result<NaiveDate> {
  DateTime::parse_from_rfc3339(timestamp.trim())
    .map(|dt| dt.with_timezone(&Utc).date_naive())
    .map_err(|e| DailyPaperError::InvalidDate(format!("{timestamp:?}: {e}")))
}
