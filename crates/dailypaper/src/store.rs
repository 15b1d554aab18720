//! Append-only JSON storage for harvested papers.
//!
//! A store is a directory with the following layout:
//!
//! ```text
//! data/
//! ├── papers.json              every record, newest first
//! ├── papers_2025-10-02.json   records of one harvest published that day
//! ├── months_index.json        per-month counts, newest month first
//! └── months/
//!     ├── 2025-10.json
//!     └── 2025-09.json
//! ```
//!
//! Records are identified by [`PaperRecord::id`]. Merging never replaces or edits a stored
//! record: incoming records whose id is already present are dropped.
//!
//! # Examples
//!
//! ```no_run
//! use dailypaper::store::PaperStore;
//!
//! # fn example(batch: Vec<dailypaper::paper::PaperRecord>) -> dailypaper::error::Result<()> {
//! let mut store = PaperStore::open("data")?;
//! let report = store.merge(batch);
//! store.save()?;
//! println!("added {} papers, {} stored", report.added, report.total);
//! # Ok(())
//! # }
//! ```

use std::fs;

use super::*;

/// File holding every stored record.
pub const PAPERS_FILE: &str = "papers.json";

/// File holding the per-month summary.
pub const MONTHS_INDEX_FILE: &str = "months_index.json";

/// Directory holding one file per month.
pub const MONTHS_DIR: &str = "months";

/// Outcome of [`PaperStore::merge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeReport {
  /// Records that were not stored before
  pub added: usize,
  /// Records stored after the merge
  pub total: usize,
}

/// Counts for one `YYYY-MM` bucket of `months_index.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthSummary {
  /// `YYYY-MM`
  pub month:           String,
  /// Records published that month
  pub count:           usize,
  /// Of those, records with an inferred venue
  pub published_count: usize,
  /// Of those, records without a venue
  pub preprint_count:  usize,
}

/// The paper collection backed by a data directory.
#[derive(Debug, Clone)]
pub struct PaperStore {
  /// Directory the files live in
  dir:    PathBuf,
  /// All records, newest first
  papers: Vec<PaperRecord>,
}

impl PaperStore {
  /// Loads the store in `dir`.
  ///
  /// A missing directory or `papers.json` yields an empty store; nothing is created until
  /// [`save`](Self::save).
  pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
    let dir = dir.as_ref().to_path_buf();
    let path = dir.join(PAPERS_FILE);
    let papers = if path.exists() {
      let papers: Vec<PaperRecord> = serde_json::from_str(&fs::read_to_string(&path)?)?;
      debug!("Loaded {} papers from {}", papers.len(), path.display());
      papers
    } else {
      debug!("No {} yet, starting empty", path.display());
      Vec::new()
    };
    Ok(Self { dir, papers })
  }

  /// The data directory.
  pub fn dir(&self) -> &Path { &self.dir }

  /// All stored records, newest first.
  pub fn papers(&self) -> &[PaperRecord] { &self.papers }

  /// Number of stored records.
  pub fn len(&self) -> usize { self.papers.len() }

  /// Whether nothing is stored.
  pub fn is_empty(&self) -> bool { self.papers.is_empty() }

  /// Whether a record with `id` is stored.
  pub fn contains(&self, id: &str) -> bool { self.papers.iter().any(|paper| paper.id == id) }

  /// Adds the records of `incoming` that are not stored yet.
  ///
  /// Only the first occurrence of an id within `incoming` is considered. New records go in
  /// front of the existing ones and the whole collection is then stably sorted by publication
  /// date, newest first.
  pub fn merge(&mut self, incoming: impl IntoIterator<Item = PaperRecord>) -> MergeReport {
    let mut known: BTreeSet<String> = self.papers.iter().map(|paper| paper.id.clone()).collect();
    let mut merged: Vec<PaperRecord> =
      incoming.into_iter().filter(|paper| known.insert(paper.id.clone())).collect();
    let added = merged.len();

    merged.append(&mut self.papers);
    merged.sort_by(|a, b| b.published.cmp(&a.published));
    self.papers = merged;

    let report = MergeReport { added, total: self.papers.len() };
    info!("Merged {} new papers, {} stored", report.added, report.total);
    report
  }

  /// Records grouped by `YYYY-MM` of their publication date, each group newest first.
  pub fn by_month(&self) -> BTreeMap<String, Vec<&PaperRecord>> {
    let mut months: BTreeMap<String, Vec<&PaperRecord>> = BTreeMap::new();
    for paper in &self.papers {
      months.entry(paper.month()).or_default().push(paper);
    }
    months
  }

  /// Per-month counts, newest month first.
  pub fn months_index(&self) -> Vec<MonthSummary> {
    self
      .by_month()
      .into_iter()
      .rev()
      .map(|(month, papers)| {
        let published_count = papers.iter().filter(|paper| paper.is_published()).count();
        MonthSummary {
          month,
          count: papers.len(),
          published_count,
          preprint_count: papers.len() - published_count,
        }
      })
      .collect()
  }

  /// Writes `papers.json`, the month files and `months_index.json`.
  pub fn save(&self) -> Result<()> {
    fs::create_dir_all(self.dir.join(MONTHS_DIR))?;
    write_json(&self.dir.join(PAPERS_FILE), &self.papers)?;

    for (month, papers) in self.by_month() {
      write_json(&self.dir.join(MONTHS_DIR).join(format!("{month}.json")), &papers)?;
    }
    let index = self.months_index();
    write_json(&self.dir.join(MONTHS_INDEX_FILE), &index)?;

    info!("Saved {} papers across {} months to {}", self.len(), index.len(), self.dir.display());
    Ok(())
  }

  /// Writes `papers_<today>.json` with the records of `batch` published on `today`.
  ///
  /// Returns the path written, or `None` when no record qualifies and nothing was written.
  pub fn write_daily_snapshot(
    &self,
    batch: &[PaperRecord],
    today: NaiveDate,
  ) -> Result<Option<PathBuf>> {
    let todays: Vec<&PaperRecord> = batch.iter().filter(|paper| paper.published == today).collect();
    if todays.is_empty() {
      debug!("No papers published on {today}, skipping snapshot");
      return Ok(None);
    }

    fs::create_dir_all(&self.dir)?;
    let path = self.dir.join(format!("papers_{}.json", today.format("%Y-%m-%d")));
    write_json(&path, &todays)?;
    info!("Saved {} papers published today to {}", todays.len(), path.display());
    Ok(Some(path))
  }
}

/// Reads a previously written `months_index.json`.
pub fn read_months_index(dir: impl AsRef<Path>) -> Result<Vec<MonthSummary>> {
  let content = fs::read_to_string(dir.as_ref().join(MONTHS_INDEX_FILE))?;
  Ok(serde_json::from_str(&content)?)
}

/// Pretty-prints `value` to a sibling temp file and renames it over `path`.
fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
  let tmp = path.with_extension("json.tmp");
  fs::write(&tmp, serde_json::to_string_pretty(value)?)?;
  fs::rename(&tmp, path)?;
  trace!("Wrote {}", path.display());
  Ok(())
}
