use super::*;

#[tokio::test]
async fn test_store_then_build_site() -> anyhow::Result<()> {
  let papers = harvest_fixture().await;
  let data = tempdir()?;
  let site = tempdir()?;

  let mut store = PaperStore::open(data.path())?;
  let report = store.merge(papers.clone());
  assert_eq!((report.added, report.total), (2, 2));
  store.save()?;

  let today = NaiveDate::from_ymd_opt(2025, 10, 1).unwrap();
  let snapshot = store.write_daily_snapshot(&papers, today)?.expect("one paper was published today");
  let todays: Vec<PaperRecord> = serde_json::from_str(&fs::read_to_string(snapshot)?)?;
  assert_eq!(todays.len(), 1);
  assert_eq!(todays[0].id, "2510.01001v1");

  // A second run over the same listing adds nothing.
  let mut reopened = PaperStore::open(data.path())?;
  assert_eq!(reopened.merge(papers).added, 0);
  assert_eq!(reopened.papers(), store.papers());

  assert_eq!(store.months_index(), vec![
    MonthSummary { month: "2025-10".into(), count: 1, published_count: 1, preprint_count: 0 },
    MonthSummary { month: "2025-09".into(), count: 1, published_count: 1, preprint_count: 0 },
  ]);

  let index = SiteBuilder::new(site.path(), "Daily Papers")?.build(&store, now())?;
  let html = fs::read_to_string(index)?;
  assert!(html.contains("Scaling Vision Transformers for Dense Prediction"));
  assert!(html.contains("CVPR 2026"));
  assert!(html.contains("Conference on Robot Learning (CoRL 2025)"));
  assert!(html.contains("btn-code"), "the GitHub link in the abstract becomes a code button");
  assert!(html.contains("Published (2)"));

  let copied: Vec<PaperRecord> =
    serde_json::from_str(&fs::read_to_string(site.path().join("data/papers.json"))?)?;
  assert_eq!(copied.len(), 2);
  let months: Vec<MonthSummary> =
    serde_json::from_str(&fs::read_to_string(site.path().join("data/months_index.json"))?)?;
  assert_eq!(months.len(), 2);
  Ok(())
}
