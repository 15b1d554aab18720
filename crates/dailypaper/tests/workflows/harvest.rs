use super::*;

#[tokio::test]
async fn test_client_fetches_and_parses_listing() -> anyhow::Result<()> {
  let mut server = mockito::Server::new_async().await;
  let listing = mock_listing(&mut server, "cs.CV").await;

  let client = ArxivClient::new(&format!("{}/api/query", server.url()))?;
  let papers = client.fetch_category("cs.CV", 3).await?;

  listing.assert_async().await;
  assert_eq!(papers.len(), 3);
  assert_eq!(papers[0].id, "2510.01001v1");
  assert_eq!(papers[0].title, "Scaling Vision Transformers for Dense Prediction");
  assert_eq!(papers[0].authors, vec!["Grace Hopper", "Edsger Dijkstra"]);
  assert_eq!(papers[1].primary_category, "cs.RO");
  assert_eq!(
    papers[1].journal_ref.as_deref(),
    Some("Conference on Robot Learning (CoRL), 2025")
  );
  assert!(papers.iter().all(|p| p.venue.is_none() && p.tags.is_empty()));
  Ok(())
}

#[tokio::test]
async fn test_client_reports_http_errors() -> anyhow::Result<()> {
  let mut server = mockito::Server::new_async().await;
  let _unavailable =
    server.mock("GET", "/api/query").match_query(Matcher::Any).with_status(503).create_async().await;

  let client = ArxivClient::new(&format!("{}/api/query", server.url()))?;
  let err = client.fetch_category("cs.CV", 3).await.unwrap_err();
  assert!(matches!(err, DailyPaperError::ApiError(ref msg) if msg.contains("503")));
  Ok(())
}

#[tokio::test]
async fn test_harvest_enriches_recent_papers() {
  let papers = harvest_fixture().await;

  let ids: Vec<_> = papers.iter().map(|p| p.id.as_str()).collect();
  assert_eq!(ids, ["2510.01001v1", "2510.01002v2"], "the September update is outside the window");

  let vit = &papers[0];
  assert_eq!(vit.venue.as_deref(), Some("CVPR 2026"));
  assert!(vit.tags.contains("Computer Vision"));
  assert!(vit.tags.contains("Machine Learning"));
  assert_eq!(vit.listing_category.as_deref(), Some("cs.CV"));

  // The journal reference outranks the preprint marker in the comment.
  let robot = &papers[1];
  assert_eq!(robot.venue.as_deref(), Some("Conference on Robot Learning (CoRL 2025)"));
  assert!(robot.tags.contains("Robotics"));
}

#[tokio::test]
async fn test_harvest_survives_failing_category() {
  let mut server = mockito::Server::new_async().await;
  let failing = server
    .mock("GET", "/api/query")
    .match_query(Matcher::UrlEncoded("search_query".into(), "cat:cs.XX".into()))
    .with_status(500)
    .create_async()
    .await;
  let listing = mock_listing(&mut server, "cs.CV").await;
  let config = config_for(&server, &["cs.XX", "cs.CV"]);

  let client = ArxivClient::new(&config.sources.arxiv.base_url).unwrap();
  let enricher = Enricher::from_config(&config).unwrap();
  let papers = Harvester::new(&client, &enricher).harvest(&config.sources.arxiv, now()).await;

  failing.assert_async().await;
  listing.assert_async().await;
  assert_eq!(papers.len(), 2);
}

#[tokio::test]
async fn test_harvest_dedupes_across_categories() {
  let mut server = mockito::Server::new_async().await;
  let _cv = mock_listing(&mut server, "cs.CV").await;
  let _ro = mock_listing(&mut server, "cs.RO").await;
  let config = config_for(&server, &["cs.CV", "cs.RO"]);

  let client = ArxivClient::new(&config.sources.arxiv.base_url).unwrap();
  let enricher = Enricher::from_config(&config).unwrap();
  let papers = Harvester::new(&client, &enricher).harvest(&config.sources.arxiv, now()).await;

  assert_eq!(papers.len(), 2);
  assert!(papers.iter().all(|p| p.listing_category.as_deref() == Some("cs.CV")));
}
