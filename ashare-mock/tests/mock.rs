use ashare_core::types::DailyRequest;
use ashare_core::{FetchError, Fetcher};
use ashare_mock::{MockFetcher, fixtures};

#[tokio::test]
async fn fixture_history_is_deterministic() {
    let fetcher = MockFetcher::builder().build();
    let req = DailyRequest::new("600519");

    let first = fetcher.daily_history(&req).await.unwrap();
    let second = fetcher.daily_history(&req).await.unwrap();

    assert_eq!(first.len(), fixtures::FIXTURE_DAYS);
    assert_eq!(first, second);
    assert!(first.windows(2).all(|w| w[0].date < w[1].date));
}

#[tokio::test]
async fn scripted_failure_reaches_the_caller_wrapped() {
    let fetcher = MockFetcher::builder()
        .name("flaky")
        .fails_with("connection refused")
        .build();
    let err = fetcher
        .daily_history(&DailyRequest::new("000001"))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("flaky"));
    assert!(matches!(
        err.root_cause(),
        FetchError::SourceUnavailable { .. }
    ));
}

#[tokio::test]
async fn capabilities_are_only_advertised_when_scripted() {
    let bare = MockFetcher::builder().build();
    assert!(bare.as_realtime_quote_provider().is_none());
    assert!(bare.as_chip_distribution_provider().is_none());

    let rich = MockFetcher::builder()
        .with_quote(fixtures::realtime_quote())
        .with_chip(fixtures::chip_distribution())
        .build();
    assert!(rich.as_realtime_quote_provider().is_some());
    assert!(rich.as_chip_distribution_provider().is_some());
}
