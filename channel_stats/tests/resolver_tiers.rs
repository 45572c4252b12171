mod common;

use channel_stats::errors::{ErrorKind, StatsError};
use channel_stats::resolver::ChannelResolver;
use common::{Call, FakeTransport, Op, channel_record};

#[tokio::test]
async fn id_tier_short_circuits() {
    let fake = FakeTransport::new().with_channel(channel_record("UC123", "Example", 1000, 10_000, 10));

    let channel = ChannelResolver::new(&fake).resolve("UC123").await.unwrap();

    assert_eq!(channel.id, "UC123");
    assert_eq!(channel.subscriber_count, 1000);
    assert_eq!(fake.calls(), vec![Call::ById("UC123".into())]);
}

#[tokio::test]
async fn handle_prefix_is_stripped_before_lookup() {
    let fake = FakeTransport::new().with_alias("example", channel_record("UC123", "Example", 1, 1, 1));

    let channel = ChannelResolver::new(&fake).resolve("  @example ").await.unwrap();

    assert_eq!(channel.id, "UC123");
    assert_eq!(fake.calls(), vec![Call::ById("example".into())]);
}

#[tokio::test]
async fn username_tier_runs_after_empty_id_tier() {
    let fake = FakeTransport::new().with_username("oldname", channel_record("UC9", "Legacy", 5, 50, 2));

    let channel = ChannelResolver::new(&fake).resolve("oldname").await.unwrap();

    assert_eq!(channel.id, "UC9");
    assert_eq!(fake.ops(), vec![Op::ById, Op::ByUsername]);
    assert_eq!(fake.count(Op::Search), 0);
}

#[tokio::test]
async fn search_tier_returns_full_detail_record() {
    let fake = FakeTransport::new()
        .with_channel(channel_record("UCxyz", "Some Creator", 777, 8_888, 9))
        .with_search_hit("UCxyz");

    let channel = ChannelResolver::new(&fake).resolve("Some Creator").await.unwrap();

    assert_eq!(channel.id, "UCxyz");
    assert_eq!(channel.title, "Some Creator");
    assert_eq!(channel.view_count, 8_888);
    assert_eq!(
        fake.calls(),
        vec![
            Call::ById("Some Creator".into()),
            Call::ByUsername("Some Creator".into()),
            Call::Search("Some Creator".into(), 1),
            Call::ById("UCxyz".into()),
        ]
    );
}

#[tokio::test]
async fn all_tiers_absent_is_not_found() {
    let fake = FakeTransport::new();

    let err = ChannelResolver::new(&fake).resolve("nobody").await.unwrap_err();

    assert!(matches!(err, StatsError::NotFound { ref identifier } if identifier == "nobody"));
    assert_eq!(fake.ops(), vec![Op::ById, Op::ByUsername, Op::Search]);
}

#[tokio::test]
async fn auth_failure_on_id_tier_stops_resolution() {
    let fake = FakeTransport::new()
        .with_username("x", channel_record("UC1", "X", 1, 1, 1))
        .failing(Op::ById, 403, Some("quotaExceeded"));

    let err = ChannelResolver::new(&fake).resolve("x").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Auth);
    assert_eq!(fake.ops(), vec![Op::ById]);
}

#[tokio::test]
async fn bad_request_with_key_reason_is_auth() {
    let fake = FakeTransport::new().failing(Op::ById, 400, Some("keyInvalid"));

    let err = ChannelResolver::new(&fake).resolve("x").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Auth);
}

#[tokio::test]
async fn server_error_aborts_the_chain() {
    let fake = FakeTransport::new()
        .with_search_hit("UC1")
        .failing(Op::ByUsername, 503, Some("backendError"));

    let err = ChannelResolver::new(&fake).resolve("x").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transient);
    assert_eq!(fake.ops(), vec![Op::ById, Op::ByUsername]);
}

#[tokio::test]
async fn not_found_status_counts_as_absence() {
    let fake = FakeTransport::new()
        .with_username("x", channel_record("UC1", "X", 1, 1, 1))
        .failing(Op::ById, 404, None);

    let channel = ChannelResolver::new(&fake).resolve("x").await.unwrap();

    assert_eq!(channel.id, "UC1");
}

#[tokio::test]
async fn blank_identifier_makes_no_calls() {
    let fake = FakeTransport::new();

    for input in ["", "   ", "@"] {
        let err = ChannelResolver::new(&fake).resolve(input).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
    assert!(fake.calls().is_empty());
}

#[tokio::test]
async fn absent_statistics_read_as_zero() {
    let mut record = channel_record("UC0", "Quiet", 0, 0, 0);
    record.statistics = Default::default();
    let fake = FakeTransport::new().with_channel(record);

    let channel = ChannelResolver::new(&fake).resolve("UC0").await.unwrap();

    assert_eq!(
        (channel.subscriber_count, channel.view_count, channel.video_count),
        (0, 0, 0)
    );
}
