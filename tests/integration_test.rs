use nss_gallery::utils::logging;
use nss_gallery::{Aggregator, Config, HttpChannel, ProbeBridge, Selection};
use std::sync::Arc;

#[tokio::test]
#[ignore] // 默认忽略，需要网络：cargo test -- --ignored
async fn test_probe_live_file() {
    // 初始化日志
    logging::init(true);

    // 加载配置
    let config = Config::from_env();

    let channel = HttpChannel::new(&config).expect("创建 HTTP 通道失败");
    let bridge = ProbeBridge::new(Arc::new(channel));

    let result = bridge
        .probe("NSS2025-14009-KGD-KOODE-01.jpg", config.thumbnail_width)
        .await;

    assert!(result.is_ok(), "探测不应失败: {:?}", result);
    assert!(bridge.registry().is_empty());
}

#[tokio::test]
#[ignore]
async fn test_missing_file_is_absent() {
    logging::init(true);

    let config = Config::from_env();
    let channel = HttpChannel::new(&config).expect("创建 HTTP 通道失败");
    let bridge = ProbeBridge::new(Arc::new(channel));

    let result = bridge
        .probe("NSS2025-00000-NONE-NOPE-99.jpg", config.thumbnail_width)
        .await
        .expect("探测失败");

    assert_eq!(result, None);
}

#[tokio::test]
#[ignore]
async fn test_load_all_activities() {
    logging::init(true);

    let config = Config::from_env();
    let aggregator = Aggregator::from_config(&config).expect("初始化失败");

    let result = aggregator
        .collect(&config, &Selection::All)
        .await
        .expect("加载全部活动失败");

    println!("{}", result.headline());
    assert!(result.count <= config.activities.len() * config.max_images_per_activity as usize);
}
