//! 传输主循环测试：节拍与数据块无关、单调性、终态报告、总大小未知、错误路径、端到端体量。
//!
//! 全部使用暂停的 tokio 时钟，数据流与节拍都是虚拟时间，结果确定。

use std::time::Duration;

use bytes::Bytes;
use rand::Rng;

use crate::downloader::{run_transfer, DownloadError, DownloadHooksContainer};
use crate::progress::ProgressReport;
use crate::render::format_standard;
use crate::states::reactive::{ReactiveProperty, ReactivePropertyError};
use crate::tests::{
    failing_chunks, paced_chunks, paced_chunks_with_delays, uniform_chunks,
    ChunkStream, HookEvent, RecordingHook, RecordingSink,
};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

/// 运行一次传输，返回结果与记录到的钩子。
async fn run(
    stream: ChunkStream,
    total: Option<u64>,
    sink: RecordingSink,
    interval: Duration,
) -> (Result<crate::downloader::DownloadSummary, DownloadError>, RecordingHook) {
    let recorder = RecordingHook::new();
    let mut hooks = DownloadHooksContainer::default();
    hooks.add(recorder.clone());
    let progress = ReactiveProperty::new(ProgressReport::default());

    let result =
        run_transfer(stream, total, sink, &mut hooks, interval, &progress).await;
    (result, recorder)
}

fn intermediate(reports: &[ProgressReport]) -> &[ProgressReport] {
    &reports[..reports.len().saturating_sub(1)]
}

#[tokio::test(start_paused = true)]
async fn cadence_is_independent_of_chunking() {
    // 105 块、每 10ms 一块，总计约 1050ms
    let (result, recorder) = run(
        paced_chunks(vec![512; 105], ms(10)),
        Some(512 * 105),
        RecordingSink::new(),
        ms(100),
    )
    .await;
    result.unwrap();
    let ticks = recorder.reports().len() - 1;
    assert!((9..=11).contains(&ticks), "10ms 分块时通知次数为 {ticks}");

    // 同样时长，分块更细（每 1ms 一块）
    let (result, recorder) = run(
        paced_chunks(vec![51; 1050], ms(1)),
        Some(51 * 1050),
        RecordingSink::new(),
        ms(100),
    )
    .await;
    result.unwrap();
    let ticks = recorder.reports().len() - 1;
    assert!((9..=11).contains(&ticks), "1ms 分块时通知次数为 {ticks}");
}

#[tokio::test(start_paused = true)]
async fn ticks_without_new_data_still_report() {
    // 第一块数据 350ms 后才到
    let (result, recorder) = run(
        paced_chunks_with_delays(vec![(100, ms(350)), (100, ms(10))]),
        Some(200),
        RecordingSink::new(),
        ms(100),
    )
    .await;
    result.unwrap();

    let reports = recorder.reports();
    let stalled = intermediate(&reports);
    assert_eq!(stalled.len(), 3);
    for r in stalled {
        assert_eq!(r.bytes_transferred, 0);
        assert_eq!(r.speed_bytes_per_second, 0.0);
        assert_eq!(r.percentage, Some(0.0));
        assert!(r.eta_seconds.is_infinite());
    }
}

#[tokio::test(start_paused = true)]
async fn reported_bytes_never_decrease() {
    let chunks: Vec<(usize, Duration)> = {
        let mut rng = rand::thread_rng();
        (0..300)
            .map(|_| (rng.gen_range(1..=4096), ms(rng.gen_range(1..=20))))
            .collect()
    };
    let total: u64 = chunks.iter().map(|(s, _)| *s as u64).sum();

    let sink = RecordingSink::new();
    let (result, recorder) = run(
        paced_chunks_with_delays(chunks),
        Some(total),
        sink.clone(),
        ms(50),
    )
    .await;
    let summary = result.unwrap();

    let reports = recorder.reports();
    assert!(reports.len() > 2);
    assert!(
        reports
            .windows(2)
            .all(|w| w[0].bytes_transferred <= w[1].bytes_transferred)
    );
    assert_eq!(summary.bytes_transferred, total);
    assert_eq!(sink.written(), total);
}

#[tokio::test(start_paused = true)]
async fn exactly_one_terminal_report_at_one_hundred() {
    // 总量 3 字节，百分比中途是循环小数
    let (result, recorder) = run(
        paced_chunks(vec![1, 1, 1], ms(40)),
        Some(3),
        RecordingSink::new(),
        ms(30),
    )
    .await;
    let summary = result.unwrap();

    let events = recorder.events();
    let terminal: Vec<_> = recorder
        .reports()
        .into_iter()
        .filter(|r| r.eta_label == "0s")
        .collect();
    assert_eq!(terminal.len(), 1);
    assert_eq!(terminal[0].percentage, Some(100.0));
    assert_eq!(terminal[0].speed_bytes_per_second, 0.0);
    assert_eq!(terminal[0].bytes_transferred, 3);
    assert_eq!(terminal[0].total_bytes, Some(3));

    // 终态报告之后只剩完成钩子
    match &events[events.len() - 2..] {
        [HookEvent::Progress(last), HookEvent::Complete(done)] => {
            assert_eq!(last, &terminal[0]);
            assert_eq!(done, &summary);
        }
        other => panic!("结尾事件不符合预期: {other:?}"),
    }
    assert!(recorder.errors().is_empty());
}

#[tokio::test(start_paused = true)]
async fn unknown_total_degrades_without_nan() {
    let (result, recorder) = run(
        paced_chunks(vec![1000; 50], ms(10)),
        None,
        RecordingSink::new(),
        ms(100),
    )
    .await;
    let summary = result.unwrap();
    assert_eq!(summary.total_bytes, None);

    let reports = recorder.reports();
    let ticks = intermediate(&reports);
    assert!(!ticks.is_empty());
    for r in ticks {
        assert_eq!(r.percentage, None);
        assert!(r.eta_seconds.is_infinite());
        assert_eq!(r.eta_label, "unknown");
        assert!(!format_standard(r).contains("NaN"));
    }

    let last = reports.last().unwrap();
    assert_eq!(last.percentage, Some(100.0));
    assert_eq!(last.total_bytes, Some(50_000));
}

#[tokio::test(start_paused = true)]
async fn transport_error_closes_sink_once_and_stops_notifying() {
    let sink = RecordingSink::new();
    let (result, recorder) = run(
        failing_chunks(30, 256, ms(10)),
        Some(256 * 100),
        sink.clone(),
        ms(100),
    )
    .await;

    assert!(matches!(result, Err(DownloadError::Stream(_))));
    assert_eq!(sink.shutdown_count(), 1);
    // 已写入的部分保留
    assert_eq!(sink.written(), 256 * 30);

    let events = recorder.events();
    assert!(matches!(events.last(), Some(HookEvent::Error(_))));
    assert_eq!(recorder.errors().len(), 1);
    assert!(recorder.reports().iter().all(|r| r.percentage != Some(100.0)));
}

#[tokio::test(start_paused = true)]
async fn sink_write_error_aborts_transfer() {
    let sink = RecordingSink::failing_after(1000);
    let (result, recorder) = run(
        paced_chunks(vec![300; 10], ms(5)),
        Some(3000),
        sink.clone(),
        ms(100),
    )
    .await;

    match result {
        Err(DownloadError::SinkWrite(e)) => assert_eq!(e.to_string(), "磁盘已满"),
        other => panic!("预期 SinkWrite，得到 {other:?}"),
    }
    assert_eq!(sink.written(), 900);
    assert_eq!(sink.shutdown_count(), 1);
    assert_eq!(recorder.errors().len(), 1);
    assert!(!recorder.events().iter().any(|e| matches!(e, HookEvent::Complete(_))));
}

#[tokio::test(start_paused = true)]
async fn flush_error_still_closes_sink() {
    let sink = RecordingSink::failing_flush();
    let (result, recorder) = run(
        paced_chunks(vec![10; 3], ms(5)),
        Some(30),
        sink.clone(),
        ms(100),
    )
    .await;

    match result {
        Err(DownloadError::SinkWrite(e)) => assert_eq!(e.to_string(), "刷新失败"),
        other => panic!("预期 SinkWrite，得到 {other:?}"),
    }
    assert_eq!(sink.written(), 30);
    assert!(sink.flush_count() >= 1);
    assert_eq!(sink.shutdown_count(), 1);
    assert_eq!(recorder.errors().len(), 1);
    // 关闭失败不算完成：没有终态报告，也不执行完成钩子
    assert!(recorder.reports().iter().all(|r| r.percentage != Some(100.0)));
    assert!(!recorder.events().iter().any(|e| matches!(e, HookEvent::Complete(_))));
}

#[tokio::test(start_paused = true)]
async fn io_error_stream_maps_into_stream_error() {
    let parts: [Result<&'static [u8], std::io::Error>; 2] = [
        Ok(b"abc"),
        Err(std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "提前结束")),
    ];
    let stream = futures_util::stream::iter(
        parts.into_iter().map(|item| item.map_err(DownloadError::stream)),
    );
    let sink = RecordingSink::new();
    let mut hooks = DownloadHooksContainer::default();
    let progress = ReactiveProperty::new(ProgressReport::default());

    let result =
        run_transfer(stream, Some(10), sink.clone(), &mut hooks, ms(100), &progress)
            .await;

    match result {
        Err(DownloadError::Stream(e)) => assert_eq!(e.to_string(), "提前结束"),
        other => panic!("预期 Stream，得到 {other:?}"),
    }
    assert_eq!(sink.written(), 3);
    assert_eq!(sink.shutdown_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn zero_interval_is_rejected() {
    let sink = RecordingSink::new();
    let (result, recorder) = run(
        paced_chunks(vec![10], ms(1)),
        Some(10),
        sink.clone(),
        Duration::ZERO,
    )
    .await;

    assert!(matches!(result, Err(DownloadError::InvalidUpdateInterval)));
    assert_eq!(sink.written(), 0);
    assert_eq!(sink.shutdown_count(), 1);
    assert_eq!(recorder.errors().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn writes_chunks_in_order() {
    let sink = RecordingSink::keeping_data();
    let parts: [&'static [u8]; 3] = [b"hello ", b"streaming ", b"world"];
    let stream: ChunkStream = Box::pin(futures_util::stream::iter(
        parts
            .into_iter()
            .map(|c| Ok::<_, DownloadError>(Bytes::from_static(c))),
    ));
    let (result, _) = run(stream, Some(21), sink.clone(), ms(100)).await;

    assert_eq!(result.unwrap().bytes_transferred, 21);
    assert_eq!(sink.data(), b"hello streaming world");
}

#[tokio::test(start_paused = true)]
async fn large_transfer_end_to_end() {
    const CHUNK: usize = 65_536;
    const TOTAL: u64 = 1_048_576_000;
    let count = (TOTAL / CHUNK as u64) as usize;

    let sink = RecordingSink::new();
    let (result, recorder) = run(
        uniform_chunks(Bytes::from(vec![0u8; CHUNK]), count, ms(5)),
        Some(TOTAL),
        sink.clone(),
        ms(1000),
    )
    .await;
    let summary = result.unwrap();

    let reports = recorder.reports();
    let ticks = intermediate(&reports);
    // 16000 块 × 5ms = 80s
    assert!((79..=81).contains(&ticks.len()), "通知次数 {}", ticks.len());
    assert!(
        ticks
            .windows(2)
            .all(|w| w[0].percentage.unwrap() < w[1].percentage.unwrap())
    );
    assert!(ticks.iter().all(|r| r.percentage.unwrap() < 100.0));

    let last = reports.last().unwrap();
    assert_eq!(last.percentage, Some(100.0));
    assert_eq!(last.bytes_transferred, TOTAL);
    assert_eq!(last.total_bytes, Some(TOTAL));
    assert_eq!(summary.bytes_transferred, TOTAL);
    assert_eq!(sink.written(), TOTAL);
}

#[tokio::test(start_paused = true)]
async fn reactive_progress_publishes_reports() {
    let progress = ReactiveProperty::new(ProgressReport::default());
    let mut watcher = progress.watch();

    let collector = tokio::spawn(async move {
        let mut seen = Vec::new();
        loop {
            match watcher.changed().await {
                Ok(report) => seen.push(report),
                Err(e) => return (seen, e),
            }
        }
    });

    let mut hooks = DownloadHooksContainer::default();
    run_transfer(
        paced_chunks(vec![100; 40], ms(10)),
        Some(4000),
        RecordingSink::new(),
        &mut hooks,
        ms(100),
        &progress,
    )
    .await
    .unwrap();

    let current = progress.get_current().unwrap();
    assert_eq!(current, ProgressReport::finished(4000, Some(4000)));

    drop(progress);
    let (seen, err) = collector.await.unwrap();
    assert!(!seen.is_empty());
    assert!(seen.windows(2).all(|w| w[0].bytes_transferred <= w[1].bytes_transferred));
    assert!(matches!(err, ReactivePropertyError::WatcherClosed));
}
