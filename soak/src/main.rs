use std::sync::atomic::AtomicU64;
use std::sync::Arc;
use std::time::{Duration, Instant};
use telechart::{Chart, Frame, Measurement, Renderer, SeriesConfig, Size};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

const HOSTS: [&str; 10] = [
    "h-0", "h-1", "h-2", "h-3", "h-4", "h-5", "h-6", "h-7", "h-8", "h-9",
];

const BATCHES: usize = 1_000_000;
const BATCH_SIZE: usize = 10;

/// Only counts rows, so the soak measures the engine and not the output.
#[derive(Default)]
struct CountingRenderer {
    frames: u64,
    rows: usize,
    series: usize,
}

impl Renderer for CountingRenderer {
    fn add_series(&mut self, _: SeriesConfig, _: usize) {
        self.series += 1;
    }

    fn remove_series(&mut self, _: usize) {
        self.series -= 1;
    }

    fn set_data(&mut self, frame: &Frame) {
        self.frames += 1;
        self.rows = frame.rows();
    }

    fn set_size(&mut self, _: Size) {}
}

fn main() -> telechart::Result<()> {
    env_logger::builder()
        .filter_module("telechart", log::LevelFilter::Info)
        .filter_module("soak", log::LevelFilter::Trace)
        .parse_default_env()
        .init();

    let mut rng = rand::thread_rng();

    let mut chart = Chart::builder()
        .metric("summary")
        .tagged(true)
        .prune_threshold(1_000)
        .derive_modes("p50 p99 mean")
        .derive_window(30.0)
        .open(CountingRenderer::default())?;

    let max_memory_bytes = Arc::new(AtomicU64::new(0));

    std::thread::spawn({
        let max_memory_bytes = max_memory_bytes.clone();

        let mut sys = sysinfo::System::new_all();
        sys.refresh_all();

        let pid = std::process::id();
        let pid = sysinfo::Pid::from(pid as usize);

        move || loop {
            sys.refresh_processes_specifics(
                sysinfo::ProcessesToUpdate::Some(&[pid]),
                true,
                sysinfo::ProcessRefreshKind::new().with_memory(),
            );
            if let Some(process) = sys.processes().get(&pid) {
                max_memory_bytes.fetch_max(process.memory(), std::sync::atomic::Ordering::Relaxed);
            }
            std::thread::sleep(Duration::from_millis(100));
        }
    });

    let start = Instant::now();

    {
        use rand::Rng;

        for idx in 0..BATCHES {
            let batch = (0..BATCH_SIZE)
                .map(|offset| {
                    let items_written = idx * BATCH_SIZE + offset;
                    let host = HOSTS[items_written % HOSTS.len()];

                    // NOTE: 100 measurements per second of simulated time
                    #[allow(clippy::cast_precision_loss)]
                    let ts = items_written as f64 / 100.0;

                    Measurement::new(host, rng.gen_range(0.0..100.0), ts)
                })
                .collect();

            chart.push_data(batch);

            if idx > 0 && idx % 100_000 == 0 {
                let elapsed = start.elapsed();

                let items_written = (idx * BATCH_SIZE) as u128;
                let ns_per_item = elapsed.as_nanos() / items_written;
                let write_speed = 1_000_000_000 / ns_per_item.max(1);

                let max_memory = max_memory_bytes.load(std::sync::atomic::Ordering::Relaxed);

                log::info!(
                    "ingested {items_written} - {write_speed} MPS - {} rows - peak mem: {} MiB",
                    chart.renderer().rows,
                    max_memory / 1_024 / 1_024
                );
            }
        }
    }

    let elapsed = start.elapsed();
    let items_written = (BATCHES * BATCH_SIZE) as u128;
    let ns_per_item = elapsed.as_nanos() / items_written;

    let max_memory = max_memory_bytes.load(std::sync::atomic::Ordering::Relaxed);

    log::info!("ingested {items_written} in {elapsed:?}");
    log::info!("latency per item: {ns_per_item}ns");
    log::info!("peak mem: {} MiB", max_memory / 1_024 / 1_024);

    for (_, series) in chart.engine().store().iter().take(4) {
        log::info!(
            "{}: {} values, last {:?}",
            series.key(),
            series.aggregate().count,
            series.data().last()
        );
    }

    let renderer = chart.close();
    log::info!(
        "{} frames drawn, {} series left",
        renderer.frames,
        renderer.series
    );

    Ok(())
}
