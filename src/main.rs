use std::time::{Duration, Instant};
use telechart::{Chart, Frame, Measurement, Renderer, SeriesConfig, Size, Value};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

/// Logs what a chart widget would draw.
struct LogRenderer;

impl Renderer for LogRenderer {
    fn add_series(&mut self, config: SeriesConfig, index: usize) {
        log::info!("+ series #{index}: {} ({:?})", config.label, config.role);
    }

    fn remove_series(&mut self, index: usize) {
        log::info!("- series #{index}");
    }

    fn set_data(&mut self, frame: &Frame) {
        let latest = frame
            .columns()
            .iter()
            .map(|column| column.iter().rev().find_map(|x| *x))
            .collect::<Vec<_>>();

        log::info!("redraw {} rows, latest: {latest:.2?}", frame.rows());
    }

    fn set_size(&mut self, size: Size) {
        log::info!("resized to {}x{}", size.width, size.height);
    }

    fn set_title(&mut self, title: &str) {
        log::info!("== {title} ==");
    }
}

fn main() -> telechart::Result<()> {
    env_logger::builder()
        .filter_module("telechart", log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let mut chart = Chart::builder()
        .metric("summary")
        .tagged(true)
        .unit("ms")
        .title("Host latency")
        .prune_threshold(500)
        .derive_modes("p50, p95, mean")
        .derive_window(10.0)
        .refresh_interval(Duration::from_millis(250))
        .open(LogRenderer)?;

    chart.resize(Size {
        width: 800,
        height: 300,
    });

    let start = Instant::now();

    {
        use rand::Rng;

        let mut rng = rand::thread_rng();

        while start.elapsed() < Duration::from_secs(3) {
            let batch = ["h-0", "h-1", "h-2"]
                .into_iter()
                .map(|host| {
                    // Latency that is mostly low, with the occasional spike
                    let base: Value = if rng.gen_bool(0.05) { 250.0 } else { 20.0 };
                    let value = (base + rng.gen_range(-5.0..5.0)).max(0.0);

                    Measurement::new(host, value, telechart::timestamp())
                })
                .collect();

            chart.push_data(batch);
            chart.poll(Instant::now());

            std::thread::sleep(Duration::from_millis(20));
        }
    }

    log::info!("streamed for {:?}", start.elapsed());

    for (_, series) in chart.engine().store().iter() {
        let agg = series.aggregate();

        log::info!(
            "{}: count={} total={:.2} min={:?} max={:?}",
            series.key(),
            agg.count,
            agg.total,
            series.last().min,
            series.last().max,
        );
    }

    chart.close();

    Ok(())
}
