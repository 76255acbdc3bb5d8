//! Benchmark the post-transform batch driver.
//!
//! Run with: cargo run --release --features bench --bin bench_transform
//!
//! Usage:
//!   bench_transform                   Run default size (1m triangles)
//!   bench_transform 100k 1m 10m       Run multiple sizes
//!   bench_transform --topology line   Lines instead of triangles
//!   bench_transform -n 10             Run 10 iterations (for profiling)
//!
//! For per-phase timing, build with: cargo run --release --features bench,timing --bin bench_transform

use clap::{Parser, ValueEnum};
use post_transform::batch::{process_timed, BatchConfig};
use post_transform::{active_backend, BatchStats, ClipStatus, Primitive, Vertex, Viewport};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::io::{self, Write};
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Topology {
    Point,
    Line,
    Triangle,
}

#[derive(Parser, Debug)]
#[command(name = "bench_transform")]
#[command(about = "Benchmark clip classification, perspective divide and screen mapping")]
struct Args {
    /// Primitive counts to benchmark (e.g., 100k, 1m, 10M)
    #[arg(value_parser = parse_count)]
    sizes: Vec<usize>,

    /// Random seed
    #[arg(short, long, default_value_t = 12345)]
    seed: u64,

    /// Primitive topology
    #[arg(short, long, value_enum, default_value_t = Topology::Triangle)]
    topology: Topology,

    /// Viewport width in pixels
    #[arg(long, default_value_t = 1920.0)]
    width: f32,

    /// Viewport height in pixels
    #[arg(long, default_value_t = 1080.0)]
    height: f32,

    /// Fraction of vertices pushed outside the clip cube
    #[arg(long, default_value_t = 0.1)]
    outside: f32,

    /// Fraction of vertices placed behind the eye (w < 0)
    #[arg(long, default_value_t = 0.05)]
    behind: f32,

    /// Disable the parallel driver
    #[arg(long)]
    sequential: bool,

    /// Number of iterations to run (useful for profiling)
    #[arg(short = 'n', long, default_value_t = 1)]
    repeat: usize,
}

/// Parse a count such as `250`, `100k` or `2.5m`.
fn parse_count(s: &str) -> Result<usize, String> {
    let t = s.trim();
    let (digits, scale) = match t.chars().last().map(|c| c.to_ascii_lowercase()) {
        Some('k') => (&t[..t.len() - 1], 1e3),
        Some('m') => (&t[..t.len() - 1], 1e6),
        _ => (t, 1.0),
    };
    let n: f64 = digits
        .parse()
        .map_err(|e| format!("bad count '{}': {}", s, e))?;
    if n.is_nan() || n < 0.0 {
        return Err(format!("bad count '{}': must be non-negative", s));
    }
    Ok((n * scale).round() as usize)
}

/// Scale a quantity to k/M/G.
fn si(value: f64, decimals: usize) -> String {
    const UNITS: [(f64, &str); 3] = [(1e9, "G"), (1e6, "M"), (1e3, "k")];
    for (scale, suffix) in UNITS {
        if value >= scale {
            return format!("{:.*}{}", decimals, value / scale, suffix);
        }
    }
    format!("{:.0}", value)
}

fn count(n: usize) -> String {
    si(n as f64, 1)
}

fn per_second(n: usize, ms: f64) -> String {
    if ms > 0.0 {
        format!("{}/s", si(n as f64 * 1000.0 / ms, 2))
    } else {
        "n/a".to_string()
    }
}

fn random_clip_vertex<R: Rng>(rng: &mut R, outside: f32, behind: f32) -> Vertex {
    let w: f32 = rng.gen_range(0.5..50.0);
    let mut ndc = [
        rng.gen_range(-1.0f32..1.0),
        rng.gen_range(-1.0f32..1.0),
        rng.gen_range(-1.0f32..1.0),
    ];
    if rng.gen::<f32>() < outside {
        let axis = rng.gen_range(0..3);
        ndc[axis] *= rng.gen_range(1.5f32..4.0);
        if ndc[axis].abs() <= 1.0 {
            ndc[axis] = ndc[axis].signum() * 1.5;
        }
    }
    let w = if rng.gen::<f32>() < behind { -w } else { w };
    Vertex::new(ndc[0] * w, ndc[1] * w, ndc[2] * w, w)
}

fn generate<const N: usize>(count: usize, args: &Args) -> Vec<[Vertex; N]>
where
    [Vertex; N]: Primitive,
{
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    (0..count)
        .map(|_| std::array::from_fn(|_| random_clip_vertex(&mut rng, args.outside, args.behind)))
        .collect()
}

struct BenchResult {
    n: usize,
    vertices: usize,
    on_screen: usize,
    time_ms: f64,
    stats: BatchStats,
}

fn run_size<const N: usize>(n: usize, args: &Args, viewport: &Viewport) -> BenchResult
where
    [Vertex; N]: Primitive,
{
    let t_gen = Instant::now();
    let source = generate::<N>(n, args);
    println!(
        "Primitive generation: {:.1}ms",
        t_gen.elapsed().as_secs_f64() * 1000.0
    );

    let config = if args.sequential {
        BatchConfig::sequential()
    } else {
        BatchConfig::default()
    };

    let mut prims = source.clone();
    let mut statuses = vec![ClipStatus::NotVisible; n];
    let mut times: Vec<f64> = Vec::with_capacity(args.repeat);
    let mut stats = BatchStats::default();

    for iter in 0..args.repeat {
        if args.repeat > 1 {
            print!("  Iteration {}/{}... ", iter + 1, args.repeat);
            let _ = io::stdout().flush();
        }

        prims.copy_from_slice(&source);
        let t0 = Instant::now();
        let result = process_timed(&mut prims, viewport, &mut statuses, &config);
        let time_ms = t0.elapsed().as_secs_f64() * 1000.0;

        let (batch_stats, timings) = match result {
            Ok(r) => r,
            Err(e) => {
                eprintln!("batch failed: {}", e);
                std::process::exit(1);
            }
        };
        #[cfg(feature = "timing")]
        timings.report(&format!("n={}", count(n)));
        #[cfg(not(feature = "timing"))]
        let _ = timings;

        if args.repeat > 1 {
            println!("{:.2}ms", time_ms);
        }
        times.push(time_ms);
        stats = batch_stats;
    }

    // Vertices of projected primitives that landed inside the viewport rectangle.
    let on_screen = prims
        .iter()
        .zip(statuses.iter())
        .filter(|(_, s)| **s == ClipStatus::FullyVisible)
        .flat_map(|(p, _)| p.iter())
        .filter(|v| viewport.contains(v.x, v.y))
        .count();

    let avg = times.iter().sum::<f64>() / times.len().max(1) as f64;
    BenchResult {
        n,
        vertices: n * N,
        on_screen,
        time_ms: avg,
        stats,
    }
}

fn main() {
    let args = Args::parse();

    println!("post-transform Benchmark");
    println!("========================\n");

    let viewport = match Viewport::try_new(0.0, 0.0, args.width, args.height) {
        Ok(vp) => vp,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };

    let sizes: Vec<usize> = if args.sizes.is_empty() {
        vec![1_000_000]
    } else {
        args.sizes.clone()
    };

    println!("Configuration:");
    let backend = active_backend();
    println!("  backend = {} ({} lanes)", backend, backend.lanes());
    println!("  topology = {:?}", args.topology);
    println!("  viewport = {}x{}", args.width, args.height);
    println!("  seed = {}", args.seed);
    println!(
        "  sizes = {:?}",
        sizes.iter().map(|&n| count(n)).collect::<Vec<_>>()
    );
    println!("  outside = {:.2}, behind = {:.2}", args.outside, args.behind);
    if args.sequential {
        println!("  parallel = disabled");
    }
    if args.repeat > 1 {
        println!("  repeat = {}", args.repeat);
    }

    #[cfg(feature = "timing")]
    println!("  timing = enabled (per-phase timing will be printed)");

    let mut results: Vec<BenchResult> = Vec::new();

    for &n in &sizes {
        println!("\n{}", "=".repeat(60));
        println!("Benchmarking n = {}", count(n));
        println!("{}", "=".repeat(60));

        let result = match args.topology {
            Topology::Point => run_size::<1>(n, &args, &viewport),
            Topology::Line => run_size::<2>(n, &args, &viewport),
            Topology::Triangle => run_size::<3>(n, &args, &viewport),
        };

        println!("\nResults:");
        println!("  Avg time:      {:>8.2}ms", result.time_ms);
        println!(
            "  Primitives:    {:>8}",
            per_second(result.n, result.time_ms)
        );
        println!(
            "  Vertices:      {:>8}",
            per_second(result.vertices, result.time_ms)
        );
        println!(
            "  Fully visible: {:>8}",
            count(result.stats.fully_visible)
        );
        println!(
            "  Partial:       {:>8}",
            count(result.stats.partially_visible)
        );
        println!(
            "  Not visible:   {:>8}",
            count(result.stats.not_visible)
        );
        println!("  On screen:     {:>8} vertices", count(result.on_screen));

        results.push(result);
    }

    if results.len() > 1 {
        println!("\n\n{}", "=".repeat(60));
        println!("SUMMARY");
        println!("{}", "=".repeat(60));
        println!(
            "{:>10} | {:>10} | {:>12} | {:>12}",
            "n", "time", "prims/s", "verts/s"
        );
        println!("{:-<10}-+-{:-<10}-+-{:-<12}-+-{:-<12}", "", "", "", "");

        for r in &results {
            println!(
                "{:>10} | {:>8.2}ms | {:>12} | {:>12}",
                count(r.n),
                r.time_ms,
                per_second(r.n, r.time_ms),
                per_second(r.vertices, r.time_ms)
            );
        }
    }

    println!("\nBenchmark complete.");
}
