//! surfrank CLI - PageRank over adjacency files.
//!
//! # Usage
//!
//! ```bash
//! # Sparse engine: boost node 267, normalize, 20000 fixed iterations
//! surfrank sparse dataset/genetic.dat --boost 267 --iterations 20000 --damping 0.9 \
//!     --report 267 --graph-output dataset/test.dat
//!
//! # Same graph, stop once the L1 change drops below 1e-10
//! surfrank sparse dataset/genetic.dat --iterations 100000 --tolerance 1e-10 --top 10
//!
//! # Dense baseline: H/S/E matrices, two powers of E
//! surfrank dense dataset/g.dat --damping 0.9 --powers 2
//! ```
//!
//! Any error aborts the run with a non-zero exit code.

use anyhow::{ensure, Context, Result};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use surfrank::{
    dense_pagerank, load_dense_matrix, load_sparse_matrix, normalize_in_place,
    pagerank_sparse, save_sparse_matrix, top_k, write_vector, BoostConfig, PageRankConfig,
};

#[derive(Parser)]
#[command(name = "surfrank")]
#[command(about = "PageRank by damped power iteration", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank a sparse adjacency file (`SparseMatrix:` format)
    Sparse {
        /// Input file
        input: PathBuf,

        /// Damping factor, in (0, 1)
        #[arg(short, long, default_value_t = 0.85)]
        damping: f64,

        /// Fixed number of steps, or the step budget when --tolerance is given
        #[arg(short, long, default_value_t = 100)]
        iterations: usize,

        /// Stop once the L1 change between iterates is below this
        #[arg(short, long)]
        tolerance: Option<f64>,

        /// Add an in-link to this node from every scanned node before ranking
        #[arg(long)]
        boost: Option<usize>,

        /// Number of leading rows scanned by --boost
        #[arg(long, default_value_t = BoostConfig::DEFAULT_SCAN_LIMIT)]
        scan_limit: usize,

        /// Print the rank of this node
        #[arg(long)]
        report: Option<usize>,

        /// Print the k best-ranked nodes
        #[arg(long, default_value_t = 0)]
        top: usize,

        /// Write the rank vector here (`-` for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write the (possibly boosted) graph here
        #[arg(long)]
        graph_output: Option<PathBuf>,
    },

    /// Rank a dense adjacency file (`Matrix:` format) with the H/S/E baseline
    Dense {
        /// Input file
        input: PathBuf,

        /// Damping factor, in (0, 1)
        #[arg(short, long, default_value_t = 0.85)]
        damping: f64,

        /// Number of multiplications by E
        #[arg(short, long, default_value_t = 2)]
        powers: usize,

        /// Write the rank vector here (`-` for stdout, the default)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn emit_vector(path: Option<&Path>, v: &[f64]) -> Result<()> {
    match path {
        Some(p) if p != Path::new("-") => {
            let mut w = BufWriter::new(
                File::create(p).with_context(|| format!("Failed to create {}", p.display()))?,
            );
            write_vector(&mut w, v)?;
            w.flush()?;
        }
        _ => write_vector(io::stdout().lock(), v)?,
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Sparse {
            input,
            damping,
            iterations,
            tolerance,
            boost: boost_target,
            scan_limit,
            report,
            top,
            output,
            graph_output,
        } => {
            let config = PageRankConfig { damping, max_iterations: iterations, tolerance };
            config.validate()?;

            let start = Instant::now();
            let mut graph = load_sparse_matrix(&input)
                .with_context(|| format!("Failed to load {}", input.display()))?;
            ensure!(
                graph.is_square(),
                "adjacency must be square, got {} by {}",
                graph.rows(),
                graph.cols()
            );
            log::info!(
                "Loaded {} nodes, {} edges in {:?}",
                graph.rows(),
                graph.total_entries(),
                start.elapsed()
            );

            if let Some(target) = boost_target {
                let added = BoostConfig { target, scan_limit }.apply(&mut graph)?;
                log::info!("Boosted node {target}: {added} edges added");
            }
            if let Some(path) = &graph_output {
                save_sparse_matrix(path, &graph)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
            }

            normalize_in_place(&mut graph);
            let start = Instant::now();
            let run = pagerank_sparse(&graph, config)?;
            log::info!(
                "PageRank: {} iterations, l1 diff {:e}, converged={} in {:?}",
                run.iterations,
                run.diff_l1,
                run.converged,
                start.elapsed()
            );

            if let Some(node) = report {
                let score = run
                    .scores
                    .get(node)
                    .with_context(|| format!("node {node} out of range ({} nodes)", graph.rows()))?;
                println!("Node {node}: {score:.6}");
            }
            if top > 0 {
                println!("Top {top}:");
                for (rank, (node, score)) in top_k(&run.scores, top).into_iter().enumerate() {
                    println!("{:>4}. {:>8} {:.6e}", rank + 1, node, score);
                }
            }
            if let Some(path) = &output {
                emit_vector(Some(path.as_path()), &run.scores)?;
            }
        }
        Commands::Dense { input, damping, powers, output } => {
            let m = load_dense_matrix(&input)
                .with_context(|| format!("Failed to load {}", input.display()))?;
            ensure!(m.rows() == m.cols(), "adjacency must be square, got {} by {}", m.rows(), m.cols());
            let r = dense_pagerank(&m, damping, powers)?;
            emit_vector(output.as_deref(), &r)?;
        }
    }

    Ok(())
}
