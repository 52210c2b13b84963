use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::cli::args::BuildArgs;
use crate::config::BundleConfig;
use crate::emit::BuildReport;
use crate::error::BundleError;
use crate::graph::build_graph;
use crate::index::{build_index, IndexCache, ModuleIndex};
use crate::resolve::{normalize_path, Resolver};
use crate::serialize::serialize_bundle;

/// Run the full pipeline: index, resolve, traverse, serialize.
///
/// Diagnostics go to stdout in pipeline order (indexed files, entry
/// specifiers, reachable count and list, bundle); any fatal error aborts
/// with no bundle produced.
pub async fn run_build(args: BuildArgs) -> Result<()> {
    let root = fs::canonicalize(&args.root)
        .with_context(|| format!("root directory `{}` does not exist", args.root.display()))?;

    let config = effective_config(&args)?;
    let cache = args.cache_dir.as_deref().map(IndexCache::load).map(Arc::new);

    // JSON mode owns stdout, so styled diagnostics are suppressed there too.
    let quiet = args.quiet || args.json;

    let spinner = if quiet {
        None
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        pb.set_message(format!("Indexing {}...", root.display()));
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    };

    let index = build_index(&root, &config, cache).await?;

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    if !quiet {
        for path in index.all_files() {
            println!("{}", path.display());
        }
    }

    let entry = resolve_entry(&args.entry_point, &index)?;

    if !quiet {
        println!(
            "{} {}",
            style("❯ Building").bold(),
            style(args.entry_point.display()).blue()
        );
        for specifier in index.dependencies(&entry)? {
            println!("{specifier}");
        }
    }

    let resolver = Resolver::new(&index, &config.extensions);
    let reachable = build_graph(&entry, &index, &resolver)?;

    if !quiet {
        println!(
            "{} {} {}",
            style("❯ Found").bold(),
            style(reachable.len()).blue(),
            style("files").bold()
        );
        for path in reachable.iter() {
            println!("{}", path.display());
        }
    }

    let bundle = serialize_bundle(&reachable, &index)?;

    if let Some(cache_dir) = &args.cache_dir {
        let mut cache = IndexCache::empty(cache_dir);
        cache.refresh(&index);
        cache.persist()?;
    }

    if args.json {
        let report = BuildReport::new(&root, &entry, &index, &reachable, &bundle);
        println!("{}", report.to_json());
        if let Some(output) = &args.output {
            write_bundle(output, &bundle)?;
        }
    } else if let Some(output) = &args.output {
        write_bundle(output, &bundle)?;
        if !quiet {
            println!("{} {}", style("❯ Wrote").bold(), output.display());
        }
    } else {
        if !quiet {
            println!("{}", style("❯ Serializing bundle").bold());
        }
        println!("{bundle}");
    }

    Ok(())
}

fn effective_config(args: &BuildArgs) -> Result<BundleConfig> {
    let mut config = match &args.config {
        Some(path) => BundleConfig::from_file(path)?,
        None => BundleConfig::default(),
    };
    if let Some(extensions) = &args.extensions {
        config.extensions = BundleConfig::parse_extensions(extensions);
    }
    if let Some(max_workers) = args.max_workers {
        config.max_workers = max_workers.max(1);
    }
    Ok(config)
}

/// Resolve the entry-point argument against the current working directory
/// and check it against the index. A miss after lexical normalization is
/// retried through canonicalization to cope with symlinked roots.
fn resolve_entry(entry: &Path, index: &ModuleIndex) -> Result<PathBuf, BundleError> {
    let cwd = std::env::current_dir().map_err(|source| BundleError::Io {
        path: PathBuf::from("."),
        source,
    })?;

    let candidate = normalize_path(&cwd.join(entry));
    if index.exists(&candidate) {
        return Ok(candidate);
    }
    if let Ok(canonical) = fs::canonicalize(&candidate) {
        if index.exists(&canonical) {
            return Ok(canonical);
        }
    }

    Err(BundleError::EntryPointNotFound { path: candidate })
}

fn write_bundle(output: &Path, bundle: &str) -> Result<()> {
    fs::write(output, bundle)
        .with_context(|| format!("failed to write bundle to `{}`", output.display()))
}
