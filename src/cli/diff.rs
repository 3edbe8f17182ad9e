//! Flatten, compare and reconcile command handlers

use anyhow::{Context, Result};
use clap::Args;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use nsdiff::config::{Config, OutputFormat};
use nsdiff::flatten::parse_manifests;
use nsdiff::report::{ComparisonPayload, NamespaceManifests, ValidationReport, Validator, render_text};

/// Arguments for `nsdiff compare`
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Baseline manifest file (YAML, multi-document or List)
    #[arg(long, short = 'b')]
    pub baseline: PathBuf,

    /// Label of the baseline namespace (defaults to the file stem)
    #[arg(long)]
    pub baseline_label: Option<String>,

    /// Target manifests as LABEL=FILE (LABEL defaults to the file stem)
    #[arg(long, short = 't', required = true)]
    pub target: Vec<String>,

    /// Additional ignore rule (repeatable)
    #[arg(long, short = 'i')]
    pub ignore: Vec<String>,

    /// Output format (overrides output.format)
    #[arg(long, short = 'o', value_enum)]
    pub format: Option<OutputFormat>,
}

/// Arguments for `nsdiff reconcile`
#[derive(Args, Debug)]
pub struct ReconcileArgs {
    /// Comparison payload (JSON or YAML)
    pub payload: PathBuf,

    /// Additional ignore rule (repeatable)
    #[arg(long, short = 'i')]
    pub ignore: Vec<String>,

    /// Output format (overrides output.format)
    #[arg(long, short = 'o', value_enum)]
    pub format: Option<OutputFormat>,
}

/// Print the flattened maps of every manifest in `files`
pub fn handle_flatten(files: &[PathBuf]) -> Result<()> {
    let mut flattened: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();

    for file in files {
        for object in load_manifests(file)? {
            let key = object.key().to_string();
            if flattened.insert(key.clone(), object.into_fields()).is_some() {
                tracing::warn!("Duplicate manifest for {} in {}", key, file.display());
            }
        }
    }

    let yaml = serde_yaml::to_string(&flattened).context("Failed to serialize flattened manifests")?;
    print!("{}", yaml);
    Ok(())
}

/// Compare local manifest files; returns whether every object is OK
pub fn handle_compare(args: CompareArgs, config: &Config) -> Result<bool> {
    let baseline_label = args
        .baseline_label
        .clone()
        .unwrap_or_else(|| file_label(&args.baseline));
    let baseline = NamespaceManifests::new(baseline_label, load_manifests(&args.baseline)?);

    let mut targets = Vec::with_capacity(args.target.len());
    for spec in &args.target {
        let (label, path) = parse_target(spec);
        targets.push(NamespaceManifests::new(label, load_manifests(&path)?));
    }

    let mut ignore = config.ignore_rules();
    for rule in &args.ignore {
        ignore.add_custom(rule)?;
    }

    let report = Validator::new(ignore)
        .validate(&baseline, &targets)
        .context("Failed to reconcile manifests")?;

    emit_report(&report, args.format.unwrap_or(config.output.format), config)?;
    Ok(report.all_ok())
}

/// Reconcile an externally produced payload; returns whether every object is OK
pub fn handle_reconcile(args: ReconcileArgs, config: &Config) -> Result<bool> {
    let contents = std::fs::read_to_string(&args.payload)
        .with_context(|| format!("Failed to read payload: {}", args.payload.display()))?;
    let payload = ComparisonPayload::parse(&contents)
        .with_context(|| format!("Failed to parse payload: {}", args.payload.display()))?;

    let extra: Vec<String> = config.ignore_fields.iter().chain(&args.ignore).cloned().collect();
    let ignore = payload.ignore_rules(&extra);

    let report = payload
        .evaluate(&ignore)
        .context("Failed to reconcile comparison payload")?;

    emit_report(&report, args.format.unwrap_or(config.output.format), config)?;
    Ok(report.all_ok())
}

fn emit_report(report: &ValidationReport, format: OutputFormat, config: &Config) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{}", render_text(report, config.render_options())),
        OutputFormat::Yaml => {
            let yaml = serde_yaml::to_string(report).context("Failed to serialize report")?;
            print!("{}", yaml);
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
            println!("{}", json);
        }
    }
    Ok(())
}

fn load_manifests(path: &Path) -> Result<Vec<nsdiff::flatten::FlatObject>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifests: {}", path.display()))?;
    let objects = parse_manifests(&contents);
    if objects.is_empty() {
        tracing::warn!("No manifests with kind and metadata.name in {}", path.display());
    }
    Ok(objects)
}

fn parse_target(spec: &str) -> (String, PathBuf) {
    match spec.split_once('=') {
        Some((label, path)) if !label.trim().is_empty() => {
            (label.trim().to_string(), PathBuf::from(path))
        }
        _ => {
            let path = PathBuf::from(spec.trim_start_matches('='));
            (file_label(&path), path)
        }
    }
}

fn file_label(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
