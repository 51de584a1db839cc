use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use comfy_table::Table;
use rpt_design::{GenerationContext, GeneratorProfile, TemplateSelector};
use rpt_model::ValidationReport;
use rpt_validate::{validate_dir, validate_file};
use tracing::info;

use rpt_cli::pipeline::run_batch;
use rpt_cli::types::BatchResult;

use crate::cli::{GenerateArgs, TemplatesArgs, ValidateArgs};
use crate::summary::apply_table_style;

fn context_from_args(args: &GenerateArgs) -> GenerationContext {
    let mut ctx = GenerationContext::from_env();
    if let Some(dir) = &args.template_dir {
        ctx.template_dir = dir.clone();
    }
    if let Some(dir) = &args.output_dir {
        ctx.output_dir = dir.clone();
    }
    if args.legacy {
        ctx.profile = GeneratorProfile::legacy();
    }
    ctx
}

pub fn run_generate(args: &GenerateArgs) -> Result<BatchResult> {
    let ctx = context_from_args(args);
    info!(
        jobs = args.jobs.len(),
        template_dir = %ctx.template_dir.display(),
        output_dir = %ctx.output_dir.display(),
        legacy = args.legacy,
        "starting batch"
    );
    Ok(run_batch(&ctx, &args.jobs, args.validate))
}

pub fn run_validate(args: &ValidateArgs) -> Result<Vec<(PathBuf, ValidationReport)>> {
    if args.all {
        return validate_dir(&args.dir)
            .with_context(|| format!("read design directory {}", args.dir.display()));
    }
    if args.files.is_empty() {
        bail!("no files given; pass design files or --all");
    }
    Ok(args
        .files
        .iter()
        .map(|path| (path.clone(), validate_file(path)))
        .collect())
}

pub fn run_templates(args: &TemplatesArgs) -> Result<()> {
    let dir = args
        .template_dir
        .clone()
        .unwrap_or_else(|| GenerationContext::from_env().template_dir);
    let selector = TemplateSelector::new(&dir);
    println!("Templates: {}", selector.dir().display());
    let mut table = Table::new();
    table.set_header(vec!["Report type", "Template", "Present"]);
    apply_table_style(&mut table);
    for entry in selector.catalog() {
        table.add_row(vec![
            entry.report_type.to_string(),
            entry.file_name.to_string(),
            match (entry.exists, entry.embedded) {
                (true, _) => "yes",
                (false, true) => "embedded",
                (false, false) => "no (base)",
            }
            .to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}
