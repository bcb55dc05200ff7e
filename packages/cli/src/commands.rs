use anyhow::{bail, Result};
use di_transformer::diagnostics::{count_errors, count_warnings, Diagnostic};
use di_transformer::file_system::{clean_path, NodeJsFileSystem};
use di_transformer::logging::TracingLogger;
use di_transformer::options::TransformerOptions;
use di_transformer::project::Project;
use serde_json::json;
use std::collections::BTreeSet;
use std::sync::Arc;

pub struct CommandContext {
    pub options: TransformerOptions,
    /// Print machine-readable JSON instead of a summary.
    pub json: bool,
}

/// What a command printed and whether the process should fail.
#[derive(Debug, Default)]
pub struct CommandOutcome {
    pub output: String,
    pub failed: bool,
}

impl CommandContext {
    pub fn new(options: TransformerOptions, json: bool) -> Self {
        Self { options, json }
    }

    fn project(&self) -> Project {
        let provider = Arc::new(NodeJsFileSystem::from_options(&self.options));
        Project::new(self.options.clone(), provider).with_logger(Arc::new(TracingLogger::new()))
    }
}

fn summary<'d>(diagnostics: impl Iterator<Item = &'d Diagnostic>) -> String {
    let all: Vec<Diagnostic> = diagnostics.cloned().collect();
    format!(
        "{} error(s), {} warning(s)",
        count_errors(&all),
        count_warnings(&all)
    )
}

pub fn run_scan(ctx: &CommandContext) -> Result<CommandOutcome> {
    let project = ctx.project();
    let (loaded, catalog) = project.rescan();
    let failed = catalog.has_errors() || !loaded.diagnostics.is_empty();

    let output = if ctx.json {
        serde_json::to_string_pretty(&json!({
            "catalog": catalog.as_ref(),
            "readErrors": loaded.diagnostics,
        }))?
    } else {
        let mut lines: Vec<String> = catalog
            .records()
            .map(|r| format!("{} -> {} [{}]", r.interface_name, r.describe(), r.sanitized_token))
            .collect();
        lines.extend(
            catalog
                .qualified_records()
                .map(|(key, r)| format!("{} -> {} [{}]", key, r.describe(), r.sanitized_token)),
        );
        lines.push(format!(
            "{} interface(s) in {} file(s); {}",
            catalog.len(),
            loaded.units.len(),
            summary(loaded.diagnostics.iter().chain(catalog.diagnostics()))
        ));
        lines.join("\n")
    };
    Ok(CommandOutcome { output, failed })
}

/// Transform `files` (root-relative; all units when empty) and write the results.
pub fn run_transform(ctx: &CommandContext, files: &[String], out_dir: Option<&str>) -> Result<CommandOutcome> {
    let project = ctx.project();
    let (loaded, _) = project.rescan();

    let units = if files.is_empty() {
        loaded.units
    } else {
        let requested: BTreeSet<String> = files.iter().map(|f| clean_path(f)).collect();
        let units: Vec<_> = loaded
            .units
            .into_iter()
            .filter(|u| requested.contains(&clean_path(&u.path)))
            .collect();
        let found: BTreeSet<String> = units.iter().map(|u| clean_path(&u.path)).collect();
        if let Some(missing) = requested.difference(&found).next() {
            bail!("no source file matches `{}`", missing);
        }
        units
    };

    let results = project.transform_units(&units);
    let out_dir = out_dir.map(str::to_string).or_else(|| ctx.options.out_dir.clone());
    let (written, write_diagnostics) = project.write_results(&results, out_dir.as_deref());

    let failed = results.iter().any(|r| !r.success)
        || !write_diagnostics.is_empty()
        || !loaded.diagnostics.is_empty();

    let output = if ctx.json {
        serde_json::to_string_pretty(&json!({
            "files": results,
            "written": written,
            "diagnostics": loaded.diagnostics.iter().chain(&write_diagnostics).collect::<Vec<_>>(),
        }))?
    } else {
        let transformed: usize = results.iter().map(|r| r.stats.transformed_components).sum();
        let mut lines: Vec<String> = written.iter().map(|p| format!("wrote {}", p)).collect();
        lines.push(format!(
            "{} component(s) transformed in {} file(s); {}",
            transformed,
            results.len(),
            summary(
                loaded
                    .diagnostics
                    .iter()
                    .chain(&write_diagnostics)
                    .chain(results.iter().flat_map(|r| r.diagnostics()))
            )
        ));
        lines.join("\n")
    };
    Ok(CommandOutcome { output, failed })
}

pub fn run_generate(ctx: &CommandContext, output: Option<&str>) -> Result<CommandOutcome> {
    let project = ctx.project();
    let (loaded, catalog) = project.rescan();
    let artifact = project.generate(&loaded.units);
    let path = project.write_artifact(&artifact, output)?;

    let failed = artifact.has_errors() || catalog.has_errors() || !loaded.diagnostics.is_empty();
    let output = if ctx.json {
        artifact.to_json()?
    } else {
        format!(
            "wrote {} ({} token(s)); {}",
            path,
            artifact.token_table.len(),
            summary(
                loaded
                    .diagnostics
                    .iter()
                    .chain(catalog.diagnostics())
                    .chain(&artifact.diagnostics)
            )
        )
    };
    Ok(CommandOutcome { output, failed })
}

pub fn run_build(ctx: &CommandContext) -> Result<CommandOutcome> {
    let report = ctx.project().build();
    let failed = report.has_errors();
    let output = if ctx.json {
        serde_json::to_string_pretty(&report)?
    } else {
        let mut lines: Vec<String> = report.written.iter().map(|p| format!("wrote {}", p)).collect();
        lines.push(format!(
            "{} component(s) transformed, {} token(s); {}",
            report.transformed_components(),
            report.artifact.token_table.len(),
            summary(report.all_diagnostics())
        ));
        lines.join("\n")
    };
    Ok(CommandOutcome { output, failed })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn context(root: &Path, json: bool) -> CommandContext {
        let options = TransformerOptions {
            root_dir: root.to_string_lossy().to_string(),
            ..Default::default()
        };
        CommandContext::new(options, json)
    }

    fn seed(root: &Path) {
        fs::create_dir_all(root.join("src")).unwrap();
        fs::write(
            root.join("src/Clock.ts"),
            "@Service()\nexport class SystemClock implements Clock {}\n",
        )
        .unwrap();
        fs::write(
            root.join("src/Time.tsx"),
            "export function Time({ clock }: { clock: Inject<Clock> }) {\n  return clock;\n}\n",
        )
        .unwrap();
    }

    #[test]
    fn should_list_catalog() {
        let dir = tempfile::tempdir().unwrap();
        seed(dir.path());
        let outcome = run_scan(&context(dir.path(), false)).unwrap();
        assert!(!outcome.failed);
        assert!(outcome.output.contains("Clock -> SystemClock (src/Clock.ts) [Clock__src_Clock]"));
    }

    #[test]
    fn should_transform_requested_files_only() {
        let dir = tempfile::tempdir().unwrap();
        seed(dir.path());
        fs::write(
            dir.path().join("src/Other.tsx"),
            "export function Other({ clock }: { clock: Inject<Clock> }) { return clock; }\n",
        )
        .unwrap();

        let outcome = run_transform(&context(dir.path(), false), &["src/Time.tsx".to_string()], None).unwrap();
        assert!(!outcome.failed);
        assert!(outcome.output.contains("wrote src/Time.tsx"));
        let other = fs::read_to_string(dir.path().join("src/Other.tsx")).unwrap();
        assert!(other.contains("Inject<Clock>"));
    }

    #[test]
    fn should_reject_unknown_files() {
        let dir = tempfile::tempdir().unwrap();
        seed(dir.path());
        let result = run_transform(&context(dir.path(), false), &["src/Nope.tsx".to_string()], None);
        assert!(result.is_err());
    }

    #[test]
    fn should_fail_generation_with_missing_implementation() {
        let dir = tempfile::tempdir().unwrap();
        seed(dir.path());
        fs::remove_file(dir.path().join("src/Clock.ts")).unwrap();
        let outcome = run_generate(&context(dir.path(), true), Some("di.ts")).unwrap();
        assert!(outcome.failed);
        assert!(dir.path().join("di.ts").exists());
        let json: serde_json::Value = serde_json::from_str(&outcome.output).unwrap();
        assert_eq!(json["diagnostics"][0]["code"], "DI3001");
    }

    #[test]
    fn should_build_project() {
        let dir = tempfile::tempdir().unwrap();
        seed(dir.path());
        let outcome = run_build(&context(dir.path(), false)).unwrap();
        assert!(!outcome.failed, "{}", outcome.output);
        assert!(outcome.output.contains("1 component(s) transformed, 1 token(s)"));
        assert!(dir.path().join("src/.di/di-config.ts").exists());
    }
}
