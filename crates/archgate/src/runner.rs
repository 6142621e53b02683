//! Test-suite integration.
//!
//! Each helper evaluates rules against a model under the project's
//! `archgate.toml` and panics with the evaluator's report on failure.

use archgate_core::{CodeModel, Config, Evaluator, Rule};
use archgate_rules::Preset;
use std::path::{Path, PathBuf};

/// Asserts that `rule` holds for `model`.
///
/// # Panics
///
/// Panics with a report if the rule is violated or cannot be evaluated, or
/// if the project config cannot be loaded.
pub fn assert_rule(rule: &Rule, model: &dyn CodeModel) {
    assert_rules([rule.clone()], model);
}

/// Asserts that every rule holds for `model`.
///
/// # Panics
///
/// Panics with a report listing every failing rule, or if the project config
/// cannot be loaded.
pub fn assert_rules<I>(rules: I, model: &dyn CodeModel)
where
    I: IntoIterator<Item = Rule>,
{
    let config = load_config(&find_project_root(), None);
    run(rules, model, config);
}

/// Like [`assert_rules`], reading the config from `config_path`.
///
/// A relative path is resolved against the project root.
///
/// # Panics
///
/// Panics with a report listing every failing rule, or if the config cannot
/// be loaded.
pub fn assert_rules_with_config<I>(rules: I, model: &dyn CodeModel, config_path: &str)
where
    I: IntoIterator<Item = Rule>,
{
    let config = load_config(&find_project_root(), Some(config_path));
    run(rules, model, config);
}

/// Asserts that the rules of the named preset hold for `model`.
///
/// # Panics
///
/// Panics if the preset is unknown or any of its rules fails.
pub fn assert_preset(preset: &str, model: &dyn CodeModel) {
    assert_rules(resolve_preset(preset).rules(), model);
}

fn run<I>(rules: I, model: &dyn CodeModel, config: Config)
where
    I: IntoIterator<Item = Rule>,
{
    let result = Evaluator::builder()
        .rules(rules)
        .config(config)
        .build()
        .evaluate(model);

    if !result.passed() {
        panic!("{}", result.format_test_report());
    }
}

/// Loads the config from an explicit path, or discovers it in `root`.
///
/// Falls back to the default configuration if no config file exists.
fn load_config(root: &Path, explicit_path: Option<&str>) -> Config {
    let loaded = match explicit_path {
        Some(path) => {
            let full_path = if Path::new(path).is_absolute() {
                PathBuf::from(path)
            } else {
                root.join(path)
            };
            Config::from_file(&full_path)
        }
        None => Config::discover(root),
    };
    loaded.unwrap_or_else(|e| panic!("archgate: failed to load config: {e}"))
}

/// Checks whether a `Cargo.toml` file defines a `[workspace]` section
/// by parsing as TOML, avoiding false positives from comments or strings.
fn has_workspace_section(cargo_toml: &Path) -> bool {
    let Ok(content) = std::fs::read_to_string(cargo_toml) else {
        return false;
    };
    let Ok(table) = content.parse::<toml::Table>() else {
        return false;
    };
    table.contains_key("workspace")
}

/// Finds the project root starting from `CARGO_MANIFEST_DIR`.
fn find_project_root() -> PathBuf {
    match std::env::var("CARGO_MANIFEST_DIR") {
        Ok(manifest_dir) => workspace_root_from(Path::new(&manifest_dir)),
        Err(_) => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}

/// Walks up from `manifest_dir` to the nearest workspace root.
///
/// Returns `manifest_dir` itself when no enclosing workspace is found.
fn workspace_root_from(manifest_dir: &Path) -> PathBuf {
    let mut candidate = Some(manifest_dir);
    while let Some(dir) = candidate {
        let cargo_toml = dir.join("Cargo.toml");
        if cargo_toml.exists() && has_workspace_section(&cargo_toml) {
            return dir.to_path_buf();
        }
        candidate = dir.parent();
    }
    manifest_dir.to_path_buf()
}

fn resolve_preset(name: &str) -> Preset {
    Preset::from_name(name).unwrap_or_else(|| {
        panic!("archgate: unknown preset `{name}`. Valid presets: standard, jpa, spring, all")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use archgate_core::{classes, ClassDecl, Condition, InMemoryModel, ModelBuilder};
    use std::fs;
    use tempfile::TempDir;

    fn model() -> InMemoryModel {
        ModelBuilder::new()
            .class(ClassDecl::class("a.One"))
            .build()
            .unwrap()
    }

    fn flag() -> Rule {
        classes()
            .should(Condition::new("be flagged", |class, _, events| {
                events.violated(class.id(), format!("Class {} is flagged", class.full_name()));
                Ok(())
            }))
            .named("flag")
    }

    // ── Project root ──

    #[test]
    fn workspace_root_is_found_above_member() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("Cargo.toml"),
            "[workspace]\nmembers = [\"crates/app\"]\n",
        )
        .unwrap();
        let member = dir.path().join("crates/app");
        fs::create_dir_all(&member).unwrap();
        fs::write(member.join("Cargo.toml"), "[package]\nname = \"app\"\n").unwrap();

        assert_eq!(workspace_root_from(&member), dir.path());
    }

    #[test]
    fn standalone_crate_is_its_own_root() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("Cargo.toml"),
            "# [workspace] in a comment does not count\n[package]\nname = \"app\"\n",
        )
        .unwrap();

        assert!(!has_workspace_section(&dir.path().join("Cargo.toml")));
        assert_eq!(workspace_root_from(dir.path()), dir.path());
    }

    // ── Config loading ──

    #[test]
    fn load_config_discovers_file_in_root() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("archgate.toml"), "[rules.flag]\nenabled = false\n").unwrap();

        let config = load_config(dir.path(), None);
        assert!(!config.is_rule_enabled("flag"));
    }

    #[test]
    fn load_config_defaults_without_file() {
        let dir = TempDir::new().unwrap();
        let config = load_config(dir.path(), None);
        assert!(config.fail_on_empty_should);
        assert!(config.rules.is_empty());
    }

    #[test]
    fn load_config_resolves_relative_explicit_path() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("config")).unwrap();
        fs::write(dir.path().join("config/arch.toml"), "fail_on_empty_should = false\n").unwrap();

        let config = load_config(dir.path(), Some("config/arch.toml"));
        assert!(!config.fail_on_empty_should);
    }

    #[test]
    #[should_panic(expected = "failed to load config")]
    fn load_config_missing_explicit_path_panics() {
        let dir = TempDir::new().unwrap();
        load_config(dir.path(), Some("missing.toml"));
    }

    // ── Running ──

    #[test]
    #[should_panic(expected = "Rule 'classes should be flagged' was violated (1 times)")]
    fn run_panics_with_report() {
        run([flag()], &model(), Config::default());
    }

    #[test]
    fn run_passes_when_failing_rule_is_disabled() {
        let config = Config::parse("[rules.flag]\nenabled = false").unwrap();
        run([flag()], &model(), config);
    }

    #[test]
    fn resolve_preset_by_name() {
        assert_eq!(resolve_preset("spring"), Preset::Spring);
    }

    #[test]
    #[should_panic(expected = "unknown preset")]
    fn resolve_preset_invalid_panics() {
        resolve_preset("recommended");
    }
}
