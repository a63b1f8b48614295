//! Packaging glue - sidecar renaming and manifest housekeeping
//!
//! Build-time helpers mirroring what the bundler needs: the backend binary
//! renamed to carry the host target triple, the build manifest version kept
//! in lockstep with the app manifest, and the relaxed-JSON app manifest
//! converted to strict JSON.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use regex::Regex;

/// Rename `stem{exe_suffix}` in `dist_dir` to `stem-{triple}{exe_suffix}`.
///
/// Returns the new path. Renaming an already-renamed binary is an error;
/// the bundler expects exactly one sidecar per triple.
pub fn rename_sidecar(
    dist_dir: &Path,
    stem: &str,
    triple: &str,
    exe_suffix: &str,
) -> Result<PathBuf> {
    let old_path = dist_dir.join(format!("{}{}", stem, exe_suffix));
    if !old_path.exists() {
        bail!("sidecar {} does not exist", old_path.display());
    }
    let new_path = dist_dir.join(crate::launcher::sidecar_file_name(stem, triple, exe_suffix));
    fs::rename(&old_path, &new_path)
        .with_context(|| format!("renaming {}", old_path.display()))?;
    Ok(new_path)
}

/// Copy the version string of the app manifest into the build manifest.
///
/// The app manifest is JSON or JSON5 with a top-level `version` field; the
/// build manifest is TOML whose first `version = "..."` line is rewritten
/// in place. Returns the synced version.
pub fn sync_version(app_manifest: &Path, build_manifest: &Path) -> Result<String> {
    let manifest = fs::read_to_string(app_manifest)
        .with_context(|| format!("reading {}", app_manifest.display()))?;
    let parsed: serde_json::Value =
        json5::from_str(&manifest).with_context(|| format!("parsing {}", app_manifest.display()))?;
    let version = parsed
        .get("version")
        .and_then(|v| v.as_str())
        .context("app manifest has no version field")?
        .to_string();

    let toml = fs::read_to_string(build_manifest)
        .with_context(|| format!("reading {}", build_manifest.display()))?;
    let re = Regex::new(r#"version = "[^"]*""#).expect("static pattern");
    if !re.is_match(&toml) {
        bail!("build manifest has no version field");
    }
    let replaced = re.replacen(&toml, 1, format!(r#"version = "{}""#, version).as_str());
    fs::write(build_manifest, replaced.as_ref())
        .with_context(|| format!("writing {}", build_manifest.display()))?;

    Ok(version)
}

/// Convert a JSON5 manifest into strict, pretty-printed JSON
pub fn convert_manifest(input: &Path, output: &Path) -> Result<()> {
    let relaxed = fs::read_to_string(input)
        .with_context(|| format!("reading {}", input.display()))?;
    let value: serde_json::Value =
        json5::from_str(&relaxed).with_context(|| format!("parsing {}", input.display()))?;
    let strict = serde_json::to_string_pretty(&value)?;
    fs::write(output, strict + "\n")
        .with_context(|| format!("writing {}", output.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rename_sidecar_embeds_triple() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("apppy"), b"binary").unwrap();

        let new_path = rename_sidecar(dir.path(), "apppy", "x86_64-unknown-linux-gnu", "").unwrap();

        assert_eq!(
            new_path.file_name().unwrap(),
            "apppy-x86_64-unknown-linux-gnu"
        );
        assert!(new_path.exists());
        assert!(!dir.path().join("apppy").exists());
    }

    #[test]
    fn rename_sidecar_fails_when_binary_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let result = rename_sidecar(dir.path(), "apppy", "x86_64-unknown-linux-gnu", "");
        assert!(result.is_err());
    }

    #[test]
    fn sync_version_rewrites_only_the_first_version_line() {
        let dir = tempfile::tempdir().unwrap();
        let app = dir.path().join("package.json5");
        let build = dir.path().join("Cargo.toml");
        fs::write(&app, r#"{ version: "2.4.1", name: "basinview" }"#).unwrap();
        fs::write(
            &build,
            "[package]\nversion = \"0.0.0\"\n\n[dependencies]\nserde = { version = \"1.0\" }\n",
        )
        .unwrap();

        let version = sync_version(&app, &build).unwrap();

        assert_eq!(version, "2.4.1");
        let toml = fs::read_to_string(&build).unwrap();
        assert!(toml.contains("version = \"2.4.1\""));
        assert!(toml.contains("serde = { version = \"1.0\" }"));
    }

    #[test]
    fn sync_version_rejects_manifest_without_version() {
        let dir = tempfile::tempdir().unwrap();
        let app = dir.path().join("package.json");
        let build = dir.path().join("Cargo.toml");
        fs::write(&app, r#"{"name": "basinview"}"#).unwrap();
        fs::write(&build, "version = \"0.0.0\"\n").unwrap();
        assert!(sync_version(&app, &build).is_err());
    }

    #[test]
    fn convert_manifest_produces_strict_json() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("package.json5");
        let output = dir.path().join("package.json");
        fs::write(
            &input,
            "{\n  // app manifest\n  name: 'basinview',\n  version: \"0.1.0\",\n}\n",
        )
        .unwrap();

        convert_manifest(&input, &output).unwrap();

        let strict: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(strict["name"], "basinview");
        assert_eq!(strict["version"], "0.1.0");
    }
}
